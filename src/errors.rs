use thiserror::Error;

use crate::validation::ValidationReport;

/// Hard errors raised by constructors and mutators.
///
/// These surface immediately at the call that attempted the invalid change;
/// the entity is left untouched. Advisory problems are reported through
/// [`ValidationReport`] instead.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid currency amount: {0}")]
    InvalidCurrency(String),

    #[error("Amount value can not be negative: {0}")]
    NegativeAmount(String),

    #[error("Multi-currency orders are not supported: expected {expected}, found {found}")]
    MultiCurrencyOrder { expected: String, found: String },

    #[error("Item category is not supported: {0}")]
    InvalidItemCategory(String),

    #[error("Shipping details must have a valid type: {0}")]
    InvalidShippingType(String),

    #[error("Shipping preference provided is not supported: {0}")]
    InvalidShippingPreference(String),

    #[error("Landing page provided is not supported: {0}")]
    InvalidLandingPage(String),

    #[error("User action provided is not supported: {0}")]
    InvalidUserAction(String),

    #[error("Payment method preference provided is not supported: {0}")]
    InvalidPaymentMethodPreference(String),

    #[error("Order intent provided is not supported: {0}")]
    InvalidOrderIntent(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Order has no ID; it has not been submitted")]
    MissingOrderId,

    #[error("Order {0} has already been submitted and is read-only")]
    OrderSubmitted(String),

    #[error("Amount overflow while computing {0}")]
    AmountOverflow(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrderError {
    pub fn invalid_purchase_unit() -> Self {
        OrderError::InvalidOrder("Orders must have exactly one valid purchase unit".to_string())
    }

    pub fn invalid_payment_source() -> Self {
        OrderError::InvalidOrder("Orders must have at least one valid payment source".to_string())
    }

    pub fn purchase_unit_limit() -> Self {
        OrderError::InvalidOrder("At present only 1 purchase_unit is supported".to_string())
    }

    pub(crate) fn multi_currency(expected: impl ToString, found: impl ToString) -> Self {
        OrderError::MultiCurrencyOrder {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCurrency(_) => "invalid_currency",
            Self::NegativeAmount(_) => "negative_amount",
            Self::MultiCurrencyOrder { .. } => "multi_currency_order",
            Self::InvalidItemCategory(_) => "invalid_item_category",
            Self::InvalidShippingType(_) => "invalid_shipping_type",
            Self::InvalidShippingPreference(_) => "invalid_shipping_preference",
            Self::InvalidLandingPage(_) => "invalid_landing_page",
            Self::InvalidUserAction(_) => "invalid_user_action",
            Self::InvalidPaymentMethodPreference(_) => "invalid_payment_method_preference",
            Self::InvalidOrderIntent(_) => "invalid_order_intent",
            Self::InvalidOrder(_) => "invalid_order",
            Self::MissingOrderId => "missing_order_id",
            Self::OrderSubmitted(_) => "order_submitted",
            Self::AmountOverflow(_) => "amount_overflow",
            Self::Validation(_) => "validation_error",
            Self::Serialization(_) => "serialization_error",
        }
    }

    /// Whether the error was caused by caller input rather than an internal failure.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::AmountOverflow(_))
    }
}
