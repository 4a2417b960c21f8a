use serde::Serialize;
use tracing::debug;
use validator::Validate;

use super::enums::{LandingPage, PaymentMethod, ShippingPreference, UserAction};
use super::non_empty;
use crate::config::CheckoutConfig;
use crate::errors::OrderError;
use crate::validation::{field_findings, ValidationReport};

pub const DEFAULT_LOCALE: &str = "en-US";

/// Payer-experience settings for the approval step of checkout.
///
/// Unset fields are left out of the payload entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ExperienceContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 127, message = "Brand name can not exceed 127 characters"))]
    brand_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 10, message = "Locale must be a BCP 47 tag such as en-US"))]
    locale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_preference: Option<ShippingPreference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    landing_page: Option<LandingPage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    user_action: Option<UserAction>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Return URL must be an absolute URL"))]
    return_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Cancel URL must be an absolute URL"))]
    cancel_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method_preference: Option<PaymentMethod>,
}

impl Default for ExperienceContext {
    fn default() -> Self {
        Self {
            brand_name: None,
            locale: Some(DEFAULT_LOCALE.to_string()),
            shipping_preference: None,
            landing_page: None,
            user_action: None,
            return_url: None,
            cancel_url: None,
            payment_method_preference: Some(PaymentMethod::default()),
        }
    }
}

impl ExperienceContext {
    /// Locale `en-US` and immediate payment required; everything else unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ExperienceContextBuilder {
        ExperienceContextBuilder::default()
    }

    /// Seeds a context from the merchant defaults in `config`.
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self {
            brand_name: config.brand_name.clone().and_then(non_empty),
            locale: non_empty(config.locale.clone()),
            shipping_preference: config.shipping_preference,
            landing_page: config.landing_page,
            user_action: config.user_action,
            return_url: config.return_url.clone().and_then(non_empty),
            cancel_url: config.cancel_url.clone().and_then(non_empty),
            payment_method_preference: Some(config.payment_method_preference),
        }
    }

    pub fn brand_name(&self) -> Option<&str> {
        self.brand_name.as_deref()
    }

    pub fn set_brand_name(&mut self, brand_name: impl Into<String>) {
        self.brand_name = non_empty(brand_name);
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = non_empty(locale);
    }

    pub fn shipping_preference(&self) -> Option<ShippingPreference> {
        self.shipping_preference
    }

    pub fn set_shipping_preference(&mut self, preference: ShippingPreference) {
        self.shipping_preference = Some(preference);
    }

    pub fn set_shipping_preference_str(&mut self, preference: &str) -> Result<(), OrderError> {
        self.shipping_preference = Some(preference.parse()?);
        Ok(())
    }

    pub fn landing_page(&self) -> Option<LandingPage> {
        self.landing_page
    }

    pub fn set_landing_page(&mut self, landing_page: LandingPage) {
        self.landing_page = Some(landing_page);
    }

    pub fn set_landing_page_str(&mut self, landing_page: &str) -> Result<(), OrderError> {
        self.landing_page = Some(landing_page.parse()?);
        Ok(())
    }

    pub fn user_action(&self) -> Option<UserAction> {
        self.user_action
    }

    pub fn set_user_action(&mut self, user_action: UserAction) {
        self.user_action = Some(user_action);
    }

    pub fn set_user_action_str(&mut self, user_action: &str) -> Result<(), OrderError> {
        self.user_action = Some(user_action.parse()?);
        Ok(())
    }

    pub fn return_url(&self) -> Option<&str> {
        self.return_url.as_deref()
    }

    pub fn set_return_url(&mut self, url: impl Into<String>) {
        self.return_url = non_empty(url);
    }

    pub fn cancel_url(&self) -> Option<&str> {
        self.cancel_url.as_deref()
    }

    pub fn set_cancel_url(&mut self, url: impl Into<String>) {
        self.cancel_url = non_empty(url);
    }

    pub fn payment_method_preference(&self) -> Option<PaymentMethod> {
        self.payment_method_preference
    }

    pub fn set_payment_method_preference(&mut self, preference: PaymentMethod) {
        self.payment_method_preference = Some(preference);
    }

    pub fn set_payment_method_preference_str(&mut self, preference: &str) -> Result<(), OrderError> {
        self.payment_method_preference = Some(preference.parse()?);
        Ok(())
    }

    /// Clears a field so that it is omitted from the payload.
    pub fn clear_payment_method_preference(&mut self) {
        self.payment_method_preference = None;
    }

    pub fn clear_locale(&mut self) {
        self.locale = None;
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.user_action.is_none() {
            report.push("Missing experience context user action");
        }
        if self.payment_method_preference.is_none() {
            report.push("Missing experience context payment method preference");
        }
        if self.landing_page.is_none() {
            report.push("Missing experience context landing page");
        }
        if self.shipping_preference.is_none() {
            report.push("Missing experience context shipping preference");
        }
        if self.return_url.is_none() {
            report.push("Missing experience context return URL");
        }
        report.merge(field_findings(self));
        debug!(findings = report.len(), "validated experience context");
        report
    }
}

/// Named-field builder for [`ExperienceContext`].
#[derive(Debug, Clone, Default)]
pub struct ExperienceContextBuilder {
    context: ExperienceContext,
}

impl ExperienceContextBuilder {
    pub fn brand_name(mut self, brand_name: impl Into<String>) -> Self {
        self.context.set_brand_name(brand_name);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.context.set_locale(locale);
        self
    }

    pub fn shipping_preference(mut self, preference: ShippingPreference) -> Self {
        self.context.set_shipping_preference(preference);
        self
    }

    pub fn landing_page(mut self, landing_page: LandingPage) -> Self {
        self.context.set_landing_page(landing_page);
        self
    }

    pub fn user_action(mut self, user_action: UserAction) -> Self {
        self.context.set_user_action(user_action);
        self
    }

    pub fn return_url(mut self, url: impl Into<String>) -> Self {
        self.context.set_return_url(url);
        self
    }

    pub fn cancel_url(mut self, url: impl Into<String>) -> Self {
        self.context.set_cancel_url(url);
        self
    }

    pub fn payment_method_preference(mut self, preference: PaymentMethod) -> Self {
        self.context.set_payment_method_preference(preference);
        self
    }

    pub fn build(self) -> ExperienceContext {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn complete() -> ExperienceContext {
        ExperienceContext::builder()
            .brand_name("Acme")
            .landing_page(LandingPage::Login)
            .shipping_preference(ShippingPreference::NoShipping)
            .user_action(UserAction::PayNow)
            .return_url("https://x/return")
            .cancel_url("https://x/cancel")
            .build()
    }

    #[test]
    fn only_locale_set_serializes_locale_and_required_default() {
        let mut context = ExperienceContext::new();
        context.set_locale("fr-FR");
        assert_eq!(
            serde_json::to_value(&context).unwrap(),
            json!({"locale": "fr-FR", "payment_method_preference": "IMMEDIATE_PAYMENT_REQUIRED"})
        );

        context.clear_payment_method_preference();
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({"locale": "fr-FR"}));
    }

    #[test]
    fn complete_context_serializes_enum_wire_values() {
        assert_eq!(
            serde_json::to_value(complete()).unwrap(),
            json!({
                "brand_name": "Acme",
                "locale": "en-US",
                "shipping_preference": "NO_SHIPPING",
                "landing_page": "LOGIN",
                "user_action": "PAY_NOW",
                "return_url": "https://x/return",
                "cancel_url": "https://x/cancel",
                "payment_method_preference": "IMMEDIATE_PAYMENT_REQUIRED"
            })
        );
        assert!(complete().validate().is_valid());
    }

    #[test]
    fn validate_aggregates_missing_fields() {
        let report = ExperienceContext::new().validate();
        assert_eq!(
            report.findings(),
            [
                "Missing experience context user action",
                "Missing experience context landing page",
                "Missing experience context shipping preference",
                "Missing experience context return URL",
            ]
        );
    }

    #[test]
    fn validate_checks_url_shape_and_brand_length() {
        let mut context = complete();
        context.set_return_url("not-a-url");
        context.set_brand_name("x".repeat(128));
        let report = context.validate();
        assert_eq!(report.len(), 2);
        assert!(report.mentions("Brand name can not exceed 127 characters"));
        assert!(report.mentions("Return URL must be an absolute URL"));
    }

    #[test]
    fn string_setters_fail_with_dedicated_errors() {
        let mut context = complete();
        assert_matches!(
            context.set_payment_method_preference_str("SOMETIMES"),
            Err(OrderError::InvalidPaymentMethodPreference(_))
        );
        assert_matches!(context.set_user_action_str("WAIT"), Err(OrderError::InvalidUserAction(_)));
        assert_matches!(context.set_landing_page_str("HOME"), Err(OrderError::InvalidLandingPage(_)));
        assert_matches!(
            context.set_shipping_preference_str("SOMEWHERE"),
            Err(OrderError::InvalidShippingPreference(_))
        );
        assert_eq!(context, complete());

        context.set_payment_method_preference_str("UNRESTRICTED").unwrap();
        assert_eq!(context.payment_method_preference(), Some(PaymentMethod::Unrestricted));
    }

    #[test]
    fn from_config_copies_merchant_defaults() {
        let mut config = CheckoutConfig::default();
        config.brand_name = Some("Acme".into());
        config.user_action = Some(UserAction::Continue);
        config.return_url = Some("https://shop.example/return".into());

        let context = ExperienceContext::from_config(&config);
        assert_eq!(context.brand_name(), Some("Acme"));
        assert_eq!(context.locale(), Some("en-US"));
        assert_eq!(context.user_action(), Some(UserAction::Continue));
        assert_eq!(context.return_url(), Some("https://shop.example/return"));
        assert_eq!(
            context.payment_method_preference(),
            Some(PaymentMethod::ImmediatePaymentRequired)
        );
    }
}
