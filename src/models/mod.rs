// Domain enums come first: `wire_enum_parsing!` is used by the modules below.
#[macro_use]
pub mod enums;

pub mod address;
pub mod amount;
pub mod experience_context;
pub mod item;
pub mod money;
pub mod order;
pub mod payment_source;
pub mod purchase_unit;
pub mod response;
pub mod shipping;

pub use address::Address;
pub use amount::{Amount, AmountBreakdown};
pub use enums::{
    ItemCategory, LandingPage, OrderIntent, OrderStatus, PaymentMethod, ShippingPreference,
    ShippingType, UserAction,
};
pub use experience_context::{ExperienceContext, ExperienceContextBuilder};
pub use item::Item;
pub use money::{Currency, Money};
pub use order::{Order, OrderPayload, MAX_PURCHASE_UNITS};
pub use payment_source::{PayPalPaymentSource, PaymentSource};
pub use purchase_unit::PurchaseUnit;
pub use response::{LinkDescription, OrderResponse};
pub use shipping::{ShippingDetail, ShippingName};

/// Trimmed-empty strings are treated as unset.
pub(crate) fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
