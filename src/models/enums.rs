//! Closed value sets used across the Orders payload.
//!
//! Each enum serializes as its wire string (`"PAY_NOW"`, `"PHYSICAL_GOODS"`, ...)
//! and parses from that same string. Parsing an unknown value yields the
//! dedicated [`OrderError`] variant for that concept.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::errors::OrderError;

/// Implements `FromStr` and `TryFrom<&str>` over the wire strings of a
/// strum-derived enum, mapping unknown values to `$err`.
macro_rules! wire_enum_parsing {
    ($ty:ty, $err:path) => {
        impl ::std::str::FromStr for $ty {
            type Err = $crate::errors::OrderError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                <$ty as ::strum::IntoEnumIterator>::iter()
                    .find(|variant| AsRef::<str>::as_ref(variant) == value)
                    .ok_or_else(|| $err(value.to_string()))
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = $crate::errors::OrderError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl $ty {
            /// The string sent to the API for this value.
            pub fn as_str(&self) -> &str {
                AsRef::<str>::as_ref(self)
            }
        }
    };
}

/// Whether payment is captured immediately or authorized for later capture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderIntent {
    #[default]
    Capture,
    Authorize,
}
wire_enum_parsing!(OrderIntent, OrderError::InvalidOrderIntent);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// Goods stored, delivered and used in electronic format.
    #[default]
    DigitalGoods,
    /// A tangible item that can be shipped with proof of delivery.
    PhysicalGoods,
}
wire_enum_parsing!(ItemCategory, OrderError::InvalidItemCategory);

/// How the purchase is fulfilled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingType {
    #[default]
    Shipping,
    PickupInPerson,
    PickupInStore,
    PickupFromPerson,
}
wire_enum_parsing!(ShippingType, OrderError::InvalidShippingType);

/// Which page the payer lands on when approving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LandingPage {
    Login,
    Billing,
    NoPreference,
}
wire_enum_parsing!(LandingPage, OrderError::InvalidLandingPage);

/// Where the shipping address comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingPreference {
    GetFromFile,
    NoShipping,
    SetProvidedAddress,
}
wire_enum_parsing!(ShippingPreference, OrderError::InvalidShippingPreference);

/// Label of the final button on the approval page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    Continue,
    PayNow,
}
wire_enum_parsing!(UserAction, OrderError::InvalidUserAction);

/// Merchant-preferred payment methods.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Unrestricted,
    #[default]
    ImmediatePaymentRequired,
}
wire_enum_parsing!(PaymentMethod, OrderError::InvalidPaymentMethodPreference);

/// Order status reported by the API once the order exists remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Saved,
    Approved,
    Voided,
    Completed,
    PayerActionRequired,
}
