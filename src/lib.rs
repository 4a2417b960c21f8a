//! Typed builders, validation and JSON serialization for PayPal Orders v2
//! request payloads.
//!
//! Orders are composed bottom-up (item, purchase unit, order) and checked
//! through two channels: fallible mutators return [`OrderError`] right away,
//! while `validate()` collects advisory findings into a [`ValidationReport`].
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod models;
pub mod validation;

pub use config::{init_tracing, load_config, load_config_from, CheckoutConfig, CheckoutConfigError};
pub use errors::OrderError;
pub use models::{
    Address, Amount, AmountBreakdown, Currency, ExperienceContext, Item, ItemCategory,
    LandingPage, Money, Order, OrderIntent, OrderPayload, OrderResponse, OrderStatus,
    PayPalPaymentSource, PaymentMethod, PaymentSource, PurchaseUnit, ShippingDetail,
    ShippingPreference, ShippingType, UserAction,
};
pub use validation::ValidationReport;
