//! Decimal money values.
//!
//! [`Money`] pairs a [`rust_decimal::Decimal`] with a [`Currency`]. Values are
//! held at the currency's minor-unit scale so that `"10"` and `"10.00"` both
//! serialize as `"10.00"` for USD. Arithmetic never goes through floating point.

use std::fmt;

use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter};

use crate::errors::OrderError;

/// ISO-4217 currencies accepted by the Orders API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    Aud,
    Brl,
    Cad,
    Cny,
    Czk,
    Dkk,
    Eur,
    Hkd,
    Huf,
    Ils,
    Jpy,
    Myr,
    Mxn,
    Twd,
    Nzd,
    Nok,
    Php,
    Pln,
    Gbp,
    Sgd,
    Sek,
    Chf,
    Thb,
    #[default]
    Usd,
}
wire_enum_parsing!(Currency, OrderError::InvalidCurrency);

impl Currency {
    /// Number of fractional digits of the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }
}

/// An immutable, non-negative amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Parses `value` as a decimal amount in `currency_code`.
    ///
    /// Fails with [`OrderError::InvalidCurrency`] when the code is unknown, the
    /// value is not a plain decimal (digits with an optional fraction), is too
    /// large to carry the currency's minor units, or it carries more fractional digits than the
    /// currency allows; fails with [`OrderError::NegativeAmount`] for values
    /// below zero.
    pub fn of(value: &str, currency_code: &str) -> Result<Self, OrderError> {
        let currency = currency_code.parse::<Currency>()?;
        let amount = Some(value.trim())
            .filter(|raw| is_plain_decimal(raw))
            .and_then(|raw| Decimal::from_str_exact(raw).ok())
            .ok_or_else(|| {
                OrderError::InvalidCurrency(format!("'{}' is not a valid decimal amount", value))
            })?;
        Self::from_decimal(amount, currency)
    }

    pub fn from_decimal(amount: Decimal, currency: Currency) -> Result<Self, OrderError> {
        let mut amount = amount.normalize();
        if amount.is_zero() {
            amount.set_sign_positive(true);
        }
        if amount.is_sign_negative() {
            return Err(OrderError::NegativeAmount(format!("{} {}", amount, currency)));
        }
        if amount.scale() > currency.minor_units() {
            return Err(OrderError::InvalidCurrency(format!(
                "{} allows at most {} decimal places, got {}",
                currency,
                currency.minor_units(),
                amount
            )));
        }
        Self::at_currency_scale(amount, currency).ok_or_else(|| {
            OrderError::InvalidCurrency(format!(
                "{} is too large to carry {} decimal places",
                amount,
                currency.minor_units()
            ))
        })
    }

    pub fn zero(currency: Currency) -> Self {
        let mut amount = Decimal::ZERO;
        amount.rescale(currency.minor_units());
        Self { amount, currency }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn currency_code(&self) -> &str {
        self.currency.as_str()
    }

    /// The amount as sent on the wire, e.g. `"10.00"`.
    pub fn value(&self) -> String {
        self.amount.to_string()
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, OrderError> {
        self.ensure_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| OrderError::AmountOverflow(format!("{} + {}", self, other)))?;
        Self::from_scaled(sum, self.currency)
    }

    /// Subtracts `other`, failing if the result would be negative.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, OrderError> {
        self.ensure_same_currency(other)?;
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| OrderError::AmountOverflow(format!("{} - {}", self, other)))?;
        Self::from_scaled(difference, self.currency)
    }

    pub fn checked_mul(&self, quantity: u32) -> Result<Money, OrderError> {
        let product = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| OrderError::AmountOverflow(format!("{} * {}", self, quantity)))?;
        Self::from_scaled(product, self.currency)
    }

    fn from_scaled(amount: Decimal, currency: Currency) -> Result<Money, OrderError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(OrderError::NegativeAmount(format!("{} {}", amount, currency)));
        }
        let mut amount = amount.round_dp(currency.minor_units());
        amount.set_sign_positive(true);
        Self::at_currency_scale(amount, currency).ok_or_else(|| {
            OrderError::AmountOverflow(format!(
                "{} {} exceeds the representable range",
                amount, currency
            ))
        })
    }

    /// `rescale` falls back to a smaller scale near `Decimal::MAX`; such
    /// values can not be sent with the currency's minor units.
    fn at_currency_scale(mut amount: Decimal, currency: Currency) -> Option<Money> {
        amount.rescale(currency.minor_units());
        (amount.scale() == currency.minor_units()).then_some(Money { amount, currency })
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), OrderError> {
        if self.same_currency(other) {
            Ok(())
        } else {
            Err(OrderError::multi_currency(self.currency, other.currency))
        }
    }
}

/// Digits with an optional fractional part and an optional leading minus.
/// Rejects exponents, `_` separators and a leading `+`.
fn is_plain_decimal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match digits.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(digits),
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Serializes as `{"currency_code": "USD", "value": "10.00"}`.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Money", 2)?;
        state.serialize_field("currency_code", self.currency_code())?;
        state.serialize_field("value", &self.value())?;
        state.end()
    }
}
