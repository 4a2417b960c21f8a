use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::money::{Currency, Money};
use crate::errors::OrderError;
use crate::validation::ValidationReport;

/// A total with an optional itemized breakdown.
///
/// Serializes as `{currency_code, value, breakdown?}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    money: Money,
    breakdown: Option<AmountBreakdown>,
}

impl Amount {
    pub fn new(money: Money) -> Self {
        Self {
            money,
            breakdown: None,
        }
    }

    /// Builds an amount from a decimal string and an ISO-4217 code.
    pub fn of(value: &str, currency_code: &str) -> Result<Self, OrderError> {
        Money::of(value, currency_code).map(Self::new)
    }

    /// Builds a USD amount.
    pub fn usd(value: &str) -> Result<Self, OrderError> {
        Self::of(value, Currency::Usd.as_str())
    }

    pub fn money(&self) -> &Money {
        &self.money
    }

    pub fn amount(&self) -> Decimal {
        self.money.amount()
    }

    pub fn value(&self) -> String {
        self.money.value()
    }

    pub fn currency(&self) -> Currency {
        self.money.currency()
    }

    pub fn currency_code(&self) -> &str {
        self.money.currency_code()
    }

    pub fn breakdown(&self) -> Option<&AmountBreakdown> {
        self.breakdown.as_ref()
    }

    pub fn breakdown_mut(&mut self) -> Option<&mut AmountBreakdown> {
        self.breakdown.as_mut()
    }

    pub fn has_breakdown(&self) -> bool {
        self.breakdown.is_some()
    }

    /// Attaches `breakdown`, which must be in this amount's currency.
    pub fn set_breakdown(&mut self, breakdown: AmountBreakdown) -> Result<(), OrderError> {
        if breakdown.currency() != self.currency() {
            return Err(OrderError::multi_currency(self.currency(), breakdown.currency()));
        }
        debug!(currency = %self.currency(), "attached amount breakdown");
        self.breakdown = Some(breakdown);
        Ok(())
    }

    pub fn with_breakdown(mut self, breakdown: AmountBreakdown) -> Result<Self, OrderError> {
        self.set_breakdown(breakdown)?;
        Ok(self)
    }

    pub fn clear_breakdown(&mut self) -> Option<AmountBreakdown> {
        self.breakdown.take()
    }

    /// Checks that an attached breakdown adds up to the amount value.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Some(breakdown) = &self.breakdown {
            match breakdown.net_total() {
                Some(total) if total == self.amount() => {}
                Some(total) => report.push(format!(
                    "Amount breakdown total of {} does not equal the amount value of {}",
                    rescaled(total, self.currency()),
                    self.value()
                )),
                None => report.push("Amount breakdown total could not be computed"),
            }
        }
        report
    }
}

impl From<Money> for Amount {
    fn from(money: Money) -> Self {
        Self::new(money)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.breakdown.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Amount", len)?;
        state.serialize_field("currency_code", self.currency_code())?;
        state.serialize_field("value", &self.value())?;
        if let Some(breakdown) = &self.breakdown {
            state.serialize_field("breakdown", breakdown)?;
        }
        state.end()
    }
}

/// Itemized decomposition of an [`Amount`].
///
/// `item_total` is always present; the other components are optional and
/// only serialized when set. All components share one currency and can not be
/// negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountBreakdown {
    item_total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handling: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax_total: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insurance: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_discount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount: Option<Money>,
}

macro_rules! breakdown_component {
    ($field:ident, $has:ident, $set:ident) => {
        pub fn $field(&self) -> Option<&Money> {
            self.$field.as_ref()
        }

        pub fn $has(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $set(&mut self, value: Money) -> Result<(), OrderError> {
            self.ensure_currency(&value)?;
            self.$field = Some(value);
            Ok(())
        }
    };
}

impl AmountBreakdown {
    pub fn new(item_total: Money) -> Self {
        Self {
            item_total,
            shipping: None,
            handling: None,
            tax_total: None,
            insurance: None,
            shipping_discount: None,
            discount: None,
        }
    }

    /// Starts a breakdown whose item total is `value`.
    pub fn of(value: &str, currency_code: &str) -> Result<Self, OrderError> {
        Money::of(value, currency_code).map(Self::new)
    }

    pub fn currency(&self) -> Currency {
        self.item_total.currency()
    }

    pub fn item_total(&self) -> &Money {
        &self.item_total
    }

    pub fn set_item_total(&mut self, value: Money) -> Result<(), OrderError> {
        self.ensure_currency(&value)?;
        self.item_total = value;
        Ok(())
    }

    breakdown_component!(shipping, has_shipping, set_shipping);
    breakdown_component!(handling, has_handling, set_handling);
    breakdown_component!(tax_total, has_tax_total, set_tax_total);
    breakdown_component!(insurance, has_insurance, set_insurance);
    breakdown_component!(shipping_discount, has_shipping_discount, set_shipping_discount);
    breakdown_component!(discount, has_discount, set_discount);

    /// `item_total + tax_total + shipping + handling + insurance
    /// - shipping_discount - discount`, or `None` on overflow.
    pub fn net_total(&self) -> Option<Decimal> {
        let charges = [
            Some(&self.item_total),
            self.tax_total.as_ref(),
            self.shipping.as_ref(),
            self.handling.as_ref(),
            self.insurance.as_ref(),
        ];
        let reductions = [self.shipping_discount.as_ref(), self.discount.as_ref()];

        let charged = sum(charges.into_iter().flatten())?;
        let reduced = sum(reductions.into_iter().flatten())?;
        charged.checked_sub(reduced)
    }

    fn ensure_currency(&self, value: &Money) -> Result<(), OrderError> {
        if value.currency() == self.currency() {
            Ok(())
        } else {
            Err(OrderError::multi_currency(self.currency(), value.currency()))
        }
    }
}

fn sum<'a>(mut values: impl Iterator<Item = &'a Money>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, money| acc.checked_add(money.amount()))
}

fn rescaled(mut value: Decimal, currency: Currency) -> Decimal {
    value.rescale(currency.minor_units());
    value
}
