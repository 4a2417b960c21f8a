use serde::Serialize;
use tracing::debug;

use super::amount::Amount;
use super::enums::ItemCategory;
use super::money::{Currency, Money};
use super::non_empty;
use crate::errors::OrderError;
use crate::validation::ValidationReport;

/// A purchasable line within a purchase unit.
///
/// `name`, `unit_amount` and `quantity` are always serialized; every other
/// field only when it has been set to a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    name: String,
    unit_amount: Amount,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<ItemCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax: Option<Money>,
}

impl Item {
    pub fn new(name: impl Into<String>, unit_amount: Amount, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_amount,
            quantity,
            description: None,
            sku: None,
            url: None,
            image_url: None,
            category: None,
            tax: None,
        }
    }

    /// Builds an item from a raw decimal value and currency code.
    pub fn create(
        name: impl Into<String>,
        value: &str,
        currency_code: &str,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        let unit_amount = Amount::of(value, currency_code)?;
        Ok(Self::new(name, unit_amount, quantity))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn unit_amount(&self) -> &Amount {
        &self.unit_amount
    }

    /// Replaces the unit amount. An existing tax must stay in the same currency.
    pub fn set_unit_amount(&mut self, unit_amount: Amount) -> Result<(), OrderError> {
        if let Some(tax) = &self.tax {
            if tax.currency() != unit_amount.currency() {
                return Err(OrderError::multi_currency(unit_amount.currency(), tax.currency()));
            }
        }
        self.unit_amount = unit_amount;
        Ok(())
    }

    pub fn currency(&self) -> Currency {
        self.unit_amount.currency()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = non_empty(description);
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.sku = non_empty(sku);
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = non_empty(url);
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn set_image_url(&mut self, image_url: impl Into<String>) {
        self.image_url = non_empty(image_url);
    }

    /// Category of the item; digital goods unless set otherwise.
    pub fn category(&self) -> ItemCategory {
        self.category.unwrap_or_default()
    }

    pub fn set_category(&mut self, category: ItemCategory) {
        self.category = Some(category);
    }

    /// Parses and sets a category from its wire string.
    pub fn set_category_str(&mut self, category: &str) -> Result<(), OrderError> {
        self.category = Some(category.parse()?);
        Ok(())
    }

    pub fn tax(&self) -> Option<&Money> {
        self.tax.as_ref()
    }

    /// Sets the per-unit tax, which must be in the unit amount's currency.
    pub fn set_tax(&mut self, tax: Money) -> Result<(), OrderError> {
        if tax.currency() != self.currency() {
            return Err(OrderError::multi_currency(self.currency(), tax.currency()));
        }
        self.tax = Some(tax);
        Ok(())
    }

    /// `unit_amount * quantity`.
    pub fn line_total(&self) -> Result<Money, OrderError> {
        self.unit_amount.money().checked_mul(self.quantity)
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.name.trim().is_empty() {
            report.push("Item requires a name");
        }
        if self.quantity == 0 {
            report.push("Item requires a quantity");
        }
        if !report.is_valid() {
            debug!(item = %self.name, findings = report.len(), "item failed validation");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn create_builds_unit_amount() {
        let item = Item::create("Widget", "10.00", "USD", 2).unwrap();
        assert_eq!(item.name(), "Widget");
        assert_eq!(item.unit_amount().value(), "10.00");
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.category(), ItemCategory::DigitalGoods);
        assert_eq!(item.line_total().unwrap().value(), "20.00");
    }

    #[test]
    fn create_propagates_currency_errors() {
        assert_matches!(Item::create("Widget", "ten", "USD", 1), Err(OrderError::InvalidCurrency(_)));
    }

    #[test]
    fn minimal_item_serializes_required_fields_only() {
        let item = Item::create("Widget", "10.00", "USD", 1).unwrap();
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "name": "Widget",
                "unit_amount": {"currency_code": "USD", "value": "10.00"},
                "quantity": 1
            })
        );
    }

    #[test]
    fn optional_fields_serialize_by_type() {
        let mut item = Item::create("Poster", "4.50", "EUR", 3).unwrap();
        item.set_description("A3 print");
        item.set_sku("PST-01");
        item.set_url("https://shop.example/poster");
        item.set_image_url("");
        item.set_category(ItemCategory::PhysicalGoods);
        item.set_tax(Money::of("0.45", "EUR").unwrap()).unwrap();

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "name": "Poster",
                "unit_amount": {"currency_code": "EUR", "value": "4.50"},
                "quantity": 3,
                "description": "A3 print",
                "sku": "PST-01",
                "url": "https://shop.example/poster",
                "category": "PHYSICAL_GOODS",
                "tax": {"currency_code": "EUR", "value": "0.45"}
            })
        );
    }

    #[test]
    fn invalid_category_string_is_rejected() {
        let mut item = Item::create("Widget", "1.00", "USD", 1).unwrap();
        assert_matches!(item.set_category_str("SERVICES"), Err(OrderError::InvalidItemCategory(_)));
        assert!(item.set_category_str("PHYSICAL_GOODS").is_ok());
        assert_eq!(item.category(), ItemCategory::PhysicalGoods);
    }

    #[test]
    fn tax_currency_must_match() {
        let mut item = Item::create("Widget", "1.00", "USD", 1).unwrap();
        let tax = Money::of("0.10", "CAD").unwrap();
        assert_matches!(item.set_tax(tax), Err(OrderError::MultiCurrencyOrder { .. }));
        assert!(item.tax().is_none());
    }

    #[test]
    fn validate_reports_missing_name_and_quantity() {
        let item = Item::create("  ", "1.00", "USD", 0).unwrap();
        let report = item.validate();
        assert_eq!(
            report.findings(),
            ["Item requires a name", "Item requires a quantity"]
        );
    }

    #[test]
    fn valid_item_has_empty_report() {
        let item = Item::create("Widget", "1.00", "USD", 1).unwrap();
        assert!(item.validate().is_valid());
    }
}
