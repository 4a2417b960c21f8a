use serde::Serialize;
use tracing::{debug, warn};

use super::amount::Amount;
use super::item::Item;
use super::money::{Currency, Money};
use super::shipping::ShippingDetail;
use crate::errors::OrderError;
use crate::validation::ValidationReport;

/// One payer-to-payee contract: an amount, the items it pays for and,
/// optionally, how they are shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseUnit {
    amount: Amount,
    items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<ShippingDetail>,
}

impl PurchaseUnit {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            items: Vec::new(),
            shipping: None,
        }
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn amount_mut(&mut self) -> &mut Amount {
        &mut self.amount
    }

    pub fn currency(&self) -> Currency {
        self.amount.currency()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Appends `item`; its currency must match the unit amount's currency.
    pub fn add_item(&mut self, item: Item) -> Result<(), OrderError> {
        self.ensure_currency(&item)?;
        debug!(
            item = %item.name(),
            quantity = item.quantity(),
            currency = %item.currency(),
            "added item to purchase unit"
        );
        self.items.push(item);
        Ok(())
    }

    /// Appends all `items`, or none of them if any has a foreign currency.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) -> Result<(), OrderError> {
        let items: Vec<Item> = items.into_iter().collect();
        for item in &items {
            self.ensure_currency(item)?;
        }
        debug!(count = items.len(), "added items to purchase unit");
        self.items.extend(items);
        Ok(())
    }

    pub fn with_item(mut self, item: Item) -> Result<Self, OrderError> {
        self.add_item(item)?;
        Ok(self)
    }

    pub fn shipping(&self) -> Option<&ShippingDetail> {
        self.shipping.as_ref()
    }

    pub fn set_shipping(&mut self, shipping: ShippingDetail) {
        self.shipping = Some(shipping);
    }

    pub fn with_shipping(mut self, shipping: ShippingDetail) -> Self {
        self.set_shipping(shipping);
        self
    }

    /// Sum of `unit_amount * quantity` over all items, in the unit's currency.
    pub fn total_items_amount(&self) -> Result<Amount, OrderError> {
        self.items
            .iter()
            .try_fold(Money::zero(self.currency()), |total, item| {
                total.checked_add(&item.line_total()?)
            })
            .map(Amount::new)
    }

    /// Collects amount, shipping and item findings, then checks that the
    /// items add up to the unit amount.
    pub fn validate(&self) -> ValidationReport {
        let mut report = self.amount.validate();

        if let Some(shipping) = &self.shipping {
            report.merge(shipping.validate());
        }

        if self.items.is_empty() {
            report.push("Purchase unit must have at least one item");
        } else {
            for item in &self.items {
                report.merge(item.validate());
            }
        }

        match self.total_items_amount() {
            Ok(total) if total.amount() == self.amount.amount() => {}
            Ok(total) => report.push(format!(
                "Total Items Amount of {} does not equal the purchaseUnit amount of {}",
                total.value(),
                self.amount.value()
            )),
            Err(err) => report.push(format!("Total Items Amount could not be computed: {}", err)),
        }

        report
    }

    fn ensure_currency(&self, item: &Item) -> Result<(), OrderError> {
        if item.currency() == self.currency() {
            return Ok(());
        }
        warn!(
            item = %item.name(),
            expected = %self.currency(),
            found = %item.currency(),
            "rejected item with foreign currency"
        );
        Err(OrderError::multi_currency(self.currency(), item.currency()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::address::Address;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn unit(value: &str) -> PurchaseUnit {
        PurchaseUnit::new(Amount::usd(value).unwrap())
    }

    fn item(name: &str, value: &str, quantity: u32) -> Item {
        Item::create(name, value, "USD", quantity).unwrap()
    }

    #[test]
    fn rejects_items_in_another_currency_without_mutating() {
        let mut unit = unit("10.00");
        unit.add_item(item("Widget", "10.00", 1)).unwrap();

        let euro = Item::create("Gadget", "5.00", "EUR", 1).unwrap();
        assert_matches!(unit.add_item(euro), Err(OrderError::MultiCurrencyOrder { .. }));
        assert_eq!(unit.items().len(), 1);
    }

    #[test]
    fn add_items_is_all_or_nothing() {
        let mut unit = unit("20.00");
        let result = unit.add_items(vec![
            item("A", "10.00", 1),
            Item::create("B", "10.00", "GBP", 1).unwrap(),
        ]);
        assert_matches!(result, Err(OrderError::MultiCurrencyOrder { .. }));
        assert!(unit.items().is_empty());

        unit.add_items(vec![item("A", "10.00", 1), item("B", "10.00", 1)])
            .unwrap();
        assert_eq!(unit.items().len(), 2);
    }

    #[test]
    fn total_multiplies_by_quantity_exactly() {
        let mut unit = unit("1.00");
        unit.add_item(item("Penny sweets", "0.10", 7)).unwrap();
        unit.add_item(item("Chew", "0.15", 2)).unwrap();
        let total = unit.total_items_amount().unwrap();
        assert_eq!(total.value(), "1.00");
        assert_eq!(total.currency_code(), "USD");
        assert!(unit.validate().is_valid());
    }

    #[test]
    fn reconciliation_error_names_both_values() {
        let unit = unit("10.00").with_item(item("Widget", "5.00", 1)).unwrap();
        let report = unit.validate();
        assert_eq!(
            report.findings(),
            ["Total Items Amount of 5.00 does not equal the purchaseUnit amount of 10.00"]
        );
    }

    #[test]
    fn empty_unit_reports_missing_items_and_mismatch() {
        let report = unit("3.00").validate();
        assert_eq!(
            report.findings(),
            [
                "Purchase unit must have at least one item",
                "Total Items Amount of 0.00 does not equal the purchaseUnit amount of 3.00",
            ]
        );
    }

    #[test]
    fn shipping_and_item_findings_are_merged() {
        let mut unit = unit("0.00").with_shipping(ShippingDetail::default());
        unit.add_item(item("", "0.00", 1)).unwrap();
        let report = unit.validate();
        assert_eq!(
            report.findings(),
            ["Shipping detail requires an address", "Item requires a name"]
        );
    }

    #[test]
    fn serializes_amount_items_and_shipping() {
        let address: Address = [("CountryCode", "US")].into_iter().collect();
        let unit = unit("4.00")
            .with_item(item("Tea", "2.00", 2))
            .unwrap()
            .with_shipping(ShippingDetail::default().with_address(address));

        assert_eq!(
            serde_json::to_value(&unit).unwrap(),
            json!({
                "amount": {"currency_code": "USD", "value": "4.00"},
                "items": [{
                    "name": "Tea",
                    "unit_amount": {"currency_code": "USD", "value": "2.00"},
                    "quantity": 2
                }],
                "shipping": {"type": "SHIPPING", "address": {"country_code": "US"}}
            })
        );
    }
}
