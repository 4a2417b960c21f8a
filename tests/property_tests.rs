//! Property-based tests for money handling, item reconciliation and the
//! purchase unit cap.

use paypal_orders::{
    Amount, Currency, ExperienceContext, Item, Order, OrderError, OrderIntent, PurchaseUnit,
};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::iter().collect::<Vec<_>>())
}

/// A value written with exactly the currency's minor units.
fn value_strategy(currency: Currency) -> impl Strategy<Value = String> {
    (0u64..10_000_000, 0u32..100).prop_map(move |(units, cents)| match currency.minor_units() {
        0 => units.to_string(),
        _ => format!("{}.{:02}", units, cents),
    })
}

fn currency_and_value() -> impl Strategy<Value = (Currency, String)> {
    currency_strategy().prop_flat_map(|currency| (Just(currency), value_strategy(currency)))
}

fn price_strategy() -> impl Strategy<Value = String> {
    (0u64..100_000, 0u8..100).prop_map(|(dollars, cents)| format!("{}.{:02}", dollars, cents))
}

fn lines_strategy() -> impl Strategy<Value = Vec<(String, u32)>> {
    prop::collection::vec((price_strategy(), 1u32..50), 1..8)
}

fn unit_with_lines(total: &str, lines: &[(String, u32)]) -> PurchaseUnit {
    let mut unit = PurchaseUnit::new(Amount::usd(total).unwrap());
    for (index, (price, quantity)) in lines.iter().enumerate() {
        unit.add_item(Item::create(format!("Item {}", index), price, "USD", *quantity).unwrap())
            .unwrap();
    }
    unit
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn amount_value_round_trips((currency, value) in currency_and_value()) {
        let amount = Amount::of(&value, currency.as_str()).unwrap();
        let body = serde_json::to_value(&amount).unwrap();
        prop_assert_eq!(body["value"].as_str(), Some(value.as_str()));
        prop_assert_eq!(body["currency_code"].as_str(), Some(currency.as_str()));
    }

    #[test]
    fn foreign_currency_items_never_mutate_unit(
        currency in currency_strategy().prop_filter("non-USD", |c| *c != Currency::Usd),
        existing in 0usize..4,
    ) {
        let mut unit = PurchaseUnit::new(Amount::usd("1.00").unwrap());
        for _ in 0..existing {
            unit.add_item(Item::create("Kept", "1.00", "USD", 1).unwrap()).unwrap();
        }
        let before = unit.clone();

        let item = Item::create("Foreign", "1", currency.as_str(), 1).unwrap();
        let result = unit.add_item(item);

        let is_multi_currency = matches!(result, Err(OrderError::MultiCurrencyOrder { .. }));
        prop_assert!(is_multi_currency);
        prop_assert_eq!(unit, before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn matching_totals_have_no_reconciliation_finding(lines in lines_strategy()) {
        let probe = unit_with_lines("0.00", &lines);
        let total = probe.total_items_amount().unwrap().value();

        let unit = unit_with_lines(&total, &lines);
        prop_assert!(unit.validate().is_valid(), "unexpected findings: {}", unit.validate());
    }

    #[test]
    fn unequal_totals_have_exactly_one_reconciliation_finding(
        lines in lines_strategy(),
        offset_cents in 1u64..10_000,
    ) {
        let probe = unit_with_lines("0.00", &lines);
        let total = probe.total_items_amount().unwrap();
        let declared = format!(
            "{}",
            total.amount() + rust_decimal::Decimal::new(offset_cents as i64, 2)
        );

        let unit = unit_with_lines(&declared, &lines);
        let report = unit.validate();
        prop_assert_eq!(report.len(), 1);
        let finding = &report.findings()[0];
        prop_assert!(finding.contains(&total.value()));
        prop_assert!(finding.contains(&unit.amount().value()));
    }

    #[test]
    fn second_purchase_unit_is_always_rejected(first in price_strategy(), second in price_strategy()) {
        let mut order = Order::new(OrderIntent::Capture);
        order.add_purchase_unit(PurchaseUnit::new(Amount::usd(&first).unwrap())).unwrap();

        let result = order.add_purchase_unit(PurchaseUnit::new(Amount::usd(&second).unwrap()));
        let is_invalid_order = matches!(result, Err(OrderError::InvalidOrder(_)));
        prop_assert!(is_invalid_order);
        prop_assert_eq!(order.purchase_units().len(), 1);
        prop_assert_eq!(order.purchase_units()[0].amount().value(), first);
    }

    #[test]
    fn locale_only_context_has_no_empty_keys(locale in "[a-z]{2}-[A-Z]{2}") {
        let mut context = ExperienceContext::new();
        context.set_locale(locale.clone());
        context.clear_payment_method_preference();

        let body = serde_json::to_value(&context).unwrap();
        let object = body.as_object().unwrap();
        prop_assert_eq!(object.len(), 1);
        prop_assert_eq!(object["locale"].as_str(), Some(locale.as_str()));
    }
}
