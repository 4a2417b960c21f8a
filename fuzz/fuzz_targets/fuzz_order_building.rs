#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use paypal_orders::{Amount, ExperienceContext, Item, Order, PurchaseUnit};

#[derive(Debug, Arbitrary)]
struct LineInput {
    name: String,
    value: String,
    currency_code: String,
    quantity: u32,
}

#[derive(Debug, Arbitrary)]
struct OrderInput {
    intent: String,
    total: String,
    lines: Vec<LineInput>,
    user_action: String,
    return_url: String,
}

fuzz_target!(|input: OrderInput| {
    let mut order = Order::default();
    let _ = order.set_intent_str(&input.intent);

    if let Ok(amount) = Amount::of(&input.total, "USD") {
        let mut unit = PurchaseUnit::new(amount);
        for line in input.lines {
            if let Ok(item) = Item::create(line.name, &line.value, &line.currency_code, line.quantity) {
                let _ = unit.add_item(item);
            }
        }
        let _ = order.add_purchase_unit(unit);
    }

    let mut context = ExperienceContext::new();
    let _ = context.set_user_action_str(&input.user_action);
    context.set_return_url(input.return_url);
    let _ = order.set_payment_source(context);

    // Validation never panics, and a structurally complete order always serializes.
    let _ = order.validate();
    if order.has_purchase_unit(0) {
        assert!(order.to_json().is_ok());
    }
});
