#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use paypal_orders::{Amount, Money};

#[derive(Debug, Arbitrary)]
struct MoneyInput {
    value: String,
    currency_code: String,
}

fuzz_target!(|input: MoneyInput| {
    if let Ok(money) = Money::of(&input.value, &input.currency_code) {
        // Accepted values are never negative and re-parse to themselves.
        assert!(!money.amount().is_sign_negative());
        let reparsed = Money::of(&money.value(), money.currency_code()).unwrap();
        assert_eq!(reparsed, money);
    }

    if let Ok(amount) = Amount::of(&input.value, &input.currency_code) {
        let _ = serde_json::to_string(&amount).unwrap();
    }
});
