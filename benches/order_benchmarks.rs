use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paypal_orders::{
    Amount, ExperienceContext, Item, LandingPage, Order, OrderIntent, PurchaseUnit,
    ShippingPreference, UserAction,
};

fn build_order(items: u32) -> Order {
    let total = format!("{}.00", items * 3);
    let mut unit = PurchaseUnit::new(Amount::usd(&total).unwrap());
    for i in 0..items {
        unit.add_item(Item::create(format!("Item {}", i), "1.50", "USD", 2).unwrap())
            .unwrap();
    }

    let context = ExperienceContext::builder()
        .return_url("https://shop.example/return")
        .user_action(UserAction::PayNow)
        .landing_page(LandingPage::Login)
        .shipping_preference(ShippingPreference::GetFromFile)
        .build();

    Order::new(OrderIntent::Capture)
        .with_purchase_unit(unit)
        .unwrap()
        .with_payment_source(context)
        .unwrap()
}

// Build, validate and serialize orders of growing size
fn order_pipeline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_pipeline");

    for size in [1u32, 5, 20, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let order = build_order(black_box(size));
                let report = order.validate();
                let body = order.to_json_string().unwrap();
                black_box((report, body))
            });
        });
    }

    group.finish();
}

fn validation_benchmark(c: &mut Criterion) {
    let order = build_order(50);
    c.bench_function("validate_50_items", |b| b.iter(|| black_box(&order).validate()));
}

fn amount_parsing_benchmark(c: &mut Criterion) {
    c.bench_function("amount_of", |b| {
        b.iter(|| Amount::of(black_box("12345.67"), black_box("EUR")))
    });
}

criterion_group!(
    benches,
    order_pipeline_benchmark,
    validation_benchmark,
    amount_parsing_benchmark
);
criterion_main!(benches);
