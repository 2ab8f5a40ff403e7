use std::str::FromStr;

use criterion::{Criterion, criterion_group, criterion_main};
use domain::{CatalogItem, Money, Order, OrderBuilder};
use pricing::{DiscountConfig, PricingConfig};
use rust_decimal::Decimal;

fn make_order(lines: usize) -> Order {
    let mut builder = OrderBuilder::new().special("Bench", "Riga", true, None);
    for i in 0..lines {
        let item = CatalogItem::new(
            format!("sku-{i}"),
            "Benchmark item",
            Money::from_cents(199 + i as i64),
        )
        .unwrap();
        builder = builder.add(item, (i % 5 + 1) as u32);
    }
    builder.build().unwrap()
}

fn standard_config() -> PricingConfig {
    PricingConfig::standard(
        Money::from_units(3),
        Money::from_units(4),
        Decimal::from_str("0.20").unwrap(),
        DiscountConfig::ThresholdPercent {
            threshold: Money::from_units(20),
            percent: Decimal::from_str("0.10").unwrap(),
        },
    )
}

fn bench_build_pipeline(c: &mut Criterion) {
    let config = standard_config();

    c.bench_function("pricing/build_pipeline", |b| {
        b.iter(|| config.build().unwrap());
    });
}

fn bench_compute_total(c: &mut Criterion) {
    let pipeline = standard_config().build().unwrap();

    for lines in [1, 10, 100] {
        let order = make_order(lines);
        c.bench_function(&format!("pricing/compute_total_{lines}_lines"), |b| {
            b.iter(|| pipeline.compute_total(std::hint::black_box(&order)));
        });
    }
}

criterion_group!(benches, bench_build_pipeline, bench_compute_total);
criterion_main!(benches);
