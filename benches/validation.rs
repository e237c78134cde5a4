use booking_core::{validate, ValidationPolicy};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evercare_booking::catalog;

fn bench_validation(c: &mut Criterion) {
    let spec = catalog::find("bariatric-surgery").expect("catalog entry");
    let mut filled = spec.empty_draft();
    for field in spec.fields() {
        let value = field
            .kind
            .options()
            .first()
            .map(|option| option.value.clone())
            .unwrap_or_else(|| format!("sample {}", field.key));
        filled.set(&field.key, value);
    }
    let blank = spec.empty_draft();

    c.bench_function("validate_all_fields_filled", |b| {
        b.iter(|| validate(black_box(&filled), spec, ValidationPolicy::AllFields))
    });
    c.bench_function("validate_required_only_blank", |b| {
        b.iter(|| validate(black_box(&blank), spec, ValidationPolicy::RequiredOnly))
    });
    c.bench_function("catalog_lookup", |b| {
        b.iter(|| catalog::find(black_box("paediatric-ophthalmology")))
    });
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
