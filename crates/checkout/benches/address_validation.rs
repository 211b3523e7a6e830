use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use furima_checkout::{AddressValidator, OrderAddress, PrefectureId};
use furima_core::{ItemId, UserId};

fn complete_address() -> OrderAddress {
    OrderAddress {
        token: "tok_abcdefghij00000000000000000".to_string(),
        postal_code: "123-4567".to_string(),
        prefecture_id: Some(PrefectureId(13)),
        city: "千代田区".to_string(),
        number: "千代田1-1".to_string(),
        building: String::new(),
        phone: "09012345678".to_string(),
        ..OrderAddress::new(ItemId::new(), UserId::new())
    }
}

fn bench_validate(c: &mut Criterion) {
    let validator = AddressValidator::japan();

    let valid = complete_address();
    let mut malformed = complete_address();
    malformed.postal_code = "kkk-kkkk".to_string();
    malformed.phone = "0808888888888".to_string();
    let blank = OrderAddress::new(ItemId::new(), UserId::new());

    let mut group = c.benchmark_group("validate");
    for (name, address) in [("valid", &valid), ("malformed", &malformed), ("blank", &blank)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), address, |b, address| {
            b.iter(|| validator.validate(black_box(address)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
