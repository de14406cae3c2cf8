use criterion::{Criterion, criterion_group, criterion_main};
use fixture_table::{ConverterRegistry, Fixture, Table, TableMapper};

#[derive(Debug, Default, Fixture)]
#[fixture(rename_all = "PascalCase")]
struct Shipment {
    reference: String,
    weight: f64,
    pieces: u32,
    #[fixture(readonly)]
    fragile: bool,
    delivered: Option<chrono::NaiveDate>,
}

fn generate_shipments(rows: usize) -> Table {
    let mut table = Table::new(["Reference", "Weight", "Pieces", "Fragile", "Delivered", "Notes"]);
    for i in 0..rows {
        let delivered = if i % 4 == 0 {
            String::new()
        } else {
            format!("2024-01-{:02}", (i % 28) + 1)
        };
        table
            .add_row([
                format!("SHP-{i:05}"),
                format!("{}.{}", i % 90, i % 10),
                (i % 12).to_string(),
                if i % 3 == 0 { "yes" } else { "no" }.to_string(),
                delivered,
                "unused".to_string(),
            ])
            .expect("row");
    }
    table
}

fn bench_create_set(c: &mut Criterion) {
    let registry = ConverterRegistry::with_defaults();
    let mapper = TableMapper::new(&registry);
    let table = generate_shipments(1_000);

    c.bench_function("create_set_1000_rows", |b| {
        b.iter(|| {
            let shipments: Vec<Shipment> = mapper.create_set(&table).expect("set");
            assert_eq!(shipments.len(), 1_000);
        })
    });

    let vertical = Table::from_rows(
        ["Property", "Value"],
        [
            ["Reference", "SHP-1"],
            ["Weight", "12.5"],
            ["Pieces", "3"],
            ["Fragile", "true"],
            ["Delivered", "2024-02-01"],
        ],
    )
    .expect("vertical table");
    c.bench_function("create_instance_vertical", |b| {
        b.iter(|| mapper.create_instance::<Shipment>(&vertical).expect("instance"))
    });
}

criterion_group!(benches, bench_create_set);
criterion_main!(benches);
