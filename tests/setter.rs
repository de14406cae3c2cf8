mod common;

use common::{Order, Person, Temperature, table};
use fixture_table::{
    ConverterRegistry, Error, MapperConfig, MappingCause, TableMapper, UnknownColumns, Value,
};
use rust_decimal::Decimal;

#[test]
fn unknown_property_is_skipped() {
    let registry = ConverterRegistry::new();
    let mapper = TableMapper::new(&registry);
    let mut person = Person::default();

    mapper
        .set_property(&mut person, "Nickname", "Johnny")
        .expect("skip");
    assert_eq!(person, Person::default());
}

#[test]
fn property_lookup_is_case_sensitive() {
    let registry = ConverterRegistry::new();
    let mapper = TableMapper::new(&registry);
    let mut person = Person::default();

    mapper.set_property(&mut person, "name", "John").expect("skip");
    assert_eq!(person.name, "");
    mapper.set_property(&mut person, "Name", "John").expect("set");
    assert_eq!(person.name, "John");
}

#[test]
fn unknown_property_can_be_rejected() {
    let registry = ConverterRegistry::new();
    let config = MapperConfig::new().with_unknown_columns(UnknownColumns::Reject);
    let mapper = TableMapper::with_config(&registry, config);

    let err = mapper
        .create_instance::<Person>(&table(&["Name", "Nickname"], &[&["John", "Johnny"]]))
        .unwrap_err();
    match err {
        Error::Mapping(mapping) => {
            assert_eq!(mapping.property, "Nickname");
            assert!(matches!(mapping.cause, MappingCause::UnknownProperty));
        }
        other => panic!("expected mapping error, got {other:?}"),
    }
}

#[test]
fn read_only_property_is_written_through_backing_storage() {
    let registry = ConverterRegistry::with_defaults();
    let mapper = TableMapper::new(&registry);
    let mut order = Order::default();

    mapper
        .set_property(&mut order, "Total", "249.50")
        .expect("backing write");
    assert_eq!(order.total(), Decimal::new(24950, 2));

    let mut reading = Temperature::default();
    mapper
        .set_property(&mut reading, "Celsius", "21.5")
        .expect("backing write");
    assert_eq!(reading.celsius(), 21.5);
}

#[test]
fn writable_property_goes_through_its_setter() {
    let registry = ConverterRegistry::with_defaults();
    let mapper = TableMapper::new(&registry);
    let mut order = Order::default();

    mapper
        .set_property(&mut order, "Quantity", "500")
        .expect("setter");
    assert_eq!(order.quantity(), Order::MAX_QUANTITY);
}

#[test]
fn read_only_property_without_backing_storage_fails() {
    let registry = ConverterRegistry::with_defaults();
    let mapper = TableMapper::new(&registry);
    let mut reading = Temperature::default();

    let err = mapper
        .set_property(&mut reading, "Fahrenheit", "98.6")
        .unwrap_err();
    assert_eq!(err.property, "Fahrenheit");
    assert!(matches!(err.cause, MappingCause::NoBackingStorage));
    assert_eq!(reading.celsius(), 0.0);
}

#[test]
fn conversion_runs_before_backing_storage_check() {
    let registry = ConverterRegistry::with_defaults();
    let mapper = TableMapper::new(&registry);
    let mut reading = Temperature::default();

    let err = mapper
        .set_property(&mut reading, "Fahrenheit", "hot")
        .unwrap_err();
    assert!(matches!(err.cause, MappingCause::Conversion(_)));
}

#[test]
fn converter_returning_wrong_type_is_reported() {
    let mut registry = ConverterRegistry::new();
    registry.register_fn(
        |key, _| key.name == "Age",
        |key, _| Ok(Value::new(key.raw.parse::<i64>()?)),
    );
    let mapper = TableMapper::new(&registry);
    let mut person = Person::default();

    let err = mapper.set_property(&mut person, "Age", "30").unwrap_err();
    match err.cause {
        MappingCause::TypeMismatch { expected, found } => {
            assert_eq!(expected, "u32");
            assert_eq!(found, "i64");
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
    assert_eq!(person.age, 0);
}
