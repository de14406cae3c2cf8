#![allow(dead_code)]

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use fixture_table::{Descriptor, Fixture, Table, coerce_from_str};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Default, Clone, PartialEq, Fixture)]
#[fixture(rename_all = "PascalCase")]
pub struct Person {
    pub name: String,
    pub age: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[default]
    Pending,
    Shipped,
    Cancelled,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "shipped" => Ok(Status::Shipped),
            "cancelled" => Ok(Status::Cancelled),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

coerce_from_str!(Status);

/// An order whose identity and total cannot be changed through its public API.
#[derive(Debug, Default, Fixture)]
#[fixture(rename_all = "PascalCase")]
pub struct Order {
    #[fixture(readonly)]
    id: Uuid,
    #[fixture(setter = "Self::set_quantity")]
    quantity: u32,
    #[fixture(readonly)]
    total: Decimal,
    #[fixture(name = "Placed")]
    placed_on: Option<NaiveDate>,
    status: Status,
    express: bool,
    #[fixture(skip)]
    pub notes: Vec<String>,
}

impl Order {
    pub const MAX_QUANTITY: u32 = 100;

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.min(Self::MAX_QUANTITY);
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn placed_on(&self) -> Option<NaiveDate> {
        self.placed_on
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_express(&self) -> bool {
        self.express
    }
}

/// Described by hand: a backed read-only reading and a computed property.
#[derive(Debug, Default)]
pub struct Temperature {
    celsius: f64,
}

impl Temperature {
    pub fn celsius(&self) -> f64 {
        self.celsius
    }

    pub fn fahrenheit(&self) -> f64 {
        self.celsius * 9.0 / 5.0 + 32.0
    }
}

impl Fixture for Temperature {
    fn descriptor() -> &'static Descriptor<Self> {
        static DESCRIPTOR: OnceLock<Descriptor<Temperature>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            Descriptor::builder()
                .read_only_backed(
                    "Celsius",
                    |t: &Temperature| &t.celsius,
                    |t: &mut Temperature, v| t.celsius = v,
                )
                .read_only("Fahrenheit", Temperature::fahrenheit)
                .build()
        })
    }
}

/// Builds a table from string slices, panicking on ragged rows.
pub fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_rows(
        headers.iter().copied(),
        rows.iter().map(|row| row.iter().copied()),
    )
    .expect("well-formed table")
}
