//! Maps behavior-driven test tables onto strongly-typed fixture objects.
//!
//! ```
//! use fixture_table::{ConverterRegistry, Fixture, Table, TableMapper};
//!
//! #[derive(Debug, Default, Fixture)]
//! #[fixture(rename_all = "PascalCase")]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let registry = ConverterRegistry::with_defaults();
//! let mapper = TableMapper::new(&registry);
//!
//! let table = Table::from_rows(["Property", "Value"], [["Name", "John"], ["Age", "44"]])?;
//! let person: Person = mapper.create_instance(&table)?;
//! assert_eq!(person.name, "John");
//! assert_eq!(person.age, 44);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod builtin;
pub mod coerce;
pub mod compare;
pub mod config;
pub mod converter;
pub mod descriptor;
pub mod error;
pub mod mapper;
pub mod table;
pub mod value;

use std::{env, sync::OnceLock};

use log::LevelFilter;

pub use coerce::Coerce;
pub use config::{MapperConfig, UnknownColumns};
pub use converter::{ConverterRegistry, FnConverter, PropertyKey, ValueConverter};
pub use descriptor::{Descriptor, DescriptorBuilder, Fixture, Property};
pub use error::{
    ComparisonFailure, ConversionError, Difference, Error, MappingCause, MappingError, Result,
    TableError,
};
pub use fixture_table_macros::Fixture;
pub use mapper::TableMapper;
pub use table::{Orientation, Row, Table, detect_orientation};
pub use value::{TargetType, Value};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Installs `env_logger` once. Without `RUST_LOG` this crate logs at `info`.
pub fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("fixture_table", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().is_test(true).try_init();
    });
}
