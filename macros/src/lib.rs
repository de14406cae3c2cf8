//! Procedural macros for the fixture-table crate.
//!
//! `#[derive(Fixture)]` generates the property descriptor a struct needs to be
//! populated from, and compared against, a fixture table.

use proc_macro::TokenStream;

mod fixture;

/// Derive macro implementing `fixture_table::Fixture`.
///
/// Every named field becomes a property. The struct must implement `Default`
/// and every field type must implement `Coerce`, `PartialEq` and `Debug`.
///
/// # Attributes
///
/// - `#[fixture(rename_all = "PascalCase")]` on the struct renames every
///   property (`PascalCase`, `camelCase`, `snake_case`, `kebab-case`,
///   `SCREAMING_SNAKE_CASE`, `Title Case`).
/// - `#[fixture(name = "First Name")]` names one property explicitly.
/// - `#[fixture(readonly)]` marks a read-only property; tables write its
///   backing storage directly.
/// - `#[fixture(setter = "Self::set_age")]` routes writes through a
///   `fn(&mut Self, V)` instead of assigning the field.
/// - `#[fixture(skip)]` leaves a field out of the descriptor.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Default, Fixture)]
/// #[fixture(rename_all = "PascalCase")]
/// struct Invoice {
///     number: String,
///     #[fixture(readonly)]
///     total: rust_decimal::Decimal,
///     #[fixture(name = "Due")]
///     due_date: Option<chrono::NaiveDate>,
/// }
/// ```
#[proc_macro_derive(Fixture, attributes(fixture))]
pub fn derive_fixture(input: TokenStream) -> TokenStream {
    fixture::process_derive_fixture(input)
}
