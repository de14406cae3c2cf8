//! Error types for table mapping.
//!
//! [`ConversionError`] is the failure of the invariant fallback coercion,
//! [`MappingError`] wraps any failure while assigning a single property, and
//! [`Error`] is what the set/instance builders and comparisons return.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::table;

pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A raw cell could not be coerced into the requested type.
#[derive(Debug, Error)]
#[error("cannot convert '{value}' to {target}: {reason}")]
pub struct ConversionError {
    pub value: String,
    pub target: &'static str,
    pub reason: String,
    #[source]
    source: Option<BoxError>,
}

impl ConversionError {
    pub fn new(value: &str, target: &'static str, reason: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            target,
            reason: reason.into(),
            source: None,
        }
    }

    pub fn with_source<E>(value: &str, target: &'static str, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            value: value.to_string(),
            target,
            reason: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

/// Why a single property assignment failed.
#[derive(Debug, Error)]
pub enum MappingCause {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("converter failed: {0}")]
    Converter(#[source] anyhow::Error),
    #[error("converter produced {found}, property expects {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("property is read-only and declares no backing storage")]
    NoBackingStorage,
    #[error("type has no property with this name")]
    UnknownProperty,
}

#[derive(Debug, Error)]
#[error("failed to map property '{property}' from value '{value}': {cause}")]
pub struct MappingError {
    pub property: String,
    pub value: String,
    #[source]
    pub cause: MappingCause,
}

impl MappingError {
    pub fn new(property: &str, value: &str, cause: MappingCause) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            cause,
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("row {row} has {found} cell(s) but the table has {expected} header(s)")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// One property whose actual value differs from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub row: Option<usize>,
    pub property: String,
    pub expected: String,
    /// `None` when the property does not exist or cannot be read.
    pub actual: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonFailure {
    pub differences: Vec<Difference>,
}

impl fmt::Display for ComparisonFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_rows = self.differences.iter().any(|d| d.row.is_some());
        let mut headers = Vec::with_capacity(4);
        if with_rows {
            headers.push("Row".to_string());
        }
        headers.extend(["Property", "Expected", "Actual"].map(String::from));
        let rows = self
            .differences
            .iter()
            .map(|d| {
                let mut cells = Vec::with_capacity(4);
                if with_rows {
                    cells.push(d.row.map(|r| r.to_string()).unwrap_or_default());
                }
                cells.push(d.property.clone());
                cells.push(d.expected.clone());
                cells.push(d.actual.clone().unwrap_or_else(|| "<missing>".to_string()));
                cells
            })
            .collect::<Vec<_>>();
        writeln!(
            f,
            "{} propert(ies) differ from the table:",
            self.differences.len()
        )?;
        write!(f, "{}", table::render_table(&headers, &rows))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: MappingError,
    },
    #[error("horizontal table has no row at index {index} ({rows} row(s) present)")]
    MissingRow { index: usize, rows: usize },
    #[error("row {row} has no cell at index {index}")]
    MissingCell { row: usize, index: usize },
    #[error("table has {rows} row(s) but {items} item(s) were supplied")]
    RowCount { rows: usize, items: usize },
    #[error("{0}")]
    Comparison(ComparisonFailure),
    #[error(transparent)]
    Table(#[from] TableError),
}
