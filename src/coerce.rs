//! Invariant fallback coercion from raw cell text to typed values.
//!
//! This is the last step of value conversion, used when no registered
//! converter claims a cell. Parsing never depends on the host locale: numbers
//! use a decimal point, dates are ISO or US invariant (`month/day/year`).
//! Surrounding whitespace is ignored for every type except `String`.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::ConversionError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Types that can be produced from a table cell without a registered converter.
///
/// `Option<T>` maps a blank or whitespace-only cell to `None` for every `T`,
/// so an `Option<String>` property never receives `Some("")`.
pub trait Coerce: Sized + Send + 'static {
    fn coerce(raw: &str) -> Result<Self, ConversionError>;
}

/// Implements [`Coerce`] through `FromStr` for the listed types.
///
/// The `FromStr::Err` type must implement `Display`.
#[macro_export]
macro_rules! coerce_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Coerce for $ty {
                fn coerce(raw: &str) -> ::std::result::Result<Self, $crate::ConversionError> {
                    <$ty as ::std::str::FromStr>::from_str(raw.trim()).map_err(|err| {
                        $crate::ConversionError::new(
                            raw,
                            ::std::any::type_name::<$ty>(),
                            err.to_string(),
                        )
                    })
                }
            }
        )+
    };
}

macro_rules! coerce_parsed {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Coerce for $ty {
                fn coerce(raw: &str) -> Result<Self, ConversionError> {
                    parse_trimmed::<$ty>(raw)
                }
            }
        )+
    };
}

coerce_parsed!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, Decimal
);

fn parse_trimmed<T>(raw: &str) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| ConversionError::with_source(raw, std::any::type_name::<T>(), err))
}

impl Coerce for String {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_string())
    }
}

impl Coerce for char {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(ConversionError::new(
                raw,
                "char",
                "expected exactly one character",
            )),
        }
    }
}

impl Coerce for bool {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::new(raw, "bool", "expected 'true' or 'false'"))
        }
    }
}

impl Coerce for Uuid {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        Uuid::parse_str(raw.trim()).map_err(|err| ConversionError::with_source(raw, "Uuid", err))
    }
}

impl Coerce for NaiveDate {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        parse_naive_date(raw)
    }
}

impl Coerce for NaiveDateTime {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        parse_naive_datetime(raw)
    }
}

impl Coerce for NaiveTime {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        parse_naive_time(raw)
    }
}

/// Blank cells become `None`, including for `Option<String>`.
impl<T: Coerce> Coerce for Option<T> {
    fn coerce(raw: &str) -> Result<Self, ConversionError> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            T::coerce(raw).map(Some)
        }
    }
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate, ConversionError> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ConversionError::new(value, "NaiveDate", "unrecognized date format"))
}

/// A date with no time part is read as midnight.
pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime, ConversionError> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            parse_naive_date(trimmed)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| {
            ConversionError::new(value, "NaiveDateTime", "unrecognized datetime format")
        })
}

pub fn parse_naive_time(value: &str) -> Result<NaiveTime, ConversionError> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ConversionError::new(value, "NaiveTime", "unrecognized time format"))
}
