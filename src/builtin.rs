//! Converters installed by [`ConverterRegistry::with_defaults`](crate::ConverterRegistry::with_defaults).

use anyhow::{Context, bail};
use uuid::Uuid;

use crate::converter::{PropertyKey, ValueConverter};
use crate::value::{TargetType, Value};

/// `bool` from the spellings people use in tables: yes/no, y/n, 1/0, true/false.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl ValueConverter for BooleanConverter {
    fn can_convert(&self, _key: &PropertyKey<'_>, target: &TargetType) -> bool {
        target.is::<bool>()
    }

    fn convert(&self, key: &PropertyKey<'_>, _target: &TargetType) -> anyhow::Result<Value> {
        let lowered = key.raw.trim().to_ascii_lowercase();
        let parsed = match lowered.as_str() {
            "true" | "t" | "yes" | "y" | "1" => true,
            "false" | "f" | "no" | "n" | "0" => false,
            _ => bail!("'{}' is not a boolean", key.raw),
        };
        Ok(Value::new(parsed))
    }
}

/// `Uuid`, also accepting the braced `{...}` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidConverter;

impl ValueConverter for GuidConverter {
    fn can_convert(&self, _key: &PropertyKey<'_>, target: &TargetType) -> bool {
        target.is::<Uuid>()
    }

    fn convert(&self, key: &PropertyKey<'_>, _target: &TargetType) -> anyhow::Result<Value> {
        let trimmed = key.raw.trim().trim_matches(|c| matches!(c, '{' | '}'));
        let parsed = Uuid::parse_str(trimmed)
            .with_context(|| format!("'{}' is not a GUID", key.raw))?;
        Ok(Value::new(parsed))
    }
}
