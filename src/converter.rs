//! Pluggable string-to-value converters.
//!
//! A [`ConverterRegistry`] is an ordered list of [`ValueConverter`] entries.
//! It is built once, before any mapping happens, and then only read; the
//! first entry that claims a cell converts it. Cells nobody claims fall back
//! to the target type's invariant [`Coerce`](crate::Coerce) implementation.

use std::fmt;

use log::trace;

use crate::builtin::{BooleanConverter, GuidConverter};
use crate::error::MappingCause;
use crate::value::{TargetType, Value};

/// The cell being converted: the property it belongs to and its raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyKey<'a> {
    pub name: &'a str,
    pub raw: &'a str,
}

impl<'a> PropertyKey<'a> {
    pub fn new(name: &'a str, raw: &'a str) -> Self {
        Self { name, raw }
    }
}

pub trait ValueConverter: Send + Sync {
    fn can_convert(&self, key: &PropertyKey<'_>, target: &TargetType) -> bool;

    /// Must return a [`Value`] holding exactly the `target` type.
    fn convert(&self, key: &PropertyKey<'_>, target: &TargetType) -> anyhow::Result<Value>;
}

/// A converter assembled from a predicate and a conversion closure.
pub struct FnConverter<P, C> {
    predicate: P,
    convert: C,
}

impl<P, C> FnConverter<P, C>
where
    P: Fn(&PropertyKey<'_>, &TargetType) -> bool + Send + Sync,
    C: Fn(&PropertyKey<'_>, &TargetType) -> anyhow::Result<Value> + Send + Sync,
{
    pub fn new(predicate: P, convert: C) -> Self {
        Self { predicate, convert }
    }
}

impl<P, C> ValueConverter for FnConverter<P, C>
where
    P: Fn(&PropertyKey<'_>, &TargetType) -> bool + Send + Sync,
    C: Fn(&PropertyKey<'_>, &TargetType) -> anyhow::Result<Value> + Send + Sync,
{
    fn can_convert(&self, key: &PropertyKey<'_>, target: &TargetType) -> bool {
        (self.predicate)(key, target)
    }

    fn convert(&self, key: &PropertyKey<'_>, target: &TargetType) -> anyhow::Result<Value> {
        (self.convert)(key, target)
    }
}

#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn ValueConverter>>,
}

impl ConverterRegistry {
    /// An empty registry: every cell goes through the fallback coercion.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in converters, ahead of anything
    /// registered later.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BooleanConverter);
        registry.register(GuidConverter);
        registry
    }

    pub fn register<C>(&mut self, converter: C) -> &mut Self
    where
        C: ValueConverter + 'static,
    {
        self.converters.push(Box::new(converter));
        self
    }

    pub fn register_fn<P, C>(&mut self, predicate: P, convert: C) -> &mut Self
    where
        P: Fn(&PropertyKey<'_>, &TargetType) -> bool + Send + Sync + 'static,
        C: Fn(&PropertyKey<'_>, &TargetType) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.register(FnConverter::new(predicate, convert))
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// First matching converter wins; otherwise the target's fallback coercion.
    pub fn convert(
        &self,
        property: &str,
        raw: &str,
        target: &TargetType,
    ) -> Result<Value, MappingCause> {
        let key = PropertyKey::new(property, raw);
        let Some((position, converter)) = self
            .converters
            .iter()
            .enumerate()
            .find(|(_, c)| c.can_convert(&key, target))
        else {
            trace!("Coercing '{raw}' for '{property}' as {target}");
            return Ok(target.coerce(raw)?);
        };

        trace!("Converter #{position} claimed '{raw}' for '{property}' as {target}");
        let value = converter
            .convert(&key, target)
            .map_err(MappingCause::Converter)?;
        Ok(value)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.converters.len())
            .finish()
    }
}
