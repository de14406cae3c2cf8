use std::any::{Any, TypeId, type_name};
use std::fmt;

use crate::coerce::Coerce;
use crate::error::ConversionError;

/// A converted cell value with its concrete type erased.
pub struct Value {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Value {
    pub fn new<V: Any + Send>(value: V) -> Self {
        Self {
            inner: Box::new(value),
            type_name: type_name::<V>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<V: Any>(&self) -> bool {
        self.inner.is::<V>()
    }

    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.inner.downcast_ref::<V>()
    }

    /// Recovers the concrete value, handing `self` back on a type mismatch.
    pub fn downcast<V: Any>(self) -> Result<V, Self> {
        let type_name = self.type_name;
        self.inner
            .downcast::<V>()
            .map(|boxed| *boxed)
            .map_err(|inner| Self { inner, type_name })
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.type_name).finish()
    }
}

/// Declared type of a property: its identity plus the invariant fallback
/// coercion used when no registered converter claims the cell.
#[derive(Clone, Copy)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
    coerce: fn(&str) -> Result<Value, ConversionError>,
}

impl TargetType {
    pub fn of<V: Coerce>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
            coerce: coerce_value::<V>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<V: Any>(&self) -> bool {
        self.id == TypeId::of::<V>()
    }

    pub fn coerce(&self, raw: &str) -> Result<Value, ConversionError> {
        (self.coerce)(raw)
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetType {}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TargetType").field(&self.name).finish()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn coerce_value<V: Coerce>(raw: &str) -> Result<Value, ConversionError> {
    V::coerce(raw).map(Value::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_returns_value_on_mismatch() {
        let value = Value::new(42_i32);
        assert!(value.is::<i32>());
        assert_eq!(value.type_name(), "i32");

        let value = value.downcast::<String>().unwrap_err();
        assert_eq!(value.downcast::<i32>().unwrap(), 42);
    }

    #[test]
    fn target_type_coerces_through_fallback() {
        let target = TargetType::of::<u16>();
        assert!(target.is::<u16>());
        assert!(!target.is::<u32>());
        assert_eq!(target, TargetType::of::<u16>());

        let value = target.coerce("8080").expect("port");
        assert_eq!(value.downcast_ref::<u16>(), Some(&8080));
        assert!(target.coerce("70000").is_err());
    }
}
