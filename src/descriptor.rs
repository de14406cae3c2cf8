//! Per-type property descriptors.
//!
//! A [`Descriptor`] lists, for one fixture type, every property a table may
//! name: its declared type, whether it can be read, and how it is written.
//! Writable properties go through their setter. Read-only properties can only
//! be populated from a table when the type declares a backing writer for them
//! (`read_only_backed`); that writer assigns the storage directly and skips
//! whatever validation the public setter would apply.
//!
//! Descriptors are built once per type, usually by `#[derive(Fixture)]`, and
//! cached for the life of the process.

use std::any::type_name;
use std::fmt::{self, Debug};

use log::debug;

use crate::coerce::Coerce;
use crate::error::MappingCause;
use crate::value::{TargetType, Value};

/// Types a table can be mapped onto.
pub trait Fixture: Default + Sized + 'static {
    fn descriptor() -> &'static Descriptor<Self>;
}

type Writer<T> = Box<dyn Fn(&mut T, Value) -> Result<(), MappingCause> + Send + Sync>;
type Reader<T> = Box<dyn Fn(&T, &Value) -> Result<Observed, MappingCause> + Send + Sync>;

/// Current value of a property checked against an expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Observed {
    pub matches: bool,
    pub actual: String,
}

enum Access<T> {
    Writable(Writer<T>),
    ReadOnly { backing: Option<Writer<T>> },
    WriteOnly(Writer<T>),
}

pub struct Property<T> {
    name: String,
    target: TargetType,
    access: Access<T>,
    reader: Option<Reader<T>>,
}

impl<T> Property<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &TargetType {
        &self.target
    }

    pub fn is_readable(&self) -> bool {
        self.reader.is_some()
    }

    /// Whether the property has a public writer.
    pub fn is_writable(&self) -> bool {
        matches!(self.access, Access::Writable(_) | Access::WriteOnly(_))
    }

    pub fn has_backing_storage(&self) -> bool {
        matches!(self.access, Access::ReadOnly { backing: Some(_) })
    }

    /// Stores an already converted value, through the setter when there is
    /// one and through the backing storage otherwise.
    pub(crate) fn assign(&self, instance: &mut T, value: Value) -> Result<(), MappingCause> {
        match &self.access {
            Access::Writable(writer) | Access::WriteOnly(writer) => writer(instance, value),
            Access::ReadOnly {
                backing: Some(writer),
            } => writer(instance, value),
            Access::ReadOnly { backing: None } => Err(MappingCause::NoBackingStorage),
        }
    }

    pub(crate) fn observe(
        &self,
        instance: &T,
        expected: &Value,
    ) -> Option<Result<Observed, MappingCause>> {
        self.reader.as_ref().map(|read| read(instance, expected))
    }
}

impl<T> Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .field("backing_storage", &self.has_backing_storage())
            .finish()
    }
}

pub struct Descriptor<T> {
    properties: Vec<Property<T>>,
}

impl<T: 'static> Descriptor<T> {
    pub fn builder() -> DescriptorBuilder<T> {
        DescriptorBuilder {
            properties: Vec::new(),
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn property(&self, name: &str) -> Option<&Property<T>> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn properties(&self) -> &[Property<T>] {
        &self.properties
    }
}

impl<T> Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("type", &type_name::<T>())
            .field("properties", &self.properties)
            .finish()
    }
}

pub struct DescriptorBuilder<T> {
    properties: Vec<Property<T>>,
}

impl<T: 'static> DescriptorBuilder<T> {
    /// A readable property with a public setter.
    pub fn field<V, G, S>(self, name: impl Into<String>, get: G, set: S) -> Self
    where
        V: Coerce + PartialEq + Debug,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push(Property {
            name: name.into(),
            target: TargetType::of::<V>(),
            access: Access::Writable(writer(set)),
            reader: Some(borrowed_reader(get)),
        })
    }

    /// A read-only property backed by storage the descriptor may write.
    pub fn read_only_backed<V, G, B>(self, name: impl Into<String>, get: G, backing: B) -> Self
    where
        V: Coerce + PartialEq + Debug,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        B: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push(Property {
            name: name.into(),
            target: TargetType::of::<V>(),
            access: Access::ReadOnly {
                backing: Some(writer(backing)),
            },
            reader: Some(borrowed_reader(get)),
        })
    }

    /// A read-only, computed property. Tables can compare against it but
    /// cannot populate it.
    pub fn read_only<V, G>(self, name: impl Into<String>, get: G) -> Self
    where
        V: Coerce + PartialEq + Debug,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.push(Property {
            name: name.into(),
            target: TargetType::of::<V>(),
            access: Access::ReadOnly { backing: None },
            reader: Some(owned_reader(get)),
        })
    }

    pub fn write_only<V, S>(self, name: impl Into<String>, set: S) -> Self
    where
        V: Coerce,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push(Property {
            name: name.into(),
            target: TargetType::of::<V>(),
            access: Access::WriteOnly(writer(set)),
            reader: None,
        })
    }

    pub fn build(self) -> Descriptor<T> {
        Descriptor {
            properties: self.properties,
        }
    }

    fn push(mut self, property: Property<T>) -> Self {
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|p| p.name == property.name)
        {
            debug!(
                "Replacing property '{}' on {}",
                property.name,
                type_name::<T>()
            );
            *existing = property;
        } else {
            self.properties.push(property);
        }
        self
    }
}

fn writer<T, V, S>(set: S) -> Writer<T>
where
    T: 'static,
    V: Coerce,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    Box::new(move |instance: &mut T, value: Value| {
        let value = downcast::<V>(value)?;
        set(instance, value);
        Ok(())
    })
}

fn borrowed_reader<T, V, G>(get: G) -> Reader<T>
where
    T: 'static,
    V: Coerce + PartialEq + Debug,
    G: Fn(&T) -> &V + Send + Sync + 'static,
{
    Box::new(move |instance: &T, expected: &Value| {
        let actual = get(instance);
        observe(actual, expected)
    })
}

fn owned_reader<T, V, G>(get: G) -> Reader<T>
where
    T: 'static,
    V: Coerce + PartialEq + Debug,
    G: Fn(&T) -> V + Send + Sync + 'static,
{
    Box::new(move |instance: &T, expected: &Value| {
        let actual = get(instance);
        observe(&actual, expected)
    })
}

fn observe<V: PartialEq + Debug + 'static>(
    actual: &V,
    expected: &Value,
) -> Result<Observed, MappingCause> {
    let expected = expected
        .downcast_ref::<V>()
        .ok_or_else(|| MappingCause::TypeMismatch {
            expected: type_name::<V>(),
            found: expected.type_name(),
        })?;
    Ok(Observed {
        matches: actual == expected,
        actual: format!("{actual:?}"),
    })
}

fn downcast<V: 'static>(value: Value) -> Result<V, MappingCause> {
    value
        .downcast::<V>()
        .map_err(|found| MappingCause::TypeMismatch {
            expected: type_name::<V>(),
            found: found.type_name(),
        })
}
