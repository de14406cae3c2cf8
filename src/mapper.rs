//! Property assignment: the step every builder runs once per cell.

use std::any::type_name;

use log::{debug, trace};

use crate::config::{MapperConfig, UnknownColumns};
use crate::converter::ConverterRegistry;
use crate::descriptor::Fixture;
use crate::error::{MappingCause, MappingError};
use crate::value::{TargetType, Value};

/// Maps tables onto fixture types using one converter registry.
///
/// The mapper only borrows the registry, so a single registry built at start
/// up can serve any number of mappers, on any number of threads.
#[derive(Debug, Clone)]
pub struct TableMapper<'r> {
    registry: &'r ConverterRegistry,
    config: MapperConfig,
}

impl<'r> TableMapper<'r> {
    pub fn new(registry: &'r ConverterRegistry) -> Self {
        Self {
            registry,
            config: MapperConfig::default(),
        }
    }

    pub fn with_config(registry: &'r ConverterRegistry, config: MapperConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'r ConverterRegistry {
        self.registry
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Converts `raw` into a value of type `target`.
    pub fn convert(
        &self,
        property: &str,
        raw: &str,
        target: &TargetType,
    ) -> Result<Value, MappingCause> {
        self.registry.convert(property, raw, target)
    }

    /// Resolves `property` on `T`, converts `raw` to its declared type and
    /// stores it. Read-only properties are written through their backing
    /// storage. Names with no matching property are skipped unless the
    /// config rejects unknown columns.
    pub fn set_property<T: Fixture>(
        &self,
        instance: &mut T,
        property: &str,
        raw: &str,
    ) -> Result<(), MappingError> {
        let Some(found) = T::descriptor().property(property) else {
            return match self.config.unknown_columns {
                UnknownColumns::Skip => {
                    debug!("Skipping '{property}': no such property on {}", type_name::<T>());
                    Ok(())
                }
                UnknownColumns::Reject => Err(MappingError::new(
                    property,
                    raw,
                    MappingCause::UnknownProperty,
                )),
            };
        };

        trace!("Setting {}.{property} from '{raw}'", type_name::<T>());
        self.convert(property, raw, found.target())
            .and_then(|value| found.assign(instance, value))
            .map_err(|cause| MappingError::new(property, raw, cause))
    }
}
