//! Checks existing instances against a table.
//!
//! Expected cells are converted exactly like they would be when building an
//! instance, then compared with the property's current value. Every
//! difference is collected before failing, so one run shows them all.

use log::debug;

use crate::builder::instance_pairs;
use crate::descriptor::Fixture;
use crate::error::{ComparisonFailure, Difference, Error, MappingError, Result};
use crate::mapper::TableMapper;
use crate::table::Table;

impl TableMapper<'_> {
    /// Compares one instance with a vertical or horizontal table.
    pub fn compare_to_instance<T: Fixture>(&self, table: &Table, instance: &T) -> Result<()> {
        let mut differences = Vec::new();
        for (property, raw) in instance_pairs(table)? {
            if let Some(difference) = self.difference(instance, property, raw)? {
                differences.push(difference);
            }
        }
        into_result(differences)
    }

    /// Compares `items` with the table rows pairwise, in order.
    pub fn compare_to_set<T: Fixture>(&self, table: &Table, items: &[T]) -> Result<()> {
        if table.row_count() != items.len() {
            return Err(Error::RowCount {
                rows: table.row_count(),
                items: items.len(),
            });
        }

        let mut differences = Vec::new();
        for (index, (row, item)) in table.rows().zip(items).enumerate() {
            for (property, raw) in row.entries() {
                let difference = self
                    .difference(item, property, raw)
                    .map_err(|source| Error::Row { row: index, source })?;
                if let Some(mut difference) = difference {
                    difference.row = Some(index);
                    differences.push(difference);
                }
            }
        }
        into_result(differences)
    }

    fn difference<T: Fixture>(
        &self,
        instance: &T,
        property: &str,
        raw: &str,
    ) -> Result<Option<Difference>, MappingError> {
        let unreadable = || Difference {
            row: None,
            property: property.to_string(),
            expected: raw.to_string(),
            actual: None,
        };

        let Some(found) = T::descriptor().property(property) else {
            return Ok(Some(unreadable()));
        };
        let expected = self
            .convert(property, raw, found.target())
            .map_err(|cause| MappingError::new(property, raw, cause))?;

        match found.observe(instance, &expected) {
            None => Ok(Some(unreadable())),
            Some(Ok(observed)) if observed.matches => Ok(None),
            Some(Ok(observed)) => Ok(Some(Difference {
                actual: Some(observed.actual),
                ..unreadable()
            })),
            Some(Err(cause)) => Err(MappingError::new(property, raw, cause)),
        }
    }
}

fn into_result(differences: Vec<Difference>) -> Result<()> {
    if differences.is_empty() {
        return Ok(());
    }
    debug!("Comparison found {} difference(s)", differences.len());
    Err(Error::Comparison(ComparisonFailure { differences }))
}
