//! Set and instance builders.
//!
//! [`TableMapper::create_set`] turns every row into one instance, using the
//! headers as property names. [`TableMapper::create_instance`] builds a single
//! instance from either a vertical (`Property | Value`) or a horizontal
//! (one row) table; see [`detect_orientation`](crate::table::detect_orientation).

use std::any::type_name;

use log::debug;

use crate::descriptor::Fixture;
use crate::error::{Error, MappingError, Result};
use crate::mapper::TableMapper;
use crate::table::{Orientation, Table};

impl TableMapper<'_> {
    /// One instance per row, in row order. The first failing row aborts the
    /// rest and is reported with its zero-based index.
    ///
    /// On failure only the error is returned: instances already built for
    /// earlier rows are dropped, not handed back.
    pub fn create_set<T: Fixture>(&self, table: &Table) -> Result<Vec<T>> {
        debug!(
            "Creating {} {} instance(s) from columns {:?}",
            table.row_count(),
            type_name::<T>(),
            table.headers()
        );
        table
            .rows()
            .enumerate()
            .map(|(index, row)| {
                self.populate::<T>(row.entries())
                    .map_err(|source| Error::Row { row: index, source })
            })
            .collect()
    }

    /// A single instance. Vertical tables read the name from the first cell
    /// and the value from the second cell of every row; horizontal tables use
    /// the first row only and fail when there is none.
    pub fn create_instance<T: Fixture>(&self, table: &Table) -> Result<T> {
        let pairs = instance_pairs(table)?;
        Ok(self.populate(pairs)?)
    }

    fn populate<'a, T: Fixture>(
        &self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<T, MappingError> {
        let mut instance = T::default();
        for (property, raw) in pairs {
            self.set_property(&mut instance, property, raw)?;
        }
        Ok(instance)
    }
}

/// `(property, raw value)` pairs describing the single object in `table`.
pub(crate) fn instance_pairs(table: &Table) -> Result<Vec<(&str, &str)>> {
    let orientation = table.orientation();
    debug!("Reading {orientation:?} table with {} row(s)", table.row_count());
    match orientation {
        Orientation::Vertical => table
            .rows()
            .enumerate()
            .map(|(index, row)| match (row.get(0), row.get(1)) {
                (Some(name), Some(value)) => Ok((name, value)),
                (None, _) => Err(Error::MissingCell { row: index, index: 0 }),
                (Some(_), None) => Err(Error::MissingCell { row: index, index: 1 }),
            })
            .collect(),
        Orientation::Horizontal => {
            let row = table.row(0).ok_or(Error::MissingRow {
                index: 0,
                rows: table.row_count(),
            })?;
            Ok(row.entries().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_pairs_use_first_row_only() {
        let table =
            Table::from_rows(["Name", "Age"], [["John", "30"], ["Jane", "25"]]).unwrap();
        assert_eq!(
            instance_pairs(&table).unwrap(),
            vec![("Name", "John"), ("Age", "30")]
        );
    }

    #[test]
    fn vertical_pairs_read_first_two_cells() {
        let table = Table::from_rows(
            ["Value", "Property"],
            [["Name", "John"], ["Age", "44"]],
        )
        .unwrap();
        assert_eq!(
            instance_pairs(&table).unwrap(),
            vec![("Name", "John"), ("Age", "44")]
        );
    }

    #[test]
    fn empty_horizontal_table_is_missing_row() {
        let table = Table::new(["Name", "Age"]);
        let err = instance_pairs(&table).unwrap_err();
        assert!(matches!(err, Error::MissingRow { index: 0, rows: 0 }));
    }

    #[test]
    fn empty_vertical_table_has_no_pairs() {
        let table = Table::new(["Property", "Value"]);
        assert!(instance_pairs(&table).unwrap().is_empty());
    }

    #[test]
    fn single_column_vertical_table_is_missing_cell() {
        let table = Table::from_rows(["Property"], [["Name"]]).unwrap();
        let err = instance_pairs(&table).unwrap_err();
        assert!(matches!(err, Error::MissingCell { row: 0, index: 1 }));
    }
}
