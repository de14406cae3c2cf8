//! Fixture tables: ordered headers plus rows of string cells.
//!
//! Headers are matched case-insensitively. Every row carries exactly as many
//! cells as there are headers. [`detect_orientation()`] decides whether a
//! table describes one object per row or a single object as key/value rows.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use itertools::Itertools;

use crate::error::TableError;

/// Header that marks a table as vertical (`Property | Value`).
pub const PROPERTY_HEADER: &str = "property";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Each row is a `(property name, value)` pair for a single object.
    Vertical,
    /// Headers are property names, each row is one object.
    Horizontal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from headers and rows, rejecting ragged rows.
    pub fn from_rows<H, S, R, C>(headers: H, rows: R) -> Result<Self, TableError>
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut table = Self::new(headers);
        for row in rows {
            table.add_row(row)?;
        }
        Ok(table)
    }

    pub fn add_row<C>(&mut self, cells: C) -> Result<(), TableError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let cells = cells.into_iter().map(Into::into).collect::<Vec<String>>();
        if cells.len() != self.headers.len() {
            return Err(TableError::RowWidth {
                row: self.rows.len(),
                expected: self.headers.len(),
                found: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            headers: &self.headers,
            cells,
        })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(|cells| Row {
            headers: &self.headers,
            cells,
        })
    }

    /// Position of the first header matching `name`, ignoring case.
    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| header_eq(h, name))
    }

    pub fn contains_header(&self, name: &str) -> bool {
        self.header_index(name).is_some()
    }

    pub fn orientation(&self) -> Orientation {
        detect_orientation(self.headers.as_slice())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_table(&self.headers, &self.rows))
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Cell under the first header matching `header`, ignoring case.
    pub fn get_by_header(&self, header: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| header_eq(h, header))?;
        self.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `(header, cell)` pairs in column order.
    pub fn entries(self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(String::as_str))
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "| {} |", self.cells.iter().join(" | "))
    }
}

/// A table is vertical when any header is `property`, in any column and case.
pub fn detect_orientation<S: AsRef<str>>(headers: &[S]) -> Orientation {
    if headers
        .iter()
        .any(|h| header_eq(h.as_ref(), PROPERTY_HEADER))
    {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

fn header_eq(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

/// Renders rows as a pipe-delimited grid in the form fixture tables are
/// written in, with every column padded to its widest cell.
///
/// Pipes and backslashes in cells are escaped; line breaks and tabs are
/// written as `\n`, `\r` and `\t` so each row stays on one line.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let escaped_headers = headers.iter().map(|h| escape_cell(h)).collect::<Vec<_>>();
    let escaped_rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .take(headers.len())
                .map(|cell| escape_cell(cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut widths = escaped_headers
        .iter()
        .map(|h| display_width(h))
        .collect::<Vec<_>>();
    for row in &escaped_rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut output = String::new();
    for cells in std::iter::once(&escaped_headers).chain(&escaped_rows) {
        let line = widths
            .iter()
            .enumerate()
            .map(|(idx, &width)| {
                let cell = cells.get(idx).map_or("", |cell| &**cell);
                format!("{cell:<width$}")
            })
            .join(" | ");
        let _ = writeln!(output, "| {line} |");
    }
    output
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn escape_cell(value: &str) -> Cow<'_, str> {
    if !value.contains(['|', '\\', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '|' => escaped.push_str("\\|"),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
