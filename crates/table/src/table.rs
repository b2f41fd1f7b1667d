use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, TableError};
use crate::value::Value;

/// Rows shown by the [`fmt::Display`] preview of a table.
const PREVIEW_ROWS: usize = 10;
/// Cells longer than this are cut in the preview.
const PREVIEW_CELL_WIDTH: usize = 24;

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column of `len` nulls.
    pub fn nulls(name: impl Into<String>, len: usize) -> Self {
        Self::new(name, vec![Value::Null; len])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn take(&self, indices: &[Option<usize>]) -> Column {
        let values = indices
            .iter()
            .map(|index| match index {
                Some(i) => self.values[*i].clone(),
                None => Value::Null,
            })
            .collect();

        Column::new(self.name.clone(), values)
    }
}

/// Ordered named columns of equal height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Creates a table, checking that column names are unique and columns have equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut names = HashSet::with_capacity(columns.len());
        let expected = columns.first().map(Column::len).unwrap_or_default();

        for column in &columns {
            if !names.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }

            if column.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    expected,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns })
    }

    /// Table without columns and rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or_default()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Value at `row` of column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name).and_then(|column| column.values.get(row))
    }

    /// Keeps the given columns in the given order. Missing columns are an error.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let columns = names
            .iter()
            .map(|name| {
                self.column(name)
                    .cloned()
                    .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Table::new(columns)
    }

    /// Like [`Table::select`], but a missing column is emitted as a column of nulls.
    pub fn project(&self, names: &[&str]) -> Table {
        let height = self.height();
        let mut seen = HashSet::new();

        let columns = names
            .iter()
            .filter(|name| seen.insert(**name))
            .map(|name| {
                self.column(name)
                    .cloned()
                    .unwrap_or_else(|| Column::nulls(*name, height))
            })
            .collect();

        Table { columns }
    }

    /// Renames columns by `(from, to)` pairs.
    pub fn rename(mut self, renames: &[(&str, &str)]) -> Result<Table> {
        for (from, to) in renames {
            let index = self
                .position(from)
                .ok_or_else(|| TableError::ColumnNotFound(from.to_string()))?;

            if from != to && self.contains(to) {
                return Err(TableError::DuplicateColumn(to.to_string()));
            }

            self.columns[index].name = to.to_string();
        }

        Ok(self)
    }

    /// Appends the columns of `other`. Both tables must have the same height.
    pub fn hstack(self, other: Table) -> Result<Table> {
        if self.width() > 0 && other.width() > 0 && self.height() != other.height() {
            return Err(TableError::HeightMismatch {
                left: self.height(),
                right: other.height(),
            });
        }

        let mut columns = self.columns;
        columns.extend(other.columns);

        Table::new(columns)
    }

    /// Adds a column, replacing an existing one with the same name in place.
    pub fn with_column(mut self, column: Column) -> Result<Table> {
        if self.width() > 0 && column.len() != self.height() {
            let found = column.len();
            return Err(TableError::LengthMismatch {
                column: column.name,
                expected: self.height(),
                found,
            });
        }

        match self.position(&column.name) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }

        Ok(self)
    }

    /// Applies `f` to every value of column `name`.
    pub fn map_column<F>(mut self, name: &str, f: F) -> Result<Table>
    where
        F: FnMut(Value) -> Value,
    {
        let index = self
            .position(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))?;

        let column = &mut self.columns[index];
        column.values = std::mem::take(&mut column.values)
            .into_iter()
            .map(f)
            .collect();

        Ok(self)
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                Column::new(
                    column.name.clone(),
                    column.values.iter().take(n).cloned().collect(),
                )
            })
            .collect();

        Table { columns }
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

fn preview_cell(value: &Value) -> String {
    let text = value.to_string();

    if text.chars().count() <= PREVIEW_CELL_WIDTH {
        return text;
    }

    let cut: String = text.chars().take(PREVIEW_CELL_WIDTH - 1).collect();
    format!("{cut}…")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "shape: ({}, {})", self.height(), self.width())?;

        if self.width() == 0 {
            return Ok(());
        }

        let rows = self.height().min(PREVIEW_ROWS);
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|column| column.values[..rows].iter().map(preview_cell).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(column, cells)| {
                cells
                    .iter()
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.name.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:width$}", column.name, width = width))
            .collect();
        writeln!(f, "| {} |", header.join(" | "))?;

        for row in 0..rows {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cells, width)| format!("{:width$}", cells[row], width = width))
                .collect();
            writeln!(f, "| {} |", line.join(" | "))?;
        }

        if self.height() > rows {
            writeln!(f, "… {} more rows", self.height() - rows)?;
        }

        Ok(())
    }
}
