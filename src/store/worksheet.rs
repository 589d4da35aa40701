//! In-memory worksheet grid
//!
//! A worksheet is a header row plus data rows of text cells, exactly as a
//! spreadsheet tab holds them. Record columns are located by header name,
//! so a sheet may order them differently or carry extra columns. Row
//! operations find the key in the record's key column and overwrite only
//! the record's cells, leaving every other column untouched.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::{Result, RosterError};
use crate::schema::SheetRow;

/// Header row plus data rows of a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Worksheet {
    /// Empty worksheet laid out for record type `E`
    #[must_use]
    pub fn for_records<E: SheetRow>() -> Self {
        Self {
            header: E::COLUMNS.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Worksheet from raw grid content
    #[must_use]
    pub fn from_grid(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Header row
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first data row whose key column equals `key`
    ///
    /// Duplicate keys are not resolved; the first row wins. A sheet without
    /// the key column matches nothing.
    #[must_use]
    pub fn find_row<E: SheetRow>(&self, key: &str) -> Option<usize> {
        let column = E::column_positions(&self.header)
            .get(E::KEY_COLUMN)
            .copied()
            .flatten()?;
        self.rows
            .iter()
            .position(|row| row.get(column).is_some_and(|cell| cell == key))
    }

    /// Decode every non-blank data row into a record
    #[must_use]
    pub fn records<E: SheetRow>(&self) -> Vec<E> {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| E::from_record(&self.header, row))
            .collect()
    }

    /// Append a record at the end of the sheet
    pub fn append_record<E: SheetRow>(&mut self, record: &E) {
        let positions = self.record_positions::<E>();
        let mut row = vec![String::new(); self.header.len()];
        for (position, cell) in positions.into_iter().zip(record.to_cells()) {
            row[position] = cell;
        }
        self.rows.push(row);
    }

    /// Overwrite the record cells of the first row keyed `key`
    ///
    /// Returns `false` if no row matches.
    pub fn update_record<E: SheetRow>(&mut self, key: &str, record: &E) -> bool {
        let Some(idx) = self.find_row::<E>(key) else {
            return false;
        };
        let positions = self.record_positions::<E>();
        let row = &mut self.rows[idx];
        if row.len() < self.header.len() {
            row.resize(self.header.len(), String::new());
        }
        for (position, cell) in positions.into_iter().zip(record.to_cells()) {
            row[position] = cell;
        }
        true
    }

    /// Remove the first row keyed `key`
    ///
    /// Returns `false` if no row matches.
    pub fn delete_record<E: SheetRow>(&mut self, key: &str) -> bool {
        match self.find_row::<E>(key) {
            Some(idx) => {
                self.rows.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Header position of every record column, adding missing columns to
    /// the right of the header
    fn record_positions<E: SheetRow>(&mut self) -> Vec<usize> {
        if self.header.is_empty() {
            self.header = E::COLUMNS.iter().map(ToString::to_string).collect();
        }
        E::column_positions(&self.header)
            .into_iter()
            .zip(E::COLUMNS)
            .map(|(position, column)| {
                position.unwrap_or_else(|| {
                    self.header.push((*column).to_string());
                    self.header.len() - 1
                })
            })
            .collect()
    }

    /// Check the header carries every column of record type `E`
    pub fn validate_header<E: SheetRow>(&self) -> Result<()> {
        let missing = E::missing_columns(&self.header);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RosterError::schema(format!(
                "sheet '{}' is missing columns: {}",
                E::SHEET_NAME,
                missing.join(", ")
            )))
        }
    }

    /// Build a worksheet from record batches, casting every column to text
    pub fn from_batches(schema: &Schema, batches: &[RecordBatch]) -> Result<Self> {
        let header: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
        let mut rows = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());

        for batch in batches {
            let columns = batch
                .columns()
                .iter()
                .map(|column| cast(column, &DataType::Utf8))
                .collect::<std::result::Result<Vec<ArrayRef>, _>>()?;
            let strings = columns
                .iter()
                .map(|column| {
                    column
                        .as_any()
                        .downcast_ref::<StringArray>()
                        .ok_or_else(|| RosterError::schema("sheet column is not text after cast"))
                })
                .collect::<Result<Vec<&StringArray>>>()?;

            for row in 0..batch.num_rows() {
                rows.push(
                    strings
                        .iter()
                        .map(|array| {
                            if array.is_null(row) {
                                String::new()
                            } else {
                                array.value(row).to_string()
                            }
                        })
                        .collect(),
                );
            }
        }

        Ok(Self { header, rows })
    }

    /// Encode the worksheet as a single all-text record batch
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        if self.header.is_empty() {
            return Err(RosterError::schema("cannot encode a worksheet without a header"));
        }
        let fields: Vec<Field> = self
            .header
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, false))
            .collect();
        let columns: Vec<ArrayRef> = (0..self.header.len())
            .map(|col| {
                Arc::new(StringArray::from_iter_values(
                    self.rows
                        .iter()
                        .map(|row| row.get(col).map_or("", String::as_str)),
                )) as ArrayRef
            })
            .collect();
        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }
}
