//! Worksheet schema: how record structs map onto sheet columns.
//!
//! A sheet is a grid of text cells with a header row. Record structs derive
//! [`SheetRow`] (see the `macros` crate) to declare their column layout, and
//! each field type knows how to coerce itself from a cell via [`SheetCell`].

pub mod date_utils;

use arrow::datatypes::Schema;

pub use date_utils::DateFormatConfig;

/// A value that lives in a single worksheet cell
///
/// Decoding never fails: cells that cannot be coerced become the type's
/// empty value.
pub trait SheetCell: Sized {
    /// Coerce a cell's text into the value
    fn from_cell(cell: &str) -> Self;
    /// Render the value as cell text
    fn to_cell(&self) -> String;
}

impl SheetCell for String {
    fn from_cell(cell: &str) -> Self {
        cell.to_string()
    }

    fn to_cell(&self) -> String {
        self.clone()
    }
}

impl SheetCell for Option<u32> {
    /// Accepts integers and integral floats ("41", "41.0"); anything else is missing
    fn from_cell(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }
        if let Ok(value) = cell.parse::<u32>() {
            return Some(value);
        }
        match cell.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => {
                u32::try_from(value as u64).ok()
            }
            _ => {
                log::debug!("Could not coerce cell '{cell}' to an integer");
                None
            }
        }
    }

    fn to_cell(&self) -> String {
        self.map(|value| value.to_string()).unwrap_or_default()
    }
}

/// A record type with a fixed worksheet layout
///
/// Implemented through `#[derive(SheetRow)]`.
pub trait SheetRow: Sized {
    /// Name of the sheet the records live in
    const SHEET_NAME: &'static str;
    /// Column headers in sheet order
    const COLUMNS: &'static [&'static str];
    /// Position of the natural key column
    const KEY_COLUMN: usize;

    /// Natural key of the record
    fn key(&self) -> &str;

    /// Cells in `COLUMNS` order
    fn to_cells(&self) -> Vec<String>;

    /// Build a record from cells in `COLUMNS` order; missing cells are empty
    fn from_cells(cells: &[String]) -> Self;

    /// Arrow schema of the sheet (every column is text)
    fn sheet_schema() -> Schema;

    /// Position in `header` of every column, in `COLUMNS` order
    ///
    /// Header names match case-insensitively after trimming; the first
    /// matching header cell wins.
    fn column_positions(header: &[String]) -> Vec<Option<usize>> {
        Self::COLUMNS
            .iter()
            .map(|column| {
                header
                    .iter()
                    .position(|name| name.trim().eq_ignore_ascii_case(column))
            })
            .collect()
    }

    /// Build a record from a row of a sheet whose header may be ordered
    /// differently or carry extra columns
    fn from_record(header: &[String], cells: &[String]) -> Self {
        let ordered: Vec<String> = Self::column_positions(header)
            .into_iter()
            .map(|position| {
                position
                    .and_then(|idx| cells.get(idx))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        Self::from_cells(&ordered)
    }

    /// Header columns this record type expects but `header` lacks
    fn missing_columns(header: &[String]) -> Vec<&'static str> {
        Self::COLUMNS
            .iter()
            .zip(Self::column_positions(header))
            .filter(|(_, position)| position.is_none())
            .map(|(column, _)| *column)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_cell_coercion() {
        assert_eq!(<Option<u32>>::from_cell("41"), Some(41));
        assert_eq!(<Option<u32>>::from_cell(" 41.0 "), Some(41));
        assert_eq!(<Option<u32>>::from_cell(""), None);
        assert_eq!(<Option<u32>>::from_cell("empat puluh"), None);
        assert_eq!(<Option<u32>>::from_cell("-3"), None);
        assert_eq!(<Option<u32>>::from_cell("41.5"), None);
    }

    #[test]
    fn test_integer_cell_rendering() {
        assert_eq!(Some(7u32).to_cell(), "7");
        assert_eq!(None::<u32>.to_cell(), "");
    }
}
