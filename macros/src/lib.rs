//! Procedural macros for the roster crate
//!
//! This crate generates the worksheet codec for record structs, so the
//! column layout of a sheet is declared once, next to the fields.

use proc_macro::TokenStream;

mod sheet_row;
mod utils;

/// Derive macro for worksheet rows
///
/// Generates an implementation of `crate::schema::SheetRow`: the ordered
/// column headers, the key accessor, the cell encoder/decoder and the Arrow
/// schema of the sheet. Every field type must implement
/// `crate::schema::SheetCell`. Exactly one `String` field is marked `key`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(SheetRow)]
/// #[sheet(name = "employees")]
/// struct Employee {
///     #[column(name = "ID PEGAWAI", key)]
///     identifier: String,
///
///     #[column(name = "USIA")]
///     age: Option<u32>,
/// }
/// ```
#[proc_macro_derive(SheetRow, attributes(sheet, column))]
pub fn derive_sheet_row(input: TokenStream) -> TokenStream {
    sheet_row::process_derive_sheet_row(input)
}
