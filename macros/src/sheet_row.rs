//! SheetRow derive macro implementation
//!
//! Turns a struct with `#[column(...)]` annotated fields into a worksheet
//! codec: fixed column order, key lookup, cell conversion and Arrow schema.

use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::utils;

/// Receiver for the struct that derives `SheetRow`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(sheet), supports(struct_named))]
struct SheetRowReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// Sheet name from the #[sheet(name = "...")] attribute
    #[darling(default)]
    name: Option<String>,
    /// The struct data with parsed fields
    data: ast::Data<(), SheetColumnReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(column))]
struct SheetColumnReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// The field type
    ty: syn::Type,
    /// Column header in the sheet
    #[darling(default, rename = "name")]
    column_name: Option<String>,
    /// Marks the natural key column
    #[darling(default)]
    key: bool,
}

/// Process the SheetRow derive macro
pub fn process_derive_sheet_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let receiver = match SheetRowReceiver::from_derive_input(&input) {
        Ok(receiver) => receiver,
        Err(err) => return err.write_errors().into(),
    };

    match generate_sheet_row_impl(&receiver) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

/// Generate the `SheetRow` implementation
fn generate_sheet_row_impl(receiver: &SheetRowReceiver) -> darling::Result<proc_macro2::TokenStream> {
    let struct_name = &receiver.ident;
    let sheet_name = receiver
        .name
        .clone()
        .unwrap_or_else(|| struct_name.to_string());

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let mut idents = Vec::with_capacity(fields.len());
    let mut types = Vec::with_capacity(fields.len());
    let mut column_names = Vec::with_capacity(fields.len());
    let mut nullable = Vec::with_capacity(fields.len());
    let mut key_column: Option<(usize, syn::Ident)> = None;

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = field.ident.clone() else {
            return Err(darling::Error::custom("SheetRow requires named fields"));
        };

        if field.key {
            if key_column.is_some() {
                return Err(darling::Error::custom("only one column can be marked `key`")
                    .with_span(&ident));
            }
            if !utils::is_string_type(&field.ty) {
                return Err(darling::Error::custom("the `key` column must be a String")
                    .with_span(&ident));
            }
            key_column = Some((index, ident.clone()));
        }

        column_names.push(
            field
                .column_name
                .clone()
                .unwrap_or_else(|| utils::default_column_name(&ident)),
        );
        nullable.push(utils::is_option_type(&field.ty));
        types.push(field.ty.clone());
        idents.push(ident);
    }

    let Some((key_index, key_ident)) = key_column else {
        return Err(darling::Error::custom("SheetRow needs one field marked #[column(key)]")
            .with_span(struct_name));
    };

    let positions = 0..idents.len();

    Ok(quote! {
        impl crate::schema::SheetRow for #struct_name {
            const SHEET_NAME: &'static str = #sheet_name;
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];
            const KEY_COLUMN: usize = #key_index;

            fn key(&self) -> &str {
                self.#key_ident.as_str()
            }

            fn to_cells(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![#(crate::schema::SheetCell::to_cell(&self.#idents)),*]
            }

            fn from_cells(cells: &[::std::string::String]) -> Self {
                Self {
                    #(
                        #idents: <#types as crate::schema::SheetCell>::from_cell(
                            cells.get(#positions).map_or("", ::std::string::String::as_str),
                        ),
                    )*
                }
            }

            fn sheet_schema() -> arrow::datatypes::Schema {
                arrow::datatypes::Schema::new(::std::vec![
                    #(
                        arrow::datatypes::Field::new(
                            #column_names,
                            arrow::datatypes::DataType::Utf8,
                            #nullable,
                        )
                    ),*
                ])
            }
        }
    })
}
