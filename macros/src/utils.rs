//! Utility functions for procedural macros
//!
//! Type inspection helpers shared by the derive implementations.

use syn::Type;

/// Check if a type is an Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

/// Check if a type is a plain `String`
pub fn is_string_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => {
            type_path.qself.is_none()
                && type_path
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == "String")
        }
        _ => false,
    }
}

/// Fallback column header for a field without a `name` attribute
pub fn default_column_name(field: &syn::Ident) -> String {
    field.to_string().to_uppercase().replace('_', " ")
}
