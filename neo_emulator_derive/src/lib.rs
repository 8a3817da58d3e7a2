//! Derive macros for the neo-emulator crate.
//!
//! Provides `#[derive(Error)]`: `Display`, `Error` and `From` boilerplate for
//! error enums, in place of an external error crate.

mod error;

use proc_macro::TokenStream;

/// Implements `Display` and `Error` for an error enum, and `From` for `#[from]` fields.
#[proc_macro_derive(Error, attributes(error, from))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
