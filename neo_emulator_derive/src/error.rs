//! Derive macro for error enums.
//!
//! Generates `std::fmt::Display` and `std::error::Error` implementations, plus a
//! `From` conversion for every variant whose single field is marked `#[from]`.
//!
//! # Usage
//!
//! ```ignore
//! use neo_emulator_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum KeyError {
//!     #[error("invalid key length {0}")]
//!     InvalidKeyLength(usize),
//!
//!     #[error("operand mismatch: expected {expected}, got {actual}")]
//!     Mismatch { expected: &'static str, actual: &'static str },
//!
//!     #[error("{0}")]
//!     Encoding(#[from] Base58Error),
//! }
//! ```
//!
//! Every field of a variant must be referenced by its message, either
//! positionally (`{0}`) or by name (`{expected}`).

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields, FieldsUnnamed, Lit, Meta, parse_macro_input};

pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Error derive only supports enums",
        ));
    };

    let mut display_arms = Vec::with_capacity(data.variants.len());
    let mut source_arms = Vec::new();
    let mut from_impls = Vec::new();

    for variant in &data.variants {
        let ident = &variant.ident;
        let message = error_message(variant)?;

        match &variant.fields {
            Fields::Unit => {
                display_arms.push(quote! {
                    Self::#ident => write!(f, #message),
                });
            }
            Fields::Unnamed(fields) => {
                let bindings: Vec<_> = (0..fields.unnamed.len())
                    .map(|i| format_ident!("f{}", i))
                    .collect();
                let message = positional_to_named(&message, bindings.len());
                display_arms.push(quote! {
                    Self::#ident(#(#bindings),*) => write!(f, #message, #(#bindings = #bindings),*),
                });

                if let Some(field) = from_field(fields)? {
                    let ty = &field.ty;
                    source_arms.push(quote! {
                        Self::#ident(inner) => Some(inner as &(dyn ::std::error::Error + 'static)),
                    });
                    from_impls.push(quote! {
                        impl #impl_generics ::std::convert::From<#ty> for #name #ty_generics #where_clause {
                            fn from(inner: #ty) -> Self {
                                Self::#ident(inner)
                            }
                        }
                    });
                }
            }
            Fields::Named(fields) => {
                let bindings: Vec<_> = fields.named.iter().map(|f| &f.ident).collect();
                display_arms.push(quote! {
                    Self::#ident { #(#bindings),* } => write!(f, #message, #(#bindings = #bindings),*),
                });
            }
        }
    }

    let source_fn = if source_arms.is_empty() {
        quote! {}
    } else {
        quote! {
            #[allow(unreachable_patterns)]
            fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
                match self {
                    #(#source_arms)*
                    _ => None,
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#display_arms)*
                }
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {
            #source_fn
        }

        #(#from_impls)*
    })
}

/// Reads the message from a variant's `#[error("...")]` attribute.
fn error_message(variant: &syn::Variant) -> syn::Result<String> {
    for attr in &variant.attrs {
        if !attr.path().is_ident("error") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                &attr.meta,
                "expected #[error(\"message\")]",
            ));
        };
        return match syn::parse2::<Lit>(list.tokens.clone()) {
            Ok(Lit::Str(lit)) => Ok(lit.value()),
            _ => Err(syn::Error::new_spanned(
                &attr.meta,
                "#[error] message must be a string literal",
            )),
        };
    }

    Err(syn::Error::new_spanned(
        &variant.ident,
        format!(
            "variant `{}` is missing an #[error(\"...\")] attribute",
            variant.ident
        ),
    ))
}

/// Returns the field marked `#[from]`, if any.
///
/// A `#[from]` variant must wrap exactly one field.
fn from_field(fields: &FieldsUnnamed) -> syn::Result<Option<&Field>> {
    let marked = fields
        .unnamed
        .iter()
        .any(|field| field.attrs.iter().any(|a| a.path().is_ident("from")));
    if !marked {
        return Ok(None);
    }
    if fields.unnamed.len() != 1 {
        return Err(syn::Error::new_spanned(
            fields,
            "#[from] variants must have exactly one field",
        ));
    }
    Ok(fields.unnamed.first())
}

/// Rewrites `{0}`, `{1}`, ... into `{f0}`, `{f1}`, ... so tuple fields can be
/// passed as named format arguments.
fn positional_to_named(message: &str, field_count: usize) -> String {
    (0..field_count).rev().fold(message.to_string(), |acc, i| {
        acc.replace(&format!("{{{i}}}"), &format!("{{f{i}}}"))
    })
}
