//! Derive macros for `command-diagnostics`.
//!
//! This crate generates command descriptor impls behind `#[derive(Command)]`. It:
//! - reads the container-level `#[command(...)]` attribute
//! - emits `SensitiveFields` and `Command` implementations for the type
//!
//! It does **not** decide what gets printed. The omission rules and the field
//! redactor live in the main `command-diagnostics` crate and run at format time.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Result};

mod container;
use container::{parse_command_options, CommandOptions};

/// Derives `command_diagnostics::Command` and `command_diagnostics::SensitiveFields`.
///
/// # Container Attributes
///
/// All options live in a single `#[command(...)]` attribute on the type:
///
/// - `name = "..."` (required): the command name, as it appears as the first
///   field of a request document.
/// - `sensitive_fields("a", "b", ...)`: top-level request fields whose values
///   are always redacted by the diagnostic printer.
/// - `diagnostics` or `diagnostics = true|false`: opt the command type into
///   diagnostic printing on failure. Omitted means disabled.
///
/// The annotated type's own fields are ignored. Unions are rejected at compile
/// time.
///
/// ```ignore
/// use command_diagnostics::Command;
///
/// #[derive(Command)]
/// #[command(name = "createUser", sensitive_fields("pwd"), diagnostics)]
/// struct CreateUser;
/// ```
#[proc_macro_derive(Command, attributes(command))]
pub fn derive_command(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the command-diagnostics crate root.
///
/// Handles crate renaming (e.g., `diag = { package = "command-diagnostics", ... }`)
/// and internal usage (when the derive is used inside the crate itself).
fn crate_root() -> TokenStream {
    match crate_name("command-diagnostics") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::command_diagnostics },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    if let Data::Union(u) = &data {
        return Err(syn::Error::new(
            u.union_token.span,
            "`Command` cannot be derived for unions",
        ));
    }

    let CommandOptions {
        name,
        sensitive_fields,
        diagnostics,
    } = parse_command_options(&ident, &attrs)?;

    let crate_root = crate_root();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // An empty declaration keeps the trait's default (no sensitive fields).
    let sensitive_body = if sensitive_fields.is_empty() {
        quote! {}
    } else {
        quote! {
            fn sensitive_field_names(&self) -> ::std::collections::BTreeSet<&str> {
                ::std::collections::BTreeSet::from([#(#sensitive_fields),*])
            }
        }
    };

    Ok(quote! {
        impl #impl_generics #crate_root::SensitiveFields for #ident #ty_generics #where_clause {
            #sensitive_body
        }

        impl #impl_generics #crate_root::Command for #ident #ty_generics #where_clause {
            fn name(&self) -> &str {
                #name
            }

            fn enable_diagnostic_printing_on_failure(&self) -> bool {
                #diagnostics
            }
        }
    })
}
