//! Container-level attribute parsing for `#[derive(Command)]`.
//!
//! Only the `#[command(...)]` attribute on the type itself is read; field
//! attributes are ignored.

use proc_macro2::Ident;
use syn::{punctuated::Punctuated, Attribute, LitBool, LitStr, Meta, Result, Token};

/// Options parsed from the container-level `#[command(...)]` attribute.
#[derive(Clone, Debug)]
pub(crate) struct CommandOptions {
    /// The registered command name.
    pub(crate) name: LitStr,
    /// Top-level request fields declared sensitive, in declaration order.
    pub(crate) sensitive_fields: Vec<LitStr>,
    /// Whether diagnostic printing on failure is enabled.
    pub(crate) diagnostics: bool,
}

/// Parses the container-level `#[command(...)]` attribute.
///
/// `ident` is only used to point the "missing name" error at the type.
pub(crate) fn parse_command_options(ident: &Ident, attrs: &[Attribute]) -> Result<CommandOptions> {
    let mut name: Option<LitStr> = None;
    let mut sensitive_fields: Option<Vec<LitStr>> = None;
    let mut diagnostics: Option<bool> = None;

    for attr in attrs {
        if !attr.path().is_ident("command") {
            continue;
        }

        match &attr.meta {
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected `#[command(name = \"...\")]`",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        if name.is_some() {
                            return Err(meta.error("duplicate `name` option"));
                        }
                        let lit: LitStr = meta.value()?.parse()?;
                        if lit.value().is_empty() {
                            return Err(syn::Error::new(
                                lit.span(),
                                "command name must not be empty",
                            ));
                        }
                        name = Some(lit);
                        Ok(())
                    } else if meta.path.is_ident("sensitive_fields") {
                        if sensitive_fields.is_some() {
                            return Err(meta.error("duplicate `sensitive_fields` option"));
                        }
                        let content;
                        syn::parenthesized!(content in meta.input);
                        let lits = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                        let mut fields: Vec<LitStr> = Vec::with_capacity(lits.len());
                        for lit in lits {
                            if lit.value().is_empty() {
                                return Err(syn::Error::new(
                                    lit.span(),
                                    "sensitive field name must not be empty",
                                ));
                            }
                            if fields.iter().any(|seen| seen.value() == lit.value()) {
                                return Err(syn::Error::new(
                                    lit.span(),
                                    format!("sensitive field `{}` is listed twice", lit.value()),
                                ));
                            }
                            fields.push(lit);
                        }
                        sensitive_fields = Some(fields);
                        Ok(())
                    } else if meta.path.is_ident("diagnostics") {
                        if diagnostics.is_some() {
                            return Err(meta.error("duplicate `diagnostics` option"));
                        }
                        let enabled = if meta.input.peek(Token![=]) {
                            let lit: LitBool = meta.value()?.parse()?;
                            lit.value
                        } else {
                            true
                        };
                        diagnostics = Some(enabled);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown command option `{}`; expected `name`, `sensitive_fields` or `diagnostics`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for #[command]",
                ));
            }
        }
    }

    let name = name.ok_or_else(|| {
        syn::Error::new(
            ident.span(),
            "missing command name; add `#[command(name = \"...\")]`",
        )
    })?;

    Ok(CommandOptions {
        name,
        sensitive_fields: sensitive_fields.unwrap_or_default(),
        diagnostics: diagnostics.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse(tokens: proc_macro2::TokenStream) -> Result<CommandOptions> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        parse_command_options(&input.ident, &input.attrs)
    }

    fn error_of(tokens: proc_macro2::TokenStream) -> String {
        parse(tokens).unwrap_err().to_string()
    }

    #[test]
    fn name_only_uses_defaults() {
        let options = parse(quote! { #[command(name = "ping")] }).unwrap();
        assert_eq!(options.name.value(), "ping");
        assert!(options.sensitive_fields.is_empty());
        assert!(!options.diagnostics);
    }

    #[test]
    fn all_options_are_parsed() {
        let options = parse(quote! {
            #[command(name = "createUser", sensitive_fields("pwd", "digestPassword"), diagnostics)]
        })
        .unwrap();
        assert_eq!(options.name.value(), "createUser");
        let fields: Vec<String> = options
            .sensitive_fields
            .iter()
            .map(LitStr::value)
            .collect();
        assert_eq!(fields, ["pwd", "digestPassword"]);
        assert!(options.diagnostics);
    }

    #[test]
    fn options_may_span_several_attributes() {
        let options = parse(quote! {
            #[command(name = "find")]
            #[command(diagnostics = true)]
        })
        .unwrap();
        assert_eq!(options.name.value(), "find");
        assert!(options.diagnostics);
    }

    #[test]
    fn explicit_false_disables_diagnostics() {
        let options = parse(quote! { #[command(name = "auth", diagnostics = false)] }).unwrap();
        assert!(!options.diagnostics);
    }

    #[test]
    fn missing_name_errors() {
        assert!(error_of(quote! { #[command(diagnostics)] }).contains("missing command name"));
        assert!(error_of(quote! {}).contains("missing command name"));
    }

    #[test]
    fn empty_name_errors() {
        assert!(error_of(quote! { #[command(name = "")] }).contains("must not be empty"));
    }

    #[test]
    fn duplicate_name_errors() {
        let err = error_of(quote! {
            #[command(name = "a")]
            #[command(name = "b")]
        });
        assert!(err.contains("duplicate `name` option"));
    }

    #[test]
    fn repeated_sensitive_field_errors() {
        let err = error_of(quote! { #[command(name = "a", sensitive_fields("pwd", "pwd"))] });
        assert!(err.contains("listed twice"));
    }

    #[test]
    fn unknown_option_errors() {
        let err = error_of(quote! { #[command(name = "a", unknown_option)] });
        assert!(err.contains("unknown command option"));
    }

    #[test]
    fn bare_command_attribute_errors() {
        assert!(error_of(quote! { #[command] }).contains("expected `#[command(name"));
    }

    #[test]
    fn name_value_syntax_errors() {
        let err = error_of(quote! { #[command = "ping"] });
        assert!(err.contains("name-value syntax is not supported"));
    }

    #[test]
    fn other_attributes_ignored() {
        let options = parse(quote! {
            #[derive(Clone)]
            #[serde(rename_all = "camelCase")]
            #[command(name = "ping")]
        })
        .unwrap();
        assert_eq!(options.name.value(), "ping");
    }
}
