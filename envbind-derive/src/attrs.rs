//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from structs and
//! their fields during macro expansion.

use syn::{Attribute, DeriveInput, Field, Lit, LitStr};

/// Parsed struct-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix segment override.
    ///
    /// If `None`, the struct name is used.
    pub prefix: Option<String>,
}

impl StructAttrs {
    /// Extract `#[env(prefix = "...")]` from the derive input.
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&input.attrs) {
            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    match lit {
                        Lit::Str(s) if !s.value().is_empty() => attrs.prefix = Some(s.value()),
                        _ => return Err(meta.error("prefix must be a non-empty string literal")),
                    }
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed field-level `#[env("...")]` attribute.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw tag string, parsed at bind time.
    ///
    /// If `None`, the field binds from its own name upper-cased.
    pub tag: Option<String>,
}

impl FieldAttrs {
    /// Extract the tag string from a struct field.
    ///
    /// A field carries at most one `#[env("...")]` attribute.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&field.attrs) {
            if attrs.tag.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate env attribute"));
            }
            let tag: LitStr = attr.parse_args().map_err(|e| {
                syn::Error::new(e.span(), "expected a tag string, e.g. #[env(\"PORT,default=8080\")]")
            })?;
            attrs.tag = Some(tag.value());
        }

        Ok(attrs)
    }
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("env"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_tag() {
        let field: Field = parse_quote! {
            #[env("PORT,default=8080")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, Some("PORT,default=8080".to_string()));
    }

    #[test]
    fn test_parse_no_attribute() {
        let field: Field = parse_quote! {
            pub name: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, None);
    }

    #[test]
    fn test_other_attributes_are_ignored() {
        let field: Field = parse_quote! {
            #[doc = "listen port"]
            #[serde(rename = "p")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, None);
    }

    #[test]
    fn test_duplicate_field_attribute() {
        let field: Field = parse_quote! {
            #[env("A")]
            #[env("B")]
            pub value: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_non_string_tag() {
        let field: Field = parse_quote! {
            #[env(name = "A")]
            pub value: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_parse_struct_prefix() {
        let input: DeriveInput = parse_quote! {
            #[env(prefix = "APP")]
            struct Config {
                pub port: u16,
            }
        };

        let attrs = StructAttrs::from_input(&input).unwrap();
        assert_eq!(attrs.prefix, Some("APP".to_string()));
    }

    #[test]
    fn test_parse_struct_without_prefix() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                pub port: u16,
            }
        };

        let attrs = StructAttrs::from_input(&input).unwrap();
        assert_eq!(attrs.prefix, None);
    }

    #[test]
    fn test_unsupported_struct_attribute() {
        let input: DeriveInput = parse_quote! {
            #[env(rename_all = "lower")]
            struct Config {
                pub port: u16,
            }
        };

        assert!(StructAttrs::from_input(&input).is_err());
    }
}
