//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// `EnvBind` derive macro
///
/// Implements `envbind::EnvBind` (the per-record field visitor) and
/// `envbind::BindField` (so the struct can be nested in other records).
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "APP")]`: Prefix segment used instead of the struct name
///
/// **Field-level**:
/// - `#[env("NAME1,NAME2,default=value,required=true")]`: Tag string
///
/// Fields of nested struct types (or `Option` of them) ignore their tag and
/// bind under the nested struct's segment. Every field type must implement
/// `envbind::BindField`; there is no way to skip a field.
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    // Struct name
    let struct_name = &input.ident;

    // Parse struct-level attributes (prefix)
    let struct_attrs = StructAttrs::from_input(input)?;
    let segment = struct_attrs
        .prefix
        .unwrap_or_else(|| struct_name.unraw().to_string())
        .to_uppercase();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "EnvBind only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "EnvBind only supports structs",
            ));
        }
    };

    // Generate one bind call per field, in declaration order
    let field_binders = fields
        .iter()
        .map(|field| {
            let field_name = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            let attrs = FieldAttrs::from_field(field)?;

            let name = field_name.unraw().to_string();
            let tag = attrs.tag.unwrap_or_default();

            Ok(quote! {
                ::envbind::BindField::bind_field(
                    &mut self.#field_name,
                    binder,
                    &::envbind::FieldDescriptor::new(#name, #tag),
                )?;
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::EnvBind for #struct_name #ty_generics #where_clause {
            const SEGMENT: &'static str = #segment;

            #[allow(unused_variables)]
            fn bind_fields(
                &mut self,
                binder: &mut ::envbind::Binder<'_>,
            ) -> ::core::result::Result<(), ::envbind::BindError> {
                #(#field_binders)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::envbind::BindField for #struct_name #ty_generics #where_clause {
            fn bind_field(
                &mut self,
                binder: &mut ::envbind::Binder<'_>,
                _field: &::envbind::FieldDescriptor,
            ) -> ::core::result::Result<(), ::envbind::BindError> {
                binder.nested(self)
            }
        }
    })
}
