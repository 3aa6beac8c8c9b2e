//! Derive macros for the Row Bindings reducer architecture
//!
//! # Available Macros
//!
//! - `#[derive(Bindable)]` - Generates the binding enum for a state struct
//!
//! # Example
//!
//! ```ignore
//! use row_bindings_macros::Bindable;
//!
//! #[derive(Bindable, Clone, Debug)]
//! pub struct TagNameEditorState {
//!     key: TagKey,
//!     #[bindable]
//!     pub name: String,
//!     #[bindable]
//!     pub has_focus: bool,
//! }
//!
//! // Generated:
//! // pub enum TagNameEditorStateBinding { Name(String), HasFocus(bool) }
//! // impl Bindable for TagNameEditorState { ... }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields};

/// Derive macro for bindable state structs
///
/// For a struct `Foo`, generates:
/// - `FooBinding`, an enum with one variant per `#[bindable]` field, named
///   after the field in `UpperCamelCase` and carrying the field's type
/// - `FooBinding::field_name()`, returning the field's name
/// - `impl row_bindings_core::binding::Bindable for Foo`
///
/// The generated enum derives `Clone`, `Debug`, `PartialEq` and has the
/// struct's visibility. Fields without `#[bindable]` cannot be written
/// through bindings.
///
/// # Attributes
///
/// - `#[bindable]` - Mark a field as writable through binding actions
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-struct type, a tuple struct, or a generic struct
/// - No field is marked `#[bindable]`
#[proc_macro_derive(Bindable, attributes(bindable))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let vis = &input.vis;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Bindable)] can only be used on structs")
            .to_compile_error()
            .into();
    };

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[derive(Bindable)] does not support generic structs",
        )
        .to_compile_error()
        .into();
    }

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new_spanned(
            &input,
            "#[derive(Bindable)] requires a struct with named fields",
        )
        .to_compile_error()
        .into();
    };

    let bindable: Vec<_> = fields
        .named
        .iter()
        .filter(|field| has_attribute(&field.attrs, "bindable"))
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)))
        .collect();

    if bindable.is_empty() {
        return syn::Error::new_spanned(&input, "#[derive(Bindable)] needs at least one #[bindable] field")
            .to_compile_error()
            .into();
    }

    let binding_name = format_ident!("{}Binding", name);

    let variants = bindable.iter().map(|(ident, ty)| {
        let variant = format_ident!("{}", upper_camel(&ident.to_string()));
        let doc = format!("New value for `{ident}`");
        quote! {
            #[doc = #doc]
            #variant(#ty),
        }
    });

    let apply_arms = bindable.iter().map(|(ident, _)| {
        let variant = format_ident!("{}", upper_camel(&ident.to_string()));
        quote! { #binding_name::#variant(value) => self.#ident = value, }
    });

    let field_arms = bindable.iter().map(|(ident, _)| {
        let variant = format_ident!("{}", upper_camel(&ident.to_string()));
        let field = ident.to_string();
        quote! { Self::#variant(_) => #field, }
    });

    let enum_doc = format!("Field-level writes to [`{name}`]");

    let expanded = quote! {
        #[doc = #enum_doc]
        #[derive(Clone, Debug, PartialEq)]
        #vis enum #binding_name {
            #(#variants)*
        }

        impl #binding_name {
            /// Name of the field this binding writes
            #[must_use]
            pub const fn field_name(&self) -> &'static str {
                match self {
                    #(#field_arms)*
                }
            }
        }

        impl ::row_bindings_core::binding::Bindable for #name {
            type Binding = #binding_name;

            fn apply_binding(&mut self, binding: Self::Binding) {
                match binding {
                    #(#apply_arms)*
                }
            }

            fn binding_field(binding: &Self::Binding) -> &'static str {
                binding.field_name()
            }
        }
    };

    TokenStream::from(expanded)
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// `has_focus` -> `HasFocus`
fn upper_camel(snake: &str) -> String {
    snake
        .trim_start_matches("r#")
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::upper_camel;

    #[test]
    fn converts_snake_case() {
        assert_eq!(upper_camel("name"), "Name");
        assert_eq!(upper_camel("has_focus"), "HasFocus");
        assert_eq!(upper_camel("_private_flag"), "PrivateFlag");
    }
}
