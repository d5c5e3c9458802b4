//! Implementation of the `#[derive(Slot)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input, parse_quote};

use crate::attrs::SlotAttrs;

pub fn derive_slot_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_slot_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_slot_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = SlotAttrs::from_attrs(&input.attrs)?;

    let mut generics = input.generics.clone();
    generics.make_where_clause().predicates.push(parse_quote! {
        Self: ::core::clone::Clone
            + ::core::cmp::PartialEq
            + ::core::fmt::Debug
            + ::core::marker::Send
            + ::core::marker::Sync
            + 'static
    });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let type_name = attrs.name.map(|name| {
        quote! {
            fn type_name() -> &'static str {
                #name
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::funcmock::Slot for #name #ty_generics #where_clause {
            const KIND: ::funcmock::TypeKind = ::funcmock::TypeKind::Native;

            #type_name

            fn into_value(self) -> ::funcmock::Value {
                ::funcmock::Value::native(self)
            }

            fn from_value(
                value: &::funcmock::Value,
            ) -> ::core::result::Result<Self, ::funcmock::ConversionError> {
                value.native_cloned::<Self>()
            }
        }
    })
}
