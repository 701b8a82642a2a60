//! Paths into `backfield_meta` used by generated code.
//!
//! Kept in one place so that a layout change in `backfield_meta` only
//! touches this file.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `backfield_meta` crate from the caller.
///
/// 1. For crates that depend on `backfield_meta`, `::backfield_meta`.
/// 2. For crates that depend on `backfield`, `::backfield::meta`.
/// 3. Otherwise `::backfield_meta`, which may be wrong.
///
/// This reads the caller's manifest, so obtain it once per macro call.
pub(crate) fn backfield_meta() -> syn::Path {
    backfield_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("backfield_meta"))
}

#[inline(always)]
pub(crate) fn type_path_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::TypePath }
}

#[inline(always)]
pub(crate) fn typed_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn type_info_cell_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::cell::TypeInfoCell }
}

#[inline(always)]
pub(crate) fn member_info_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::MemberInfo }
}

#[inline(always)]
pub(crate) fn field_info_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::FieldInfo }
}

#[inline(always)]
pub(crate) fn field_access_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::FieldAccess }
}

#[inline(always)]
pub(crate) fn property_info_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::PropertyInfo }
}

#[inline(always)]
pub(crate) fn base_info_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::BaseInfo }
}

#[inline(always)]
pub(crate) fn visibility_(meta_path: &syn::Path) -> TokenStream {
    quote! { #meta_path::info::Visibility }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(meta_path: &syn::Path, span: proc_macro2::Span) -> TokenStream {
    quote::quote_spanned! { span =>
        #meta_path::__macro_exports::auto_register
    }
}
