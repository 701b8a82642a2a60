// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod member_tokens;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MembersStruct;

#[cfg(feature = "auto_register")]
pub(crate) use auto_register::auto_register_tokens;

use auto_register::get_auto_register_impl;
use trait_type_path::impl_trait_type_path;
use trait_typed::impl_trait_typed;

/// Generate all impls for `#[derive(Members)]`.
pub(crate) fn impl_members(info: &MembersStruct) -> TokenStream {
    let type_path_impl = impl_trait_type_path(info);
    let typed_impl = impl_trait_typed(info);
    let auto_register = get_auto_register_impl(info);

    quote! {
        #type_path_impl

        #typed_impl

        #auto_register
    }
}
