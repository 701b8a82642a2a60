use proc_macro2::TokenStream;
use quote::quote;

use super::member_tokens::{base_tokens, member_list_tokens};
use crate::derive_data::MembersStruct;

/// Generate implementation code for `Typed`
///
/// The info is built once, on first access, and kept in a static cell.
pub(crate) fn impl_trait_typed(info: &MembersStruct) -> TokenStream {
    let meta_path = info.meta_path();
    let trait_typed_ = crate::path::typed_(meta_path);
    let type_info_ = crate::path::type_info_(meta_path);
    let info_cell = crate::path::type_info_cell_(meta_path);
    let member_info_ = crate::path::member_info_(meta_path);

    let members = member_list_tokens(info);
    let len = members.len();
    let with_base = base_tokens(info);
    let ident = info.ident();

    quote! {
        impl #trait_typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #info_cell = #info_cell::new();
                CELL.get_or_init(|| {
                    let members: [#member_info_; #len] = [#(#members),*];
                    #type_info_::new::<Self>(members) #with_base
                })
            }
        }
    }
}
