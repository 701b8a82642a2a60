use crate::derive_data::MembersStruct;

/// Tokens submitting `ty` to the automatic registry.
#[cfg(feature = "auto_register")]
pub(crate) fn auto_register_tokens(
    meta_path: &syn::Path,
    ty: &impl quote::ToTokens,
    span: proc_macro2::Span,
) -> proc_macro2::TokenStream {
    let auto_register_ = crate::path::auto_register_(meta_path, span);

    quote::quote_spanned! { span =>
        const _: () = {
            #auto_register_::inventory::submit!{
                #auto_register_::__AutoRegisterFunc(
                    <#ty as #auto_register_::__RegisterType>::__register
                )
            }
        };
    }
}

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(info: &MembersStruct) -> proc_macro2::TokenStream {
    match info.attrs().auto_register {
        Some(span) => auto_register_tokens(info.meta_path(), info.ident(), span),
        None => crate::utils::empty(),
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &MembersStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
