use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MembersStruct;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(info: &MembersStruct) -> TokenStream {
    let trait_type_path_ = crate::path::type_path_(info.meta_path());
    let ident = info.ident();

    let (type_path, type_name, module_path) = match &info.attrs().type_path {
        Some(custom) => {
            let text = custom.value();
            let (module, name) = match text.rsplit_once("::") {
                Some((module, name)) => (Some(module.to_owned()), name.to_owned()),
                None => (None, text.clone()),
            };
            let module = match module {
                Some(module) => quote! { ::core::option::Option::Some(#module) },
                None => quote! { ::core::option::Option::None },
            };
            (quote! { #custom }, quote! { #name }, module)
        }
        None => {
            let name = ident.to_string();
            (
                quote! { ::core::concat!(::core::module_path!(), "::", #name) },
                quote! { #name },
                quote! { ::core::option::Option::Some(::core::module_path!()) },
            )
        }
    };

    quote! {
        impl #trait_type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
