//! Tokens building the `MemberInfo` list of a type.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Type};

use crate::derive_data::{AccessPolicy, MemberField, MembersStruct};

fn policy_tokens(meta_path: &syn::Path, policy: AccessPolicy) -> TokenStream {
    let visibility_ = crate::path::visibility_(meta_path);
    match policy {
        AccessPolicy::Public => quote! { #visibility_::Public },
        AccessPolicy::Crate => quote! { #visibility_::Crate },
        AccessPolicy::Private => quote! { #visibility_::Private },
    }
}

fn visibility_tokens(meta_path: &syn::Path, vis: &syn::Visibility) -> TokenStream {
    let policy = match vis {
        syn::Visibility::Public(_) => AccessPolicy::Public,
        syn::Visibility::Restricted(_) => AccessPolicy::Crate,
        syn::Visibility::Inherited => AccessPolicy::Private,
    };
    policy_tokens(meta_path, policy)
}

/// `FieldAccess::new(..)` projecting `Self` onto `field`.
fn access_tokens(meta_path: &syn::Path, field: &Ident) -> TokenStream {
    let field_access_ = crate::path::field_access_(meta_path);
    quote! {
        #field_access_::new(
            |this| this
                .downcast_ref::<Self>()
                .map(|this| &this.#field as &dyn ::core::any::Any),
            |this| this
                .downcast_mut::<Self>()
                .map(|this| &mut this.#field as &mut dyn ::core::any::Any),
        )
    }
}

fn property_tokens(
    meta_path: &syn::Path,
    name: &str,
    ty: &Type,
    getter: Option<AccessPolicy>,
    setter: Option<AccessPolicy>,
    auto: bool,
) -> TokenStream {
    let member_info_ = crate::path::member_info_(meta_path);
    let property_info_ = crate::path::property_info_(meta_path);

    let getter = getter.map(|p| {
        let p = policy_tokens(meta_path, p);
        quote! { .with_getter(#p) }
    });
    let setter = setter.map(|p| {
        let p = policy_tokens(meta_path, p);
        quote! { .with_setter(#p) }
    });
    let auto = auto.then(|| quote! { .with_auto_backing() });

    quote! {
        #member_info_::Property(
            #property_info_::new::<Self, #ty>(#name) #getter #setter #auto
        )
    }
}

fn field_tokens(meta_path: &syn::Path, field: &MemberField) -> TokenStream {
    let member_info_ = crate::path::member_info_(meta_path);
    let field_info_ = crate::path::field_info_(meta_path);

    let name = field.storage_name();
    let ty = field.ty;
    // Backing fields are never reachable from outside the type.
    let visibility = match field.attrs.property {
        Some(_) => policy_tokens(meta_path, AccessPolicy::Private),
        None => visibility_tokens(meta_path, field.vis),
    };
    let access = access_tokens(meta_path, field.ident);

    quote! {
        #member_info_::Field(
            #field_info_::new::<Self, #ty>(#name, #visibility, #access)
        )
    }
}

/// Type-level properties first, then fields in declaration order.
pub(super) fn member_list_tokens(info: &MembersStruct) -> Vec<TokenStream> {
    let meta_path = info.meta_path();
    let mut members = Vec::new();

    for decl in &info.attrs().properties {
        members.push(property_tokens(
            meta_path,
            &decl.name.value(),
            &decl.ty,
            decl.getter,
            decl.setter,
            false,
        ));
    }

    for field in info.fields() {
        if let Some(property) = &field.attrs.property {
            members.push(property_tokens(
                meta_path,
                &property.value(),
                field.ty,
                field.attrs.getter,
                field.attrs.setter,
                true,
            ));
        }
        members.push(field_tokens(meta_path, field));
    }

    members
}

/// `.with_base(..)` for the field marked `#[member(base)]`, if any.
pub(super) fn base_tokens(info: &MembersStruct) -> TokenStream {
    let Some(base) = info.base_field() else {
        return crate::utils::empty();
    };
    let meta_path = info.meta_path();
    let base_info_ = crate::path::base_info_(meta_path);
    let typed_ = crate::path::typed_(meta_path);

    let name = base.storage_name();
    let ty = base.ty;
    let access = access_tokens(meta_path, base.ident);

    quote! {
        .with_base(#base_info_::new(#name, <#ty as #typed_>::type_info, #access))
    }
}
