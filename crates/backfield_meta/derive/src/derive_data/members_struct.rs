use std::collections::BTreeMap;

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility};

use super::{FieldAttributes, TypeAttributes};

/// A field that takes part in the member list.
pub(crate) struct MemberField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub vis: &'a Visibility,
    pub attrs: FieldAttributes,
}

impl MemberField<'_> {
    /// The name the storage is registered under.
    pub fn storage_name(&self) -> String {
        match &self.attrs.property {
            Some(property) => backing_name(&property.value()),
            None => self.ident.unraw().to_string(),
        }
    }
}

/// Must stay in sync with `backfield_meta::auto_backing_name`.
pub(crate) fn backing_name(property: &str) -> String {
    format!("<{property}>$backing")
}

/// A parsed `#[derive(Members)]` input.
pub(crate) struct MembersStruct<'a> {
    meta_path: syn::Path,
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<MemberField<'a>>,
}

impl<'a> MembersStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "#[derive(Members)] does not support generic types",
            ));
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(fields) => {
                    return Err(syn::Error::new(
                        fields.span(),
                        "#[derive(Members)] requires named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "#[derive(Members)] is only defined for structs",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "#[derive(Members)] is only defined for structs",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let mut fields = Vec::new();
        for field in named.into_iter().flatten() {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip.is_some() {
                continue;
            }
            fields.push(MemberField {
                // Named fields always have an ident.
                ident: field.ident.as_ref().ok_or_else(|| {
                    syn::Error::new(field.span(), "expected a named field")
                })?,
                ty: &field.ty,
                vis: &field.vis,
                attrs,
            });
        }

        let this = Self {
            meta_path: crate::path::backfield_meta(),
            ident: &input.ident,
            attrs,
            fields,
        };
        this.check_bases()?;
        this.check_unique_names()?;
        Ok(this)
    }

    fn check_bases(&self) -> syn::Result<()> {
        let mut bases = self.fields.iter().filter_map(|f| f.attrs.base);
        bases.next();
        match bases.next() {
            Some(span) => Err(syn::Error::new(span, "only one field can be the base")),
            None => Ok(()),
        }
    }

    fn check_unique_names(&self) -> syn::Result<()> {
        let mut seen: BTreeMap<String, Span> = BTreeMap::new();
        let mut insert = |name: String, span: Span| match seen.insert(name.clone(), span) {
            Some(_) => Err(syn::Error::new(span, format!("duplicate member name `{name}`"))),
            None => Ok(()),
        };

        for property in &self.attrs.properties {
            insert(property.name.value(), property.name.span())?;
        }
        for field in &self.fields {
            if let Some(property) = &field.attrs.property {
                insert(property.value(), property.span())?;
            }
            insert(field.storage_name(), field.ident.span())?;
        }
        Ok(())
    }

    #[inline]
    pub fn meta_path(&self) -> &syn::Path {
        &self.meta_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn fields(&self) -> &[MemberField<'a>] {
        &self.fields
    }

    pub fn base_field(&self) -> Option<&MemberField<'a>> {
        self.fields.iter().find(|f| f.attrs.base.is_some())
    }
}
