//! Parsing of `#[member(...)]` attributes.

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, LitStr, Type, token};

use crate::MEMBER_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// AccessPolicy

/// Declared visibility of a property accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessPolicy {
    Public,
    Crate,
    Private,
}

impl AccessPolicy {
    /// Parses `get`, `get(private)`, `get(crate)` or `get(pub)`.
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        if !meta.input.peek(token::Paren) {
            return Ok(Self::Public);
        }

        let mut policy = None;
        meta.parse_nested_meta(|inner| {
            let parsed = if inner.path.is_ident("private") {
                Self::Private
            } else if inner.path.is_ident("crate") {
                Self::Crate
            } else if inner.path.is_ident("pub") || inner.path.is_ident("public") {
                Self::Public
            } else {
                return Err(inner.error("expected `private`, `crate` or `pub`"));
            };
            if policy.replace(parsed).is_some() {
                return Err(inner.error("accessor policy given twice"));
            }
            Ok(())
        })?;

        policy.ok_or_else(|| meta.error("empty accessor policy"))
    }
}

/// Parses a `get` / `set` flag into `slot`, rejecting duplicates.
fn parse_accessor(meta: &ParseNestedMeta, slot: &mut Option<AccessPolicy>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate accessor"));
    }
    *slot = Some(AccessPolicy::parse(meta)?);
    Ok(())
}

/// Parses `= "name"`, which must spell an identifier. Raw identifiers
/// are registered without their `r#` prefix.
fn parse_property_name(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    let lit: LitStr = meta.value()?.parse()?;
    let ident = lit
        .parse_with(Ident::parse_any)
        .map_err(|_| syn::Error::new(lit.span(), "property name must be an identifier"))?;
    Ok(LitStr::new(&ident.unraw().to_string(), lit.span()))
}

// -----------------------------------------------------------------------------
// PropertyDecl

/// A property declared at type level:
/// `#[member(property(name = "..", ty = T, get, set))]`.
#[derive(Debug)]
pub(crate) struct PropertyDecl {
    pub name: LitStr,
    pub ty: Type,
    pub getter: Option<AccessPolicy>,
    pub setter: Option<AccessPolicy>,
}

impl PropertyDecl {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut ty: Option<Type> = None;
        let mut getter = None;
        let mut setter = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(parse_property_name(&inner)?);
            } else if inner.path.is_ident("ty") {
                ty = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("get") {
                parse_accessor(&inner, &mut getter)?;
            } else if inner.path.is_ident("set") {
                parse_accessor(&inner, &mut setter)?;
            } else {
                return Err(inner.error("expected `name`, `ty`, `get` or `set`"));
            }
            Ok(())
        })?;

        let name = name.ok_or_else(|| meta.error("property requires `name = \"...\"`"))?;
        let ty = ty.ok_or_else(|| meta.error("property requires `ty = Type`"))?;
        if getter.is_none() && setter.is_none() {
            return Err(meta.error("property needs at least one of `get` or `set`"));
        }

        Ok(Self {
            name,
            ty,
            getter,
            setter,
        })
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<LitStr>,
    pub auto_register: Option<Span>,
    pub properties: Vec<PropertyDecl>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MEMBER_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let text = lit.value();
                    if text.starts_with("::") || text.is_empty() {
                        return Err(syn::Error::new(
                            lit.span(),
                            "type path must be non-empty and must not start with `::`",
                        ));
                    }
                    result.type_path = Some(lit);
                } else if meta.path.is_ident("auto_register") {
                    result.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("property") {
                    result.properties.push(PropertyDecl::parse(&meta)?);
                } else {
                    return Err(meta.error(
                        "unknown member attribute, expected `type_path`, `auto_register` or `property`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    /// `property = ".."` makes the field the storage of an auto-property.
    pub property: Option<LitStr>,
    pub getter: Option<AccessPolicy>,
    pub setter: Option<AccessPolicy>,
    pub base: Option<Span>,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        let mut first = None;

        for attr in attrs {
            if !attr.path().is_ident(MEMBER_ATTRIBUTE_NAME) {
                continue;
            }
            first.get_or_insert(attr);

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("property") {
                    result.property = Some(parse_property_name(&meta)?);
                } else if meta.path.is_ident("get") {
                    parse_accessor(&meta, &mut result.getter)?;
                } else if meta.path.is_ident("set") {
                    parse_accessor(&meta, &mut result.setter)?;
                } else if meta.path.is_ident("base") {
                    result.base = Some(meta.path.span());
                } else if meta.path.is_ident("skip") {
                    result.skip = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unknown member field attribute, expected `property`, `get`, `set`, `base` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }

        if let Some(attr) = first {
            result.validate(attr)?;
        }
        Ok(result)
    }

    fn validate(&self, attr: &Attribute) -> syn::Result<()> {
        let has_accessor = self.getter.is_some() || self.setter.is_some();
        if self.property.is_none() && has_accessor {
            return Err(syn::Error::new_spanned(attr, "`get` / `set` require `property = \"...\"`"));
        }
        if self.property.is_some() && !has_accessor {
            return Err(syn::Error::new_spanned(
                attr,
                "property needs at least one of `get` or `set`",
            ));
        }
        if let Some(span) = self.skip
            && (self.property.is_some() || self.base.is_some())
        {
            return Err(syn::Error::new(span, "a skipped field cannot be a property or a base"));
        }
        if let Some(span) = self.base
            && self.property.is_some()
        {
            return Err(syn::Error::new(span, "a base field cannot back a property"));
        }
        Ok(())
    }
}
