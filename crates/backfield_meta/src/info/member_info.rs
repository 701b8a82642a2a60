use core::fmt;

use crate::info::{FieldInfo, PropertyInfo, Type};

// -----------------------------------------------------------------------------
// Visibility

/// A declared access policy, as written in the type definition.
///
/// Only informational: [`FieldAccess`](crate::info::FieldAccess) ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `pub`
    Public,
    /// `pub(crate)`, `pub(super)`, `pub(in path)`
    Crate,
    /// Inherited (no visibility keyword).
    Private,
}

impl Visibility {
    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

// -----------------------------------------------------------------------------
// MemberKind

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A storage location.
    Field,
    /// A computed accessor pair.
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Property => f.write_str("property"),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A named member of a type.
///
/// # Examples
///
/// ```
/// use backfield_meta::{derive::Members, info::{Typed, MemberKind}};
///
/// #[derive(Members)]
/// struct Foo {
///     #[member(property = "size", get)]
///     size: usize,
///     raw: u8,
/// }
///
/// let kinds: Vec<_> = Foo::type_info().members().iter().map(|m| m.kind()).collect();
/// assert_eq!(kinds, [MemberKind::Property, MemberKind::Field, MemberKind::Field]);
/// ```
#[derive(Clone, Debug)]
pub enum MemberInfo {
    Field(FieldInfo),
    Property(PropertyInfo),
}

impl MemberInfo {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Field(info) => info.name(),
            Self::Property(info) => info.name(),
        }
    }

    /// The type the member is declared on.
    #[inline]
    pub fn declaring(&self) -> Type {
        match self {
            Self::Field(info) => info.declaring(),
            Self::Property(info) => info.declaring(),
        }
    }

    /// The type of the member's value.
    #[inline]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Field(info) => info.value_type(),
            Self::Property(info) => info.value_type(),
        }
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Field(_) => MemberKind::Field,
            Self::Property(_) => MemberKind::Property,
        }
    }

    #[inline]
    pub fn as_field(&self) -> Option<&FieldInfo> {
        match self {
            Self::Field(info) => Some(info),
            Self::Property(_) => None,
        }
    }

    #[inline]
    pub fn as_property(&self) -> Option<&PropertyInfo> {
        match self {
            Self::Property(info) => Some(info),
            Self::Field(_) => None,
        }
    }
}

impl From<FieldInfo> for MemberInfo {
    #[inline]
    fn from(value: FieldInfo) -> Self {
        Self::Field(value)
    }
}

impl From<PropertyInfo> for MemberInfo {
    #[inline]
    fn from(value: PropertyInfo) -> Self {
        Self::Property(value)
    }
}
