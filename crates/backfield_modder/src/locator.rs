//! Finding the member a selector or a member reference designates.
//!
//! A [`Selector`] is the text of a closure whose body is a single member
//! access on its parameter, usually built by [`selector!`](crate::selector).
//! Lookup is pure: nothing is cached and errors are returned as they occur.

use alloc::string::{String, ToString};
use core::fmt;
use core::marker::PhantomData;

use backfield_meta::info::{MemberInfo, TypeInfo, Typed};
use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// An error raised while locating a member.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LocateError {
    #[error("selector `{0}` is not a single member access on its parameter")]
    NotMemberAccess(&'static str),

    #[error("`{ty}` has no member named `{member}`")]
    UnknownMember { ty: &'static str, member: String },

    #[error("member `{member}` is declared on `{declaring}`, which is not `{expected}` or one of its bases")]
    TypeMismatch {
        member: &'static str,
        declaring: &'static str,
        expected: &'static str,
    },

    #[error("no type registered with path `{0}`")]
    UnknownType(String),
}

// -----------------------------------------------------------------------------
// Selector

/// A member selector on `T`, written as a closure `|e| e.member`.
///
/// Only the text is stored. It is checked when the selector is resolved,
/// see [`resolve_member`].
///
/// ```
/// use backfield_modder::{Selector, selector};
///
/// struct Foo;
///
/// let a: Selector<Foo> = selector!(|e: Foo| e.bar);
/// let b = Selector::<Foo>::new("|e| e.bar");
/// assert_eq!(a.member_name(), b.member_name());
/// assert_eq!(b.member_name().unwrap(), "bar");
///
/// assert!(Selector::<Foo>::new("|e| e.bar()").member_name().is_err());
/// ```
pub struct Selector<T> {
    text: &'static str,
    _marker: PhantomData<fn(&T)>,
}

impl<T> Selector<T> {
    #[inline]
    pub const fn new(text: &'static str) -> Self {
        Self {
            text,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// The member the closure body accesses.
    ///
    /// Fails with [`LocateError::NotMemberAccess`] unless the body is exactly
    /// `param.member`.
    pub fn member_name(&self) -> Result<&'static str, LocateError> {
        parse_member_access(self.text).ok_or(LocateError::NotMemberAccess(self.text))
    }
}

impl<T> Clone for Selector<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Selector<T> {}

impl<T> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.text).finish()
    }
}

/// Builds a [`Selector`] from a closure.
///
/// The closure is only stringified, never compiled, so it may name
/// properties that have no field of the same name.
///
/// ```
/// use backfield_modder::selector;
///
/// struct Account;
///
/// let s = selector!(|a: Account| a.balance);
/// assert_eq!(s.member_name().unwrap(), "balance");
/// ```
#[macro_export]
macro_rules! selector {
    (|$param:ident : $ty:ty| $body:expr) => {
        $crate::locator::Selector::<$ty>::new(::core::concat!(
            "|",
            ::core::stringify!($param),
            "| ",
            ::core::stringify!($body),
        ))
    };
}

fn is_ident(text: &str) -> bool {
    let text = text.strip_prefix("r#").unwrap_or(text);
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

// Returns `member` from `|param| param.member` or `|param: Ty| param.member`.
fn parse_member_access(text: &str) -> Option<&str> {
    let rest = text.trim().strip_prefix('|')?;
    let (param, body) = rest.split_once('|')?;

    let param = match param.split_once(':') {
        Some((name, _ty)) => name,
        None => param,
    }
    .trim();
    if !is_ident(param) {
        return None;
    }

    let (receiver, member) = body.trim().split_once('.')?;
    let member = member.trim();
    if receiver.trim() != param || !is_ident(member) {
        return None;
    }
    Some(member.strip_prefix("r#").unwrap_or(member))
}

// -----------------------------------------------------------------------------
// Lookup

/// Resolves `selector` to the member of `T`, or of one of its bases, it names.
pub fn resolve_member<T: Typed>(selector: &Selector<T>) -> Result<&'static MemberInfo, LocateError> {
    let name = selector.member_name()?;
    let info = T::type_info();
    info.find_member(name).ok_or_else(|| LocateError::UnknownMember {
        ty: info.type_path(),
        member: name.to_string(),
    })
}

/// Checks that `member` is declared on `T` or one of its bases.
#[inline]
pub fn check_member<T: Typed>(member: &MemberInfo) -> Result<(), LocateError> {
    check_member_in(T::type_info(), member)
}

/// Like [`check_member`], for a type known only at runtime.
pub fn check_member_in(info: &TypeInfo, member: &MemberInfo) -> Result<(), LocateError> {
    let declaring = member.declaring();
    if info.is_subtype_of(declaring.id()) {
        Ok(())
    } else {
        Err(LocateError::TypeMismatch {
            member: member.name(),
            declaring: declaring.path(),
            expected: info.type_path(),
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use backfield_meta::derive::Members;
    use backfield_meta::info::Typed;

    use super::{LocateError, Selector, check_member, resolve_member};

    #[derive(Members)]
    struct Base {
        id: u32,
    }

    #[derive(Members)]
    struct Item {
        #[member(base)]
        base: Base,
        #[member(property = "title", get)]
        title: String,
    }

    #[derive(Members)]
    struct Unrelated {
        id: u32,
    }

    #[test]
    fn parses_member_access() {
        let name = |text| Selector::<Item>::new(text).member_name();

        assert_eq!(name("|e| e.title"), Ok("title"));
        assert_eq!(name("| e : Item | e . title"), Ok("title"));
        assert_eq!(name("|e| e.r#type"), Ok("type"));
        assert_eq!(crate::selector!(|item: Item| item.title).member_name(), Ok("title"));

        for text in [
            "|e| e.title()",
            "|e| e.base.id",
            "|e| other.title",
            "|e| e",
            "|| e.title",
            "|e| e.title + 1",
            "e.title",
        ] {
            assert_eq!(name(text), Err(LocateError::NotMemberAccess(text)), "{text}");
        }
    }

    #[test]
    fn resolves_through_bases() {
        let title = resolve_member(&crate::selector!(|e: Item| e.title)).unwrap();
        assert!(title.as_property().is_some());

        let id = resolve_member(&crate::selector!(|e: Item| e.id)).unwrap();
        assert!(id.declaring().is::<Base>());

        let err = resolve_member(&crate::selector!(|e: Item| e.missing)).unwrap_err();
        assert!(matches!(err, LocateError::UnknownMember { member, .. } if member == "missing"));
    }

    #[test]
    fn checks_ancestry() {
        let id = Base::type_info().member("id").unwrap();
        assert!(check_member::<Item>(id).is_ok());
        assert!(check_member::<Base>(id).is_ok());

        let err = check_member::<Unrelated>(id).unwrap_err();
        assert!(matches!(err, LocateError::TypeMismatch { member: "id", .. }));

        let title = Item::type_info().member("title").unwrap();
        assert!(check_member::<Base>(title).is_err());
    }
}
