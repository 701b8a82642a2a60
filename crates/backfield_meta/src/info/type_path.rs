use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// A stable alternative to [`core::any::type_name`], implemented by
/// `#[derive(Members)]` as `module_path!()` plus the type identifier, or
/// from `#[member(type_path = "...")]`.
///
/// Paths never start with `::`. Manual implementations must keep that.
///
/// ```
/// use backfield_meta::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
///
/// assert_eq!(Foo::type_name(), "Foo");
/// ```
pub trait TypePath: 'static {
    /// The full path, unique per type.
    fn type_path() -> &'static str;

    /// The name without module path, may be duplicated.
    fn type_name() -> &'static str;

    /// The module path, if any.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Type

/// A `TypeId` with the path and name of the type it identifies.
///
/// Equality and hashing only look at the `TypeId`.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: TypePath>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
        }
    }

    /// Creates a [`Type`] for a type without a [`TypePath`] implementation,
    /// using [`core::any::type_name`].
    #[inline]
    pub fn of_any<T: Any>() -> Self {
        let path = core::any::type_name::<T>();
        // Tuples, arrays, slices, references and pointers keep the full path.
        let name = if path.starts_with(['(', '[', '&', '*']) {
            path
        } else {
            let end = path.find('<').unwrap_or(path.len());
            path[..end].rsplit("::").next().unwrap_or(path)
        };
        Self {
            id: TypeId::of::<T>(),
            path,
            name,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::Type;

    #[test]
    fn of_any_names() {
        let ty = Type::of_any::<String>();
        assert_eq!(ty.path(), "alloc::string::String");
        assert_eq!(ty.name(), "String");
        assert!(ty.is::<String>());

        let ty = Type::of_any::<Vec<u8>>();
        assert_eq!(ty.name(), "Vec");

        assert_eq!(Type::of_any::<u32>().name(), "u32");
    }

    #[test]
    fn of_any_keeps_compound_names() {
        let ty = Type::of_any::<(u8, String)>();
        assert_eq!(ty.name(), ty.path());
        assert!(ty.name().starts_with('('));

        assert_eq!(Type::of_any::<[u8; 4]>().name(), "[u8; 4]");
        assert_eq!(Type::of_any::<&'static str>().name(), "&str");

        let ty = Type::of_any::<Vec<(u8, u8)>>();
        assert_eq!(ty.name(), "Vec");
    }
}
