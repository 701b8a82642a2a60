//! Static storage for type information.
//!
//! Used to implement [`Typed`](crate::info::Typed). Only non-generic types
//! are supported, so a plain [`OnceLock`] per type is enough.

use std::sync::OnceLock;

use crate::info::TypeInfo;

/// Container for the static [`TypeInfo`] of one type.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct TypeInfoCell(OnceLock<TypeInfo>);

impl TypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}
