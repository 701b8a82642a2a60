use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// An error raised when a storage location is actually read or written.
///
/// Member lookup is type-erased, so value type mismatches only surface here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("field `{field}` is declared on `{declaring}`, which the instance is not and does not extend")]
    InstanceMismatch {
        field: &'static str,
        declaring: &'static str,
    },

    #[error("field `{field}` holds `{found}`, not `{expected}`")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("value stored into field `{field}` is not a `{expected}`")]
    ValueMismatch {
        field: &'static str,
        expected: &'static str,
    },
}
