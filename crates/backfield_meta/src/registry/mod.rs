//! A registry of types carrying member information.
//!
//! Lets callers that only know a type by name reach its [`TypeInfo`].

mod type_registry;

pub use type_registry::TypeRegistry;
