//! Compile-time member information.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type path and short name of a type.
//! - [`Type`]: a `TypeId` together with its path and name.
//! - [`TypeInfo`]: the members declared on a type, plus its optional [`BaseInfo`].
//! - [`MemberInfo`]: a [`FieldInfo`] (storage location) or a [`PropertyInfo`] (computed accessor pair).
//! - [`FieldAccess`]: direct, type-erased access to one storage location.
//! - [`Visibility`]: a declared access policy.
//! - [`Typed`]: obtains the static [`TypeInfo`] of a type.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod member_info;
mod property_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::{FieldAccess, FieldInfo};
pub use member_info::{MemberInfo, MemberKind, Visibility};
pub use property_info::{PropertyInfo, auto_backing_name};
pub use type_info::{Ancestors, BaseInfo, TypeInfo};
pub use type_path::{Type, TypePath};
pub use typed::Typed;
