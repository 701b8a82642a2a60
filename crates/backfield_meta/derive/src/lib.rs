//! See following macros:
//!
//! - [`Members`]
//! - [`impl_auto_register`]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MEMBER_ATTRIBUTE_NAME: &str = "member";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Member Registration
///
/// `#[derive(Members)]` implements `TypePath` and `Typed` for a struct with
/// named fields (or a unit struct). The generated `TypeInfo` lists, in
/// declaration order:
///
/// - every field, as a storage location with direct access to it;
/// - every property declared through the attributes below.
///
/// ## Auto-properties
///
/// A field marked with `property` becomes the backing storage of a computed
/// property. The property is listed first, then the field under the
/// synthesized name `<name>$backing`.
///
/// ```rust
/// # use backfield_meta::{derive::Members, info::Typed};
/// #[derive(Members)]
/// struct Account {
///     #[member(property = "balance", get, set(private))]
///     balance: u64,
/// }
///
/// assert!(Account::type_info().field("<balance>$backing").is_some());
/// ```
///
/// `get` and `set` declare the accessor policy. A bare flag is public;
/// `(private)` and `(crate)` restrict it. A missing flag means the accessor
/// does not exist. At least one of them is required.
///
/// The name must spell an identifier. A raw identifier such as `"r#type"`
/// is registered as `type`.
///
/// ## Hand-written properties
///
/// Properties whose storage is an ordinary field are declared at type level.
/// No field is synthesized, so the storage keeps its own name.
///
/// ```rust
/// # use backfield_meta::{derive::Members, info::Typed};
/// #[derive(Members)]
/// #[member(property(name = "owner", ty = String, get, set))]
/// struct Account {
///     _owner: String,
/// }
///
/// assert!(Account::type_info().property("owner").is_some());
/// ```
///
/// ## Base
///
/// `#[member(base)]` marks the field holding the embedded parent. Its type
/// must implement `Typed`. Members of the parent are reachable through the
/// child's ancestry. At most one field can be the base.
///
/// ## Skip
///
/// `#[member(skip)]` leaves a field out of the member list entirely.
///
/// ## Custom Type Path
///
/// ```rust
/// # use backfield_meta::{derive::Members, info::TypePath};
/// #[derive(Members)]
/// #[member(type_path = "bank::Account")]
/// struct Account {
///     id: u32,
/// }
///
/// assert_eq!(Account::type_path(), "bank::Account");
/// assert_eq!(Account::module_path(), Some("bank"));
/// ```
///
/// ## Auto Registration
///
/// `#[member(auto_register)]` submits the type to
/// `TypeRegistry::auto_register`. It is a no-op when the `auto_register`
/// feature is disabled.
///
/// ## Rejected Inputs
///
/// Generic types, enums, unions and tuple structs are rejected:
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// struct Wrapper<T> {
///     value: T,
/// }
/// ```
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// enum Shape {
///     Circle,
/// }
/// ```
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// union Bits {
///     int: u32,
///     float: f32,
/// }
/// ```
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// struct Meters(f32);
/// ```
///
/// So are more than one base:
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// # #[derive(Members)]
/// # struct Left { a: u8 }
/// # #[derive(Members)]
/// # struct Right { b: u8 }
/// #[derive(Members)]
/// struct Both {
///     #[member(base)]
///     left: Left,
///     #[member(base)]
///     right: Right,
/// }
/// ```
///
/// duplicate member names, synthesized ones included:
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// #[member(property(name = "size", ty = usize, get))]
/// struct Buffer {
///     #[member(property = "size", get)]
///     len: usize,
/// }
/// ```
///
/// `skip` together with `property` or `base`:
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// struct Cache {
///     #[member(skip, property = "hits", get)]
///     hits: u32,
/// }
/// ```
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// # #[derive(Members)]
/// # struct Parent { a: u8 }
/// #[derive(Members)]
/// struct Child {
///     #[member(skip, base)]
///     parent: Parent,
/// }
/// ```
///
/// `get` or `set` without `property`:
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// struct Counter {
///     #[member(get)]
///     count: u32,
/// }
/// ```
///
/// a property with neither accessor, on a field or at type level:
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// struct Counter {
///     #[member(property = "count")]
///     count: u32,
/// }
/// ```
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// #[member(property(name = "count", ty = u32))]
/// struct Counter {
///     _count: u32,
/// }
/// ```
///
/// and a property name that is not an identifier:
///
/// ```compile_fail
/// # use backfield_meta::derive::Members;
/// #[derive(Members)]
/// struct Counter {
///     #[member(property = "the count", get)]
///     count: u32,
/// }
/// ```
#[proc_macro_derive(Members, attributes(member))]
pub fn derive_members(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::MembersStruct::from_input(&ast) {
        Ok(info) => impls::impl_members(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Add the type to the automatic registry.
///
/// If the feature is not enabled, this macro will not do anything.
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(foo::Foo);
/// ```
///
/// This is not conflict with `member(auto_register)` attribute.
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        let ty = parse_macro_input!(_input as syn::Type);
        let meta_path = path::backfield_meta();
        impls::auto_register_tokens(&meta_path, &ty, proc_macro2::Span::call_site()).into()
    }
}
