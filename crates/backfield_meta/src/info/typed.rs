use crate::info::{TypeInfo, TypePath};

/// A static accessor to compile-time member information.
///
/// Implemented by `#[derive(Members)]`. A manual implementation should keep
/// the info in a [`TypeInfoCell`](crate::cell::TypeInfoCell):
///
/// ```
/// use core::any::Any;
/// use backfield_meta::cell::TypeInfoCell;
/// use backfield_meta::info::{FieldAccess, FieldInfo, TypeInfo, TypePath, Typed, Visibility};
///
/// struct Point { x: i32 }
///
/// impl TypePath for Point {
///     fn type_path() -> &'static str { "demo::Point" }
///     fn type_name() -> &'static str { "Point" }
/// }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: TypeInfoCell = TypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::new::<Self>([FieldInfo::new::<Self, i32>(
///                 "x",
///                 Visibility::Private,
///                 FieldAccess::new(
///                     |s| s.downcast_ref::<Self>().map(|s| &s.x as &dyn Any),
///                     |s| s.downcast_mut::<Self>().map(|s| &mut s.x as &mut dyn Any),
///                 ),
///             ).into()])
///         })
///     }
/// }
///
/// assert_eq!(Point::type_info().field("x").unwrap().name(), "x");
/// ```
pub trait Typed: TypePath {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}
