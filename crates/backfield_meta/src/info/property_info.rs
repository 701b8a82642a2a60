use alloc::format;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::info::{Type, TypeInfo, Typed, Visibility};

/// The name under which `#[derive(Members)]` registers the storage of the
/// auto-property `property`.
///
/// The name is `<property>$backing`. It can never be spelled as a Rust
/// identifier, so it never collides with a declared field.
///
/// ```
/// assert_eq!(backfield_meta::auto_backing_name("len"), "<len>$backing");
/// ```
pub fn auto_backing_name(property: &str) -> String {
    format!("<{property}>$backing")
}

/// Information for a computed property: a named get/set pair with its own
/// declared access policy.
///
/// An absent accessor is `None`.
///
/// # Examples
///
/// ```
/// use backfield_meta::{derive::Members, info::{Typed, Visibility}};
///
/// #[derive(Members)]
/// #[member(property(name = "label", ty = String, get, set(private)))]
/// struct Foo {
///     _label: String,
/// }
///
/// let label = Foo::type_info().property("label").unwrap();
/// assert!(label.can_read());
/// assert!(!label.can_write());
/// assert_eq!(label.setter(), Some(Visibility::Private));
/// assert!(!label.is_auto());
/// ```
#[derive(Clone)]
pub struct PropertyInfo {
    name: &'static str,
    declaring: Type,
    declaring_info: fn() -> &'static TypeInfo,
    value: Type,
    getter: Option<Visibility>,
    setter: Option<Visibility>,
    auto: bool,
}

impl PropertyInfo {
    /// Creates a [`PropertyInfo`] with neither getter nor setter.
    pub fn new<S: Typed, V: Any>(name: &'static str) -> Self {
        Self {
            name,
            declaring: Type::of::<S>(),
            declaring_info: S::type_info,
            value: Type::of_any::<V>(),
            getter: None,
            setter: None,
            auto: false,
        }
    }

    #[inline]
    pub fn with_getter(mut self, visibility: Visibility) -> Self {
        self.getter = Some(visibility);
        self
    }

    #[inline]
    pub fn with_setter(mut self, visibility: Visibility) -> Self {
        self.setter = Some(visibility);
        self
    }

    /// Marks the property as backed by a synthesized field, see [`auto_backing_name`].
    #[inline]
    pub fn with_auto_backing(mut self) -> Self {
        self.auto = true;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn declaring(&self) -> Type {
        self.declaring
    }

    /// The info of the declaring type, where the storage is looked up.
    #[inline]
    pub fn declaring_info(&self) -> &'static TypeInfo {
        (self.declaring_info)()
    }

    #[inline]
    pub const fn value_type(&self) -> Type {
        self.value
    }

    #[inline]
    pub const fn getter(&self) -> Option<Visibility> {
        self.getter
    }

    #[inline]
    pub const fn setter(&self) -> Option<Visibility> {
        self.setter
    }

    /// Whether the declared policy allows reading from outside the type.
    #[inline]
    pub fn can_read(&self) -> bool {
        self.getter.is_some_and(Visibility::is_public)
    }

    /// Whether the declared policy allows writing from outside the type.
    #[inline]
    pub fn can_write(&self) -> bool {
        self.setter.is_some_and(Visibility::is_public)
    }

    #[inline]
    pub const fn is_auto(&self) -> bool {
        self.auto
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("declaring", &self.declaring)
            .field("value", &self.value)
            .field("getter", &self.getter)
            .field("setter", &self.setter)
            .field("auto", &self.auto)
            .finish()
    }
}
