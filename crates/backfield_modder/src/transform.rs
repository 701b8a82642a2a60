use alloc::borrow::{Cow, ToOwned};
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

// -----------------------------------------------------------------------------
// NameTransform

/// Maps a property name to the name of a field that might store it.
///
/// Transforms are pure and are tried in order by a [`Modder`](crate::Modder).
///
/// ```
/// use backfield_modder::NameTransform;
///
/// assert_eq!(NameTransform::auto_backing().apply("size"), "<size>$backing");
/// assert_eq!(NameTransform::underscore_prefix().apply("size"), "_size");
/// assert_eq!(NameTransform::prefixed("m_").apply("size"), "m_size");
///
/// let upper = NameTransform::from_fn("upper", |name| name.to_uppercase());
/// assert_eq!(upper.apply("size"), "SIZE");
/// assert_eq!(upper.label(), "upper");
/// ```
#[derive(Clone)]
pub struct NameTransform {
    label: Cow<'static, str>,
    func: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl NameTransform {
    /// Creates a transform from a closure; `label` only shows up in logs and `Debug`.
    pub fn from_fn(
        label: impl Into<Cow<'static, str>>,
        func: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// The storage `#[derive(Members)]` synthesizes for an auto-property.
    ///
    /// This is the only transform of [`Modder::shared`](crate::Modder::shared).
    pub fn auto_backing() -> Self {
        Self::from_fn("auto_backing", backfield_meta::auto_backing_name)
    }

    /// `name` to `_name`.
    pub fn underscore_prefix() -> Self {
        Self::from_fn("underscore_prefix", |name| format!("_{name}"))
    }

    pub fn prefixed(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self::from_fn(format!("prefixed({prefix})"), move |name| {
            format!("{prefix}{name}")
        })
    }

    pub fn suffixed(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self::from_fn(format!("suffixed({suffix})"), move |name| {
            format!("{name}{suffix}")
        })
    }

    /// The property name itself.
    pub fn identity() -> Self {
        Self::from_fn("identity", |name| name.to_owned())
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The candidate field name for `property`.
    #[inline]
    pub fn apply(&self, property: &str) -> String {
        (self.func)(property)
    }
}

impl fmt::Debug for NameTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NameTransform").field(&self.label).finish()
    }
}
