use core::any::TypeId;

use foldhash::fast::FixedState;

use crate::info::{TypeInfo, Typed};

type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;
type HashSet<K> = hashbrown::HashSet<K, FixedState>;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of [`Typed`] types.
///
/// Registering a type also registers its bases.
///
/// # Example
///
/// ```
/// use backfield_meta::{derive::Members, registry::TypeRegistry};
///
/// #[derive(Members)]
/// #[member(type_path = "shop::Item")]
/// struct Item {
///     price: u32,
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Item>();
///
/// let info = registry.get_with_type_path("shop::Item").unwrap();
/// assert!(info.field("price").is_some());
/// assert!(registry.get_with_type_name("Item").is_some());
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<TypeId, &'static TypeInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry filled by [`auto_register`](Self::auto_register).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    /// Registers `info` without its bases.
    ///
    /// Returns `false` if the type was already present.
    pub fn register_info(&mut self, info: &'static TypeInfo) -> bool {
        let id = info.type_id();
        if self.types.contains_key(&id) {
            return false;
        }
        self.types.insert(id, info);

        let name = info.type_name();
        if !self.ambiguous_names.contains(name) {
            if self.type_name_to_id.remove(name).is_some() {
                log::debug!("type name `{name}` is ambiguous, use its full path instead");
                self.ambiguous_names.insert(name);
            } else {
                self.type_name_to_id.insert(name, id);
            }
        }

        // Full paths are assumed unique.
        self.type_path_to_id.insert(info.type_path(), id);
        true
    }

    /// Registers `T` and every type in its base chain.
    ///
    /// Already registered types are skipped, but their bases are still visited.
    pub fn register<T: Typed>(&mut self) {
        let info = T::type_info();
        self.register_info(info);
        for ancestor in info.ancestors() {
            self.register_info(ancestor);
        }
    }

    /// Registers all types annotated with `#[member(auto_register)]` or
    /// declared via `impl_auto_register!`.
    ///
    /// Returns `true` if automatic registration works on this platform.
    /// Repeated calls are cheap.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        use crate::__macro_exports::auto_register;

        if !self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
            auto_register::__register_types(self);
        }
        self.contains(TypeId::of::<auto_register::__AvailFlag>())
    }

    /// Always `false`: the `auto_register` feature is disabled.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.types.get(&type_id).copied()
    }

    /// Returns the [`TypeInfo`] registered under the full `type_path`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeInfo> {
        self.type_path_to_id
            .get(type_path)
            .and_then(|id| self.get(*id))
    }

    /// Returns the [`TypeInfo`] registered under the short `type_name`.
    ///
    /// `None` if the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeInfo> {
        self.type_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Whether `type_name` matches more than one registered type.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.types.values().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::derive::Members;
    use crate::info::{TypePath, Typed};

    mod foo {
        use crate::derive::Members;

        #[derive(Members)]
        pub struct Part {
            pub id: u32,
        }
    }

    mod bar {
        use crate::derive::Members;

        #[derive(Members)]
        pub struct Part {
            pub id: u64,
        }
    }

    #[derive(Members)]
    struct Engine {
        #[member(base)]
        part: foo::Part,
        power: u32,
    }

    #[derive(Members)]
    #[member(auto_register)]
    struct Registered {
        value: i8,
    }

    #[test]
    fn registers_bases() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Engine>();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(TypeId::of::<foo::Part>()));
        assert!(registry.get_with_type_name("Engine").is_some());

        // Already present: nothing changes.
        registry.register::<foo::Part>();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registers_bases_of_known_types() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.register_info(Engine::type_info()));
        assert_eq!(registry.len(), 1);

        registry.register::<Engine>();
        assert_eq!(registry.len(), 2);

        let path = <foo::Part as TypePath>::type_path();
        assert!(registry.get_with_type_path(path).is_some());
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = TypeRegistry::empty();
        registry.register::<foo::Part>();
        registry.register::<bar::Part>();

        assert!(registry.is_ambiguous("Part"));
        assert!(registry.get_with_type_name("Part").is_none());

        let path = <bar::Part as TypePath>::type_path();
        let info = registry.get_with_type_path(path).unwrap();
        assert!(info.field("id").unwrap().value_type().is::<u64>());
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register() {
        let mut registry = TypeRegistry::empty();
        if registry.auto_register() {
            assert!(registry.contains(TypeId::of::<Registered>()));
            assert!(!registry.contains(TypeId::of::<Engine>()));
        }
    }
}
