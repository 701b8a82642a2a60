use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::Any;
use std::sync::LazyLock;

use backfield_meta::info::{FieldInfo, MemberInfo, TypeInfo, Typed};
use backfield_meta::registry::TypeRegistry;

use crate::locator::{self, LocateError, Selector};
use crate::{EasyField, NameTransform, UntypedField};

// -----------------------------------------------------------------------------
// Modder

/// Resolves members to the field that stores them and binds accessors to it.
///
/// A field resolves to itself. A property is looked up on its declaring
/// type: each transform maps the property name to a candidate field name,
/// and the first candidate naming a field declared there wins.
///
/// The transforms are fixed at construction.
///
/// ```
/// use backfield_meta::{derive::Members, info::Typed};
/// use backfield_modder::{Modder, NameTransform};
///
/// #[derive(Members)]
/// #[member(property(name = "len", ty = usize, get))]
/// struct Buffer {
///     _len: usize,
/// }
///
/// let len = Buffer::type_info().member("len").unwrap();
/// assert!(Modder::shared().try_resolve(len).is_none());
///
/// let modder = Modder::new([NameTransform::auto_backing(), NameTransform::underscore_prefix()]);
/// assert_eq!(modder.try_resolve(len).unwrap().name(), "_len");
/// ```
#[derive(Debug, Clone)]
pub struct Modder {
    transforms: Box<[NameTransform]>,
}

impl Default for Modder {
    /// The configuration of [`Modder::shared`].
    fn default() -> Self {
        Self::new([NameTransform::auto_backing()])
    }
}

impl Modder {
    /// Creates a [`Modder`] trying `transforms` in the given order.
    pub fn new(transforms: impl IntoIterator<Item = NameTransform>) -> Self {
        Self {
            transforms: transforms.into_iter().collect(),
        }
    }

    /// The process-wide default, resolving auto-properties only.
    pub fn shared() -> &'static Modder {
        static SHARED: LazyLock<Modder> = LazyLock::new(Modder::default);
        &SHARED
    }

    #[inline]
    pub fn transforms(&self) -> &[NameTransform] {
        &self.transforms
    }

    /// The field storing `member`, or `None` if no transform finds one.
    pub fn try_resolve(&self, member: &'static MemberInfo) -> Option<&'static FieldInfo> {
        let property = match member {
            MemberInfo::Field(field) => return Some(field),
            MemberInfo::Property(property) => property,
        };
        let declaring = property.declaring_info();

        for transform in &self.transforms {
            let candidate = transform.apply(property.name());
            log::trace!(
                "`{}::{}`: trying `{candidate}` ({})",
                declaring.type_path(),
                property.name(),
                transform.label(),
            );
            if let Some(field) = declaring.field(&candidate) {
                log::debug!(
                    "`{}::{}` is stored in `{}` ({})",
                    declaring.type_path(),
                    property.name(),
                    field.name(),
                    transform.label(),
                );
                return Some(field);
            }
        }

        log::debug!(
            "`{}::{}`: no storage found by {} transform(s)",
            declaring.type_path(),
            property.name(),
            self.transforms.len(),
        );
        None
    }

    /// Binds a typed accessor to the storage of `member`.
    ///
    /// `member` must be declared on `T` or one of its bases. `Ok(None)` means
    /// no storage was found. A `V` that is not the stored type is reported
    /// by the accessor itself.
    pub fn try_get<T: Typed, V: Any + Clone>(
        &self,
        member: &'static MemberInfo,
    ) -> Result<Option<EasyField<T, V>>, LocateError> {
        locator::check_member::<T>(member)?;
        Ok(self.try_resolve(member).map(EasyField::bind))
    }

    /// [`try_get`](Self::try_get) for the member named by `selector`.
    pub fn try_get_selected<T: Typed, V: Any + Clone>(
        &self,
        selector: &Selector<T>,
    ) -> Result<Option<EasyField<T, V>>, LocateError> {
        let member = locator::resolve_member(selector)?;
        self.try_get(member)
    }

    /// [`try_get`](Self::try_get) for a source type known only at runtime.
    pub fn try_get_untyped(
        &self,
        source: &'static TypeInfo,
        member: &'static MemberInfo,
    ) -> Result<Option<UntypedField>, LocateError> {
        locator::check_member_in(source, member)?;
        Ok(self
            .try_resolve(member)
            .map(|field| UntypedField::new(source, field)))
    }

    /// Looks `type_path` up in `registry`, then binds the member named
    /// `member` of that type or of one of its bases.
    pub fn try_get_by_path(
        &self,
        registry: &TypeRegistry,
        type_path: &str,
        member: &str,
    ) -> Result<Option<UntypedField>, LocateError> {
        let source = registry
            .get_with_type_path(type_path)
            .ok_or_else(|| LocateError::UnknownType(type_path.to_string()))?;
        let member = source
            .find_member(member)
            .ok_or_else(|| LocateError::UnknownMember {
                ty: source.type_path(),
                member: member.to_string(),
            })?;
        self.try_get_untyped(source, member)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::ptr;

    use backfield_meta::AccessError;
    use backfield_meta::derive::Members;
    use backfield_meta::info::{TypePath, Typed};
    use backfield_meta::registry::TypeRegistry;

    use super::Modder;
    use crate::{LocateError, NameTransform, selector};

    const VALUE: &str = "test";

    #[derive(Members, Default)]
    #[member(property(name = "custom_backing", ty = String, get, set))]
    struct ExampleClass {
        #[member(property = "get_set", get, set)]
        get_set: String,
        #[member(property = "get_only", get)]
        get_only: String,
        #[member(property = "set_only", get(private), set)]
        set_only: String,
        _custom_backing: String,
    }

    impl ExampleClass {
        fn set_only_value(&self) -> &str {
            &self.set_only
        }
    }

    #[derive(Members, Default)]
    struct Derived {
        #[member(base)]
        base: ExampleClass,
        extra: u8,
    }

    #[derive(Members, Default)]
    struct Unrelated {
        value: String,
    }

    #[derive(Members, Default)]
    struct Tagged {
        #[member(property = "r#type", get)]
        kind: String,
    }

    fn failing() -> Modder {
        Modder::new([NameTransform::from_fn("empty", |_| String::new())])
    }

    #[test]
    fn field_resolves_to_itself() {
        let member = ExampleClass::type_info().member("_custom_backing").unwrap();
        let field = member.as_field().unwrap();

        for modder in [Modder::default(), failing(), Modder::new(Vec::new())] {
            assert!(ptr::eq(modder.try_resolve(member).unwrap(), field));
        }
    }

    #[test]
    fn gets_and_sets_get_set() {
        let field = Modder::shared()
            .try_get_selected::<ExampleClass, String>(&selector!(|e: ExampleClass| e.get_set))
            .unwrap()
            .unwrap();
        assert_eq!(field.field().name(), "<get_set>$backing");

        let mut instance = ExampleClass::default();
        field.set(&mut instance, VALUE.to_string()).unwrap();
        assert_eq!(field.get(&instance).unwrap(), VALUE);
        assert_eq!(instance.get_set, VALUE);
    }

    #[test]
    fn gets_and_sets_get_only() {
        let field = Modder::shared()
            .try_get_selected::<ExampleClass, String>(&selector!(|e: ExampleClass| e.get_only))
            .unwrap()
            .unwrap();

        let mut instance = ExampleClass::default();
        field.set(&mut instance, VALUE.to_string()).unwrap();
        assert_eq!(field.get(&instance).unwrap(), VALUE);
        assert_eq!(instance.get_only, VALUE);
    }

    #[test]
    fn gets_and_sets_set_only() {
        let member = ExampleClass::type_info().member("set_only").unwrap();
        let property = member.as_property().unwrap();
        assert!(!property.can_read());
        assert!(property.can_write());

        let field = Modder::shared()
            .try_get::<ExampleClass, String>(member)
            .unwrap()
            .unwrap();

        let mut instance = ExampleClass::default();
        field.set(&mut instance, VALUE.to_string()).unwrap();
        assert_eq!(field.get(&instance).unwrap(), VALUE);
        assert_eq!(instance.set_only_value(), VALUE);
    }

    #[test]
    fn finds_custom_backing() {
        let selector = selector!(|e: ExampleClass| e.custom_backing);

        let missing = Modder::shared().try_get_selected::<ExampleClass, String>(&selector);
        assert!(missing.unwrap().is_none());

        let modder = Modder::new([NameTransform::auto_backing(), NameTransform::underscore_prefix()]);
        let field = modder
            .try_get_selected::<ExampleClass, String>(&selector)
            .unwrap()
            .unwrap();

        let mut instance = ExampleClass::default();
        assert!(instance._custom_backing.is_empty());

        field.set(&mut instance, VALUE.to_string()).unwrap();
        assert_eq!(field.get(&instance).unwrap(), VALUE);
        assert_eq!(instance._custom_backing, VALUE);
    }

    #[test]
    fn does_fail() {
        let modder = failing();
        for property in ExampleClass::type_info().properties() {
            let member = ExampleClass::type_info().member(property.name()).unwrap();
            assert!(modder.try_resolve(member).is_none(), "{}", property.name());
            assert!(modder.try_get::<ExampleClass, String>(member).unwrap().is_none());
        }
    }

    #[test]
    fn accessors_are_independent() {
        let selector = selector!(|e: ExampleClass| e.get_set);
        let mut first = Modder::shared()
            .try_get_selected::<ExampleClass, String>(&selector)
            .unwrap()
            .unwrap();
        let second = Modder::shared()
            .try_get_selected::<ExampleClass, String>(&selector)
            .unwrap()
            .unwrap();
        let cloned = first.clone();
        assert!(ptr::eq(first.field(), second.field()));

        let mut instance = ExampleClass::default();
        first.set(&mut instance, VALUE.to_string()).unwrap();

        first.replace_getter(|_| Ok("xP".to_string()));
        assert_eq!(first.get(&instance).unwrap(), "xP");
        assert_eq!(second.get(&instance).unwrap(), VALUE);
        assert_eq!(cloned.get(&instance).unwrap(), VALUE);
        assert_eq!(instance.get_set, VALUE);

        first.replace_setter(|_, _| Ok(()));
        first.set(&mut instance, "ignored".to_string()).unwrap();
        assert_eq!(instance.get_set, VALUE);
    }

    #[test]
    fn value_type_mismatch_on_use() {
        let member = ExampleClass::type_info().member("get_set").unwrap();
        let field = Modder::shared()
            .try_get::<ExampleClass, u32>(member)
            .unwrap()
            .unwrap();

        let mut instance = ExampleClass::default();
        assert!(matches!(field.get(&instance), Err(AccessError::TypeMismatch { .. })));
        assert!(matches!(field.set(&mut instance, 1), Err(AccessError::TypeMismatch { .. })));
    }

    #[test]
    fn rejects_foreign_members() {
        let member = ExampleClass::type_info().member("get_set").unwrap();
        let err = Modder::shared()
            .try_get::<Unrelated, String>(member)
            .unwrap_err();
        assert!(matches!(err, LocateError::TypeMismatch { member: "get_set", .. }));

        let err = Modder::shared()
            .try_get_selected::<ExampleClass, usize>(&selector!(|e: ExampleClass| e.get_set.len()))
            .unwrap_err();
        assert!(matches!(err, LocateError::NotMemberAccess(_)));
    }

    #[test]
    fn resolves_inherited_members() {
        let field = Modder::shared()
            .try_get_selected::<Derived, String>(&selector!(|e: Derived| e.get_only))
            .unwrap()
            .unwrap();
        assert!(field.field().declaring().is::<ExampleClass>());

        let mut derived = Derived::default();
        field.set(&mut derived, VALUE.to_string()).unwrap();
        assert_eq!(field.get(&derived).unwrap(), VALUE);
        assert_eq!(derived.base.get_only, VALUE);
        assert_eq!(derived.extra, 0);
    }

    #[test]
    fn untyped_access() {
        let member = ExampleClass::type_info().member("get_only").unwrap();
        let field = Modder::shared()
            .try_get_untyped(ExampleClass::type_info(), member)
            .unwrap()
            .unwrap();

        let mut instance = ExampleClass::default();
        field.set(&mut instance, Box::new(VALUE.to_string())).unwrap();
        assert_eq!(field.get_as::<String>(&instance).unwrap(), VALUE);
        assert_eq!(
            field.get(&instance).unwrap().downcast_ref::<String>().unwrap(),
            VALUE
        );

        assert!(matches!(
            field.set(&mut instance, Box::new(1_u32)),
            Err(AccessError::ValueMismatch { .. })
        ));

        let mut other = Unrelated::default();
        assert!(matches!(
            field.get_mut(&mut other),
            Err(AccessError::InstanceMismatch { .. })
        ));
        assert!(other.value.is_empty());
    }

    #[test]
    fn by_type_path() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Derived>();

        let field = Modder::shared()
            .try_get_by_path(&registry, Derived::type_path(), "get_set")
            .unwrap()
            .unwrap();
        let mut derived = Derived::default();
        field.set(&mut derived, Box::new(VALUE.to_string())).unwrap();
        assert_eq!(derived.base.get_set, VALUE);

        let err = Modder::shared()
            .try_get_by_path(&registry, "nowhere::Nothing", "get_set")
            .unwrap_err();
        assert_eq!(err, LocateError::UnknownType("nowhere::Nothing".to_string()));

        let err = Modder::shared()
            .try_get_by_path(&registry, Derived::type_path(), "missing")
            .unwrap_err();
        assert!(matches!(err, LocateError::UnknownMember { .. }));
    }

    #[test]
    fn raw_property_names() {
        let names: Vec<_> = Tagged::type_info().members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["type", "<type>$backing"]);

        let field = Modder::shared()
            .try_get_selected::<Tagged, String>(&selector!(|t: Tagged| t.r#type))
            .unwrap()
            .unwrap();

        let mut tagged = Tagged::default();
        field.set(&mut tagged, VALUE.to_string()).unwrap();
        assert_eq!(tagged.kind, VALUE);
    }

    #[test]
    fn shared_configuration() {
        let labels: Vec<_> = Modder::shared().transforms().iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["auto_backing"]);
        assert_eq!(Modder::default().transforms().len(), 1);
    }
}
