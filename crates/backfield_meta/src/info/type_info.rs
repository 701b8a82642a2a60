use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{FieldAccess, FieldInfo, MemberInfo, PropertyInfo, Type, TypePath};

// -----------------------------------------------------------------------------
// BaseInfo

/// The embedded parent of a type, marked with `#[member(base)]`.
///
/// Rust has no inheritance; a type "extends" its base by holding it in a
/// field. The projections here move from an instance to that field.
#[derive(Clone)]
pub struct BaseInfo {
    field: &'static str,
    type_info: fn() -> &'static TypeInfo,
    upcast: FieldAccess,
}

impl BaseInfo {
    #[inline]
    pub const fn new(
        field: &'static str,
        type_info: fn() -> &'static TypeInfo,
        upcast: FieldAccess,
    ) -> Self {
        Self {
            field,
            type_info,
            upcast,
        }
    }

    /// Name of the field holding the base.
    #[inline]
    pub const fn field_name(&self) -> &'static str {
        self.field
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub fn upcast<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
        self.upcast.get(instance)
    }

    #[inline]
    pub fn upcast_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.upcast.get_mut(instance)
    }
}

impl fmt::Debug for BaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseInfo")
            .field("field", &self.field)
            .field("type", &self.type_info().ty())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// The members declared directly on a type, in declaration order.
///
/// An auto-property is listed right before its backing field.
///
/// # Examples
///
/// ```
/// use backfield_meta::{derive::Members, info::Typed};
///
/// #[derive(Members)]
/// struct Shape {
///     sides: u8,
/// }
///
/// #[derive(Members)]
/// struct Square {
///     #[member(base)]
///     shape: Shape,
///     #[member(property = "side", get, set)]
///     side: f32,
/// }
///
/// let info = Square::type_info();
/// assert_eq!(info.type_name(), "Square");
/// assert!(info.is_subtype_of(core::any::TypeId::of::<Shape>()));
///
/// // `sides` is inherited from `Shape`.
/// assert!(info.member("sides").is_none());
/// assert_eq!(info.find_member("sides").unwrap().declaring().name(), "Shape");
/// ```
#[derive(Clone)]
pub struct TypeInfo {
    ty: Type,
    members: Box<[MemberInfo]>,
    base: Option<BaseInfo>,
}

impl TypeInfo {
    /// Creates a new [`TypeInfo`]; the member order is kept as given.
    pub fn new<T: TypePath>(members: impl IntoIterator<Item = MemberInfo>) -> Self {
        Self {
            ty: Type::of::<T>(),
            members: members.into_iter().collect(),
            base: None,
        }
    }

    #[inline]
    pub fn with_base(mut self, base: BaseInfo) -> Self {
        self.base = Some(base);
        self
    }

    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// All members declared directly on this type, in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// The first member declared directly on this type named `name`.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// The field declared directly on this type named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields().find(|f| f.name() == name)
    }

    /// The property declared directly on this type named `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties().find(|p| p.name() == name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.members.iter().filter_map(MemberInfo::as_field)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.members.iter().filter_map(MemberInfo::as_property)
    }

    #[inline]
    pub fn base(&self) -> Option<&BaseInfo> {
        self.base.as_ref()
    }

    /// The chain of bases, nearest first, excluding this type.
    #[inline]
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: self.base.as_ref().map(BaseInfo::type_info),
        }
    }

    /// Whether `id` is this type or one of its ancestors.
    pub fn is_subtype_of(&self, id: TypeId) -> bool {
        self.ty.id() == id || self.ancestors().any(|info| info.type_id() == id)
    }

    /// Looks `name` up on this type, then on each ancestor.
    pub fn find_member(&self, name: &str) -> Option<&MemberInfo> {
        self.member(name)
            .or_else(|| self.ancestors().find_map(|info| info.member(name)))
    }

    /// Walks from `instance` (of this type) through the base fields until
    /// reaching a value of type `target`.
    pub fn project<'a>(&self, instance: &'a dyn Any, target: TypeId) -> Option<&'a dyn Any> {
        if (*instance).type_id() == target {
            return Some(instance);
        }
        let base = self.base.as_ref()?;
        let parent = base.upcast(instance)?;
        base.type_info().project(parent, target)
    }

    /// Mutable version of [`project`](Self::project).
    pub fn project_mut<'a>(
        &self,
        instance: &'a mut dyn Any,
        target: TypeId,
    ) -> Option<&'a mut dyn Any> {
        if (*instance).type_id() == target {
            return Some(instance);
        }
        let base = self.base.as_ref()?;
        let parent = base.upcast_mut(instance)?;
        base.type_info().project_mut(parent, target)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("ty", &self.ty)
            .field("members", &self.members)
            .field("base", &self.base)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Ancestors

/// Iterator over the bases of a type, see [`TypeInfo::ancestors`].
#[derive(Clone)]
pub struct Ancestors {
    next: Option<&'static TypeInfo>,
}

impl Iterator for Ancestors {
    type Item = &'static TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base().map(BaseInfo::type_info);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use crate::derive::Members;
    use crate::info::{MemberKind, Typed, Visibility};

    #[derive(Members, Default)]
    struct Animal {
        pub name: String,
    }

    #[derive(Members, Default)]
    struct Dog {
        #[member(base)]
        animal: Animal,
        #[member(property = "good", get, set(private))]
        good: bool,
        #[member(skip)]
        _cache: Vec<u8>,
    }

    #[derive(Members, Default)]
    struct Puppy {
        #[member(base)]
        dog: Dog,
        age: u8,
    }

    #[test]
    fn declaration_order() {
        let names: Vec<_> = Dog::type_info().members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["animal", "good", "<good>$backing"]);

        let kinds: Vec<_> = Dog::type_info().members().iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            [MemberKind::Field, MemberKind::Property, MemberKind::Field]
        );
    }

    #[test]
    fn property_policy() {
        let good = Dog::type_info().property("good").unwrap();
        assert!(good.is_auto());
        assert_eq!(good.getter(), Some(Visibility::Public));
        assert_eq!(good.setter(), Some(Visibility::Private));
        assert!(good.value_type().is::<bool>());
        assert_eq!(Animal::type_info().field("name").unwrap().visibility(), Visibility::Public);
    }

    #[test]
    fn ancestry() {
        let info = Puppy::type_info();
        let chain: Vec<_> = info.ancestors().map(|i| i.type_name()).collect();
        assert_eq!(chain, ["Dog", "Animal"]);

        assert!(info.is_subtype_of(TypeId::of::<Animal>()));
        assert!(!Animal::type_info().is_subtype_of(TypeId::of::<Puppy>()));

        let name = info.find_member("name").unwrap();
        assert!(name.declaring().is::<Animal>());
    }

    #[test]
    fn projection() {
        let mut puppy = Puppy::default();
        let info = Puppy::type_info();

        let animal = info
            .project_mut(&mut puppy, TypeId::of::<Animal>())
            .and_then(|a| a.downcast_mut::<Animal>())
            .unwrap();
        animal.name.push_str("rex");
        assert_eq!(puppy.dog.animal.name, "rex");

        assert!(info.project(&puppy, TypeId::of::<String>()).is_none());
        assert!(info.project(&puppy.dog, TypeId::of::<Animal>()).is_none());
    }
}
