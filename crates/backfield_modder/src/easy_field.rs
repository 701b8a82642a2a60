use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use backfield_meta::AccessError;
use backfield_meta::info::{FieldInfo, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// UntypedField

/// A storage location bound to a source type, used through `dyn Any`.
///
/// The location may be declared on a base of the source type. Instances
/// of the source type are projected onto that base before access, and
/// instances of the declaring type itself are accepted as they are.
#[derive(Clone, Copy)]
pub struct UntypedField {
    source: &'static TypeInfo,
    field: &'static FieldInfo,
}

impl UntypedField {
    /// Binds `field` to `source`.
    ///
    /// `field` should be declared on `source` or one of its bases. If it is
    /// not, every access fails with [`AccessError::InstanceMismatch`].
    #[inline]
    pub const fn new(source: &'static TypeInfo, field: &'static FieldInfo) -> Self {
        Self { source, field }
    }

    #[inline]
    pub const fn source(&self) -> &'static TypeInfo {
        self.source
    }

    #[inline]
    pub const fn field(&self) -> &'static FieldInfo {
        self.field
    }

    fn instance_mismatch(&self) -> AccessError {
        AccessError::InstanceMismatch {
            field: self.field.name(),
            declaring: self.field.declaring().path(),
        }
    }

    fn project<'a>(&self, instance: &'a dyn Any) -> Result<&'a dyn Any, AccessError> {
        self.source
            .project(instance, self.field.declaring().id())
            .ok_or_else(|| self.instance_mismatch())
    }

    fn project_mut<'a>(&self, instance: &'a mut dyn Any) -> Result<&'a mut dyn Any, AccessError> {
        let mismatch = self.instance_mismatch();
        self.source
            .project_mut(instance, self.field.declaring().id())
            .ok_or(mismatch)
    }

    pub fn get<'a>(&self, instance: &'a dyn Any) -> Result<&'a dyn Any, AccessError> {
        self.field.get(self.project(instance)?)
    }

    pub fn get_mut<'a>(&self, instance: &'a mut dyn Any) -> Result<&'a mut dyn Any, AccessError> {
        self.field.get_mut(self.project_mut(instance)?)
    }

    /// Stores `value`, which must be of the field's value type.
    pub fn set(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        self.field.set(self.project_mut(instance)?, value)
    }

    pub fn get_as<'a, V: Any>(&self, instance: &'a dyn Any) -> Result<&'a V, AccessError> {
        self.field.get_as(self.project(instance)?)
    }

    pub fn get_mut_as<'a, V: Any>(&self, instance: &'a mut dyn Any) -> Result<&'a mut V, AccessError> {
        self.field.get_mut_as(self.project_mut(instance)?)
    }
}

impl fmt::Debug for UntypedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UntypedField")
            .field("source", &self.source.ty())
            .field("field", &self.field.name())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// EasyField

type Getter<T, V> = Arc<dyn Fn(&T) -> Result<V, AccessError> + Send + Sync>;
type Setter<T, V> = Arc<dyn Fn(&mut T, V) -> Result<(), AccessError> + Send + Sync>;

/// A typed get/set pair bound to one storage location of `T`.
///
/// Created by [`Modder::try_get`](crate::Modder::try_get). [`get`](Self::get)
/// and [`set`](Self::set) go through the bound closures, which can be
/// swapped with [`replace_getter`](Self::replace_getter) and
/// [`replace_setter`](Self::replace_setter). Cloning gives an independent
/// accessor with the same binding.
///
/// ```
/// use backfield_meta::derive::Members;
/// use backfield_modder::{Modder, selector};
///
/// #[derive(Members, Default)]
/// struct Counter {
///     #[member(property = "count", get)]
///     count: u32,
/// }
///
/// let mut field = Modder::shared()
///     .try_get_selected::<Counter, u32>(&selector!(|c: Counter| c.count))
///     .unwrap()
///     .unwrap();
///
/// let mut counter = Counter::default();
/// field.set(&mut counter, 3).unwrap();
/// *field.get_mut(&mut counter).unwrap() += 1;
/// assert_eq!(field.get(&counter).unwrap(), 4);
///
/// field.replace_getter(|_| Ok(0));
/// assert_eq!(field.get(&counter).unwrap(), 0);
/// assert_eq!(*field.get_ref(&counter).unwrap(), 4);
/// ```
pub struct EasyField<T, V> {
    untyped: UntypedField,
    getter: Getter<T, V>,
    setter: Setter<T, V>,
}

impl<T: Typed, V: Any + Clone> EasyField<T, V> {
    /// Binds `field`, declared on `T` or one of its bases, to `T`.
    ///
    /// The default getter clones the stored value. A value type other than
    /// `V` is reported as [`AccessError::TypeMismatch`] on first use.
    pub fn bind(field: &'static FieldInfo) -> Self {
        let untyped = UntypedField::new(T::type_info(), field);
        Self {
            untyped,
            getter: Arc::new(move |instance: &T| untyped.get_as::<V>(instance).cloned()),
            setter: Arc::new(move |instance: &mut T, value: V| {
                *untyped.get_mut_as::<V>(instance)? = value;
                Ok(())
            }),
        }
    }
}

impl<T: 'static, V: 'static> EasyField<T, V> {
    /// Reads through the getter.
    #[inline]
    pub fn get(&self, instance: &T) -> Result<V, AccessError> {
        (self.getter)(instance)
    }

    /// Writes through the setter.
    #[inline]
    pub fn set(&self, instance: &mut T, value: V) -> Result<(), AccessError> {
        (self.setter)(instance, value)
    }

    /// Borrows the slot directly, skipping the getter.
    #[inline]
    pub fn get_ref<'a>(&self, instance: &'a T) -> Result<&'a V, AccessError> {
        self.untyped.get_as(instance)
    }

    /// Mutably borrows the slot directly, skipping the setter.
    #[inline]
    pub fn get_mut<'a>(&self, instance: &'a mut T) -> Result<&'a mut V, AccessError> {
        self.untyped.get_mut_as(instance)
    }

    /// Replaces the getter of this accessor only.
    pub fn replace_getter(
        &mut self,
        getter: impl Fn(&T) -> Result<V, AccessError> + Send + Sync + 'static,
    ) {
        self.getter = Arc::new(getter);
    }

    /// Replaces the setter of this accessor only.
    pub fn replace_setter(
        &mut self,
        setter: impl Fn(&mut T, V) -> Result<(), AccessError> + Send + Sync + 'static,
    ) {
        self.setter = Arc::new(setter);
    }

    #[inline]
    pub fn field(&self) -> &'static FieldInfo {
        self.untyped.field()
    }

    /// The info of `T`.
    #[inline]
    pub fn source(&self) -> &'static TypeInfo {
        self.untyped.source()
    }

    /// The same location without the static types or the closures.
    #[inline]
    pub fn to_untyped(&self) -> UntypedField {
        self.untyped
    }
}

impl<T, V> Clone for EasyField<T, V> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped,
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<T, V> fmt::Debug for EasyField<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EasyField")
            .field("source", &self.untyped.source.ty())
            .field("field", &self.untyped.field.name())
            .finish_non_exhaustive()
    }
}
