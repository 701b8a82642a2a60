use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::AccessError;
use crate::info::{Type, TypePath, Visibility};

// -----------------------------------------------------------------------------
// FieldAccess

/// Direct, type-erased access to one storage location.
///
/// Both projections take an instance of the declaring type and return `None`
/// for anything else. They ignore the field's declared visibility.
#[derive(Clone, Copy)]
pub struct FieldAccess {
    get: fn(&dyn Any) -> Option<&dyn Any>,
    get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
}

impl FieldAccess {
    #[inline]
    pub const fn new(
        get: fn(&dyn Any) -> Option<&dyn Any>,
        get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    ) -> Self {
        Self { get, get_mut }
    }

    #[inline]
    pub fn get<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(instance)
    }

    #[inline]
    pub fn get_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.get_mut)(instance)
    }
}

impl fmt::Debug for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldAccess")
    }
}

// Moves a boxed value into a slot of type `V`, returning `false` when either side is not a `V`.
fn replace_slot<V: Any>(slot: &mut dyn Any, value: Box<dyn Any>) -> bool {
    let Some(slot) = slot.downcast_mut::<V>() else {
        return false;
    };
    match value.downcast::<V>() {
        Ok(value) => {
            *slot = *value;
            true
        }
        Err(_) => false,
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// Information for a storage location.
///
/// For the backing field of an auto-property the name is the synthesized
/// one, see [`auto_backing_name`](crate::auto_backing_name).
///
/// # Examples
///
/// ```
/// use backfield_meta::{derive::Members, info::{Typed, Visibility}};
///
/// #[derive(Members)]
/// struct Foo {
///     count: u32,
/// }
///
/// let field = Foo::type_info().field("count").unwrap();
/// assert!(field.value_type().is::<u32>());
/// assert_eq!(field.visibility(), Visibility::Private);
///
/// let mut foo = Foo { count: 1 };
/// *field.get_mut_as::<u32>(&mut foo).unwrap() += 1;
/// assert_eq!(*field.get_as::<u32>(&foo).unwrap(), 2);
/// ```
#[derive(Clone)]
pub struct FieldInfo {
    name: &'static str,
    declaring: Type,
    value: Type,
    visibility: Visibility,
    access: FieldAccess,
    replace: fn(&mut dyn Any, Box<dyn Any>) -> bool,
}

impl FieldInfo {
    /// Creates a [`FieldInfo`] for a field of type `V` declared on `S`.
    pub fn new<S: TypePath, V: Any>(
        name: &'static str,
        visibility: Visibility,
        access: FieldAccess,
    ) -> Self {
        Self {
            name,
            declaring: Type::of::<S>(),
            value: Type::of_any::<V>(),
            visibility,
            access,
            replace: replace_slot::<V>,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn declaring(&self) -> Type {
        self.declaring
    }

    #[inline]
    pub const fn value_type(&self) -> Type {
        self.value
    }

    /// The declared visibility; not enforced by any access method.
    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn access(&self) -> &FieldAccess {
        &self.access
    }

    /// Check if the field holds a `V`.
    #[inline]
    pub fn value_is<V: Any>(&self) -> bool {
        self.value.id() == TypeId::of::<V>()
    }

    #[inline]
    fn instance_mismatch(&self) -> AccessError {
        AccessError::InstanceMismatch {
            field: self.name,
            declaring: self.declaring.path(),
        }
    }

    #[inline]
    fn type_mismatch<V: Any>(&self) -> AccessError {
        AccessError::TypeMismatch {
            field: self.name,
            expected: core::any::type_name::<V>(),
            found: self.value.path(),
        }
    }

    /// Reads the slot of `instance`, which must be of the declaring type.
    pub fn get<'a>(&self, instance: &'a dyn Any) -> Result<&'a dyn Any, AccessError> {
        self.access
            .get(instance)
            .ok_or_else(|| self.instance_mismatch())
    }

    /// Mutably borrows the slot of `instance`, which must be of the declaring type.
    pub fn get_mut<'a>(&self, instance: &'a mut dyn Any) -> Result<&'a mut dyn Any, AccessError> {
        let mismatch = self.instance_mismatch();
        self.access.get_mut(instance).ok_or(mismatch)
    }

    /// Overwrites the slot of `instance` with `value`.
    pub fn set(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let slot = self.get_mut(instance)?;
        if (self.replace)(slot, value) {
            Ok(())
        } else {
            Err(AccessError::ValueMismatch {
                field: self.name,
                expected: self.value.path(),
            })
        }
    }

    /// Like [`get`](Self::get), then downcasts to `V`.
    pub fn get_as<'a, V: Any>(&self, instance: &'a dyn Any) -> Result<&'a V, AccessError> {
        let mismatch = self.type_mismatch::<V>();
        self.get(instance)?.downcast_ref::<V>().ok_or(mismatch)
    }

    /// Like [`get_mut`](Self::get_mut), then downcasts to `V`.
    pub fn get_mut_as<'a, V: Any>(&self, instance: &'a mut dyn Any) -> Result<&'a mut V, AccessError> {
        let mismatch = self.type_mismatch::<V>();
        self.get_mut(instance)?.downcast_mut::<V>().ok_or(mismatch)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("declaring", &self.declaring)
            .field("value", &self.value)
            .field("visibility", &self.visibility)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::AccessError;
    use crate::derive::Members;
    use crate::info::Typed;

    #[derive(Members, Default)]
    struct Slot {
        text: String,
    }

    #[derive(Members, Default)]
    struct Other {
        text: String,
    }

    #[test]
    fn set_then_get() {
        let field = Slot::type_info().field("text").unwrap();
        let mut slot = Slot::default();

        field.set(&mut slot, Box::new(String::from("a"))).unwrap();
        assert_eq!(slot.text, "a");
        assert_eq!(field.get_as::<String>(&slot).unwrap(), "a");
    }

    #[test]
    fn wrong_instance() {
        let field = Slot::type_info().field("text").unwrap();
        let mut other = Other::default();

        assert!(matches!(
            field.get(&other),
            Err(AccessError::InstanceMismatch { field: "text", .. })
        ));
        assert!(field.set(&mut other, Box::new(String::new())).is_err());
    }

    #[test]
    fn wrong_value_type() {
        let field = Slot::type_info().field("text").unwrap();
        let mut slot = Slot::default();

        assert!(matches!(
            field.set(&mut slot, Box::new(5_u8)),
            Err(AccessError::ValueMismatch { field: "text", .. })
        ));
        assert!(matches!(
            field.get_as::<u8>(&slot),
            Err(AccessError::TypeMismatch { expected: "u8", .. })
        ));
    }
}
