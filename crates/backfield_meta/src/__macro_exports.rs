//! Items used by code generated from `backfield_meta_derive`.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::derive::Members;
    use crate::info::Typed;
    use crate::registry::TypeRegistry;

    /// Marker registered on every platform where `inventory` works.
    #[derive(Members)]
    pub struct __AvailFlag;

    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: Typed> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
