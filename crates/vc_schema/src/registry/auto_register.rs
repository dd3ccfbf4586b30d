use crate::registry::{ClassRegistry, DescribeClass};

// -----------------------------------------------------------------------------
// Static registration

#[doc(hidden)]
pub struct __AutoRegisterFunc(pub fn(&mut ClassRegistry));

inventory::collect!(__AutoRegisterFunc);

#[doc(hidden)]
pub trait __RegisterType {
    fn __register(registry: &mut ClassRegistry);
}

impl<T: DescribeClass> __RegisterType for T {
    #[inline]
    fn __register(registry: &mut ClassRegistry) {
        registry.register::<T>();
    }
}

// Submitted unconditionally: seeing it proves the platform collects submissions.
inventory::submit! {
    __AutoRegisterFunc(mark_available)
}

fn mark_available(registry: &mut ClassRegistry) {
    registry.set_auto_registered();
}

/// Runs every submitted registration.
pub(super) fn register_types(registry: &mut ClassRegistry) {
    for func in inventory::iter::<__AutoRegisterFunc> {
        (func.0)(registry);
    }
}

/// Statically registers classes, picked up by
/// [`ClassRegistry::auto_register`](crate::registry::ClassRegistry::auto_register).
///
/// Every listed type must implement [`DescribeClass`].
///
/// # Examples
///
/// ```no_run
/// use vc_schema::info::ClassInfo;
/// use vc_schema::registry::{ClassRegistry, DescribeClass};
///
/// struct Marker;
///
/// impl DescribeClass for Marker {
///     fn class_info() -> ClassInfo {
///         ClassInfo::record("demo::Marker").serializable()
///     }
/// }
///
/// vc_schema::auto_register!(Marker);
///
/// let mut registry = ClassRegistry::new();
/// assert!(registry.auto_register());
/// assert!(registry.contains("demo::Marker"));
/// ```
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),+ $(,)?) => {
        const _: () = {
            $(
                $crate::__macro_exports::inventory::submit! {
                    $crate::registry::__AutoRegisterFunc(
                        <$ty as $crate::registry::__RegisterType>::__register
                    )
                }
            )+
        };
    };
}
