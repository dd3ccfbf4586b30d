use vc_utils::hash::HashMap;

use crate::error::{SchemaError, SchemaErrorKind, SchemaResult};
use crate::info::{ClassInfo, ClassName};
use crate::registry::DescribeClass;
use crate::registry::builtin::builtin_classes;

// -----------------------------------------------------------------------------
// ClassRegistry

/// A registry of class descriptions.
///
/// This struct is the central store of structural information. Every class
/// a schema is derived for, and every class its properties, superclasses
/// and interfaces mention, must be registered here.
///
/// The registry is read-only during derivation and is `Send + Sync`,
/// so one registry can serve many threads.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, ClassKind};
/// use vc_schema::registry::ClassRegistry;
///
/// let mut registry = ClassRegistry::new();
/// assert!(registry.contains("string"));
///
/// assert!(registry.try_insert(ClassInfo::interface("demo::Shape")));
/// assert!(!registry.try_insert(ClassInfo::record("demo::Shape")));
///
/// let shape = registry.get("demo::Shape").unwrap();
/// assert_eq!(shape.kind(), ClassKind::Interface);
/// ```
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    classes: HashMap<ClassName, ClassInfo>,
    #[cfg(feature = "auto_register")]
    auto_registered: bool,
}

impl Default for ClassRegistry {
    /// See [`ClassRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Create an empty [`ClassRegistry`], without even the builtin classes.
    #[inline]
    pub fn empty() -> Self {
        Self {
            classes: HashMap::default(),
            #[cfg(feature = "auto_register")]
            auto_registered: false,
        }
    }

    /// Create a registry holding the builtin classes.
    ///
    /// See the [module documentation](crate::registry) for the list.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for class in builtin_classes() {
            registry.insert(class);
        }
        registry
    }

    /// Try add or do nothing.
    ///
    /// - If a class with the same name already exists, does nothing and returns `false`.
    /// - Otherwise inserts the class and returns `true`.
    pub fn try_insert(&mut self, class: ClassInfo) -> bool {
        if self.classes.contains_key(class.name()) {
            return false;
        }
        self.classes.insert(class.name().clone(), class);
        true
    }

    /// Insert or **overwrite** the class with the same name.
    #[inline]
    pub fn insert(&mut self, class: ClassInfo) {
        self.classes.insert(class.name().clone(), class);
    }

    /// Attempts to register the class described by `T` if it has not yet been registered.
    ///
    /// The first registration also registers the dependencies declared by
    /// [`DescribeClass::register_dependencies`].
    pub fn register<T: DescribeClass>(&mut self) {
        if self.try_insert(T::class_info()) {
            T::register_dependencies(self);
        }
    }

    /// Registers every class submitted with [`auto_register!`](crate::auto_register).
    ///
    /// Repeated calls are cheap and never insert duplicates.
    ///
    /// Returns `true` if static registration works on the current platform.
    /// Without the `auto_register` feature this does nothing and returns `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if self.auto_registered {
                return true;
            }
            super::auto_register::register_types(self);
            self.auto_registered
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[cfg(feature = "auto_register")]
    #[inline]
    pub(super) fn set_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Returns `true` if a class called `name` is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Returns the class called `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    /// Returns the class called `name`, or an [`UnknownClass`] error.
    ///
    /// [`UnknownClass`]: SchemaErrorKind::UnknownClass
    pub fn require(&self, name: &ClassName) -> SchemaResult<&ClassInfo> {
        self.classes.get(name.as_str()).ok_or_else(|| {
            SchemaError::new(SchemaErrorKind::UnknownClass {
                class: name.clone(),
            })
        })
    }

    /// Returns the number of registered classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates over the registered classes, in no particular order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassInfo> {
        self.classes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::ClassRegistry;
    use crate::info::{ClassInfo, ClassKind, FieldInfo, PrimitiveKind, TypeShape};
    use crate::registry::DescribeClass;
    use crate::SchemaErrorKind;

    #[test]
    fn builtins_are_registered() {
        let registry = ClassRegistry::new();
        assert_eq!(registry.len(), 3 + 2 * PrimitiveKind::ALL.len());

        let boxed = registry.get("Option<i32>").unwrap();
        assert_eq!(boxed.kind(), ClassKind::Boxed(PrimitiveKind::I32));
        assert!(registry.iter().all(ClassInfo::is_serializable));
        assert!(ClassRegistry::empty().is_empty());
    }

    #[test]
    fn insert_overwrites() {
        let mut registry = ClassRegistry::empty();
        registry.insert(ClassInfo::record("demo::A"));
        registry.insert(ClassInfo::abstract_class("demo::A"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("demo::A").unwrap().kind(), ClassKind::Abstract);
    }

    #[test]
    fn require_reports_unknown_class() {
        let registry = ClassRegistry::new();
        let err = registry.require(&"demo::Missing".into()).unwrap_err();
        assert!(matches!(err.kind(), SchemaErrorKind::UnknownClass { .. }));
    }

    struct Outer;
    struct Inner;

    impl DescribeClass for Outer {
        fn class_info() -> ClassInfo {
            ClassInfo::record("demo::Outer")
                .with_field(FieldInfo::new("inner", TypeShape::simple("demo::Inner")))
        }

        fn register_dependencies(registry: &mut ClassRegistry) {
            registry.register::<Inner>();
        }
    }

    impl DescribeClass for Inner {
        fn class_info() -> ClassInfo {
            ClassInfo::record("demo::Inner")
        }
    }

    #[test]
    fn register_with_dependencies() {
        let mut registry = ClassRegistry::empty();
        registry.register::<Outer>();
        assert!(registry.contains("demo::Outer"));
        assert!(registry.contains("demo::Inner"));
        assert_eq!(registry.len(), 2);
    }

    #[cfg(feature = "auto_register")]
    mod auto {
        use super::ClassRegistry;
        use crate::info::ClassInfo;
        use crate::registry::DescribeClass;

        struct Submitted;

        impl DescribeClass for Submitted {
            fn class_info() -> ClassInfo {
                ClassInfo::record("demo::Submitted").serializable()
            }
        }

        crate::auto_register!(Submitted);

        #[test]
        fn auto_register_collects_submissions() {
            let mut registry = ClassRegistry::new();
            assert!(registry.auto_register());
            assert!(registry.contains("demo::Submitted"));

            let len = registry.len();
            assert!(registry.auto_register());
            assert_eq!(registry.len(), len);
        }
    }
}
