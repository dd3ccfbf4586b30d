use alloc::vec::Vec;

use vc_utils::hash::HashSet;

use crate::error::{SchemaError, SchemaErrorKind, SchemaResult};
use crate::info::{ClassInfo, ClassName, TypeShape};
use crate::registry::ClassRegistry;

// -----------------------------------------------------------------------------
// Whitelist

/// The allow-list of classes that wire data may instantiate.
///
/// Implementations must be safe to share between threads: derivations only
/// ever perform read-only lookups.
pub trait Whitelist: Send + Sync {
    /// Returns `true` if `class` is explicitly listed.
    fn is_listed(&self, class: &ClassInfo) -> bool;
}

/// A [`Whitelist`] listing every class.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllWhitelist;

impl Whitelist for AllWhitelist {
    #[inline]
    fn is_listed(&self, _: &ClassInfo) -> bool {
        true
    }
}

/// A [`Whitelist`] listing nothing; only classes carrying the serializable
/// marker pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWhitelist;

impl Whitelist for EmptyWhitelist {
    #[inline]
    fn is_listed(&self, _: &ClassInfo) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// WhitelistPolicy

/// Decides whether a class may be serialized.
///
/// A class passes if it is listed, or if the serializable marker is found on
/// the class itself, on any interface it implements or on any superclass,
/// transitively.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, TypeShape};
/// use vc_schema::policy::{EmptyWhitelist, WhitelistPolicy};
/// use vc_schema::registry::ClassRegistry;
///
/// let mut registry = ClassRegistry::new();
/// registry.insert(ClassInfo::interface("demo::Contract").serializable());
/// registry.insert(
///     ClassInfo::abstract_class("demo::Base").with_interface(TypeShape::simple("demo::Contract")),
/// );
/// registry.insert(ClassInfo::record("demo::Impl").with_superclass(TypeShape::simple("demo::Base")));
/// registry.insert(ClassInfo::record("demo::Rogue"));
///
/// let policy = WhitelistPolicy::new(&registry, &EmptyWhitelist);
/// assert!(policy.require_whitelisted(&TypeShape::simple("demo::Impl")).is_ok());
/// assert!(policy.require_whitelisted(&TypeShape::simple("demo::Rogue")).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct WhitelistPolicy<'a> {
    registry: &'a ClassRegistry,
    whitelist: &'a dyn Whitelist,
}

impl<'a> WhitelistPolicy<'a> {
    #[inline]
    pub const fn new(registry: &'a ClassRegistry, whitelist: &'a dyn Whitelist) -> Self {
        Self {
            registry,
            whitelist,
        }
    }

    /// Returns `true` if `class` is listed or inherits the serializable marker.
    #[inline]
    pub fn is_whitelisted(&self, class: &ClassInfo) -> bool {
        self.whitelist.is_listed(class) || self.has_serializable_marker(class)
    }

    /// Returns `true` if the serializable marker is found on `class`, its
    /// interfaces or its superclasses, transitively.
    ///
    /// Unregistered ancestors are skipped.
    pub fn has_serializable_marker(&self, class: &ClassInfo) -> bool {
        let mut visited: HashSet<&ClassName> = HashSet::default();
        let mut pending: Vec<&ClassInfo> = alloc::vec![class];
        while let Some(current) = pending.pop() {
            if current.is_serializable() {
                return true;
            }
            if !visited.insert(current.name()) {
                continue;
            }
            let ancestors = current
                .superclass()
                .into_iter()
                .chain(current.interfaces())
                .filter_map(TypeShape::raw_name)
                .filter_map(|name| self.registry.get(name.as_str()));
            pending.extend(ancestors);
        }
        false
    }

    /// Fails with [`NotWhitelisted`] unless the class of `ty` passes.
    ///
    /// Arrays are checked through their component. Variables, wildcards and
    /// the universal type have no class to check and fail with
    /// [`UnsupportedTypeShape`].
    ///
    /// [`NotWhitelisted`]: SchemaErrorKind::NotWhitelisted
    /// [`UnsupportedTypeShape`]: SchemaErrorKind::UnsupportedTypeShape
    pub fn require_whitelisted(&self, ty: &TypeShape) -> SchemaResult<()> {
        match ty {
            TypeShape::Array(component) => self.require_whitelisted(component),
            TypeShape::Simple(name) | TypeShape::Parameterized { raw: name, .. } => {
                let class = self.registry.require(name)?;
                if self.is_whitelisted(class) {
                    Ok(())
                } else {
                    Err(SchemaError::new(SchemaErrorKind::NotWhitelisted {
                        class: name.clone(),
                    }))
                }
            }
            TypeShape::Variable { .. } | TypeShape::Wildcard { .. } | TypeShape::Any => {
                Err(SchemaError::new(SchemaErrorKind::UnsupportedTypeShape {
                    shape: ty.clone(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AllWhitelist, EmptyWhitelist, WhitelistPolicy};
    use crate::SchemaErrorKind;
    use crate::info::{ClassInfo, TypeShape};
    use crate::policy::ListedWhitelist;
    use crate::registry::ClassRegistry;

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.insert(ClassInfo::interface("demo::Marked").serializable());
        registry.insert(
            ClassInfo::interface("demo::Derived").with_interface(TypeShape::simple("demo::Marked")),
        );
        registry.insert(
            ClassInfo::record("demo::Deep").with_interface(TypeShape::simple("demo::Derived")),
        );
        registry.insert(ClassInfo::record("demo::Plain"));
        registry
    }

    #[test]
    fn marker_is_inherited_transitively() {
        let registry = registry();
        let policy = WhitelistPolicy::new(&registry, &EmptyWhitelist);

        let deep = registry.get("demo::Deep").unwrap();
        let plain = registry.get("demo::Plain").unwrap();
        assert!(policy.is_whitelisted(deep));
        assert!(!policy.is_whitelisted(plain));
        assert!(WhitelistPolicy::new(&registry, &AllWhitelist).is_whitelisted(plain));
    }

    #[test]
    fn listed_classes_pass() {
        let registry = registry();
        let mut listed = ListedWhitelist::new();
        listed.insert("demo::Plain");
        let policy = WhitelistPolicy::new(&registry, &listed);

        assert!(policy.require_whitelisted(&TypeShape::simple("demo::Plain")).is_ok());
    }

    #[test]
    fn arrays_check_their_component() {
        let registry = registry();
        let policy = WhitelistPolicy::new(&registry, &EmptyWhitelist);

        let plain = TypeShape::array(TypeShape::simple("demo::Plain"));
        let err = policy.require_whitelisted(&plain).unwrap_err();
        assert!(matches!(err.kind(), SchemaErrorKind::NotWhitelisted { class } if class == "demo::Plain"));

        let ints = TypeShape::array(TypeShape::simple("i32"));
        assert!(policy.require_whitelisted(&ints).is_ok());
    }

    #[test]
    fn shapes_without_class_are_unsupported() {
        let registry = registry();
        let policy = WhitelistPolicy::new(&registry, &AllWhitelist);

        let err = policy.require_whitelisted(&TypeShape::Any).unwrap_err();
        assert!(matches!(err.kind(), SchemaErrorKind::UnsupportedTypeShape { .. }));
        let err = policy
            .require_whitelisted(&TypeShape::simple("demo::Missing"))
            .unwrap_err();
        assert!(matches!(err.kind(), SchemaErrorKind::UnknownClass { .. }));
    }
}
