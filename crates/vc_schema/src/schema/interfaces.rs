use alloc::vec::Vec;

use vc_utils::hash::HashSet;
use vc_utils::index::IndexSet;

use crate::error::SchemaResult;
use crate::info::{ClassName, TypeShape};
use crate::policy::{Whitelist, WhitelistPolicy};
use crate::registry::ClassRegistry;
use crate::resolve::{TypeBindings, TypeResolver};

// -----------------------------------------------------------------------------
// InterfaceCollector

/// Discovers the interfaces a type advertises as part of its wire contract.
///
/// Interfaces are found through implemented interfaces and the superclass
/// chain. An interface failing the whitelist ends its branch: none of its
/// super-interfaces are explored, even whitelisted ones. Superclasses are
/// always explored but never recorded.
///
/// Recorded interfaces have their type arguments resolved against the
/// collected type, and are returned in discovery order without duplicates.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, TypeShape};
/// use vc_schema::policy::EmptyWhitelist;
/// use vc_schema::registry::ClassRegistry;
/// use vc_schema::schema::InterfaceCollector;
///
/// // interface Named<N>; class Tag implements Named<string>
/// let mut registry = ClassRegistry::new();
/// registry.insert(ClassInfo::interface("demo::Named").with_type_param("N", []).serializable());
/// registry.insert(ClassInfo::record("demo::Tag").with_interface(
///     TypeShape::parameterized("demo::Named", [TypeShape::simple("string")]),
/// ));
///
/// let collector = InterfaceCollector::new(&registry, &EmptyWhitelist);
/// let interfaces = collector.collect(&TypeShape::simple("demo::Tag")).unwrap();
/// assert_eq!(interfaces[0].to_string(), "demo::Named<string>");
/// ```
#[derive(Clone, Copy)]
pub struct InterfaceCollector<'a> {
    registry: &'a ClassRegistry,
    policy: WhitelistPolicy<'a>,
}

struct Exploration {
    bindings: TypeBindings,
    found: IndexSet<TypeShape>,
    visited: HashSet<ClassName>,
}

impl<'a> InterfaceCollector<'a> {
    #[inline]
    pub const fn new(registry: &'a ClassRegistry, whitelist: &'a dyn Whitelist) -> Self {
        Self {
            registry,
            policy: WhitelistPolicy::new(registry, whitelist),
        }
    }

    /// Collects the approved interfaces of `ty`.
    ///
    /// If `ty` is itself a whitelisted interface, it comes first.
    pub fn collect(&self, ty: &TypeShape) -> SchemaResult<Vec<TypeShape>> {
        let mut exploration = Exploration {
            bindings: TypeResolver::new(self.registry).bindings(ty)?,
            found: IndexSet::default(),
            visited: HashSet::default(),
        };
        self.explore(ty, &mut exploration)?;
        Ok(exploration.found.into_iter().collect())
    }

    fn explore(&self, ty: &TypeShape, exploration: &mut Exploration) -> SchemaResult<()> {
        let Some(name) = ty.raw_name() else {
            return Ok(());
        };
        let class = self.registry.require(name)?;

        if class.is_interface() {
            if !self.policy.is_whitelisted(class) {
                log::debug!("interface `{name}` is not whitelisted, not exploring it");
                return Ok(());
            }
            let resolver = TypeResolver::new(self.registry);
            let resolved = resolver.resolve_with(ty, &exploration.bindings)?;
            if !exploration.found.insert(resolved) {
                return Ok(());
            }
        } else if !exploration.visited.insert(name.clone()) {
            return Ok(());
        }

        for supertype in class.superclass().into_iter().chain(class.interfaces()) {
            self.explore(supertype, exploration)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::InterfaceCollector;
    use crate::fixtures;
    use crate::info::TypeShape;
    use crate::policy::ListedWhitelist;

    #[test]
    fn blocked_interfaces_end_their_branch() {
        let registry = fixtures::registry();
        let whitelist: ListedWhitelist = [fixtures::SHAPE, fixtures::RED_CIRCLE].into_iter().collect();
        let collector = InterfaceCollector::new(&registry, &whitelist);

        let interfaces = collector.collect(&TypeShape::simple(fixtures::SPOT)).unwrap();
        assert_eq!(interfaces, [TypeShape::simple(fixtures::SHAPE)]);
    }

    #[test]
    fn interfaces_are_found_through_superclasses() {
        let registry = fixtures::registry();
        let whitelist: ListedWhitelist =
            [fixtures::SHAPE, fixtures::CIRCLE, fixtures::RED_CIRCLE].into_iter().collect();
        let collector = InterfaceCollector::new(&registry, &whitelist);

        let interfaces = collector.collect(&TypeShape::simple(fixtures::BIG_SPOT)).unwrap();
        let names: Vec<_> = interfaces.iter().map(|ty| ty.to_string()).collect();
        assert_eq!(names, [fixtures::SHAPE, fixtures::CIRCLE, fixtures::RED_CIRCLE]);
    }

    #[test]
    fn generic_interfaces_are_resolved() {
        let registry = fixtures::registry();
        let whitelist: ListedWhitelist = [fixtures::CONTAINER].into_iter().collect();
        let collector = InterfaceCollector::new(&registry, &whitelist);

        let holder = TypeShape::parameterized(fixtures::HOLDER, [TypeShape::simple("string")]);
        let interfaces = collector.collect(&holder).unwrap();
        assert_eq!(
            interfaces,
            [TypeShape::parameterized(fixtures::CONTAINER, [TypeShape::simple("string")])]
        );

        // A raw use leaves the unbounded variable as the universal type.
        let interfaces = collector.collect(&TypeShape::simple(fixtures::HOLDER)).unwrap();
        assert_eq!(interfaces[0].to_string(), "demo::Container<*>");
    }
}
