use crate::info::{ClassKind, TypeShape};
use crate::registry::{ClassRegistry, is_byte_sequence};
use crate::resolve::{RawClass, TypeResolver};

/// Returns `true` if instances of `ty` may be written as back-references when
/// they recur in a shared or cyclic object graph.
///
/// Raw byte sequences, primitives and boxed primitives are always written by
/// value, as are shapes with no class at all.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, TypeShape};
/// use vc_schema::policy::reference_eligible;
/// use vc_schema::registry::ClassRegistry;
///
/// let mut registry = ClassRegistry::new();
/// registry.insert(ClassInfo::record("demo::Point"));
///
/// assert!(reference_eligible(&registry, &TypeShape::simple("demo::Point")));
/// assert!(!reference_eligible(&registry, &TypeShape::simple("bytes")));
/// assert!(!reference_eligible(&registry, &TypeShape::simple("Option<i32>")));
/// ```
pub fn reference_eligible(registry: &ClassRegistry, ty: &TypeShape) -> bool {
    if is_byte_sequence(ty) {
        return false;
    }
    match TypeResolver::new(registry).class_of(ty) {
        Some(RawClass::Named(name)) => !matches!(
            registry.get(name.as_str()).map(|class| class.kind()),
            Some(ClassKind::Primitive(_) | ClassKind::Boxed(_) | ClassKind::Bytes)
        ),
        Some(RawClass::Array(_)) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::reference_eligible;
    use crate::info::{ClassInfo, TypeShape};
    use crate::registry::ClassRegistry;

    #[test]
    fn values_are_never_references() {
        let mut registry = ClassRegistry::new();
        registry.insert(ClassInfo::record("demo::Point"));

        let bytes = TypeShape::array(TypeShape::simple("u8"));
        assert!(!reference_eligible(&registry, &bytes));
        assert!(!reference_eligible(&registry, &TypeShape::simple("f64")));
        assert!(!reference_eligible(&registry, &TypeShape::simple("Option<bool>")));
        assert!(!reference_eligible(
            &registry,
            &TypeShape::variable("demo::Unknown", "T")
        ));

        assert!(reference_eligible(&registry, &TypeShape::simple("string")));
        assert!(reference_eligible(&registry, &TypeShape::array(TypeShape::simple("i32"))));
        assert!(reference_eligible(&registry, &TypeShape::Any));
        assert!(reference_eligible(
            &registry,
            &TypeShape::parameterized("List", [TypeShape::simple("demo::Point")])
        ));
    }
}
