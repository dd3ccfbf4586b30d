use alloc::borrow::Cow;

use vc_utils::hash::HashMap;
use vc_utils::hash::hashbrown::Equivalent;

use crate::info::{ClassName, TypeShape};

type VarKey = (ClassName, Cow<'static, str>);

// Borrowed form of `VarKey`, hashes identically.
#[derive(Hash)]
struct VarRef<'k>(&'k str, &'k str);

impl Equivalent<VarKey> for VarRef<'_> {
    #[inline]
    fn equivalent(&self, key: &VarKey) -> bool {
        key.0 == self.0 && key.1 == self.1
    }
}

/// Type variable bindings established by a context type.
///
/// A variable is identified by its declaring class and its name, so `Foo::T`
/// and `Bar::T` never collide. The first binding of a variable wins: bindings
/// are collected from the context outwards, most specific first.
///
/// Bound values may still mention variables, which are resolved on use.
#[derive(Debug, Clone, Default)]
pub struct TypeBindings {
    map: HashMap<VarKey, TypeShape>,
}

impl TypeBindings {
    /// Creates an empty set of bindings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `owner::name`.
    #[inline]
    pub fn get(&self, owner: &str, name: &str) -> Option<&TypeShape> {
        self.map.get(&VarRef(owner, name))
    }

    /// Binds `owner::name` unless it is already bound.
    ///
    /// Returns `true` if the binding was added.
    pub fn bind(&mut self, owner: &ClassName, name: &str, value: TypeShape) -> bool {
        if self.map.contains_key(&VarRef(owner.as_str(), name)) {
            return false;
        }
        let key = (owner.clone(), Cow::Owned(name.into()));
        self.map.insert(key, value);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replaces every bound variable in `shape` by its value, leaving free
    /// variables untouched. No bound rule is applied.
    pub fn substitute(&self, shape: &TypeShape) -> TypeShape {
        match shape {
            TypeShape::Variable { owner, name } => match self.get(owner.as_str(), name) {
                Some(value) => value.clone(),
                None => shape.clone(),
            },
            TypeShape::Parameterized { raw, args } => TypeShape::Parameterized {
                raw: raw.clone(),
                args: args.iter().map(|arg| self.substitute(arg)).collect(),
            },
            TypeShape::Array(component) => TypeShape::array(self.substitute(component)),
            TypeShape::Wildcard { upper } => TypeShape::Wildcard {
                upper: upper.iter().map(|bound| self.substitute(bound)).collect(),
            },
            TypeShape::Simple(_) | TypeShape::Any => shape.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeBindings;
    use crate::info::TypeShape;

    #[test]
    fn first_binding_wins() {
        let mut bindings = TypeBindings::new();
        assert!(bindings.bind(&"Box".into(), "T", TypeShape::simple("string")));
        assert!(!bindings.bind(&"Box".into(), "T", TypeShape::simple("i32")));
        assert!(bindings.bind(&"Pair".into(), "T", TypeShape::simple("i32")));

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("Box", "T"), Some(&TypeShape::simple("string")));
        assert_eq!(bindings.get("Pair", "T"), Some(&TypeShape::simple("i32")));
        assert_eq!(bindings.get("Box", "U"), None);
    }

    #[test]
    fn substitute_keeps_free_variables() {
        let mut bindings = TypeBindings::new();
        bindings.bind(&"Map".into(), "K", TypeShape::simple("string"));

        let shape = TypeShape::parameterized(
            "Map",
            [TypeShape::variable("Map", "K"), TypeShape::variable("Map", "V")],
        );
        let expected = TypeShape::parameterized(
            "Map",
            [TypeShape::simple("string"), TypeShape::variable("Map", "V")],
        );
        assert_eq!(bindings.substitute(&shape), expected);
    }
}
