use alloc::vec::Vec;

use vc_utils::hash::HashSet;

use crate::info::{ClassName, PrimitiveKind, TypeShape};
use crate::registry::OBJECT_CLASS;
use crate::resolve::{TypeBindings, TypeResolver};

// -----------------------------------------------------------------------------
// Class relations

impl TypeResolver<'_> {
    /// Returns `true` if `class` is `ancestor`, or inherits from it through
    /// its superclass chain or implemented interfaces.
    ///
    /// Every class is a subclass of the root class `object`.
    /// Unregistered classes have no ancestry.
    pub fn is_subclass_of(&self, class: &ClassName, ancestor: &ClassName) -> bool {
        if class == ancestor || ancestor == OBJECT_CLASS {
            return true;
        }
        let mut visited: HashSet<&ClassName> = HashSet::default();
        let mut pending: Vec<&ClassName> = alloc::vec![class];
        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(info) = self.registry().get(current.as_str()) else {
                continue;
            };
            for supertype in info.superclass().into_iter().chain(info.interfaces()) {
                if let Some(name) = supertype.raw_name() {
                    if name == ancestor {
                        return true;
                    }
                    pending.push(name);
                }
            }
        }
        false
    }

    /// Views `source` as its supertype `raw`, carrying the type arguments through.
    ///
    /// If `List<T>` extends `Collection<T>`, then `List<string>` seen as
    /// `Collection` is `Collection<string>`. Variables of a raw generic source
    /// stay unbound. Returns `None` if `raw` is not an ancestor of `source`.
    pub fn as_supertype(&self, source: &TypeShape, raw: &ClassName) -> Option<TypeShape> {
        // Ancestry chains are acyclic, so never longer than the registry.
        self.as_supertype_inner(source, raw, self.registry().len())
    }

    fn as_supertype_inner(
        &self,
        source: &TypeShape,
        raw: &ClassName,
        depth: usize,
    ) -> Option<TypeShape> {
        let name = source.raw_name()?;
        if name == raw {
            return Some(source.clone());
        }
        if depth == 0 {
            return None;
        }
        let class = self.registry().get(name.as_str())?;

        let mut local = TypeBindings::new();
        if let TypeShape::Parameterized { args, .. } = source {
            for (param, arg) in class.type_params().iter().zip(args) {
                local.bind(name, param.name(), arg.clone());
            }
        }

        class
            .superclass()
            .into_iter()
            .chain(class.interfaces())
            .find_map(|supertype| {
                self.as_supertype_inner(&local.substitute(supertype), raw, depth - 1)
            })
    }

    /// Returns `true` if a value of type `source` can be used where `target` is declared.
    ///
    /// This covers subclassing and interface implementation, generic argument
    /// agreement through [`as_supertype`](Self::as_supertype), array covariance
    /// and primitive/boxed equivalence. Unresolved variables and wildcards are
    /// compared through their bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_schema::info::{ClassInfo, TypeShape};
    /// use vc_schema::registry::ClassRegistry;
    /// use vc_schema::resolve::TypeResolver;
    ///
    /// let mut registry = ClassRegistry::new();
    /// registry.insert(ClassInfo::interface("demo::Shape"));
    /// registry.insert(
    ///     ClassInfo::record("demo::Circle").with_interface(TypeShape::simple("demo::Shape")),
    /// );
    /// let resolver = TypeResolver::new(&registry);
    ///
    /// let shape = TypeShape::simple("demo::Shape");
    /// let circle = TypeShape::simple("demo::Circle");
    /// assert!(resolver.accepts(&shape, &circle));
    /// assert!(!resolver.accepts(&circle, &shape));
    ///
    /// assert!(resolver.accepts(&TypeShape::simple("Option<i64>"), &TypeShape::simple("i64")));
    /// assert!(resolver.accepts(&TypeShape::array(shape), &TypeShape::array(circle)));
    /// ```
    pub fn accepts(&self, target: &TypeShape, source: &TypeShape) -> bool {
        if target == source {
            return true;
        }
        match (target, source) {
            (TypeShape::Any, _) => true,
            (TypeShape::Simple(name), _) if name == OBJECT_CLASS => true,
            (TypeShape::Wildcard { upper }, _) => {
                upper.iter().all(|bound| self.accepts(bound, source))
            }
            (TypeShape::Variable { owner, name }, _) => self
                .registry()
                .get(owner.as_str())
                .and_then(|class| class.type_param(name))
                .is_some_and(|param| {
                    param.bounds().iter().all(|bound| self.accepts(bound, source))
                }),
            (_, TypeShape::Any) => false,
            (_, TypeShape::Wildcard { .. } | TypeShape::Variable { .. }) => self
                .class_of(source)
                .is_some_and(|class| self.accepts(target, &class.to_shape())),
            (TypeShape::Array(target), TypeShape::Array(source)) => self.accepts(target, source),
            (TypeShape::Array(_), _) | (_, TypeShape::Array(_)) => false,
            (TypeShape::Simple(_) | TypeShape::Parameterized { .. }, _) => {
                self.accepts_class(target, source)
            }
        }
    }

    // Both shapes are simple or parameterized.
    fn accepts_class(&self, target: &TypeShape, source: &TypeShape) -> bool {
        let (Some(target_name), Some(source_name)) = (target.raw_name(), source.raw_name()) else {
            return false;
        };
        if is_boxing_pair(target_name, source_name) {
            return true;
        }
        if !self.is_subclass_of(source_name, target_name) {
            return false;
        }
        let TypeShape::Parameterized { args: target_args, .. } = target else {
            // A raw target accepts any parameterization.
            return true;
        };
        match self.as_supertype(source, target_name) {
            Some(TypeShape::Parameterized { args: source_args, .. }) => target_args
                .iter()
                .zip(&source_args)
                .all(|(t, s)| self.argument_accepts(t, s)),
            // Raw source, unchecked.
            _ => true,
        }
    }

    // Type arguments are invariant unless the target argument is a wildcard.
    fn argument_accepts(&self, target: &TypeShape, source: &TypeShape) -> bool {
        match (target, source) {
            (TypeShape::Wildcard { .. }, _) => self.accepts(target, source),
            (TypeShape::Any | TypeShape::Variable { .. }, _) => true,
            (_, TypeShape::Any | TypeShape::Variable { .. }) => true,
            _ => target == source,
        }
    }
}

fn is_boxing_pair(a: &ClassName, b: &ClassName) -> bool {
    let boxes = |primitive: &ClassName, boxed: &ClassName| {
        PrimitiveKind::from_name(primitive.as_str())
            .is_some_and(|kind| kind.boxed_name() == boxed.as_str())
    };
    boxes(a, b) || boxes(b, a)
}

#[cfg(test)]
mod tests {
    use crate::info::{ClassInfo, TypeShape};
    use crate::registry::ClassRegistry;
    use crate::resolve::TypeResolver;

    fn simple(name: &'static str) -> TypeShape {
        TypeShape::simple(name)
    }

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        // interface Collection<E>; interface List<E> extends Collection<E>
        registry.insert(ClassInfo::interface("demo::Collection").with_type_param("E", []));
        registry.insert(
            ClassInfo::interface("demo::List")
                .with_type_param("E", [])
                .with_interface(TypeShape::parameterized(
                    "demo::Collection",
                    [TypeShape::variable("demo::List", "E")],
                )),
        );
        // class Names implements List<string>
        registry.insert(ClassInfo::record("demo::Names").with_interface(
            TypeShape::parameterized("demo::List", [simple("string")]),
        ));
        registry.insert(ClassInfo::abstract_class("demo::Animal"));
        registry.insert(ClassInfo::record("demo::Dog").with_superclass(simple("demo::Animal")));
        registry
    }

    #[test]
    fn subclass_walks_superclasses_and_interfaces() {
        let registry = registry();
        let resolver = TypeResolver::new(&registry);

        assert!(resolver.is_subclass_of(&"demo::Dog".into(), &"demo::Animal".into()));
        assert!(resolver.is_subclass_of(&"demo::Names".into(), &"demo::Collection".into()));
        assert!(resolver.is_subclass_of(&"i32".into(), &"object".into()));
        assert!(!resolver.is_subclass_of(&"demo::Animal".into(), &"demo::Dog".into()));
        assert!(!resolver.is_subclass_of(&"demo::Unknown".into(), &"demo::Animal".into()));
    }

    #[test]
    fn supertype_view_carries_arguments() {
        let registry = registry();
        let resolver = TypeResolver::new(&registry);

        let view = resolver.as_supertype(&simple("demo::Names"), &"demo::Collection".into());
        assert_eq!(
            view,
            Some(TypeShape::parameterized("demo::Collection", [simple("string")])),
        );

        let list = TypeShape::parameterized("demo::List", [simple("i32")]);
        let view = resolver.as_supertype(&list, &"demo::Collection".into());
        assert_eq!(
            view,
            Some(TypeShape::parameterized("demo::Collection", [simple("i32")])),
        );
        assert_eq!(resolver.as_supertype(&list, &"demo::Animal".into()), None);
    }

    #[test]
    fn generic_arguments_must_agree() {
        let registry = registry();
        let resolver = TypeResolver::new(&registry);

        let strings = TypeShape::parameterized("demo::Collection", [simple("string")]);
        let ints = TypeShape::parameterized("demo::Collection", [simple("i32")]);
        let any = TypeShape::parameterized("demo::Collection", [TypeShape::wildcard([])]);

        assert!(resolver.accepts(&strings, &simple("demo::Names")));
        assert!(!resolver.accepts(&ints, &simple("demo::Names")));
        assert!(resolver.accepts(&any, &simple("demo::Names")));
        assert!(resolver.accepts(&simple("demo::Collection"), &simple("demo::Names")));
    }

    #[test]
    fn universal_and_root_types() {
        let registry = registry();
        let resolver = TypeResolver::new(&registry);

        assert!(resolver.accepts(&TypeShape::Any, &simple("demo::Dog")));
        assert!(resolver.accepts(&simple("object"), &simple("i32")));
        assert!(!resolver.accepts(&simple("demo::Dog"), &TypeShape::Any));
        assert!(!resolver.accepts(&simple("i32"), &simple("i64")));
        assert!(!resolver.accepts(&TypeShape::array(simple("i32")), &simple("i32")));
    }
}
