use alloc::borrow::Cow;
use alloc::string::ToString;
use alloc::vec::Vec;

use vc_utils::hash::HashSet;

use crate::error::{SchemaError, SchemaErrorKind, SchemaResult};
use crate::info::{ClassName, TypeParam, TypeShape};
use crate::registry::{ClassRegistry, OBJECT_CLASS};
use crate::resolve::{RawClass, TypeBindings};

// -----------------------------------------------------------------------------
// TypeResolver

/// Resolves type shapes against the classes of a [`ClassRegistry`].
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, TypeShape};
/// use vc_schema::registry::ClassRegistry;
/// use vc_schema::resolve::TypeResolver;
///
/// // class Box<T>, class Crate<E: Number>
/// let mut registry = ClassRegistry::new();
/// registry.insert(ClassInfo::record("demo::Box").with_type_param("T", []));
/// registry.insert(ClassInfo::interface("demo::Number"));
/// registry.insert(
///     ClassInfo::record("demo::Crate").with_type_param("E", [TypeShape::simple("demo::Number")]),
/// );
/// let resolver = TypeResolver::new(&registry);
///
/// let t = TypeShape::variable("demo::Box", "T");
/// let context = TypeShape::parameterized("demo::Box", [TypeShape::simple("string")]);
/// assert_eq!(resolver.resolve(&t, Some(&context)).unwrap(), TypeShape::simple("string"));
///
/// // Free variables follow their bounds.
/// assert_eq!(resolver.resolve(&t, None).unwrap(), TypeShape::Any);
/// let e = TypeShape::variable("demo::Crate", "E");
/// assert_eq!(resolver.resolve(&e, None).unwrap(), TypeShape::simple("demo::Number"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver over `registry`.
    #[inline]
    pub const fn new(registry: &'a ClassRegistry) -> Self {
        Self { registry }
    }

    /// Returns the underlying registry.
    #[inline]
    pub const fn registry(&self) -> &'a ClassRegistry {
        self.registry
    }

    /// Substitutes every type variable in `actual`.
    ///
    /// Variables bound by `context` (or by any of its supertypes) take their
    /// bound value; the remaining ones follow the bound rule described in the
    /// [module documentation](crate::resolve).
    pub fn resolve(
        &self,
        actual: &TypeShape,
        context: Option<&TypeShape>,
    ) -> SchemaResult<TypeShape> {
        let bindings = match context {
            Some(context) => self.bindings(context)?,
            None => TypeBindings::new(),
        };
        self.resolve_with(actual, &bindings)
    }

    /// Like [`resolve`](Self::resolve), with bindings computed beforehand.
    #[inline]
    pub fn resolve_with(
        &self,
        actual: &TypeShape,
        bindings: &TypeBindings,
    ) -> SchemaResult<TypeShape> {
        self.resolve_inner(actual, bindings, &mut Vec::new())
    }

    /// Collects the variable bindings `context` establishes over its ancestry.
    ///
    /// `Foo<string>` binds `Foo::T`; if `Foo<T>` extends `Bar<List<T>>` it also
    /// binds `Bar::U` to `List<string>`. Non-class contexts bind nothing.
    pub fn bindings(&self, context: &TypeShape) -> SchemaResult<TypeBindings> {
        let mut bindings = TypeBindings::new();
        let mut visited = HashSet::default();
        self.collect_bindings(context, &mut bindings, &mut visited)?;
        Ok(bindings)
    }

    fn collect_bindings(
        &self,
        context: &TypeShape,
        bindings: &mut TypeBindings,
        visited: &mut HashSet<ClassName>,
    ) -> SchemaResult<()> {
        let Some(raw) = context.raw_name() else {
            return Ok(());
        };
        if !visited.insert(raw.clone()) {
            return Ok(());
        }
        let class = self.registry.require(raw)?;

        if let TypeShape::Parameterized { args, .. } = context {
            for (param, arg) in class.type_params().iter().zip(args) {
                bindings.bind(raw, param.name(), arg.clone());
            }
        }

        for supertype in class.superclass().into_iter().chain(class.interfaces()) {
            let supertype = bindings.substitute(supertype);
            self.collect_bindings(&supertype, bindings, visited)?;
        }
        Ok(())
    }

    fn resolve_inner(
        &self,
        actual: &TypeShape,
        bindings: &TypeBindings,
        visiting: &mut Vec<(ClassName, Cow<'static, str>)>,
    ) -> SchemaResult<TypeShape> {
        let resolved = match actual {
            TypeShape::Simple(_) | TypeShape::Any => actual.clone(),
            TypeShape::Parameterized { raw, args } => TypeShape::Parameterized {
                raw: raw.clone(),
                args: args
                    .iter()
                    .map(|arg| self.resolve_inner(arg, bindings, visiting))
                    .collect::<SchemaResult<_>>()?,
            },
            TypeShape::Array(component) => {
                TypeShape::array(self.resolve_inner(component, bindings, visiting)?)
            }
            TypeShape::Wildcard { upper } => TypeShape::Wildcard {
                upper: upper
                    .iter()
                    .map(|bound| self.resolve_inner(bound, bindings, visiting))
                    .collect::<SchemaResult<_>>()?,
            },
            TypeShape::Variable { owner, name } => {
                if visiting.iter().any(|(o, n)| o == owner && n == name) {
                    return Ok(TypeShape::Any);
                }
                let target = match bindings.get(owner.as_str(), name) {
                    Some(value) => value.clone(),
                    None => match self.variable_bound(actual, owner, name)? {
                        Some(bound) => bound.clone(),
                        None => return Ok(TypeShape::Any),
                    },
                };
                visiting.push((owner.clone(), name.clone()));
                let resolved = self.resolve_inner(&target, bindings, visiting);
                visiting.pop();
                resolved?
            }
        };
        Ok(resolved)
    }

    // `None` for an unbounded variable.
    fn variable_bound(
        &self,
        variable: &TypeShape,
        owner: &ClassName,
        name: &str,
    ) -> SchemaResult<Option<&'a TypeShape>> {
        let param = self.type_param(variable, owner, name)?;
        match param.bounds() {
            [] => Ok(None),
            [bound] => Ok(Some(bound)),
            bounds => Err(SchemaError::new(
                SchemaErrorKind::MultipleBoundsUnsupported {
                    variable: name.to_string(),
                    count: bounds.len(),
                },
            )),
        }
    }

    fn type_param(
        &self,
        variable: &TypeShape,
        owner: &ClassName,
        name: &str,
    ) -> SchemaResult<&'a TypeParam> {
        self.registry.require(owner)?.type_param(name).ok_or_else(|| {
            SchemaError::new(SchemaErrorKind::UnsupportedTypeShape {
                shape: variable.clone(),
            })
        })
    }

    /// Returns the erased class of `ty`.
    ///
    /// - `Simple` and `Parameterized` give their class.
    /// - `Array` gives the array class of its component's class.
    /// - `Variable` and `Wildcard` give the class of their first bound, or the root class.
    /// - `Any` gives the root class.
    ///
    /// Returns `None` for a variable whose declaring class or parameter is unknown.
    pub fn class_of(&self, ty: &TypeShape) -> Option<RawClass> {
        match ty {
            TypeShape::Simple(name) | TypeShape::Parameterized { raw: name, .. } => {
                Some(RawClass::Named(name.clone()))
            }
            TypeShape::Array(component) => self.class_of(component).map(RawClass::to_array),
            TypeShape::Variable { owner, name } => {
                let param = self.registry.get(owner.as_str())?.type_param(name)?;
                match param.bounds().first() {
                    Some(bound) => self.class_of(bound),
                    None => Some(object_class()),
                }
            }
            TypeShape::Wildcard { upper } => match upper.first() {
                Some(bound) => self.class_of(bound),
                None => Some(object_class()),
            },
            TypeShape::Any => Some(object_class()),
        }
    }
}

#[inline]
pub(super) fn object_class() -> RawClass {
    RawClass::Named(ClassName::from_static(OBJECT_CLASS))
}
