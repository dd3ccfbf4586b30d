use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::{SchemaError, SchemaErrorKind, SchemaResult};
use crate::info::{ClassInfo, ClassName, ConstructorInfo, InvokeError, Object, ParamInfo, TypeShape};
use crate::registry::ClassRegistry;

// -----------------------------------------------------------------------------
// ConstructorSpec

/// The constructor chosen to rebuild instances of a class.
#[derive(Debug, Clone)]
pub struct ConstructorSpec {
    class: ClassName,
    index: usize,
    constructor: ConstructorInfo,
}

impl ConstructorSpec {
    /// Returns the class the constructor belongs to.
    #[inline]
    pub const fn class(&self) -> &ClassName {
        &self.class
    }

    /// Returns the position of the constructor among the declared ones.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn constructor(&self) -> &ConstructorInfo {
        &self.constructor
    }

    /// Returns the formal parameters, in declaration order.
    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        self.constructor.params()
    }

    /// Calls the constructor, whatever its declared visibility.
    #[inline]
    pub fn invoke(&self, args: Vec<Object>) -> Result<Object, InvokeError> {
        self.constructor.invoke(args)
    }
}

// -----------------------------------------------------------------------------
// ConstructorSelector

/// Picks the canonical decode-time constructor of a concrete class.
///
/// Candidates, by priority:
///
/// 1. The constructor marked [for deserialization]. Marking more than one is
///    [`MultipleAnnotatedConstructors`].
/// 2. The only constructor.
/// 3. Out of exactly two constructors, the one that takes parameters when
///    the other takes none.
/// 4. The designated [primary constructor].
///
/// Anything else is [`AmbiguousConstructor`].
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, ConstructorInfo, ParamInfo, TypeShape};
/// use vc_schema::registry::ClassRegistry;
/// use vc_schema::schema::ConstructorSelector;
///
/// let name = || ParamInfo::new("name", TypeShape::simple("string"));
/// let mut registry = ClassRegistry::new();
/// registry.insert(
///     ClassInfo::record("demo::Tag")
///         .with_constructor(ConstructorInfo::new([]))
///         .with_constructor(ConstructorInfo::new([name()])),
/// );
///
/// let selector = ConstructorSelector::new(&registry);
/// let spec = selector.select(&TypeShape::simple("demo::Tag")).unwrap().unwrap();
/// assert_eq!(spec.index(), 1);
/// assert_eq!(spec.params()[0].name(), Some("name"));
/// ```
///
/// [for deserialization]: ConstructorInfo::for_deserialization
/// [primary constructor]: ClassInfo::with_primary_constructor
/// [`MultipleAnnotatedConstructors`]: SchemaErrorKind::MultipleAnnotatedConstructors
/// [`AmbiguousConstructor`]: SchemaErrorKind::AmbiguousConstructor
#[derive(Debug, Clone, Copy)]
pub struct ConstructorSelector<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> ConstructorSelector<'a> {
    #[inline]
    pub const fn new(registry: &'a ClassRegistry) -> Self {
        Self { registry }
    }

    /// Selects the constructor of the class of `ty`.
    ///
    /// Returns `None` for classes that are never constructed directly:
    /// abstract classes, interfaces, builtins and arrays.
    pub fn select(&self, ty: &TypeShape) -> SchemaResult<Option<ConstructorSpec>> {
        match ty {
            TypeShape::Simple(name) | TypeShape::Parameterized { raw: name, .. } => {
                self.select_for(self.registry.require(name)?)
            }
            TypeShape::Array(_) => Ok(None),
            TypeShape::Variable { .. } | TypeShape::Wildcard { .. } | TypeShape::Any => {
                Err(SchemaError::new(SchemaErrorKind::UnsupportedTypeShape {
                    shape: ty.clone(),
                }))
            }
        }
    }

    /// Selects the constructor of `class`.
    pub fn select_for(&self, class: &ClassInfo) -> SchemaResult<Option<ConstructorSpec>> {
        if !class.is_concrete() {
            return Ok(None);
        }
        let index = candidate(class)?;
        let Some(constructor) = class.constructors().get(index) else {
            return Err(SchemaError::new(SchemaErrorKind::AmbiguousConstructor {
                class: class.name().clone(),
            }));
        };

        if let Some(first) = constructor.params().first()
            && first.is_synthetic()
        {
            return Err(SchemaError::new(SchemaErrorKind::SyntheticParameter {
                class: class.name().clone(),
                parameter: first.name().unwrap_or("this$0").to_string(),
            }));
        }

        if !constructor.visibility().is_public() {
            log::debug!(
                "using {:?} constructor {index} of `{}` for deserialization",
                constructor.visibility(),
                class.name(),
            );
        }

        Ok(Some(ConstructorSpec {
            class: class.name().clone(),
            index,
            constructor: constructor.clone(),
        }))
    }
}

fn candidate(class: &ClassInfo) -> SchemaResult<usize> {
    let constructors = class.constructors();

    let mut marked = constructors
        .iter()
        .enumerate()
        .filter(|(_, ctor)| ctor.is_for_deserialization())
        .map(|(index, _)| index);
    match (marked.next(), marked.next()) {
        (Some(index), None) => return Ok(index),
        (Some(_), Some(_)) => {
            return Err(SchemaError::new(
                SchemaErrorKind::MultipleAnnotatedConstructors {
                    class: class.name().clone(),
                },
            ));
        }
        _ => {}
    }

    if constructors.len() == 1 {
        return Ok(0);
    }
    if let [a, b] = constructors {
        match (a.params().is_empty(), b.params().is_empty()) {
            (true, false) => return Ok(1),
            (false, true) => return Ok(0),
            _ => {}
        }
    }
    if let Some(primary) = class.primary_constructor() {
        return Ok(primary);
    }
    Err(SchemaError::new(SchemaErrorKind::AmbiguousConstructor {
        class: class.name().clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::ConstructorSelector;
    use crate::SchemaErrorKind;
    use crate::info::{ClassInfo, ConstructorInfo, ParamInfo, TypeShape, Visibility};
    use crate::registry::ClassRegistry;

    fn param(name: &'static str) -> ParamInfo {
        ParamInfo::new(name, TypeShape::simple("i32"))
    }

    fn select(class: ClassInfo) -> Result<Option<usize>, SchemaErrorKind> {
        let registry = ClassRegistry::new();
        ConstructorSelector::new(&registry)
            .select_for(&class)
            .map(|spec| spec.map(|spec| spec.index()))
            .map_err(|err| err.into_kind())
    }

    #[test]
    fn single_constructor_is_selected() {
        let class = ClassInfo::record("demo::One").with_constructor(
            ConstructorInfo::new([param("a")]).with_visibility(Visibility::Private),
        );
        assert_eq!(select(class), Ok(Some(0)));
    }

    #[test]
    fn non_trivial_of_two_is_selected() {
        let class = ClassInfo::record("demo::Two")
            .with_constructor(ConstructorInfo::new([param("a"), param("b")]))
            .with_constructor(ConstructorInfo::new([]));
        assert_eq!(select(class), Ok(Some(0)));
    }

    #[test]
    fn marked_constructor_wins() {
        let class = ClassInfo::record("demo::Marked")
            .with_constructor(ConstructorInfo::new([param("a")]))
            .with_constructor(ConstructorInfo::new([param("a"), param("b")]).for_deserialization())
            .with_primary_constructor(ConstructorInfo::new([param("b")]));
        assert_eq!(select(class), Ok(Some(1)));
    }

    #[test]
    fn primary_constructor_breaks_ties() {
        let class = ClassInfo::record("demo::Primary")
            .with_constructor(ConstructorInfo::new([param("a")]))
            .with_primary_constructor(ConstructorInfo::new([param("a"), param("b")]));
        assert_eq!(select(class), Ok(Some(1)));
    }

    #[test]
    fn ambiguity_is_an_error() {
        let class = ClassInfo::record("demo::Ambiguous")
            .with_constructor(ConstructorInfo::new([param("a")]))
            .with_constructor(ConstructorInfo::new([param("b")]));
        assert_eq!(
            select(class),
            Err(SchemaErrorKind::AmbiguousConstructor {
                class: "demo::Ambiguous".into()
            }),
        );

        let empty = ClassInfo::record("demo::Empty");
        assert!(matches!(
            select(empty),
            Err(SchemaErrorKind::AmbiguousConstructor { .. })
        ));
    }

    #[test]
    fn two_marked_constructors_are_an_error() {
        let class = ClassInfo::record("demo::Twice")
            .with_constructor(ConstructorInfo::new([param("a")]).for_deserialization())
            .with_constructor(ConstructorInfo::new([param("b")]).for_deserialization());
        assert_eq!(
            select(class),
            Err(SchemaErrorKind::MultipleAnnotatedConstructors {
                class: "demo::Twice".into()
            }),
        );
    }

    #[test]
    fn abstract_types_have_no_constructor() {
        let class = ClassInfo::abstract_class("demo::Base")
            .with_constructor(ConstructorInfo::new([param("a")]));
        assert_eq!(select(class), Ok(None));
        assert_eq!(select(ClassInfo::interface("demo::Api")), Ok(None));
    }

    #[test]
    fn inner_class_capture_is_rejected() {
        let class = ClassInfo::record("demo::Outer::Inner").with_constructor(
            ConstructorInfo::new([
                ParamInfo::synthetic("this$0", TypeShape::simple("demo::Outer")),
                param("a"),
            ]),
        );
        assert_eq!(
            select(class),
            Err(SchemaErrorKind::SyntheticParameter {
                class: "demo::Outer::Inner".into(),
                parameter: "this$0".into(),
            }),
        );
    }

    #[test]
    fn select_by_type() {
        let mut registry = ClassRegistry::new();
        registry.insert(
            ClassInfo::record("demo::One").with_constructor(ConstructorInfo::new([param("a")])),
        );
        let selector = ConstructorSelector::new(&registry);

        assert!(selector.select(&TypeShape::simple("demo::One")).unwrap().is_some());
        assert!(selector.select(&TypeShape::simple("string")).unwrap().is_none());
        assert!(selector.select(&TypeShape::array(TypeShape::simple("demo::One"))).unwrap().is_none());
        assert!(selector.select(&TypeShape::Any).is_err());
    }
}
