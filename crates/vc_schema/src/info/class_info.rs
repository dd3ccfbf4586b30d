use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{ClassName, ConstructorInfo, FieldInfo, MethodInfo, PrimitiveKind, TypeShape};

// -----------------------------------------------------------------------------
// ClassKind

/// What sort of class a [`ClassInfo`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// A concrete data record, rebuilt through one of its constructors.
    Record,
    /// An abstract class; instances are built through a concrete subclass.
    Abstract,
    /// An interface.
    Interface,
    /// A primitive value.
    Primitive(PrimitiveKind),
    /// The nullable boxed form of a primitive.
    Boxed(PrimitiveKind),
    /// A raw byte sequence.
    Bytes,
    /// A builtin class the codec layer handles natively, e.g. `string`.
    Opaque,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record => f.pad("Record"),
            Self::Abstract => f.pad("Abstract"),
            Self::Interface => f.pad("Interface"),
            Self::Primitive(_) => f.pad("Primitive"),
            Self::Boxed(_) => f.pad("Boxed"),
            Self::Bytes => f.pad("Bytes"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeParam

/// A type parameter declared by a class, with its upper bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    name: Cow<'static, str>,
    bounds: Vec<TypeShape>,
}

impl TypeParam {
    #[inline]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        bounds: impl IntoIterator<Item = TypeShape>,
    ) -> Self {
        Self {
            name: name.into(),
            bounds: bounds.into_iter().collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn bounds(&self) -> &[TypeShape] {
        &self.bounds
    }
}

// -----------------------------------------------------------------------------
// ClassInfo

/// The registered structure of a class.
///
/// Only *declared* members are recorded here; members inherited from the
/// superclass are found by walking [`superclass`](Self::superclass) through the
/// [`ClassRegistry`](crate::registry::ClassRegistry).
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, ClassKind, TypeShape};
///
/// // class Holder<T> extends Base implements Container<T>
/// let holder = ClassInfo::record("demo::Holder")
///     .with_type_param("T", [])
///     .with_superclass(TypeShape::simple("demo::Base"))
///     .with_interface(TypeShape::parameterized(
///         "demo::Container",
///         [TypeShape::variable("demo::Holder", "T")],
///     ));
///
/// assert_eq!(holder.kind(), ClassKind::Record);
/// assert!(holder.is_concrete());
/// assert_eq!(holder.self_type().to_string(), "demo::Holder<T>");
/// ```
#[derive(Debug, Clone)]
pub struct ClassInfo {
    name: ClassName,
    kind: ClassKind,
    type_params: Vec<TypeParam>,
    superclass: Option<TypeShape>,
    interfaces: Vec<TypeShape>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
    constructors: Vec<ConstructorInfo>,
    primary_constructor: Option<usize>,
    serializable: bool,
}

impl ClassInfo {
    /// Creates an empty class of the given kind.
    pub fn new(name: impl Into<ClassName>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            primary_constructor: None,
            serializable: false,
        }
    }

    /// Creates a concrete record class.
    #[inline]
    pub fn record(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassKind::Record)
    }

    /// Creates an abstract class.
    #[inline]
    pub fn abstract_class(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassKind::Abstract)
    }

    /// Creates an interface.
    #[inline]
    pub fn interface(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassKind::Interface)
    }

    /// Declares a type parameter.
    #[inline]
    pub fn with_type_param(
        mut self,
        name: impl Into<Cow<'static, str>>,
        bounds: impl IntoIterator<Item = TypeShape>,
    ) -> Self {
        self.type_params.push(TypeParam::new(name, bounds));
        self
    }

    /// Sets the (possibly generic) superclass.
    #[inline]
    pub fn with_superclass(mut self, superclass: TypeShape) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Adds a directly implemented (possibly generic) interface.
    #[inline]
    pub fn with_interface(mut self, interface: TypeShape) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[inline]
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    #[inline]
    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    #[inline]
    pub fn with_constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Adds a constructor and records it as the designated primary constructor.
    #[inline]
    pub fn with_primary_constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.primary_constructor = Some(self.constructors.len());
        self.constructors.push(constructor);
        self
    }

    /// Attaches the inheritable serializable marker.
    #[inline]
    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    /// Returns the class name.
    #[inline]
    pub const fn name(&self) -> &ClassName {
        &self.name
    }

    #[inline]
    pub const fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Returns `true` for classes whose instances are rebuilt by a constructor.
    #[inline]
    pub const fn is_concrete(&self) -> bool {
        matches!(self.kind, ClassKind::Record)
    }

    #[inline]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface)
    }

    #[inline]
    pub fn type_params(&self) -> &[TypeParam] {
        &self.type_params
    }

    /// Returns the declared type parameter called `name`.
    pub fn type_param(&self, name: &str) -> Option<&TypeParam> {
        self.type_params.iter().find(|param| param.name() == name)
    }

    /// Returns the type variable `name` declared by this class.
    #[inline]
    pub fn variable(&self, name: impl Into<Cow<'static, str>>) -> TypeShape {
        TypeShape::variable(self.name.clone(), name)
    }

    /// Returns the class as seen from inside its own declaration:
    /// the bare class, or the class applied to its own type variables.
    pub fn self_type(&self) -> TypeShape {
        if self.type_params.is_empty() {
            return TypeShape::Simple(self.name.clone());
        }
        TypeShape::parameterized(
            self.name.clone(),
            self.type_params
                .iter()
                .map(|param| self.variable(Cow::Owned(param.name().into()))),
        )
    }

    #[inline]
    pub const fn superclass(&self) -> Option<&TypeShape> {
        self.superclass.as_ref()
    }

    #[inline]
    pub fn interfaces(&self) -> &[TypeShape] {
        &self.interfaces
    }

    /// Returns the declared fields.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the declared methods.
    #[inline]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    #[inline]
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// Returns the index of the designated primary constructor, if any.
    #[inline]
    pub const fn primary_constructor(&self) -> Option<usize> {
        self.primary_constructor
    }

    /// Returns `true` if the class itself carries the serializable marker.
    ///
    /// Inherited markers are resolved by
    /// [`WhitelistPolicy`](crate::policy::WhitelistPolicy).
    #[inline]
    pub const fn is_serializable(&self) -> bool {
        self.serializable
    }
}
