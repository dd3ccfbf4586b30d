use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::info::TypeShape;
use crate::info::invoke::{Arguments, InvokeError, Object};
use crate::info::invoke::{receiver, receiver_mut, value};

type ReadFn = Arc<dyn Fn(&dyn Any) -> Result<Object, InvokeError> + Send + Sync>;
type WriteFn = Arc<dyn Fn(&mut dyn Any, Object) -> Result<(), InvokeError> + Send + Sync>;
type ConstructFn = Arc<dyn Fn(&mut Arguments) -> Result<Object, InvokeError> + Send + Sync>;

// -----------------------------------------------------------------------------
// Visibility

/// Declared visibility of a member.
///
/// Only public methods are considered property accessors. Constructors and
/// fields are used regardless of their visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    /// Returns `true` for [`Visibility::Public`].
    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

// -----------------------------------------------------------------------------
// ParamInfo

/// A formal parameter of a method or constructor.
///
/// Constructor parameters must keep their names: they are matched against
/// property names when building a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    name: Option<Cow<'static, str>>,
    ty: TypeShape,
    synthetic: bool,
}

impl ParamInfo {
    /// Creates a named parameter.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeShape) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            synthetic: false,
        }
    }

    /// Creates a parameter whose name was not retained.
    #[inline]
    pub fn anonymous(ty: TypeShape) -> Self {
        Self {
            name: None,
            ty,
            synthetic: false,
        }
    }

    /// Creates a compiler-inserted parameter, such as the enclosing instance
    /// captured by an inner class.
    #[inline]
    pub fn synthetic(name: impl Into<Cow<'static, str>>, ty: TypeShape) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            synthetic: true,
        }
    }

    /// Returns the parameter name, if retained.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the declared type.
    #[inline]
    pub const fn ty(&self) -> &TypeShape {
        &self.ty
    }

    /// Returns `true` for compiler-inserted parameters.
    #[inline]
    pub const fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A field declared by a class.
///
/// The reader gives direct access to the field value, bypassing whatever
/// visibility the field has. Fields registered without a reader only
/// contribute their shape.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{FieldInfo, TypeShape};
///
/// struct Counter { hits: u64 }
///
/// let field = FieldInfo::new("hits", TypeShape::simple("u64"))
///     .with_reader(|c: &Counter| c.hits);
///
/// let value = field.read(&Counter { hits: 7 }).unwrap();
/// assert_eq!(value.downcast_ref::<u64>(), Some(&7));
/// ```
#[derive(Clone)]
pub struct FieldInfo {
    name: Cow<'static, str>,
    ty: TypeShape,
    is_static: bool,
    reader: Option<ReadFn>,
}

impl FieldInfo {
    /// Creates a field without a reader.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeShape) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
            reader: None,
        }
    }

    /// Attaches a reader returning the field value of a `T`.
    pub fn with_reader<T, V>(mut self, read: impl Fn(&T) -> V + Send + Sync + 'static) -> Self
    where
        T: Any,
        V: Any + Send + Sync,
    {
        self.reader = Some(Arc::new(move |object: &dyn Any| {
            Ok(Box::new(read(receiver::<T>(object)?)) as Object)
        }));
        self
    }

    /// Marks the field as static; static fields are never properties.
    #[inline]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared (possibly generic) type.
    #[inline]
    pub const fn ty(&self) -> &TypeShape {
        &self.ty
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns `true` if the field value can be read directly.
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.reader.is_some()
    }

    /// Reads the field from `object`.
    pub fn read(&self, object: &dyn Any) -> Result<Object, InvokeError> {
        match &self.reader {
            Some(read) => read(object),
            None => Err(InvokeError::NoInvoker(self.name.clone())),
        }
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("is_static", &self.is_static)
            .field("readable", &self.is_readable())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MethodInfo

#[derive(Clone)]
enum MethodInvoker {
    Get(ReadFn),
    Set(WriteFn),
}

/// A method declared by a class.
///
/// Getters and setters are usually created with [`MethodInfo::getter`] and
/// [`MethodInfo::setter`]. Other methods may be registered with
/// [`MethodInfo::new`] for their shape only; they take part in accessor
/// discovery but cannot be invoked.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{MethodInfo, TypeShape};
///
/// #[derive(Default)]
/// struct Bean { value: String }
///
/// let ty = TypeShape::simple("string");
/// let get = MethodInfo::getter("getValue", ty.clone(), |b: &Bean| b.value.clone());
/// let set = MethodInfo::setter("setValue", ty, |b: &mut Bean, v: String| b.value = v);
///
/// let mut bean = Bean::default();
/// set.invoke_set(&mut bean, Box::new(String::from("hi"))).unwrap();
///
/// let value = get.invoke_get(&bean).unwrap();
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "hi");
/// ```
#[derive(Clone)]
pub struct MethodInfo {
    name: Cow<'static, str>,
    params: Vec<ParamInfo>,
    return_ty: Option<TypeShape>,
    visibility: Visibility,
    is_static: bool,
    invoker: Option<MethodInvoker>,
}

impl MethodInfo {
    /// Creates a public, parameterless method returning nothing.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_ty: None,
            visibility: Visibility::Public,
            is_static: false,
            invoker: None,
        }
    }

    /// Creates a public getter on `T` returning `ty`.
    pub fn getter<T, V>(
        name: impl Into<Cow<'static, str>>,
        ty: TypeShape,
        get: impl Fn(&T) -> V + Send + Sync + 'static,
    ) -> Self
    where
        T: Any,
        V: Any + Send + Sync,
    {
        let invoker: ReadFn = Arc::new(move |object: &dyn Any| {
            Ok(Box::new(get(receiver::<T>(object)?)) as Object)
        });
        Self {
            return_ty: Some(ty),
            invoker: Some(MethodInvoker::Get(invoker)),
            ..Self::new(name)
        }
    }

    /// Creates a public setter on `T` taking a single `ty` argument.
    pub fn setter<T, V>(
        name: impl Into<Cow<'static, str>>,
        ty: TypeShape,
        set: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self
    where
        T: Any,
        V: Any,
    {
        let invoker: WriteFn = Arc::new(move |object: &mut dyn Any, arg: Object| {
            let arg = value::<V>(arg)?;
            set(receiver_mut::<T>(object)?, arg);
            Ok(())
        });
        Self {
            params: alloc::vec![ParamInfo::new("value", ty)],
            invoker: Some(MethodInvoker::Set(invoker)),
            ..Self::new(name)
        }
    }

    /// Replaces the formal parameters.
    #[inline]
    pub fn with_params(mut self, params: impl IntoIterator<Item = ParamInfo>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    /// Sets the declared return type.
    #[inline]
    pub fn with_return(mut self, ty: TypeShape) -> Self {
        self.return_ty = Some(ty);
        self
    }

    #[inline]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Returns the method name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the formal parameters.
    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Returns the declared return type, `None` for methods returning nothing.
    #[inline]
    pub const fn return_ty(&self) -> Option<&TypeShape> {
        self.return_ty.as_ref()
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    /// Calls a getter on `object`.
    pub fn invoke_get(&self, object: &dyn Any) -> Result<Object, InvokeError> {
        match &self.invoker {
            Some(MethodInvoker::Get(get)) => get(object),
            _ => Err(InvokeError::NoInvoker(self.name.clone())),
        }
    }

    /// Calls a setter on `object` with `arg`.
    pub fn invoke_set(&self, object: &mut dyn Any, arg: Object) -> Result<(), InvokeError> {
        match &self.invoker {
            Some(MethodInvoker::Set(set)) => set(object, arg),
            _ => Err(InvokeError::NoInvoker(self.name.clone())),
        }
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_ty", &self.return_ty)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ConstructorInfo

/// A constructor declared by a class.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ConstructorInfo, Object, ParamInfo, TypeShape};
///
/// struct Tag(String);
///
/// let ctor = ConstructorInfo::new([ParamInfo::new("name", TypeShape::simple("string"))])
///     .with_invoker(|args| Ok(Tag(args.take(0)?)));
///
/// let tag = ctor.invoke(vec![Box::new(String::from("x")) as Object]).unwrap();
/// assert_eq!(tag.downcast_ref::<Tag>().unwrap().0, "x");
/// ```
#[derive(Clone)]
pub struct ConstructorInfo {
    params: Vec<ParamInfo>,
    visibility: Visibility,
    for_deserialization: bool,
    invoker: Option<ConstructFn>,
}

impl ConstructorInfo {
    /// Creates a public constructor without an invoker.
    #[inline]
    pub fn new(params: impl IntoIterator<Item = ParamInfo>) -> Self {
        Self {
            params: params.into_iter().collect(),
            visibility: Visibility::Public,
            for_deserialization: false,
            invoker: None,
        }
    }

    /// Attaches the function building a `T` from the arguments.
    pub fn with_invoker<T>(
        mut self,
        construct: impl Fn(&mut Arguments) -> Result<T, InvokeError> + Send + Sync + 'static,
    ) -> Self
    where
        T: Any + Send + Sync,
    {
        self.invoker = Some(Arc::new(move |args: &mut Arguments| {
            construct(args).map(|value| Box::new(value) as Object)
        }));
        self
    }

    #[inline]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks this constructor as the one to use for deserialization.
    #[inline]
    pub fn for_deserialization(mut self) -> Self {
        self.for_deserialization = true;
        self
    }

    /// Returns the formal parameters.
    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns `true` if explicitly marked for deserialization.
    #[inline]
    pub const fn is_for_deserialization(&self) -> bool {
        self.for_deserialization
    }

    /// Calls the constructor, ignoring its declared visibility.
    pub fn invoke(&self, args: Vec<Object>) -> Result<Object, InvokeError> {
        if args.len() != self.params.len() {
            return Err(InvokeError::ArityMismatch {
                expected: self.params.len(),
                found: args.len(),
            });
        }
        match &self.invoker {
            Some(construct) => construct(&mut Arguments::new(args)),
            None => Err(InvokeError::NoInvoker(Cow::Borrowed("constructor"))),
        }
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .field("for_deserialization", &self.for_deserialization)
            .finish()
    }
}
