use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{ClassName, PrimitiveKind};
use crate::registry::OBJECT_CLASS;

// -----------------------------------------------------------------------------
// TypeShape

/// The shape of a type as it appears in a declaration.
///
/// A shape may still mention type variables of the class that declares it;
/// [`TypeResolver::resolve`](crate::resolve::TypeResolver::resolve) turns it into a
/// variable-free shape given a context type.
///
/// The [`Display`](fmt::Display) implementation renders the canonical wire name:
///
/// | Shape | Wire name |
/// |-------|-----------|
/// | `Simple(a::B)` | `a::B` |
/// | `Parameterized(List, [string])` | `List<string>` |
/// | `Array(string)` | `string[]` |
/// | `Array(i32)` | `i32[p]` |
/// | `Wildcard([])` | `?` |
/// | `Wildcard([Number])` | `? extends Number` |
/// | `Any` | `*` |
/// | `Variable(_, T)` | `T` |
///
/// # Examples
///
/// ```
/// use vc_schema::info::TypeShape;
///
/// let list = TypeShape::parameterized("List", [TypeShape::simple("string")]);
/// assert_eq!(list.to_string(), "List<string>");
///
/// let ints = TypeShape::simple("i32").to_array_type().unwrap();
/// assert!(ints.is_array());
/// assert_eq!(ints.to_string(), "i32[p]");
/// assert_eq!(ints.component_type(), Some(&TypeShape::simple("i32")));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeShape {
    /// A plain class.
    Simple(ClassName),
    /// A generic class with its type arguments.
    Parameterized {
        raw: ClassName,
        args: Vec<TypeShape>,
    },
    /// An array of the component type.
    Array(Box<TypeShape>),
    /// A type variable declared by `owner`. Its bounds live on the owner's
    /// [`TypeParam`](crate::info::TypeParam).
    Variable {
        owner: ClassName,
        name: Cow<'static, str>,
    },
    /// A wildcard with its upper bounds. No bounds means the root class.
    Wildcard { upper: Vec<TypeShape> },
    /// The universal type, what an unbounded variable resolves to.
    Any,
}

impl TypeShape {
    /// Creates a [`TypeShape::Simple`].
    #[inline]
    pub fn simple(class: impl Into<ClassName>) -> Self {
        Self::Simple(class.into())
    }

    /// Creates a [`TypeShape::Parameterized`].
    #[inline]
    pub fn parameterized(
        raw: impl Into<ClassName>,
        args: impl IntoIterator<Item = TypeShape>,
    ) -> Self {
        Self::Parameterized {
            raw: raw.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Creates a [`TypeShape::Array`] of `component`.
    #[inline]
    pub fn array(component: TypeShape) -> Self {
        Self::Array(Box::new(component))
    }

    /// Creates a [`TypeShape::Variable`] declared by `owner`.
    #[inline]
    pub fn variable(owner: impl Into<ClassName>, name: impl Into<Cow<'static, str>>) -> Self {
        Self::Variable {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Creates a [`TypeShape::Wildcard`].
    #[inline]
    pub fn wildcard(upper: impl IntoIterator<Item = TypeShape>) -> Self {
        Self::Wildcard {
            upper: upper.into_iter().collect(),
        }
    }

    /// Returns `true` for array shapes.
    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns the component of an array shape.
    #[inline]
    pub fn component_type(&self) -> Option<&TypeShape> {
        match self {
            Self::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Returns the array type whose component is `self`.
    ///
    /// Only class-like shapes (simple, parameterized, array) have an array type.
    pub fn to_array_type(&self) -> Option<TypeShape> {
        match self {
            Self::Simple(_) | Self::Parameterized { .. } | Self::Array(_) => {
                Some(Self::array(self.clone()))
            }
            Self::Variable { .. } | Self::Wildcard { .. } | Self::Any => None,
        }
    }

    /// Returns the class named directly by a simple or parameterized shape.
    #[inline]
    pub fn raw_name(&self) -> Option<&ClassName> {
        match self {
            Self::Simple(name) | Self::Parameterized { raw: name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns `true` if a type variable occurs anywhere in the shape.
    pub fn has_variables(&self) -> bool {
        match self {
            Self::Variable { .. } => true,
            Self::Simple(_) | Self::Any => false,
            Self::Parameterized { args, .. } => args.iter().any(Self::has_variables),
            Self::Array(component) => component.has_variables(),
            Self::Wildcard { upper } => upper.iter().any(Self::has_variables),
        }
    }
}

impl From<ClassName> for TypeShape {
    #[inline]
    fn from(value: ClassName) -> Self {
        Self::Simple(value)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(name) => f.write_str(name.as_str()),
            Self::Parameterized { raw, args } => {
                write!(f, "{raw}<")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Self::Array(component) => {
                let primitive = matches!(
                    &**component,
                    Self::Simple(name) if PrimitiveKind::from_name(name.as_str()).is_some()
                );
                if primitive {
                    write!(f, "{component}[p]")
                } else {
                    write!(f, "{component}[]")
                }
            }
            Self::Variable { name, .. } => f.write_str(name),
            Self::Wildcard { upper } => match upper.as_slice() {
                [] => f.write_str("?"),
                [Self::Simple(name)] if name == OBJECT_CLASS => f.write_str("?"),
                [first, rest @ ..] => {
                    write!(f, "? extends {first}")?;
                    for bound in rest {
                        write!(f, " & {bound}")?;
                    }
                    Ok(())
                }
            },
            Self::Any => f.write_str("*"),
        }
    }
}

impl fmt::Debug for TypeShape {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{self}`")
    }
}
