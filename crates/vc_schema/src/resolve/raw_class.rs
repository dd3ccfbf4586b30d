use alloc::boxed::Box;
use core::fmt;

use crate::info::{ClassName, TypeShape};

/// The erased class of a type shape.
///
/// # Examples
///
/// ```
/// use vc_schema::info::TypeShape;
/// use vc_schema::registry::ClassRegistry;
/// use vc_schema::resolve::{RawClass, TypeResolver};
///
/// let registry = ClassRegistry::new();
/// let resolver = TypeResolver::new(&registry);
///
/// let list = TypeShape::parameterized("List", [TypeShape::simple("string")]);
/// let class = resolver.class_of(&TypeShape::array(list)).unwrap();
///
/// assert_eq!(class, RawClass::Named("List".into()).to_array());
/// assert_eq!(class.to_string(), "List[]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawClass {
    /// A registered class.
    Named(ClassName),
    /// The array class of a component class.
    Array(Box<RawClass>),
}

impl RawClass {
    /// Returns the array class whose component is `self`.
    #[inline]
    pub fn to_array(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Returns the class name, `None` for array classes.
    #[inline]
    pub fn name(&self) -> Option<&ClassName> {
        match self {
            Self::Named(name) => Some(name),
            Self::Array(_) => None,
        }
    }

    /// Returns the component of an array class.
    #[inline]
    pub fn component(&self) -> Option<&RawClass> {
        match self {
            Self::Named(_) => None,
            Self::Array(component) => Some(component),
        }
    }

    /// Returns the raw, argument-free shape of this class.
    pub fn to_shape(&self) -> TypeShape {
        match self {
            Self::Named(name) => TypeShape::Simple(name.clone()),
            Self::Array(component) => TypeShape::array(component.to_shape()),
        }
    }
}

impl fmt::Display for RawClass {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_shape(), f)
    }
}
