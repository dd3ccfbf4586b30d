use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, type_name};

use thiserror::Error;

// -----------------------------------------------------------------------------
// Object

/// A type-erased instance read from, or rebuilt for, the wire.
pub type Object = Box<dyn Any + Send + Sync>;

// -----------------------------------------------------------------------------
// InvokeError

/// A failure while calling a registered reader, setter or constructor.
///
/// These only happen at encode/decode time, when values of the wrong type
/// reach an invoker; schema derivation itself never invokes anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvokeError {
    #[error("receiver is not a `{expected}`")]
    ReceiverMismatch { expected: &'static str },

    #[error("argument {index} is not a `{expected}`")]
    ArgumentMismatch { index: usize, expected: &'static str },

    #[error("argument {0} is missing or was already taken")]
    MissingArgument(usize),

    #[error("expected {expected} arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("expected {expected} property values, found {found}")]
    ValueCountMismatch { expected: usize, found: usize },

    #[error("member `{0}` has no registered invoker")]
    NoInvoker(Cow<'static, str>),

    #[error("`{0}` has no constructor for deserialization")]
    NotConstructible(Cow<'static, str>),
}

// -----------------------------------------------------------------------------
// Arguments

/// Positional constructor arguments.
///
/// Each argument can be taken out once, downcast to its concrete type.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{Arguments, Object};
///
/// let values: Vec<Object> = vec![Box::new(1_i32) as Object, Box::new(String::from("a"))];
/// let mut args = Arguments::new(values);
///
/// let name: String = args.take(1).unwrap();
/// let id: i32 = args.take(0).unwrap();
/// assert_eq!((id, name.as_str()), (1, "a"));
/// assert!(args.take::<i32>(0).is_err());
/// ```
pub struct Arguments {
    slots: Vec<Option<Object>>,
}

impl Arguments {
    /// Wraps the argument values, in parameter order.
    pub fn new(values: Vec<Object>) -> Self {
        Self {
            slots: values.into_iter().map(Some).collect(),
        }
    }

    /// Returns the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Takes the argument at `index` as a `T`.
    ///
    /// A mismatched argument is left in place.
    pub fn take<T: Any>(&mut self, index: usize) -> Result<T, InvokeError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InvokeError::MissingArgument(index))?;
        let value = slot.take().ok_or(InvokeError::MissingArgument(index))?;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => {
                *slot = Some(value);
                Err(InvokeError::ArgumentMismatch {
                    index,
                    expected: type_name::<T>(),
                })
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Downcasts a receiver, reporting the expected type on failure.
pub(crate) fn receiver<T: Any>(object: &dyn Any) -> Result<&T, InvokeError> {
    object
        .downcast_ref::<T>()
        .ok_or(InvokeError::ReceiverMismatch {
            expected: type_name::<T>(),
        })
}

/// Mutable counterpart of [`receiver`].
pub(crate) fn receiver_mut<T: Any>(object: &mut dyn Any) -> Result<&mut T, InvokeError> {
    object
        .downcast_mut::<T>()
        .ok_or(InvokeError::ReceiverMismatch {
            expected: type_name::<T>(),
        })
}

/// Downcasts an owned value passed to a setter.
pub(crate) fn value<T: Any>(object: Object) -> Result<T, InvokeError> {
    object
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| InvokeError::ArgumentMismatch {
            index: 0,
            expected: type_name::<T>(),
        })
}
