//! Schema derivation errors and their breadcrumb path.
//!
//! Derivation is recursive: deriving one class derives its properties, which
//! resolves their types, and so on. A failure deep inside is annotated on the
//! way out with [`with_path`], so the final error tells where it happened:
//!
//! ```text
//! type `demo::Order` -> property `lines` -> type `List<T>` -> `T` has 2 bounds, only one is supported
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::{error, fmt};

use thiserror::Error;

use crate::info::{ClassName, TypeShape};

// -----------------------------------------------------------------------------
// SchemaErrorKind

/// The cause of a [`SchemaError`].
///
/// Every kind is terminal for the type under derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaErrorKind {
    #[error("no unique constructor for `{class}`, mark one for deserialization")]
    AmbiguousConstructor { class: ClassName },

    #[error("more than one constructor of `{class}` is marked for deserialization")]
    MultipleAnnotatedConstructors { class: ClassName },

    #[error("constructor parameter `{parameter}` of `{class}` matches no property")]
    UnmatchedParameter { class: ClassName, parameter: String },

    #[error("constructor parameter {index} of `{class}` has no name")]
    AnonymousParameter { class: ClassName, index: usize },

    #[error("property `{property}` of `{class}` has neither a getter nor a readable field")]
    MissingAccessor { class: ClassName, property: String },

    #[error("property `{property}` of `{class}`: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        class: ClassName,
        property: String,
        expected: TypeShape,
        found: TypeShape,
    },

    #[error("setter for `{property}` of `{class}` takes {count} arguments, expected one")]
    TooManyArguments {
        class: ClassName,
        property: String,
        count: usize,
    },

    #[error("`{variable}` has {count} bounds, only one is supported")]
    MultipleBoundsUnsupported { variable: String, count: usize },

    #[error("class `{class}` is not on the whitelist and not marked serializable")]
    NotWhitelisted { class: ClassName },

    #[error("cannot derive a class from `{shape}`")]
    UnsupportedTypeShape { shape: TypeShape },

    #[error("class `{class}` is not registered")]
    UnknownClass { class: ClassName },

    #[error("constructor of `{class}` captures its enclosing instance through `{parameter}`")]
    SyntheticParameter { class: ClassName, parameter: String },

    #[error("no codec for `{ty}`: {reason}")]
    Codec { ty: TypeShape, reason: String },
}

// -----------------------------------------------------------------------------
// SchemaError

/// A failed schema derivation: the cause plus where it happened.
///
/// The path lists breadcrumbs from the outermost derivation step inwards.
///
/// # Examples
///
/// ```
/// use vc_schema::error::{with_path, SchemaError, SchemaErrorKind};
///
/// let result: Result<(), _> = with_path(
///     || "type `demo::Outer`".into(),
///     || with_path(
///         || "property `inner`".into(),
///         || Err(SchemaError::new(SchemaErrorKind::UnknownClass { class: "demo::Inner".into() })),
///     ),
/// );
///
/// let err = result.unwrap_err();
/// assert_eq!(err.path(), ["type `demo::Outer`", "property `inner`"]);
/// assert_eq!(
///     err.to_string(),
///     "type `demo::Outer` -> property `inner` -> class `demo::Inner` is not registered",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    kind: SchemaErrorKind,
    path: Vec<String>,
}

/// The result of a schema derivation step.
pub type SchemaResult<T> = Result<T, SchemaError>;

impl SchemaError {
    /// Creates an error without breadcrumbs.
    #[inline]
    pub const fn new(kind: SchemaErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    /// Returns the cause.
    #[inline]
    pub const fn kind(&self) -> &SchemaErrorKind {
        &self.kind
    }

    /// Consumes the error, returning the cause.
    #[inline]
    pub fn into_kind(self) -> SchemaErrorKind {
        self.kind
    }

    /// Returns the breadcrumbs, outermost first.
    #[inline]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Prepends an outer breadcrumb.
    #[inline]
    pub fn annotate(mut self, breadcrumb: String) -> Self {
        self.path.insert(0, breadcrumb);
        self
    }
}

impl From<SchemaErrorKind> for SchemaError {
    #[inline]
    fn from(kind: SchemaErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for breadcrumb in &self.path {
            write!(f, "{breadcrumb} -> ")?;
        }
        fmt::Display::fmt(&self.kind, f)
    }
}

impl error::Error for SchemaError {}

// -----------------------------------------------------------------------------
// with_path

/// Runs `operation`, annotating a failure with the breadcrumb from `describe`.
///
/// `describe` only runs on failure.
#[inline]
pub fn with_path<T>(
    describe: impl FnOnce() -> String,
    operation: impl FnOnce() -> SchemaResult<T>,
) -> SchemaResult<T> {
    operation().map_err(|err| err.annotate(describe()))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{SchemaError, SchemaErrorKind, with_path};
    use crate::info::TypeShape;

    #[test]
    fn success_skips_describe() {
        let result = with_path(|| unreachable!(), || Ok(3));
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn breadcrumbs_render_outer_to_inner() {
        let kind = SchemaErrorKind::MultipleBoundsUnsupported {
            variable: "T".into(),
            count: 2,
        };
        let err = SchemaError::from(kind)
            .annotate("type `List<T>`".into())
            .annotate("property `lines`".into())
            .annotate("type `demo::Order`".into());

        assert_eq!(
            err.to_string(),
            "type `demo::Order` -> property `lines` -> type `List<T>` -> `T` has 2 bounds, only one is supported"
        );
    }

    #[test]
    fn bare_error_is_the_cause() {
        let err = SchemaError::new(SchemaErrorKind::UnsupportedTypeShape {
            shape: TypeShape::Any,
        });
        assert!(err.path().is_empty());
        assert_eq!(err.to_string(), "cannot derive a class from `*`");
    }
}
