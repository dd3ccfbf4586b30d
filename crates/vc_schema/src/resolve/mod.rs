//! Generic-variable resolution and the type algebra helpers.
//!
//! ## Menu
//!
//! - [`TypeResolver`]: substitutes type variables given a context type, and
//!   answers subclass / assignability questions against a [`ClassRegistry`].
//! - [`TypeBindings`]: the variable bindings a context type establishes over its ancestry.
//! - [`RawClass`]: the erased class of a type shape, see [`TypeResolver::class_of`].
//!
//! ## Resolution rule
//!
//! Resolution always ends in a variable-free shape. A variable bound by the
//! context is replaced by its argument; a free variable is replaced according
//! to the bounds declared on its [`TypeParam`]:
//!
//! | Bounds | Result |
//! |--------|--------|
//! | none   | [`TypeShape::Any`] |
//! | one    | the bound, resolved recursively |
//! | more   | [`MultipleBoundsUnsupported`] |
//!
//! A variable met again while resolving its own bound (`T: Comparable<T>`)
//! becomes [`TypeShape::Any`].
//!
//! [`ClassRegistry`]: crate::registry::ClassRegistry
//! [`TypeParam`]: crate::info::TypeParam
//! [`TypeShape::Any`]: crate::info::TypeShape::Any
//! [`MultipleBoundsUnsupported`]: crate::SchemaErrorKind::MultipleBoundsUnsupported

// -----------------------------------------------------------------------------
// Modules

mod bindings;
mod raw_class;
mod relation;
mod resolver;

// -----------------------------------------------------------------------------
// Exports

pub use bindings::TypeBindings;
pub use raw_class::RawClass;
pub use resolver::TypeResolver;
