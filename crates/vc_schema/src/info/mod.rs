//! Structural descriptions of classes.
//!
//! Rust has no runtime reflection, so every class the codec can see is described
//! up front by a [`ClassInfo`] and stored in a
//! [`ClassRegistry`](crate::registry::ClassRegistry).
//!
//! ## Menu
//!
//! - [`ClassName`]: the identity of a class, e.g. `"demo::Point"` or `"i32"`.
//! - [`TypeShape`]: a (possibly generic) type: simple, parameterized, array,
//!   type variable, wildcard or `Any`.
//! - [`ClassInfo`]: kind, generics, supertypes, fields, methods and constructors of a class.
//!     - [`ClassKind`]: record, abstract class, interface, primitive, boxed primitive, bytes or opaque.
//!     - [`TypeParam`]: a declared type parameter with its bounds.
//! - Members:
//!     - [`FieldInfo`]: a declared field with an optional reader.
//!     - [`MethodInfo`]: a declared method with an optional invoker.
//!     - [`ConstructorInfo`]: a constructor with its named parameters.
//!     - [`ParamInfo`]: a formal parameter, name and declared type.
//!     - [`Visibility`]: declared visibility of a member.
//! - Invocation:
//!     - [`Object`]: a type-erased instance.
//!     - [`Arguments`]: constructor arguments, taken out by position.
//!     - [`InvokeError`]: failures while calling readers, setters and constructors.

// -----------------------------------------------------------------------------
// Modules

mod class_info;
mod class_name;
mod invoke;
mod member;
mod primitive;
mod type_shape;

// -----------------------------------------------------------------------------
// Exports

pub use class_info::{ClassInfo, ClassKind, TypeParam};
pub use class_name::ClassName;
pub use invoke::{Arguments, InvokeError, Object};
pub use member::{ConstructorInfo, FieldInfo, MethodInfo, ParamInfo, Visibility};
pub use primitive::PrimitiveKind;
pub use type_shape::TypeShape;
