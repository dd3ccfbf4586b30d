//! The class registration table standing in for runtime reflection.
//!
//! ## Menu
//!
//! - [`ClassRegistry`]: a container of [`ClassInfo`](crate::info::ClassInfo)s keyed by class name.
//! - [`DescribeClass`]: a trait provide a function to create a `ClassInfo` from a type,
//!   usually derived with [`derive::DescribeClass`](crate::derive::DescribeClass).
//! - [`TypeShapeOf`]: the wire type shape of a Rust type, used for derived fields.
//! - Builtin class names: [`OBJECT_CLASS`], [`STRING_CLASS`], [`BYTES_CLASS`].
//!
//! ## auto_register
//!
//! See [`ClassRegistry::auto_register`] and the [`auto_register!`](crate::auto_register) macro.
//!
//! We use the `inventory` crate to implement static registration,
//! not all platforms support it (although major platforms do).
//! When it is unsupported, `auto_register` returns `false` without any error.
//!
//! ### Builtin class menu
//!
//! - `object`: the root class, what the universal type erases to.
//! - `bool` `char` `i8` `i16` `i32` `i64` `u8` `u16` `u32` `u64` `f32` `f64`
//! - The boxed (nullable) forms: `Option<bool>` .. `Option<f64>`
//! - `string`
//! - `bytes`: the raw byte sequence. Arrays of `u8` are byte sequences too.

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod class_registry;
mod describe;
mod shape_of;

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{BYTES_CLASS, OBJECT_CLASS, STRING_CLASS};

pub(crate) use builtin::is_byte_sequence;
pub use class_registry::ClassRegistry;
pub use describe::DescribeClass;
pub use shape_of::TypeShapeOf;

#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub use auto_register::{__AutoRegisterFunc, __RegisterType};

/// Statically registers classes. Does nothing without the `auto_register` feature.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),+ $(,)?) => {};
}
