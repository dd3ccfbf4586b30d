//! Wire schema derivation for the object-graph codec.
//!
//! Given a registered class, this crate derives everything the codec layer needs
//! to encode and decode its instances:
//!
//! - which constructor rebuilds instances ([`schema::ConstructorSelector`]),
//! - which properties are persisted, in which order and with which fully
//!   resolved types ([`schema::SchemaBuilder`]),
//! - which interfaces form the advertised wire contract
//!   ([`schema::InterfaceCollector`]),
//! - whether instances may be written as back-references
//!   ([`policy::reference_eligible`]).
//!
//! Every class consumed from wire data must pass the allow-list
//! ([`policy::WhitelistPolicy`]) before anything else is derived.
//!
//! ## Menu
//!
//! - [`info`]: the structural description of classes, the stand-in for runtime reflection.
//! - [`registry`]: the [`ClassRegistry`](registry::ClassRegistry) holding class descriptions.
//! - [`resolve`]: generic-variable resolution and the type algebra helpers.
//! - [`policy`]: whitelist and back-reference admissibility.
//! - [`schema`]: constructor selection, property collection, accessor building and
//!   the [`SchemaContext`](schema::SchemaContext) entry point.
//! - [`error`]: [`SchemaError`](error::SchemaError) and its breadcrumb path.
//! - [`derive`]: `#[derive(DescribeClass)]`.
//!
//! # Examples
//!
//! ```
//! use vc_schema::info::{ClassInfo, ConstructorInfo, FieldInfo, MethodInfo, ParamInfo, TypeShape};
//! use vc_schema::policy::AllWhitelist;
//! use vc_schema::registry::ClassRegistry;
//! use vc_schema::schema::{DescriptorCodecs, SchemaContext};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let i32_ty = TypeShape::simple("i32");
//! let point = ClassInfo::record("demo::Point")
//!     .with_field(FieldInfo::new("x", i32_ty.clone()))
//!     .with_field(FieldInfo::new("y", i32_ty.clone()))
//!     .with_method(MethodInfo::getter("getX", i32_ty.clone(), |p: &Point| p.x))
//!     .with_method(MethodInfo::getter("getY", i32_ty.clone(), |p: &Point| p.y))
//!     .with_constructor(
//!         ConstructorInfo::new([
//!             ParamInfo::new("y", i32_ty.clone()),
//!             ParamInfo::new("x", i32_ty.clone()),
//!         ])
//!         .with_invoker(|args| Ok(Point { y: args.take(0)?, x: args.take(1)? })),
//!     );
//!
//! let mut registry = ClassRegistry::new();
//! registry.insert(point);
//!
//! let context = SchemaContext::new(&registry, &AllWhitelist, &DescriptorCodecs);
//! let schema = context.derive(&TypeShape::simple("demo::Point")).unwrap();
//!
//! let names: Vec<_> = schema.property_names().collect();
//! assert_eq!(names, ["x", "y"]);
//!
//! let values = schema.read(&Point { x: 1, y: 2 }).unwrap();
//! let rebuilt = schema.instantiate(values).unwrap();
//! assert_eq!(rebuilt.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derived impls name this crate `vc_schema`, so the alias lets them expand
// inside the crate as well as in doc tests.
extern crate self as vc_schema;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod error;
pub mod info;
pub mod policy;
pub mod registry;
pub mod resolve;
pub mod schema;

#[cfg(test)]
mod fixtures;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

pub use error::{SchemaError, SchemaErrorKind, SchemaResult};
pub use vc_schema_derive as derive;
