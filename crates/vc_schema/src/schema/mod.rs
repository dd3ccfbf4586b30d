//! Schema derivation: from a registered class to its ordered wire accessors.
//!
//! ## Menu
//!
//! - [`SchemaContext`]: the entry point, deriving an [`ObjectSchema`] per type.
//! - [`ConstructorSelector`]: picks the decode-time constructor, see [`ConstructorSpec`].
//! - [`PropertyCollector`]: merges fields and accessors across the ancestry
//!   into [`PropertyDescriptor`]s.
//! - [`SchemaBuilder`]: turns properties into the sorted [`PropertyAccessor`] list.
//! - [`InterfaceCollector`]: finds the whitelisted interfaces of a type.
//! - [`CodecProvider`]: the seam to the codec layer, binding a [`PropertyCodec`]
//!   to every property type.
//!
//! ## Derivation order
//!
//! 1. The whitelist gate, always first.
//! 2. Constructor selection, for concrete classes.
//! 3. Accessors from the constructor parameters, the setters, or the
//!    getters alone for abstract classes and interfaces.
//! 4. Advertised interfaces and back-reference eligibility.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod builder;
mod codec;
mod constructor;
mod interfaces;
mod object_schema;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{PropertyAccessor, PropertyReader, SerializerBinding};
pub use builder::SchemaBuilder;
pub use codec::{CodecProvider, DescriptorCodec, DescriptorCodecs, PropertyCodec};
pub use constructor::{ConstructorSelector, ConstructorSpec};
pub use interfaces::InterfaceCollector;
pub use object_schema::{ObjectSchema, SchemaContext};
pub use property::{PropertyCollector, PropertyDescriptor, PropertyMap};
