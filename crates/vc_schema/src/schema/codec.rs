use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use crate::error::SchemaResult;
use crate::info::TypeShape;

// -----------------------------------------------------------------------------
// PropertyCodec

/// The codec writing and reading values of one resolved type.
///
/// The byte-level work is done by the codec layer; schema derivation only
/// binds a codec to every property.
pub trait PropertyCodec: fmt::Debug + Send + Sync {
    /// Returns the descriptor of the type this codec handles,
    /// as written into the structural wire schema.
    fn type_descriptor(&self) -> &str;
}

/// Supplies the codec of a resolved property type.
///
/// This is usually the codec cache, which may itself derive a schema for the
/// type. A failure is reported as [`Codec`](crate::SchemaErrorKind::Codec).
pub trait CodecProvider: Send + Sync {
    fn codec_for(&self, ty: &TypeShape) -> SchemaResult<Arc<dyn PropertyCodec>>;
}

// -----------------------------------------------------------------------------
// DescriptorCodec

/// A codec which only carries the wire name of its type.
///
/// # Examples
///
/// ```
/// use vc_schema::info::TypeShape;
/// use vc_schema::schema::{CodecProvider, DescriptorCodecs};
///
/// let ints = TypeShape::array(TypeShape::simple("i32"));
/// let codec = DescriptorCodecs.codec_for(&ints).unwrap();
/// assert_eq!(codec.type_descriptor(), "i32[p]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorCodec {
    descriptor: String,
}

impl DescriptorCodec {
    #[inline]
    pub fn new(ty: &TypeShape) -> Self {
        Self {
            descriptor: ty.to_string(),
        }
    }
}

impl PropertyCodec for DescriptorCodec {
    #[inline]
    fn type_descriptor(&self) -> &str {
        &self.descriptor
    }
}

/// A [`CodecProvider`] handing out a [`DescriptorCodec`] for every type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorCodecs;

impl CodecProvider for DescriptorCodecs {
    #[inline]
    fn codec_for(&self, ty: &TypeShape) -> SchemaResult<Arc<dyn PropertyCodec>> {
        Ok(Arc::new(DescriptorCodec::new(ty)))
    }
}
