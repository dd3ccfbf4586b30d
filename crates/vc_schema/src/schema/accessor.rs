use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;

use crate::info::{FieldInfo, InvokeError, MethodInfo, Object, TypeShape};
use crate::schema::PropertyCodec;

// -----------------------------------------------------------------------------
// PropertyReader

/// How a property value is read from an instance.
#[derive(Debug, Clone)]
pub enum PropertyReader {
    /// Through its getter.
    Getter(MethodInfo),
    /// Directly from the field, whatever its visibility.
    Field(FieldInfo),
}

impl PropertyReader {
    /// Reads the property from `object`.
    #[inline]
    pub fn read(&self, object: &dyn Any) -> Result<Object, InvokeError> {
        match self {
            Self::Getter(getter) => getter.invoke_get(object),
            Self::Field(field) => field.read(object),
        }
    }
}

// -----------------------------------------------------------------------------
// SerializerBinding

/// A property bound to its resolved type, its reader and its codec.
#[derive(Debug, Clone)]
pub struct SerializerBinding {
    name: String,
    ty: TypeShape,
    reader: PropertyReader,
    codec: Arc<dyn PropertyCodec>,
}

impl SerializerBinding {
    #[inline]
    pub fn new(
        name: impl Into<String>,
        ty: TypeShape,
        reader: PropertyReader,
        codec: Arc<dyn PropertyCodec>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            reader,
            codec,
        }
    }

    /// Returns the property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fully resolved property type.
    #[inline]
    pub const fn ty(&self) -> &TypeShape {
        &self.ty
    }

    #[inline]
    pub const fn reader(&self) -> &PropertyReader {
        &self.reader
    }

    #[inline]
    pub fn codec(&self) -> &Arc<dyn PropertyCodec> {
        &self.codec
    }

    /// Reads the property from `object`.
    #[inline]
    pub fn read(&self, object: &dyn Any) -> Result<Object, InvokeError> {
        self.reader.read(object)
    }
}

// -----------------------------------------------------------------------------
// PropertyAccessor

/// One persisted property of a schema.
///
/// The position is where the value goes on decode: a constructor parameter
/// index, or the setter order for setter-built instances.
#[derive(Debug, Clone)]
pub enum PropertyAccessor {
    /// Passed to the constructor as parameter `position`.
    ConstructorIndexed {
        position: usize,
        binding: SerializerBinding,
    },
    /// Written through `setter` after a no-argument construction.
    GetterSetterIndexed {
        position: usize,
        binding: SerializerBinding,
        setter: MethodInfo,
    },
}

impl PropertyAccessor {
    /// Returns the property name.
    #[inline]
    pub fn name(&self) -> &str {
        self.binding().name()
    }

    #[inline]
    pub const fn position(&self) -> usize {
        match self {
            Self::ConstructorIndexed { position, .. }
            | Self::GetterSetterIndexed { position, .. } => *position,
        }
    }

    #[inline]
    pub const fn binding(&self) -> &SerializerBinding {
        match self {
            Self::ConstructorIndexed { binding, .. }
            | Self::GetterSetterIndexed { binding, .. } => binding,
        }
    }

    /// Returns the setter of a setter-built property.
    #[inline]
    pub const fn setter(&self) -> Option<&MethodInfo> {
        match self {
            Self::ConstructorIndexed { .. } => None,
            Self::GetterSetterIndexed { setter, .. } => Some(setter),
        }
    }
}
