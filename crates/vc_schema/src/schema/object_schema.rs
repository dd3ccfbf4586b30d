use alloc::borrow::Cow;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::Any;

use crate::error::{SchemaError, SchemaErrorKind, SchemaResult, with_path};
use crate::info::{ClassName, InvokeError, MethodInfo, Object, TypeShape};
use crate::policy::{Whitelist, WhitelistPolicy, reference_eligible};
use crate::registry::ClassRegistry;
use crate::schema::{
    CodecProvider, ConstructorSelector, ConstructorSpec, InterfaceCollector, PropertyAccessor,
    SchemaBuilder,
};

// -----------------------------------------------------------------------------
// ObjectSchema

/// Everything the codec layer needs to encode and decode one type.
///
/// Values are exchanged in accessor order, which is sorted by property name.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    ty: TypeShape,
    class: ClassName,
    constructor: Option<ConstructorSpec>,
    accessors: Vec<PropertyAccessor>,
    interfaces: Vec<TypeShape>,
    reference_eligible: bool,
}

impl ObjectSchema {
    /// Returns the type this schema was derived for.
    #[inline]
    pub const fn ty(&self) -> &TypeShape {
        &self.ty
    }

    #[inline]
    pub const fn class(&self) -> &ClassName {
        &self.class
    }

    /// Returns the decode-time constructor, `None` for abstract types.
    #[inline]
    pub const fn constructor(&self) -> Option<&ConstructorSpec> {
        self.constructor.as_ref()
    }

    #[inline]
    pub fn accessors(&self) -> &[PropertyAccessor] {
        &self.accessors
    }

    /// Returns the whitelisted interfaces advertised on the wire.
    #[inline]
    pub fn interfaces(&self) -> &[TypeShape] {
        &self.interfaces
    }

    /// Returns `true` if recurring instances may be written as back-references.
    #[inline]
    pub const fn is_reference_eligible(&self) -> bool {
        self.reference_eligible
    }

    /// Returns the persisted property names, in wire order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.accessors.iter().map(PropertyAccessor::name)
    }

    /// Reads every persisted property of `object`, in wire order.
    pub fn read(&self, object: &dyn Any) -> Result<Vec<Object>, InvokeError> {
        self.accessors
            .iter()
            .map(|accessor| accessor.binding().read(object))
            .collect()
    }

    /// Rebuilds an instance from property values given in wire order.
    ///
    /// Constructor-indexed values are passed to the constructor by position,
    /// then setter-indexed values are written in order.
    pub fn instantiate(&self, values: Vec<Object>) -> Result<Object, InvokeError> {
        if values.len() != self.accessors.len() {
            return Err(InvokeError::ValueCountMismatch {
                expected: self.accessors.len(),
                found: values.len(),
            });
        }
        let Some(constructor) = &self.constructor else {
            return Err(InvokeError::NotConstructible(Cow::Owned(
                self.class.as_str().to_string(),
            )));
        };

        let mut args: Vec<Option<Object>> = (0..constructor.params().len()).map(|_| None).collect();
        let mut writes: Vec<(&MethodInfo, Object)> = Vec::new();
        for (accessor, value) in self.accessors.iter().zip(values) {
            match accessor {
                PropertyAccessor::ConstructorIndexed { position, .. } => {
                    let slot = args
                        .get_mut(*position)
                        .ok_or(InvokeError::MissingArgument(*position))?;
                    *slot = Some(value);
                }
                PropertyAccessor::GetterSetterIndexed { setter, .. } => {
                    writes.push((setter, value));
                }
            }
        }
        let args = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| arg.ok_or(InvokeError::MissingArgument(index)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut instance = constructor.invoke(args)?;
        for (setter, value) in writes {
            setter.invoke_set(&mut *instance, value)?;
        }
        Ok(instance)
    }
}

// -----------------------------------------------------------------------------
// SchemaContext

/// The entry point of schema derivation.
///
/// A context ties a registry to the whitelist guarding it and to the codec
/// provider binding property types. Derivation is stateless: caching derived
/// schemas is up to the caller.
#[derive(Clone, Copy)]
pub struct SchemaContext<'a> {
    registry: &'a ClassRegistry,
    whitelist: &'a dyn Whitelist,
    codecs: &'a dyn CodecProvider,
}

impl<'a> SchemaContext<'a> {
    #[inline]
    pub const fn new(
        registry: &'a ClassRegistry,
        whitelist: &'a dyn Whitelist,
        codecs: &'a dyn CodecProvider,
    ) -> Self {
        Self {
            registry,
            whitelist,
            codecs,
        }
    }

    #[inline]
    pub const fn registry(&self) -> &'a ClassRegistry {
        self.registry
    }

    /// Derives the schema of `ty`.
    ///
    /// The class of `ty` must be whitelisted. Concrete classes are built from
    /// their selected constructor (or their setters), abstract classes and
    /// interfaces from their getters alone.
    ///
    /// Failures carry the path of types and properties that led to them.
    pub fn derive(&self, ty: &TypeShape) -> SchemaResult<ObjectSchema> {
        with_path(|| format!("type `{ty}`"), || self.derive_inner(ty))
    }

    fn derive_inner(&self, ty: &TypeShape) -> SchemaResult<ObjectSchema> {
        WhitelistPolicy::new(self.registry, self.whitelist).require_whitelisted(ty)?;

        let Some(name) = ty.raw_name() else {
            return Err(SchemaError::new(SchemaErrorKind::UnsupportedTypeShape {
                shape: ty.clone(),
            }));
        };
        let class = self.registry.require(name)?;

        let builder = SchemaBuilder::new(self.registry, self.codecs);
        let constructor = ConstructorSelector::new(self.registry).select_for(class)?;
        let accessors = match &constructor {
            Some(constructor) => builder.build_for_constructor(constructor, ty)?,
            None => builder.build_for_abstract(class, ty)?,
        };
        let interfaces = InterfaceCollector::new(self.registry, self.whitelist).collect(ty)?;

        let schema = ObjectSchema {
            ty: ty.clone(),
            class: name.clone(),
            constructor,
            accessors,
            interfaces,
            reference_eligible: reference_eligible(self.registry, ty),
        };

        #[cfg(all(debug_assertions, feature = "debug"))]
        log::trace!(
            "derived schema of `{ty}`: {:?}",
            schema.property_names().collect::<Vec<_>>()
        );

        Ok(schema)
    }
}
