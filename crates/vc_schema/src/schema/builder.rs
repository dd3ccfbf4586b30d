use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{SchemaError, SchemaErrorKind, SchemaResult, with_path};
use crate::info::{ClassInfo, ClassName, ParamInfo, TypeShape};
use crate::registry::ClassRegistry;
use crate::resolve::{TypeBindings, TypeResolver};
use crate::schema::{
    CodecProvider, ConstructorSpec, PropertyAccessor, PropertyCollector, PropertyDescriptor,
    PropertyMap, PropertyReader, SerializerBinding,
};

// -----------------------------------------------------------------------------
// SchemaBuilder

/// Turns a class's properties into the ordered accessor list of its schema.
///
/// Every builder returns accessors sorted by property name.
#[derive(Clone, Copy)]
pub struct SchemaBuilder<'a> {
    registry: &'a ClassRegistry,
    codecs: &'a dyn CodecProvider,
}

impl<'a> SchemaBuilder<'a> {
    #[inline]
    pub const fn new(registry: &'a ClassRegistry, codecs: &'a dyn CodecProvider) -> Self {
        Self { registry, codecs }
    }

    #[inline]
    fn resolver(&self) -> TypeResolver<'a> {
        TypeResolver::new(self.registry)
    }

    /// Builds one accessor per parameter of the selected constructor.
    ///
    /// Each parameter must match a property by name (or capitalized name).
    /// The property is read through its getter, whose type must fit the
    /// parameter, or else directly from its field.
    ///
    /// A class with properties but a no-argument constructor is built from
    /// its setters instead, see [`build_for_setters`](Self::build_for_setters).
    pub fn build_for_constructor(
        &self,
        constructor: &ConstructorSpec,
        ty: &TypeShape,
    ) -> SchemaResult<Vec<PropertyAccessor>> {
        let class = self.registry.require(class_name(ty)?)?;
        let properties = PropertyCollector::new(self.registry).collect(class)?;

        if !properties.is_empty() && constructor.params().is_empty() {
            return self.build_for_setters(&properties, ty);
        }

        let bindings = self.resolver().bindings(ty)?;
        let mut accessors = Vec::with_capacity(constructor.params().len());
        for (position, param) in constructor.params().iter().enumerate() {
            let name = match param.name() {
                Some(name) if !name.is_empty() => name,
                _ => {
                    return Err(SchemaError::new(SchemaErrorKind::AnonymousParameter {
                        class: class.name().clone(),
                        index: position,
                    }));
                }
            };
            let binding = with_path(
                || format!("constructor parameter `{name}`"),
                || self.bind_parameter(class, &properties, name, param, &bindings),
            )?;
            accessors.push(PropertyAccessor::ConstructorIndexed { position, binding });
        }

        sort_by_name(&mut accessors);
        Ok(accessors)
    }

    fn bind_parameter(
        &self,
        class: &ClassInfo,
        properties: &PropertyMap<'_>,
        name: &str,
        param: &ParamInfo,
        bindings: &TypeBindings,
    ) -> SchemaResult<SerializerBinding> {
        let resolver = self.resolver();
        let descriptor = properties
            .get(name)
            .or_else(|| properties.get(capitalize(name).as_str()))
            .ok_or_else(|| {
                SchemaError::new(SchemaErrorKind::UnmatchedParameter {
                    class: class.name().clone(),
                    parameter: name.to_string(),
                })
            })?;

        let (ty, reader) = match (descriptor.getter(), descriptor.field()) {
            (Some(getter), _) => {
                let declared = getter.return_ty().unwrap_or(&TypeShape::Any);
                let resolved = resolver.resolve_with(declared, bindings)?;
                let expected = resolver.resolve_with(param.ty(), bindings)?;
                if !resolver.accepts(&expected, &resolved) && !resolver.accepts(param.ty(), declared)
                {
                    return Err(SchemaError::new(SchemaErrorKind::TypeMismatch {
                        class: class.name().clone(),
                        property: name.to_string(),
                        expected,
                        found: resolved,
                    }));
                }
                (resolved, PropertyReader::Getter(getter.clone()))
            }
            (None, Some(field)) if field.is_readable() => {
                let resolved = resolver.resolve_with(field.ty(), bindings)?;
                (resolved, PropertyReader::Field(field.clone()))
            }
            (None, _) => {
                return Err(SchemaError::new(SchemaErrorKind::MissingAccessor {
                    class: class.name().clone(),
                    property: name.to_string(),
                }));
            }
        };

        let codec = self.codecs.codec_for(&ty)?;
        Ok(SerializerBinding::new(name, ty, reader, codec))
    }

    /// Builds one setter-written accessor per property having both a getter
    /// and a setter. Properties missing either are left out.
    ///
    /// The setter must take exactly one argument, accepting the field type,
    /// and the getter's type must accept the setter's.
    pub fn build_for_setters(
        &self,
        properties: &PropertyMap<'_>,
        ty: &TypeShape,
    ) -> SchemaResult<Vec<PropertyAccessor>> {
        let class = class_name(ty)?;
        let bindings = self.resolver().bindings(ty)?;

        let mut accessors = Vec::new();
        for (name, descriptor) in properties {
            if descriptor.getter().is_none() || descriptor.setter().is_none() {
                log::debug!(
                    "skipping property `{name}` of `{class}`: needs both a getter and a setter"
                );
                continue;
            }
            let position = accessors.len();
            let accessor = with_path(
                || format!("property `{name}`"),
                || self.bind_setter(class, name, descriptor, position, &bindings),
            )?;
            accessors.push(accessor);
        }

        sort_by_name(&mut accessors);
        Ok(accessors)
    }

    fn bind_setter(
        &self,
        class: &ClassName,
        name: &str,
        descriptor: &PropertyDescriptor<'_>,
        position: usize,
        bindings: &TypeBindings,
    ) -> SchemaResult<PropertyAccessor> {
        let resolver = self.resolver();
        let (Some(getter), Some(setter)) = (descriptor.getter(), descriptor.setter()) else {
            return Err(SchemaError::new(SchemaErrorKind::MissingAccessor {
                class: class.clone(),
                property: name.to_string(),
            }));
        };

        let [param] = setter.params() else {
            return Err(SchemaError::new(SchemaErrorKind::TooManyArguments {
                class: class.clone(),
                property: name.to_string(),
                count: setter.params().len(),
            }));
        };
        let mismatch = |expected: TypeShape, found: TypeShape| {
            SchemaError::new(SchemaErrorKind::TypeMismatch {
                class: class.clone(),
                property: name.to_string(),
                expected,
                found,
            })
        };

        let setter_ty = resolver.resolve_with(param.ty(), bindings)?;
        if let Some(field) = descriptor.field() {
            let field_ty = resolver.resolve_with(field.ty(), bindings)?;
            if !resolver.accepts(&setter_ty, &field_ty) && !resolver.accepts(param.ty(), field.ty())
            {
                return Err(mismatch(setter_ty, field_ty));
            }
        }

        let declared = getter.return_ty().unwrap_or(&TypeShape::Any);
        let getter_ty = resolver.resolve_with(declared, bindings)?;
        if !resolver.accepts(&getter_ty, &setter_ty) && !resolver.accepts(declared, param.ty()) {
            return Err(mismatch(getter_ty, setter_ty));
        }

        let codec = self.codecs.codec_for(&getter_ty)?;
        let reader = PropertyReader::Getter(getter.clone());
        Ok(PropertyAccessor::GetterSetterIndexed {
            position,
            binding: SerializerBinding::new(name, getter_ty, reader, codec),
            setter: setter.clone(),
        })
    }

    /// Builds one read-only accessor per property with a getter.
    ///
    /// Used for abstract classes and interfaces, which are never constructed
    /// directly but still describe the properties their subclasses write.
    pub fn build_for_abstract(
        &self,
        class: &ClassInfo,
        ty: &TypeShape,
    ) -> SchemaResult<Vec<PropertyAccessor>> {
        let properties = PropertyCollector::new(self.registry).collect(class)?;
        let resolver = self.resolver();
        let bindings = resolver.bindings(ty)?;

        let mut accessors = Vec::new();
        for (name, descriptor) in &properties {
            let Some(getter) = descriptor.getter() else {
                continue;
            };
            let position = accessors.len();
            let binding = with_path(
                || format!("property `{name}`"),
                || {
                    let declared = getter.return_ty().unwrap_or(&TypeShape::Any);
                    let resolved = resolver.resolve_with(declared, &bindings)?;
                    let codec = self.codecs.codec_for(&resolved)?;
                    Ok(SerializerBinding::new(
                        name.as_str(),
                        resolved,
                        PropertyReader::Getter(getter.clone()),
                        codec,
                    ))
                },
            )?;
            accessors.push(PropertyAccessor::ConstructorIndexed { position, binding });
        }

        sort_by_name(&mut accessors);
        Ok(accessors)
    }
}

fn class_name(ty: &TypeShape) -> SchemaResult<&ClassName> {
    ty.raw_name().ok_or_else(|| {
        SchemaError::new(SchemaErrorKind::UnsupportedTypeShape { shape: ty.clone() })
    })
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[inline]
fn sort_by_name(accessors: &mut [PropertyAccessor]) {
    accessors.sort_by(|a, b| a.name().cmp(b.name()));
}
