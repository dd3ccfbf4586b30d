use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use vc_utils::hash::HashSet;

use crate::error::SchemaResult;
use crate::info::{ClassInfo, ClassName, FieldInfo, MethodInfo, PrimitiveKind};
use crate::registry::ClassRegistry;
use crate::resolve::TypeResolver;

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// Everything known about one named property across a class's ancestry.
///
/// Only properties backed by a declared field are tracked.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyDescriptor<'a> {
    field: Option<&'a FieldInfo>,
    getter: Option<&'a MethodInfo>,
    setter: Option<&'a MethodInfo>,
}

impl<'a> PropertyDescriptor<'a> {
    /// Returns the backing field, the most-derived declaration.
    #[inline]
    pub const fn field(&self) -> Option<&'a FieldInfo> {
        self.field
    }

    #[inline]
    pub const fn getter(&self) -> Option<&'a MethodInfo> {
        self.getter
    }

    #[inline]
    pub const fn setter(&self) -> Option<&'a MethodInfo> {
        self.setter
    }
}

/// Property descriptors keyed, and ordered, by property name.
pub type PropertyMap<'a> = BTreeMap<String, PropertyDescriptor<'a>>;

// -----------------------------------------------------------------------------
// Accessor names

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessorKind {
    Get,
    Is,
    Set,
}

// Splits `getFoo` into (Get, "Foo"). The prefix must be followed by an
// uppercase letter; `getClass` and names of three chars or less never match.
fn split_accessor(name: &str) -> Option<(AccessorKind, &str)> {
    if name.len() <= 3 || name == "getClass" {
        return None;
    }
    let (kind, suffix) = if let Some(suffix) = name.strip_prefix("get") {
        (AccessorKind::Get, suffix)
    } else if let Some(suffix) = name.strip_prefix("set") {
        (AccessorKind::Set, suffix)
    } else if let Some(suffix) = name.strip_prefix("is") {
        (AccessorKind::Is, suffix)
    } else {
        return None;
    };
    suffix
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
        .then_some((kind, suffix))
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_boolean(method: &MethodInfo) -> bool {
    let bool_name = PrimitiveKind::Bool.name();
    let boxed_name = PrimitiveKind::Bool.boxed_name();
    method
        .return_ty()
        .and_then(|ty| ty.raw_name())
        .is_some_and(|name| name == bool_name || name == boxed_name)
}

// -----------------------------------------------------------------------------
// PropertyCollector

/// Merges field, getter and setter information across a class's ancestry.
///
/// - Fields: the most-derived declaration of a name wins; static fields are ignored.
/// - Accessors: public, non-static methods named `get`, `set` or `is` followed
///   by an uppercase letter. The remainder names the property, either as is or
///   decapitalized, and must name a field, otherwise the accessor is skipped.
/// - Getters take no parameters; `is` getters must return a boolean.
///   The first getter found wins, unless a later one returns a strictly
///   narrower type.
/// - The first setter found wins.
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, FieldInfo, MethodInfo, TypeShape};
/// use vc_schema::registry::ClassRegistry;
/// use vc_schema::schema::PropertyCollector;
///
/// struct Account { owner: String }
///
/// let string = TypeShape::simple("string");
/// let account = ClassInfo::record("demo::Account")
///     .with_field(FieldInfo::new("owner", string.clone()))
///     .with_method(MethodInfo::getter("getOwner", string.clone(), |a: &Account| a.owner.clone()))
///     .with_method(MethodInfo::getter("getBalance", string, |_: &Account| 0_i64));
///
/// let registry = ClassRegistry::new();
/// let properties = PropertyCollector::new(&registry).collect(&account).unwrap();
///
/// // `getBalance` has no backing field.
/// assert_eq!(properties.len(), 1);
/// assert!(properties["owner"].getter().is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PropertyCollector<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> PropertyCollector<'a> {
    #[inline]
    pub const fn new(registry: &'a ClassRegistry) -> Self {
        Self { registry }
    }

    /// Returns `class` followed by its superclasses, most-derived first.
    pub fn ancestry<'c>(&self, class: &'c ClassInfo) -> SchemaResult<Vec<&'c ClassInfo>>
    where
        'a: 'c,
    {
        let mut chain = alloc::vec![class];
        let mut visited: HashSet<&ClassName> = HashSet::default();
        visited.insert(class.name());

        let mut current = class;
        while let Some(name) = current.superclass().and_then(|ty| ty.raw_name()) {
            if !visited.insert(name) {
                break;
            }
            current = self.registry.require(name)?;
            chain.push(current);
        }
        Ok(chain)
    }

    /// Collects the properties of `class`.
    pub fn collect<'c>(&self, class: &'c ClassInfo) -> SchemaResult<PropertyMap<'c>>
    where
        'a: 'c,
    {
        let ancestry = self.ancestry(class)?;
        let resolver = TypeResolver::new(self.registry);
        let mut properties = PropertyMap::new();

        for &level in &ancestry {
            for field in level.fields().iter().filter(|field| !field.is_static()) {
                let descriptor = properties.entry(field.name().into()).or_default();
                if descriptor.field.is_none() {
                    descriptor.field = Some(field);
                }
            }
        }

        for &level in &ancestry {
            for method in level.methods() {
                if method.is_static() || !method.visibility().is_public() {
                    continue;
                }
                let Some((kind, suffix)) = split_accessor(method.name()) else {
                    continue;
                };
                let descriptor = if properties.contains_key(suffix) {
                    properties.get_mut(suffix)
                } else {
                    properties.get_mut(decapitalize(suffix).as_str())
                };
                let Some(descriptor) = descriptor else {
                    log::debug!(
                        "skipping `{}::{}`: no field named `{}`",
                        level.name(),
                        method.name(),
                        decapitalize(suffix),
                    );
                    continue;
                };

                match kind {
                    AccessorKind::Get | AccessorKind::Is => {
                        if !method.params().is_empty() || method.return_ty().is_none() {
                            continue;
                        }
                        if kind == AccessorKind::Is && !is_boolean(method) {
                            continue;
                        }
                        match descriptor.getter {
                            None => descriptor.getter = Some(method),
                            Some(existing) if narrower(&resolver, method, existing) => {
                                descriptor.getter = Some(method);
                            }
                            Some(_) => {}
                        }
                    }
                    AccessorKind::Set => {
                        if descriptor.setter.is_none() {
                            descriptor.setter = Some(method);
                        }
                    }
                }
            }
        }

        Ok(properties)
    }
}

// `true` if `candidate` returns a strictly narrower type than `existing`.
fn narrower(resolver: &TypeResolver<'_>, candidate: &MethodInfo, existing: &MethodInfo) -> bool {
    let (Some(candidate), Some(existing)) = (candidate.return_ty(), existing.return_ty()) else {
        return false;
    };
    candidate != existing
        && resolver.accepts(existing, candidate)
        && !resolver.accepts(candidate, existing)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{AccessorKind, PropertyCollector, decapitalize, split_accessor};
    use crate::info::{ClassInfo, FieldInfo, MethodInfo, ParamInfo, TypeShape, Visibility};
    use crate::registry::ClassRegistry;

    fn string() -> TypeShape {
        TypeShape::simple("string")
    }

    #[test]
    fn accessor_names() {
        assert_eq!(split_accessor("getName"), Some((AccessorKind::Get, "Name")));
        assert_eq!(split_accessor("isOpen"), Some((AccessorKind::Is, "Open")));
        assert_eq!(split_accessor("setURL"), Some((AccessorKind::Set, "URL")));
        assert_eq!(split_accessor("getClass"), None);
        assert_eq!(split_accessor("get"), None);
        assert_eq!(split_accessor("isA"), None);
        assert_eq!(split_accessor("getter"), None);
        assert_eq!(split_accessor("reset"), None);

        assert_eq!(decapitalize("Name"), "name");
        assert_eq!(decapitalize("URL"), "uRL");
    }

    #[test]
    fn fields_are_merged_most_derived_first() {
        let mut registry = ClassRegistry::new();
        registry.insert(
            ClassInfo::abstract_class("demo::Base")
                .with_field(FieldInfo::new("id", TypeShape::simple("i64")))
                .with_field(FieldInfo::new("label", string())),
        );
        let child = ClassInfo::record("demo::Child")
            .with_superclass(TypeShape::simple("demo::Base"))
            .with_field(FieldInfo::new("label", TypeShape::simple("demo::Label")))
            .with_field(FieldInfo::new("COUNT", TypeShape::simple("i32")).with_static(true));

        let properties = PropertyCollector::new(&registry).collect(&child).unwrap();
        let names: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(names, ["id", "label"]);
        assert_eq!(
            properties["label"].field().unwrap().ty(),
            &TypeShape::simple("demo::Label")
        );
    }

    #[test]
    fn accessors_match_fields() {
        let class = ClassInfo::record("demo::Flags")
            .with_field(FieldInfo::new("open", TypeShape::simple("bool")))
            .with_field(FieldInfo::new("Raw", string()))
            .with_field(FieldInfo::new("size", TypeShape::simple("i32")))
            .with_method(MethodInfo::new("isOpen").with_return(TypeShape::simple("bool")))
            .with_method(MethodInfo::new("getRaw").with_return(string()))
            .with_method(MethodInfo::new("isSize").with_return(TypeShape::simple("i32")))
            .with_method(
                MethodInfo::new("getSize")
                    .with_return(TypeShape::simple("i32"))
                    .with_params([ParamInfo::new("unit", string())]),
            )
            .with_method(
                MethodInfo::new("setSize")
                    .with_params([ParamInfo::new("size", TypeShape::simple("i32"))])
                    .with_visibility(Visibility::Private),
            )
            .with_method(MethodInfo::new("getMissing").with_return(string()));

        let registry = ClassRegistry::new();
        let properties = PropertyCollector::new(&registry).collect(&class).unwrap();

        assert_eq!(properties.len(), 3);
        assert_eq!(properties["open"].getter().unwrap().name(), "isOpen");
        // The suffix matches the field name as is before decapitalizing.
        assert_eq!(properties["Raw"].getter().unwrap().name(), "getRaw");
        // Non-boolean `is`, getters with parameters and private setters are ignored.
        assert!(properties["size"].getter().is_none());
        assert!(properties["size"].setter().is_none());
    }

    #[test]
    fn narrower_getter_replaces_wider() {
        let mut registry = ClassRegistry::new();
        registry.insert(ClassInfo::interface("demo::Animal"));
        registry.insert(
            ClassInfo::record("demo::Dog").with_interface(TypeShape::simple("demo::Animal")),
        );
        registry.insert(
            ClassInfo::abstract_class("demo::Owner")
                .with_field(FieldInfo::new("pet", TypeShape::simple("demo::Animal")))
                .with_method(MethodInfo::new("getPet").with_return(TypeShape::simple("demo::Dog")))
                .with_method(
                    MethodInfo::new("setPet")
                        .with_params([ParamInfo::new("pet", TypeShape::simple("demo::Animal"))]),
                ),
        );
        let child = ClassInfo::record("demo::DogOwner")
            .with_superclass(TypeShape::simple("demo::Owner"))
            .with_method(MethodInfo::new("getPet").with_return(TypeShape::simple("demo::Animal")))
            .with_method(
                MethodInfo::new("setPet")
                    .with_params([ParamInfo::new("pet", TypeShape::simple("demo::Dog"))]),
            );

        let properties = PropertyCollector::new(&registry).collect(&child).unwrap();
        let pet = properties["pet"];
        assert_eq!(
            pet.getter().unwrap().return_ty(),
            Some(&TypeShape::simple("demo::Dog"))
        );
        // First setter wins, the most-derived one.
        assert_eq!(
            pet.setter().unwrap().params()[0].ty(),
            &TypeShape::simple("demo::Dog")
        );
    }

    #[test]
    fn unknown_superclass_is_an_error() {
        let registry = ClassRegistry::new();
        let class = ClassInfo::record("demo::Orphan").with_superclass(TypeShape::simple("demo::Gone"));
        assert!(PropertyCollector::new(&registry).collect(&class).is_err());
    }
}
