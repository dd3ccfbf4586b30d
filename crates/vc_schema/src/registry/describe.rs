use core::any::Any;

use crate::info::ClassInfo;
use crate::registry::ClassRegistry;

/// A type which can describe its own class structure.
///
/// This is the usual way to feed application types into a [`ClassRegistry`]:
/// implement it once per type, then call [`ClassRegistry::register`].
///
/// # Examples
///
/// ```
/// use vc_schema::info::{ClassInfo, FieldInfo, TypeShape};
/// use vc_schema::registry::{ClassRegistry, DescribeClass};
///
/// struct Celsius(f64);
///
/// impl DescribeClass for Celsius {
///     fn class_info() -> ClassInfo {
///         ClassInfo::record("demo::Celsius")
///             .with_field(FieldInfo::new("degrees", TypeShape::simple("f64")))
///             .serializable()
///     }
/// }
///
/// let mut registry = ClassRegistry::new();
/// registry.register::<Celsius>();
/// assert!(registry.contains("demo::Celsius"));
/// ```
pub trait DescribeClass: Any {
    /// Returns the structure of the class.
    fn class_info() -> ClassInfo;

    /// Registers the classes this one mentions, such as field types.
    ///
    /// Only called the first time the class is registered.
    fn register_dependencies(_registry: &mut ClassRegistry) {}
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::derive::DescribeClass;
    use crate::info::TypeShape;
    use crate::policy::EmptyWhitelist;
    use crate::registry::{ClassRegistry, TypeShapeOf};
    use crate::schema::{DescriptorCodecs, SchemaContext};

    #[derive(Debug, Clone, PartialEq, DescribeClass)]
    #[class(name = "demo::Account", serializable)]
    struct Account {
        owner: String,
        balance: i64,
        tags: Vec<String>,
        limit: Option<i32>,
        #[class(skip)]
        cached: u32,
    }

    #[derive(DescribeClass)]
    struct Unnamed {
        id: u8,
    }

    #[test]
    fn derived_class_round_trips() {
        let mut registry = ClassRegistry::new();
        registry.register::<Account>();
        let context = SchemaContext::new(&registry, &EmptyWhitelist, &DescriptorCodecs);
        let schema = context.derive(&Account::type_shape()).unwrap();

        let names: Vec<_> = schema.property_names().collect();
        assert_eq!(names, ["balance", "limit", "owner", "tags"]);
        let types: Vec<_> = schema
            .accessors()
            .iter()
            .map(|accessor| accessor.binding().ty().to_string())
            .collect();
        assert_eq!(types, ["i64", "Option<i32>", "string", "string[]"]);

        let account = Account {
            owner: String::from("ada"),
            balance: -12,
            tags: vec![String::from("vip")],
            limit: Some(300),
            cached: 9,
        };
        let rebuilt = schema.instantiate(schema.read(&account).unwrap()).unwrap();
        assert_eq!(
            rebuilt.downcast_ref::<Account>(),
            Some(&Account {
                cached: 0,
                ..account
            })
        );
    }

    #[test]
    fn default_name_follows_module_path() {
        let class = <Unnamed as super::DescribeClass>::class_info();
        assert_eq!(
            class.name().as_str(),
            concat!(module_path!(), "::Unnamed")
        );
        assert!(!class.is_serializable());
        assert_eq!(class.fields()[0].ty(), &TypeShape::simple("u8"));
        assert_eq!(class.methods()[0].name(), "getId");
    }
}
