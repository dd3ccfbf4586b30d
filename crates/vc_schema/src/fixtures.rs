//! Classes shared by the unit tests.

use alloc::string::{String, ToString};
use alloc::sync::Arc;

use crate::error::{SchemaError, SchemaErrorKind, SchemaResult};
use crate::info::{ClassInfo, ConstructorInfo, FieldInfo, MethodInfo, ParamInfo, TypeShape};
use crate::registry::ClassRegistry;
use crate::schema::{CodecProvider, PropertyCodec};

pub const POINT: &str = "demo::Point";
pub const BEAN: &str = "demo::Bean";
pub const HOLDER: &str = "demo::Holder";
pub const CONTAINER: &str = "demo::Container";
pub const NAMED: &str = "demo::Named";
pub const BOUNDED: &str = "demo::Bounded";

pub const SHAPE: &str = "demo::Shape";
pub const CIRCLE: &str = "demo::Circle";
pub const RED_CIRCLE: &str = "demo::RedCircle";
pub const SPOT: &str = "demo::Spot";
pub const BIG_SPOT: &str = "demo::BigSpot";

pub const MISMATCHED: &str = "demo::Mismatched";
pub const UNMATCHED: &str = "demo::Unmatched";
pub const SEALED: &str = "demo::Sealed";
pub const WIDE_SETTER: &str = "demo::WideSetter";
pub const WRONG_SETTER: &str = "demo::WrongSetter";
pub const NARROW_GETTER: &str = "demo::NarrowGetter";

pub const ANIMAL: &str = "demo::Animal";
pub const DOG: &str = "demo::Dog";

#[derive(Debug, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default, PartialEq)]
pub struct Bean {
    pub value: String,
}

#[derive(Debug, PartialEq)]
pub struct Holder {
    pub value: String,
}

fn simple(name: &'static str) -> TypeShape {
    TypeShape::simple(name)
}

fn getter(name: &'static str, ty: TypeShape) -> MethodInfo {
    MethodInfo::new(name).with_return(ty)
}

fn point() -> ClassInfo {
    ClassInfo::record(POINT)
        .with_field(FieldInfo::new("x", simple("i32")))
        .with_field(FieldInfo::new("y", simple("i32")))
        .with_method(MethodInfo::getter("getX", simple("i32"), |p: &Point| p.x))
        .with_method(MethodInfo::getter("getY", simple("i32"), |p: &Point| p.y))
        .with_constructor(
            ConstructorInfo::new([
                ParamInfo::new("x", simple("i32")),
                ParamInfo::new("y", simple("i32")),
            ])
            .with_invoker(|args| {
                Ok(Point {
                    x: args.take(0)?,
                    y: args.take(1)?,
                })
            }),
        )
}

fn bean() -> ClassInfo {
    ClassInfo::record(BEAN)
        .with_field(FieldInfo::new("value", simple("string")))
        .with_method(MethodInfo::getter("getValue", simple("string"), |b: &Bean| {
            b.value.clone()
        }))
        .with_method(MethodInfo::setter(
            "setValue",
            simple("string"),
            |b: &mut Bean, value: String| b.value = value,
        ))
        .with_constructor(ConstructorInfo::new([]).with_invoker(|_| Ok(Bean::default())))
}

// class Holder<T> implements Container<T>
fn holder() -> ClassInfo {
    let t = TypeShape::variable(HOLDER, "T");
    ClassInfo::record(HOLDER)
        .with_type_param("T", [])
        .with_interface(TypeShape::parameterized(CONTAINER, [t.clone()]))
        .with_field(FieldInfo::new("value", t.clone()))
        .with_method(MethodInfo::getter("getValue", t.clone(), |h: &Holder| {
            h.value.clone()
        }))
        .with_constructor(
            ConstructorInfo::new([ParamInfo::new("value", t)])
                .with_invoker(|args| Ok(Holder { value: args.take(0)? })),
        )
}

// class Bounded<T extends string & object>
fn bounded() -> ClassInfo {
    let t = TypeShape::variable(BOUNDED, "T");
    ClassInfo::record(BOUNDED)
        .with_type_param("T", [simple("string"), simple("object")])
        .with_field(FieldInfo::new("item", t.clone()))
        .with_method(getter("getItem", t.clone()))
        .with_constructor(ConstructorInfo::new([ParamInfo::new("item", t)]))
}

// Shape extends Circle extends RedCircle; Spot implements Shape; BigSpot extends Spot
fn shapes(registry: &mut ClassRegistry) {
    registry.insert(ClassInfo::interface(RED_CIRCLE));
    registry.insert(ClassInfo::interface(CIRCLE).with_interface(simple(RED_CIRCLE)));
    registry.insert(ClassInfo::interface(SHAPE).with_interface(simple(CIRCLE)));
    registry.insert(
        ClassInfo::record(SPOT)
            .with_interface(simple(SHAPE))
            .with_constructor(ConstructorInfo::new([])),
    );
    registry.insert(
        ClassInfo::record(BIG_SPOT)
            .with_superclass(simple(SPOT))
            .with_constructor(ConstructorInfo::new([])),
    );
}

fn broken(registry: &mut ClassRegistry) {
    registry.insert(
        ClassInfo::record(MISMATCHED)
            .with_field(FieldInfo::new("count", simple("string")))
            .with_method(getter("getCount", simple("string")))
            .with_constructor(ConstructorInfo::new([ParamInfo::new("count", simple("i64"))])),
    );
    registry.insert(
        ClassInfo::record(UNMATCHED)
            .with_field(FieldInfo::new("sum", simple("i32")))
            .with_method(getter("getSum", simple("i32")))
            .with_constructor(ConstructorInfo::new([ParamInfo::new("total", simple("i32"))])),
    );
    registry.insert(
        ClassInfo::record(SEALED)
            .with_field(FieldInfo::new("secret", simple("string")))
            .with_constructor(ConstructorInfo::new([ParamInfo::new("secret", simple("string"))])),
    );
    registry.insert(
        ClassInfo::record(WIDE_SETTER)
            .with_field(FieldInfo::new("value", simple("string")))
            .with_method(getter("getValue", simple("string")))
            .with_method(MethodInfo::new("setValue").with_params([
                ParamInfo::new("value", simple("string")),
                ParamInfo::new("unit", simple("string")),
            ]))
            .with_constructor(ConstructorInfo::new([])),
    );
    // setV(i32) cannot take the `string` field
    registry.insert(
        ClassInfo::record(WRONG_SETTER)
            .with_field(FieldInfo::new("v", simple("string")))
            .with_method(getter("getV", simple("string")))
            .with_method(
                MethodInfo::new("setV").with_params([ParamInfo::new("v", simple("i32"))]),
            )
            .with_constructor(ConstructorInfo::new([])),
    );
    // getV(): Dog cannot return what setV(Animal) stored
    registry.insert(ClassInfo::abstract_class(ANIMAL));
    registry.insert(ClassInfo::record(DOG).with_superclass(simple(ANIMAL)));
    registry.insert(
        ClassInfo::record(NARROW_GETTER)
            .with_field(FieldInfo::new("v", simple(ANIMAL)))
            .with_method(getter("getV", simple(DOG)))
            .with_method(
                MethodInfo::new("setV").with_params([ParamInfo::new("v", simple(ANIMAL))]),
            )
            .with_constructor(ConstructorInfo::new([])),
    );
}

/// A registry with the builtins and every fixture class.
pub fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.insert(point());
    registry.insert(bean());
    registry.insert(holder());
    registry.insert(ClassInfo::interface(CONTAINER).with_type_param("E", []));
    registry.insert(
        ClassInfo::abstract_class(NAMED)
            .with_field(FieldInfo::new("name", simple("string")))
            .with_method(getter("getName", simple("string"))),
    );
    registry.insert(bounded());
    shapes(&mut registry);
    broken(&mut registry);
    registry
}

/// A codec provider refusing every type.
pub struct NoCodecs;

impl CodecProvider for NoCodecs {
    fn codec_for(&self, ty: &TypeShape) -> SchemaResult<Arc<dyn PropertyCodec>> {
        Err(SchemaError::new(SchemaErrorKind::Codec {
            ty: ty.clone(),
            reason: "no codecs available".to_string(),
        }))
    }
}
