use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{PrimitiveKind, TypeShape};
use crate::registry::STRING_CLASS;

/// A Rust type with a fixed wire type shape.
///
/// Implemented for the primitives, [`String`], [`Vec`] (arrays) and [`Option`]
/// (the boxed form of a primitive, the inner shape otherwise).
/// `#[derive(DescribeClass)]` implements it for the derived type and uses it
/// for every described field.
///
/// # Examples
///
/// ```
/// use vc_schema::info::TypeShape;
/// use vc_schema::registry::TypeShapeOf;
///
/// assert_eq!(i32::type_shape(), TypeShape::simple("i32"));
/// assert_eq!(<Option<i32>>::type_shape(), TypeShape::simple("Option<i32>"));
/// assert_eq!(<Vec<String>>::type_shape().to_string(), "string[]");
/// ```
pub trait TypeShapeOf {
    fn type_shape() -> TypeShape;
}

macro_rules! impl_primitive_shape {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl TypeShapeOf for $ty {
                #[inline]
                fn type_shape() -> TypeShape {
                    TypeShape::simple(PrimitiveKind::$kind.name())
                }
            }
        )+
    };
}

impl_primitive_shape!(
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

impl TypeShapeOf for String {
    #[inline]
    fn type_shape() -> TypeShape {
        TypeShape::simple(STRING_CLASS)
    }
}

impl<T: TypeShapeOf> TypeShapeOf for Vec<T> {
    #[inline]
    fn type_shape() -> TypeShape {
        TypeShape::array(T::type_shape())
    }
}

impl<T: TypeShapeOf> TypeShapeOf for Option<T> {
    fn type_shape() -> TypeShape {
        let inner = T::type_shape();
        match &inner {
            TypeShape::Simple(name) => match PrimitiveKind::from_name(name.as_str()) {
                Some(kind) => TypeShape::simple(kind.boxed_name()),
                None => inner,
            },
            _ => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::TypeShapeOf;
    use crate::info::TypeShape;
    use crate::registry::{ClassRegistry, is_byte_sequence};

    #[test]
    fn shapes_name_builtin_classes() {
        let registry = ClassRegistry::new();
        for shape in [
            bool::type_shape(),
            f64::type_shape(),
            String::type_shape(),
            <Option<u16>>::type_shape(),
        ] {
            assert!(registry.contains(shape.raw_name().unwrap().as_str()));
        }
    }

    #[test]
    fn nested_shapes() {
        assert!(is_byte_sequence(&<Vec<u8>>::type_shape()));
        assert_eq!(
            <Option<Vec<i32>>>::type_shape(),
            TypeShape::array(TypeShape::simple("i32"))
        );
        assert_eq!(<Option<String>>::type_shape(), TypeShape::simple("string"));
    }
}
