use crate::info::{ClassInfo, ClassKind, PrimitiveKind, TypeShape};

/// The root class. Every class is a subclass of `object`.
pub const OBJECT_CLASS: &str = "object";

/// The builtin string class.
pub const STRING_CLASS: &str = "string";

/// The builtin raw byte sequence.
pub const BYTES_CLASS: &str = "bytes";

/// Returns every builtin class, all carrying the serializable marker.
pub(super) fn builtin_classes() -> impl Iterator<Item = ClassInfo> {
    let singles = [
        ClassInfo::new(OBJECT_CLASS, ClassKind::Opaque),
        ClassInfo::new(STRING_CLASS, ClassKind::Opaque),
        ClassInfo::new(BYTES_CLASS, ClassKind::Bytes),
    ];
    let primitives = PrimitiveKind::ALL
        .into_iter()
        .map(|kind| ClassInfo::new(kind.name(), ClassKind::Primitive(kind)));
    let boxed = PrimitiveKind::ALL
        .into_iter()
        .map(|kind| ClassInfo::new(kind.boxed_name(), ClassKind::Boxed(kind)));

    singles
        .into_iter()
        .chain(primitives)
        .chain(boxed)
        .map(ClassInfo::serializable)
}

/// Returns `true` if `ty` is a raw byte sequence: `bytes` or an array of `u8`.
pub(crate) fn is_byte_sequence(ty: &TypeShape) -> bool {
    match ty {
        TypeShape::Simple(name) => name == BYTES_CLASS,
        TypeShape::Array(component) => {
            matches!(&**component, TypeShape::Simple(name) if name == PrimitiveKind::U8.name())
        }
        _ => false,
    }
}
