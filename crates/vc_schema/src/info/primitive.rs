use core::fmt;

// -----------------------------------------------------------------------------
// PrimitiveKind

/// The primitive value kinds known to the wire format.
///
/// Each kind has two builtin classes: the primitive itself (e.g. `i32`)
/// and its nullable boxed form (e.g. `Option<i32>`).
///
/// # Examples
///
/// ```
/// use vc_schema::info::PrimitiveKind;
///
/// assert_eq!(PrimitiveKind::I32.name(), "i32");
/// assert_eq!(PrimitiveKind::I32.boxed_name(), "Option<i32>");
/// assert_eq!(PrimitiveKind::from_boxed_name("Option<bool>"), Some(PrimitiveKind::Bool));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// All primitive kinds, in registration order.
    pub const ALL: [Self; 12] = [
        Self::Bool,
        Self::Char,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    /// Returns the class name of the primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Returns the class name of the boxed (nullable) form.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            Self::Bool => "Option<bool>",
            Self::Char => "Option<char>",
            Self::I8 => "Option<i8>",
            Self::I16 => "Option<i16>",
            Self::I32 => "Option<i32>",
            Self::I64 => "Option<i64>",
            Self::U8 => "Option<u8>",
            Self::U16 => "Option<u16>",
            Self::U32 => "Option<u32>",
            Self::U64 => "Option<u64>",
            Self::F32 => "Option<f32>",
            Self::F64 => "Option<f64>",
        }
    }

    /// Looks up a kind by its primitive class name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Looks up a kind by its boxed class name.
    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.boxed_name() == name)
    }
}

impl fmt::Display for PrimitiveKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
