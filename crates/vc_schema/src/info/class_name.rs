use alloc::borrow::Cow;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

// -----------------------------------------------------------------------------
// ClassName

/// The fully qualified name of a registered class.
///
/// Names are compared and hashed as plain strings, so a `ClassName` can be
/// looked up with a `&str` in any map keyed by it.
///
/// # Examples
///
/// ```
/// use vc_schema::info::ClassName;
///
/// let name = ClassName::from("demo::shapes::Circle");
/// assert_eq!(name.as_str(), "demo::shapes::Circle");
/// assert_eq!(name.simple_name(), "Circle");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassName(Cow<'static, str>);

impl ClassName {
    /// Creates a name from a static string without allocating.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Returns the full name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name without its module path.
    pub fn simple_name(&self) -> &str {
        let name = self.as_str();
        match name.rfind("::") {
            Some(index) => &name[index + 2..],
            None => name,
        }
    }
}

impl From<&'static str> for ClassName {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for ClassName {
    #[inline]
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for ClassName {
    #[inline]
    fn from(value: Cow<'static, str>) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ClassName {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ClassName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ClassName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ClassName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for ClassName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}
