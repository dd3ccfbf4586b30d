use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{SeqAccess, Visitor};
use serde_core::ser::SerializeSeq;
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};
use vc_utils::hash::HashSet;

use crate::info::{ClassInfo, ClassName};
use crate::policy::Whitelist;

// -----------------------------------------------------------------------------
// ListedWhitelist

/// A [`Whitelist`] holding an explicit set of class names.
///
/// It serializes as a plain sequence of names, sorted, so an allow-list can
/// be kept in a configuration file.
///
/// # Examples
///
/// ```
/// use vc_schema::policy::ListedWhitelist;
///
/// let whitelist: ListedWhitelist =
///     serde_json::from_str(r#"["demo::Point", "demo::Line"]"#).unwrap();
/// assert!(whitelist.contains("demo::Point"));
/// assert_eq!(whitelist.len(), 2);
///
/// let json = serde_json::to_string(&whitelist).unwrap();
/// assert_eq!(json, r#"["demo::Line","demo::Point"]"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListedWhitelist {
    names: HashSet<ClassName>,
}

impl ListedWhitelist {
    /// Creates an empty allow-list.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists a class, returning `false` if it was already listed.
    #[inline]
    pub fn insert(&mut self, name: impl Into<ClassName>) -> bool {
        self.names.insert(name.into())
    }

    /// Unlists a class, returning `true` if it was listed.
    #[inline]
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the listed names in lexicographic order.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(ClassName::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Whitelist for ListedWhitelist {
    #[inline]
    fn is_listed(&self, class: &ClassInfo) -> bool {
        self.contains(class.name().as_str())
    }
}

impl<N: Into<ClassName>> FromIterator<N> for ListedWhitelist {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<N: Into<ClassName>> Extend<N> for ListedWhitelist {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

// -----------------------------------------------------------------------------
// serde

impl Serialize for ListedWhitelist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = self.sorted_names();
        let mut state = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            state.serialize_element(name)?;
        }
        state.end()
    }
}

struct ListedWhitelistVisitor;

impl<'de> Visitor<'de> for ListedWhitelistVisitor {
    type Value = ListedWhitelist;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of class names")
    }

    fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut whitelist = ListedWhitelist::new();
        while let Some(name) = seq.next_element::<String>()? {
            whitelist.insert(name);
        }
        Ok(whitelist)
    }
}

impl<'de> Deserialize<'de> for ListedWhitelist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ListedWhitelistVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::ListedWhitelist;

    #[test]
    fn loads_from_ron() {
        let whitelist: ListedWhitelist =
            ron::from_str(r#"["demo::Point", "demo::Line", "demo::Point"]"#).unwrap();
        assert_eq!(whitelist.sorted_names(), ["demo::Line", "demo::Point"]);

        let text = ron::to_string(&whitelist).unwrap();
        assert_eq!(text, r#"["demo::Line","demo::Point"]"#);
    }

    #[test]
    fn loads_from_json_inside_a_config() {
        #[derive(serde::Deserialize)]
        struct Config {
            whitelist: ListedWhitelist,
        }

        let config: Config =
            serde_json::from_str(r#"{ "whitelist": ["demo::Order", "demo::Line"] }"#).unwrap();
        assert!(config.whitelist.contains("demo::Order"));
        assert!(!config.whitelist.contains("demo::Point"));
    }

    #[test]
    fn collects_and_edits() {
        let mut whitelist: ListedWhitelist = ["demo::A", "demo::B"].into_iter().collect();
        assert!(!whitelist.insert("demo::A"));
        whitelist.extend([String::from("demo::C")]);
        assert!(whitelist.remove("demo::B"));
        assert!(!whitelist.remove("demo::B"));

        let names: Vec<&str> = whitelist.sorted_names();
        assert_eq!(names, ["demo::A", "demo::C"]);
    }
}
