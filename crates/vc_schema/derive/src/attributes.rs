//! Parsing of the `#[class(...)]` attributes.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::CLASS_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[class(name = "..", serializable, auto_register)]` on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub name: Option<LitStr>,
    pub serializable: bool,
    /// Span of the `auto_register` flag, if given.
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(CLASS_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    if parsed.name.is_some() {
                        return Err(meta.error("duplicate `name`"));
                    }
                    parsed.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("serializable") {
                    parsed.serializable = true;
                } else if meta.path.is_ident("auto_register") {
                    parsed.auto_register = Some(meta.path.span());
                } else {
                    return Err(meta.error("expected `name`, `serializable` or `auto_register`"));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[class(skip)]` on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(CLASS_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`"))
                }
            })?;
        }
        Ok(parsed)
    }
}
