//! See [`DescribeClass`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CLASS_ATTRIBUTE_NAME: &str = "class";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod describe_class;

// -----------------------------------------------------------------------------
// Macros

/// # Derive DescribeClass
///
/// `#[derive(DescribeClass)]` implements `DescribeClass` and `TypeShapeOf` for a
/// struct with named fields. The described class is a record with:
///
/// - one field per struct field, typed through `TypeShapeOf` and read by cloning,
/// - one getter per field, named `get` + the capitalized field name,
/// - one constructor taking every field in declaration order.
///
/// Field types must implement `TypeShapeOf` and `Clone + Send + Sync`.
/// Generic structs, tuple structs, unit structs and enums are rejected.
///
/// ## Class Name
///
/// Defaults to `module_path!()::TypeName`, override it with:
///
/// ```rust, ignore
/// #[derive(DescribeClass)]
/// #[class(name = "demo::Point")]
/// struct Point { x: i32, y: i32 }
/// ```
///
/// ## Serializable Marker
///
/// `#[class(serializable)]` marks the class, so it passes any whitelist.
///
/// ## Skipped Fields
///
/// `#[class(skip)]` on a field leaves it out of the class. The constructor fills
/// it with `Default::default()`.
///
/// ## Static Registration
///
/// With the `auto_register` feature, `#[class(auto_register)]` submits the type
/// for `ClassRegistry::auto_register`.
#[proc_macro_derive(DescribeClass, attributes(class))]
pub fn derive_describe_class(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    describe_class::impl_describe_class(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
