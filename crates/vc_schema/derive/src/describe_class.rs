use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use crate::attributes::{FieldAttributes, TypeAttributes};

// One described struct field.
struct DescribedField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: String,
    getter: String,
}

// `first_name` -> `getFirst_name`, found again by the property collector.
fn getter_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => String::from("get"),
    }
}

pub(crate) fn impl_describe_class(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let type_attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`DescribeClass` cannot be derived for generic types, implement it by hand",
        ));
    }
    let named = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`DescribeClass` can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "`DescribeClass` can only be derived for structs",
            ));
        }
    };

    let mut described = Vec::new();
    let mut skipped = Vec::new();
    for field in &named.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if FieldAttributes::parse_attrs(&field.attrs)?.skip {
            skipped.push(ident);
            continue;
        }
        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_owned();
        described.push(DescribedField {
            ident,
            ty: &field.ty,
            getter: getter_name(&name),
            name,
        });
    }

    let vc_schema = vc_macro_utils::Manifest::shared(|m| m.get_crate_path("vc_schema"));
    let info = quote! { #vc_schema::info };
    let registry = quote! { #vc_schema::registry };
    let real_ident = &ast.ident;

    let class_name = match &type_attrs.name {
        Some(name) => quote! { #name },
        None => {
            let ident = real_ident.to_string();
            quote! { ::core::concat!(::core::module_path!(), "::", #ident) }
        }
    };

    let members = described.iter().map(|field| {
        let DescribedField {
            ident,
            ty,
            name,
            getter,
        } = field;
        quote! {
            .with_field(
                #info::FieldInfo::new(#name, <#ty as #registry::TypeShapeOf>::type_shape())
                    .with_reader(|this: &#real_ident| ::core::clone::Clone::clone(&this.#ident))
            )
            .with_method(#info::MethodInfo::getter(
                #getter,
                <#ty as #registry::TypeShapeOf>::type_shape(),
                |this: &#real_ident| ::core::clone::Clone::clone(&this.#ident),
            ))
        }
    });

    let params = described.iter().map(|field| {
        let DescribedField { ty, name, .. } = field;
        quote! {
            #info::ParamInfo::new(#name, <#ty as #registry::TypeShapeOf>::type_shape())
        }
    });

    let inits = described.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        quote! { #ident: args.take(#index)? }
    });
    let defaults = skipped.iter().map(|ident| {
        quote! { #ident: ::core::default::Default::default() }
    });

    let serializable = type_attrs.serializable.then(|| quote! { .serializable() });

    let auto_register = auto_register_impl(&type_attrs, &vc_schema, real_ident);

    Ok(quote! {
        impl #registry::DescribeClass for #real_ident {
            fn class_info() -> #info::ClassInfo {
                #info::ClassInfo::record(#class_name)
                    #(#members)*
                    .with_constructor(
                        #info::ConstructorInfo::new([#(#params),*])
                            .with_invoker(|args: &mut #info::Arguments| {
                                ::core::result::Result::Ok(#real_ident {
                                    #(#inits,)*
                                    #(#defaults,)*
                                })
                            })
                    )
                    #serializable
            }
        }

        impl #registry::TypeShapeOf for #real_ident {
            #[inline]
            fn type_shape() -> #info::TypeShape {
                #info::TypeShape::simple(#class_name)
            }
        }

        #auto_register
    })
}

#[cfg(feature = "auto_register")]
fn auto_register_impl(
    attrs: &TypeAttributes,
    vc_schema: &syn::Path,
    real_ident: &Ident,
) -> TokenStream {
    match attrs.auto_register {
        Some(span) => quote::quote_spanned! { span =>
            #vc_schema::__macro_exports::inventory::submit!{
                #vc_schema::registry::__AutoRegisterFunc(
                    <#real_ident as #vc_schema::registry::__RegisterType>::__register
                )
            }
        },
        None => TokenStream::new(),
    }
}

#[cfg(not(feature = "auto_register"))]
fn auto_register_impl(_: &TypeAttributes, _: &syn::Path, _: &Ident) -> TokenStream {
    TokenStream::new()
}
