//! `#[derive(Bind)]` for `ini-cfg`.
//!
//! Generates the field table the binder walks: one `bind_field` call per
//! named field, in declaration order, plus a `Setting` impl so the struct can
//! itself be nested in another record or collected into a `Vec`.
//!
//! Nesting needs `Default`. A record only ever bound at the top level can opt
//! out with `#[ini(no_nested)]` and then needs no `Default` impl.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Field, Fields, LitStr};

#[proc_macro_derive(Bind, attributes(ini))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input: DeriveInput = parse_macro_input!(input);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
    parse: bool,
}

fn field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("ini")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                attrs.rename = Some(name.value());
            } else if meta.path.is_ident("skip") {
                attrs.skip = true;
            } else if meta.path.is_ident("parse") {
                attrs.parse = true;
            } else {
                return Err(meta.error("expected `rename = \"...\"`, `skip` or `parse`"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

/// Container attributes. Returns whether the nested-record impl is wanted.
fn nested(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut nested = true;

    for attr in attrs.iter().filter(|a| a.path().is_ident("ini")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("no_nested") {
                nested = false;
                Ok(())
            } else {
                Err(meta.error("expected `no_nested`"))
            }
        })?;
    }

    Ok(nested)
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let DeriveInput {
        attrs,
        ident,
        data,
        generics,
        ..
    } = input;
    let nested = nested(&attrs)?;

    let fields = match data {
        Data::Struct(data) => match data.fields {
            Fields::Named(named) => named.named,
            Fields::Unit => Default::default(),
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "`Bind` needs named fields to match against option names",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "`Bind` can only be derived for structs",
            ));
        }
    };

    let mut statements = Vec::new();
    for field in &fields {
        let attrs = field_attrs(field)?;
        if attrs.skip {
            continue;
        }
        let Some(member) = field.ident.as_ref() else {
            continue;
        };
        let name = attrs.rename.unwrap_or_else(|| {
            let raw = member.to_string();
            raw.strip_prefix("r#").unwrap_or(&raw).to_string()
        });

        statements.push(if attrs.parse {
            quote! { binder.bind_parsed(section, #name, &mut self.#member)?; }
        } else {
            quote! { binder.bind_field(section, #name, &mut self.#member)?; }
        });
    }

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    let bind_impl = quote! {
        impl #impl_generics ::ini_cfg::Bind for #ident #type_generics #where_clause {
            #[allow(unused_variables)]
            fn bind(
                &mut self,
                section: &::ini_cfg::Section,
                binder: &::ini_cfg::Binder,
            ) -> ::core::result::Result<(), ::ini_cfg::ConfigError> {
                #(#statements)*
                ::core::result::Result::Ok(())
            }
        }
    };

    if !nested {
        return Ok(bind_impl);
    }

    // Nested records are bound into a fresh default instance.
    let mut setting_generics = generics.clone();
    setting_generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: ::core::default::Default));
    let (_, _, setting_where) = setting_generics.split_for_impl();

    Ok(quote! {
        #bind_impl

        impl #impl_generics ::ini_cfg::Setting for #ident #type_generics #setting_where {
            const SHAPE: ::ini_cfg::Shape = ::ini_cfg::Shape::Record;

            fn from_value(
                value: &::ini_cfg::Value,
            ) -> ::core::result::Result<Self, ::ini_cfg::ConfigError> {
                ::core::result::Result::Err(::ini_cfg::ConfigError::TypeMismatch {
                    field: ::std::string::String::new(),
                    expected: "section".into(),
                    found: value.kind().into(),
                })
            }

            fn from_section(
                section: &::ini_cfg::Section,
                binder: &::ini_cfg::Binder,
            ) -> ::core::result::Result<Self, ::ini_cfg::ConfigError> {
                let mut fresh = <Self as ::core::default::Default>::default();
                ::ini_cfg::Bind::bind(&mut fresh, section, binder)?;
                ::core::result::Result::Ok(fresh)
            }
        }
    })
}
