//! Fixture derive macro implementation

use darling::{FromDeriveInput, FromField, ast};
use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
    ToUpperCamelCase,
};
use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, parse_macro_input};

/// Receiver for the struct that derives Fixture
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(fixture), supports(struct_named))]
struct FixtureReceiver {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), FixtureFieldReceiver>,
    #[darling(default)]
    rename_all: Option<syn::LitStr>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(fixture))]
struct FixtureFieldReceiver {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    readonly: bool,
    #[darling(default)]
    skip: bool,
    #[darling(default)]
    setter: Option<syn::Path>,
}

#[derive(Debug, Clone, Copy)]
enum RenameRule {
    Pascal,
    Camel,
    Snake,
    Kebab,
    ScreamingSnake,
    Title,
}

impl RenameRule {
    fn parse(lit: &syn::LitStr) -> darling::Result<Self> {
        match lit.value().as_str() {
            "PascalCase" | "UpperCamelCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "Title Case" => Ok(Self::Title),
            other => Err(darling::Error::unknown_value(other).with_span(lit)),
        }
    }

    fn apply(self, field: &str) -> String {
        match self {
            Self::Pascal => field.to_upper_camel_case(),
            Self::Camel => field.to_lower_camel_case(),
            Self::Snake => field.to_snake_case(),
            Self::Kebab => field.to_kebab_case(),
            Self::ScreamingSnake => field.to_shouty_snake_case(),
            Self::Title => field.to_title_case(),
        }
    }
}

/// Process the Fixture derive macro
pub fn process_derive_fixture(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let receiver = match FixtureReceiver::from_derive_input(&input) {
        Ok(receiver) => receiver,
        Err(err) => return err.write_errors().into(),
    };

    match generate_fixture_impl(&receiver) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

fn generate_fixture_impl(receiver: &FixtureReceiver) -> darling::Result<proc_macro2::TokenStream> {
    let struct_name = &receiver.ident;
    if !receiver.generics.params.is_empty() {
        return Err(darling::Error::custom(
            "Fixture cannot be derived for generic structs; implement it by hand",
        )
        .with_span(&receiver.generics));
    }

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let rename = receiver
        .rename_all
        .as_ref()
        .map(RenameRule::parse)
        .transpose()?;

    let mut errors = darling::Error::accumulator();
    let properties = fields
        .iter()
        .filter(|field| !field.skip)
        .filter_map(|field| {
            errors.handle(generate_property(struct_name, field, rename))
        })
        .collect::<Vec<_>>();
    errors.finish()?;

    Ok(quote! {
        impl ::fixture_table::Fixture for #struct_name {
            fn descriptor() -> &'static ::fixture_table::Descriptor<Self> {
                static DESCRIPTOR: ::std::sync::OnceLock<::fixture_table::Descriptor<#struct_name>> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    ::fixture_table::Descriptor::<#struct_name>::builder()
                        #(#properties)*
                        .build()
                })
            }
        }
    })
}

/// Generate the builder call registering one field
fn generate_property(
    struct_name: &syn::Ident,
    field: &FixtureFieldReceiver,
    rename: Option<RenameRule>,
) -> darling::Result<proc_macro2::TokenStream> {
    let Some(field_name) = field.ident.as_ref() else {
        return Err(darling::Error::custom("Fixture requires named fields").with_span(&field.ty));
    };
    if field.readonly && field.setter.is_some() {
        return Err(darling::Error::custom(
            "a readonly property has no setter; remove `setter` or `readonly`",
        )
        .with_span(&field.ty));
    }

    let unraw = field_name.unraw().to_string();
    let property_name = match (&field.name, rename) {
        (Some(name), _) => name.clone(),
        (None, Some(rule)) => rule.apply(&unraw),
        (None, None) => unraw,
    };
    let field_type = &field.ty;

    let getter = quote! { |this: &#struct_name| &this.#field_name };
    let store = quote! {
        |this: &mut #struct_name, value: #field_type| this.#field_name = value
    };

    Ok(if field.readonly {
        quote! { .read_only_backed(#property_name, #getter, #store) }
    } else if let Some(setter) = &field.setter {
        quote! {
            .field(
                #property_name,
                #getter,
                |this: &mut #struct_name, value: #field_type| #setter(this, value),
            )
        }
    } else {
        quote! { .field(#property_name, #getter, #store) }
    })
}
