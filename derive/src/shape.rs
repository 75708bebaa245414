use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Fields, Generics, Ident, LitStr, Path, Result, Type, TypeParamBound,
    ext::IdentExt, parse_quote, spanned::Spanned,
};

/// The shape of a type, as far as its descriptor is concerned.
#[derive(Debug)]
pub(crate) enum Shape {
    Record(Vec<FieldMetadata>),
    Enum(Vec<Ident>),
}

#[derive(Debug)]
pub(crate) struct FieldMetadata {
    pub ident: Ident,
    pub name: LitStr,
    pub ty: Type,
    pub is_option: bool,
}

impl Shape {
    pub fn parse(input: &DeriveInput, derive: &str) -> Result<Self> {
        match &input.data {
            Data::Struct(data) => {
                let Fields::Named(fields) = &data.fields else {
                    Err(Error::new(
                        input.span(),
                        format!("`{derive}` may only be derived on structs with named fields."),
                    ))?
                };

                let fields = fields
                    .named
                    .iter()
                    .map(FieldMetadata::parse)
                    .collect::<Result<Vec<_>>>()?;

                for (i, field) in fields.iter().enumerate() {
                    if fields[..i].iter().any(|f| f.name.value() == field.name.value()) {
                        Err(Error::new_spanned(
                            &field.name,
                            "Field names must be unique.",
                        ))?
                    }
                }

                Ok(Self::Record(fields))
            }
            Data::Enum(data) => {
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| -> Result<Ident> {
                        if !matches!(variant.fields, Fields::Unit) {
                            Err(Error::new_spanned(
                                variant,
                                format!("`{derive}` may only be derived on enums without fields."),
                            ))?
                        }

                        Ok(variant.ident.clone())
                    })
                    .collect::<Result<Vec<_>>>()?;

                if variants.is_empty() {
                    Err(Error::new(
                        input.span(),
                        format!("`{derive}` may only be derived on enums with members."),
                    ))?
                }

                Ok(Self::Enum(variants))
            }
            Data::Union(_) => Err(Error::new(
                input.span(),
                format!("`{derive}` may not be derived on unions."),
            )),
        }
    }

    /// A local `INFO` constant holding the type's descriptor.
    pub fn descriptor(&self, input: &DeriveInput) -> TokenStream {
        let name = input.ident.unraw().to_string();

        let info = match self {
            Self::Record(fields) => {
                let names = fields.iter().map(|f| &f.name);
                quote! { ::cassette::sans::TypeInfo::record(#name, &[#(#names),*]) }
            }
            Self::Enum(variants) => {
                let names = variants.iter().map(|v| v.unraw().to_string());
                quote! { ::cassette::sans::TypeInfo::enumeration(#name, &[#(#names),*]) }
            }
        };

        quote! {
            const INFO: &::cassette::sans::TypeInfo = &#info;
        }
    }
}

impl FieldMetadata {
    fn parse(field: &syn::Field) -> Result<Self> {
        let Some(ident) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let name = match field.attrs.iter().find(|a| a.path().is_ident("field")) {
            Some(attr) => attr.parse_args::<LitStr>()?,
            None => LitStr::new(&ident.unraw().to_string(), ident.span()),
        };

        let is_option = match &field.ty {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Option"),
            _ => false,
        };

        Ok(Self {
            ident,
            name,
            ty: field.ty.clone(),
            is_option,
        })
    }
}

/// Bound every type parameter by a trait.
pub(crate) fn add_bounds(generics: &Generics, bound: Path) -> Generics {
    let mut generics = generics.clone();
    let bound: TypeParamBound = parse_quote!(#bound);

    for param in generics.type_params_mut() {
        param.bounds.push(bound.clone());
    }

    generics
}
