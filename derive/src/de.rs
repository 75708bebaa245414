use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Result, parse_quote};

use crate::shape::{Shape, add_bounds};

pub(crate) fn expand_deserialize(input: &DeriveInput) -> Result<TokenStream> {
    let shape = Shape::parse(input, "Deserialize")?;
    let descriptor = shape.descriptor(input);

    let body = match &shape {
        Shape::Record(fields) => {
            let slot = |index: usize| format_ident!("__field{}", index);

            let slots = fields.iter().enumerate().map(|(index, field)| {
                let slot = slot(index);
                let ty = &field.ty;
                quote! { let mut #slot: ::core::option::Option<#ty> = ::core::option::Option::None; }
            });

            let cases = fields.iter().enumerate().map(|(index, field)| {
                let slot = slot(index);
                let name = &field.name;

                quote! {
                    ::cassette::sans::Either::Left(#index) => {
                        if #slot.is_some() {
                            return ::core::result::Result::Err(
                                ::cassette::sans::Error::DuplicateField {
                                    ty: INFO.name(),
                                    field: #name,
                                },
                            );
                        }

                        #slot = ::core::option::Option::Some(record.read_value()?);
                    }
                }
            });

            // Absent optional fields are `None`; anything else must be present.
            let assignments = fields.iter().enumerate().map(|(index, field)| {
                let slot = slot(index);
                let ident = &field.ident;
                let name = &field.name;

                if field.is_option {
                    quote! { #ident: #slot.flatten(), }
                } else {
                    quote! {
                        #ident: match #slot {
                            ::core::option::Option::Some(value) => value,
                            ::core::option::Option::None => {
                                return ::core::result::Result::Err(
                                    ::cassette::sans::Error::MissingField {
                                        ty: INFO.name(),
                                        field: #name,
                                    },
                                );
                            }
                        },
                    }
                }
            });

            quote! {
                let mut record = decoder.read_record(INFO)?;
                #(#slots)*

                while let ::core::option::Option::Some(field) = record.next_field()? {
                    match field {
                        #(#cases)*
                        other => return ::core::result::Result::Err(record.unknown_field(other)),
                    }
                }

                ::core::result::Result::Ok(Self {
                    #(#assignments)*
                })
            }
        }
        Shape::Enum(variants) => {
            let cases = variants
                .iter()
                .enumerate()
                .map(|(index, variant)| quote! { #index => ::core::result::Result::Ok(Self::#variant), });

            quote! {
                match decoder.read_enum(INFO)?.read_index()? {
                    #(#cases)*
                    index => ::core::result::Result::Err(::cassette::sans::Error::UnknownVariant {
                        ty: INFO.name(),
                        index: index as i64,
                    }),
                }
            }
        }
    };

    let name = &input.ident;
    let generics = add_bounds(&input.generics, parse_quote!(::cassette::avec::Deserialize));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::cassette::avec::Deserialize for #name #ty_generics #where_clause {
            fn deserialize<__S: ::cassette::sans::ByteSource>(
                decoder: &mut ::cassette::sans::Decoder<__S>,
            ) -> ::core::result::Result<Self, ::cassette::sans::Error> {
                #descriptor
                #body
            }
        }
    };

    Ok(expanded.into())
}
