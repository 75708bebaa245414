use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result, parse_quote};

use crate::shape::{Shape, add_bounds};

pub(crate) fn expand_serialize(input: &DeriveInput) -> Result<TokenStream> {
    let shape = Shape::parse(input, "Serialize")?;
    let descriptor = shape.descriptor(input);

    let body = match &shape {
        Shape::Record(fields) => {
            let writes = fields.iter().enumerate().map(|(index, field)| {
                let ident = &field.ident;
                quote! { record.write_field(#index, &self.#ident)?; }
            });

            quote! {
                let mut record = encoder.write_record(INFO)?;
                #(#writes)*
                record.end()
            }
        }
        Shape::Enum(variants) => {
            let cases = variants
                .iter()
                .enumerate()
                .map(|(index, variant)| quote! { Self::#variant => #index, });

            quote! {
                let index: usize = match self {
                    #(#cases)*
                };

                encoder.write_enum(INFO)?.write_index(index)
            }
        }
    };

    let name = &input.ident;
    let generics = add_bounds(&input.generics, parse_quote!(::cassette::avec::Serialize));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::cassette::avec::Serialize for #name #ty_generics #where_clause {
            fn serialize(
                &self,
                encoder: &mut ::cassette::sans::Encoder,
            ) -> ::core::result::Result<(), ::cassette::sans::Error> {
                #descriptor
                #body
            }
        }
    };

    Ok(expanded.into())
}
