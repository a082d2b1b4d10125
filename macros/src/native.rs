use syn::parse::{Parse, ParseStream};

use super::*;

/// The arguments to `#[native]`.
pub struct Meta {
    /// How the lambda displays itself. Defaults to the function's name.
    name: Option<syn::LitStr>,
}

impl Parse for Meta {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name: Option<syn::LitStr> = None;
        while !input.is_empty() {
            if !input.peek(kw::name) {
                return Err(input.error("lambdas: unexpected argument, expected `name`"));
            }

            let key: kw::name = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value = input.parse()?;
            if name.is_some() {
                bail!(key, "`name` is given more than once");
            }
            name = Some(value);

            if !input.is_empty() {
                let _: syn::Token![,] = input.parse()?;
            }
        }
        Ok(Self { name })
    }
}

mod kw {
    syn::custom_keyword!(name);
}

/// A parameter of a native function.
enum Param<'a> {
    /// Receives one argument.
    Single(&'a syn::Ident, &'a syn::Type),
    /// Receives all remaining arguments.
    Rest(&'a syn::Ident, &'a syn::Type),
}

/// Rewrite a function into a constructor of a native lambda.
pub fn expand(meta: &Meta, mut func: syn::ItemFn) -> Result<proc_macro2::TokenStream> {
    if let Some(asyncness) = &func.sig.asyncness {
        bail!(asyncness, "async functions are not supported");
    }

    if !func.sig.generics.params.is_empty() {
        bail!(func.sig.generics, "native functions cannot be generic");
    }

    let output = match &func.sig.output {
        syn::ReturnType::Type(_, ty) => ty.as_ref().clone(),
        syn::ReturnType::Default => {
            bail!(func.sig, "native functions must return a `Result<Value>`")
        }
    };

    let params = prepare_params(&func.sig)?;
    let arity = params.iter().filter(|param| matches!(param, Param::Single(..))).count();

    // Bind each parameter to its share of the arguments.
    let bindings = params.iter().enumerate().map(|(i, param)| match param {
        Param::Single(name, ty) => quote! {
            let #name: #ty = ::lambdas::internal::arg(__args, #i);
        },
        Param::Rest(name, ty) => quote! {
            let #name: #ty = __args.get(#i..).unwrap_or_default();
        },
    });

    let display = match &meta.name {
        Some(name) => name.value(),
        None => func.sig.ident.to_string(),
    };

    let body = &func.block;
    let block: syn::Block = parse_quote! { {
        ::lambdas::Lambda::native(
            #display,
            #arity,
            |__args: &[::lambdas::Value]| -> #output {
                #(#bindings)*
                #body
            },
        )
    } };

    func.sig.inputs.clear();
    func.sig.output = parse_quote! { -> ::lambdas::Lambda };
    func.block = Box::new(block);

    Ok(quote! { #func })
}

/// Validate the parameters and sort them into single and rest parameters.
fn prepare_params(sig: &syn::Signature) -> Result<Vec<Param<'_>>> {
    let mut params = vec![];
    for input in &sig.inputs {
        let typed = match input {
            syn::FnArg::Typed(typed) => typed,
            syn::FnArg::Receiver(_) => {
                bail!(input, "methods are not supported")
            }
        };

        let name = match typed.pat.as_ref() {
            syn::Pat::Ident(syn::PatIdent {
                by_ref: None,
                mutability: None,
                ident,
                subpat: None,
                ..
            }) => ident,
            pat => bail!(pat, "only simple identifiers are supported"),
        };

        if let Some(Param::Rest(..)) = params.last() {
            bail!(typed, "the rest parameter must come last");
        }

        let ty = typed.ty.as_ref();
        params.push(if is_slice(ty) { Param::Rest(name, ty) } else { Param::Single(name, ty) });
    }

    Ok(params)
}

/// Whether the type is a shared slice reference like `&[Value]`.
fn is_slice(ty: &syn::Type) -> bool {
    matches!(
        ty,
        syn::Type::Reference(syn::TypeReference { mutability: None, elem, .. })
            if matches!(elem.as_ref(), syn::Type::Slice(_))
    )
}
