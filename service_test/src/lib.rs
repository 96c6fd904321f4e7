use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Turn an asynchronous test into a [`rocket::async_test`] and hand it a
/// fresh [`rocket::local::asynchronous::Client`] for the named authority.
///
/// The attribute argument selects which service the client is built for:
/// `registration` or `voting`. The tagged function must be `async` and
/// accept exactly one argument of type `Client`.
///
/// Note: this attribute requires that `crate::registration_rocket` and
/// `crate::voting_rocket` are in scope at the crate root.
#[proc_macro_attribute]
pub fn service_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let service = parse_macro_input!(args as Ident);
    let build_rocket = match service.to_string().as_str() {
        "registration" => quote! { crate::registration_rocket() },
        "voting" => quote! { crate::voting_rocket() },
        _ => {
            return syn::Error::new(service.span(), "Expected `registration` or `voting`")
                .into_compile_error()
                .into()
        }
    };

    let mut item_fn = parse_macro_input!(input as ItemFn);
    if let Err(err) = check_sig(&item_fn.sig) {
        return err.into_compile_error().into();
    }

    // Rename the future so the test can keep its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    quote! {
        #[rocket::async_test]
        async fn #name() {
            let client = rocket::local::asynchronous::Client::tracked(#build_rocket)
                .await
                .expect("valid rocket instance");

            #item_fn

            #new_name(client).await;
        }
    }
    .into()
}

/// Ensure the wrapped test is async and accepts exactly one `Client`.
fn check_sig(sig: &Signature) -> Result<(), syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let inputs = &sig.inputs;
    if inputs.len() != 1 {
        return Err(syn::Error::new(
            inputs.span(),
            "Test must accept exactly one `rocket::local::asynchronous::Client`",
        ));
    }

    for input in inputs {
        match input {
            FnArg::Typed(pat_type) => {
                if !matches!(&*pat_type.pat, Pat::Ident(_)) {
                    return Err(syn::Error::new(
                        pat_type.pat.span(),
                        "Function argument pattern must be an identifier",
                    ));
                }
                match &*pat_type.ty {
                    Type::Path(type_path)
                        if type_path
                            .path
                            .get_ident()
                            .map_or(false, |ident| ident == "Client") => {}
                    _ => {
                        return Err(syn::Error::new(
                            pat_type.ty.span(),
                            "Expected a single argument of type `Client`",
                        ))
                    }
                }
            }
            FnArg::Receiver(_) => {
                return Err(syn::Error::new(
                    input.span(),
                    "Function argument must not be a receiver type",
                ))
            }
        }
    }

    Ok(())
}
