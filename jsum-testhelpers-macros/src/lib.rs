use unsynn::*;

// attributes, visibility and signature: everything up to the body
unsynn! {
    struct Head {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        head: Head,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Head {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

/// Test attribute that installs the jsum test subscriber before the body runs.
///
/// ```ignore
/// use jsum_testhelpers::test;
///
/// #[test]
/// fn decodes() {
///     // trace events from the decoder are printed
/// }
/// ```
///
/// An argument replaces the underlying test attribute, e.g.
/// `#[jsum_testhelpers::test(tokio::test)]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let TestFn { head, body } = match item.to_token_iter().parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => {
            let message = format!("jsum_testhelpers::test expects a function: {err}");
            return quote::quote! { ::core::compile_error!(#message); }.into();
        }
    };

    let test_attr = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };
    let body = body.0.stream();

    quote::quote! {
        #test_attr
        #head {
            ::jsum_testhelpers::setup();

            #body
        }
    }
    .into()
}
