// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2019-2022 Andre Richter <andre.o.richter@gmail.com>

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Ident, ItemFn};

/// Turn a function into a `test_types::UnitTest` container.
/// 関数をtest_types::UnitTestの入れ物に変換するよ．
///
/// The container can be handed to `libstartup::test_runner()` by integration tests that run
/// without the libtest harness. In addition, a `#[test]` wrapper is emitted so that the same
/// function runs under `cargo test` in unit test modules.
#[proc_macro_attribute]
pub fn boot_test(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let f = parse_macro_input!(input as ItemFn);

    let test_name = &format!("{}", f.sig.ident);
    let test_fn = &f.sig.ident;
    let test_ident = Ident::new(
        &format!("{}_TEST_CONTAINER", f.sig.ident.to_string().to_uppercase()),
        Span::call_site(),
    );
    let test_code_block = f.block;

    quote!(
        #[allow(dead_code)]
        const #test_ident: test_types::UnitTest = test_types::UnitTest {
            name: #test_name,
            test_func: || #test_code_block,
        };

        #[test]
        fn #test_fn() {
            (#test_ident.test_func)()
        }
    )
    .into()
}
