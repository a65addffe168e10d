#![no_main]
//! Fuzz testing for the token replacer
//!
//! Arbitrary markup and token maps must never panic, and an accepted document
//! always leaves the output rewound.

use arbitrary::Arbitrary;
use aurum_core::{HtmlTokenReplacer, ReplacerConfig, TokenMap, TokenReplacer};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

#[derive(Debug, Arbitrary)]
struct ReplaceInput {
    html: Vec<u8>,
    tokens: Vec<(String, String)>,
}

fuzz_target!(|data: ReplaceInput| {
    // Skip excessively large inputs to prevent timeout
    if data.html.len() > 50_000 || data.tokens.len() > 64 {
        return;
    }

    let tokens: TokenMap = data.tokens.into_iter().collect();
    let config = ReplacerConfig {
        max_nesting_depth: 64,
        ..ReplacerConfig::default()
    };
    let replacer = HtmlTokenReplacer::new(config);

    let mut input = Cursor::new(data.html);
    let mut output = Cursor::new(Vec::new());
    if replacer.replace_tokens(&mut input, &mut output, &tokens).is_ok() {
        assert_eq!(output.position(), 0);
    }
});
