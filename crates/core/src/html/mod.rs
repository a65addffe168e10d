//! HTML parsing for the token replacer.

pub mod token_sink;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{BufferQueue, Tokenizer};
use tracing::debug;

use crate::config::ReplacerConfig;
use crate::dom::Dom;
use crate::error::ParseDiagnostic;

pub use token_sink::{has_optional_end_tag, is_void_element, DocumentSink};

/// Result of parsing one document: the tree plus everything that was wrong
/// with the markup.
#[derive(Debug)]
pub struct ParseOutcome {
    pub dom: Dom,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseOutcome {
    pub fn is_well_formed(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parse raw input bytes into a tree.
///
/// Input that is not valid UTF-8 yields a single diagnostic and an empty tree.
pub fn parse_document(input: &[u8], config: &ReplacerConfig) -> ParseOutcome {
    match std::str::from_utf8(input) {
        Ok(html) => parse_html(html, config),
        Err(e) => {
            debug!("Rejecting input with invalid UTF-8 at byte {}", e.valid_up_to());
            ParseOutcome {
                dom: Dom::new(),
                diagnostics: vec![ParseDiagnostic::new(1, "Input is not valid UTF-8")],
            }
        }
    }
}

/// Parse an HTML string into a tree
pub fn parse_html(html: &str, config: &ReplacerConfig) -> ParseOutcome {
    let sink = DocumentSink::new(config.max_nesting_depth);
    let mut tokenizer = Tokenizer::new(sink, config.tokenizer_opts());

    let mut queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(html));
    // The sink never asks to pause for scripts, so one feed drains the queue.
    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();

    let (dom, diagnostics) = tokenizer.sink.finish();
    debug!(
        "Parsed {} bytes: {} text nodes, {} diagnostics",
        html.len(),
        dom.text_node_count(),
        diagnostics.len()
    );
    ParseOutcome { dom, diagnostics }
}
