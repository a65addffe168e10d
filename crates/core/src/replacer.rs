//! The HTML token replacer.
//!
//! A call runs one synchronous pass over one document:
//!
//! 1. read the input and probe the output (capability checks),
//! 2. parse the input into a [`Dom`] and refuse it on any diagnostic,
//! 3. rewrite the text nodes that contain a token,
//! 4. serialize the tree to the output and rewind it.
//!
//! Nothing is written to the output unless the input parsed cleanly.

use std::io::{Read, Seek, Write};
use std::sync::Arc;

use aho_corasick::AhoCorasick;
use tracing::{debug, trace, warn};

use crate::config::ReplacerConfig;
use crate::dom::Dom;
use crate::error::{ReplaceError, ReplaceResult};
use crate::html;
use crate::metrics::ReplacerMetrics;
use crate::stream;
use crate::TokenMap;

/// Trait for token replacers
pub trait TokenReplacer {
    /// Replace tokens found in the text nodes of `input` and write the
    /// resulting document to `output`.
    ///
    /// On success `output` is positioned at 0 and holds the full document.
    fn replace_tokens<R, W>(&self, input: &mut R, output: &mut W, tokens: &TokenMap) -> ReplaceResult<()>
    where
        R: Read + ?Sized,
        W: Write + Seek + ?Sized;

    /// Get replacer metrics
    fn metrics(&self) -> &ReplacerMetrics;
}

/// Replaces tokens inside the text nodes of HTML documents.
#[derive(Debug, Clone, Default)]
pub struct HtmlTokenReplacer {
    config: ReplacerConfig,
    metrics: Arc<ReplacerMetrics>,
}

impl HtmlTokenReplacer {
    pub fn new(config: ReplacerConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(ReplacerMetrics::new()),
        }
    }

    pub fn config(&self) -> &ReplacerConfig {
        &self.config
    }

    fn run<R, W>(&self, input: &mut R, output: &mut W, tokens: &TokenMap) -> ReplaceResult<()>
    where
        R: Read + ?Sized,
        W: Write + Seek + ?Sized,
    {
        let bytes = stream::read_input(input, &self.config)?;
        stream::ensure_writable_and_seekable(output)?;
        validate_tokens(tokens)?;

        let outcome = html::parse_document(&bytes, &self.config);
        if let Some(err) = ReplaceError::from_diagnostics(outcome.diagnostics) {
            warn!("Rejecting document: {}", err);
            return Err(err);
        }

        let mut dom = outcome.dom;
        if tokens.is_empty() {
            debug!("Token map is empty, writing document unchanged");
        } else {
            self.substitute(&mut dom, tokens)?;
        }

        stream::rewind(output)?;
        dom.write_to(output)?;
        output.flush()?;
        stream::rewind(output)?;
        Ok(())
    }

    /// Rewrite every text node containing at least one token key.
    ///
    /// Only the first key (in map order) found in a node is replaced there,
    /// all of its occurrences at once. Other keys in the same node are left
    /// as they are.
    ///
    /// Text inside `script`, `style` and the other raw-text elements is
    /// written verbatim, so a rewrite that would spell out the element's own
    /// end tag is refused before anything is changed.
    fn substitute(&self, dom: &mut Dom, tokens: &TokenMap) -> ReplaceResult<()> {
        let matcher = AhoCorasick::new(tokens.keys())?;
        let selected = dom.select_text_mut(|text| matcher.is_match(text));
        debug!("Selected {} text nodes for {} tokens", selected.len(), tokens.len());

        let mut rewrites = Vec::with_capacity(selected.len());
        for slot in selected {
            let text = &*slot.text;
            let Some((key, value)) = tokens.iter().find(|(key, _)| text.contains(key.as_str())) else {
                continue;
            };
            let rewritten = text.replace(key.as_str(), value);
            if let Some(parent) = slot.raw_parent {
                if closes_raw_text(&rewritten, parent) {
                    return Err(ReplaceError::invalid_argument(format!(
                        "Replacement for {} would close <{}> early",
                        key, parent
                    )));
                }
            }
            let occurrences = text.matches(key.as_str()).count();
            rewrites.push((slot.text, rewritten, key, occurrences));
        }

        for (text, rewritten, key, occurrences) in rewrites {
            *text = rewritten;
            trace!("Replaced {} occurrence(s) of {:?}", occurrences, key);
            self.metrics.record_rewrite(occurrences);
        }
        Ok(())
    }
}

impl TokenReplacer for HtmlTokenReplacer {
    fn replace_tokens<R, W>(&self, input: &mut R, output: &mut W, tokens: &TokenMap) -> ReplaceResult<()>
    where
        R: Read + ?Sized,
        W: Write + Seek + ?Sized,
    {
        let result = self.run(input, output, tokens);
        match &result {
            Ok(()) => self.metrics.increment_processed(),
            Err(_) => self.metrics.increment_rejected(),
        }
        result
    }

    fn metrics(&self) -> &ReplacerMetrics {
        &self.metrics
    }
}

/// Token keys must be non-empty: an empty key matches everywhere.
fn validate_tokens(tokens: &TokenMap) -> ReplaceResult<()> {
    if tokens.keys().any(String::is_empty) {
        return Err(ReplaceError::invalid_argument("Token keys must not be empty"));
    }
    Ok(())
}

/// Whether `text` contains `</name`, ignoring ASCII case, which would end a
/// raw-text element named `name`.
fn closes_raw_text(text: &str, name: &str) -> bool {
    let pattern = format!("</{}", name);
    text.as_bytes()
        .windows(pattern.len())
        .any(|window| window.eq_ignore_ascii_case(pattern.as_bytes()))
}
