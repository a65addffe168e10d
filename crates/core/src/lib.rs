//! Aurum's HTML token replacer
//!
//! Replaces literal placeholder tokens (such as `{{Name}}`) found inside the
//! text nodes of a well-formed HTML document and writes the document back out.
//! Attributes, comments and markup are never touched.
//!
//! ```no_run
//! use std::io::Cursor;
//! use aurum_core::{replace_tokens, TokenMap};
//!
//! let mut input = Cursor::new("<html><body>Hello {{Name}}</body></html>");
//! let mut output = Cursor::new(Vec::new());
//! let mut tokens = TokenMap::new();
//! tokens.insert("{{Name}}".to_string(), "Ada".to_string());
//!
//! replace_tokens(&mut input, &mut output, &tokens)?;
//! assert_eq!(output.into_inner(), b"<html><body>Hello Ada</body></html>");
//! # Ok::<(), aurum_core::ReplaceError>(())
//! ```

use std::io::{Read, Seek, Write};

pub mod config;
pub mod dom;
pub mod error;
pub mod html;
pub mod metrics;
pub mod replacer;
pub mod stream;

/// Token key to replacement value. Iteration order is insertion order, which
/// decides which key wins when a text node contains several.
pub type TokenMap = indexmap::IndexMap<String, String>;

/// Re-export common types
pub use config::ReplacerConfig;
pub use dom::{Dom, Node, NodeData};
pub use error::{ParseDiagnostic, ReplaceError, ReplaceResult};
pub use html::{parse_document, parse_html, ParseOutcome};
pub use metrics::ReplacerMetrics;
pub use replacer::{HtmlTokenReplacer, TokenReplacer};

/// Replace tokens using the default configuration.
pub fn replace_tokens<R, W>(input: &mut R, output: &mut W, tokens: &TokenMap) -> ReplaceResult<()>
where
    R: Read + ?Sized,
    W: Write + Seek + ?Sized,
{
    HtmlTokenReplacer::default().replace_tokens(input, output, tokens)
}
