use html5ever::tokenizer::TokenizerOpts;
use serde::{Deserialize, Serialize};

/// Configuration for the token replacer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacerConfig {
    /// Ask the tokenizer for detailed error messages
    pub exact_errors: bool,
    /// Maximum accepted input size in bytes, `None` for no limit
    pub max_input_bytes: Option<usize>,
    /// Maximum nesting depth for elements
    pub max_nesting_depth: usize,
}

impl Default for ReplacerConfig {
    fn default() -> Self {
        Self {
            exact_errors: false,
            max_input_bytes: Some(32 * 1024 * 1024), // 32MB
            max_nesting_depth: 512,
        }
    }
}

impl ReplacerConfig {
    /// Create tokenizer options based on configuration
    pub fn tokenizer_opts(&self) -> TokenizerOpts {
        TokenizerOpts {
            exact_errors: self.exact_errors,
            ..Default::default()
        }
    }

    /// Check an input length against the configured ceiling
    pub fn allows_input_len(&self, len: usize) -> bool {
        self.max_input_bytes.map_or(true, |limit| len <= limit)
    }
}
