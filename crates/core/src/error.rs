//! Error types for token replacement.

use std::fmt;
use std::io;

/// A single structural problem reported while building the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-based source line where the problem was detected
    pub line: u64,
    /// Human-readable reason, reported verbatim
    pub reason: String,
}

impl ParseDiagnostic {
    pub fn new(line: u64, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ReplaceError {
    /// A stream lacks a required capability, or the token map is unusable.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        reason: String,
        source: Option<io::Error>,
    },

    /// Exactly one diagnostic; the message is its reason.
    #[error("{0}")]
    Parse(ParseDiagnostic),

    /// Two or more diagnostics, kept in the order they were reported.
    #[error("multiple errors parsing document")]
    AggregateParse(Vec<ParseDiagnostic>),

    #[error("input exceeds the configured limit of {limit} bytes")]
    InputTooLarge { limit: usize },

    #[error("failed to build token matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),

    #[error("I/O error on output stream: {0}")]
    Io(#[from] io::Error),
}

impl ReplaceError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        ReplaceError::InvalidArgument {
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_stream(reason: impl Into<String>, source: io::Error) -> Self {
        ReplaceError::InvalidArgument {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Turns collected diagnostics into the matching error, or `None` when
    /// there is nothing to report.
    pub fn from_diagnostics(mut diagnostics: Vec<ParseDiagnostic>) -> Option<Self> {
        match diagnostics.len() {
            0 => None,
            1 => diagnostics.pop().map(ReplaceError::Parse),
            _ => Some(ReplaceError::AggregateParse(diagnostics)),
        }
    }

    /// Reasons carried by a parse failure, in reporting order.
    pub fn reasons(&self) -> Vec<&str> {
        match self {
            ReplaceError::Parse(diagnostic) => vec![diagnostic.reason.as_str()],
            ReplaceError::AggregateParse(diagnostics) => {
                diagnostics.iter().map(|d| d.reason.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ReplaceError::InvalidArgument { .. })
    }
}

/// Result type for replacement operations
pub type ReplaceResult<T> = Result<T, ReplaceError>;
