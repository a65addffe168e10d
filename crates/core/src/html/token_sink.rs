//! Implementation of html5ever's TokenSink trait for building the document tree.
//!
//! The tree builder that ships with html5ever rearranges documents (implied
//! `<head>`, foster parenting, ...). Rewriting text must not move anything, so
//! the tree is assembled here straight from the token stream and every
//! structural problem is recorded as a diagnostic instead of being repaired.

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{Tag, TagKind, Token, TokenSink, TokenSinkResult};
use html5ever::LocalName;
use tracing::trace;

use crate::dom::{Attribute, ContentModel, Dom, Element, Node};
use crate::error::ParseDiagnostic;

/// Elements that never have content or an end tag.
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "basefont"
            | "bgsound"
            | "br"
            | "col"
            | "embed"
            | "frame"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose end tag may be omitted without it being an error.
pub fn has_optional_end_tag(name: &str) -> bool {
    matches!(
        name,
        "p" | "li"
            | "dt"
            | "dd"
            | "option"
            | "optgroup"
            | "rb"
            | "rt"
            | "rtc"
            | "rp"
            | "tr"
            | "td"
            | "th"
            | "thead"
            | "tbody"
            | "tfoot"
            | "colgroup"
            | "caption"
    )
}

/// Tokenizer state to switch to after a start tag.
fn tokenizer_state(model: ContentModel) -> TokenSinkResult<()> {
    match model {
        ContentModel::ScriptData => TokenSinkResult::RawData(RawKind::ScriptData),
        ContentModel::Rawtext => TokenSinkResult::RawData(RawKind::Rawtext),
        ContentModel::Rcdata => TokenSinkResult::RawData(RawKind::Rcdata),
        ContentModel::Plaintext => TokenSinkResult::Plaintext,
        ContentModel::Data => TokenSinkResult::Continue,
    }
}

/// Builds a [`Dom`] from tokenizer output and collects diagnostics.
pub struct DocumentSink {
    /// The `#document` node
    document: Node,
    /// Stack of open elements, outermost first
    open_elements: Vec<Node>,
    /// Character data not yet attached to the tree
    pending_text: String,
    /// Diagnostics in reporting order
    diagnostics: Vec<ParseDiagnostic>,
    max_depth: usize,
    depth_exceeded: bool,
    /// Line of the most recent token
    line: u64,
}

impl DocumentSink {
    pub fn new(max_depth: usize) -> Self {
        Self {
            document: Node::document(),
            open_elements: Vec::new(),
            pending_text: String::new(),
            diagnostics: Vec::new(),
            max_depth,
            depth_exceeded: false,
            line: 1,
        }
    }

    /// Closes whatever is still open and returns the tree with its diagnostics.
    pub fn finish(mut self) -> (Dom, Vec<ParseDiagnostic>) {
        self.flush_text();
        while let Some(node) = self.open_elements.pop() {
            if let Some(name) = node.element_name() {
                if !has_optional_end_tag(name) {
                    let reason = format!("End tag </{}> was not found", name);
                    self.report(reason);
                }
            }
            self.current_parent().children.push(node);
        }
        (Dom::from_root(self.document), self.diagnostics)
    }

    fn report(&mut self, reason: impl Into<String>) {
        let diagnostic = ParseDiagnostic::new(self.line, reason);
        trace!("Parse diagnostic at line {}: {}", diagnostic.line, diagnostic.reason);
        self.diagnostics.push(diagnostic);
    }

    fn current_parent(&mut self) -> &mut Node {
        match self.open_elements.last_mut() {
            Some(node) => node,
            None => &mut self.document,
        }
    }

    fn append(&mut self, node: Node) {
        self.flush_text();
        self.current_parent().children.push(node);
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        self.current_parent().children.push(Node::text(text));
    }

    fn start_element(&mut self, tag: Tag) -> TokenSinkResult<()> {
        self.flush_text();

        let attributes = tag.attrs.into_iter().map(Attribute::from).collect();
        let element = Element::new(tag.name, attributes, tag.self_closing);
        let state = tokenizer_state(element.content_model());

        if element.self_closing || is_void_element(element.local_name()) {
            self.append(Node::element(element));
            return TokenSinkResult::Continue;
        }

        // Past the limit elements are kept flat so the tree never grows deeper.
        if self.open_elements.len() >= self.max_depth {
            if !self.depth_exceeded {
                self.depth_exceeded = true;
                let reason = format!("Nesting depth exceeds {}", self.max_depth);
                self.report(reason);
            }
            self.append(Node::element(element));
            return state;
        }

        self.open_elements.push(Node::element(element));
        state
    }

    fn end_element(&mut self, name: LocalName) {
        self.flush_text();

        if is_void_element(&name) {
            trace!("Ignoring end tag of void element <{}>", name);
            return;
        }

        let position = self
            .open_elements
            .iter()
            .rposition(|node| node.element_name() == Some(&*name));

        let Some(position) = position else {
            let reason = format!("Start tag <{}> was not found", name);
            self.report(reason);
            return;
        };

        while self.open_elements.len() > position + 1 {
            if let Some(node) = self.open_elements.pop() {
                if let Some(unclosed) = node.element_name() {
                    if !has_optional_end_tag(unclosed) {
                        let reason = format!("End tag </{}> was not found", unclosed);
                        self.report(reason);
                    }
                }
                self.current_parent().children.push(node);
            }
        }

        if let Some(mut node) = self.open_elements.pop() {
            if let Some(element) = node.as_element_mut() {
                element.has_end_tag = true;
            }
            self.current_parent().children.push(node);
        }
    }
}

impl TokenSink for DocumentSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        self.line = line_number;
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.start_element(tag),
                TagKind::EndTag => self.end_element(tag.name),
            },
            Token::CharacterTokens(text) => self.pending_text.push_str(&text),
            Token::NullCharacterToken => self.pending_text.push('\u{FFFD}'),
            Token::CommentToken(data) => self.append(Node::comment(&data)),
            Token::DoctypeToken(doctype) => self.append(Node::doctype(
                doctype.name,
                doctype.public_id,
                doctype.system_id,
            )),
            Token::ParseError(reason) => self.report(reason.into_owned()),
            Token::EOFToken => self.flush_text(),
        }
        TokenSinkResult::Continue
    }
}

/// Convenience for tests: the element names on the open stack.
#[cfg(test)]
impl DocumentSink {
    fn open_names(&self) -> Vec<&str> {
        self.open_elements
            .iter()
            .filter_map(Node::element_name)
            .collect()
    }
}
