//! The document tree produced from one input document.
//!
//! The tree only lives for the duration of a single replacement call. Between
//! parsing and serialization nodes are never added, removed or reordered; the
//! only mutation is rewriting the content of text nodes.

// Declare submodules
pub mod node;
pub mod serialize;

// Re-export key types for easier access from outside the dom module
pub use node::{Attribute, ContentModel, Element, Node, NodeData};
pub use serialize::serialize;

use std::io;

/// A text node picked by [`Dom::select_text_mut`].
#[derive(Debug)]
pub struct TextMut<'a> {
    pub text: &'a mut String,
    /// Name of the enclosing element when its text is written verbatim
    pub raw_parent: Option<&'a str>,
}

/// Represents the top-level tree for a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dom {
    /// The `#document` node; its children are the top-level nodes.
    document_node: Node,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Creates a new, empty tree with a document root.
    pub fn new() -> Self {
        Self {
            document_node: Node::document(),
        }
    }

    pub(crate) fn from_root(document_node: Node) -> Self {
        Self { document_node }
    }

    /// Get the root document node.
    pub fn root(&self) -> &Node {
        &self.document_node
    }

    /// Selects every text node whose content satisfies `predicate`, in
    /// document order, in a single walk of the tree.
    pub fn select_text_mut<F>(&mut self, predicate: F) -> Vec<TextMut<'_>>
    where
        F: Fn(&str) -> bool,
    {
        let mut selected = Vec::new();
        collect_from(&mut self.document_node, None, &predicate, &mut selected);
        selected
    }

    /// Number of text nodes in the tree
    pub fn text_node_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            let own = usize::from(node.as_text().is_some());
            own + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.document_node)
    }

    /// Get the text content of the entire document
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        extract_text_recursive(&self.document_node, &mut content);
        content
    }

    /// Serialize the tree into `writer`.
    pub fn write_to<W: io::Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        serialize(self, writer)
    }

    /// Serialize the tree into a string.
    pub fn to_html(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = serialize(self, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

fn collect_from<'a, F>(
    node: &'a mut Node,
    raw_parent: Option<&'a str>,
    predicate: &F,
    selected: &mut Vec<TextMut<'a>>,
) where
    F: Fn(&str) -> bool,
{
    let Node { data, children } = node;
    let child_raw_parent = match data {
        NodeData::Text(text) => {
            if predicate(text.as_str()) {
                selected.push(TextMut { text, raw_parent });
            }
            return;
        }
        NodeData::Element(element) => {
            let element: &'a Element = element;
            element
                .content_model()
                .is_raw()
                .then(|| element.local_name())
        }
        _ => None,
    };
    for child in children.iter_mut() {
        collect_from(child, child_raw_parent, predicate, selected);
    }
}

fn extract_text_recursive(node: &Node, content: &mut String) {
    match &node.data {
        NodeData::Text(text) => content.push_str(text),
        NodeData::Comment(_) | NodeData::Doctype { .. } => {}
        NodeData::Document | NodeData::Element(_) => {
            for child in &node.children {
                extract_text_recursive(child, content);
            }
        }
    }
}
