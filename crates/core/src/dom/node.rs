//! Defines the core Node structure for the document tree.

use html5ever::tendril::StrTendril;
use html5ever::{LocalName, QualName};

// Alias for the type used in html5ever
use html5ever::Attribute as HtmlAttribute;

/// Represents a single attribute (name-value pair).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl From<HtmlAttribute> for Attribute {
    fn from(attr: HtmlAttribute) -> Self {
        Attribute {
            name: attr.name,
            value: attr.value.to_string(),
        }
    }
}

/// Represents an HTML element within the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: LocalName,
    pub attributes: Vec<Attribute>,
    /// The start tag was written as `<name ... />`
    pub self_closing: bool,
    /// The source carried an explicit `</name>`
    pub has_end_tag: bool,
}

impl Element {
    pub fn new(name: LocalName, attributes: Vec<Attribute>, self_closing: bool) -> Self {
        Self {
            name,
            attributes,
            self_closing,
            has_end_tag: false,
        }
    }

    /// Helper to get the local name as a string slice.
    pub fn local_name(&self) -> &str {
        &self.name
    }

    pub fn content_model(&self) -> ContentModel {
        ContentModel::of(self.local_name())
    }
}

/// How the character data inside an element is tokenized and written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentModel {
    /// Ordinary markup
    Data,
    /// Text with character references but no tags (`title`, `textarea`)
    Rcdata,
    /// Text without references or tags, ended by the matching end tag
    Rawtext,
    /// Script content
    ScriptData,
    /// Everything up to end of input
    Plaintext,
}

impl ContentModel {
    pub fn of(name: &str) -> Self {
        match name {
            "script" => ContentModel::ScriptData,
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => ContentModel::Rawtext,
            "title" | "textarea" => ContentModel::Rcdata,
            "plaintext" => ContentModel::Plaintext,
            _ => ContentModel::Data,
        }
    }

    /// Text children are stored and written verbatim, without escaping.
    pub fn is_raw(self) -> bool {
        matches!(
            self,
            ContentModel::Rawtext | ContentModel::ScriptData | ContentModel::Plaintext
        )
    }
}

/// Represents the different types of nodes in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root
    Document,
    /// An HTML element
    Element(Element),
    /// A text node holding decoded character data
    Text(String),
    /// A comment node
    Comment(String),
    /// A doctype declaration
    Doctype {
        name: String,
        public_id: Option<String>,
        system_id: Option<String>,
    },
}

/// Represents a node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The actual node data
    pub data: NodeData,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new node with the given data
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    pub fn document() -> Self {
        Self::new(NodeData::Document)
    }

    pub fn element(element: Element) -> Self {
        Self::new(NodeData::Element(element))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeData::Text(text.into()))
    }

    pub fn comment(data: &StrTendril) -> Self {
        Self::new(NodeData::Comment(data.to_string()))
    }

    pub fn doctype(
        name: Option<StrTendril>,
        public_id: Option<StrTendril>,
        system_id: Option<StrTendril>,
    ) -> Self {
        Self::new(NodeData::Doctype {
            name: name.map(|n| n.to_string()).unwrap_or_default(),
            public_id: public_id.map(|id| id.to_string()),
            system_id: system_id.map(|id| id.to_string()),
        })
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Local name if this node is an element
    pub fn element_name(&self) -> Option<&str> {
        self.as_element().map(Element::local_name)
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }
}
