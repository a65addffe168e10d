//! Writes a [`Dom`] back out as HTML.
//!
//! The output mirrors the source structure: end tags are only written for
//! elements that had one, and self-closing start tags keep their `/>`.
//! Text is re-encoded, so an input without character references serializes
//! byte for byte.

use std::io::{self, Write};

use super::node::{Attribute, Element, Node, NodeData};
use super::Dom;

/// Serialize `dom` into `writer`.
pub fn serialize<W: Write + ?Sized>(dom: &Dom, writer: &mut W) -> io::Result<()> {
    for child in &dom.root().children {
        write_node(child, false, writer)?;
    }
    Ok(())
}

fn write_node<W: Write + ?Sized>(node: &Node, raw_parent: bool, writer: &mut W) -> io::Result<()> {
    match &node.data {
        NodeData::Document => {
            for child in &node.children {
                write_node(child, false, writer)?;
            }
            Ok(())
        }
        NodeData::Element(element) => write_element(element, &node.children, writer),
        NodeData::Text(text) if raw_parent => writer.write_all(text.as_bytes()),
        NodeData::Text(text) => write_escaped(writer, text, false),
        NodeData::Comment(data) => write!(writer, "<!--{}-->", data),
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => {
            write!(writer, "<!DOCTYPE {}", name)?;
            if let Some(public_id) = public_id {
                write!(writer, " PUBLIC \"{}\"", public_id)?;
            }
            if let Some(system_id) = system_id {
                if public_id.is_none() {
                    writer.write_all(b" SYSTEM")?;
                }
                write!(writer, " \"{}\"", system_id)?;
            }
            writer.write_all(b">")
        }
    }
}

fn write_element<W: Write + ?Sized>(
    element: &Element,
    children: &[Node],
    writer: &mut W,
) -> io::Result<()> {
    write!(writer, "<{}", element.local_name())?;
    for attr in &element.attributes {
        write_attribute(attr, writer)?;
    }
    if element.self_closing {
        writer.write_all(b" />")?;
    } else {
        writer.write_all(b">")?;
    }

    let raw = element.content_model().is_raw();
    for child in children {
        write_node(child, raw, writer)?;
    }

    if element.has_end_tag {
        write!(writer, "</{}>", element.local_name())?;
    }
    Ok(())
}

fn write_attribute<W: Write + ?Sized>(attr: &Attribute, writer: &mut W) -> io::Result<()> {
    writer.write_all(b" ")?;
    if let Some(prefix) = &attr.name.prefix {
        write!(writer, "{}:", prefix)?;
    }
    write!(writer, "{}=\"", attr.name.local)?;
    write_escaped(writer, &attr.value, true)?;
    writer.write_all(b"\"")
}

fn write_escaped<W: Write + ?Sized>(writer: &mut W, text: &str, attr_mode: bool) -> io::Result<()> {
    let mut last = 0;
    for (i, c) in text.char_indices() {
        let entity = match c {
            '&' => "&amp;",
            '"' if attr_mode => "&quot;",
            '<' if !attr_mode => "&lt;",
            '>' if !attr_mode => "&gt;",
            _ => continue,
        };
        writer.write_all(text[last..i].as_bytes())?;
        writer.write_all(entity.as_bytes())?;
        last = i + c.len_utf8();
    }
    writer.write_all(text[last..].as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::{local_name, namespace_url, ns, QualName};
    use pretty_assertions::assert_eq;

    fn element(name: html5ever::LocalName, closed: bool, children: Vec<Node>) -> Node {
        let mut element = Element::new(name, Vec::new(), false);
        element.has_end_tag = closed;
        let mut node = Node::element(element);
        node.children = children;
        node
    }

    fn dom_of(children: Vec<Node>) -> Dom {
        let mut root = Node::document();
        root.children = children;
        Dom::from_root(root)
    }

    #[test]
    fn test_text_is_escaped() {
        let dom = dom_of(vec![element(
            local_name!("p"),
            true,
            vec![Node::text("a < b & c > d e \"q\"")],
        )]);
        assert_eq!(dom.to_html(), "<p>a &lt; b &amp; c &gt; d e \"q\"</p>");
    }

    #[test]
    fn test_no_break_space_is_written_as_is() {
        let dom = dom_of(vec![element(
            local_name!("p"),
            true,
            vec![Node::text("a\u{a0}b")],
        )]);
        assert_eq!(dom.to_html(), "<p>a\u{a0}b</p>");
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let dom = dom_of(vec![element(
            local_name!("script"),
            true,
            vec![Node::text("if (a < b && c) {}")],
        )]);
        assert_eq!(dom.to_html(), "<script>if (a < b && c) {}</script>");
    }

    #[test]
    fn test_attributes_and_self_closing() {
        let attrs = vec![
            Attribute {
                name: QualName::new(None, ns!(), local_name!("alt")),
                value: "Tom & \"Jerry\"".to_string(),
            },
            Attribute {
                name: QualName::new(None, ns!(), local_name!("src")),
                value: "a.png".to_string(),
            },
        ];
        let img = Node::element(Element::new(local_name!("img"), attrs, true));
        let dom = dom_of(vec![img]);
        assert_eq!(
            dom.to_html(),
            "<img alt=\"Tom &amp; &quot;Jerry&quot;\" src=\"a.png\" />"
        );
    }

    #[test]
    fn test_missing_end_tag_is_not_invented() {
        let dom = dom_of(vec![element(
            local_name!("ul"),
            true,
            vec![
                element(local_name!("li"), false, vec![Node::text("one")]),
                element(local_name!("li"), true, vec![Node::text("two")]),
            ],
        )]);
        assert_eq!(dom.to_html(), "<ul><li>one<li>two</li></ul>");
    }

    #[test]
    fn test_comment_and_doctype() {
        let dom = dom_of(vec![
            Node::new(NodeData::Doctype {
                name: "html".to_string(),
                public_id: None,
                system_id: None,
            }),
            Node::new(NodeData::Comment(" note ".to_string())),
        ]);
        assert_eq!(dom.to_html(), "<!DOCTYPE html><!-- note -->");

        let dom = dom_of(vec![Node::new(NodeData::Doctype {
            name: "html".to_string(),
            public_id: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_id: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
        })]);
        assert_eq!(
            dom.to_html(),
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">"
        );
    }
}
