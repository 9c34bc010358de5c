//! Minimal HTML document tree.
//!
//! Reports are built as `Node` values and serialized in one pass; every text
//! node and attribute value is escaped on the way out.

/// Elements that never take children or a closing tag
const VOID_ELEMENTS: &[&str] = &["meta", "link", "br", "hr", "img", "input"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Inserted verbatim. Only for trusted content such as stylesheets.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, attrs: Vec::new(), children: Vec::new() }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes `root` as an HTML5 document.
pub fn to_document(root: &Element) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    write_element(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Element(el) => write_element(out, el, depth),
        Node::Text(text) => {
            out.push_str(&format!("{}{}\n", indent, escape(text)));
        }
        Node::Raw(raw) => {
            for line in raw.lines() {
                out.push_str(&format!("{}{}\n", indent, line));
            }
        }
    }
}

fn write_element(out: &mut String, el: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{}<{}", indent, el.tag));
    for (name, value) in &el.attrs {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag) {
        out.push('\n');
    } else if el.children.iter().all(|c| matches!(c, Node::Text(_))) {
        // inline: <p>text</p>
        for c in &el.children {
            if let Node::Text(text) = c {
                out.push_str(&escape(text));
            }
        }
        out.push_str(&format!("</{}>\n", el.tag));
    } else {
        out.push('\n');
        for c in &el.children {
            write_node(out, c, depth + 1);
        }
        out.push_str(&format!("{}</{}>\n", indent, el.tag));
    }
}
