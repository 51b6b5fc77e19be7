//! Owned XML tree used to edit XLIFF documents.
//!
//! Nodes read from disk keep their raw markup (start tag, escaped text,
//! comments), so serializing an untouched subtree reproduces it byte for
//! byte. Only nodes created in memory are rendered from their parts.

use quick_xml::Reader;
use quick_xml::escape::{EscapeError, escape, partial_escape, unescape};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Why a piece of markup could not be turned into a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("invalid character reference: {0}")]
    Escape(#[from] EscapeError),
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("{0}")]
    Structure(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data exactly as written, entities still escaped.
    Text(String),
    /// Comments, CDATA sections, processing instructions and doctypes,
    /// kept verbatim including their delimiters.
    Markup(String),
}

impl Node {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    /// Attribute names and unescaped values, in document order.
    attributes: Vec<(String, String)>,
    /// Raw start tag content between `<` and `>` (or `/>`), when parsed.
    raw_start: Option<String>,
    self_closing: bool,
    pub(crate) children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            raw_start: None,
            self_closing: false,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Append a text node, escaping the given plain text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.children
            .push(Node::Text(partial_escape(text).into_owned()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.push(child);
        self
    }

    fn from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Self, TreeError> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            raw_start: Some(std::str::from_utf8(start)?.to_string()),
            self_closing,
            children: Vec::new(),
        })
    }

    /// Qualified name, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First direct child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.elements().find(|e| e.local_name() == local_name)
    }

    /// Unescaped text content of the direct text children.
    pub fn text(&self) -> Result<String, TreeError> {
        let mut text = String::new();
        for node in &self.children {
            if let Node::Text(raw) = node {
                text.push_str(&unescape(raw)?);
            }
        }
        Ok(text)
    }

    /// Depth-first, pre-order walk over this element and its descendants.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for child in self.elements() {
            child.collect_descendants(out);
        }
    }

    /// First element, in depth-first order, whose local name matches.
    pub fn find_first(&self, local_name: &str) -> Option<&Element> {
        self.descendants()
            .into_iter()
            .find(|e| e.local_name() == local_name)
    }

    pub fn find_first_mut(&mut self, local_name: &str) -> Option<&mut Element> {
        if self.local_name() == local_name {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Node::Element(child) = child
                && let Some(found) = child.find_first_mut(local_name)
            {
                return Some(found);
            }
        }
        None
    }

    /// Remove every descendant element matching `predicate`, together with
    /// the whitespace run right before it. Sibling order is preserved.
    ///
    /// Returns the number of elements removed.
    pub fn detach_where<F>(&mut self, predicate: &F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        let mut removed = 0;
        let children = std::mem::take(&mut self.children);
        let mut kept: Vec<Node> = Vec::with_capacity(children.len());

        for node in children {
            match node {
                Node::Element(element) if predicate(&element) => {
                    if kept.last().is_some_and(Node::is_whitespace) {
                        kept.pop();
                    }
                    removed += 1;
                }
                Node::Element(mut element) => {
                    removed += element.detach_where(predicate);
                    kept.push(Node::Element(element));
                }
                other => kept.push(other),
            }
        }

        self.children = kept;
        removed
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        match &self.raw_start {
            Some(raw) => out.push_str(raw),
            None => {
                out.push_str(&self.name);
                for (key, value) in &self.attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape(value));
                    out.push('"');
                }
            }
        }

        let empty_tag = self.children.is_empty() && (self.self_closing || self.raw_start.is_none());
        if empty_tag {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            write_node(child, out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => element.write_to(out),
        Node::Text(raw) | Node::Markup(raw) => out.push_str(raw),
    }
}

/// A whole XML document: the root element and whatever markup surrounds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTree {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl XmlTree {
    /// Parse a complete document.
    ///
    /// The XML declaration and whitespace outside the root element are
    /// dropped; serialization writes its own declaration.
    pub fn parse(input: &str) -> Result<Self, TreeError> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let node = match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(Element::from_start(&start, false)?);
                    continue;
                }
                Event::End(_) => match stack.pop() {
                    Some(element) => Node::Element(element),
                    None => return Err(TreeError::Structure("unexpected closing tag")),
                },
                Event::Empty(start) => Node::Element(Element::from_start(&start, true)?),
                Event::Text(text) => {
                    let raw = std::str::from_utf8(&text)?;
                    // Validate entity references while keeping the raw form.
                    unescape(raw)?;
                    Node::Text(raw.to_string())
                }
                Event::CData(data) => {
                    Node::Markup(format!("<![CDATA[{}]]>", std::str::from_utf8(&data)?))
                }
                Event::Comment(comment) => {
                    Node::Markup(format!("<!--{}-->", std::str::from_utf8(&comment)?))
                }
                Event::PI(pi) => Node::Markup(format!("<?{}?>", std::str::from_utf8(&pi)?)),
                Event::DocType(doctype) => Node::Markup(format!(
                    "<!DOCTYPE {}>",
                    std::str::from_utf8(&doctype)?.trim_start()
                )),
                Event::Decl(_) => continue,
                Event::Eof => break,
            };

            if let Some(parent) = stack.last_mut() {
                parent.push(node);
                continue;
            }

            match node {
                Node::Element(element) => {
                    if root.is_some() {
                        return Err(TreeError::Structure("more than one root element"));
                    }
                    root = Some(element);
                }
                Node::Text(text) => {
                    if !text.trim().is_empty() {
                        return Err(TreeError::Structure("text outside the root element"));
                    }
                }
                markup @ Node::Markup(_) => {
                    if root.is_none() {
                        prolog.push(markup);
                    } else {
                        epilog.push(markup);
                    }
                }
            }
        }

        if !stack.is_empty() {
            return Err(TreeError::Structure("unexpected end of document"));
        }
        let root = root.ok_or(TreeError::Structure("no root element"))?;

        Ok(Self {
            prolog,
            root,
            epilog,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serialize with a UTF-8 XML declaration and a trailing newline.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        for node in &self.prolog {
            write_node(node, &mut out);
            out.push('\n');
        }
        self.root.write_to(&mut out);
        out.push('\n');
        for node in &self.epilog {
            write_node(node, &mut out);
            out.push('\n');
        }
        out
    }
}
