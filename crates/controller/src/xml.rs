//! Generic XML tree for controller responses.
//!
//! Responses are parsed once into an owned tree and queried by element name. Lookups never
//! fail: a missing element is `None`, never an error.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors that can occur while parsing a response body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Document has no root element")]
    Empty,

    #[error("Document has more than one root element")]
    MultipleRoots,

    #[error("Element <{0}> is never closed")]
    Unclosed(String),
}

/// An element with its attributes, text, and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parses a document and returns its root element.
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(Self::from_start(&e)?),
                Ok(Event::Empty(e)) => {
                    let node = Self::from_start(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| XmlError::Malformed("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(t)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| XmlError::Malformed(e.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(XmlError::Malformed(e.to_string())),
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed(open.name));
        }
        root.ok_or(XmlError::Empty)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::Malformed(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| XmlError::Malformed(e.to_string()))?
                .to_string();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Builds a node programmatically.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element text, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first direct child with the given name, if present and non-empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlNode::text).filter(|t| !t.is_empty())
    }

    /// First descendant (depth-first, document order) with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given name, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_named(name, out);
        }
    }

    /// Trimmed text of the first descendant with the given name, if present and non-empty.
    pub fn find_text(&self, name: &str) -> Option<&str> {
        self.find(name).map(XmlNode::text).filter(|t| !t.is_empty())
    }

    /// Elements reached by following a `/`-separated path of child names from this node.
    pub fn select(&self, path: &str) -> Vec<&XmlNode> {
        let mut current: Vec<&XmlNode> = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(move |c| c.name == step))
                .collect();
        }
        current
    }
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        Ok(())
    } else if root.is_none() {
        *root = Some(node);
        Ok(())
    } else {
        Err(XmlError::MultipleRoots)
    }
}
