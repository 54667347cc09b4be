//! A small owned XML tree. Documents are built as [`Element`]s first and
//! serialized afterwards, so the element order can be inspected without
//! going through text.

use std::io::Write;

use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: &'static str,
    /// `("", uri)` is the default namespace.
    namespaces: Vec<(&'static str, &'static str)>,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            namespaces: vec![],
            attributes: vec![],
            children: vec![],
        }
    }

    /// `<name>text</name>`
    pub fn leaf(name: &'static str, text: impl Into<String>) -> Self {
        Self::new(name).text(text)
    }

    /// Wraps `inner` in `outer`, outermost name first.
    pub fn wrapped(outer: &[&'static str], inner: Element) -> Self {
        outer
            .iter()
            .rev()
            .fold(inner, |inner, &name| Self::new(name).child(inner))
    }

    pub fn default_ns(mut self, uri: &'static str) -> Self {
        self.namespaces.push(("", uri));
        self
    }

    pub fn ns(mut self, prefix: &'static str, uri: &'static str) -> Self {
        self.namespaces.push((prefix, uri));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.elements().map(Element::name).collect()
    }

    /// Concatenated text of the direct text children.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// First descendant along a `/`-separated path of child names.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/').try_fold(self, |current, name| {
            current.elements().find(|e| e.name == name)
        })
    }

    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    fn write_to<W: Write>(&self, writer: &mut EventWriter<W>) -> xml::writer::Result<()> {
        let mut start = XmlEvent::start_element(self.name);
        for (prefix, uri) in &self.namespaces {
            start = if prefix.is_empty() {
                start.default_ns(*uri)
            } else {
                start.ns(*prefix, *uri)
            };
        }
        for (name, value) in &self.attributes {
            start = start.attr(*name, value);
        }
        writer.write(start)?;
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(writer)?,
                Node::Text(t) => writer.write(XmlEvent::characters(t))?,
            }
        }
        writer.write(XmlEvent::end_element())
    }
}

/// Writes `root` as a complete, indented UTF-8 document.
pub fn write_document<W: Write>(root: &Element, sink: W) -> xml::writer::Result<W> {
    let mut writer = EmitterConfig::new()
        .perform_indent(true)
        .write_document_declaration(true)
        .create_writer(sink);
    writer.write(XmlEvent::StartDocument {
        version: xml::common::XmlVersion::Version10,
        encoding: Some("UTF-8"),
        standalone: None,
    })?;
    root.write_to(&mut writer)?;
    let mut sink = writer.into_inner();
    sink.flush()?;
    Ok(sink)
}
