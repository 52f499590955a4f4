use std::{collections::BTreeMap, fmt};

/// Every element the dashboard knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Div,
    H1,
    H2,
    H3,
    P,
    Kbd,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    A,
    Img,
    Ul,
    Li,
    Pre,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Body => "body",
            Tag::Div => "div",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Kbd => "kbd",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::A => "a",
            Tag::Img => "img",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Pre => "pre",
        }
    }

    /// Elements rendered without a closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Img)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Attributes::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(name.into(), value.to_string());
        self
    }

    /// `None` leaves the attribute out entirely.
    pub fn set_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub attributes: Attributes,
    pub children: Vec<DisplayNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    Element(Element),
    Text(String),
}

impl DisplayNode {
    pub fn tag(&self) -> Option<Tag> {
        match self {
            DisplayNode::Element(element) => Some(element.tag),
            DisplayNode::Text(_) => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            DisplayNode::Element(element) => element.attributes.get(name),
            DisplayNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[DisplayNode] {
        match self {
            DisplayNode::Element(element) => &element.children,
            DisplayNode::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        match self {
            DisplayNode::Text(text) => text.clone(),
            DisplayNode::Element(element) => element
                .children
                .iter()
                .map(DisplayNode::text_content)
                .collect(),
        }
    }

    /// Pre-order search, including `self`.
    pub fn find_all(&self, tag: Tag) -> Vec<&DisplayNode> {
        let mut found = Vec::new();
        self.collect_tagged(tag, &mut found);
        found
    }

    fn collect_tagged<'a>(&'a self, tag: Tag, found: &mut Vec<&'a DisplayNode>) {
        if self.tag() == Some(tag) {
            found.push(self);
        }
        for child in self.children() {
            child.collect_tagged(tag, found);
        }
    }
}

/// One entry of a children list before it is turned into a node.
#[derive(Debug, Clone)]
pub enum Child {
    Text(String),
    Node(DisplayNode),
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_owned())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<DisplayNode> for Child {
    fn from(node: DisplayNode) -> Self {
        Child::Node(node)
    }
}

impl From<Child> for DisplayNode {
    fn from(child: Child) -> Self {
        match child {
            Child::Text(text) => DisplayNode::Text(text),
            Child::Node(node) => node,
        }
    }
}

/// Ordered children of an element, in rendering order.
#[derive(Debug, Clone, Default)]
pub struct Children(Vec<DisplayNode>);

impl Children {
    pub fn into_nodes(self) -> Vec<DisplayNode> {
        self.0
    }
}

impl From<Vec<Child>> for Children {
    fn from(children: Vec<Child>) -> Self {
        Children(children.into_iter().map(DisplayNode::from).collect())
    }
}

impl From<Vec<DisplayNode>> for Children {
    fn from(nodes: Vec<DisplayNode>) -> Self {
        Children(nodes)
    }
}

impl From<DisplayNode> for Children {
    fn from(node: DisplayNode) -> Self {
        Children(vec![node])
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Children(vec![DisplayNode::Text(text.to_owned())])
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Children(vec![DisplayNode::Text(text)])
    }
}
