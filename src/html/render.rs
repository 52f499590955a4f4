use super::{DisplayNode, Element};
use handlebars::html_escape;
use itertools::Itertools;

/// Serializes a display tree to HTML markup.
pub fn to_html(node: &DisplayNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &DisplayNode, out: &mut String) {
    match node {
        DisplayNode::Text(text) => out.push_str(&html_escape(text)),
        DisplayNode::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    let attributes = element
        .attributes
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, html_escape(value)))
        .join("");

    out.push_str(&format!("<{}{}>", element.tag, attributes));

    if element.tag.is_void() {
        return;
    }

    for child in &element.children {
        write_node(child, out);
    }

    out.push_str(&format!("</{}>", element.tag));
}
