mod node;
pub mod render;
pub mod template;

pub use node::{Attributes, Child, Children, DisplayNode, Element, Tag};

/// Builds an [`Attributes`] map from `name => value` pairs.
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::html::Attributes::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::html::Attributes::new()$(.set($name, $value))+
    };
}

/// Declarative builder for display trees.
///
/// Every call returns a fresh, independent node; nothing is registered or
/// shared between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html;

macro_rules! tag_builders {
    ($($method:ident => $tag:ident),* $(,)?) => {
        impl Html {
            $(
                pub fn $method(
                    &self,
                    children: impl Into<Children>,
                    attributes: Attributes,
                ) -> DisplayNode {
                    self.build(Tag::$tag, children, attributes)
                }
            )*
        }
    };
}

tag_builders! {
    body => Body,
    div => Div,
    h1 => H1,
    h2 => H2,
    h3 => H3,
    p => P,
    kbd => Kbd,
    table_element => Table,
    thead => Thead,
    tbody => Tbody,
    tr => Tr,
    th => Th,
    td => Td,
    a => A,
    img => Img,
    ul => Ul,
    li => Li,
    pre => Pre,
}

impl Html {
    pub fn build(
        &self,
        tag: Tag,
        children: impl Into<Children>,
        attributes: Attributes,
    ) -> DisplayNode {
        DisplayNode::Element(Element {
            tag,
            attributes,
            children: children.into().into_nodes(),
        })
    }

    pub fn text(&self, text: impl ToString) -> DisplayNode {
        DisplayNode::Text(text.to_string())
    }

    /// A table with one plain-text header cell per column and one body row
    /// per entry of `rows`, each made of already built cells.
    pub fn table(&self, columns: &[&str], rows: Vec<Vec<DisplayNode>>) -> DisplayNode {
        let header = self.tr(
            columns
                .iter()
                .map(|column| self.th(*column, attrs! {}))
                .collect::<Vec<_>>(),
            attrs! {},
        );

        let body = rows
            .into_iter()
            .map(|cells| self.tr(cells, attrs! {}))
            .collect::<Vec<_>>();

        self.table_element(
            vec![self.thead(header, attrs! {}), self.tbody(body, attrs! {})],
            attrs! {},
        )
    }

    /// An anchor opening `href` in a new browsing context.
    pub fn link(
        &self,
        text: impl Into<Children>,
        href: &str,
        class_name: Option<&str>,
    ) -> DisplayNode {
        self.a(
            text,
            attrs!("href" => href, "target" => "_blank").set_opt("class", class_name),
        )
    }
}
