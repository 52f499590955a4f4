use super::views;
use crate::{
    attrs,
    github::response::Repository,
    html::{DisplayNode, Html},
};
use std::mem;

/// Long-lived display block of one repository: a stable header, an optional
/// error notice and exactly one info subtree.
#[derive(Debug, Clone)]
pub struct RepoBlock {
    header: DisplayNode,
    notice: Option<DisplayNode>,
    info: DisplayNode,
}

impl RepoBlock {
    pub fn new(h: &Html, repository: &Repository) -> Self {
        RepoBlock {
            header: h.h2(
                repository.full_name.as_str(),
                attrs! { "data-repo" => &repository.full_name },
            ),
            notice: None,
            info: views::empty_info(h),
        }
    }

    pub fn info(&self) -> &DisplayNode {
        &self.info
    }

    pub fn notice(&self) -> Option<&DisplayNode> {
        self.notice.as_ref()
    }

    /// Detaches the current info subtree and attaches `info` in its place,
    /// returning the detached one. Clears any error notice.
    pub fn swap_info(&mut self, info: DisplayNode) -> DisplayNode {
        self.notice = None;
        mem::replace(&mut self.info, info)
    }

    /// Shows `notice` while leaving the current (stale) info attached.
    pub fn set_notice(&mut self, notice: DisplayNode) {
        self.notice = Some(notice);
    }

    pub fn node(&self, h: &Html) -> DisplayNode {
        let mut children = vec![self.header.clone()];
        children.extend(self.notice.clone());
        children.push(self.info.clone());

        h.div(children, attrs! { "class" => "repo" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::Tag;

    fn repository() -> Repository {
        Repository {
            full_name: "demo/r1".to_owned(),
            pulls_url: "https://api.example/repos/demo/r1/pulls{/number}".to_owned(),
            issues_url: "https://api.example/repos/demo/r1/issues{/number}".to_owned(),
            archived: false,
            disabled: false,
        }
    }

    fn info_count(node: &DisplayNode) -> usize {
        node.children()
            .iter()
            .filter(|child| child.attribute("class") == Some("info"))
            .count()
    }

    #[test]
    fn should_start_with_header_and_empty_info() {
        let h = Html;
        let block = RepoBlock::new(&h, &repository());

        let node = block.node(&h);
        assert_eq!(node.attribute("class"), Some("repo"));
        assert_eq!(node.children()[0].tag(), Some(Tag::H2));
        assert_eq!(node.children()[0].text_content(), "demo/r1");
        assert_eq!(info_count(&node), 1);
        assert!(block.info().children().is_empty());
    }

    #[test]
    fn should_keep_exactly_one_info_after_swaps() {
        let h = Html;
        let mut block = RepoBlock::new(&h, &repository());

        for round in 0..3 {
            let info = h.div(format!("round {}", round), attrs! { "class" => "info" });
            block.swap_info(info);
        }

        let node = block.node(&h);
        assert_eq!(info_count(&node), 1);
        assert_eq!(block.info().text_content(), "round 2");
    }

    #[test]
    fn should_show_notice_above_stale_info_until_next_swap() {
        let h = Html;
        let mut block = RepoBlock::new(&h, &repository());
        block.swap_info(h.div("data", attrs! { "class" => "info" }));

        block.set_notice(views::error_notice(&h, "refresh failed"));
        let node = block.node(&h);
        assert_eq!(node.children().len(), 3);
        assert_eq!(node.children()[1].text_content(), "refresh failed");
        assert_eq!(info_count(&node), 1);
        assert_eq!(block.info().text_content(), "data");

        let detached = block.swap_info(h.div("fresh", attrs! { "class" => "info" }));
        assert_eq!(detached.text_content(), "data");
        assert!(block.notice().is_none());
        assert_eq!(block.node(&h).children().len(), 2);
    }
}
