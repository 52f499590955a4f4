use crate::{
    attrs,
    github::response::{Issue, PullRequest, User},
    html::{DisplayNode, Html},
};

pub const PULL_COLUMNS: [&str; 5] = ["Number", "Name", "Author", "Reviewer(s)", "Assignee(s)"];
pub const ISSUE_COLUMNS: [&str; 4] = ["Number", "Name", "Author", "Assignee(s)"];

pub fn user(h: &Html, user: &User) -> DisplayNode {
    h.div(
        vec![
            h.img(
                Vec::<DisplayNode>::new(),
                attrs! { "src" => &user.avatar_url, "alt" => &user.login },
            ),
            h.link(user.login.as_str(), &user.html_url, Some("gh-user-link")),
        ],
        attrs! { "class" => "gh-user" },
    )
}

pub fn user_list(h: &Html, users: &[User]) -> DisplayNode {
    h.ul(
        users
            .iter()
            .map(|u| h.li(user(h, u), attrs! {}))
            .collect::<Vec<_>>(),
        attrs! { "class" => "gh-user-list" },
    )
}

/// The full-width row holding an entity's body text.
fn note_row(h: &Html, body: Option<&str>, span: usize) -> Vec<DisplayNode> {
    vec![h.td(
        h.pre(body.unwrap_or_default(), attrs! {}),
        attrs! { "colspan" => span, "class" => "note" },
    )]
}

fn cells(h: &Html, cells: Vec<DisplayNode>) -> Vec<DisplayNode> {
    cells.into_iter().map(|cell| h.td(cell, attrs! {})).collect()
}

pub fn pulls_table(h: &Html, pulls: &[PullRequest]) -> DisplayNode {
    let rows = pulls
        .iter()
        .flat_map(|pull| {
            [
                cells(
                    h,
                    vec![
                        h.link(format!("#{}", pull.number), &pull.html_url, None),
                        h.link(pull.title.as_str(), &pull.html_url, None),
                        user(h, &pull.user),
                        user_list(h, &pull.requested_reviewers),
                        user_list(h, &pull.assignees),
                    ],
                ),
                note_row(h, pull.body.as_deref(), PULL_COLUMNS.len()),
            ]
        })
        .collect();

    h.table(&PULL_COLUMNS, rows)
}

pub fn issues_table(h: &Html, issues: &[Issue]) -> DisplayNode {
    let rows = issues
        .iter()
        .flat_map(|issue| {
            [
                cells(
                    h,
                    vec![
                        h.link(format!("#{}", issue.number), &issue.html_url, None),
                        h.link(issue.title.as_str(), &issue.html_url, None),
                        user(h, &issue.user),
                        user_list(h, &issue.assignees),
                    ],
                ),
                note_row(h, issue.body.as_deref(), ISSUE_COLUMNS.len()),
            ]
        })
        .collect();

    h.table(&ISSUE_COLUMNS, rows)
}

/// The replaceable part of a repository block.
pub fn info(h: &Html, pulls: &[PullRequest], issues: &[Issue]) -> DisplayNode {
    h.div(
        vec![
            h.h3("Pull Requests", attrs! {}),
            pulls_table(h, pulls),
            h.h3("Issues", attrs! {}),
            issues_table(h, issues),
        ],
        attrs! { "class" => "info" },
    )
}

pub fn empty_info(h: &Html) -> DisplayNode {
    h.div(Vec::<DisplayNode>::new(), attrs! { "class" => "info" })
}

pub fn error_notice(h: &Html, message: &str) -> DisplayNode {
    h.p(message, attrs! { "class" => "error" })
}
