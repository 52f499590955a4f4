use super::{render, DisplayNode};
use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

pub const PAGE_TEMPLATE: &str = "page";

#[derive(Serialize)]
struct PageData<'a> {
    title: &'a str,
    body: String,
}

pub fn handlebars<'hb>() -> Result<Handlebars<'hb>> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);

    let page = include_str!("./page.hbs");

    hb.register_template_string(PAGE_TEMPLATE, page)?;

    Ok(hb)
}

/// Wraps a rendered `body` tree into a complete HTML document.
pub fn render_page(hb: &Handlebars, title: &str, body: &DisplayNode) -> Result<String> {
    let data = PageData {
        title,
        body: render::to_html(body),
    };

    let rendered = hb.render(PAGE_TEMPLATE, &data)?;

    Ok(rendered)
}
