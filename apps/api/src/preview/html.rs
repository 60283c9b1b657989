//! Print-ready HTML. Printing this page from a browser is the PDF export.

use askama::Template;

use crate::preview::{PreviewLayout, Section};

/// The A4 page, `templates/print.html`. User text is escaped by askama.
#[derive(Template)]
#[template(path = "print.html")]
pub struct PrintPage<'a> {
    pub layout: &'a PreviewLayout,
}

pub fn render_html(layout: &PreviewLayout) -> Result<String, askama::Error> {
    PrintPage { layout }.render()
}
