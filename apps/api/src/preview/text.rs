//! Plain-text projection of the preview. Also the résumé text sent to ATS analysis.

use crate::preview::{DatedItem, PreviewLayout, Section};

fn push_dated(out: &mut String, items: &[DatedItem]) {
    for item in items {
        out.push_str(&item.heading);
        if !item.period.trim().is_empty() {
            out.push_str(&format!(" ({})", item.period));
        }
        out.push('\n');
        if !item.institution.trim().is_empty() {
            out.push_str(&item.institution);
            out.push('\n');
        }
    }
}

pub fn render_text(layout: &PreviewLayout) -> String {
    let header = &layout.header;
    let mut out = format!("{}\n{}\n", header.name, header.title);

    let contacts: Vec<&str> = header.contacts.iter().map(|c| c.value.as_str()).collect();
    if !contacts.is_empty() {
        out.push_str(&contacts.join(" | "));
        out.push('\n');
    }

    for section in &layout.sections {
        out.push('\n');
        out.push_str(&section.title().to_uppercase());
        out.push('\n');
        match section {
            Section::Summary { text } => {
                out.push_str(text.trim());
                out.push('\n');
            }
            Section::Experience { items } => {
                for item in items {
                    out.push_str(&format!("{} — {} ({})\n", item.role, item.company, item.period));
                    if !item.description.trim().is_empty() {
                        out.push_str(item.description.trim());
                        out.push('\n');
                    }
                }
            }
            Section::Education { items } | Section::Courses { items } => push_dated(&mut out, items),
            Section::Skills { tokens } => {
                out.push_str(&tokens.join(", "));
                out.push('\n');
            }
        }
    }

    out
}
