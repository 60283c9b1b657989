//! Preview Renderer — a pure projection of the document into a fixed, printable layout.
//!
//! `build_preview` decides what appears; `html` and `text` only decide how it looks.

pub mod handlers;
pub mod html;
pub mod text;

use serde::Serialize;

use crate::editors::skills::skill_tokens;
use crate::models::resume::ResumeDocument;

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const TITLE_PLACEHOLDER: &str = "Professional Title";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewLayout {
    pub header: Header,
    /// Only sections with content, in fixed order.
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub title: String,
    pub contacts: Vec<Contact>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
}

impl ContactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContactKind::Email => "Email",
            ContactKind::Phone => "Phone",
            ContactKind::Location => "Location",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceItem {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

/// An education or course line: heading, institution and a year label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedItem {
    pub heading: String,
    pub institution: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum Section {
    Summary { text: String },
    Experience { items: Vec<ExperienceItem> },
    Education { items: Vec<DatedItem> },
    Courses { items: Vec<DatedItem> },
    Skills { tokens: Vec<String> },
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Summary { .. } => "Professional Summary",
            Section::Experience { .. } => "Professional Experience",
            Section::Education { .. } => "Education",
            Section::Courses { .. } => "Courses & Certifications",
            Section::Skills { .. } => "Skills",
        }
    }
}

/// Structured address and city/state win over the legacy flat `location`.
///
/// City and state join with `" - "`, that joins the address with `", "`; empty parts are
/// skipped at both levels.
pub fn location_line(doc: &ResumeDocument) -> String {
    let city_state = join_non_empty(&[doc.city.as_deref(), doc.state.as_deref()], " - ");
    let line = join_non_empty(&[doc.address.as_deref(), Some(city_state.as_str())], ", ");
    if line.is_empty() {
        doc.location.trim().to_string()
    } else {
        line
    }
}

fn join_non_empty(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

pub fn build_preview(doc: &ResumeDocument) -> PreviewLayout {
    let mut contacts = Vec::new();
    for (kind, value) in [
        (ContactKind::Email, doc.email.trim().to_string()),
        (ContactKind::Phone, doc.phone.trim().to_string()),
        (ContactKind::Location, location_line(doc)),
    ] {
        if !value.is_empty() {
            contacts.push(Contact { kind, value });
        }
    }

    let header = Header {
        name: or_placeholder(&doc.name, NAME_PLACEHOLDER),
        title: or_placeholder(&doc.title, TITLE_PLACEHOLDER),
        contacts,
        photo_url: doc.photo_url.clone().filter(|p| !p.trim().is_empty()),
    };

    let mut sections = Vec::new();

    if !doc.summary.trim().is_empty() {
        sections.push(Section::Summary {
            text: doc.summary.clone(),
        });
    }

    if !doc.experience.is_empty() {
        sections.push(Section::Experience {
            items: doc
                .experience
                .iter()
                .map(|e| ExperienceItem {
                    role: e.role.clone(),
                    company: e.company.clone(),
                    period: format!("{} - {}", e.start_date, e.end_date),
                    description: e.description.clone(),
                })
                .collect(),
        });
    }

    if !doc.education.is_empty() {
        sections.push(Section::Education {
            items: doc
                .education
                .iter()
                .map(|e| DatedItem {
                    heading: e.degree.clone(),
                    institution: e.institution.clone(),
                    period: e.year.clone(),
                })
                .collect(),
        });
    }

    if !doc.courses.is_empty() {
        sections.push(Section::Courses {
            items: doc
                .courses
                .iter()
                .map(|c| DatedItem {
                    heading: c.name.clone(),
                    institution: c.institution.clone(),
                    period: c.year.clone(),
                })
                .collect(),
        });
    }

    let tokens = skill_tokens(&doc.skills);
    if !tokens.is_empty() {
        sections.push(Section::Skills {
            tokens: tokens.into_iter().map(str::to_string).collect(),
        });
    }

    PreviewLayout { header, sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{CourseEntry, EducationEntry, ExperienceEntry};

    #[test]
    fn test_blank_document_renders_only_header() {
        let layout = build_preview(&ResumeDocument::template());
        assert!(layout.sections.is_empty());
        assert_eq!(layout.header.name, NAME_PLACEHOLDER);
        assert_eq!(layout.header.title, TITLE_PLACEHOLDER);
        assert!(layout.header.contacts.is_empty());
        assert!(layout.header.photo_url.is_none());
    }

    #[test]
    fn test_whitespace_only_skills_render_no_section() {
        let doc = ResumeDocument {
            skills: " ,  , ".to_string(),
            summary: "   ".to_string(),
            ..ResumeDocument::template()
        };
        assert!(build_preview(&doc).sections.is_empty());
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let doc = ResumeDocument {
            summary: "Summary".to_string(),
            skills: "Rust".to_string(),
            courses: vec![CourseEntry::default()],
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry::default()],
            ..ResumeDocument::template()
        };
        let titles: Vec<_> = build_preview(&doc)
            .sections
            .iter()
            .map(Section::title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Professional Summary",
                "Professional Experience",
                "Education",
                "Courses & Certifications",
                "Skills"
            ]
        );
    }

    #[test]
    fn test_blank_entries_still_render_their_section() {
        let doc = ResumeDocument {
            experience: vec![ExperienceEntry::default()],
            ..ResumeDocument::template()
        };
        let layout = build_preview(&doc);
        assert_eq!(layout.sections.len(), 1);
        match &layout.sections[0] {
            Section::Experience { items } => assert_eq!(items[0].period, " - "),
            other => panic!("unexpected section {other:?}"),
        }
    }

    #[test]
    fn test_location_prefers_structured_fields() {
        let doc = ResumeDocument {
            location: "Legacy Town".to_string(),
            address: Some("Rua A, 10".to_string()),
            city: Some("Recife".to_string()),
            state: Some("PE".to_string()),
            ..ResumeDocument::template()
        };
        assert_eq!(location_line(&doc), "Rua A, 10, Recife - PE");
    }

    #[test]
    fn test_location_skips_empty_parts() {
        let doc = ResumeDocument {
            address: Some(String::new()),
            city: None,
            state: Some("SP".to_string()),
            ..ResumeDocument::template()
        };
        assert_eq!(location_line(&doc), "SP");

        let doc = ResumeDocument {
            address: Some("Av. Paulista".to_string()),
            ..ResumeDocument::template()
        };
        assert_eq!(location_line(&doc), "Av. Paulista");
    }

    #[test]
    fn test_location_falls_back_to_legacy_field() {
        let doc = ResumeDocument {
            location: "Lisbon".to_string(),
            address: Some("  ".to_string()),
            ..ResumeDocument::template()
        };
        assert_eq!(location_line(&doc), "Lisbon");
    }

    #[test]
    fn test_contacts_only_when_present() {
        let doc = ResumeDocument {
            email: "ana@example.com".to_string(),
            city: Some("Natal".to_string()),
            ..ResumeDocument::template()
        };
        let contacts = build_preview(&doc).header.contacts;
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].kind, ContactKind::Email);
        assert_eq!(contacts[1].kind, ContactKind::Location);
        assert_eq!(contacts[1].value, "Natal");
    }

    #[test]
    fn test_minimal_imported_document_previews() {
        let doc: ResumeDocument = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        let layout = build_preview(&doc);
        assert_eq!(layout.header.name, "Ana");
        assert!(layout.sections.is_empty());
    }
}
