//! The résumé document: one record, three ordered entry lists and a delimited skills field.
//!
//! Every field is decoded leniently. Backups are user-supplied and often hand-edited, so a
//! missing or wrong-typed field falls back to its default instead of rejecting the document.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Version label given to a fresh document.
pub const TEMPLATE_VERSION_NAME: &str = "Default Posting";

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: String,
    /// Free text, never parsed as a date.
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub version_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    /// Legacy single-line location. Superseded by address/city/state when those are set.
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub courses: Vec<CourseEntry>,
    /// Comma separated, stored exactly as typed.
    #[serde(default, deserialize_with = "lenient_text")]
    pub skills: String,
    /// Embedded `data:` URI.
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
}

impl ResumeDocument {
    /// The blank document used at first start and on reset.
    pub fn template() -> Self {
        Self {
            id: "1".to_string(),
            version_name: TEMPLATE_VERSION_NAME.to_string(),
            ..Self::default()
        }
    }

    /// Assigns fresh ids to entries whose id is blank or already used earlier in the same list.
    /// Returns the number of ids that were replaced.
    pub fn ensure_entry_ids(&mut self) -> usize {
        fix_ids(self.experience.iter_mut().map(|e| &mut e.id))
            + fix_ids(self.education.iter_mut().map(|e| &mut e.id))
            + fix_ids(self.courses.iter_mut().map(|e| &mut e.id))
    }
}

fn fix_ids<'a>(ids: impl Iterator<Item = &'a mut String>) -> usize {
    let ids: Vec<&mut String> = ids.collect();
    let mut taken: HashSet<String> = ids
        .iter()
        .filter(|id| !id.trim().is_empty())
        .map(|id| id.to_string())
        .collect();
    let mut seen = HashSet::new();
    let mut replaced = 0;

    for id in ids {
        if id.trim().is_empty() || !seen.insert(id.clone()) {
            let fresh = new_entry_id(&taken);
            taken.insert(fresh.clone());
            seen.insert(fresh.clone());
            *id = fresh;
            replaced += 1;
        }
    }
    replaced
}

/// Generates an entry id that does not collide with any id in `taken`.
pub fn new_entry_id(taken: &HashSet<String>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken.contains(&id) {
            return id;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoding
// ────────────────────────────────────────────────────────────────────────────

fn coerce_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(value).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(value))
}

/// Non-array values become an empty list; non-object items are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
