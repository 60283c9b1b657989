//! Section Editors — narrow update operations over slices of the résumé document.
//!
//! Scalar sections get field setters. The three list sections share one set of generic
//! operations over [`SectionEntry`]: prepend a blank entry, remove by id, patch one field by id.
//! Entries are never validated for completeness; the document always mirrors the form.

pub mod courses;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod photo;
pub mod profile;
pub mod skills;

use std::collections::HashSet;

use crate::models::resume::{new_entry_id, ResumeDocument};

/// An item of one of the document's ordered lists.
pub trait SectionEntry: Clone {
    type Field: Copy;

    /// Used in not-found messages.
    const LABEL: &'static str;

    /// The list this entry type lives in.
    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self>;

    /// A new entry with every field empty.
    fn blank(id: String) -> Self;

    fn id(&self) -> &str;

    fn set_field(&mut self, field: Self::Field, value: String);
}

/// Inserts a blank entry with a fresh id at the head of `list` and returns a copy of it.
pub fn prepend_entry<E: SectionEntry>(list: &mut Vec<E>) -> E {
    let taken: HashSet<String> = list.iter().map(|e| e.id().to_string()).collect();
    let entry = E::blank(new_entry_id(&taken));
    list.insert(0, entry.clone());
    entry
}

/// Removes the entry with `id`. Returns `false` when no entry matched.
pub fn remove_entry<E: SectionEntry>(list: &mut Vec<E>, id: &str) -> bool {
    let before = list.len();
    list.retain(|e| e.id() != id);
    list.len() != before
}

/// Sets one field of the entry with `id` in place. Returns the updated entry, or `None`
/// when no entry matched.
pub fn patch_entry<E: SectionEntry>(
    list: &mut [E],
    id: &str,
    field: E::Field,
    value: String,
) -> Option<E> {
    let entry = list.iter_mut().find(|e| e.id() == id)?;
    entry.set_field(field, value);
    Some(entry.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::experience::ExperienceField;
    use crate::models::resume::{CourseEntry, ExperienceEntry};

    fn experience(id: &str, role: &str) -> ExperienceEntry {
        ExperienceEntry {
            id: id.to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prepend_puts_blank_entry_first_with_unique_id() {
        let mut list = vec![experience("a", "One"), experience("b", "Two")];
        let added = prepend_entry(&mut list);

        assert_eq!(list.len(), 3);
        assert_eq!(list[0], added);
        assert!(added.role.is_empty() && added.description.is_empty());
        assert!(!added.id.is_empty());
        assert!(list[1..].iter().all(|e| e.id != added.id));
        assert_eq!(list[1].role, "One");
        assert_eq!(list[2].role, "Two");
    }

    #[test]
    fn test_repeated_prepends_yield_distinct_ids() {
        let mut list: Vec<CourseEntry> = Vec::new();
        for _ in 0..20 {
            prepend_entry(&mut list);
        }
        let ids: HashSet<_> = list.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_remove_keeps_others_and_their_order() {
        let mut list = vec![
            experience("a", "One"),
            experience("b", "Two"),
            experience("c", "Three"),
        ];
        let expected = vec![list[0].clone(), list[2].clone()];

        assert!(remove_entry(&mut list, "b"));
        assert_eq!(list, expected);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut list = vec![experience("a", "One")];
        assert!(!remove_entry(&mut list, "zzz"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_patch_edits_in_place() {
        let mut list = vec![experience("a", "One"), experience("b", "Two")];
        let updated = patch_entry(&mut list, "b", ExperienceField::Company, "Acme".to_string());

        assert_eq!(updated.unwrap().company, "Acme");
        assert_eq!(list[1].id, "b");
        assert_eq!(list[1].company, "Acme");
        assert_eq!(list[0].company, "");
    }

    #[test]
    fn test_patch_unknown_id_returns_none() {
        let mut list = vec![experience("a", "One")];
        assert!(patch_entry(&mut list, "x", ExperienceField::Role, "R".to_string()).is_none());
        assert_eq!(list[0].role, "One");
    }
}
