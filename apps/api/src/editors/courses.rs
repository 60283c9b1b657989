use serde::{Deserialize, Serialize};

use crate::editors::SectionEntry;
use crate::models::resume::{CourseEntry, ResumeDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CourseField {
    Name,
    Institution,
    Year,
}

impl SectionEntry for CourseEntry {
    type Field = CourseField;
    const LABEL: &'static str = "Course";

    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self> {
        &mut doc.courses
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_field(&mut self, field: CourseField, value: String) {
        match field {
            CourseField::Name => self.name = value,
            CourseField::Institution => self.institution = value,
            CourseField::Year => self.year = value,
        }
    }
}
