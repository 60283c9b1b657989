use serde::{Deserialize, Serialize};

use crate::editors::SectionEntry;
use crate::models::resume::{EducationEntry, ResumeDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Degree,
    Institution,
    Year,
}

impl SectionEntry for EducationEntry {
    type Field = EducationField;
    const LABEL: &'static str = "Education entry";

    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self> {
        &mut doc.education
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

    fn set_field(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Degree => self.degree = value,
            EducationField::Institution => self.institution = value,
            EducationField::Year => self.year = value,
        }
    }
}
