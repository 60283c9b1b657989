use serde::{Deserialize, Serialize};

use crate::editors::SectionEntry;
use crate::models::resume::{ExperienceEntry, ResumeDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Role,
    Company,
    StartDate,
    EndDate,
    Description,
}

impl SectionEntry for ExperienceEntry {
    type Field = ExperienceField;
    const LABEL: &'static str = "Experience entry";

    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self> {
        &mut doc.experience
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

    fn set_field(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Role => self.role = value,
            ExperienceField::Company => self.company = value,
            ExperienceField::StartDate => self.start_date = value,
            ExperienceField::EndDate => self.end_date = value,
            ExperienceField::Description => self.description = value,
        }
    }
}
