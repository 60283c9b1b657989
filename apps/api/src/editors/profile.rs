use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeDocument;

/// Scalar fields edited on the personal-data tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Name,
    VersionName,
    Title,
    Email,
    Phone,
    Location,
    Address,
    City,
    State,
    Summary,
}

pub fn set_profile_field(doc: &mut ResumeDocument, field: ProfileField, value: String) {
    match field {
        ProfileField::Name => doc.name = value,
        ProfileField::VersionName => doc.version_name = value,
        ProfileField::Title => doc.title = value,
        ProfileField::Email => doc.email = value,
        ProfileField::Phone => doc.phone = value,
        ProfileField::Location => doc.location = value,
        ProfileField::Address => doc.address = Some(value),
        ProfileField::City => doc.city = Some(value),
        ProfileField::State => doc.state = Some(value),
        ProfileField::Summary => doc.summary = value,
    }
}
