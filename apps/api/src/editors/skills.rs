use crate::models::resume::ResumeDocument;

/// Stores the skills text exactly as typed, separators and stray whitespace included.
pub fn set_skills(doc: &mut ResumeDocument, text: String) {
    doc.skills = text;
}

/// Splits the skills field on commas, trims each token and drops the empty ones.
pub fn skill_tokens(skills: &str) -> Vec<&str> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
