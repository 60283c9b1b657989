// Prompt templates for the AI Gateway.
// Placeholders are substituted with `fill_template` before sending.

/// Experience rewrite prompt. Fills `{description}`.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Act as a senior career consultant who specializes in executive résumés.

TASK: Rewrite the professional experience description below.

STYLE GUIDELINES:
1. Use the format 'Action + Context + Result (with metrics where possible)'.
2. Start every point with a strong action verb in the past tense.
3. IMPORTANT: Do not use Markdown formatting (such as **bold** or *italic*). The text must be plain text.
4. Use the '•' character (bullet point) to list the items.
5. Remove generic placeholders such as '[Number]' when there is no data, rephrasing so the sentence still sounds professional without them.

Original description to rewrite:
"{description}"

Return only the rewritten list of bullet points, with no introduction."#;

/// ATS keyword-gap prompt. Fills `{resume_text}` and `{job_description}`.
pub const ATS_PROMPT_TEMPLATE: &str = r#"Analyze the attached résumé against the job description.
Suggest five key phrases or technical/interpersonal skills that, if added to the résumé, would maximize its score in an ATS (Applicant Tracking System).
Briefly justify each suggestion.

Résumé:
{resume_text}

Job description:
{job_description}"#;

/// Description attached to the `suggestions` property of the ATS response schema.
pub const ATS_SUGGESTIONS_DESCRIPTION: &str =
    "List of 5 improvement suggestions (skills or key phrases).";

/// Substitutes `{name}` placeholders in a single pass. Inserted values are never rescanned,
/// so user text that happens to contain a placeholder stays as typed. Unknown placeholders
/// are left in place.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = after.find('}').and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end, *value))
        });
        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
