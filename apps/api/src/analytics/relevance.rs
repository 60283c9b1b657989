//! Simulated skill relevance.
//!
//! NOT a real relevance signal. Each skill token is hashed to a stable pseudo-score so the
//! dashboard chart does not jitter between renders. Same skills text, same ranking.

use serde::Serialize;

use crate::editors::skills::skill_tokens;

/// Only the first N skills are charted.
pub const MAX_RANKED_SKILLS: usize = 8;
pub const MIN_SCORE: u8 = 65;
/// Exclusive upper bound.
pub const MAX_SCORE: u8 = 95;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillScore {
    pub name: String,
    pub score: u8,
}

/// Rolling string hash over UTF-16 code units: `h = c + ((h << 5) - h)`.
/// The shift wraps at 32 bits; the subtraction and addition do not.
pub fn relevance_hash(token: &str) -> i64 {
    let mut hash: i64 = 0;
    for unit in token.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = unit as i64 + (shifted - hash);
    }
    hash
}

/// Folds the hash into `[MIN_SCORE, MAX_SCORE)`.
pub fn relevance_score(token: &str) -> u8 {
    let span = (MAX_SCORE - MIN_SCORE) as i64;
    MIN_SCORE + (relevance_hash(token).abs() % span) as u8
}

/// Ranks up to [`MAX_RANKED_SKILLS`] tokens by descending pseudo-score.
/// Ties keep token order; duplicate tokens are all kept.
pub fn skill_relevance(skills: &str) -> Vec<SkillScore> {
    let mut ranked: Vec<SkillScore> = skill_tokens(skills)
        .into_iter()
        .take(MAX_RANKED_SKILLS)
        .map(|name| SkillScore {
            name: name.to_string(),
            score: relevance_score(name),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
