//! Local job-description keyword extraction.
//!
//! Tokens are counted after dropping stop words. A term's weight is its
//! frequency scaled by where it first appears: requirements near the top of a
//! posting tend to matter more.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Upper bound on keywords kept from one description.
pub const MAX_KEYWORDS: usize = 25;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+#]*(?:[.-][A-Za-z0-9+#]+)*").unwrap());

const STOP_WORDS: &[&str] = &[
    "a", "about", "across", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "both", "but", "by", "can", "do", "each", "etc", "for", "from", "have", "help", "how", "if",
    "in", "into", "is", "it", "its", "join", "looking", "may", "more", "must", "new", "not", "of",
    "on", "or", "our", "own", "per", "plus", "should", "so", "such", "team", "that", "the",
    "their", "them", "they", "this", "to", "up", "us", "we", "what", "when", "who", "will",
    "with", "within", "work", "would", "you", "your", "years", "year", "experience", "ability",
    "strong", "required", "preferred", "role", "including",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobKeyword {
    pub keyword: String,
    pub frequency: u32,
    /// 1.0 in the first third of the text, 0.8 in the middle, 0.6 after.
    pub position_weight: f32,
    /// `frequency * position_weight`
    pub weight: f32,
}

/// Lowercased tokens of `text`, in order.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Distinct lowercased tokens of `text`.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

fn position_weight(index: usize, total: usize) -> f32 {
    let third = total.div_ceil(3).max(1);
    match index / third {
        0 => 1.0,
        1 => 0.8,
        _ => 0.6,
    }
}

/// Extracts up to [`MAX_KEYWORDS`] weighted keywords, heaviest first.
/// Ties break alphabetically so the order is stable.
pub fn extract_keywords(job_description: &str) -> Vec<JobKeyword> {
    let tokens = tokenize(job_description);
    let total = tokens.len();

    // keyword -> (frequency, first index)
    let mut seen: HashMap<String, (u32, usize)> = HashMap::new();
    for (index, token) in tokens.into_iter().enumerate() {
        if token.len() < 2 || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        seen.entry(token)
            .and_modify(|(freq, _)| *freq += 1)
            .or_insert((1, index));
    }

    let mut keywords: Vec<JobKeyword> = seen
        .into_iter()
        .map(|(keyword, (frequency, first))| {
            let position_weight = position_weight(first, total);
            JobKeyword {
                keyword,
                frequency,
                position_weight,
                weight: frequency as f32 * position_weight,
            }
        })
        .collect();

    keywords.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    keywords.truncate(MAX_KEYWORDS);
    keywords
}
