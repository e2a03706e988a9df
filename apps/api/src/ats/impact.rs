//! Impact check for experience bullets.
//!
//! A bullet passes when it carries a measurable outcome: a number, a
//! percentage or a currency amount. Bullets without one are flagged, and the
//! first weak verb or vague quantity word found is named in the finding.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::ResumeRecord;

static METRIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d|%|[$€£]").unwrap());

const WEAK_VERBS: &[&str] = &[
    "helped",
    "assisted",
    "worked on",
    "responsible for",
    "participated in",
    "involved in",
    "supported",
    "contributed to",
];

const VAGUE_QUANTITIES: &[&str] = &[
    "many",
    "several",
    "various",
    "numerous",
    "a lot",
    "significant",
    "significantly",
    "large",
    "huge",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactFinding {
    pub experience_index: usize,
    pub bullet: String,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub total_bullets: usize,
    pub quantified_bullets: usize,
    pub findings: Vec<ImpactFinding>,
}

impl ImpactReport {
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

pub fn is_quantified(bullet: &str) -> bool {
    METRIC_PATTERN.is_match(bullet)
}

/// Returns `(reason, suggestion)` for a bullet without a measurable outcome.
fn diagnose(bullet: &str) -> Option<(String, String)> {
    if is_quantified(bullet) {
        return None;
    }

    let lower = bullet.to_lowercase();
    if let Some(verb) = WEAK_VERBS.iter().find(|v| lower.contains(*v)) {
        return Some((
            format!("Weak verb '{verb}' with no measurable result"),
            "Lead with what you delivered and add a number: users, hours, percent or revenue."
                .to_string(),
        ));
    }
    let padded: String = format!(" {lower} ")
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    if let Some(word) = VAGUE_QUANTITIES
        .iter()
        .find(|w| padded.contains(&format!(" {w} ")))
    {
        return Some((
            format!("Uses '{word}' instead of a figure"),
            format!("Replace '{word}' with the actual count or percentage."),
        ));
    }
    Some((
        "No quantified outcome".to_string(),
        "Add a metric such as a percentage, an amount or a time saved.".to_string(),
    ))
}

/// Checks every bullet line of every experience entry.
pub fn check_impact(record: &ResumeRecord) -> ImpactReport {
    let mut total_bullets = 0;
    let mut quantified_bullets = 0;
    let mut findings = Vec::new();

    for (index, exp) in record.experience.iter().enumerate() {
        for bullet in exp.bullet_lines() {
            total_bullets += 1;
            match diagnose(bullet) {
                None => quantified_bullets += 1,
                Some((reason, suggestion)) => findings.push(ImpactFinding {
                    experience_index: index,
                    bullet: bullet.to_string(),
                    reason,
                    suggestion,
                }),
            }
        }
    }

    ImpactReport {
        total_bullets,
        quantified_bullets,
        findings,
    }
}
