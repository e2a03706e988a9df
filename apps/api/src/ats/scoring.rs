//! ATS scoring: pluggable, trait-based scorer that measures a resume record
//! against a job description.
//!
//! Default: `KeywordAtsScorer` (local, deterministic, no network).
//! `AppState` holds an `Arc<dyn AtsScorer>`.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ats::keywords::{extract_keywords, token_set, tokenize, JobKeyword};
use crate::errors::AppError;
use crate::models::ResumeRecord;

const SKILL_STRENGTH: f32 = 1.0;
const TEXT_STRENGTH: f32 = 0.6;

// ────────────────────────────────────────────────────────────────────────────
// Report types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub keyword: String,
    /// "skills" or "resume text".
    pub evidence: String,
    pub strength: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGap {
    pub keyword: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    /// 0 – 100
    pub overall_score: u32,
    /// strength ≥ 0.8
    pub strong_matches: Vec<KeywordMatch>,
    /// 0.4 – 0.79
    pub partial_matches: Vec<KeywordMatch>,
    pub gaps: Vec<KeywordGap>,
    pub recommendation: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(
        &self,
        record: &ResumeRecord,
        job_description: &str,
    ) -> Result<AtsReport, AppError>;
}

/// Keyword overlap scorer.
///
/// 1. Keywords come from [`extract_keywords`].
/// 2. A keyword found among the record's skills scores 1.0, one found in the
///    rest of the record's text scores 0.6, otherwise 0.0.
/// 3. `overall_score = Σ(strength × weight) / Σ(weight) × 100`.
pub struct KeywordAtsScorer;

#[async_trait]
impl AtsScorer for KeywordAtsScorer {
    async fn score(
        &self,
        record: &ResumeRecord,
        job_description: &str,
    ) -> Result<AtsReport, AppError> {
        Ok(score_keywords(record, &extract_keywords(job_description)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword algorithm
// ────────────────────────────────────────────────────────────────────────────

fn score_keywords(record: &ResumeRecord, keywords: &[JobKeyword]) -> AtsReport {
    if keywords.is_empty() {
        return AtsReport {
            overall_score: 0,
            strong_matches: vec![],
            partial_matches: vec![],
            gaps: vec![],
            recommendation: "No keywords found in the job description.".to_string(),
            scorer_backend: "keyword".to_string(),
        };
    }

    // A skill counts if it equals the keyword or contains it as a word.
    let skill_tokens: HashSet<String> = record
        .skills
        .iter()
        .flat_map(|s| {
            let mut tokens = tokenize(s);
            tokens.push(s.trim().to_lowercase());
            tokens
        })
        .collect();
    let text_tokens = token_set(&record.searchable_text());

    let mut strong_matches = Vec::new();
    let mut partial_matches = Vec::new();
    let mut gaps = Vec::new();
    let mut total_weight = 0.0_f32;
    let mut total_score = 0.0_f32;

    for kw in keywords {
        total_weight += kw.weight;

        let (strength, evidence) = if skill_tokens.contains(&kw.keyword) {
            (SKILL_STRENGTH, "skills")
        } else if text_tokens.contains(&kw.keyword) {
            (TEXT_STRENGTH, "resume text")
        } else {
            (0.0, "")
        };
        total_score += strength * kw.weight;

        let matched = KeywordMatch {
            keyword: kw.keyword.clone(),
            evidence: evidence.to_string(),
            strength,
        };
        if strength >= 0.8 {
            strong_matches.push(matched);
        } else if strength >= 0.4 {
            partial_matches.push(matched);
        } else {
            gaps.push(KeywordGap {
                keyword: kw.keyword.clone(),
                frequency: kw.frequency,
            });
        }
    }

    let overall_score = if total_weight > 0.0 {
        ((total_score / total_weight) * 100.0).round().clamp(0.0, 100.0) as u32
    } else {
        0
    };

    AtsReport {
        recommendation: build_recommendation(overall_score, &gaps),
        overall_score,
        strong_matches,
        partial_matches,
        gaps,
        scorer_backend: "keyword".to_string(),
    }
}

fn build_recommendation(score: u32, gaps: &[KeywordGap]) -> String {
    let top_gaps: Vec<&str> = gaps.iter().take(3).map(|g| g.keyword.as_str()).collect();

    if score >= 80 {
        "Strong match. Your resume covers the main keywords of this posting.".to_string()
    } else if score >= 60 {
        format!(
            "Fair match ({score}/100). Consider working in: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Weak match ({score}/100). Missing keywords: {}. Add them to your skills or experience where they apply.",
            top_gaps.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceEntry;

    fn record(skills: &[&str], description: &str) -> ResumeRecord {
        let mut record = ResumeRecord {
            experience: vec![ExperienceEntry {
                description: description.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        record.set_skills(skills);
        record
    }

    #[tokio::test]
    async fn test_skill_matches_are_strong() {
        let report = KeywordAtsScorer
            .score(&record(&["Rust", "Kafka"], ""), "Rust Kafka")
            .await
            .unwrap();
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.strong_matches.len(), 2);
        assert_eq!(report.strong_matches[0].evidence, "skills");
        assert!(report.gaps.is_empty());
    }

    #[tokio::test]
    async fn test_text_match_is_partial() {
        let report = KeywordAtsScorer
            .score(&record(&[], "Ran Kubernetes clusters"), "Kubernetes")
            .await
            .unwrap();
        assert_eq!(report.partial_matches.len(), 1);
        assert_eq!(report.partial_matches[0].strength, 0.6);
        assert_eq!(report.overall_score, 60);
    }

    #[tokio::test]
    async fn test_missing_keyword_is_a_gap() {
        let report = KeywordAtsScorer
            .score(&record(&["Python"], ""), "Rust Rust")
            .await
            .unwrap();
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.gaps[0].keyword, "rust");
        assert_eq!(report.gaps[0].frequency, 2);
        assert!(report.recommendation.contains("rust"));
    }

    #[tokio::test]
    async fn test_multi_word_skill_matches_its_words() {
        let report = KeywordAtsScorer
            .score(&record(&["Distributed Systems"], ""), "distributed")
            .await
            .unwrap();
        assert_eq!(report.strong_matches.len(), 1);
    }

    #[tokio::test]
    async fn test_substring_is_not_a_match() {
        let report = KeywordAtsScorer
            .score(&record(&[], "Good communicator"), "Go")
            .await
            .unwrap();
        assert_eq!(report.gaps.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_description_scores_zero() {
        let report = KeywordAtsScorer
            .score(&record(&["Rust"], ""), "")
            .await
            .unwrap();
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.scorer_backend, "keyword");
    }

    #[test]
    fn test_recommendation_bands() {
        assert!(build_recommendation(90, &[]).starts_with("Strong match"));
        let gaps = vec![KeywordGap {
            keyword: "terraform".to_string(),
            frequency: 1,
        }];
        assert!(build_recommendation(65, &gaps).contains("terraform"));
        assert!(build_recommendation(20, &gaps).contains("20/100"));
    }
}
