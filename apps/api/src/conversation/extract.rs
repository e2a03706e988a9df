//! Pattern-based field extraction from free-text chat messages.
//!
//! Each extractor tries an ordered list of patterns, most specific first, and
//! returns `None` when nothing matches. Callers decide the placeholder; `None`
//! never reaches the resume record.

use std::sync::LazyLock;

use regex::Regex;

const TITLE_SUFFIXES: &str = "Engineer|Developer|Manager|Designer|Analyst|Scientist|Consultant|\
Director|Architect|Specialist|Administrator|Coordinator|Lead|Intern|Officer|Accountant|\
Teacher|Nurse|Assistant|Associate|Representative|Technician|Programmer|Executive";

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+";

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\b[Ii]['’]m|\b[Ii] am|\b[Mm]y name is|\b[Tt]his is)\s+([A-Z][a-z][A-Za-z'’-]*(?:\s+[A-Z][a-z][A-Za-z'’-]*)*)",
    )
    .unwrap()
});

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b").unwrap()
});

static COMPANY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\bat\s+([A-Z][\w&.'-]*(?:\s+(?:[A-Z][\w&.'-]*|&|of))*)").unwrap(),
        Regex::new(r"\b(?:for|with|joined)\s+([A-Z][\w&.'-]*(?:\s+(?:[A-Z][\w&.'-]*|&|of))*)")
            .unwrap(),
        Regex::new(
            r"(?i)\bcompany(?:\s+(?:is|was|called|named))?\s*:?\s+([\w&.'-]+(?:\s+[\w&.'-]+)?)",
        )
        .unwrap(),
    ]
});

static POSITION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(&format!(
            r"\b((?:[A-Z][\w+#/-]*\s+){{0,3}}(?:{TITLE_SUFFIXES}))\b"
        ))
        .unwrap(),
        Regex::new(
            r"(?i)\b(?:as an?|as the|as|(?:position|role|title) (?:is|was))\s+([a-z][\w +#/-]*?)(?:\s+(?:at|for|with|in|from)\b|[.,;!\n]|$)",
        )
        .unwrap(),
    ]
});

static INSTITUTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"\b((?:[A-Z][\w&'.-]*\s+)*(?:University|College|Institute|School|Academy|Polytechnic)(?:\s+of(?:\s+[A-Z][\w&'.-]*)+)?)",
        )
        .unwrap(),
        Regex::new(r"\b(?:at|from|attended)\s+([A-Z][\w&'.-]*(?:\s+[A-Z][\w&'.-]*)*)").unwrap(),
    ]
});

static DEGREE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"\b((?:Bachelor|Master|Doctor|Associate)(?:['’]s)?(?:\s+(?:of|in)\s+[A-Z]\w*(?:\s+[A-Z]\w*)*|\s+degree)?)",
        )
        .unwrap(),
        Regex::new(r"\b((?:Ph\.?D|MBA|B\.?Sc?|M\.?Sc?|B\.?A|M\.?A|B\.?Eng|M\.?Eng)\b\.?)").unwrap(),
        Regex::new(r"(?i)\b(bachelor['’]?s?|master['’]?s?|doctorate|associate['’]?s?|diploma)\b")
            .unwrap(),
    ]
});

static FIELD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\bin\s+([A-Z]\w*(?:\s+(?:[A-Z]\w*|and|&))*)").unwrap(),
        Regex::new(r"(?i)\bmajor(?:ed|ing)?\s+in\s+([a-z][\w ]*?)(?:\s+(?:at|from)\b|[.,;\n]|$)")
            .unwrap(),
    ]
});

static DATE_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b((?:{MONTH})?(?:19|20)\d{{2}})\s*(?:-|–|—|to|until|through)\s*((?:{MONTH})?(?:19|20)\d{{2}}|present|current|now|today)\b"
    ))
    .unwrap()
});

static SINCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bsince\s+((?:{MONTH})?(?:19|20)\d{{2}})\b")).unwrap()
});

/// Start/end of a role or course of study as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    /// Empty when `is_present`.
    pub end: String,
    pub is_present: bool,
}

/// Name introduced with "I'm ...", "I am ...", "My name is ...".
pub fn extract_name(text: &str) -> Option<String> {
    capture(&NAME_PATTERN, text)
}

/// True when the introduction mentions what the user is looking for.
pub fn has_job_interest_cue(text: &str) -> bool {
    let padded = format!(" {} ", text.to_lowercase());
    padded.contains(" for ") || padded.contains(" in ")
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_PATTERN.find(text).map(|m| m.as_str().trim().to_string())
}

pub fn extract_company(text: &str) -> Option<String> {
    first_capture(&COMPANY_PATTERNS, text)
}

pub fn extract_position(text: &str) -> Option<String> {
    first_capture(&POSITION_PATTERNS, text)
}

pub fn extract_institution(text: &str) -> Option<String> {
    first_capture(&INSTITUTION_PATTERNS, text)
}

pub fn extract_degree(text: &str) -> Option<String> {
    first_capture(&DEGREE_PATTERNS, text)
}

pub fn extract_field_of_study(text: &str) -> Option<String> {
    first_capture(&FIELD_PATTERNS, text).map(|f| {
        f.trim_end_matches(" and")
            .trim_end_matches(" &")
            .trim()
            .to_string()
    })
}

/// "2019 - 2022", "Jan 2020 to present", "since 2021".
pub fn extract_date_range(text: &str) -> Option<DateRange> {
    if let Some(caps) = DATE_RANGE_PATTERN.captures(text) {
        let start = caps.get(1)?.as_str().trim().to_string();
        let end = caps.get(2)?.as_str().trim().to_string();
        let is_present = matches!(
            end.to_lowercase().as_str(),
            "present" | "current" | "now" | "today"
        );
        return Some(DateRange {
            start,
            end: if is_present { String::new() } else { end },
            is_present,
        });
    }

    SINCE_PATTERN.captures(text).and_then(|caps| {
        Some(DateRange {
            start: caps.get(1)?.as_str().trim().to_string(),
            end: String::new(),
            is_present: true,
        })
    })
}

/// Splits a skills answer on commas, periods and newlines. Order is kept and
/// empty tokens are dropped.
pub fn split_skills(text: &str) -> Vec<String> {
    text.split([',', '.', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| clean(m.as_str()))
        .filter(|s| !s.is_empty())
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|p| capture(p, text))
}

fn clean(raw: &str) -> String {
    raw.trim()
        .trim_end_matches([',', ';', ':', '!', '?'])
        .trim_end_matches(" of")
        .trim_end_matches(" &")
        .trim()
        .to_string()
}
