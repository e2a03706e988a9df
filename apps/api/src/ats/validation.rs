//! Export validation: checks the fields a printable resume cannot do without.
//! Every problem is reported, not just the first.

use serde::{Deserialize, Serialize};

use crate::models::ResumeRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path in the record's JSON shape, e.g. `experience[1].startDate`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

pub fn validate_record(record: &ResumeRecord) -> ValidationReport {
    let mut issues = Vec::new();

    let info = &record.personal_info;
    require_opt(&mut issues, "personalInfo.fullName", info.full_name.as_deref(), "Full name");
    require_opt(&mut issues, "personalInfo.email", info.email.as_deref(), "Email");

    for (i, exp) in record.experience.iter().enumerate() {
        let prefix = format!("experience[{i}]");
        require(&mut issues, &prefix, "company", &exp.company, "Company");
        require(&mut issues, &prefix, "position", &exp.position, "Position");
        require(&mut issues, &prefix, "startDate", &exp.start_date, "Start date");
        if !exp.is_present {
            require(&mut issues, &prefix, "endDate", &exp.end_date, "End date");
        }
    }

    for (i, edu) in record.education.iter().enumerate() {
        let prefix = format!("education[{i}]");
        require(&mut issues, &prefix, "institution", &edu.institution, "Institution");
        require(&mut issues, &prefix, "degree", &edu.degree, "Degree");
    }

    ValidationReport {
        valid: issues.is_empty(),
        issues,
    }
}

fn require_opt(issues: &mut Vec<ValidationIssue>, field: &str, value: Option<&str>, label: &str) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        issues.push(ValidationIssue {
            field: field.to_string(),
            message: format!("{label} is required"),
        });
    }
}

fn require(
    issues: &mut Vec<ValidationIssue>,
    prefix: &str,
    key: &str,
    value: &str,
    label: &str,
) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue {
            field: format!("{prefix}.{key}"),
            message: format!("{label} is required"),
        });
    }
}
