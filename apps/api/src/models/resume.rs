//! The canonical resume record shared by the chat flow, the form editor and the
//! layout engine.
//!
//! Field names serialize in camelCase so records stored by existing clients
//! round-trip field-for-field.

use serde::{Deserialize, Serialize};

/// Personal-info fields are always present on the wire. An unset value is
/// written as `""`, and blank or missing input reads back as `None`.
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, with = "blank_as_none")]
    pub full_name: Option<String>,
    #[serde(default, with = "blank_as_none")]
    pub title: Option<String>,
    #[serde(default, with = "blank_as_none")]
    pub email: Option<String>,
    #[serde(default, with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(default, with = "blank_as_none")]
    pub location: Option<String>,
    #[serde(default, with = "blank_as_none")]
    pub profile_image: Option<String>,
    #[serde(default, with = "blank_as_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub is_present: bool,
    /// Newline-delimited bullet lines.
    pub description: String,
}

impl ExperienceEntry {
    /// Non-empty bullet lines of the description, trimmed.
    pub fn bullet_lines(&self) -> impl Iterator<Item = &str> {
        self.description
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Appends one bullet line to the description.
    pub fn push_bullet(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if !self.description.trim().is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(line);
    }

    /// End date as shown on the page. Blank while the role is current.
    pub fn display_end_date(&self) -> &str {
        if self.is_present {
            ""
        } else {
            &self.end_date
        }
    }

    /// Copy of the entry as it is printed.
    pub fn for_display(&self) -> Self {
        Self {
            end_date: self.display_end_date().to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub is_present: bool,
}

impl EducationEntry {
    pub fn display_end_date(&self) -> &str {
        if self.is_present {
            ""
        } else {
            &self.end_date
        }
    }

    pub fn for_display(&self) -> Self {
        Self {
            end_date: self.display_end_date().to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Membership {
    pub organization: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
}

/// A complete or partially-filled resume. Every list defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub memberships: Vec<Membership>,
}

impl ResumeRecord {
    /// Adds a skill unless an entry with the same text (ignoring case) exists.
    /// Returns whether the skill was added.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        let lower = skill.to_lowercase();
        if self.skills.iter().any(|s| s.to_lowercase() == lower) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Replaces the skills list, keeping first occurrences in order.
    pub fn set_skills<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills.clear();
        for skill in skills {
            self.add_skill(skill.as_ref());
        }
    }

    /// All free text in the record, lowercased. Used for keyword matching.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.summary.as_str()];
        if let Some(title) = self.personal_info.title.as_deref() {
            parts.push(title);
        }
        for exp in &self.experience {
            parts.push(&exp.position);
            parts.push(&exp.company);
            parts.push(&exp.description);
        }
        for edu in &self.education {
            parts.push(&edu.degree);
            parts.push(&edu.field_of_study);
        }
        for cert in &self.certifications {
            parts.push(&cert.name);
        }
        parts.join("\n").to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_empty_lists() {
        let record: ResumeRecord = serde_json::from_str("{}").unwrap();
        assert!(record.experience.is_empty());
        assert!(record.education.is_empty());
        assert!(record.skills.is_empty());
        assert!(record.certifications.is_empty());
        assert!(record.memberships.is_empty());
        assert!(record.personal_info.full_name.is_none());
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = Some("Alex".to_string());
        record.education.push(EducationEntry {
            field_of_study: "Physics".to_string(),
            is_present: true,
            ..Default::default()
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["personalInfo"]["fullName"], "Alex");
        assert_eq!(value["education"][0]["fieldOfStudy"], "Physics");
        assert_eq!(value["education"][0]["isPresent"], true);
        assert_eq!(value["personalInfo"]["email"], "");
        assert_eq!(value["personalInfo"]["profileImage"], "");
    }

    #[test]
    fn test_personal_info_keeps_every_key() {
        let value = serde_json::to_value(PersonalInfo::default()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 7);
        for key in ["fullName", "title", "email", "phone", "location", "profileImage", "website"] {
            assert_eq!(value[key], "", "{key} should be written as an empty string");
        }

        let back: PersonalInfo =
            serde_json::from_str(r#"{"fullName": "  ", "email": null, "phone": "555"}"#).unwrap();
        assert!(back.full_name.is_none());
        assert!(back.email.is_none());
        assert_eq!(back.phone.as_deref(), Some("555"));
    }

    #[test]
    fn test_stored_record_deserializes() {
        let json = r#"{
            "personalInfo": {"fullName": "Sam Lee", "email": "sam@x.io", "profileImage": ""},
            "summary": "Engineer",
            "experience": [{
                "company": "Acme", "position": "Dev", "startDate": "2020",
                "endDate": "", "isPresent": true, "description": "Built things\nShipped things"
            }],
            "skills": ["Rust"],
            "memberships": [{"organization": "IEEE", "role": "Member", "startDate": "2019", "endDate": "2021"}]
        }"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.personal_info.email.as_deref(), Some("sam@x.io"));
        assert!(record.personal_info.profile_image.is_none());
        assert_eq!(record.experience[0].bullet_lines().count(), 2);
        assert_eq!(record.memberships[0].organization, "IEEE");
        assert!(record.certifications.is_empty());
    }

    #[test]
    fn test_add_skill_suppresses_case_insensitive_duplicates() {
        let mut record = ResumeRecord::default();
        assert!(record.add_skill("Python"));
        assert!(!record.add_skill("python"));
        assert!(!record.add_skill("  "));
        assert!(record.add_skill("Go"));
        assert_eq!(record.skills, vec!["Python", "Go"]);
    }

    #[test]
    fn test_set_skills_replaces_existing() {
        let mut record = ResumeRecord::default();
        record.add_skill("Java");
        record.set_skills(["Rust", "SQL", "rust"]);
        assert_eq!(record.skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_present_role_hides_end_date() {
        let entry = ExperienceEntry {
            end_date: "2021".to_string(),
            is_present: true,
            ..Default::default()
        };
        assert_eq!(entry.display_end_date(), "");
    }

    #[test]
    fn test_push_bullet_joins_with_newline() {
        let mut entry = ExperienceEntry::default();
        entry.push_bullet("First");
        entry.push_bullet("  ");
        entry.push_bullet("Second");
        assert_eq!(entry.description, "First\nSecond");
    }
}
