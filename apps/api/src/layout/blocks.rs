//! Content blocks: the atomic units a template lays out on a page.

use serde::{Deserialize, Serialize};

use crate::layout::templates::ExperienceLayout;
use crate::models::{
    Certification, EducationEntry, ExperienceEntry, Membership, PersonalInfo, ResumeRecord,
};

/// One self-contained rendering unit. Never split across pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ContentBlock {
    Header(PersonalInfo),
    Summary(String),
    Experience(ExperienceEntry),
    /// All experience entries as a single block, for templates that keep the
    /// section together.
    ExperienceGroup(Vec<ExperienceEntry>),
    Education(EducationEntry),
    Skills(Vec<String>),
    Certification(Certification),
    Membership(Membership),
}

impl ContentBlock {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::Summary(_) => "summary",
            Self::Experience(_) => "experience",
            Self::ExperienceGroup(_) => "experienceGroup",
            Self::Education(_) => "education",
            Self::Skills(_) => "skills",
            Self::Certification(_) => "certification",
            Self::Membership(_) => "membership",
        }
    }
}

/// Anything that can hand the paginator an ordered list of blocks.
pub trait ContentBlockSource {
    fn content_blocks(&self) -> Vec<ContentBlock>;
}

impl ContentBlockSource for Vec<ContentBlock> {
    fn content_blocks(&self) -> Vec<ContentBlock> {
        self.clone()
    }
}

/// A resume record viewed through one template's block rules.
pub struct TemplateContent<'a> {
    pub record: &'a ResumeRecord,
    pub experience_layout: ExperienceLayout,
}

impl<'a> TemplateContent<'a> {
    pub fn with_layout(record: &'a ResumeRecord, experience_layout: ExperienceLayout) -> Self {
        Self {
            record,
            experience_layout,
        }
    }
}

impl ContentBlockSource for TemplateContent<'_> {
    /// Header, summary, experience, education, skills, then certifications
    /// and memberships when present.
    fn content_blocks(&self) -> Vec<ContentBlock> {
        let record = self.record;
        let mut blocks = vec![
            ContentBlock::Header(record.personal_info.clone()),
            ContentBlock::Summary(record.summary.clone()),
        ];

        match self.experience_layout {
            ExperienceLayout::PerEntry => blocks.extend(
                record
                    .experience
                    .iter()
                    .map(|exp| ContentBlock::Experience(exp.for_display())),
            ),
            ExperienceLayout::Grouped => blocks.push(ContentBlock::ExperienceGroup(
                record.experience.iter().map(ExperienceEntry::for_display).collect(),
            )),
        }

        blocks.extend(
            record
                .education
                .iter()
                .map(|edu| ContentBlock::Education(edu.for_display())),
        );
        blocks.push(ContentBlock::Skills(record.skills.clone()));
        blocks.extend(
            record
                .certifications
                .iter()
                .cloned()
                .map(ContentBlock::Certification),
        );
        blocks.extend(record.memberships.iter().cloned().map(ContentBlock::Membership));
        blocks
    }
}
