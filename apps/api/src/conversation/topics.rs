//! The fixed topic sequence of the guided chat and the scripted question for
//! each topic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Topic {
    Introduction,
    PersonalInfo,
    JobTarget,
    Experience,
    Education,
    Skills,
    Challenges,
    Achievements,
    Complete,
    /// Any identifier this build does not know. Only reachable through a
    /// restored session; the engine treats it as a defect.
    #[serde(other)]
    Unknown,
}

/// Display and advancement order.
pub const TOPIC_ORDER: [Topic; 9] = [
    Topic::Introduction,
    Topic::PersonalInfo,
    Topic::JobTarget,
    Topic::Experience,
    Topic::Education,
    Topic::Skills,
    Topic::Challenges,
    Topic::Achievements,
    Topic::Complete,
];

/// Topics that make up the main question sequence (used for progress).
pub const MAIN_TOPICS: [Topic; 7] = [
    Topic::Introduction,
    Topic::PersonalInfo,
    Topic::JobTarget,
    Topic::Experience,
    Topic::Education,
    Topic::Skills,
    Topic::Challenges,
];

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::PersonalInfo => "personalInfo",
            Self::JobTarget => "jobTarget",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Challenges => "challenges",
            Self::Achievements => "achievements",
            Self::Complete => "complete",
            Self::Unknown => "unknown",
        }
    }

    /// The scripted question that opens this topic.
    pub fn question(&self) -> &'static str {
        match self {
            Self::Introduction => {
                "Hi! I'm your resume assistant. Tell me a little about yourself: \
                 what's your name, and what kind of role are you looking for?"
            }
            Self::PersonalInfo => {
                "What's the best email address and phone number for employers to reach you?"
            }
            Self::JobTarget => {
                "Do you have a specific job posting in mind? Paste the description or \
                 describe the role, and I'll tailor your resume to it."
            }
            Self::Experience => {
                "Tell me about your most recent job: your position, the company, \
                 when you worked there, and what you did."
            }
            Self::Education => {
                "Now your education. Which school did you attend, what degree did you \
                 earn, and when?"
            }
            Self::Skills => "List your key skills, separated by commas.",
            Self::Challenges => {
                "Describe a challenge you faced at work and how you handled it."
            }
            Self::Achievements => {
                "Tell me about a specific achievement you're proud of, ideally with numbers."
            }
            Self::Complete => "Your resume is ready! What would you like to do next?",
            Self::Unknown => "I'm not sure what to ask next, let's talk about skills.",
        }
    }

    /// Quick-reply buttons offered while this topic is current.
    pub fn suggested_replies(&self) -> Vec<String> {
        let replies: &[&str] = match self {
            Self::Introduction => &["I'm looking for a software engineering role"],
            Self::PersonalInfo => &[],
            Self::JobTarget => &["I don't have a specific posting yet"],
            Self::Experience => &[],
            Self::Education => &[],
            Self::Skills => &["Communication, Teamwork, Problem Solving"],
            Self::Challenges => &[],
            Self::Achievements => &[],
            Self::Complete => &["Go to editor", "Add more details", "Discuss templates"],
            Self::Unknown => &[],
        };
        replies.iter().map(|r| r.to_string()).collect()
    }

    /// Position in `TOPIC_ORDER`, or `None` for `Unknown`.
    pub fn index(&self) -> Option<usize> {
        TOPIC_ORDER.iter().position(|t| t == self)
    }
}
