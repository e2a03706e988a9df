//! Conversation Engine: the scripted chat as a pure state transition.
//!
//! `process_message(state, draft, text)` never mutates its inputs. It returns
//! the next state, the next draft, the assistant reply, quick replies and a
//! view hint for the host UI.
//!
//! # Failure rules
//! - Extraction misses fall back to placeholders, silently.
//! - Suggestion backend failures are logged and replaced with deterministic text.
//! - An unknown topic is a defect: `RecoveryMode::Strict` returns an error,
//!   `RecoveryMode::Lenient` logs it and steers the chat back to skills.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::conversation::extract::{
    extract_company, extract_date_range, extract_degree, extract_email, extract_field_of_study,
    extract_institution, extract_name, extract_phone, extract_position, has_job_interest_cue,
    split_skills,
};
use crate::conversation::prompts::{
    ACHIEVEMENT_FIELD, COMPANY_PLACEHOLDER, DEGREE_PLACEHOLDER, EXPERIENCE_BULLETS_INSTRUCTION,
    FALLBACK_SUMMARY, INSTITUTION_PLACEHOLDER, POSITION_PLACEHOLDER, SUMMARY_PROMPT_TEMPLATE,
};
use crate::conversation::state::ConversationState;
use crate::conversation::topics::Topic;
use crate::models::{EducationEntry, ExperienceEntry, ResumeRecord};
use crate::suggestions::SuggestionService;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum ConversationError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("conversation reached unknown topic '{0}'")]
    UnknownTopic(String),
}

/// What the host UI should show after this turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewModeHint {
    #[default]
    Stay,
    TemplatePreview,
}

/// How an unknown topic is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryMode {
    /// Fail the turn (development).
    Strict,
    /// Log and recover with a generic reply (production).
    Lenient,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub state: ConversationState,
    pub draft: ResumeRecord,
    pub reply: String,
    pub suggested_replies: Vec<String>,
    pub view_mode: ViewModeHint,
}

/// Recognised requests once the resume is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompletionIntent {
    OpenEditor,
    AddMore,
    DiscussTemplates,
    Unrecognised,
}

/// Reply half of a turn; state and draft are carried separately.
struct Reply {
    text: String,
    suggested: Vec<String>,
    view_mode: ViewModeHint,
}

impl Reply {
    fn asking(text: String, topic: Topic) -> Self {
        Self {
            text,
            suggested: topic.suggested_replies(),
            view_mode: ViewModeHint::Stay,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ConversationEngine {
    suggestions: Arc<dyn SuggestionService>,
    recovery: RecoveryMode,
}

impl ConversationEngine {
    pub fn new(suggestions: Arc<dyn SuggestionService>, recovery: RecoveryMode) -> Self {
        Self {
            suggestions,
            recovery,
        }
    }

    /// Processes one user message against the current topic.
    pub async fn process_message(
        &self,
        state: &ConversationState,
        draft: &ResumeRecord,
        user_text: &str,
    ) -> Result<TurnOutcome, ConversationError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }

        let mut state = state.clone();
        let mut draft = draft.clone();
        debug!(topic = state.current_topic.as_str(), "processing chat message");

        let reply = match state.current_topic {
            Topic::Introduction => handle_introduction(&mut state, &mut draft, text),
            Topic::PersonalInfo => handle_personal_info(&mut state, &mut draft, text),
            Topic::JobTarget => handle_job_target(&mut state, text),
            Topic::Experience => self.handle_experience(&mut state, &mut draft, text).await,
            Topic::Education => handle_education(&mut state, &mut draft, text),
            Topic::Skills => handle_skills(&mut state, &mut draft, text),
            Topic::Challenges => self.handle_challenges(&mut state, &mut draft, text).await,
            Topic::Complete => handle_complete(&mut state, text),
            Topic::Achievements => self.handle_achievement(&mut draft, text).await,
            Topic::Unknown => self.recover_unknown_topic(&mut state)?,
        };

        state.extracted_data = draft.clone();

        Ok(TurnOutcome {
            state,
            draft,
            reply: reply.text,
            suggested_replies: reply.suggested,
            view_mode: reply.view_mode,
        })
    }

    async fn handle_experience(
        &self,
        state: &mut ConversationState,
        draft: &mut ResumeRecord,
        text: &str,
    ) -> Reply {
        let bullets = match self
            .suggestions
            .generate_bullet_points(EXPERIENCE_BULLETS_INSTRUCTION, text)
            .await
        {
            Ok(generated) if !generated.bullets.is_empty() => generated.bullets,
            Ok(_) => {
                warn!(topic = "experience", "bullet generation returned nothing, using raw text");
                vec![text.to_string()]
            }
            Err(e) => {
                warn!(topic = "experience", error = %e, "bullet generation failed, using raw text");
                vec![text.to_string()]
            }
        };

        let range = extract_date_range(text);
        let mut entry = ExperienceEntry {
            company: extract_company(text).unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string()),
            position: extract_position(text).unwrap_or_else(|| POSITION_PLACEHOLDER.to_string()),
            ..Default::default()
        };
        if let Some(range) = range {
            entry.start_date = range.start;
            entry.end_date = range.end;
            entry.is_present = range.is_present;
        }
        for bullet in &bullets {
            entry.push_bullet(bullet);
        }

        let listed = bullets
            .iter()
            .map(|b| format!("• {b}"))
            .collect::<Vec<_>>()
            .join("\n");
        let reply = format!(
            "Thanks! I've added your role as {} at {}:\n{}\n\n{}",
            entry.position,
            entry.company,
            listed,
            Topic::Education.question()
        );

        draft.experience.push(entry);
        state.advance_topic();
        Reply::asking(reply, state.current_topic)
    }

    async fn handle_challenges(
        &self,
        state: &mut ConversationState,
        draft: &mut ResumeRecord,
        text: &str,
    ) -> Reply {
        let prompt = build_summary_prompt(draft, text, state.job_description.as_deref());

        let summary = match self.suggestions.improve_summary(&prompt).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => {
                warn!(topic = "challenges", "summary generation returned nothing, using fallback");
                FALLBACK_SUMMARY.to_string()
            }
            Err(e) => {
                warn!(topic = "challenges", error = %e, "summary generation failed, using fallback");
                FALLBACK_SUMMARY.to_string()
            }
        };
        draft.summary = summary.clone();
        state.finish();

        Reply {
            text: format!(
                "Thanks for sharing! Based on everything you've told me, here's your \
                 professional summary:\n\n{summary}\n\nTake a look at your resume in the \
                 template preview. {}",
                Topic::Complete.question()
            ),
            suggested: Topic::Complete.suggested_replies(),
            view_mode: ViewModeHint::TemplatePreview,
        }
    }

    async fn handle_achievement(&self, draft: &mut ResumeRecord, text: &str) -> Reply {
        let line = match self
            .suggestions
            .improve_content(ACHIEVEMENT_FIELD, text)
            .await
        {
            Ok(improved) if !improved.improved_content.trim().is_empty() => {
                improved.improved_content.trim().to_string()
            }
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!(topic = "achievements", error = %e, "achievement rewrite failed, using raw text");
                text.to_string()
            }
        };

        if draft.experience.is_empty() {
            draft.experience.push(ExperienceEntry {
                company: COMPANY_PLACEHOLDER.to_string(),
                position: POSITION_PLACEHOLDER.to_string(),
                ..Default::default()
            });
        }
        let mut position = POSITION_PLACEHOLDER.to_string();
        if let Some(latest) = draft.experience.last_mut() {
            latest.push_bullet(&line);
            position = latest.position.clone();
        }

        Reply::asking(
            format!("Added to your {position} role: \"{line}\". Anything else you'd like to add?"),
            Topic::Achievements,
        )
    }

    fn recover_unknown_topic(
        &self,
        state: &mut ConversationState,
    ) -> Result<Reply, ConversationError> {
        let name = state.current_topic.as_str().to_string();
        match self.recovery {
            RecoveryMode::Strict => {
                error!(topic = %name, "conversation reached an unknown topic");
                Err(ConversationError::UnknownTopic(name))
            }
            RecoveryMode::Lenient => {
                error!(topic = %name, "conversation reached an unknown topic, recovering to skills");
                state.resume_at(Topic::Skills);
                Ok(Reply::asking(
                    format!("{} {}", Topic::Unknown.question(), Topic::Skills.question()),
                    Topic::Skills,
                ))
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Synchronous topic handlers
// ────────────────────────────────────────────────────────────────────────────

fn handle_introduction(
    state: &mut ConversationState,
    draft: &mut ResumeRecord,
    text: &str,
) -> Reply {
    if let Some(name) = extract_name(text) {
        draft.personal_info.full_name = Some(name);
    }
    let greeting = match draft.personal_info.full_name.as_deref() {
        Some(name) => format!("Nice to meet you, {name}!"),
        None => "Nice to meet you!".to_string(),
    };

    if !has_job_interest_cue(text) {
        return Reply::asking(
            format!("{greeting} What kind of role are you looking for?"),
            Topic::Introduction,
        );
    }

    state.advance_topic();
    Reply::asking(
        format!("{greeting} {}", Topic::PersonalInfo.question()),
        state.current_topic,
    )
}

fn handle_personal_info(
    state: &mut ConversationState,
    draft: &mut ResumeRecord,
    text: &str,
) -> Reply {
    let email = extract_email(text);
    let phone = extract_phone(text);

    let ack = if email.is_none() && phone.is_none() {
        "No problem, you can add contact details later in the editor."
    } else {
        "Got it, thanks!"
    };
    if email.is_some() {
        draft.personal_info.email = email;
    }
    if phone.is_some() {
        draft.personal_info.phone = phone;
    }

    state.advance_topic();
    Reply::asking(
        format!("{ack} {}", Topic::JobTarget.question()),
        state.current_topic,
    )
}

fn handle_job_target(state: &mut ConversationState, text: &str) -> Reply {
    state.job_description = Some(text.to_string());
    state.advance_topic();
    Reply::asking(
        format!(
            "Great, I'll keep that in mind while we build your resume. {}",
            Topic::Experience.question()
        ),
        state.current_topic,
    )
}

fn handle_education(
    state: &mut ConversationState,
    draft: &mut ResumeRecord,
    text: &str,
) -> Reply {
    let mut entry = EducationEntry {
        institution: extract_institution(text)
            .unwrap_or_else(|| INSTITUTION_PLACEHOLDER.to_string()),
        degree: extract_degree(text).unwrap_or_else(|| DEGREE_PLACEHOLDER.to_string()),
        field_of_study: extract_field_of_study(text).unwrap_or_default(),
        ..Default::default()
    };
    if let Some(range) = extract_date_range(text) {
        entry.start_date = range.start;
        entry.end_date = range.end;
        entry.is_present = range.is_present;
    }

    let reply = format!(
        "Noted: {} at {}. {}",
        entry.degree,
        entry.institution,
        Topic::Skills.question()
    );
    draft.education.push(entry);
    state.advance_topic();
    Reply::asking(reply, state.current_topic)
}

fn handle_skills(state: &mut ConversationState, draft: &mut ResumeRecord, text: &str) -> Reply {
    draft.set_skills(split_skills(text));

    let ack = match draft.skills.len() {
        0 => "I couldn't pick out any skills, you can add them later in the editor.".to_string(),
        1 => "Great, I've added 1 skill.".to_string(),
        n => format!("Great, I've added {n} skills."),
    };

    state.advance_topic();
    Reply::asking(
        format!("{ack} {}", Topic::Challenges.question()),
        state.current_topic,
    )
}

fn handle_complete(state: &mut ConversationState, text: &str) -> Reply {
    match classify_completion_intent(text) {
        CompletionIntent::OpenEditor => Reply::asking(
            "Opening the editor. You can fine-tune every section there, and your progress is saved."
                .to_string(),
            Topic::Complete,
        ),
        CompletionIntent::AddMore => {
            state.enter_achievements();
            Reply::asking(
                Topic::Achievements.question().to_string(),
                Topic::Achievements,
            )
        }
        CompletionIntent::DiscussTemplates => Reply {
            text: "You can switch between the Modern, Classic, Creative, Professional and \
                   Minimal templates in the preview. Your content is laid out automatically \
                   for each one."
                .to_string(),
            suggested: Topic::Complete.suggested_replies(),
            view_mode: ViewModeHint::TemplatePreview,
        },
        CompletionIntent::Unrecognised => Reply::asking(
            "I can open the editor, help you add more details, or talk about templates. \
             What would you like to do?"
                .to_string(),
            Topic::Complete,
        ),
    }
}

fn classify_completion_intent(text: &str) -> CompletionIntent {
    let lower = text.to_lowercase();
    let mentions_edit = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word.starts_with("edit"));
    if mentions_edit {
        CompletionIntent::OpenEditor
    } else if lower.contains("add more") || lower.contains("more detail") {
        CompletionIntent::AddMore
    } else if lower.contains("template") {
        CompletionIntent::DiscussTemplates
    } else {
        CompletionIntent::Unrecognised
    }
}

fn build_summary_prompt(draft: &ResumeRecord, challenge: &str, job_target: Option<&str>) -> String {
    let experience = draft
        .experience
        .iter()
        .map(|e| format!("{} at {}:\n{}", e.position, e.company, e.description))
        .collect::<Vec<_>>()
        .join("\n\n");

    SUMMARY_PROMPT_TEMPLATE
        .replace("{experience}", or_none(&experience))
        .replace("{skills}", or_none(&draft.skills.join(", ")))
        .replace("{challenge}", challenge)
        .replace("{job_target}", job_target.unwrap_or("(not specified)"))
}

fn or_none(s: &str) -> &str {
    if s.trim().is_empty() {
        "(none provided)"
    } else {
        s
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
