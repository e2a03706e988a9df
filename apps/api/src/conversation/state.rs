use serde::{Deserialize, Serialize};

use crate::conversation::topics::{Topic, MAIN_TOPICS, TOPIC_ORDER};
use crate::models::ResumeRecord;

/// Where a chat session stands in the topic sequence, plus everything
/// extracted so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub current_topic: Topic,
    pub pending_topics: Vec<Topic>,
    /// Append-only; drives progress display.
    pub completed_topics: Vec<Topic>,
    #[serde(default)]
    pub extracted_data: ResumeRecord,
    /// The verbatim job posting / role description from the `jobTarget` topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            current_topic: Topic::Introduction,
            pending_topics: TOPIC_ORDER[1..].to_vec(),
            completed_topics: Vec::new(),
            extracted_data: ResumeRecord::default(),
            job_description: None,
        }
    }

    /// Pops the next pending topic into `current_topic` and records the old
    /// one as completed. No-op once the session is complete.
    pub fn advance_topic(&mut self) {
        if self.is_complete() || self.pending_topics.is_empty() {
            return;
        }
        let next = self.pending_topics.remove(0);
        let previous = std::mem::replace(&mut self.current_topic, next);
        self.mark_completed(previous);
    }

    /// Jumps straight to `complete`, dropping whatever is still pending.
    pub fn finish(&mut self) {
        if self.is_complete() {
            return;
        }
        let previous = std::mem::replace(&mut self.current_topic, Topic::Complete);
        self.mark_completed(previous);
        self.pending_topics.clear();
    }

    /// Enters the achievements side-branch. Completed topics are unchanged.
    pub fn enter_achievements(&mut self) {
        self.current_topic = Topic::Achievements;
    }

    /// Puts the session back on a known topic; pending becomes every later
    /// topic in the fixed order that has not been completed yet.
    pub fn resume_at(&mut self, topic: Topic) {
        self.current_topic = topic;
        let start = topic.index().map_or(TOPIC_ORDER.len(), |i| i + 1);
        self.pending_topics = TOPIC_ORDER[start..]
            .iter()
            .copied()
            .filter(|t| !self.completed_topics.contains(t))
            .collect();
    }

    /// Rebuilds the pending list of a restored state from its current topic,
    /// so a stale or hand-edited list cannot stall the sequence. `Unknown` and
    /// the achievements branch are left as they are.
    pub fn normalize(&mut self) {
        match self.current_topic {
            Topic::Complete => self.pending_topics.clear(),
            Topic::Achievements | Topic::Unknown => {}
            topic => self.resume_at(topic),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_topic == Topic::Complete
    }

    /// Share of the main question sequence already answered, 0–100.
    pub fn progress_percent(&self) -> u8 {
        let done = MAIN_TOPICS
            .iter()
            .filter(|t| self.completed_topics.contains(t))
            .count();
        ((done * 100) / MAIN_TOPICS.len()) as u8
    }

    fn mark_completed(&mut self, topic: Topic) {
        if topic != Topic::Unknown && !self.completed_topics.contains(&topic) {
            self.completed_topics.push(topic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_at_introduction() {
        let state = ConversationState::new();
        assert_eq!(state.current_topic, Topic::Introduction);
        assert_eq!(state.pending_topics.first(), Some(&Topic::PersonalInfo));
        assert_eq!(state.pending_topics.len(), TOPIC_ORDER.len() - 1);
        assert!(state.completed_topics.is_empty());
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn test_advance_topic_follows_fixed_order() {
        let mut state = ConversationState::new();
        state.advance_topic();
        assert_eq!(state.current_topic, Topic::PersonalInfo);
        assert_eq!(state.completed_topics, vec![Topic::Introduction]);
        state.advance_topic();
        assert_eq!(state.current_topic, Topic::JobTarget);
        assert_eq!(
            state.completed_topics,
            vec![Topic::Introduction, Topic::PersonalInfo]
        );
    }

    #[test]
    fn test_finish_is_terminal() {
        let mut state = ConversationState::new();
        state.finish();
        assert!(state.is_complete());
        assert!(state.pending_topics.is_empty());
        state.advance_topic();
        assert_eq!(state.current_topic, Topic::Complete);
        assert_eq!(state.completed_topics, vec![Topic::Introduction]);
    }

    #[test]
    fn test_progress_counts_main_topics() {
        let mut state = ConversationState::new();
        for _ in 0..6 {
            state.advance_topic();
        }
        assert_eq!(state.current_topic, Topic::Challenges);
        state.finish();
        assert_eq!(state.progress_percent(), 100);
    }

    #[test]
    fn test_serializes_with_camel_case() {
        let value = serde_json::to_value(ConversationState::new()).unwrap();
        assert_eq!(value["currentTopic"], "introduction");
        assert_eq!(value["pendingTopics"][0], "personalInfo");
        assert!(value["completedTopics"].as_array().unwrap().is_empty());
        assert!(value.get("extractedData").is_some());
    }

    #[test]
    fn test_normalize_rebuilds_empty_pending() {
        let mut state: ConversationState = serde_json::from_str(
            r#"{"currentTopic":"skills","pendingTopics":[],"completedTopics":[]}"#,
        )
        .unwrap();
        state.normalize();
        assert_eq!(state.pending_topics.first(), Some(&Topic::Challenges));

        state.advance_topic();
        assert_eq!(state.current_topic, Topic::Challenges);
    }

    #[test]
    fn test_normalize_keeps_consistent_state() {
        let mut state = ConversationState::new();
        state.advance_topic();
        state.advance_topic();
        let before = state.clone();
        state.normalize();
        assert_eq!(state, before);

        let mut unknown = ConversationState::new();
        unknown.current_topic = Topic::Unknown;
        unknown.normalize();
        assert_eq!(unknown.pending_topics.len(), TOPIC_ORDER.len() - 1);
    }
}
