// Guided resume chat: topic table, pattern extraction, the state machine and
// the in-memory session layer that drives it.

pub mod engine;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod session;
pub mod state;
pub mod topics;

pub use engine::{ConversationEngine, ConversationError, RecoveryMode, TurnOutcome, ViewModeHint};
pub use session::{ChatSession, SessionStore};
pub use state::ConversationState;
pub use topics::Topic;
