pub mod chat;
pub mod resume;

pub use chat::{ChatMessage, Sender};
pub use resume::{
    Certification, EducationEntry, ExperienceEntry, Membership, PersonalInfo, ResumeRecord,
};
