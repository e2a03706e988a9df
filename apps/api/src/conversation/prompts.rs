//! Instructions sent to the suggestion backend from the chat flow, and the
//! fixed text used when that backend is unavailable.

pub const EXPERIENCE_BULLETS_INSTRUCTION: &str = "\
Convert the following description of a job into concise, achievement-oriented \
resume bullet points.";

pub const SUMMARY_PROMPT_TEMPLATE: &str = "\
Write a professional resume summary for this candidate.\n\
\n\
EXPERIENCE:\n\
{experience}\n\
\n\
SKILLS: {skills}\n\
\n\
A CHALLENGE THEY OVERCAME:\n\
{challenge}\n\
\n\
TARGET ROLE / JOB DESCRIPTION:\n\
{job_target}";

pub const ACHIEVEMENT_FIELD: &str = "achievement";

pub const FALLBACK_SUMMARY: &str = "\
Dedicated professional with a track record of delivering results, solving \
problems under pressure and continuously growing new skills.";

pub const COMPANY_PLACEHOLDER: &str = "Company Name";
pub const POSITION_PLACEHOLDER: &str = "Position";
pub const INSTITUTION_PLACEHOLDER: &str = "Institution Name";
pub const DEGREE_PLACEHOLDER: &str = "Degree";
