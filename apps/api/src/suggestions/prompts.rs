//! Prompt constants for the suggestion backend.
//!
//! Templates use `{placeholder}` slots filled with `str::replace`.

/// System prompt for every call that must come back as JSON.
pub const JSON_ONLY_SYSTEM: &str = "\
You are a professional resume writer. \
You MUST respond with valid JSON only. \
Do NOT include any text outside the JSON object. \
Do NOT use markdown code fences.";

pub const BULLETS_PROMPT_TEMPLATE: &str = "\
{instruction}\n\
\n\
SOURCE TEXT:\n\
{source_text}\n\
\n\
RULES:\n\
1. Start every bullet with a strong action verb\n\
2. Keep each bullet to one or two printed lines\n\
3. Keep numbers from the source text; DO NOT invent metrics\n\
4. Return between 1 and 5 bullets\n\
\n\
Return JSON only: {\"bullets\": [\"...\", \"...\"]}";

pub const SUMMARY_SYSTEM: &str = "\
You are a professional resume writer. Write a concise professional summary \
of two to four sentences in the first person implied (no \"I\"). \
Respond with the summary text only, no preamble and no quotes.";

pub const IMPROVE_PROMPT_TEMPLATE: &str = "\
Improve the following resume {field_type}. Keep the facts, tighten the wording, \
prefer active voice and quantified outcomes where the text supports them.\n\
\n\
CONTENT:\n\
{content}\n\
\n\
Return JSON only: {\"improvedContent\": \"...\"}";
