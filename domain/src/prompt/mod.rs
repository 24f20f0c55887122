//! Prompt domain
//!
//! Templates for the planning, critique, routing, analysis and report prompts.

mod template;

pub use template::{PromptTemplate, SubtopicBrief};
