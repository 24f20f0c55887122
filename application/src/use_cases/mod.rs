//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_topic;
pub mod critique_plan;
pub mod generate_plan;
pub mod refine_plan;
pub mod run_analysis;
pub(crate) mod shared;
