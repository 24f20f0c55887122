//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RefinementParams`]: refinement loop control (threshold, iteration cap, timeouts)
//! - [`AnalysisParams`]: supervisor fan-out and analyst tool loop control

pub mod analysis_params;
pub mod refinement_params;

pub use analysis_params::AnalysisParams;
pub use refinement_params::RefinementParams;
