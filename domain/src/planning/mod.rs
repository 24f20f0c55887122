//! Business-plan planning model.
//!
//! - [`topic::Topic`] / [`plan::Plan`]: the outline and its invariants
//! - [`critique::Critique`]: the critic's scored verdict
//! - [`refinement::RefinementState`]: generate → critique → route
//! - [`progress::AnalysisProgress`]: advance → dispatch → route
//! - [`expert::ExpertDomain`]: expert roster for routing
//! - [`decode`]: structured decoding of model output

pub mod critique;
pub mod decode;
pub mod expert;
pub mod plan;
pub mod progress;
pub mod refinement;
pub mod topic;
