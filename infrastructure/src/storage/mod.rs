//! File outputs: the refined plan document and the analysis report.

mod plan_store;
mod report_writer;

pub use plan_store::{JsonPlanStore, PlanStoreError, StoredPlan};
pub use report_writer::{REPORT_FILE_NAME, ReportWriter};
