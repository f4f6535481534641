//! Validation engine for the bigbio view of a dataset

mod conformance;
pub mod error;
pub mod ids;
pub mod offsets;
pub mod references;
mod statistics;
mod validator;


pub use conformance::check_task_schema;
pub use error::{ErrorKind, ValidationError};
pub use ids::{IdRegistry, collect_ids, visit_ids};
pub use offsets::{DocumentText, check_offsets};
pub use statistics::{SplitStatistics, split_statistics};
// Re-export the orchestrator
pub use validator::{Check, ValidationReport, Validator};
