//! Engine error taxonomy.
//!
//! Structural errors are fatal: they abort scheduling before any interval is
//! committed, and no partial report is produced. Role-conflict slips are not
//! errors — they are informational events recorded on the affected report
//! entry (see [`crate::models::ConflictSlip`]).

use thiserror::Error;

/// Fatal errors raised during graph construction or scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The dependency relation contains a cycle, so no topological order exists.
    #[error("cyclic dependency involving activity '{activity_id}'")]
    CyclicDependency {
        /// An activity on the cycle (the first one detected).
        activity_id: String,
    },

    /// A dependency or work-product link references an id not present in the
    /// process definition.
    #[error("'{referrer}' references unknown id '{missing}'")]
    DanglingReference {
        /// The activity or work product holding the bad reference.
        referrer: String,
        /// The id that could not be resolved.
        missing: String,
    },

    /// An activity's execution-mode parameters are invalid
    /// (e.g., a for-each fan-out of zero).
    #[error("invalid execution mode on activity '{activity_id}': {reason}")]
    InvalidExecutionMode { activity_id: String, reason: String },

    /// The process definition contains no activities.
    #[error("process '{process_id}' has no activities")]
    EmptyProcess { process_id: String },
}
