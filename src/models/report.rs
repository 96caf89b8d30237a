//! Timeline/cost report: the scheduler's output.
//!
//! One entry per activity with its resolved start, end, and cost, plus
//! graph-level aggregates (total duration, total cost, spent hours per
//! role). The report is serde-serializable for the presentation boundary;
//! no wire format is prescribed here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A role-conflict resolution event.
///
/// Recorded when the role calendar pushed an activity's start later than its
/// dependency-derived earliest start. Informational, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictSlip {
    /// Earliest start derived from the global start and predecessors.
    pub requested_start_hours: f64,
    /// Start actually granted by the role calendar.
    pub resolved_start_hours: f64,
}

impl ConflictSlip {
    /// How far the activity slipped (hours).
    #[inline]
    pub fn slip_hours(&self) -> f64 {
        self.resolved_start_hours - self.requested_start_hours
    }
}

/// Scheduled timeline and cost for one activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Scheduled activity id.
    pub activity_id: String,
    /// Activity name (denormalized for presentation).
    pub name: String,
    /// Executing role id.
    pub role_id: String,
    /// Resolved start (hours from the global start epoch).
    pub start_hours: f64,
    /// Resolved end (hours).
    pub end_hours: f64,
    /// Mode-adjusted wall-clock duration actually scheduled (hours).
    pub effective_hours: f64,
    /// Rolled-up cost of this activity.
    pub cost: f64,
    /// Conflict-resolution event, if the role calendar pushed the start.
    pub slip: Option<ConflictSlip>,
}

impl ScheduleEntry {
    /// Whether a role conflict altered this activity's start.
    #[inline]
    pub fn conflicted(&self) -> bool {
        self.slip.is_some()
    }
}

/// Complete schedule report for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Per-activity results, in scheduling order.
    pub entries: Vec<ScheduleEntry>,
    /// Global start instant the run was anchored to (hours).
    pub start_hours: f64,
    /// max(end) − global start; 0 for an empty report.
    pub total_duration_hours: f64,
    /// Sum of per-activity costs.
    pub total_cost: f64,
    /// Spent person-hours per role (for-each counted fan-out times).
    pub hours_by_role: HashMap<String, f64>,
}

impl ScheduleReport {
    /// Creates an empty report anchored at a global start.
    pub fn new(start_hours: f64) -> Self {
        Self {
            start_hours,
            ..Self::default()
        }
    }

    /// Finds the entry for a given activity.
    pub fn entry_for_activity(&self, activity_id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.activity_id == activity_id)
    }

    /// All entries executed by a given role.
    pub fn entries_for_role(&self, role_id: &str) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.role_id == role_id).collect()
    }

    /// Latest end time across all entries (hours). Global start if empty.
    pub fn makespan_hours(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.end_hours)
            .fold(self.start_hours, f64::max)
    }

    /// Entries whose start was pushed by a role conflict.
    pub fn conflicted_entries(&self) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.conflicted()).collect()
    }

    /// Number of scheduled activities.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
