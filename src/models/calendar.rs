//! Role calendar: committed time intervals per role.
//!
//! The calendar records, per role id, the intervals during which the role is
//! occupied — either pre-existing commitments supplied by the caller (prior
//! scheduling runs, external bookings) or intervals committed by the
//! scheduler during the current run.
//!
//! # Time Model
//! All times are in hours relative to a scheduling epoch (t=0).
//! The consumer defines what the epoch means.
//!
//! # Semantics
//! Commitments are additive and never merged or compacted. Pre-existing
//! commitments are trusted as-is and may overlap at rest; the scheduler is
//! the sole writer during a run and serializes its own intervals per role.
//! Only the latest end instant per role matters for conflict resolution,
//! computed as an explicit max-by-end reduction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An interval during which a role is occupied.
///
/// Created when the scheduler assigns an activity to a role; never mutated
/// afterwards. `end_hours` is strictly greater than `start_hours`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commitment {
    /// Occupied role.
    pub role_id: String,
    /// Interval start (hours, inclusive).
    pub start_hours: f64,
    /// Interval end (hours, exclusive).
    pub end_hours: f64,
    /// Activity the role is committed to.
    pub activity_id: String,
}

impl Commitment {
    /// Creates a new commitment.
    pub fn new(
        role_id: impl Into<String>,
        start_hours: f64,
        end_hours: f64,
        activity_id: impl Into<String>,
    ) -> Self {
        Self {
            role_id: role_id.into(),
            start_hours,
            end_hours,
            activity_id: activity_id.into(),
        }
    }

    /// Interval length (hours).
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.end_hours - self.start_hours
    }
}

/// Per-role record of committed time intervals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleCalendar {
    commitments: HashMap<String, Vec<Commitment>>,
}

impl RoleCalendar {
    /// Creates an empty calendar (no role has prior commitments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the calendar with a pre-existing commitment.
    pub fn with_commitment(
        mut self,
        role_id: impl Into<String>,
        start_hours: f64,
        end_hours: f64,
        activity_id: impl Into<String>,
    ) -> Self {
        self.commit(role_id, start_hours, end_hours, activity_id);
        self
    }

    /// Appends a committed interval for a role.
    ///
    /// Purely additive: no merging, no compaction. Zero-length intervals are
    /// skipped — they occupy no time and would violate the end > start
    /// invariant on stored commitments.
    pub fn commit(
        &mut self,
        role_id: impl Into<String>,
        start_hours: f64,
        end_hours: f64,
        activity_id: impl Into<String>,
    ) {
        if end_hours <= start_hours {
            return;
        }
        let role_id = role_id.into();
        let commitment = Commitment::new(role_id.clone(), start_hours, end_hours, activity_id);
        self.commitments.entry(role_id).or_default().push(commitment);
    }

    /// Latest end instant among all commitments for a role.
    ///
    /// Returns `None` if the role has no commitments. When multiple
    /// commitments share the maximum end, any of them is "the" last — the
    /// result is identical since only the maximum matters.
    pub fn latest_committed_end(&self, role_id: &str) -> Option<f64> {
        self.commitments
            .get(role_id)?
            .iter()
            .map(|c| c.end_hours)
            .fold(None, |acc: Option<f64>, end| {
                Some(acc.map_or(end, |a| a.max(end)))
            })
    }

    /// Resolves the effective start for a role at or after `proposed_start`.
    ///
    /// If the role's last commitment ends after the proposed start, the
    /// start is pushed to that later instant; otherwise the proposal is
    /// honored unchanged. Pure computation over the current snapshot —
    /// never blocks, never fails.
    pub fn resolve_start(&self, role_id: &str, proposed_start: f64) -> f64 {
        match self.latest_committed_end(role_id) {
            Some(end) if end > proposed_start => end,
            _ => proposed_start,
        }
    }

    /// All commitments for a role, in insertion order.
    pub fn commitments_for_role(&self, role_id: &str) -> &[Commitment] {
        self.commitments
            .get(role_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of commitments across all roles.
    pub fn commitment_count(&self) -> usize {
        self.commitments.values().map(Vec::len).sum()
    }
}
