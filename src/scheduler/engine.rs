//! The scheduling engine.
//!
//! # Algorithm
//!
//! 1. Build/validate the activity graph (fatal on cycles and dangling
//!    references — no partial schedule is ever returned).
//! 2. Walk the topological linearization. Per activity:
//!    a. earliest start = max(global start, predecessor end times);
//!    b. resolve the actual start against the role calendar — a later start
//!       is a conflict slip, recorded on the report entry;
//!    c. effective duration = nominal hours, scaled by fan-out for for-each
//!       (one role repeating the work; parallel leaves wall-clock unchanged);
//!    d. commit the interval back to the calendar;
//!    e. cost the activity via the cost model.
//! 3. Aggregate total duration (max end − global start) and total cost.
//!
//! The walk is single-threaded and synchronous: each step reads calendar
//! state written by prior steps, so per-role ordering is what makes the
//! result well defined. No I/O, no cancellation — the run completes or
//! fails fast on structural errors.

use crate::cost::CostModel;
use crate::error::EngineError;
use crate::graph::ActivityGraph;
use crate::models::{
    ConflictSlip, ExecutionMode, ProcessDefinition, RoleCalendar, RoleDirectory, ScheduleEntry,
    ScheduleReport,
};

/// Input container for one scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    /// Process to schedule.
    pub process: ProcessDefinition,
    /// Role reference data (rates).
    pub roles: RoleDirectory,
    /// Prior role commitments. The run works on a copy; the seed is not
    /// mutated.
    pub calendar: RoleCalendar,
    /// Global process start instant (hours).
    pub start_hours: f64,
}

impl ScheduleRequest {
    /// Creates a request starting at t=0 with no roles and an empty calendar.
    pub fn new(process: ProcessDefinition) -> Self {
        Self {
            process,
            ..Self::default()
        }
    }

    /// Sets the role directory.
    pub fn with_roles(mut self, roles: RoleDirectory) -> Self {
        self.roles = roles;
        self
    }

    /// Seeds prior commitments.
    pub fn with_calendar(mut self, calendar: RoleCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the global start instant.
    pub fn with_start(mut self, start_hours: f64) -> Self {
        self.start_hours = start_hours;
        self
    }
}

/// Greedy dependency-order scheduler.
///
/// # Example
///
/// ```
/// use proc_engine::models::{Activity, ProcessDefinition, Role, RoleDirectory};
/// use proc_engine::scheduler::{ScheduleRequest, Scheduler};
///
/// let process = ProcessDefinition::new("P1")
///     .with_activity(Activity::new("A", "R1", 4.0))
///     .with_activity(Activity::new("B", "R1", 2.0).with_dependency("A"));
/// let roles = RoleDirectory::from_roles(vec![Role::new("R1").with_rate(100.0)]);
///
/// let report = Scheduler::new()
///     .schedule_request(&ScheduleRequest::new(process).with_roles(roles))
///     .unwrap();
/// assert_eq!(report.entry_count(), 2);
/// assert!((report.total_cost - 600.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    cost_model: CostModel,
}

impl Scheduler {
    /// Creates a scheduler with the default cost model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cost model.
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Schedules a process definition, building the graph first.
    ///
    /// The calendar is mutated: every scheduled activity commits its
    /// interval, so the caller can chain runs over the same calendar.
    pub fn schedule(
        &self,
        definition: &ProcessDefinition,
        roles: &RoleDirectory,
        calendar: &mut RoleCalendar,
        start_hours: f64,
    ) -> Result<ScheduleReport, EngineError> {
        let graph = ActivityGraph::build(definition)?;
        Ok(self.schedule_graph(&graph, roles, calendar, start_hours))
    }

    /// Schedules from a request, working on a copy of the seed calendar.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Result<ScheduleReport, EngineError> {
        let mut calendar = request.calendar.clone();
        self.schedule(
            &request.process,
            &request.roles,
            &mut calendar,
            request.start_hours,
        )
    }

    /// Schedules an already-validated graph.
    ///
    /// Infallible: structural failure modes are ruled out by graph
    /// construction, and role-conflict slips are recoverable by definition.
    pub fn schedule_graph(
        &self,
        graph: &ActivityGraph,
        roles: &RoleDirectory,
        calendar: &mut RoleCalendar,
        start_hours: f64,
    ) -> ScheduleReport {
        let mut report = ScheduleReport::new(start_hours);
        let mut end_by_index = vec![start_hours; graph.len()];

        for &idx in graph.topological_order() {
            let activity = graph.activity(idx);

            let earliest_start = graph
                .predecessors(idx)
                .iter()
                .fold(start_hours, |acc, &pred| acc.max(end_by_index[pred]));

            let start = calendar.resolve_start(&activity.executed_by, earliest_start);
            let slip = (start > earliest_start).then_some(ConflictSlip {
                requested_start_hours: earliest_start,
                resolved_start_hours: start,
            });
            if let Some(slip) = &slip {
                tracing::debug!(
                    activity = %activity.id,
                    role = %activity.executed_by,
                    requested = slip.requested_start_hours,
                    resolved = slip.resolved_start_hours,
                    "role conflict pushed activity start"
                );
            }

            let fan_out = activity.execution_mode.fan_out_or_one();
            let effective_hours = match activity.execution_mode {
                ExecutionMode::Sequential | ExecutionMode::Parallel => {
                    activity.nominal_duration_hours
                }
                ExecutionMode::ForEach { fan_out } => {
                    activity.nominal_duration_hours * f64::from(fan_out)
                }
            };
            let end = start + effective_hours;

            calendar.commit(activity.executed_by.clone(), start, end, activity.id.clone());
            end_by_index[idx] = end;

            let rate = roles.rate_or_default(
                &activity.executed_by,
                self.cost_model.default_rate_per_hour,
            );
            let cost = self.cost_model.cost(
                activity.execution_mode,
                effective_hours,
                activity.nominal_duration_hours,
                fan_out,
                rate,
            );

            report.total_cost += cost;
            *report
                .hours_by_role
                .entry(activity.executed_by.clone())
                .or_insert(0.0) += effective_hours;
            report.entries.push(ScheduleEntry {
                activity_id: activity.id.clone(),
                name: activity.name.clone(),
                role_id: activity.executed_by.clone(),
                start_hours: start,
                end_hours: end,
                effective_hours,
                cost,
                slip,
            });
        }

        report.total_duration_hours = report.makespan_hours() - start_hours;

        tracing::info!(
            activities = report.entry_count(),
            conflicts = report.conflicted_entries().len(),
            total_hours = report.total_duration_hours,
            total_cost = report.total_cost,
            "schedule computed"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Role, WorkProduct};

    fn roles_with_rate(rate: f64) -> RoleDirectory {
        RoleDirectory::from_roles(vec![
            Role::new("R").with_rate(rate),
            Role::new("S").with_rate(rate),
        ])
    }

    fn run(process: ProcessDefinition, roles: RoleDirectory) -> ScheduleReport {
        Scheduler::new()
            .schedule_request(&ScheduleRequest::new(process).with_roles(roles))
            .unwrap()
    }

    #[test]
    fn test_no_predecessors_starts_at_global_start() {
        let process = ProcessDefinition::new("P").with_activity(Activity::new("A", "R", 2.0));
        let report = Scheduler::new()
            .schedule_request(
                &ScheduleRequest::new(process)
                    .with_roles(roles_with_rate(50.0))
                    .with_start(7.0),
            )
            .unwrap();

        let a = report.entry_for_activity("A").unwrap();
        assert!((a.start_hours - 7.0).abs() < 1e-10);
        assert!((a.end_hours - 9.0).abs() < 1e-10);
        assert!(!a.conflicted());
        assert!((report.total_duration_hours - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_for_each_chain() {
        // A (R, 4h, sequential) → B (R, 2h, forEach fan-out 3), rate 100.
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("A", "R", 4.0))
            .with_activity(
                Activity::new("B", "R", 2.0)
                    .with_mode(ExecutionMode::ForEach { fan_out: 3 })
                    .with_dependency("A"),
            );
        let report = run(process, roles_with_rate(100.0));

        let a = report.entry_for_activity("A").unwrap();
        assert!((a.start_hours - 0.0).abs() < 1e-10);
        assert!((a.end_hours - 4.0).abs() < 1e-10);
        assert!((a.cost - 400.0).abs() < 1e-10);

        let b = report.entry_for_activity("B").unwrap();
        assert!((b.start_hours - 4.0).abs() < 1e-10);
        assert!((b.effective_hours - 6.0).abs() < 1e-10);
        assert!((b.end_hours - 10.0).abs() < 1e-10);
        assert!((b.cost - 600.0).abs() < 1e-10);
        // Role free exactly at 4: dependency set the start, not a conflict.
        assert!(!b.conflicted());

        assert!((report.total_cost - 1000.0).abs() < 1e-10);
        assert!((report.total_duration_hours - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_shared_role_serializes_independent_activities() {
        // C and D share role S with no dependency edge; C declared first.
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("C", "S", 3.0))
            .with_activity(Activity::new("D", "S", 1.0));
        let report = run(process, roles_with_rate(100.0));

        let c = report.entry_for_activity("C").unwrap();
        let d = report.entry_for_activity("D").unwrap();
        assert!((c.start_hours - 0.0).abs() < 1e-10);
        assert!((c.end_hours - 3.0).abs() < 1e-10);
        assert!(d.start_hours >= c.end_hours);

        // The push is recorded as a conflict slip on D.
        assert!(!c.conflicted());
        let slip = d.slip.unwrap();
        assert!((slip.requested_start_hours - 0.0).abs() < 1e-10);
        assert!((slip.resolved_start_hours - 3.0).abs() < 1e-10);
        assert!((slip.slip_hours() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_different_roles_run_concurrently() {
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("A", "R", 3.0))
            .with_activity(Activity::new("B", "S", 2.0));
        let report = run(process, roles_with_rate(100.0));

        assert!((report.entry_for_activity("A").unwrap().start_hours - 0.0).abs() < 1e-10);
        assert!((report.entry_for_activity("B").unwrap().start_hours - 0.0).abs() < 1e-10);
        assert!((report.total_duration_hours - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_preexisting_commitment_pushes_start() {
        let process = ProcessDefinition::new("P").with_activity(Activity::new("A", "R", 2.0));
        let calendar = RoleCalendar::new().with_commitment("R", 0.0, 5.0, "external");
        let report = Scheduler::new()
            .schedule_request(
                &ScheduleRequest::new(process)
                    .with_roles(roles_with_rate(100.0))
                    .with_calendar(calendar),
            )
            .unwrap();

        let a = report.entry_for_activity("A").unwrap();
        assert!((a.start_hours - 5.0).abs() < 1e-10);
        assert!(a.conflicted());
        // Total duration measures from the global start, slips included.
        assert!((report.total_duration_hours - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_parallel_mode_wall_clock_and_cost() {
        let process = ProcessDefinition::new("P").with_activity(
            Activity::new("A", "R", 8.0).with_mode(ExecutionMode::Parallel),
        );
        let report = run(process, roles_with_rate(100.0));

        let a = report.entry_for_activity("A").unwrap();
        assert!((a.effective_hours - 8.0).abs() < 1e-10);
        assert!((a.cost - 800.0).abs() < 1e-10);
    }

    #[test]
    fn test_work_product_dependency_drives_order() {
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("review", "S", 1.0))
            .with_activity(Activity::new("draft", "R", 2.0))
            .with_work_product(WorkProduct::new("doc", "draft").with_consumer("review"));
        let report = run(process, roles_with_rate(100.0));

        let draft = report.entry_for_activity("draft").unwrap();
        let review = report.entry_for_activity("review").unwrap();
        assert!(review.start_hours >= draft.end_hours);
    }

    #[test]
    fn test_unknown_role_costed_at_default_rate() {
        let process =
            ProcessDefinition::new("P").with_activity(Activity::new("A", "nobody", 2.0));
        let report = run(process, RoleDirectory::new());
        assert!((report.total_cost - 2.0 * 105.0).abs() < 1e-10);
    }

    #[test]
    fn test_cycle_aborts_without_report() {
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("X", "R", 1.0).with_dependency("Y"))
            .with_activity(Activity::new("Y", "R", 1.0).with_dependency("X"));
        let mut calendar = RoleCalendar::new();
        let err = Scheduler::new()
            .schedule(&process, &roles_with_rate(100.0), &mut calendar, 0.0)
            .unwrap_err();

        assert!(matches!(err, EngineError::CyclicDependency { .. }));
        // Fail-fast: nothing was committed.
        assert_eq!(calendar.commitment_count(), 0);
    }

    #[test]
    fn test_dangling_reference_aborts() {
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("A", "R", 1.0).with_dependency("ghost"));
        let err = run_err(process);
        assert!(matches!(err, EngineError::DanglingReference { .. }));
    }

    fn run_err(process: ProcessDefinition) -> EngineError {
        Scheduler::new()
            .schedule_request(&ScheduleRequest::new(process))
            .unwrap_err()
    }

    #[test]
    fn test_calendar_accumulates_across_runs() {
        let roles = roles_with_rate(100.0);
        let mut calendar = RoleCalendar::new();
        let scheduler = Scheduler::new();

        let first = ProcessDefinition::new("P1").with_activity(Activity::new("A", "R", 4.0));
        scheduler
            .schedule(&first, &roles, &mut calendar, 0.0)
            .unwrap();

        // Second run over the same calendar: the role is busy until 4.
        let second = ProcessDefinition::new("P2").with_activity(Activity::new("B", "R", 1.0));
        let report = scheduler
            .schedule(&second, &roles, &mut calendar, 0.0)
            .unwrap();
        let b = report.entry_for_activity("B").unwrap();
        assert!((b.start_hours - 4.0).abs() < 1e-10);
        assert!(b.conflicted());
    }

    #[test]
    fn test_zero_duration_activity() {
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("A", "R", 0.0))
            .with_activity(Activity::new("B", "R", 2.0));
        let report = run(process, roles_with_rate(100.0));

        let a = report.entry_for_activity("A").unwrap();
        assert!((a.cost - 0.0).abs() < 1e-10);
        assert!((a.end_hours - a.start_hours).abs() < 1e-10);
        // A zero-length interval does not block the role.
        let b = report.entry_for_activity("B").unwrap();
        assert!((b.start_hours - 0.0).abs() < 1e-10);
        assert!(!b.conflicted());
    }

    #[test]
    fn test_hours_by_role_rollup() {
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("A", "R", 4.0))
            .with_activity(
                Activity::new("B", "R", 2.0).with_mode(ExecutionMode::ForEach { fan_out: 3 }),
            )
            .with_activity(Activity::new("C", "S", 1.5));
        let report = run(process, roles_with_rate(100.0));

        assert!((report.hours_by_role["R"] - 10.0).abs() < 1e-10);
        assert!((report.hours_by_role["S"] - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_deterministic_repeat_runs() {
        let build = || {
            ProcessDefinition::new("P")
                .with_activity(Activity::new("A", "R", 4.0))
                .with_activity(Activity::new("B", "S", 2.0).with_dependency("A"))
                .with_activity(Activity::new("C", "R", 1.0))
        };
        let first = run(build(), roles_with_rate(100.0));
        let second = run(build(), roles_with_rate(100.0));

        assert_eq!(first.entry_count(), second.entry_count());
        for (x, y) in first.entries.iter().zip(second.entries.iter()) {
            assert_eq!(x.activity_id, y.activity_id);
            assert!((x.start_hours - y.start_hours).abs() < 1e-10);
            assert!((x.end_hours - y.end_hours).abs() < 1e-10);
            assert!((x.cost - y.cost).abs() < 1e-10);
        }
    }

    #[test]
    fn test_one_entry_per_activity() {
        let process = ProcessDefinition::new("P")
            .with_activity(Activity::new("A", "R", 1.0))
            .with_activity(Activity::new("B", "R", 1.0).with_dependency("A"))
            .with_activity(Activity::new("C", "S", 1.0).with_dependency("A"))
            .with_activity(Activity::new("D", "S", 1.0).with_dependency("B"));
        let report = run(process, roles_with_rate(100.0));
        assert_eq!(report.entry_count(), 4);
    }
}
