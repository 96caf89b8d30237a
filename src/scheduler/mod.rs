//! Greedy dependency-order scheduler.
//!
//! Produces one start/end/cost triple per activity, deterministically,
//! honoring dependency order and role exclusivity.
//!
//! # Algorithm
//!
//! Walk the graph's fixed topological linearization; for each activity take
//! the latest of the global start and all predecessor end times, let the
//! role calendar push it past the role's last commitment, commit the
//! resulting interval, and accumulate cost. Greedy, not optimal: the engine
//! resolves contention, it does not minimize makespan.

mod engine;

pub use engine::{ScheduleRequest, Scheduler};
