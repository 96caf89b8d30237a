//! Process timeline and cost rollup engine.
//!
//! Models an engineering process as a graph of activities that consume and
//! produce work products, each executed by a role with an hourly cost rate.
//! Given a process definition and a calendar of prior role commitments, the
//! engine computes a conflict-free schedule (start/end per activity) and the
//! total cost of executing the process.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Activity`, `WorkProduct`, `Role`,
//!   `RoleCalendar`, `ScheduleReport`
//! - **`graph`**: Validated activity graph with deterministic topological order
//! - **`cost`**: Execution-mode-aware cost model
//! - **`scheduler`**: Greedy dependency-order scheduler with role-conflict
//!   resolution
//! - **`validation`**: Pre-flight integrity checks (duplicate IDs, dangling
//!   references, cycles)
//! - **`store`**: Save/list record store for process and query definitions
//!
//! # Determinism
//!
//! Scheduling is a single-threaded, synchronous computation over in-memory
//! state. The traversal order is a fixed linearization of the dependency DAG,
//! and role contention is resolved by a greedy rule (push the start to the
//! role's latest committed end), so the same inputs always produce the same
//! schedule.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod cost;
pub mod error;
pub mod graph;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::EngineError;
