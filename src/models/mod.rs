//! Process domain models.
//!
//! Core data types for process definitions, role calendars, and schedule
//! reports. The scheduling domain maps onto engineering-process vocabulary:
//!
//! | proc-engine | Engineering Process |
//! |-------------|---------------------|
//! | Activity | Process step (design, review, test) |
//! | WorkProduct | Artifact (spec, drawing, report) |
//! | Role | Executing function (engineer, reviewer) |
//! | RoleCalendar | Committed time per role |
//! | ScheduleReport | Timeline + cost rollup |

mod activity;
mod calendar;
mod report;
mod role;

pub use activity::{Activity, ExecutionMode, Heading, ProcessDefinition, WorkProduct};
pub use calendar::{Commitment, RoleCalendar};
pub use report::{ConflictSlip, ScheduleEntry, ScheduleReport};
pub use role::{Role, RoleDirectory};
