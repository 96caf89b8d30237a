//! Activity and process definition models.
//!
//! An activity is the schedulable unit of a process: it is executed by one
//! role, has a nominal duration, and an execution mode governing how that
//! duration scales on the timeline and in the cost rollup. Activities are
//! linked either by direct `depends_on` references or indirectly through
//! work products (an activity consuming an artifact depends on its producer).
//!
//! Definitions are created at process-design time and are read-only during
//! scheduling.

use serde::{Deserialize, Serialize};

/// Execution semantics of an activity.
///
/// A closed variant set so each mode's required parameters are enforced at
/// construction: a for-each activity cannot exist without a fan-out count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// One role performs the work once. Wall-clock = nominal duration.
    Sequential,
    /// Multiple role holders run concurrently at no wall-clock penalty.
    /// Wall-clock = nominal duration; person-time charged stays nominal.
    Parallel,
    /// The activity repeats `fan_out` times on the same role. Wall-clock and
    /// cost both scale by the fan-out, since a single role cannot literally
    /// parallelize itself without contention.
    ForEach {
        /// Number of repetitions (must be >= 1).
        fan_out: u32,
    },
}

impl ExecutionMode {
    /// Fan-out count for cost purposes: `fan_out` for for-each, 1 otherwise.
    #[inline]
    pub fn fan_out_or_one(&self) -> u32 {
        match self {
            ExecutionMode::ForEach { fan_out } => *fan_out,
            _ => 1,
        }
    }
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Sequential
    }
}

/// A unit of work, bound to one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Id of the role executing this activity.
    pub executed_by: String,
    /// Duration of one execution (hours), before mode adjustment.
    pub nominal_duration_hours: f64,
    /// Duration/cost scaling semantics.
    pub execution_mode: ExecutionMode,
    /// Ids this activity depends on — activities directly, or work products
    /// (resolved to their producing activity at graph construction).
    pub depends_on: Vec<String>,
}

impl Activity {
    /// Creates a sequential activity.
    pub fn new(
        id: impl Into<String>,
        executed_by: impl Into<String>,
        nominal_duration_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            executed_by: executed_by.into(),
            nominal_duration_hours,
            execution_mode: ExecutionMode::Sequential,
            depends_on: Vec::new(),
        }
    }

    /// Sets the activity name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Adds a dependency on an activity or work-product id.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(id.into());
        self
    }
}

/// An artifact produced and consumed by activities.
///
/// Work products derive dependency edges when activities are linked through
/// artifacts rather than direct predecessor references: every consumer
/// depends on the producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkProduct {
    /// Unique work-product identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Activity that produces this artifact.
    pub produced_by: String,
    /// Activities that consume this artifact.
    pub consumed_by: Vec<String>,
}

impl WorkProduct {
    /// Creates a work product.
    pub fn new(id: impl Into<String>, produced_by: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            produced_by: produced_by.into(),
            consumed_by: Vec::new(),
        }
    }

    /// Sets the work-product name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a consuming activity.
    pub fn with_consumer(mut self, activity_id: impl Into<String>) -> Self {
        self.consumed_by.push(activity_id.into());
        self
    }
}

/// A grouping node for presentation. Ignored by scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    /// Unique heading identifier.
    pub id: String,
    /// Display title.
    pub name: String,
    /// Ids of grouped activities or work products.
    pub members: Vec<String>,
}

impl Heading {
    /// Creates a heading.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member id.
    pub fn with_member(mut self, id: impl Into<String>) -> Self {
        self.members.push(id.into());
        self
    }
}

/// A complete process definition: the input to graph construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// Unique process identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Activities, in declaration order. Declaration order breaks ties in
    /// the topological linearization.
    pub activities: Vec<Activity>,
    /// Work products linking activities through artifacts.
    pub work_products: Vec<WorkProduct>,
    /// Presentation-only grouping nodes.
    pub headings: Vec<Heading>,
}

impl ProcessDefinition {
    /// Creates an empty process definition.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the process name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an activity.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    /// Adds a work product.
    pub fn with_work_product(mut self, wp: WorkProduct) -> Self {
        self.work_products.push(wp);
        self
    }

    /// Adds a heading.
    pub fn with_heading(mut self, heading: Heading) -> Self {
        self.headings.push(heading);
        self
    }

    /// Number of activities.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}
