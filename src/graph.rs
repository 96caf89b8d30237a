//! Validated activity graph.
//!
//! Materializes a [`ProcessDefinition`] into an immutable dependency graph:
//! direct `depends_on` references plus edges derived from work products
//! (every consumer depends on the producer). Construction validates all
//! references and execution-mode parameters and computes a deterministic
//! topological linearization; the graph cannot exist in an invalid state.
//!
//! # Determinism
//! Kahn's algorithm with a declaration-order ready queue: among activities
//! whose predecessors are all placed, the one declared first comes first.
//! Any linearization consistent with the edges yields the same schedule, but
//! fixing one keeps runs reproducible and explainable.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

use std::collections::{HashMap, VecDeque};

use crate::error::EngineError;
use crate::models::{Activity, ExecutionMode, ProcessDefinition};

/// An immutable, validated process dependency graph.
///
/// Activities are addressed by dense indices in declaration order; ids map
/// to indices via [`ActivityGraph::index_of`].
#[derive(Debug, Clone)]
pub struct ActivityGraph {
    activities: Vec<Activity>,
    index_by_id: HashMap<String, usize>,
    predecessors: Vec<Vec<usize>>,
    topo_order: Vec<usize>,
}

impl ActivityGraph {
    /// Builds and validates a graph from a process definition.
    ///
    /// # Errors
    /// - [`EngineError::EmptyProcess`] if the definition has no activities.
    /// - [`EngineError::InvalidExecutionMode`] for a for-each fan-out of zero.
    /// - [`EngineError::DanglingReference`] if a dependency or work-product
    ///   link names an unknown id.
    /// - [`EngineError::CyclicDependency`] if no topological order exists.
    pub fn build(definition: &ProcessDefinition) -> Result<Self, EngineError> {
        if definition.activities.is_empty() {
            return Err(EngineError::EmptyProcess {
                process_id: definition.id.clone(),
            });
        }

        let activities: Vec<Activity> = definition.activities.clone();
        let n = activities.len();

        let mut index_by_id = HashMap::with_capacity(n);
        for (idx, act) in activities.iter().enumerate() {
            index_by_id.insert(act.id.clone(), idx);
        }

        for act in &activities {
            if let ExecutionMode::ForEach { fan_out: 0 } = act.execution_mode {
                return Err(EngineError::InvalidExecutionMode {
                    activity_id: act.id.clone(),
                    reason: "for-each fan-out must be >= 1".into(),
                });
            }
        }

        // Work products resolve to their producing activity.
        let mut producer_by_wp: HashMap<&str, usize> = HashMap::new();
        for wp in &definition.work_products {
            let producer = *index_by_id.get(&wp.produced_by).ok_or_else(|| {
                EngineError::DanglingReference {
                    referrer: wp.id.clone(),
                    missing: wp.produced_by.clone(),
                }
            })?;
            producer_by_wp.insert(wp.id.as_str(), producer);
        }

        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

        // Direct depends_on edges: activity id, or work-product id → producer.
        for (idx, act) in activities.iter().enumerate() {
            for dep in &act.depends_on {
                let pred = index_by_id
                    .get(dep)
                    .copied()
                    .or_else(|| producer_by_wp.get(dep.as_str()).copied())
                    .ok_or_else(|| EngineError::DanglingReference {
                        referrer: act.id.clone(),
                        missing: dep.clone(),
                    })?;
                if !predecessors[idx].contains(&pred) {
                    predecessors[idx].push(pred);
                }
            }
        }

        // Derived produces/consumes edges: consumer depends on producer.
        for wp in &definition.work_products {
            let producer = producer_by_wp[wp.id.as_str()];
            for consumer_id in &wp.consumed_by {
                let consumer = *index_by_id.get(consumer_id).ok_or_else(|| {
                    EngineError::DanglingReference {
                        referrer: wp.id.clone(),
                        missing: consumer_id.clone(),
                    }
                })?;
                if !predecessors[consumer].contains(&producer) {
                    predecessors[consumer].push(producer);
                }
            }
        }

        let topo_order = topological_order(&activities, &predecessors)?;

        tracing::debug!(
            process = %definition.id,
            activities = n,
            edges = predecessors.iter().map(Vec::len).sum::<usize>(),
            "activity graph built"
        );

        Ok(Self {
            activities,
            index_by_id,
            predecessors,
            topo_order,
        })
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the graph has no activities. Always `false` for a built graph.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Activity at a dense index.
    pub fn activity(&self, index: usize) -> &Activity {
        &self.activities[index]
    }

    /// Dense index for an activity id.
    pub fn index_of(&self, activity_id: &str) -> Option<usize> {
        self.index_by_id.get(activity_id).copied()
    }

    /// Direct predecessors of an activity, as dense indices.
    pub fn predecessors(&self, index: usize) -> &[usize] {
        &self.predecessors[index]
    }

    /// The fixed topological linearization, as dense indices.
    pub fn topological_order(&self) -> &[usize] {
        &self.topo_order
    }
}

/// Kahn's algorithm with a declaration-order ready queue.
fn topological_order(
    activities: &[Activity],
    predecessors: &[Vec<usize>],
) -> Result<Vec<usize>, EngineError> {
    let n = activities.len();
    let mut indegree: Vec<usize> = predecessors.iter().map(Vec::len).collect();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (idx, preds) in predecessors.iter().enumerate() {
        for &p in preds {
            successors[p].push(idx);
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for &next in &successors[idx] {
            indegree[next] -= 1;
            if indegree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() < n {
        // First activity (in declaration order) still blocked sits on a cycle
        // or downstream of one.
        let on_cycle = (0..n).find(|&i| indegree[i] > 0).unwrap_or(0);
        return Err(EngineError::CyclicDependency {
            activity_id: activities[on_cycle].id.clone(),
        });
    }

    Ok(order)
}
