//! Pre-flight validation for process definitions.
//!
//! Accumulates *all* structural problems in one pass — duplicate IDs,
//! dangling references, invalid execution-mode parameters, negative
//! durations, dependency cycles — so an editor can surface every issue at
//! once. Graph construction ([`crate::graph::ActivityGraph::build`]) stays
//! fail-fast with typed errors; this module is the design-time counterpart.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::models::{ExecutionMode, ProcessDefinition};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A dependency or work-product link names an unknown id.
    DanglingReference,
    /// Execution-mode parameters are invalid (e.g., zero fan-out).
    InvalidExecutionMode,
    /// An activity has a negative nominal duration.
    NegativeDuration,
    /// The dependency relation contains a cycle.
    CyclicDependency,
    /// The process has no activities.
    EmptyProcess,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process definition, accumulating every detected issue.
///
/// Checks:
/// 1. The process has at least one activity
/// 2. No duplicate activity or work-product IDs (across both namespaces)
/// 3. All `depends_on` references resolve to an activity or work product
/// 4. All work-product producer/consumer references resolve to activities
/// 5. For-each fan-out >= 1
/// 6. Nominal durations are non-negative
/// 7. No circular dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_process(definition: &ProcessDefinition) -> ValidationResult {
    let mut errors = Vec::new();

    if definition.activities.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcess,
            format!("Process '{}' has no activities", definition.id),
        ));
    }

    // IDs share one namespace: a work product may be referenced from
    // depends_on, so it must not collide with an activity id.
    let mut ids = HashSet::new();
    for act in &definition.activities {
        if !ids.insert(act.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate activity ID: {}", act.id),
            ));
        }
    }
    for wp in &definition.work_products {
        if !ids.insert(wp.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate work product ID: {}", wp.id),
            ));
        }
    }

    let activity_ids: HashSet<&str> = definition
        .activities
        .iter()
        .map(|a| a.id.as_str())
        .collect();

    // Execution parameters and durations
    for act in &definition.activities {
        if let ExecutionMode::ForEach { fan_out: 0 } = act.execution_mode {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidExecutionMode,
                format!("Activity '{}' has a for-each fan-out of 0", act.id),
            ));
        }
        if act.nominal_duration_hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!("Activity '{}' has a negative duration", act.id),
            ));
        }
    }

    // Dependency references
    for act in &definition.activities {
        for dep in &act.depends_on {
            if !ids.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!("Activity '{}' depends on unknown id '{}'", act.id, dep),
                ));
            }
        }
    }

    // Work-product links
    for wp in &definition.work_products {
        if !activity_ids.contains(wp.produced_by.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Work product '{}' produced by unknown activity '{}'",
                    wp.id, wp.produced_by
                ),
            ));
        }
        for consumer in &wp.consumed_by {
            if !activity_ids.contains(consumer.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!(
                        "Work product '{}' consumed by unknown activity '{}'",
                        wp.id, consumer
                    ),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(definition) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the dependency graph using DFS.
///
/// Unresolvable references are skipped here; they are reported separately
/// as dangling references.
fn detect_cycles(definition: &ProcessDefinition) -> Option<ValidationError> {
    // producer lookup for work-product-mediated edges
    let producer_by_wp: HashMap<&str, &str> = definition
        .work_products
        .iter()
        .map(|wp| (wp.id.as_str(), wp.produced_by.as_str()))
        .collect();
    let activity_ids: HashSet<&str> = definition
        .activities
        .iter()
        .map(|a| a.id.as_str())
        .collect();

    // adjacency: predecessor → successors
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for act in &definition.activities {
        for dep in &act.depends_on {
            let pred = if activity_ids.contains(dep.as_str()) {
                dep.as_str()
            } else if let Some(&producer) = producer_by_wp.get(dep.as_str()) {
                producer
            } else {
                continue;
            };
            adj.entry(pred).or_default().push(act.id.as_str());
        }
    }
    for wp in &definition.work_products {
        if !activity_ids.contains(wp.produced_by.as_str()) {
            continue;
        }
        for consumer in &wp.consumed_by {
            if activity_ids.contains(consumer.as_str()) {
                adj.entry(wp.produced_by.as_str())
                    .or_default()
                    .push(consumer.as_str());
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for act in &definition.activities {
        let node = act.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving activity '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}
