//! Record store for process and query definitions.
//!
//! A thin save/list contract behind which process definitions and saved
//! cross-entity projections ("queries") are persisted. The scheduler never
//! reads this store directly — it consumes an already-validated
//! [`ActivityGraph`](crate::graph::ActivityGraph), so storage stays a
//! boundary concern.

use serde::{Deserialize, Serialize};

/// A persistable record: carries an optional id assigned on save.
pub trait StoreRecord {
    /// The record's assigned id, if it has been saved.
    fn record_id(&self) -> Option<&str>;
    /// Assigns an id (called by the store on save).
    fn assign_id(&mut self, id: String);
}

/// Save/list contract for record persistence.
pub trait RecordStore<R: StoreRecord> {
    /// Persists a record, assigning an id if it has none, and returns the
    /// stored copy.
    fn save(&mut self, record: R) -> R;
    /// All stored records, in save order.
    fn list_all(&self) -> &[R];
}

/// In-memory record store with monotonically assigned ids.
#[derive(Debug, Clone)]
pub struct MemoryStore<R> {
    records: Vec<R>,
    next_id: u64,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MemoryStore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: StoreRecord + Clone> RecordStore<R> for MemoryStore<R> {
    fn save(&mut self, mut record: R) -> R {
        if record.record_id().is_none() {
            record.assign_id(self.next_id.to_string());
            self.next_id += 1;
        }
        self.records.push(record.clone());
        record
    }

    fn list_all(&self) -> &[R] {
        &self.records
    }
}

/// A saved cross-entity projection definition.
///
/// Describes which fields of an entity to project and which dependent
/// entities (and their fields) to join in. An activity graph may be
/// materialized from such a query's result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryDefinition {
    /// Assigned on save.
    pub id: Option<String>,
    /// Query name.
    pub name: String,
    /// Root entity being projected (e.g. "activity").
    pub entity: String,
    /// Projected fields of the root entity.
    pub fields: Vec<String>,
    /// Dependent entities joined into the projection.
    pub dependencies: Vec<String>,
    /// Projected fields per dependent entity, aligned with `dependencies`.
    pub dependency_fields: Vec<Vec<String>>,
}

impl QueryDefinition {
    /// Creates a query over an entity.
    pub fn new(name: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity: entity.into(),
            ..Self::default()
        }
    }

    /// Adds a projected field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Adds a dependent entity with its projected fields.
    pub fn with_dependency(
        mut self,
        entity: impl Into<String>,
        fields: Vec<String>,
    ) -> Self {
        self.dependencies.push(entity.into());
        self.dependency_fields.push(fields);
        self
    }
}

impl StoreRecord for QueryDefinition {
    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// A stored process definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Assigned on save.
    pub id: Option<String>,
    /// The process definition payload.
    pub definition: crate::models::ProcessDefinition,
}

impl ProcessRecord {
    /// Wraps a definition for storage.
    pub fn new(definition: crate::models::ProcessDefinition) -> Self {
        Self {
            id: None,
            definition,
        }
    }
}

impl StoreRecord for ProcessRecord {
    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
