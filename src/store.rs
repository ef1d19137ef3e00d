//! Caller-owned incident and resource stores.
//!
//! Stores hand out sequential identifiers and keep entities in id order,
//! which makes every iteration (and therefore every dispatch decision)
//! deterministic. The allocation engine borrows both stores mutably for
//! the duration of one cycle.

use crate::model::{
    Incident, IncidentId, IncidentType, Priority, Resource, ResourceId, ResourceType, Zone,
};
use std::collections::{BTreeMap, BTreeSet};

/// Active incidents keyed by id.
#[derive(Debug, Clone, Default)]
pub struct IncidentStore {
    incidents: BTreeMap<IncidentId, Incident>,
    next_id: u64,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new unassigned incident and returns its id.
    ///
    /// Inputs are trusted: `required` should be non-empty and `created_at`
    /// unique. Equal timestamps are still ordered deterministically by id.
    pub fn register(
        &mut self,
        kind: IncidentType,
        zone: Zone,
        priority: Priority,
        required: BTreeSet<ResourceType>,
        created_at: u64,
    ) -> IncidentId {
        self.next_id += 1;
        let id = IncidentId(self.next_id);
        self.incidents
            .insert(id, Incident::new(id, kind, zone, priority, required, created_at));
        id
    }

    /// Looks up an active incident.
    pub fn get(&self, id: IncidentId) -> Option<&Incident> {
        self.incidents.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: IncidentId) -> Option<&mut Incident> {
        self.incidents.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: IncidentId) -> Option<Incident> {
        self.incidents.remove(&id)
    }

    pub fn contains(&self, id: IncidentId) -> bool {
        self.incidents.contains_key(&id)
    }

    /// Incidents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Incident> {
        self.incidents.values()
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}

/// Registered resources keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    resources: BTreeMap<ResourceId, Resource>,
    next_id: u64,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new available resource stationed at `home_zone`.
    pub fn register(&mut self, kind: ResourceType, home_zone: Zone) -> ResourceId {
        self.next_id += 1;
        let id = ResourceId(self.next_id);
        self.resources.insert(id, Resource::new(id, kind, home_zone));
        id
    }

    /// Looks up a registered resource.
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resources.get_mut(&id)
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.resources.contains_key(&id)
    }

    /// Resources in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Number of resources currently free for dispatch.
    pub fn available_count(&self) -> usize {
        self.resources.values().filter(|r| r.is_available()).count()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
