//! Incident record.

use super::types::{
    IncidentId, IncidentStatus, IncidentType, Priority, ResourceId, ResourceType, Zone,
};
use std::collections::{BTreeMap, BTreeSet};

/// A reported emergency awaiting or receiving service.
///
/// Identity, type, zone, requirements and creation time are fixed at
/// registration. Status and the assignment set are only changed by the
/// allocation engine; priority may additionally be escalated by the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incident {
    pub(crate) id: IncidentId,
    pub(crate) kind: IncidentType,
    pub(crate) zone: Zone,
    pub(crate) priority: Priority,
    pub(crate) required: BTreeSet<ResourceType>,
    pub(crate) status: IncidentStatus,
    pub(crate) created_at: u64,
    /// Serving resources with their type, so coverage can be checked
    /// without a resource store lookup.
    pub(crate) assigned: BTreeMap<ResourceId, ResourceType>,
}

impl Incident {
    pub(crate) fn new(
        id: IncidentId,
        kind: IncidentType,
        zone: Zone,
        priority: Priority,
        required: BTreeSet<ResourceType>,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            kind,
            zone,
            priority,
            required,
            status: IncidentStatus::Unassigned,
            created_at,
            assigned: BTreeMap::new(),
        }
    }

    /// Identifier issued by the incident store.
    pub fn id(&self) -> IncidentId {
        self.id
    }

    /// Kind of emergency reported.
    pub fn kind(&self) -> IncidentType {
        self.kind
    }

    /// Zone the incident was reported in.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Current priority, including any escalation.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Assigned once every required type is covered.
    pub fn status(&self) -> IncidentStatus {
        self.status
    }

    /// Logical creation time. Newer incidents are served first within a tier.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Resource types the incident needs.
    pub fn required_types(&self) -> &BTreeSet<ResourceType> {
        &self.required
    }

    /// Identifiers of the resources currently serving this incident, ascending.
    pub fn assigned_resource_ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.assigned.keys().copied()
    }

    /// Whether the resource currently serves this incident.
    pub fn is_serving(&self, resource: ResourceId) -> bool {
        self.assigned.contains_key(&resource)
    }

    /// Required types not yet covered by any serving resource.
    pub fn outstanding_types(&self) -> impl Iterator<Item = ResourceType> + '_ {
        self.required
            .iter()
            .copied()
            .filter(|kind| !self.assigned.values().any(|k| k == kind))
    }

    /// True when the assignment set is non-empty and covers every required type.
    pub fn is_satisfied(&self) -> bool {
        !self.assigned.is_empty() && self.outstanding_types().next().is_none()
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) fn attach(&mut self, resource: ResourceId, kind: ResourceType) {
        self.assigned.insert(resource, kind);
        self.refresh_status();
    }

    /// Removes a serving resource. Returns false if it was not serving here.
    pub(crate) fn detach(&mut self, resource: ResourceId) -> bool {
        let removed = self.assigned.remove(&resource).is_some();
        self.refresh_status();
        removed
    }

    fn refresh_status(&mut self) {
        self.status = if self.is_satisfied() {
            IncidentStatus::Assigned
        } else {
            IncidentStatus::Unassigned
        };
    }
}
