//! Dispatch center: the caller-facing surface.
//!
//! [`DispatchCenter`] owns one incident store, one resource store and an
//! allocation engine. Every method takes `&self` or `&mut self`, so a
//! center shared between threads has to sit behind a lock, which makes
//! each registration, escalation and dispatch cycle a serialized
//! transaction.

use crate::dispatching::{self, AllocationEngine, DispatchAction, DispatchConfig};
use crate::error::DispatchError;
use crate::model::{
    Incident, IncidentId, IncidentStatus, IncidentType, Priority, ResourceId, ResourceStatus,
    ResourceType, Zone,
};
use crate::store::{IncidentStore, ResourceStore};
use std::collections::BTreeSet;
use tracing::debug;

/// Snapshot of one incident for display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentView {
    pub status: IncidentStatus,
    pub assigned_resource_ids: Vec<ResourceId>,
    pub priority: Priority,
    pub zone: Zone,
    /// Required types not yet covered.
    pub outstanding_types: Vec<ResourceType>,
}

/// Snapshot of one resource for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceView {
    pub status: ResourceStatus,
    pub current_location: Zone,
    pub assigned_incident_id: Option<IncidentId>,
}

/// Allocation report across all active incidents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchSummary {
    pub assigned: Vec<IncidentId>,
    /// Unassigned incidents with the types they still need.
    pub unassigned: Vec<(IncidentId, Vec<ResourceType>)>,
    pub available_resources: usize,
}

/// Incident/resource stores plus the engine that allocates between them.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use u_dispatch::center::DispatchCenter;
/// use u_dispatch::dispatching::DispatchConfig;
/// use u_dispatch::model::{IncidentStatus, IncidentType, Priority, ResourceType, Zone};
///
/// let mut center = DispatchCenter::new(DispatchConfig::default()).unwrap();
/// center.register_resource(ResourceType::Ambulance, Zone(1));
///
/// let low = center.report_incident(
///     IncidentType::Accident,
///     Zone(3),
///     Priority::Low,
///     BTreeSet::from([ResourceType::Ambulance]),
/// );
/// center.dispatch();
///
/// let high = center.report_incident(
///     IncidentType::Medical,
///     Zone(3),
///     Priority::High,
///     BTreeSet::from([ResourceType::Ambulance]),
/// );
/// center.dispatch();
///
/// assert_eq!(center.incident_view(high).unwrap().status, IncidentStatus::Assigned);
/// assert_eq!(center.incident_view(low).unwrap().status, IncidentStatus::Unassigned);
/// ```
pub struct DispatchCenter {
    incidents: IncidentStore,
    resources: ResourceStore,
    engine: AllocationEngine,
    clock: u64,
}

impl DispatchCenter {
    /// Creates an empty center with the default proximity metric.
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        Ok(Self::with_engine(AllocationEngine::new(config)?))
    }

    /// Creates an empty center around a preconfigured engine.
    pub fn with_engine(engine: AllocationEngine) -> Self {
        Self {
            incidents: IncidentStore::new(),
            resources: ResourceStore::new(),
            engine,
            clock: 0,
        }
    }

    /// Adds the standard starting fleet: one ambulance, fire engine and
    /// police car in each of Zone 1 and Zone 2.
    pub fn with_default_fleet(mut self) -> Self {
        for kind in ResourceType::ALL {
            for zone in [Zone(1), Zone(2)] {
                self.register_resource(kind, zone);
            }
        }
        self
    }

    /// Registers an incident with a caller-supplied creation time.
    pub fn register_incident(
        &mut self,
        kind: IncidentType,
        zone: Zone,
        priority: Priority,
        required: BTreeSet<ResourceType>,
        created_at: u64,
    ) -> IncidentId {
        self.clock = self.clock.max(created_at);
        let id = self
            .incidents
            .register(kind, zone, priority, required, created_at);
        debug!(incident = %id, %kind, %zone, %priority, created_at, "incident registered");
        id
    }

    /// Registers an incident stamped with the center's logical clock, one
    /// past every timestamp seen so far.
    ///
    /// The clock saturates at `u64::MAX`. Reports made after that share the
    /// final timestamp and are ordered by id.
    pub fn report_incident(
        &mut self,
        kind: IncidentType,
        zone: Zone,
        priority: Priority,
        required: BTreeSet<ResourceType>,
    ) -> IncidentId {
        let created_at = self.clock.saturating_add(1);
        self.register_incident(kind, zone, priority, required, created_at)
    }

    /// Registers an available resource parked at its home zone.
    pub fn register_resource(&mut self, kind: ResourceType, home_zone: Zone) -> ResourceId {
        let id = self.resources.register(kind, home_zone);
        debug!(resource = %id, %kind, zone = %home_zone, "resource registered");
        id
    }

    /// Changes an incident's priority. Takes effect on the next dispatch.
    ///
    /// Raw text goes through [`str::parse`] first, which rejects anything
    /// other than the three tiers with `InvalidPriority`.
    pub fn escalate_priority(
        &mut self,
        id: IncidentId,
        new_priority: Priority,
    ) -> Result<(), DispatchError> {
        let incident = self
            .incidents
            .get_mut(id)
            .ok_or(DispatchError::UnknownIncident(id))?;
        let previous = incident.priority();
        incident.set_priority(new_priority);
        debug!(incident = %id, from = %previous, to = %new_priority, "priority changed");
        Ok(())
    }

    /// Runs one dispatch cycle over the center's stores.
    pub fn dispatch(&mut self) -> Vec<DispatchAction> {
        self.engine.dispatch(&mut self.incidents, &mut self.resources)
    }

    /// Assigns a specific resource to a specific incident.
    pub fn assign(
        &mut self,
        incident: IncidentId,
        resource: ResourceId,
    ) -> Result<DispatchAction, DispatchError> {
        self.engine
            .assign(&mut self.incidents, &mut self.resources, incident, resource)
    }

    /// Closes an incident: frees every resource serving it and removes it
    /// from the active set. Returns the final record.
    pub fn resolve_incident(&mut self, id: IncidentId) -> Result<Incident, DispatchError> {
        let serving: Vec<ResourceId> = self
            .incidents
            .get(id)
            .ok_or(DispatchError::UnknownIncident(id))?
            .assigned_resource_ids()
            .collect();

        let return_home = self.engine.config().return_to_home_on_release;
        for resource_id in &serving {
            dispatching::unbind(&mut self.incidents, &mut self.resources, *resource_id);
            if return_home {
                if let Some(resource) = self.resources.get_mut(*resource_id) {
                    resource.return_home();
                }
            }
        }

        let resolved = self
            .incidents
            .remove(id)
            .ok_or(DispatchError::UnknownIncident(id))?;
        debug!(incident = %id, released = serving.len(), "incident resolved");
        Ok(resolved)
    }

    /// Status, assignments and outstanding needs of one incident.
    pub fn incident_view(&self, id: IncidentId) -> Result<IncidentView, DispatchError> {
        let incident = self
            .incidents
            .get(id)
            .ok_or(DispatchError::UnknownIncident(id))?;
        Ok(IncidentView {
            status: incident.status(),
            assigned_resource_ids: incident.assigned_resource_ids().collect(),
            priority: incident.priority(),
            zone: incident.zone(),
            outstanding_types: incident.outstanding_types().collect(),
        })
    }

    /// Status, location and assignment of one resource.
    pub fn resource_view(&self, id: ResourceId) -> Result<ResourceView, DispatchError> {
        let resource = self
            .resources
            .get(id)
            .ok_or(DispatchError::UnknownResource(id))?;
        Ok(ResourceView {
            status: resource.status(),
            current_location: resource.current_location(),
            assigned_incident_id: resource.assigned_incident_id(),
        })
    }

    /// Allocation report over every active incident.
    pub fn summary(&self) -> DispatchSummary {
        let mut summary = DispatchSummary {
            available_resources: self.resources.available_count(),
            ..DispatchSummary::default()
        };
        for incident in self.incidents.iter() {
            match incident.status() {
                IncidentStatus::Assigned => summary.assigned.push(incident.id()),
                IncidentStatus::Unassigned => summary
                    .unassigned
                    .push((incident.id(), incident.outstanding_types().collect())),
            }
        }
        summary
    }

    /// Active incidents in id order.
    pub fn incidents(&self) -> &IncidentStore {
        &self.incidents
    }

    /// Registered resources in id order.
    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    /// The allocation engine driving [`dispatch`](Self::dispatch).
    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::ActionKind;

    fn center() -> DispatchCenter {
        DispatchCenter::new(DispatchConfig::default()).unwrap()
    }

    fn needs(kinds: &[ResourceType]) -> BTreeSet<ResourceType> {
        kinds.iter().copied().collect()
    }

    #[test]
    fn test_default_fleet() {
        let c = center().with_default_fleet();
        assert_eq!(c.resources().len(), 6);
        assert_eq!(c.resources().available_count(), 6);
        for kind in ResourceType::ALL {
            assert_eq!(c.resources().iter().filter(|r| r.kind() == kind).count(), 2);
        }
    }

    #[test]
    fn test_report_clock_runs_ahead() {
        let mut c = center();
        let a = c.register_incident(
            IncidentType::Fire,
            Zone(1),
            Priority::Low,
            needs(&[ResourceType::FireEngine]),
            40,
        );
        let b = c.report_incident(
            IncidentType::Fire,
            Zone(1),
            Priority::Low,
            needs(&[ResourceType::FireEngine]),
        );

        assert_eq!(c.incidents().get(a).unwrap().created_at(), 40);
        assert_eq!(c.incidents().get(b).unwrap().created_at(), 41);
    }

    #[test]
    fn test_report_clock_saturates_at_max() {
        let mut c = center();
        let last = c.register_incident(
            IncidentType::Crime,
            Zone(1),
            Priority::Low,
            needs(&[ResourceType::PoliceCar]),
            u64::MAX,
        );
        let after = c.report_incident(
            IncidentType::Crime,
            Zone(1),
            Priority::Low,
            needs(&[ResourceType::PoliceCar]),
        );

        assert_eq!(c.incidents().get(last).unwrap().created_at(), u64::MAX);
        assert_eq!(c.incidents().get(after).unwrap().created_at(), u64::MAX);

        // Equal timestamps fall back to id order.
        let police = c.register_resource(ResourceType::PoliceCar, Zone(1));
        c.dispatch();
        assert_eq!(c.resource_view(police).unwrap().assigned_incident_id, Some(last));
    }

    #[test]
    fn test_views() {
        let mut c = center();
        let amb = c.register_resource(ResourceType::Ambulance, Zone(2));
        let inc = c.report_incident(
            IncidentType::Medical,
            Zone(4),
            Priority::Medium,
            needs(&[ResourceType::Ambulance, ResourceType::PoliceCar]),
        );

        let view = c.incident_view(inc).unwrap();
        assert_eq!(view.status, IncidentStatus::Unassigned);
        assert_eq!(view.outstanding_types.len(), 2);

        c.dispatch();

        let view = c.incident_view(inc).unwrap();
        assert_eq!(view.status, IncidentStatus::Unassigned);
        assert_eq!(view.assigned_resource_ids, vec![amb]);
        assert_eq!(view.outstanding_types, vec![ResourceType::PoliceCar]);
        assert_eq!(view.zone, Zone(4));

        let rv = c.resource_view(amb).unwrap();
        assert_eq!(rv.status, ResourceStatus::Assigned);
        assert_eq!(rv.current_location, Zone(4));
        assert_eq!(rv.assigned_incident_id, Some(inc));
    }

    #[test]
    fn test_unknown_ids() {
        let c = center();
        assert_eq!(
            c.incident_view(IncidentId(1)).unwrap_err(),
            DispatchError::UnknownIncident(IncidentId(1))
        );
        assert!(c.resource_view(ResourceId(1)).unwrap_err().is_unknown_entity());
    }

    #[test]
    fn test_escalation_enables_preemption() {
        let mut c = center();
        let r = c.register_resource(ResourceType::Ambulance, Zone(1));
        let low = c.report_incident(
            IncidentType::Accident,
            Zone(1),
            Priority::Low,
            needs(&[ResourceType::Ambulance]),
        );
        c.dispatch();

        let waiting = c.report_incident(
            IncidentType::Medical,
            Zone(1),
            Priority::Medium,
            needs(&[ResourceType::Ambulance]),
        );
        assert!(c.dispatch().is_empty());

        c.escalate_priority(waiting, "high".parse().unwrap()).unwrap();
        let actions = c.dispatch();

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, ActionKind::Preempted);
        assert_eq!(actions[0].preempted_from, Some(low));
        assert_eq!(c.resource_view(r).unwrap().assigned_incident_id, Some(waiting));
    }

    #[test]
    fn test_escalation_errors() {
        let mut c = center();
        assert!(c
            .escalate_priority(IncidentId(3), Priority::High)
            .unwrap_err()
            .is_unknown_entity());
        assert!(matches!(
            "critical".parse::<Priority>(),
            Err(DispatchError::InvalidPriority(_))
        ));
    }

    #[test]
    fn test_resolve_releases_resources() {
        let mut c = center();
        let amb = c.register_resource(ResourceType::Ambulance, Zone(1));
        let fire = c.register_resource(ResourceType::FireEngine, Zone(2));
        let inc = c.report_incident(
            IncidentType::Fire,
            Zone(5),
            Priority::High,
            needs(&[ResourceType::Ambulance, ResourceType::FireEngine]),
        );
        c.dispatch();
        assert_eq!(c.incident_view(inc).unwrap().status, IncidentStatus::Assigned);

        let resolved = c.resolve_incident(inc).unwrap();
        assert_eq!(resolved.id(), inc);
        assert!(!c.incidents().contains(inc));

        for id in [amb, fire] {
            let view = c.resource_view(id).unwrap();
            assert_eq!(view.status, ResourceStatus::Available);
            assert_eq!(view.assigned_incident_id, None);
            assert_eq!(view.current_location, Zone(5));
        }

        assert!(c.resolve_incident(inc).unwrap_err().is_unknown_entity());
    }

    #[test]
    fn test_resolve_can_return_units_home() {
        let mut c = DispatchCenter::new(
            DispatchConfig::default().with_return_to_home_on_release(true),
        )
        .unwrap();
        let amb = c.register_resource(ResourceType::Ambulance, Zone(1));
        let inc = c.report_incident(
            IncidentType::Medical,
            Zone(6),
            Priority::Low,
            needs(&[ResourceType::Ambulance]),
        );
        c.dispatch();
        c.resolve_incident(inc).unwrap();

        assert_eq!(c.resource_view(amb).unwrap().current_location, Zone(1));
    }

    #[test]
    fn test_freed_resource_serves_waiting_incident() {
        let mut c = center();
        c.register_resource(ResourceType::Ambulance, Zone(1));
        let first = c.report_incident(
            IncidentType::Medical,
            Zone(1),
            Priority::High,
            needs(&[ResourceType::Ambulance]),
        );
        c.dispatch();
        let second = c.report_incident(
            IncidentType::Medical,
            Zone(2),
            Priority::High,
            needs(&[ResourceType::Ambulance]),
        );
        assert!(c.dispatch().is_empty());

        c.resolve_incident(first).unwrap();
        let actions = c.dispatch();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].incident_id, second);
    }

    #[test]
    fn test_summary() {
        let mut c = center().with_default_fleet();
        let ok = c.report_incident(
            IncidentType::Crime,
            Zone(1),
            Priority::Medium,
            needs(&[ResourceType::PoliceCar]),
        );
        let short = c.report_incident(
            IncidentType::Fire,
            Zone(2),
            Priority::Low,
            needs(&[ResourceType::FireEngine]),
        );
        c.report_incident(
            IncidentType::Fire,
            Zone(2),
            Priority::Low,
            needs(&[ResourceType::FireEngine]),
        );
        let starved = c.report_incident(
            IncidentType::Fire,
            Zone(2),
            Priority::Low,
            needs(&[ResourceType::FireEngine]),
        );
        c.dispatch();

        let summary = c.summary();
        assert!(summary.assigned.contains(&ok));
        // Newest low-priority reports are served first, so the oldest waits.
        assert_eq!(
            summary.unassigned,
            vec![(short, vec![ResourceType::FireEngine])]
        );
        assert!(summary.assigned.contains(&starved));
        assert_eq!(summary.available_resources, 6 - 3);
    }

    #[test]
    fn test_manual_assign_through_center() {
        let mut c = center();
        let police = c.register_resource(ResourceType::PoliceCar, Zone(3));
        let inc = c.report_incident(
            IncidentType::Medical,
            Zone(3),
            Priority::Low,
            needs(&[ResourceType::Ambulance]),
        );
        assert!(matches!(
            c.assign(inc, police),
            Err(DispatchError::TypeMismatch { .. })
        ));
    }
}
