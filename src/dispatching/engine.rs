//! Allocation engine.

use super::config::DispatchConfig;
use super::policy::{self, PreemptionLedger};
use super::queue;
use super::types::DispatchAction;
use crate::error::DispatchError;
use crate::model::{
    IncidentId, IncidentStatus, Priority, ResourceId, ResourceStatus, ResourceType, Zone,
};
use crate::proximity::{NumericDistance, ZoneProximity};
use crate::store::{IncidentStore, ResourceStore};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Matches available resources to unassigned incidents.
///
/// The engine owns no entity state. Callers own the stores and lend them
/// mutably for each cycle, which serializes cycles with every other
/// mutation by construction.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use u_dispatch::dispatching::{ActionKind, AllocationEngine, DispatchConfig};
/// use u_dispatch::model::{IncidentType, Priority, ResourceType, Zone};
/// use u_dispatch::store::{IncidentStore, ResourceStore};
///
/// let mut incidents = IncidentStore::new();
/// let mut resources = ResourceStore::new();
///
/// let ambulance = resources.register(ResourceType::Ambulance, Zone(1));
/// let incident = incidents.register(
///     IncidentType::Medical,
///     Zone(3),
///     Priority::High,
///     BTreeSet::from([ResourceType::Ambulance]),
///     1,
/// );
///
/// let engine = AllocationEngine::new(DispatchConfig::default()).unwrap();
/// let actions = engine.dispatch(&mut incidents, &mut resources);
///
/// assert_eq!(actions.len(), 1);
/// assert_eq!(actions[0].incident_id, incident);
/// assert_eq!(actions[0].resource_id, ambulance);
/// assert_eq!(actions[0].action, ActionKind::Assigned);
/// ```
pub struct AllocationEngine {
    proximity: Box<dyn ZoneProximity>,
    config: DispatchConfig,
}

impl AllocationEngine {
    /// Creates an engine using [`NumericDistance`] for proximity.
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        config.validate().map_err(DispatchError::InvalidConfig)?;
        Ok(Self {
            proximity: Box::new(NumericDistance),
            config,
        })
    }

    /// Replaces the proximity metric.
    pub fn with_proximity<P: ZoneProximity + 'static>(mut self, proximity: P) -> Self {
        self.proximity = Box::new(proximity);
        self
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Name of the active proximity metric.
    pub fn proximity_name(&self) -> &str {
        self.proximity.name()
    }

    /// Runs one dispatch cycle to a fixed point.
    ///
    /// The queue of unassigned incidents is built once, then passed over
    /// repeatedly until a full pass changes nothing. Returns every
    /// assignment and preemption in the order applied; an empty list
    /// means nothing could be improved. Incidents that lose a resource to
    /// preemption wait for the next cycle.
    pub fn dispatch(
        &self,
        incidents: &mut IncidentStore,
        resources: &mut ResourceStore,
    ) -> Vec<DispatchAction> {
        let queue = queue::build_queue(incidents);
        let mut ledger = PreemptionLedger::new();
        let mut actions = Vec::new();
        let mut passes = 0usize;

        loop {
            passes += 1;
            let before = actions.len();

            for &incident_id in &queue {
                self.serve(incident_id, incidents, resources, &mut ledger, &mut actions);
            }

            if actions.len() == before {
                break;
            }
            if self.config.max_passes > 0 && passes >= self.config.max_passes {
                warn!(
                    passes,
                    "dispatch cycle stopped by pass budget before reaching a fixed point"
                );
                break;
            }
        }

        let unassigned = incidents
            .iter()
            .filter(|i| i.status() == IncidentStatus::Unassigned)
            .count();
        info!(
            passes,
            queued = queue.len(),
            actions = actions.len(),
            preempted = ledger.total(),
            unassigned,
            "dispatch cycle complete"
        );

        actions
    }

    /// Assigns a specific resource to a specific incident, bypassing ranking.
    ///
    /// # Errors
    ///
    /// - `UnknownIncident` / `UnknownResource` for ids missing from the stores
    /// - `TypeMismatch` if the incident does not require the resource's type
    /// - `ResourceUnavailable` if the resource already serves an incident
    pub fn assign(
        &self,
        incidents: &mut IncidentStore,
        resources: &mut ResourceStore,
        incident_id: IncidentId,
        resource_id: ResourceId,
    ) -> Result<DispatchAction, DispatchError> {
        let incident = incidents
            .get(incident_id)
            .ok_or(DispatchError::UnknownIncident(incident_id))?;
        let resource = resources
            .get(resource_id)
            .ok_or(DispatchError::UnknownResource(resource_id))?;

        if !incident.required_types().contains(&resource.kind()) {
            return Err(DispatchError::TypeMismatch {
                incident: incident_id,
                resource: resource_id,
                kind: resource.kind(),
            });
        }
        if let Some(serving) = resource.assigned_incident_id() {
            return Err(DispatchError::ResourceUnavailable {
                resource: resource_id,
                serving,
            });
        }

        bind(incidents, resources, incident_id, resource_id);
        debug!(incident = %incident_id, resource = %resource_id, "manual assignment");
        Ok(DispatchAction::assigned(incident_id, resource_id))
    }

    /// Visits one queued incident: tries to cover each outstanding type,
    /// first from available resources, then by preemption.
    fn serve(
        &self,
        incident_id: IncidentId,
        incidents: &mut IncidentStore,
        resources: &mut ResourceStore,
        ledger: &mut PreemptionLedger,
        actions: &mut Vec<DispatchAction>,
    ) {
        let Some(incident) = incidents.get(incident_id) else {
            return;
        };
        if incident.status() == IncidentStatus::Assigned {
            return;
        }
        let zone = incident.zone();
        let priority = incident.priority();
        let needs: Vec<ResourceType> = incident.outstanding_types().collect();

        for kind in needs {
            if let Some(resource_id) = self.nearest_available(resources, kind, zone) {
                bind(incidents, resources, incident_id, resource_id);
                debug!(incident = %incident_id, resource = %resource_id, %kind, "assigned");
                actions.push(DispatchAction::assigned(incident_id, resource_id));
                continue;
            }

            if !ledger.may_request(&self.config, incident_id, priority) {
                continue;
            }
            let Some(resource_id) =
                self.nearest_preemptible(incidents, resources, kind, zone, priority)
            else {
                continue;
            };
            let Some(donor) = unbind(incidents, resources, resource_id) else {
                continue;
            };
            bind(incidents, resources, incident_id, resource_id);
            ledger.record(incident_id, donor);
            debug!(
                incident = %incident_id,
                resource = %resource_id,
                donor = %donor,
                %kind,
                "preempted"
            );
            actions.push(DispatchAction::preempted(incident_id, resource_id, donor));
        }
    }

    fn nearest_available(
        &self,
        resources: &ResourceStore,
        kind: ResourceType,
        target: Zone,
    ) -> Option<ResourceId> {
        let candidates: Vec<(ResourceId, Zone)> = resources
            .iter()
            .filter(|r| r.kind() == kind && r.is_available())
            .map(|r| (r.id(), r.current_location()))
            .collect();
        self.nearest(&candidates, target)
    }

    /// Nearest assigned resource of `kind` whose incident ranks strictly
    /// below `requester`.
    fn nearest_preemptible(
        &self,
        incidents: &IncidentStore,
        resources: &ResourceStore,
        kind: ResourceType,
        target: Zone,
        requester: Priority,
    ) -> Option<ResourceId> {
        let candidates: Vec<(ResourceId, Zone)> = resources
            .iter()
            .filter(|r| r.kind() == kind && r.status() == ResourceStatus::Assigned)
            .filter(|r| {
                r.assigned_incident_id()
                    .and_then(|id| incidents.get(id))
                    .is_some_and(|donor| policy::is_preemptible(requester, donor.priority()))
            })
            .map(|r| (r.id(), r.current_location()))
            .collect();
        self.nearest(&candidates, target)
    }

    /// Smallest distance to `target`, ties broken by lower resource id.
    #[cfg(not(feature = "parallel"))]
    fn nearest(&self, candidates: &[(ResourceId, Zone)], target: Zone) -> Option<ResourceId> {
        candidates
            .iter()
            .map(|&(id, at)| (self.proximity.distance(at, target), id))
            .min()
            .map(|(_, id)| id)
    }

    /// Smallest distance to `target`, ties broken by lower resource id.
    #[cfg(feature = "parallel")]
    fn nearest(&self, candidates: &[(ResourceId, Zone)], target: Zone) -> Option<ResourceId> {
        let best = if self.config.parallel {
            candidates
                .par_iter()
                .map(|&(id, at)| (self.proximity.distance(at, target), id))
                .min()
        } else {
            candidates
                .iter()
                .map(|&(id, at)| (self.proximity.distance(at, target), id))
                .min()
        };
        best.map(|(_, id)| id)
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self {
            proximity: Box::new(NumericDistance),
            config: DispatchConfig::default(),
        }
    }
}

/// Binds a resource to an incident. Both sides change together.
pub(crate) fn bind(
    incidents: &mut IncidentStore,
    resources: &mut ResourceStore,
    incident_id: IncidentId,
    resource_id: ResourceId,
) {
    let (Some(incident), Some(resource)) =
        (incidents.get_mut(incident_id), resources.get_mut(resource_id))
    else {
        return;
    };
    resource.assign_to(incident_id, incident.zone());
    incident.attach(resource_id, resource.kind());
}

/// Releases a resource from whatever incident it serves, returning that
/// incident. The resource stays where it is.
pub(crate) fn unbind(
    incidents: &mut IncidentStore,
    resources: &mut ResourceStore,
    resource_id: ResourceId,
) -> Option<IncidentId> {
    let donor = resources.get_mut(resource_id)?.release()?;
    if let Some(incident) = incidents.get_mut(donor) {
        incident.detach(resource_id);
    }
    Some(donor)
}
