//! Records produced by a dispatch cycle.

use crate::model::{IncidentId, ResourceId};

/// What happened to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    /// An available resource was assigned.
    Assigned,
    /// A resource was taken from a lower-priority incident.
    Preempted,
}

/// One assignment or preemption, in the order it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchAction {
    pub incident_id: IncidentId,
    pub resource_id: ResourceId,
    pub action: ActionKind,
    /// The incident that lost the resource, for preemptions.
    pub preempted_from: Option<IncidentId>,
}

impl DispatchAction {
    pub(crate) fn assigned(incident_id: IncidentId, resource_id: ResourceId) -> Self {
        Self {
            incident_id,
            resource_id,
            action: ActionKind::Assigned,
            preempted_from: None,
        }
    }

    pub(crate) fn preempted(
        incident_id: IncidentId,
        resource_id: ResourceId,
        donor: IncidentId,
    ) -> Self {
        Self {
            incident_id,
            resource_id,
            action: ActionKind::Preempted,
            preempted_from: Some(donor),
        }
    }

    pub fn is_preemption(&self) -> bool {
        self.action == ActionKind::Preempted
    }
}
