//! Errors surfaced to callers of the dispatch center and engine.
//!
//! `dispatch()` itself never fails; these come from explicit operations
//! (lookups, manual assignment, escalation) and from input normalization.

use crate::model::{IncidentId, ResourceId, ResourceType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown incident: {0}")]
    UnknownIncident(IncidentId),

    #[error("unknown resource: {0}")]
    UnknownResource(ResourceId),

    /// The resource's type is not among the incident's requirements.
    #[error("{resource} is a {kind}, which {incident} does not require")]
    TypeMismatch {
        incident: IncidentId,
        resource: ResourceId,
        kind: ResourceType,
    },

    /// The resource already serves an incident.
    #[error("{resource} is already assigned to {serving}")]
    ResourceUnavailable {
        resource: ResourceId,
        serving: IncidentId,
    },

    #[error("invalid priority: {0:?} (expected high, medium or low)")]
    InvalidPriority(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DispatchError {
    /// True for errors referencing an id missing from the stores.
    pub fn is_unknown_entity(&self) -> bool {
        matches!(
            self,
            DispatchError::UnknownIncident(_) | DispatchError::UnknownResource(_)
        )
    }
}
