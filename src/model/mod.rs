//! Incident and resource entities.
//!
//! Both are passive records. Mutating methods are crate-private so that
//! the assignment invariants (status, back-reference and assignment set
//! agree with each other) can only be changed through the stores and the
//! allocation engine.

mod incident;
mod resource;
mod types;

pub use incident::Incident;
pub use resource::Resource;
pub use types::{
    IncidentId, IncidentStatus, IncidentType, Priority, ResourceId, ResourceStatus, ResourceType,
    Zone,
};
