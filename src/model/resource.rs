//! Resource record.

use super::types::{IncidentId, ResourceId, ResourceStatus, ResourceType, Zone};

/// A deployable emergency unit.
///
/// `current_location` starts at `home_zone` and follows the unit to each
/// incident it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub(crate) id: ResourceId,
    pub(crate) kind: ResourceType,
    pub(crate) home_zone: Zone,
    pub(crate) location: Zone,
    pub(crate) status: ResourceStatus,
    pub(crate) incident: Option<IncidentId>,
}

impl Resource {
    pub(crate) fn new(id: ResourceId, kind: ResourceType, home_zone: Zone) -> Self {
        Self {
            id,
            kind,
            home_zone,
            location: home_zone,
            status: ResourceStatus::Available,
            incident: None,
        }
    }

    /// Identifier issued by the resource store.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Type of unit.
    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    /// Zone the unit was stationed at on registration.
    pub fn home_zone(&self) -> Zone {
        self.home_zone
    }

    /// Zone the unit is currently in.
    pub fn current_location(&self) -> Zone {
        self.location
    }

    /// Available or assigned.
    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    /// The incident this unit serves, if any.
    pub fn assigned_incident_id(&self) -> Option<IncidentId> {
        self.incident
    }

    /// Whether the unit is free for dispatch.
    pub fn is_available(&self) -> bool {
        self.status == ResourceStatus::Available
    }

    /// Moves the unit to `zone` and binds it to `incident`.
    pub(crate) fn assign_to(&mut self, incident: IncidentId, zone: Zone) {
        self.status = ResourceStatus::Assigned;
        self.incident = Some(incident);
        self.location = zone;
    }

    /// Clears the back-reference and returns the incident it served.
    /// Location is left untouched.
    pub(crate) fn release(&mut self) -> Option<IncidentId> {
        self.status = ResourceStatus::Available;
        self.incident.take()
    }

    pub(crate) fn return_home(&mut self) {
        self.location = self.home_zone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resource_is_available_at_home() {
        let r = Resource::new(ResourceId(1), ResourceType::Ambulance, Zone(2));
        assert!(r.is_available());
        assert_eq!(r.current_location(), Zone(2));
        assert_eq!(r.assigned_incident_id(), None);
    }

    #[test]
    fn test_assign_moves_unit() {
        let mut r = Resource::new(ResourceId(1), ResourceType::PoliceCar, Zone(1));
        r.assign_to(IncidentId(9), Zone(5));

        assert_eq!(r.status(), ResourceStatus::Assigned);
        assert_eq!(r.assigned_incident_id(), Some(IncidentId(9)));
        assert_eq!(r.current_location(), Zone(5));
        assert_eq!(r.home_zone(), Zone(1));
    }

    #[test]
    fn test_release_keeps_location() {
        let mut r = Resource::new(ResourceId(1), ResourceType::FireEngine, Zone(1));
        r.assign_to(IncidentId(3), Zone(4));

        assert_eq!(r.release(), Some(IncidentId(3)));
        assert!(r.is_available());
        assert_eq!(r.current_location(), Zone(4));

        r.return_home();
        assert_eq!(r.current_location(), Zone(1));
    }
}
