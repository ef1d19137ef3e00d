//! Dispatch queue ordering.

use crate::model::{Incident, IncidentId, IncidentStatus};
use crate::store::IncidentStore;
use std::cmp::Ordering;

/// Queue order between two incidents.
///
/// Keys, in order:
/// 1. priority, highest first
/// 2. `created_at`, newest first (recency is favored, not FIFO)
/// 3. id ascending
pub fn dispatch_order(a: &Incident, b: &Incident) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| b.created_at().cmp(&a.created_at()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Builds the queue of currently unassigned incidents.
pub fn build_queue(incidents: &IncidentStore) -> Vec<IncidentId> {
    let mut pending: Vec<&Incident> = incidents
        .iter()
        .filter(|i| i.status() == IncidentStatus::Unassigned)
        .collect();
    pending.sort_by(|a, b| dispatch_order(a, b));
    pending.into_iter().map(|i| i.id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IncidentType, Priority, ResourceType, Zone};
    use std::collections::BTreeSet;

    fn register(store: &mut IncidentStore, priority: Priority, created_at: u64) -> IncidentId {
        store.register(
            IncidentType::Accident,
            Zone(1),
            priority,
            BTreeSet::from([ResourceType::Ambulance]),
            created_at,
        )
    }

    #[test]
    fn test_priority_then_recency() {
        let mut store = IncidentStore::new();
        let low = register(&mut store, Priority::Low, 1);
        let high_old = register(&mut store, Priority::High, 2);
        let medium = register(&mut store, Priority::Medium, 3);
        let high_new = register(&mut store, Priority::High, 4);

        assert_eq!(build_queue(&store), vec![high_new, high_old, medium, low]);
    }

    #[test]
    fn test_equal_timestamps_break_by_id() {
        let mut store = IncidentStore::new();
        let first = register(&mut store, Priority::Medium, 7);
        let second = register(&mut store, Priority::Medium, 7);

        assert_eq!(build_queue(&store), vec![first, second]);
    }

    #[test]
    fn test_assigned_incidents_excluded() {
        let mut store = IncidentStore::new();
        let a = register(&mut store, Priority::High, 1);
        let b = register(&mut store, Priority::Low, 2);
        store
            .get_mut(a)
            .unwrap()
            .attach(crate::model::ResourceId(1), ResourceType::Ambulance);

        assert_eq!(build_queue(&store), vec![b]);
    }
}
