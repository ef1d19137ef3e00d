//! Reallocation (preemption) policy.
//!
//! A resource may be taken from its current incident only when:
//!
//! - the requesting incident is at or above the configured threshold and
//!   found no available resource of the needed type,
//! - the resource's type matches the need,
//! - the donor incident ranks strictly lower than the requester.
//!
//! The donor's loss is accepted unconditionally. It gets no compensation
//! search in the same cycle and simply re-enters the queue on the next one.
//! Within one cycle a donor never preempts anyone itself, and each requester
//! is limited to `max_preemptions_per_incident`.

use super::config::DispatchConfig;
use crate::model::{IncidentId, Priority};
use std::collections::{BTreeMap, BTreeSet};

/// Whether a resource serving a `donor`-priority incident may be moved to a
/// `requester`-priority incident.
pub fn is_preemptible(requester: Priority, donor: Priority) -> bool {
    donor < requester
}

/// Per-cycle bookkeeping that keeps preemption from cascading.
#[derive(Debug, Default)]
pub(crate) struct PreemptionLedger {
    used: BTreeMap<IncidentId, usize>,
    donors: BTreeSet<IncidentId>,
}

impl PreemptionLedger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether `incident` may still preempt in this cycle.
    pub(crate) fn may_request(
        &self,
        config: &DispatchConfig,
        incident: IncidentId,
        priority: Priority,
    ) -> bool {
        priority >= config.preemption_threshold
            && !self.donors.contains(&incident)
            && self.used.get(&incident).copied().unwrap_or(0) < config.max_preemptions_per_incident
    }

    pub(crate) fn record(&mut self, requester: IncidentId, donor: IncidentId) {
        *self.used.entry(requester).or_insert(0) += 1;
        self.donors.insert(donor);
    }

    pub(crate) fn total(&self) -> usize {
        self.used.values().sum()
    }
}
