//! Allocation engine configuration.

use crate::model::{Priority, ResourceType};

/// Configuration for the allocation engine.
///
/// # Examples
///
/// ```
/// use u_dispatch::dispatching::DispatchConfig;
/// use u_dispatch::model::Priority;
///
/// let config = DispatchConfig::default()
///     .with_preemption_threshold(Priority::Medium)
///     .with_max_preemptions_per_incident(2)
///     .with_max_passes(50);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.preemption_threshold, Priority::Medium);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Lowest incident priority allowed to preempt a resource when no
    /// available candidate exists. Donors must always rank strictly lower
    /// than the requester.
    pub preemption_threshold: Priority,

    /// How many preemptions a single incident may perform in one cycle.
    ///
    /// Defaults to one per resource type. A requester never seeks a type
    /// it already covers, so the default lets it fill every need in a
    /// single cycle and a repeated dispatch has nothing left to do. Set
    /// it to 1 to allow a single preemption per requester per cycle; a
    /// multi-type requester then fills one need per cycle.
    pub max_preemptions_per_incident: usize,

    /// Upper bound on passes over the queue in one cycle. 0 = no limit.
    ///
    /// A cycle always terminates on its own; this only caps latency on
    /// very large stores.
    pub max_passes: usize,

    /// Whether a unit released by incident resolution drives back to its
    /// home zone. Preempted units always go straight to the new incident.
    pub return_to_home_on_release: bool,

    /// Whether to evaluate candidate distances in parallel using rayon.
    ///
    /// Only has an effect when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            preemption_threshold: Priority::High,
            max_preemptions_per_incident: ResourceType::ALL.len(),
            max_passes: 0,
            return_to_home_on_release: false,
            parallel: false,
        }
    }
}

impl DispatchConfig {
    /// Sets the lowest priority allowed to preempt.
    pub fn with_preemption_threshold(mut self, priority: Priority) -> Self {
        self.preemption_threshold = priority;
        self
    }

    /// Sets the per-incident preemption limit for one cycle.
    pub fn with_max_preemptions_per_incident(mut self, n: usize) -> Self {
        self.max_preemptions_per_incident = n;
        self
    }

    /// Sets the pass budget per cycle.
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    /// Sets whether resolved incidents send their units home.
    pub fn with_return_to_home_on_release(mut self, enabled: bool) -> Self {
        self.return_to_home_on_release = enabled;
        self
    }

    /// Enables or disables parallel candidate evaluation.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_preemptions_per_incident == 0 {
            return Err("max_preemptions_per_incident must be at least 1".into());
        }
        if self.preemption_threshold == Priority::Low {
            // Nothing ranks below Low, so the threshold would be meaningless.
            return Err("preemption_threshold must be medium or high".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DispatchConfig::default();
        assert_eq!(config.preemption_threshold, Priority::High);
        assert_eq!(config.max_preemptions_per_incident, 3);
        assert_eq!(config.max_passes, 0);
        assert!(!config.return_to_home_on_release);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_preemptions() {
        let config = DispatchConfig::default().with_max_preemptions_per_incident(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_low_threshold() {
        let config = DispatchConfig::default().with_preemption_threshold(Priority::Low);
        assert!(config.validate().is_err());
    }
}
