//! Core trait for zone proximity.

use crate::model::Zone;

/// A distance metric between zones.
///
/// Implementations must be pure and satisfy:
///
/// - `distance(a, b) == distance(b, a)`
/// - `distance(a, b) == 0` if and only if `a == b`
///
/// Smaller values mean closer. The allocation engine only compares
/// distances, so any monotonic scale works.
///
/// # Examples
///
/// ```
/// use u_dispatch::model::Zone;
/// use u_dispatch::proximity::ZoneProximity;
///
/// // Zones on a ring of 8: wrap around the short way.
/// struct Ring;
///
/// impl ZoneProximity for Ring {
///     fn name(&self) -> &str { "Ring" }
///     fn distance(&self, a: Zone, b: Zone) -> u32 {
///         let d = (a.0 % 8).abs_diff(b.0 % 8);
///         d.min(8 - d)
///     }
/// }
///
/// assert_eq!(Ring.distance(Zone(1), Zone(7)), 2);
/// ```
pub trait ZoneProximity: Send + Sync {
    /// Returns the name of this metric.
    fn name(&self) -> &str;

    /// Computes the distance between two zones.
    fn distance(&self, a: Zone, b: Zone) -> u32;
}
