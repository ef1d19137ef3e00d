//! Allocation engine: priority-ordered, proximity-aware resource dispatch.
//!
//! One call to [`AllocationEngine::dispatch`] is a *dispatch cycle*:
//!
//! 1. Unassigned incidents are queued by priority (highest first), then
//!    creation time (newest first), then id.
//! 2. Each queued incident is offered, per outstanding resource type, the
//!    nearest available compatible resource (ties by lower resource id).
//! 3. An incident at or above the preemption threshold that finds nothing
//!    available may take the nearest compatible resource from an incident
//!    of strictly lower priority (see [`policy`]).
//! 4. Passes over the queue repeat until one changes nothing.
//!
//! The cycle has no failure mode. Constraints that cannot be met simply
//! leave incidents unassigned.

mod config;
mod engine;
pub mod policy;
mod queue;
mod types;

pub use config::DispatchConfig;
pub(crate) use engine::unbind;
pub use engine::AllocationEngine;
pub use queue::{build_queue, dispatch_order};
pub use types::{ActionKind, DispatchAction};
