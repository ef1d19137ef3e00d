//! Emergency-response allocation engine.
//!
//! Matches deployable units (ambulances, fire engines, police cars) to
//! reported incidents:
//!
//! - **Model**: incident and resource records with typed priorities,
//!   resource types, zones and identifiers.
//! - **Proximity**: pluggable zone distance metrics (numeric difference
//!   or adjacency-graph hop count).
//! - **Stores**: caller-owned incident and resource collections.
//! - **Dispatching**: the allocation engine. Orders incidents by priority
//!   and recency, picks the nearest compatible unit, and preempts units
//!   from strictly lower-priority incidents when nothing is free.
//! - **Center**: a facade bundling stores and engine behind the
//!   register / escalate / dispatch / view operations.
//! - **Input**: normalization of loose operator input into typed values.
//!
//! # Architecture
//!
//! The engine is a synchronous state transition over borrowed stores. It
//! never fails on well-formed input and never installs a tracing
//! subscriber; events are emitted through the `tracing` facade for the
//! host application to collect.

pub mod center;
pub mod dispatching;
pub mod error;
pub mod input;
pub mod model;
pub mod proximity;
pub mod store;

pub use center::{DispatchCenter, DispatchSummary, IncidentView, ResourceView};
pub use dispatching::{ActionKind, AllocationEngine, DispatchAction, DispatchConfig};
pub use error::DispatchError;
