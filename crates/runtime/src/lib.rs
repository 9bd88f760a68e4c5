//! Runtime orchestration for the memory-matching game engine.
//!
//! This crate wires the pure state machine from `game-core` into a running
//! service: a single-writer session worker that serializes every intent,
//! the reveal/mismatch/tick timers, persistence of the image pool and
//! leaderboard blobs, and a broadcast event stream for UI layers. Consumers
//! embed [`Runtime`] and interact through the cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] defines the broadcast event stream
//! - [`repository`] provides the persistent profile stores
//! - [`seed`] carries the built-in default image set
//! - `workers` keeps the background session task internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod seed;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::GameEvent;
pub use repository::{FileStore, MemoryStore, ProfileStore, RepositoryError};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
