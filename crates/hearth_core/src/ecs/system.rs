//! # System Contract
//!
//! Systems are the behavior half of the ECS. The core ships no concrete
//! systems: rendering, input, physics and audio live with the application
//! and plug in through the [`System`] trait.
//!
//! ## Lifecycle
//!
//! ```text
//!  Uninitialized ──setup()──▶ Active ◀──pause/resume──▶ Paused
//!                               │                         │
//!                               └───────teardown()────────┘
//!                                           ▼
//!                                       Finalized
//! ```
//!
//! - `setup` runs exactly once, before the first `process`.
//! - `process` runs once per tick while the system is active, never while
//!   it is paused.
//! - `teardown` runs exactly once, after the last `process`, paused or not.

use super::entity_manager::EntityManager;

/// Request a system hands back to the engine after processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Keep going.
    #[default]
    Continue,
    /// Pause the system that returned this signal. It stays paused until
    /// resumed by name.
    RequestPause,
    /// Stop the run loop once the current tick completes.
    RequestStop,
}

/// A stateful unit of behavior driven by the engine.
///
/// The name is the registry key and must stay stable for as long as the
/// system is registered.
pub trait System {
    /// Registry key of this system.
    fn name(&self) -> &str;

    /// One-time initialization. Runs before any call to [`process`](Self::process).
    fn setup(&mut self) {}

    /// Runs one tick of this system against the shared entity manager.
    fn process(&mut self, entities: &mut EntityManager) -> Signal;

    /// One-time finalization. Runs after the last call to
    /// [`process`](Self::process), whether or not the system is paused.
    fn teardown(&mut self) {}
}

impl std::fmt::Debug for dyn System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("System").field(&self.name()).finish()
    }
}
