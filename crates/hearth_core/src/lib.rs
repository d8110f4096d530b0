//! # HEARTH Core Runtime
//!
//! A small Entity Component System runtime:
//! - Entities are named bags of components and tags
//! - Components are identified by name and stored type-erased
//! - Systems run one at a time, in registration order, with per-system
//!   pause and resume
//! - An engine drives the Setup → Process… → Teardown lifecycle
//!
//! ## Architecture Rules
//!
//! 1. **Absent is normal** - lookups return `Option`, never errors
//! 2. **Snapshots, not views** - queries return freshly computed vectors
//! 3. **No globals** - stopping and pausing go through return values or an
//!    explicit control channel
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::{Component, Engine, EntityManager, Signal, System, SystemManager};
//!
//! struct Position {
//!     x: f32,
//! }
//!
//! impl Component for Position {
//!     fn name(&self) -> &str {
//!         "position"
//!     }
//! }
//!
//! struct Drift;
//!
//! impl System for Drift {
//!     fn name(&self) -> &str {
//!         "drift"
//!     }
//!
//!     fn process(&mut self, entities: &mut EntityManager) -> Signal {
//!         for id in entities.filter_ids_by(&["position"]) {
//!             if let Some(entity) = entities.get_by_id_mut(id) {
//!                 if let Ok(Some(pos)) = entity.get_as_mut::<Position>("position") {
//!                     pos.x += 1.0;
//!                 }
//!             }
//!         }
//!         Signal::RequestStop
//!     }
//! }
//!
//! let mut entities = EntityManager::new();
//! entities.new_entity("player").with(Position { x: 0.0 });
//!
//! let mut systems = SystemManager::new();
//! systems.with(Drift);
//!
//! let mut engine = Engine::new(entities, systems);
//! engine.setup()?;
//! let summary = engine.run()?;
//! engine.teardown()?;
//!
//! assert_eq!(summary.ticks, 1);
//! # Ok::<(), hearth_core::EcsError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use ecs::{
    AsAny, Component, Entity, EntityId, EntityManager, Signal, System, SystemManager,
};
pub use engine::{
    ControlMessage, ControlSender, Engine, Phase, RunSummary, TickLoop, TickOutcome, TickStats,
};
pub use error::{EcsError, EcsResult};
