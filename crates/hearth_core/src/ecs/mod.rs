//! # Entity Component System
//!
//! The data half (entities and their named components) and the behavior
//! half (systems) of the runtime.
//!
//! ## Design Philosophy
//!
//! - Components are identified by name, not by type
//! - Entities are owned by the [`EntityManager`]; callers hold references
//! - Queries return snapshots, never live views
//! - Systems run strictly one at a time, in registration order

mod component;
mod entity;
mod entity_manager;
mod system;
mod system_manager;

pub use component::{AsAny, Component};
pub use entity::{Entity, EntityId};
pub use entity_manager::EntityManager;
pub use system::{Signal, System};
pub use system_manager::SystemManager;
