//! # System Manager
//!
//! Owner and pause-state surface for the system collection.
//!
//! Systems are kept in registration order alongside a name → position
//! index, so iteration is deterministic and pause/resume by name is O(1).
//! Re-registering a name replaces the system in place.

use std::collections::HashMap;

use super::system::System;

/// A registered system and its pause flag.
struct Slot {
    system: Box<dyn System>,
    paused: bool,
}

/// Handles the access to each system.
#[derive(Default)]
pub struct SystemManager {
    /// Systems in registration order.
    slots: Vec<Slot>,
    /// Position of each system in `slots`, by name.
    index: HashMap<String, usize>,
}

impl SystemManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers systems by name.
    ///
    /// Every added system starts unpaused. A system whose name is already
    /// registered replaces the old one at the old position, and its pause
    /// flag is reset.
    pub fn add<I>(&mut self, systems: I)
    where
        I: IntoIterator<Item = Box<dyn System>>,
    {
        for system in systems {
            self.insert(system);
        }
    }

    /// Registers one system, returning the one it replaced, if any.
    pub(crate) fn insert(&mut self, system: Box<dyn System>) -> Option<Box<dyn System>> {
        let name = system.name().to_owned();
        let slot = Slot {
            system,
            paused: false,
        };

        if let Some(&position) = self.index.get(&name) {
            tracing::debug!(system = %name, "replacing registered system");
            Some(std::mem::replace(&mut self.slots[position], slot).system)
        } else {
            tracing::debug!(system = %name, position = self.slots.len(), "registering system");
            self.index.insert(name, self.slots.len());
            self.slots.push(slot);
            None
        }
    }

    /// Registers a single system and returns `self` for chaining.
    pub fn with<S: System + 'static>(&mut self, system: S) -> &mut Self {
        self.add([Box::new(system) as Box<dyn System>]);
        self
    }

    /// Unregisters a system, returning it. Later systems move up one place.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn System>> {
        let position = self.index.remove(name)?;
        let slot = self.slots.remove(position);

        for other in self.index.values_mut() {
            if *other > position {
                *other -= 1;
            }
        }
        Some(slot.system)
    }

    /// Pauses the named system. Returns `false` for unknown names, which
    /// are otherwise ignored.
    pub fn pause(&mut self, name: &str) -> bool {
        self.set_paused(name, true)
    }

    /// Resumes the named system. Returns `false` for unknown names, which
    /// are otherwise ignored.
    pub fn resume(&mut self, name: &str) -> bool {
        self.set_paused(name, false)
    }

    fn set_paused(&mut self, name: &str, paused: bool) -> bool {
        match self.index.get(name) {
            Some(&position) => {
                self.slots[position].paused = paused;
                true
            }
            None => false,
        }
    }

    /// Pause state of the named system, or `None` if it is not registered.
    #[must_use]
    pub fn is_paused(&self, name: &str) -> Option<bool> {
        self.index.get(name).map(|&position| self.slots[position].paused)
    }

    /// Returns `true` if a system with this name is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered systems.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no system is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.system.name())
    }

    /// Iterates over every system and its pause flag, in registration order.
    pub fn systems(&self) -> impl Iterator<Item = (&(dyn System + 'static), bool)> {
        self.slots
            .iter()
            .map(|slot| (slot.system.as_ref(), slot.paused))
    }

    /// Mutable variant of [`systems`](Self::systems), used by the engine to
    /// drive the lifecycle.
    pub(crate) fn systems_mut(
        &mut self,
    ) -> impl Iterator<Item = (&mut (dyn System + 'static), bool)> {
        self.slots
            .iter_mut()
            .map(|slot| (slot.system.as_mut(), slot.paused))
    }

    /// The named system, mutably.
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut (dyn System + 'static)> {
        let position = *self.index.get(name)?;
        Some(self.slots[position].system.as_mut())
    }

    /// Direct access to the system at `position`, with its pause flag.
    pub(crate) fn slot_mut(
        &mut self,
        position: usize,
    ) -> Option<(&mut (dyn System + 'static), bool)> {
        self.slots
            .get_mut(position)
            .map(|slot| (slot.system.as_mut(), slot.paused))
    }

    /// Pauses the system at `position`.
    pub(crate) fn pause_at(&mut self, position: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            slot.paused = true;
        }
    }
}

impl std::fmt::Debug for SystemManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|slot| (slot.system.name(), slot.paused)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{EntityManager, Signal};

    struct MockSystem {
        name: &'static str,
        version: u32,
    }

    impl MockSystem {
        fn new(name: &'static str) -> Self {
            Self { name, version: 0 }
        }
    }

    impl System for MockSystem {
        fn name(&self) -> &str {
            self.name
        }

        fn process(&mut self, _entities: &mut EntityManager) -> Signal {
            self.version += 1;
            Signal::Continue
        }
    }

    #[test]
    fn test_no_systems_at_start() {
        let m = SystemManager::new();
        assert_eq!(m.systems().count(), 0);
        assert!(m.is_empty());
    }

    #[test]
    fn test_systems_keep_registration_order() {
        let mut m = SystemManager::new();
        m.with(MockSystem::new("b"))
            .with(MockSystem::new("a"))
            .with(MockSystem::new("c"));

        let names: Vec<&str> = m.names().collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(m.systems().all(|(_, paused)| !paused));
    }

    #[test]
    fn test_readd_replaces_in_place_and_unpauses() {
        let mut m = SystemManager::new();
        m.with(MockSystem::new("a")).with(MockSystem::new("b"));
        m.pause("a");

        m.with(MockSystem::new("a"));

        assert_eq!(m.len(), 2);
        assert_eq!(m.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(m.is_paused("a"), Some(false));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut m = SystemManager::new();
        m.with(MockSystem::new("a"));

        assert!(m.pause("a"));
        assert_eq!(m.is_paused("a"), Some(true));
        assert!(m.resume("a"));
        assert_eq!(m.is_paused("a"), Some(false));
    }

    #[test]
    fn test_unknown_name_is_ignored() {
        let mut m = SystemManager::new();
        m.with(MockSystem::new("a"));

        assert!(!m.pause("typo"));
        assert!(!m.resume("typo"));
        assert_eq!(m.is_paused("typo"), None);
        assert!(!m.contains("typo"));
        assert_eq!(m.is_paused("a"), Some(false));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_remove_keeps_index_in_sync() {
        let mut m = SystemManager::new();
        m.with(MockSystem::new("a"))
            .with(MockSystem::new("b"))
            .with(MockSystem::new("c"));

        assert!(m.remove("a").is_some());
        assert!(m.remove("a").is_none());

        assert!(m.pause("c"));
        let flags: Vec<(&str, bool)> = m.systems().map(|(s, p)| (s.name(), p)).collect();
        assert_eq!(flags, [("b", false), ("c", true)]);
    }

    #[test]
    fn test_insert_returns_replaced() {
        let mut m = SystemManager::new();
        assert!(m.insert(Box::new(MockSystem::new("a"))).is_none());

        let replaced = m.insert(Box::new(MockSystem::new("a"))).unwrap();
        assert_eq!(replaced.name(), "a");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_systems_mut_drives_process() {
        let mut m = SystemManager::new();
        let mut entities = EntityManager::new();
        m.with(MockSystem::new("a"));

        for (system, _) in m.systems_mut() {
            system.process(&mut entities);
        }

        let (system, paused) = m.slot_mut(0).unwrap();
        assert!(!paused);
        assert_eq!(system.name(), "a");
    }
}
