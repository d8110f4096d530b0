//! # Entity Manager
//!
//! Owner and query surface for the entity collection.
//!
//! Entities live in a single ordered registry. Creation appends, removal
//! shifts the survivors down, so iteration always follows creation order.
//! Because ids are assigned in increasing order and removal never reorders,
//! the registry is also sorted by id, which keeps id lookup logarithmic.
//!
//! ## Snapshots
//!
//! [`EntityManager::filter_by`] and friends return freshly computed vectors.
//! A snapshot taken earlier in a tick is never updated by later additions or
//! removals; an id snapshot may therefore contain ids that no longer resolve,
//! which [`EntityManager::get_by_id_mut`] reports as `None`.

use super::entity::{Entity, EntityId};

/// Handles the access to each entity.
#[derive(Debug)]
pub struct EntityManager {
    /// All live entities, in creation order.
    entities: Vec<Entity>,
    /// Id handed to the next created entity.
    next_id: EntityId,
}

impl EntityManager {
    /// Creates an empty manager. The first entity gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: EntityId::FIRST,
        }
    }

    /// Creates an empty manager with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            next_id: EntityId::FIRST,
        }
    }

    /// Builds a new entity and appends it to the registry.
    ///
    /// The returned reference can be used to attach components and tags;
    /// the manager keeps ownership.
    ///
    /// # Panics
    ///
    /// Panics once the id space is exhausted: the last id handed out is
    /// `i64::MAX - 1`, since ids are never reused.
    pub fn new_entity(&mut self, name: impl Into<String>) -> &mut Entity {
        let id = self.next_id;
        let Some(next) = id.next() else {
            panic!("entity ids exhausted after {id}");
        };
        self.next_id = next;

        let index = self.entities.len();
        self.entities.push(Entity::new(id, name));
        &mut self.entities[index]
    }

    /// Returns all entities in creation order.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterates mutably over all entities in creation order.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if there are no live entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns every entity that has a component for each of `names`.
    ///
    /// An empty `names` slice matches every entity.
    #[must_use]
    pub fn filter_by<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.has_all(names)).collect()
    }

    /// Like [`filter_by`](Self::filter_by), but returns owned ids.
    ///
    /// The id snapshot does not borrow the manager, so a system can walk it
    /// while adding, removing or mutating entities.
    #[must_use]
    pub fn filter_ids_by<S: AsRef<str>>(&self, names: &[S]) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.has_all(names))
            .map(Entity::id)
            .collect()
    }

    /// Returns every entity carrying `tag`.
    #[must_use]
    pub fn filter_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.has_tag(tag)).collect()
    }

    /// Returns the first entity (in creation order) named `name`.
    ///
    /// Names are not unique; later entities with the same name are only
    /// reachable through iteration or by id.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name() == name)
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name() == name)
    }

    /// Returns the entity with the given id, if it is still alive.
    #[must_use]
    pub fn get_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.position_of(id).map(|index| &self.entities[index])
    }

    /// Returns the entity with the given id mutably, if it is still alive.
    pub fn get_by_id_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.position_of(id).map(|index| &mut self.entities[index])
    }

    #[inline]
    fn position_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, Entity::id).ok()
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes the first entity (in creation order) named `name` and
    /// returns it. The remaining entities keep their relative order.
    ///
    /// Removal is by name, not by id: with duplicate names the earliest
    /// entity goes first.
    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.name() == name)?;
        Some(self.entities.remove(index))
    }

    /// Removes the first entity sharing `entity`'s name.
    ///
    /// Equivalent to `remove(entity.name())`; the id of `entity` is not
    /// consulted.
    pub fn remove_entity(&mut self, entity: &Entity) -> Option<Entity> {
        self.remove(entity.name())
    }

    /// Removes all entities. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
