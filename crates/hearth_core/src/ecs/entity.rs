//! # Entity Management
//!
//! An entity is an identified bag of named components plus a set of tags.
//! Entities are only created by the [`EntityManager`](super::EntityManager),
//! which owns them; callers mutate them in place through the references the
//! manager hands out.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::component::Component;
use crate::error::{EcsError, EcsResult};

/// Unique identifier for an entity.
///
/// Ids start at 1 and strictly increase for the lifetime of the manager
/// that assigned them. An id is never reused, even after removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// The first id handed out by a fresh manager.
    pub const FIRST: Self = Self(1);

    /// Creates an id from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` at `i64::MAX`.
    #[inline]
    #[must_use]
    pub(crate) const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named composition of components and tags.
pub struct Entity {
    id: EntityId,
    name: String,
    components: HashMap<String, Box<dyn Component>>,
    tags: HashSet<String>,
}

impl Entity {
    /// Creates an empty entity. Only the manager assigns ids.
    pub(crate) fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            components: HashMap::new(),
            tags: HashSet::new(),
        }
    }

    /// Returns the entity id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity name. Names are labels, not keys: several
    /// entities may share one.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Checks for existence of a component.
    #[inline]
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Returns the component stored under `name`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&(dyn Component + 'static)> {
        self.components.get(name).map(|c| &**c)
    }

    /// Returns the component stored under `name` mutably, if any.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Component + 'static)> {
        self.components.get_mut(name).map(|c| &mut **c)
    }

    /// Returns the component stored under `name` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentTypeMismatch`] if a component is stored
    /// under `name` but is not a `T`. A missing component is `Ok(None)`.
    pub fn get_as<T: Component>(&self, name: &str) -> EcsResult<Option<&T>> {
        match self.get(name) {
            None => Ok(None),
            Some(component) => component
                .downcast_ref::<T>()
                .map(Some)
                .ok_or_else(|| type_mismatch::<T>(name)),
        }
    }

    /// Returns the component stored under `name` mutably as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentTypeMismatch`] if a component is stored
    /// under `name` but is not a `T`. A missing component is `Ok(None)`.
    pub fn get_as_mut<T: Component>(&mut self, name: &str) -> EcsResult<Option<&mut T>> {
        match self.get_mut(name) {
            None => Ok(None),
            Some(component) => component
                .downcast_mut::<T>()
                .map(Some)
                .ok_or_else(|| type_mismatch::<T>(name)),
        }
    }

    /// Adds components, each keyed by its own name.
    ///
    /// A component whose name is already present replaces the stored one.
    pub fn add<I>(&mut self, components: I)
    where
        I: IntoIterator<Item = Box<dyn Component>>,
    {
        for component in components {
            self.components
                .insert(component.name().to_owned(), component);
        }
    }

    /// Adds a single component and returns `self` for chaining.
    pub fn with<C: Component>(&mut self, component: C) -> &mut Self {
        self.add([Box::new(component) as Box<dyn Component>]);
        self
    }

    /// Removes the component stored under `name`, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Component>> {
        self.components.remove(name)
    }

    /// Number of attached components.
    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Names of all attached components, in no particular order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Returns `true` if a component is present for every name in `names`.
    #[must_use]
    pub fn has_all<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().all(|name| self.has(name.as_ref()))
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Adds tags. Tags already present are left alone.
    pub fn add_tag<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
    }

    /// Adds a single tag and returns `self` for chaining.
    pub fn tagged(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.insert(tag.into());
        self
    }

    /// Removes a tag if present.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    /// Checks for existence of a tag.
    #[inline]
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// All tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components: Vec<&str> = self.component_names().collect();
        components.sort_unstable();
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();

        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &components)
            .field("tags", &tags)
            .finish()
    }
}

fn type_mismatch<T>(name: &str) -> EcsError {
    EcsError::ComponentTypeMismatch {
        component: name.to_owned(),
        expected: std::any::type_name::<T>(),
    }
}
