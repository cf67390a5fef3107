//! Ordered entity stores
//!
//! Every dynamic entity (projectile, enemy, particle, obstacle, pickup) lives in an
//! `EntityStore`. Iteration order is insertion order, which keeps the simulation
//! deterministic. Removal during a tick is always deferred: callers mark what must go
//! and compact with `retain` afterwards, so no element is skipped or visited twice.

use serde::{Deserialize, Serialize};

/// Stable identity of an entity within a `World`
pub type EntityId = u32;

/// Anything that can live in an `EntityStore`
pub trait Entity {
    fn id(&self) -> EntityId;
}

/// Insertion-ordered collection of entities addressable by id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity (spawn)
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove an entity by identity, preserving the order of the rest
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let idx = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Keep only the entities matching `keep` (the compact pass of deferred removal)
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    /// Remove every entity whose id is in `ids`
    pub fn remove_all(&mut self, ids: &[EntityId]) {
        if ids.is_empty() {
            return;
        }
        self.items.retain(|item| !ids.contains(&item.id()));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T: Entity> IntoIterator for &'a EntityStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Entity> IntoIterator for &'a mut EntityStore<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
