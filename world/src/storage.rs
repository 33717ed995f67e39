//! Insertion-ordered typed component storage.

use serpent_core::EntityId;

/// Typed mapping from entity identifier to component value.
///
/// Entries keep their insertion order so iteration stays deterministic; an
/// insert for an entity already present overwrites the value in place. The
/// game never detaches components, so no removal operation exists.
#[derive(Clone, Debug)]
pub struct ComponentStore<C> {
    entries: Vec<(EntityId, C)>,
}

impl<C> ComponentStore<C> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts the component for the entity; the last write wins.
    pub fn insert(&mut self, entity: EntityId, component: C) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(id, _)| *id == entity) {
            *existing = component;
            return;
        }
        self.entries.push((entity, component));
    }

    /// Borrows the component stored for the entity, if any.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&C> {
        self.entries
            .iter()
            .find(|(id, _)| *id == entity)
            .map(|(_, component)| component)
    }

    /// Mutably borrows the component stored for the entity, if any.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut C> {
        self.entries
            .iter_mut()
            .find(|(id, _)| *id == entity)
            .map(|(_, component)| component)
    }

    /// Iterates the entities present in the store, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Number of entities present in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for ComponentStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serpent_core::EntityId;

    use super::ComponentStore;

    #[test]
    fn insert_overwrites_in_place() {
        let mut store = ComponentStore::new();
        store.insert(EntityId::new(0), "first");
        store.insert(EntityId::new(1), "other");
        store.insert(EntityId::new(0), "second");

        assert_eq!(store.get(EntityId::new(0)), Some(&"second"));
        assert_eq!(store.len(), 2);

        let order: Vec<EntityId> = store.entities().collect();
        assert_eq!(order, vec![EntityId::new(0), EntityId::new(1)]);
    }

    #[test]
    fn absent_entity_yields_none() {
        let mut store = ComponentStore::new();
        store.insert(EntityId::new(3), 7_u32);

        assert!(store.get(EntityId::new(4)).is_none());
        assert!(store.get_mut(EntityId::new(4)).is_none());
    }
}
