//! Entity registry and origin snapshots

use crate::entity::{EntityId, SceneEntity};
use crate::error::{Error, Result};
use crate::math::Vec3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

/// Holds named handles to loaded scene entities
///
/// Entities are inserted once, after loading, and live for the lifetime of
/// the scene. The registry also keeps each entity's resting position,
/// captured exactly once via [`EntityRegistry::snapshot_origin`] after
/// initial placement. The registry itself never mutates transforms; that
/// is the sequencer's job.
pub struct EntityRegistry {
    entities: SlotMap<EntityId, SceneEntity>,
    names: FxHashMap<String, EntityId>,
    origins: FxHashMap<EntityId, Vec3>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            names: FxHashMap::default(),
            origins: FxHashMap::default(),
        }
    }

    /// Insert a loaded entity under a stable name
    ///
    /// Re-inserting a name replaces the handle and discards any origin
    /// snapshot taken for the previous one.
    pub fn insert(&mut self, name: impl Into<String>, entity: SceneEntity) -> EntityId {
        let name = name.into();
        if let Some(old) = self.names.remove(&name) {
            tracing::warn!(entity = %name, "replacing previously registered entity");
            self.origins.remove(&old);
            self.entities.remove(old);
        }
        let id = self.entities.insert(entity);
        self.names.insert(name, id);
        id
    }

    /// Look up an entity id by name
    pub fn id(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Get an entity by name
    pub fn get(&self, name: &str) -> Result<&SceneEntity> {
        self.names
            .get(name)
            .and_then(|id| self.entities.get(*id))
            .ok_or_else(|| Error::EntityNotFound(name.to_string()))
    }

    /// Get a mutable entity by name
    pub fn get_mut(&mut self, name: &str) -> Result<&mut SceneEntity> {
        match self.names.get(name) {
            Some(id) => self
                .entities
                .get_mut(*id)
                .ok_or_else(|| Error::EntityNotFound(name.to_string())),
            None => Err(Error::EntityNotFound(name.to_string())),
        }
    }

    /// Capture the entity's current position as its origin snapshot
    ///
    /// The first call wins; later calls are no-ops so that choreography
    /// steps can always restore to the settled, pre-choreography position.
    pub fn snapshot_origin(&mut self, name: &str) -> Result<Vec3> {
        let id = self
            .names
            .get(name)
            .copied()
            .ok_or_else(|| Error::EntityNotFound(name.to_string()))?;
        if let Some(existing) = self.origins.get(&id) {
            return Ok(*existing);
        }
        let position = self.entities[id].position;
        self.origins.insert(id, position);
        tracing::debug!(entity = %name, ?position, "captured origin snapshot");
        Ok(position)
    }

    /// Read an entity's origin snapshot, if one was captured
    pub fn origin(&self, name: &str) -> Result<Vec3> {
        let id = self
            .names
            .get(name)
            .copied()
            .ok_or_else(|| Error::EntityNotFound(name.to_string()))?;
        self.origins
            .get(&id)
            .copied()
            .ok_or_else(|| Error::SnapshotMissing(name.to_string()))
    }

    /// Iterate over all registered names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(|s| s.as_str())
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_entity() {
        let registry = EntityRegistry::new();
        assert_eq!(
            registry.get("model").unwrap_err(),
            Error::EntityNotFound("model".to_string())
        );
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut registry = EntityRegistry::new();
        registry.insert("thingy", SceneEntity::new().with_position(10.0, 0.0, 0.0));

        let first = registry.snapshot_origin("thingy").unwrap();
        assert_eq!(first, Vec3::new(10.0, 0.0, 0.0));

        // Moving the entity and re-snapshotting must not overwrite
        registry.get_mut("thingy").unwrap().position.y = 3.0;
        let second = registry.snapshot_origin("thingy").unwrap();
        assert_eq!(second, first);
        assert_eq!(registry.origin("thingy").unwrap(), first);
    }

    #[test]
    fn test_origin_missing_before_capture() {
        let mut registry = EntityRegistry::new();
        registry.insert("spiral", SceneEntity::new());
        assert_eq!(
            registry.origin("spiral").unwrap_err(),
            Error::SnapshotMissing("spiral".to_string())
        );
    }

    #[test]
    fn test_reinsert_discards_snapshot() {
        let mut registry = EntityRegistry::new();
        registry.insert("model", SceneEntity::new().with_position(1.0, 2.0, 3.0));
        registry.snapshot_origin("model").unwrap();

        registry.insert("model", SceneEntity::new());
        assert!(matches!(
            registry.origin("model"),
            Err(Error::SnapshotMissing(_))
        ));
    }
}
