// Live Scene Module
// Contract with the engine-side entity graph, plus its reference implementation

pub mod memory;

pub use memory::MemoryScene;

use crate::core::{EntityId, SceneEvent, SceneId};

/// Capability contract for the live entity graph the editor controls.
///
/// The hierarchy engine never reaches into engine internals or a global
/// kernel; everything it needs from the runtime goes through this trait,
/// injected at construction. Mutations made behind the engine's back must
/// surface through [`SceneProvider::drain_events`] before the next pump.
pub trait SceneProvider {
    /// Display name of a scene, if the scene exists.
    fn scene_name(&self, scene: SceneId) -> Option<String>;

    /// Entities of a scene in creation order (parents precede children).
    fn entities(&self, scene: SceneId) -> Vec<EntityId>;

    fn entity_name(&self, entity: EntityId) -> Option<String>;

    fn set_entity_name(&mut self, entity: EntityId, name: &str);

    fn entity_parent(&self, entity: EntityId) -> Option<EntityId>;

    /// Pushes a reparent into the live graph. `None` clears the parent.
    fn set_entity_parent(&mut self, entity: EntityId, parent: Option<EntityId>);

    /// Entities flagged hidden stay out of the editor hierarchy.
    fn entity_hidden(&self, entity: EntityId) -> bool;

    /// Scene the entity currently lives in.
    fn entity_scene(&self, entity: EntityId) -> Option<SceneId>;

    fn create_scene(&mut self, name: &str) -> SceneId;

    /// Destroys a scene together with every entity still living in it.
    /// Emits no events; the caller tears down its own bookkeeping.
    fn destroy_scene(&mut self, scene: SceneId);

    fn create_entity(&mut self, scene: SceneId, name: &str, parent: Option<EntityId>) -> EntityId;

    /// Destroys a single entity. Children are left in place with a dangling
    /// parent reference; removal does not cascade.
    fn destroy_entity(&mut self, entity: EntityId);

    /// Engine-level clone of one entity placed under `parent`, landing in
    /// the source's scene. Returns the clone's id.
    fn duplicate_entity(&mut self, source: EntityId, parent: Option<EntityId>) -> Option<EntityId>;

    /// Moves an entity between scene entity lists without firing the normal
    /// add/remove notifications. Used by cross-scene migration.
    fn move_entity_silent(&mut self, entity: EntityId, target: SceneId);

    /// Drains pending add/remove notifications in emission order.
    fn drain_events(&mut self) -> Vec<SceneEvent>;
}
