// In-Memory Scene Graph
// Reference SceneProvider backing the demo binary and the test suite

use log::debug;
use std::collections::HashMap;

use crate::core::{EntityId, SceneEvent, SceneId};
use crate::scene::SceneProvider;

#[derive(Debug, Clone)]
struct LiveEntity {
    name: String,
    parent: Option<EntityId>,
    hidden: bool,
    scene: SceneId,
}

#[derive(Debug, Clone)]
struct LiveScene {
    id: SceneId,
    name: String,
    /// Creation order; parents precede children.
    entities: Vec<EntityId>,
}

/// In-memory live entity graph. Implements the full [`SceneProvider`]
/// contract, including the silent moves used by cross-scene migration.
#[derive(Default)]
pub struct MemoryScene {
    scenes: Vec<LiveScene>,
    entities: HashMap<EntityId, LiveEntity>,
    events: Vec<SceneEvent>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags an entity hidden. Intended for engine-internal helpers (sky
    /// domes, editor cameras) that should never show up in the hierarchy.
    pub fn set_hidden(&mut self, entity: EntityId, hidden: bool) {
        if let Some(record) = self.entities.get_mut(&entity) {
            record.hidden = hidden;
        }
    }

    fn scene(&self, id: SceneId) -> Option<&LiveScene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    fn scene_mut(&mut self, id: SceneId) -> Option<&mut LiveScene> {
        self.scenes.iter_mut().find(|scene| scene.id == id)
    }
}

impl SceneProvider for MemoryScene {
    fn scene_name(&self, scene: SceneId) -> Option<String> {
        self.scene(scene).map(|scene| scene.name.clone())
    }

    fn entities(&self, scene: SceneId) -> Vec<EntityId> {
        self.scene(scene)
            .map(|scene| scene.entities.clone())
            .unwrap_or_default()
    }

    fn entity_name(&self, entity: EntityId) -> Option<String> {
        self.entities.get(&entity).map(|record| record.name.clone())
    }

    fn set_entity_name(&mut self, entity: EntityId, name: &str) {
        if let Some(record) = self.entities.get_mut(&entity) {
            record.name = name.to_string();
        }
    }

    fn entity_parent(&self, entity: EntityId) -> Option<EntityId> {
        self.entities.get(&entity).and_then(|record| record.parent)
    }

    fn set_entity_parent(&mut self, entity: EntityId, parent: Option<EntityId>) {
        if let Some(record) = self.entities.get_mut(&entity) {
            record.parent = parent;
        }
    }

    fn entity_hidden(&self, entity: EntityId) -> bool {
        self.entities
            .get(&entity)
            .map(|record| record.hidden)
            .unwrap_or(false)
    }

    fn entity_scene(&self, entity: EntityId) -> Option<SceneId> {
        self.entities.get(&entity).map(|record| record.scene)
    }

    fn create_scene(&mut self, name: &str) -> SceneId {
        let id = SceneId::new();
        self.scenes.push(LiveScene {
            id,
            name: name.to_string(),
            entities: Vec::new(),
        });
        debug!("created scene {name} ({id})");
        id
    }

    fn destroy_scene(&mut self, scene: SceneId) {
        let Some(pos) = self.scenes.iter().position(|record| record.id == scene) else {
            return;
        };
        let record = self.scenes.remove(pos);
        for entity in &record.entities {
            self.entities.remove(entity);
        }
        debug!(
            "destroyed scene {} with {} entities",
            record.name,
            record.entities.len()
        );
    }

    fn create_entity(&mut self, scene: SceneId, name: &str, parent: Option<EntityId>) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(
            id,
            LiveEntity {
                name: name.to_string(),
                parent,
                hidden: false,
                scene,
            },
        );
        if let Some(record) = self.scene_mut(scene) {
            record.entities.push(id);
        }
        self.events.push(SceneEvent::EntityAdded { scene, entity: id });
        id
    }

    fn destroy_entity(&mut self, entity: EntityId) {
        let Some(record) = self.entities.remove(&entity) else {
            return;
        };
        if let Some(scene) = self.scene_mut(record.scene) {
            scene.entities.retain(|id| *id != entity);
        }
        self.events.push(SceneEvent::EntityRemoved {
            scene: record.scene,
            entity,
        });
    }

    fn duplicate_entity(&mut self, source: EntityId, parent: Option<EntityId>) -> Option<EntityId> {
        let template = self.entities.get(&source)?.clone();
        let id = EntityId::new();
        self.entities.insert(
            id,
            LiveEntity {
                name: template.name,
                parent,
                hidden: template.hidden,
                scene: template.scene,
            },
        );
        if let Some(scene) = self.scene_mut(template.scene) {
            scene.entities.push(id);
        }
        self.events.push(SceneEvent::EntityAdded {
            scene: template.scene,
            entity: id,
        });
        Some(id)
    }

    fn move_entity_silent(&mut self, entity: EntityId, target: SceneId) {
        let Some(record) = self.entities.get_mut(&entity) else {
            return;
        };
        let previous = record.scene;
        if previous == target {
            return;
        }
        record.scene = target;
        if let Some(scene) = self.scene_mut(previous) {
            scene.entities.retain(|id| *id != entity);
        }
        if let Some(scene) = self.scene_mut(target) {
            scene.entities.push(entity);
        }
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy_emit_events_in_order() {
        let mut live = MemoryScene::new();
        let scene = live.create_scene("Main");
        let a = live.create_entity(scene, "A", None);
        let b = live.create_entity(scene, "B", Some(a));
        live.destroy_entity(b);

        let events = live.drain_events();
        assert_eq!(
            events,
            vec![
                SceneEvent::EntityAdded { scene, entity: a },
                SceneEvent::EntityAdded { scene, entity: b },
                SceneEvent::EntityRemoved { scene, entity: b },
            ]
        );
        assert!(live.drain_events().is_empty());
    }

    #[test]
    fn destroy_entity_does_not_cascade_to_children() {
        let mut live = MemoryScene::new();
        let scene = live.create_scene("Main");
        let parent = live.create_entity(scene, "Parent", None);
        let child = live.create_entity(scene, "Child", Some(parent));
        live.drain_events();

        live.destroy_entity(parent);

        assert_eq!(live.entity_name(parent), None);
        assert_eq!(live.entity_name(child).as_deref(), Some("Child"));
        // the child keeps its dangling parent reference
        assert_eq!(live.entity_parent(child), Some(parent));
        assert_eq!(
            live.drain_events(),
            vec![SceneEvent::EntityRemoved { scene, entity: parent }]
        );
    }

    #[test]
    fn silent_move_changes_scene_without_events() {
        let mut live = MemoryScene::new();
        let main = live.create_scene("Main");
        let side = live.create_scene("Side");
        let entity = live.create_entity(main, "Mover", None);
        live.drain_events();

        live.move_entity_silent(entity, side);

        assert_eq!(live.entity_scene(entity), Some(side));
        assert!(live.entities(main).is_empty());
        assert_eq!(live.entities(side), vec![entity]);
        assert!(live.drain_events().is_empty());
    }

    #[test]
    fn duplicate_lands_in_source_scene_with_fresh_id() {
        let mut live = MemoryScene::new();
        let scene = live.create_scene("Main");
        let target = live.create_entity(scene, "Target", None);
        let source = live.create_entity(scene, "Source", None);
        live.drain_events();

        let clone = live.duplicate_entity(source, Some(target)).unwrap();

        assert_ne!(clone, source);
        assert_eq!(live.entity_name(clone).as_deref(), Some("Source"));
        assert_eq!(live.entity_parent(clone), Some(target));
        assert_eq!(live.entity_scene(clone), Some(scene));
    }

    #[test]
    fn destroying_a_scene_removes_its_entities() {
        let mut live = MemoryScene::new();
        let main = live.create_scene("Main");
        let side = live.create_scene("Side");
        let keep = live.create_entity(main, "Keep", None);
        let drop = live.create_entity(side, "Drop", None);
        live.drain_events();

        live.destroy_scene(side);

        assert_eq!(live.scene_name(side), None);
        assert_eq!(live.entity_name(drop), None);
        assert_eq!(live.entity_name(keep).as_deref(), Some("Keep"));
        assert!(live.drain_events().is_empty());
    }
}
