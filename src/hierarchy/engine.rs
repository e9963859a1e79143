// Hierarchy Engine
// Keeps the per-scene entry indexes and their visual tree mirrors consistent
// with the live entity graph under add/remove/reparent/migration

use log::{debug, info, warn};

use crate::core::{EditorConfig, EntityId, SceneEvent, SceneId};
use crate::hierarchy::clipboard::ClipboardService;
use crate::hierarchy::entry::Entry;
use crate::hierarchy::index::SceneIndex;
use crate::scene::SceneProvider;

/// Coordinates every hierarchy mutation: reactions to live-scene add/remove
/// events, rename, reparent, intra- and cross-scene moves, subtree
/// duplication, subscene lifecycle, and the clipboard operations layered on
/// top in `paste.rs`.
///
/// The engine owns its scene indexes outright; the live graph and the
/// clipboard are injected capabilities, never global state.
pub struct HierarchyEngine {
    provider: Box<dyn SceneProvider>,
    clipboard: Box<dyn ClipboardService>,
    config: EditorConfig,
    /// Main scene index first, then subscene indexes in creation order.
    indexes: Vec<SceneIndex>,
    selected: Option<EntityId>,
    context_entry: Option<EntityId>,
    pending_delete: Option<EntityId>,
}

impl HierarchyEngine {
    /// Builds the engine around an existing main scene, indexing whatever
    /// the live graph already contains.
    pub fn new(
        mut provider: Box<dyn SceneProvider>,
        clipboard: Box<dyn ClipboardService>,
        config: EditorConfig,
        main_scene: SceneId,
    ) -> Self {
        let name = provider
            .scene_name(main_scene)
            .unwrap_or_else(|| "Scene".to_string());
        // the initial population below covers the creation backlog
        provider.drain_events();

        let mut engine = Self {
            provider,
            clipboard,
            config,
            indexes: vec![SceneIndex::new(main_scene, name)],
            selected: None,
            context_entry: None,
            pending_delete: None,
        };
        for entity in engine.provider.entities(main_scene) {
            engine.on_entity_added(main_scene, entity);
        }
        info!(
            "hierarchy engine ready: {} entries in the main scene",
            engine.main_index().len()
        );
        engine
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn indexes(&self) -> &[SceneIndex] {
        &self.indexes
    }

    pub fn main_index(&self) -> &SceneIndex {
        &self.indexes[0]
    }

    pub fn subscene_indexes(&self) -> &[SceneIndex] {
        &self.indexes[1..]
    }

    pub fn index(&self, scene: SceneId) -> Option<&SceneIndex> {
        self.indexes.iter().find(|index| index.scene_id() == scene)
    }

    /// The live graph behind the engine. Callers that mutate through it must
    /// call [`HierarchyEngine::pump_events`] afterwards.
    pub fn provider(&self) -> &dyn SceneProvider {
        self.provider.as_ref()
    }

    pub fn provider_mut(&mut self) -> &mut dyn SceneProvider {
        self.provider.as_mut()
    }

    pub fn clipboard(&self) -> &dyn ClipboardService {
        self.clipboard.as_ref()
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn ClipboardService {
        self.clipboard.as_mut()
    }

    /// Index owning the entry, searching the main scene first and then the
    /// subscenes in registration order. Relies on ids being globally unique.
    pub fn containing_index(&self, entity: EntityId) -> Option<&SceneIndex> {
        self.indexes.iter().find(|index| index.contains(entity))
    }

    pub fn containing_scene(&self, entity: EntityId) -> Option<SceneId> {
        self.containing_index(entity).map(|index| index.scene_id())
    }

    fn index_pos(&self, scene: SceneId) -> Option<usize> {
        self.indexes
            .iter()
            .position(|index| index.scene_id() == scene)
    }

    fn containing_pos(&self, entity: EntityId) -> Option<usize> {
        self.indexes.iter().position(|index| index.contains(entity))
    }

    // ---- live-scene reactions ------------------------------------------

    /// Drains the provider's pending notifications and applies each one.
    pub fn pump_events(&mut self) {
        for event in self.provider.drain_events() {
            match event {
                SceneEvent::EntityAdded { scene, entity } => self.on_entity_added(scene, entity),
                SceneEvent::EntityRemoved { scene, entity } => {
                    self.on_entity_removed(scene, entity)
                }
            }
        }
    }

    /// Builds the entry and visual node for a reported entity. The visual
    /// hangs under the parent's visual when the parent is already indexed
    /// here, otherwise at the scene roots. Hidden entities are skipped
    /// unless the config says otherwise. Idempotent for known ids.
    pub fn on_entity_added(&mut self, scene: SceneId, entity: EntityId) {
        if !self.config.show_hidden && self.provider.entity_hidden(entity) {
            return;
        }
        let Some(pos) = self.index_pos(scene) else {
            return;
        };
        if self.indexes[pos].contains(entity) {
            return;
        }
        let name = self
            .provider
            .entity_name(entity)
            .unwrap_or_else(|| "Entity".to_string());
        let parent = self.provider.entity_parent(entity);

        let index = &mut self.indexes[pos];
        index.push_entry(Entry::new(entity, &name, parent));
        index.attach_visual(entity, parent);
        debug!("indexed entity {name} ({entity})");
    }

    /// Drops the entry and visual for a removed entity. Silently returns
    /// when the id is unknown (tolerant of double removal). Children are
    /// not removed; they keep a dangling parent id.
    pub fn on_entity_removed(&mut self, scene: SceneId, entity: EntityId) {
        let Some(pos) = self.index_pos(scene) else {
            return;
        };
        if !self.indexes[pos].contains(entity) {
            return;
        }
        self.indexes[pos].detach_visual(entity);
        self.indexes[pos].remove_entry(entity);
        self.forget_transient(entity);
        debug!("dropped entry for {entity}");
    }

    fn forget_transient(&mut self, entity: EntityId) {
        if self.selected == Some(entity) {
            self.selected = None;
        }
        if self.context_entry == Some(entity) {
            self.context_entry = None;
        }
        if self.pending_delete == Some(entity) {
            self.pending_delete = None;
        }
    }

    // ---- parent linkage and migration primitives -----------------------

    /// Points each moved entry (and its live entity) at `target`. Does not
    /// touch visual placement; pairing that up is the caller's job. No-op
    /// when the target does not resolve.
    pub fn set_new_parent(&mut self, target: EntityId, moved: &[EntityId]) {
        if self.containing_pos(target).is_none() {
            return;
        }
        for &id in moved {
            if let Some(pos) = self.containing_pos(id) {
                if let Some(entry) = self.indexes[pos].find_entry_mut(id) {
                    entry.parent_id = Some(target);
                }
            }
            self.provider.set_entity_parent(id, Some(target));
        }
    }

    fn clear_parent(&mut self, moved: &[EntityId]) {
        for &id in moved {
            if let Some(pos) = self.containing_pos(id) {
                if let Some(entry) = self.indexes[pos].find_entry_mut(id) {
                    entry.parent_id = None;
                }
            }
            self.provider.set_entity_parent(id, None);
        }
    }

    /// Rehomes one visual node across scenes: detached from its current
    /// parent or the source roots, attached under `target`'s visual or the
    /// target roots. Same-scene calls return immediately; intra-scene
    /// placement is handled by the reparent path.
    pub fn migrate_visual_node(
        &mut self,
        source: EntityId,
        source_scene: SceneId,
        target: Option<EntityId>,
        target_scene: SceneId,
    ) {
        if source_scene == target_scene {
            return;
        }
        let Some(spos) = self.index_pos(source_scene) else {
            return;
        };
        let Some(tpos) = self.index_pos(target_scene) else {
            return;
        };
        self.indexes[spos].detach_visual(source);
        self.indexes[tpos].attach_visual(source, target);
    }

    /// Silently moves the live entities behind each listed entry, and the
    /// whole subtree below it, into the target scene's entity list. The
    /// subtree is snapshotted from the visual children before the first
    /// mutation so the walk never reads a half-migrated tree.
    pub fn migrate_entry_tree(
        &mut self,
        source_scene: SceneId,
        target_scene: SceneId,
        entries: &[EntityId],
    ) {
        if source_scene == target_scene {
            return;
        }
        if self.index_pos(source_scene).is_none() || self.index_pos(target_scene).is_none() {
            return;
        }
        let mut plan = Vec::new();
        for &id in entries {
            self.collect_subtree(id, &mut plan);
        }
        for &id in &plan {
            self.provider.move_entity_silent(id, target_scene);
        }
    }

    /// Moves one entry record between `entries` collections. The entry
    /// carries its visual node with it; visual placement is handled by
    /// [`HierarchyEngine::migrate_visual_node`].
    pub fn migrate_entry_index(
        &mut self,
        source: EntityId,
        source_scene: SceneId,
        target: Option<EntityId>,
        target_scene: Option<SceneId>,
    ) {
        let dest = target
            .and_then(|id| self.containing_scene(id))
            .or(target_scene);
        let Some(dest) = dest else {
            return;
        };
        if dest == source_scene {
            return;
        }
        let Some(spos) = self.index_pos(source_scene) else {
            return;
        };
        let Some(tpos) = self.index_pos(dest) else {
            return;
        };
        if let Some(entry) = self.indexes[spos].remove_entry(source) {
            self.indexes[tpos].push_entry(entry);
        }
    }

    /// Depth-first subtree snapshot over visual children, root included.
    pub(crate) fn collect_subtree(&self, id: EntityId, out: &mut Vec<EntityId>) {
        out.push(id);
        let children: Vec<EntityId> = self
            .containing_index(id)
            .and_then(|index| index.find_entry(id))
            .map(|entry| entry.visual.children().to_vec())
            .unwrap_or_default();
        for child in children {
            self.collect_subtree(child, out);
        }
    }

    /// True when `node` sits inside the subtree rooted at `root` (root
    /// included). Guards reparent and paste against cycles.
    pub(crate) fn is_in_subtree(&self, node: EntityId, root: EntityId) -> bool {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if current == node {
                return true;
            }
            if let Some(entry) = self
                .containing_index(current)
                .and_then(|index| index.find_entry(current))
            {
                stack.extend_from_slice(entry.visual.children());
            }
        }
        false
    }

    // ---- composed moves -------------------------------------------------

    /// Hangs `source` (with its whole subtree) under `target`, across
    /// scenes if needed. Visuals move first, then the live entities, then
    /// index membership, then the parent linkage.
    pub fn move_to_entity(&mut self, source: EntityId, target: EntityId) {
        if source == target {
            debug!("ignoring reparent of {source} onto itself");
            return;
        }
        let Some(source_scene) = self.containing_scene(source) else {
            return;
        };
        let Some(target_scene) = self.containing_scene(target) else {
            return;
        };
        if self.is_in_subtree(target, source) {
            debug!("ignoring reparent of {source} into its own subtree");
            return;
        }

        if source_scene == target_scene {
            let Some(pos) = self.index_pos(source_scene) else {
                return;
            };
            self.indexes[pos].detach_visual(source);
            self.indexes[pos].attach_visual(source, Some(target));
            self.set_new_parent(target, &[source]);
            return;
        }

        let mut plan = Vec::new();
        self.collect_subtree(source, &mut plan);

        self.migrate_visual_node(source, source_scene, Some(target), target_scene);
        self.migrate_entry_tree(source_scene, target_scene, &[source]);
        for &id in &plan {
            let target_entry = if id == source { Some(target) } else { None };
            self.migrate_entry_index(id, source_scene, target_entry, Some(target_scene));
        }
        self.set_new_parent(target, &[source]);
        info!("moved entity {source} across scenes ({} entries)", plan.len());
    }

    /// Hangs `source` (with its whole subtree) at the root of `scene`.
    pub fn move_to_scene_root(&mut self, source: EntityId, scene: SceneId) {
        let Some(source_scene) = self.containing_scene(source) else {
            return;
        };
        if self.index_pos(scene).is_none() {
            return;
        }

        if source_scene == scene {
            let Some(pos) = self.index_pos(scene) else {
                return;
            };
            self.indexes[pos].detach_visual(source);
            self.indexes[pos].attach_visual(source, None);
            self.clear_parent(&[source]);
            return;
        }

        let mut plan = Vec::new();
        self.collect_subtree(source, &mut plan);

        self.migrate_visual_node(source, source_scene, None, scene);
        self.migrate_entry_tree(source_scene, scene, &[source]);
        for &id in &plan {
            self.migrate_entry_index(id, source_scene, None, Some(scene));
        }
        self.clear_parent(&[source]);
        info!("moved entity {source} to scene root ({} entries)", plan.len());
    }

    /// Drag-complete handler: drops each payload entry onto `target`.
    pub fn reparent_to(&mut self, target: EntityId, moved: &[EntityId]) {
        for &id in moved {
            self.move_to_entity(id, target);
        }
    }

    /// Drag-complete handler for drops onto a scene's root zone.
    pub fn reparent_to_root(&mut self, scene: SceneId, moved: &[EntityId]) {
        for &id in moved {
            self.move_to_scene_root(id, scene);
        }
    }

    // ---- entity lifecycle ----------------------------------------------

    /// Creates an entity through the live graph and indexes it.
    pub fn spawn_entity(
        &mut self,
        scene: SceneId,
        name: &str,
        parent: Option<EntityId>,
    ) -> EntityId {
        let id = self.provider.create_entity(scene, name, parent);
        self.pump_events();
        info!("spawned entity {name} ({id})");
        id
    }

    /// Resyncs the entry name, visual label and live entity together.
    pub fn rename_entity(&mut self, entity: EntityId, name: &str) {
        self.provider.set_entity_name(entity, name);
        if let Some(pos) = self.containing_pos(entity) {
            let index = &mut self.indexes[pos];
            if let Some(entry) = index.find_entry_mut(entity) {
                entry.rename(name);
            }
            index.bump();
        }
    }

    /// Starts the delete flow. With `confirm_delete` set the entity is
    /// parked until [`HierarchyEngine::confirm_delete`]; otherwise it is
    /// destroyed immediately.
    pub fn request_delete(&mut self, entity: EntityId) {
        if self.config.confirm_delete {
            self.pending_delete = Some(entity);
        } else {
            self.destroy_entity(entity);
        }
    }

    pub fn pending_delete(&self) -> Option<EntityId> {
        self.pending_delete
    }

    pub fn confirm_delete(&mut self) {
        if let Some(entity) = self.pending_delete.take() {
            self.destroy_entity(entity);
        }
    }

    /// The user declined the dialog; nothing happens.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    fn destroy_entity(&mut self, entity: EntityId) {
        self.provider.destroy_entity(entity);
        self.pump_events();
    }

    /// Clones the entity and its whole subtree next to the original, under
    /// the same parent. Returns the clone's id.
    pub fn duplicate_entity(&mut self, source: EntityId) -> Option<EntityId> {
        let parent = self
            .containing_index(source)?
            .find_entry(source)?
            .parent_id;
        let clone = self.clone_subtree(source, parent)?;
        info!("duplicated entity {source} as {clone}");
        Some(clone)
    }

    /// Recursive engine-level deep clone: duplicates `source` under
    /// `parent`, then repeats for every visual child. The child list is
    /// snapshotted before the first duplication.
    pub(crate) fn clone_subtree(
        &mut self,
        source: EntityId,
        parent: Option<EntityId>,
    ) -> Option<EntityId> {
        let children: Vec<EntityId> = self
            .containing_index(source)
            .and_then(|index| index.find_entry(source))
            .map(|entry| entry.visual.children().to_vec())
            .unwrap_or_default();

        let clone = self.provider.duplicate_entity(source, parent)?;
        self.pump_events();
        for child in children {
            self.clone_subtree(child, Some(clone));
        }
        Some(clone)
    }

    // ---- subscene lifecycle --------------------------------------------

    /// Creates a live subscene and its (empty) index.
    pub fn add_subscene(&mut self, name: &str) -> SceneId {
        let scene = self.provider.create_scene(name);
        self.indexes.push(SceneIndex::new(scene, name.to_string()));
        info!("added subscene {name} ({scene})");
        scene
    }

    /// Tears a subscene down after the user confirmed: its entries and
    /// visuals are discarded with the index, and the backing live entities
    /// are destroyed with the scene.
    pub fn remove_subscene(&mut self, scene: SceneId) {
        if scene == self.main_index().scene_id() {
            warn!("refusing to remove the main scene");
            return;
        }
        let Some(pos) = self.index_pos(scene) else {
            return;
        };
        let index = self.indexes.remove(pos);
        for entry in index.entries() {
            self.forget_transient(entry.id);
        }
        self.provider.destroy_scene(scene);
        info!("removed subscene {} ({} entries)", index.name(), index.len());
    }

    // ---- transient UI context ------------------------------------------

    pub fn select(&mut self, entity: Option<EntityId>) {
        self.selected = entity;
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Remembers the entry behind the last context-menu invocation.
    pub fn set_context_entry(&mut self, entity: Option<EntityId>) {
        self.context_entry = entity;
    }

    pub fn context_entry(&self) -> Option<EntityId> {
        self.context_entry
    }

    pub fn set_expanded(&mut self, entity: EntityId, expanded: bool) {
        if let Some(pos) = self.containing_pos(entity) {
            let index = &mut self.indexes[pos];
            if let Some(entry) = index.find_entry_mut(entity) {
                entry.visual.is_expanded = expanded;
            }
            index.bump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::clipboard::MemoryClipboard;
    use crate::scene::MemoryScene;
    use std::collections::HashMap;

    fn engine_with_main() -> (HierarchyEngine, SceneId) {
        let mut live = MemoryScene::new();
        let main = live.create_scene("Main Scene");
        let mut config = EditorConfig::default();
        config.confirm_delete = false;
        let engine = HierarchyEngine::new(
            Box::new(live),
            Box::new(MemoryClipboard::new()),
            config,
            main,
        );
        (engine, main)
    }

    /// Every entry has exactly one visual placement, and children mirror parent ids.
    fn assert_mirror_consistent(engine: &HierarchyEngine) {
        for index in engine.indexes() {
            let mut placements: HashMap<EntityId, usize> = HashMap::new();
            for &root in index.roots() {
                *placements.entry(root).or_default() += 1;
            }
            for entry in index.entries() {
                for &child in entry.visual.children() {
                    *placements.entry(child).or_default() += 1;
                }
            }
            for entry in index.entries() {
                assert_eq!(
                    placements.get(&entry.id).copied().unwrap_or(0),
                    1,
                    "entry {} must be placed exactly once",
                    entry.name
                );
                let mut expected: Vec<String> = index
                    .find_children(entry.id)
                    .iter()
                    .map(|e| e.id.to_string())
                    .collect();
                let mut actual: Vec<String> = entry
                    .visual
                    .children()
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                expected.sort();
                actual.sort();
                assert_eq!(actual, expected, "children of {} mirror parent ids", entry.name);
            }
            assert_eq!(placements.len(), index.len(), "no stray visuals");
        }
    }

    /// An entity is indexed by exactly one scene at any time.
    fn assert_single_membership(engine: &HierarchyEngine, entity: EntityId) {
        let owners = engine
            .indexes()
            .iter()
            .filter(|index| index.contains(entity))
            .count();
        assert_eq!(owners, 1, "entity {entity} must live in exactly one index");
    }

    #[test]
    fn child_hangs_under_parent_visual() {
        let (mut engine, main) = engine_with_main();
        let e1 = engine.spawn_entity(main, "E1", None);
        let e2 = engine.spawn_entity(main, "E2", Some(e1));

        let index = engine.main_index();
        assert_eq!(index.roots(), &[e1]);
        let root = index.find_entry(e1).unwrap();
        assert_eq!(root.visual.children(), &[e2]);
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn initial_population_indexes_existing_entities() {
        let mut live = MemoryScene::new();
        let main = live.create_scene("Main");
        let root = live.create_entity(main, "Root", None);
        let child = live.create_entity(main, "Child", Some(root));
        let engine = HierarchyEngine::new(
            Box::new(live),
            Box::new(MemoryClipboard::new()),
            EditorConfig::default(),
            main,
        );

        assert_eq!(engine.main_index().len(), 2);
        assert_eq!(engine.main_index().roots(), &[root]);
        assert_eq!(
            engine.main_index().find_parent(child).map(|e| e.id),
            Some(root)
        );
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn hidden_entities_are_skipped_unless_configured() {
        let mut live = MemoryScene::new();
        let main = live.create_scene("Main");
        let visible = live.create_entity(main, "Visible", None);
        let helper = live.create_entity(main, "Editor Camera", None);
        live.set_hidden(helper, true);

        let engine = HierarchyEngine::new(
            Box::new(live),
            Box::new(MemoryClipboard::new()),
            EditorConfig::default(),
            main,
        );
        assert!(engine.main_index().contains(visible));
        assert!(!engine.main_index().contains(helper));

        let mut live = MemoryScene::new();
        let main = live.create_scene("Main");
        let helper = live.create_entity(main, "Editor Camera", None);
        live.set_hidden(helper, true);
        let mut config = EditorConfig::default();
        config.show_hidden = true;
        let engine = HierarchyEngine::new(
            Box::new(live),
            Box::new(MemoryClipboard::new()),
            config,
            main,
        );
        assert!(engine.main_index().contains(helper));
    }

    #[test]
    fn removal_does_not_cascade_to_children() {
        let (mut engine, main) = engine_with_main();
        let e1 = engine.spawn_entity(main, "E1", None);
        let e2 = engine.spawn_entity(main, "E2", Some(e1));

        engine.request_delete(e1); // confirm_delete disabled in the fixture

        let index = engine.main_index();
        assert!(index.find_entry(e1).is_none());
        // the child entry survives with a dangling parent id
        let orphan = index.find_entry(e2).unwrap();
        assert_eq!(orphan.parent_id, Some(e1));
        assert!(index.find_parent(e2).is_none());
        // and its visual is no longer reachable from the roots
        assert!(!index.roots().contains(&e2));
    }

    #[test]
    fn removal_of_unknown_entity_is_a_no_op() {
        let (mut engine, main) = engine_with_main();
        let e1 = engine.spawn_entity(main, "E1", None);
        let revision = engine.main_index().revision();

        engine.on_entity_removed(main, EntityId::new());
        engine.on_entity_removed(main, e1);
        engine.on_entity_removed(main, e1); // double removal

        assert_eq!(engine.main_index().len(), 0);
        assert!(engine.main_index().revision() > revision);
    }

    #[test]
    fn pump_reacts_to_provider_side_mutations() {
        let (mut engine, main) = engine_with_main();
        let id = engine.provider_mut().create_entity(main, "External", None);
        assert!(!engine.main_index().contains(id));

        engine.pump_events();
        assert!(engine.main_index().contains(id));
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn rename_resyncs_entry_visual_and_live_entity() {
        let (mut engine, main) = engine_with_main();
        let id = engine.spawn_entity(main, "Old", None);
        let revision = engine.main_index().revision();

        engine.rename_entity(id, "New");

        let entry = engine.main_index().find_entry(id).unwrap();
        assert_eq!(entry.name, "New");
        assert_eq!(entry.visual.label, "New");
        assert_eq!(engine.provider().entity_name(id).as_deref(), Some("New"));
        assert!(engine.main_index().revision() > revision);
    }

    #[test]
    fn intra_scene_reparent_rehangs_the_visual() {
        let (mut engine, main) = engine_with_main();
        let a = engine.spawn_entity(main, "A", None);
        let b = engine.spawn_entity(main, "B", None);
        let child = engine.spawn_entity(main, "Child", Some(a));

        engine.reparent_to(b, &[child]);

        let index = engine.main_index();
        assert!(index.find_entry(a).unwrap().visual.children().is_empty());
        assert_eq!(index.find_entry(b).unwrap().visual.children(), &[child]);
        assert_eq!(index.find_entry(child).unwrap().parent_id, Some(b));
        assert_eq!(engine.provider().entity_parent(child), Some(b));
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn reparent_onto_self_or_descendant_is_skipped() {
        let (mut engine, main) = engine_with_main();
        let root = engine.spawn_entity(main, "Root", None);
        let child = engine.spawn_entity(main, "Child", Some(root));
        let grandchild = engine.spawn_entity(main, "Grandchild", Some(child));

        engine.reparent_to(root, &[root]);
        engine.reparent_to(grandchild, &[root]);

        let index = engine.main_index();
        assert_eq!(index.roots(), &[root]);
        assert_eq!(index.find_entry(root).unwrap().parent_id, None);
        assert_eq!(index.find_entry(child).unwrap().parent_id, Some(root));
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn cross_scene_move_migrates_the_whole_subtree() {
        let (mut engine, main) = engine_with_main();
        let root = engine.spawn_entity(main, "Root", None);
        let child = engine.spawn_entity(main, "Child", Some(root));
        let side = engine.add_subscene("Side");
        let anchor = engine.spawn_entity(side, "Anchor", None);

        engine.move_to_entity(root, anchor);

        assert!(!engine.main_index().contains(root));
        assert!(!engine.main_index().contains(child));
        let side_index = engine.index(side).unwrap();
        assert_eq!(side_index.find_entry(root).unwrap().parent_id, Some(anchor));
        assert_eq!(side_index.find_entry(child).unwrap().parent_id, Some(root));
        assert_eq!(
            side_index.find_entry(anchor).unwrap().visual.children(),
            &[root]
        );
        // the live entities followed silently
        assert_eq!(engine.provider().entity_scene(root), Some(side));
        assert_eq!(engine.provider().entity_scene(child), Some(side));
        assert_single_membership(&engine, root);
        assert_single_membership(&engine, child);
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn cross_scene_move_to_root_clears_the_parent() {
        let (mut engine, main) = engine_with_main();
        let parent = engine.spawn_entity(main, "Parent", None);
        let mover = engine.spawn_entity(main, "Mover", Some(parent));
        let side = engine.add_subscene("Side");

        engine.move_to_scene_root(mover, side);

        let side_index = engine.index(side).unwrap();
        assert_eq!(side_index.roots(), &[mover]);
        assert_eq!(side_index.find_entry(mover).unwrap().parent_id, None);
        assert_eq!(engine.provider().entity_parent(mover), None);
        assert!(engine
            .main_index()
            .find_entry(parent)
            .unwrap()
            .visual
            .children()
            .is_empty());
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn duplicate_clones_the_subtree_with_fresh_ids() {
        let (mut engine, main) = engine_with_main();
        let root = engine.spawn_entity(main, "Root", None);
        let child = engine.spawn_entity(main, "Child", Some(root));

        let clone = engine.duplicate_entity(root).unwrap();

        assert_ne!(clone, root);
        let index = engine.main_index();
        assert_eq!(index.roots(), &[root, clone]);
        let clone_children = index.find_entry(clone).unwrap().visual.children().to_vec();
        assert_eq!(clone_children.len(), 1);
        assert_ne!(clone_children[0], child);
        assert_eq!(
            index.find_entry(clone_children[0]).unwrap().name,
            "Child"
        );
        // the original subtree is untouched
        assert_eq!(index.find_entry(root).unwrap().visual.children(), &[child]);
        assert_mirror_consistent(&engine);
    }

    #[test]
    fn confirm_delete_flow_parks_and_destroys() {
        let mut live = MemoryScene::new();
        let main = live.create_scene("Main");
        let mut engine = HierarchyEngine::new(
            Box::new(live),
            Box::new(MemoryClipboard::new()),
            EditorConfig::default(), // confirm_delete on
            main,
        );
        let id = engine.spawn_entity(main, "Doomed", None);

        engine.request_delete(id);
        assert_eq!(engine.pending_delete(), Some(id));
        engine.cancel_delete();
        assert_eq!(engine.pending_delete(), None);
        assert!(engine.main_index().contains(id));

        engine.request_delete(id);
        engine.confirm_delete();
        assert!(!engine.main_index().contains(id));
        assert_eq!(engine.provider().entity_name(id), None);
    }

    #[test]
    fn removing_a_subscene_destroys_its_entities_and_selection() {
        let (mut engine, main) = engine_with_main();
        let side = engine.add_subscene("Side");
        let id = engine.spawn_entity(side, "Resident", None);
        engine.select(Some(id));
        engine.set_context_entry(Some(id));

        engine.remove_subscene(side);

        assert!(engine.index(side).is_none());
        assert_eq!(engine.subscene_indexes().len(), 0);
        assert_eq!(engine.provider().entity_name(id), None);
        assert_eq!(engine.selected(), None);
        assert_eq!(engine.context_entry(), None);

        // the main scene cannot be removed
        engine.remove_subscene(main);
        assert_eq!(engine.indexes().len(), 1);
    }

    #[test]
    fn set_new_parent_ignores_an_unresolved_target() {
        let (mut engine, main) = engine_with_main();
        let id = engine.spawn_entity(main, "Node", None);

        engine.set_new_parent(EntityId::new(), &[id]);

        assert_eq!(engine.main_index().find_entry(id).unwrap().parent_id, None);
        assert_eq!(engine.provider().entity_parent(id), None);
    }

    #[test]
    fn expansion_state_is_tracked_per_visual() {
        let (mut engine, main) = engine_with_main();
        let id = engine.spawn_entity(main, "Node", None);
        assert!(engine.main_index().find_entry(id).unwrap().visual.is_expanded);

        engine.set_expanded(id, false);
        assert!(!engine.main_index().find_entry(id).unwrap().visual.is_expanded);
    }
}
