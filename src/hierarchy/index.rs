// Scene Index
// Per-scene entry collection plus the root-level visual list

use crate::core::{EntityId, SceneId};
use crate::hierarchy::entry::Entry;

/// The entry and visual collections for one scene (main or subscene).
///
/// `entries` is ordered and unique by id; `roots` holds the visuals whose
/// entries have no parent, in display order. Every structural mutation bumps
/// `revision`, which is what a bound UI surface watches to redraw.
#[derive(Debug)]
pub struct SceneIndex {
    scene_id: SceneId,
    name: String,
    entries: Vec<Entry>,
    roots: Vec<EntityId>,
    revision: u64,
}

impl SceneIndex {
    pub fn new(scene_id: SceneId, name: String) -> Self {
        Self {
            scene_id,
            name,
            entries: Vec::new(),
            roots: Vec::new(),
            revision: 0,
        }
    }

    pub fn scene_id(&self) -> SceneId {
        self.scene_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.find_entry(id).is_some()
    }

    pub fn find_entry(&self, id: EntityId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn find_entry_mut(&mut self, id: EntityId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    /// Parent entry of `id`, or `None` when the entry is a root or its
    /// parent id no longer resolves here. An unresolved parent is "no
    /// parent", never an error.
    pub fn find_parent(&self, id: EntityId) -> Option<&Entry> {
        let parent_id = self.find_entry(id)?.parent_id?;
        self.find_entry(parent_id)
    }

    /// Entries whose parent id equals `id`, in index order.
    pub fn find_children(&self, id: EntityId) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.parent_id == Some(id))
            .collect()
    }

    /// Case-insensitive substring match over entry names, sorted by name.
    /// Backs the hierarchy panel's search box.
    pub fn find_by_name(&self, query: &str) -> Vec<&Entry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    pub(crate) fn push_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.bump();
    }

    pub(crate) fn remove_entry(&mut self, id: EntityId) -> Option<Entry> {
        let pos = self.entries.iter().position(|entry| entry.id == id)?;
        let entry = self.entries.remove(pos);
        self.bump();
        Some(entry)
    }

    /// Hangs `child`'s visual under `parent`'s visual, or at the scene roots
    /// when `parent` is `None` or does not resolve here.
    pub(crate) fn attach_visual(&mut self, child: EntityId, parent: Option<EntityId>) {
        match parent.and_then(|id| self.find_entry_mut(id)) {
            Some(entry) => entry.visual.attach_child(child),
            None => self.roots.push(child),
        }
        self.bump();
    }

    /// Unhooks `child`'s visual from the roots or from whichever visual
    /// currently lists it. Tolerates an already-detached child and a stale
    /// `parent_id`.
    pub(crate) fn detach_visual(&mut self, child: EntityId) {
        if let Some(pos) = self.roots.iter().position(|id| *id == child) {
            self.roots.remove(pos);
            self.bump();
            return;
        }
        for entry in self.entries.iter_mut() {
            if entry.visual.detach_child(child) {
                self.bump();
                return;
            }
        }
    }

    pub(crate) fn bump(&mut self) {
        self.revision += 1;
    }
}
