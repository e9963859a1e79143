// Hierarchy Entries
// Logical tree node and the visual projection it owns

use crate::core::EntityId;

/// Display-side projection of one entry: the node a tree control binds to.
///
/// Owned exclusively by its [`Entry`]; the back-reference to the entry is a
/// plain id, never an owning link. Children are entry ids in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualNode {
    entry_id: EntityId,
    pub label: String,
    pub is_expanded: bool,
    children: Vec<EntityId>,
}

impl VisualNode {
    pub fn new(entry_id: EntityId, label: &str) -> Self {
        Self {
            entry_id,
            label: label.to_string(),
            // collapsing headers default to open, matching the tree control
            is_expanded: true,
            children: Vec::new(),
        }
    }

    pub fn entry_id(&self) -> EntityId {
        self.entry_id
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub(crate) fn attach_child(&mut self, child: EntityId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Removes the child if present; reports whether anything changed.
    pub(crate) fn detach_child(&mut self, child: EntityId) -> bool {
        match self.children.iter().position(|id| *id == child) {
            Some(pos) => {
                self.children.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// One entity's position in a scene: id, cached display name, parent link
/// and the exclusively owned visual node.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntityId,
    /// `None` means root-of-scene. A stale id is tolerated by lookups.
    pub parent_id: Option<EntityId>,
    pub name: String,
    pub visual: VisualNode,
}

impl Entry {
    pub fn new(id: EntityId, name: &str, parent_id: Option<EntityId>) -> Self {
        Self {
            id,
            parent_id,
            name: name.to_string(),
            visual: VisualNode::new(id, name),
        }
    }

    /// Resyncs the cached name and the visual label together.
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.visual.label = name.to_string();
    }
}
