// Ember Editor
// Controller layer of the Ember Engine scene editor: a logical entry index
// and visual tree mirror kept in sync with the live entity graph

pub mod core;
pub mod hierarchy;
pub mod scene;

pub use crate::core::{EditorConfig, EntityId, SceneEvent, SceneId};
pub use crate::hierarchy::{
    ClipboardOp, ClipboardService, HierarchyEngine, MemoryClipboard, PasteError, PasteOutcome,
    SceneIndex,
};
pub use crate::scene::{MemoryScene, SceneProvider};
