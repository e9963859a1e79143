// Hierarchy Module
// Logical scene index and visual tree mirror over the live entity graph

pub mod clipboard;
pub mod engine;
pub mod entry;
pub mod index;
pub mod paste;

pub use clipboard::{ClipboardOp, ClipboardService, MemoryClipboard};
pub use engine::HierarchyEngine;
pub use entry::{Entry, VisualNode};
pub use index::SceneIndex;
pub use paste::{PasteError, PasteOutcome};
