// Ember Editor Core Events
// Notifications crossing the live-scene / hierarchy boundary

use crate::core::ids::{EntityId, SceneId};

/// Structural notification emitted by the live scene graph.
///
/// The hierarchy engine drains these in emission order and reacts by
/// creating or destroying the matching entry and visual node. "Silent"
/// mutations used during migration never emit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    EntityAdded { scene: SceneId, entity: EntityId },
    EntityRemoved { scene: SceneId, entity: EntityId },
}
