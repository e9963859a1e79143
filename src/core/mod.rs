// Ember Editor Core Module
// Shared identifiers, configuration and cross-boundary events

pub mod config;
pub mod events;
pub mod ids;

pub use config::{ConfigError, EditorConfig};
pub use events::SceneEvent;
pub use ids::{EntityId, SceneId};
