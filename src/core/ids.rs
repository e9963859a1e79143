// Ember Editor Core Ids
// Stable identifiers shared by the live scene graph and the hierarchy index

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one live entity. Stable across rename, reparent and
/// cross-scene migration; equal to the backing entity's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the canonical string form used as the clipboard payload.
    /// Returns `None` for anything that is not a uuid.
    pub fn parse(text: &str) -> Option<Self> {
        Uuid::parse_str(text.trim()).ok().map(Self)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one scene (main or subscene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(Uuid);

impl SceneId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_round_trips_through_canonical_form() {
        let id = EntityId::new();
        assert_eq!(EntityId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn entity_id_parse_tolerates_whitespace() {
        let id = EntityId::new();
        let padded = format!("  {id}\n");
        assert_eq!(EntityId::parse(&padded), Some(id));
    }

    #[test]
    fn entity_id_parse_rejects_garbage() {
        assert_eq!(EntityId::parse("not-a-guid"), None);
        assert_eq!(EntityId::parse(""), None);
    }
}
