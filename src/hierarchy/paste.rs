// Clipboard-Driven Paste
// Mark / resolve / apply state machine layered on the hierarchy engine

use log::{debug, warn};
use thiserror::Error;

use crate::core::{EntityId, SceneId};
use crate::hierarchy::clipboard::{ClipboardOp, ClipboardService};
use crate::hierarchy::engine::HierarchyEngine;
use crate::scene::SceneProvider;

/// What a paste invocation amounted to. Failures degrade to `Skipped` with
/// a log line; nothing in the paste path panics or unwinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    Applied,
    Skipped,
}

/// Why a paste did not apply. Only `UnresolvedObjects` is worth a warning;
/// the rest are everyday no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasteError {
    #[error("no clipboard operation is pending")]
    NothingPending,
    #[error("clipboard holds no text payload")]
    EmptyClipboard,
    #[error("clipboard text is not an entity id")]
    MalformedClipboard,
    #[error("entity pasted onto itself")]
    SelfPaste,
    #[error("paste target lies inside the pasted subtree")]
    CyclicPaste,
    #[error("paste aborted; found: {found:?}, missing: {missing:?}")]
    UnresolvedObjects {
        found: Vec<&'static str>,
        missing: Vec<&'static str>,
    },
}

impl PasteError {
    fn unresolved(missing: &[&'static str]) -> Self {
        Self::UnresolvedObjects {
            found: Vec::new(),
            missing: missing.to_vec(),
        }
    }
}

/// Destination shape of a paste: onto an entry, or onto a scene's root zone.
enum PasteTarget {
    Entity(EntityId),
    SceneRoot(SceneId),
}

impl HierarchyEngine {
    /// Marks an entry for a one-shot move. The payload is the entity id in
    /// canonical string form, exactly what lands on the OS clipboard.
    pub fn cut(&mut self, entity: EntityId) {
        self.clipboard_mut()
            .set(&entity.to_string(), ClipboardOp::Move);
        debug!("cut entity {entity}");
    }

    /// Marks an entry for repeatable copy.
    pub fn copy(&mut self, entity: EntityId) {
        self.clipboard_mut()
            .set(&entity.to_string(), ClipboardOp::Copy);
        debug!("copied entity {entity}");
    }

    pub fn paste_into_entity(&mut self, target: EntityId) -> PasteOutcome {
        let result = self.try_paste(PasteTarget::Entity(target));
        log_paste_result(result)
    }

    pub fn paste_into_scene(&mut self, scene: SceneId) -> PasteOutcome {
        let result = self.try_paste(PasteTarget::SceneRoot(scene));
        log_paste_result(result)
    }

    /// Resolve phase: reads the clipboard and parses the payload as an
    /// entity id. Anything that is not a guid never errors visibly.
    fn resolve_clipboard(&self) -> Result<(EntityId, ClipboardOp), PasteError> {
        let op = self.clipboard().operation();
        if op == ClipboardOp::None {
            return Err(PasteError::NothingPending);
        }
        let text = self.clipboard().text().ok_or(PasteError::EmptyClipboard)?;
        let source = EntityId::parse(&text).ok_or(PasteError::MalformedClipboard)?;
        Ok((source, op))
    }

    fn try_paste(&mut self, target: PasteTarget) -> Result<(), PasteError> {
        let (source, op) = self.resolve_clipboard()?;
        match op {
            ClipboardOp::Move => self.apply_move_paste(source, target),
            ClipboardOp::Copy => self.apply_copy_paste(source, target),
            ClipboardOp::None => Err(PasteError::NothingPending),
        }
    }

    /// Checks that every object the paste needs resolves, collecting the
    /// full found/missing picture for the diagnostic before aborting.
    fn validate_paste_objects(
        &self,
        source: EntityId,
        target: &PasteTarget,
    ) -> Result<(), PasteError> {
        let mut checks: Vec<(bool, &'static str)> = vec![
            (self.containing_index(source).is_some(), "source entry"),
            (
                self.provider().entity_scene(source).is_some(),
                "source entity",
            ),
        ];
        match target {
            PasteTarget::Entity(id) => {
                checks.push((self.containing_index(*id).is_some(), "target entry"));
                checks.push((self.provider().entity_scene(*id).is_some(), "target entity"));
            }
            PasteTarget::SceneRoot(scene) => {
                checks.push((self.index(*scene).is_some(), "target scene"));
            }
        }

        let mut found = Vec::new();
        let mut missing = Vec::new();
        for (ok, label) in checks {
            if ok {
                found.push(label);
            } else {
                missing.push(label);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PasteError::UnresolvedObjects { found, missing })
        }
    }

    fn apply_move_paste(&mut self, source: EntityId, target: PasteTarget) -> Result<(), PasteError> {
        self.validate_paste_objects(source, &target)?;
        match target {
            PasteTarget::Entity(id) => {
                if source == id {
                    return Err(PasteError::SelfPaste);
                }
                if self.is_in_subtree(id, source) {
                    return Err(PasteError::CyclicPaste);
                }
                self.move_to_entity(source, id);
            }
            PasteTarget::SceneRoot(scene) => {
                self.move_to_scene_root(source, scene);
            }
        }
        // a completed Move is one-shot; repeat pastes do nothing
        self.clipboard_mut().clear_operation();
        Ok(())
    }

    /// Clones the source subtree under the target, then migrates the fresh
    /// entries into the target scene when the clone landed elsewhere. The
    /// clipboard keeps its Copy tag, so pasting again clones again.
    fn apply_copy_paste(&mut self, source: EntityId, target: PasteTarget) -> Result<(), PasteError> {
        self.validate_paste_objects(source, &target)?;
        if let PasteTarget::Entity(id) = &target {
            // cloning into the subtree being walked would never terminate
            if *id != source && self.is_in_subtree(*id, source) {
                return Err(PasteError::CyclicPaste);
            }
        }
        let source_scene = self
            .containing_scene(source)
            .ok_or_else(|| PasteError::unresolved(&["source entry"]))?;
        let (parent, dest_scene) = match target {
            PasteTarget::Entity(id) => {
                let scene = self
                    .containing_scene(id)
                    .ok_or_else(|| PasteError::unresolved(&["target entry"]))?;
                (Some(id), scene)
            }
            PasteTarget::SceneRoot(scene) => (None, scene),
        };

        let clone = self
            .clone_subtree(source, parent)
            .ok_or_else(|| PasteError::unresolved(&["source entity"]))?;

        if dest_scene != source_scene {
            let mut plan = Vec::new();
            self.collect_subtree(clone, &mut plan);
            self.migrate_visual_node(clone, source_scene, parent, dest_scene);
            self.migrate_entry_tree(source_scene, dest_scene, &[clone]);
            for &id in &plan {
                let target_entry = if id == clone { parent } else { None };
                self.migrate_entry_index(id, source_scene, target_entry, Some(dest_scene));
            }
        }
        if let Some(target_entry) = parent {
            self.set_new_parent(target_entry, &[clone]);
        }
        Ok(())
    }
}

fn log_paste_result(result: Result<(), PasteError>) -> PasteOutcome {
    match result {
        Ok(()) => PasteOutcome::Applied,
        Err(err) => {
            match err {
                PasteError::UnresolvedObjects { .. } => warn!("{err}"),
                _ => debug!("paste ignored: {err}"),
            }
            PasteOutcome::Skipped
        }
    }
}
