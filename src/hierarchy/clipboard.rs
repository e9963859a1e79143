// Clipboard Service
// Text payload plus operation tag backing cut, copy and paste

/// Pending clipboard intent. `Move` is one-shot; `Copy` survives pastes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardOp {
    #[default]
    None,
    Move,
    Copy,
}

/// Contract for the system clipboard as this subsystem uses it: a text
/// payload (always an entity id in canonical string form) tagged with the
/// requested operation. Injected into the engine at construction.
pub trait ClipboardService {
    fn set(&mut self, text: &str, op: ClipboardOp);

    fn text(&self) -> Option<String>;

    fn operation(&self) -> ClipboardOp;

    /// Downgrades the tag to [`ClipboardOp::None`] after a completed Move.
    /// The text payload stays, matching OS clipboard behavior.
    fn clear_operation(&mut self);
}

/// Process-local clipboard for tests, the demo binary and headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    op: ClipboardOp,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardService for MemoryClipboard {
    fn set(&mut self, text: &str, op: ClipboardOp) {
        self.text = Some(text.to_string());
        self.op = op;
    }

    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn operation(&self) -> ClipboardOp {
        self.op
    }

    fn clear_operation(&mut self) {
        self.op = ClipboardOp::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_the_operation_keeps_the_text() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set("payload", ClipboardOp::Move);
        clipboard.clear_operation();

        assert_eq!(clipboard.operation(), ClipboardOp::None);
        assert_eq!(clipboard.text().as_deref(), Some("payload"));
    }

    #[test]
    fn a_fresh_clipboard_has_no_pending_operation() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.operation(), ClipboardOp::None);
        assert!(clipboard.text().is_none());
    }
}
