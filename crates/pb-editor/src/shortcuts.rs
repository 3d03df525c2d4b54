//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s so the browser
//! bridge and native hosts share one table.
//!
//! - Single letters arm tools (pressing the armed tool's key again disarms)
//! - ⌘/Ctrl+Z undo, ⌘/Ctrl+Shift+Z or ⌘/Ctrl+Y redo
//! - Delete/Backspace remove the selection, Escape drops it

use crate::tools::ToolKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Arm (or disarm) a tool.
    Tool(ToolKind),

    // ── Edit ──
    Undo,
    Redo,
    Delete,
    /// Wipe the board down to the default ball.
    ClearAll,
    /// Flip the pitch between horizontal and vertical.
    ToggleOrientation,
    /// Switch the active team side.
    ToggleSide,

    // ── UI ──
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        // ── Modifier combos first (most specific) ──
        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "Delete" | "Backspace" => Some(ShortcutAction::ClearAll),
                _ => None,
            };
        }

        if shift {
            return match key {
                "O" | "o" => Some(ShortcutAction::ToggleOrientation),
                "H" | "h" => Some(ShortcutAction::ToggleSide),
                _ => None,
            };
        }

        // ── Single keys (no modifiers) ──
        let tool = match key {
            "p" | "P" => ToolKind::Player,
            "f" | "F" => ToolKind::Football,
            "k" | "K" => ToolKind::Cone,
            "l" | "L" => ToolKind::Line,
            "a" | "A" => ToolKind::Arrow,
            "b" | "B" => ToolKind::Box,
            "c" | "C" => ToolKind::Circle,
            "t" | "T" => ToolKind::Text,
            "x" | "X" => ToolKind::Delete,
            "v" | "V" => ToolKind::Select,
            "Delete" | "Backspace" => return Some(ShortcutAction::Delete),
            "Escape" => return Some(ShortcutAction::Deselect),
            _ => return None,
        };
        Some(ShortcutAction::Tool(tool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tool_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("v", false, false, false, false),
            Some(ShortcutAction::Tool(ToolKind::Select))
        );
        assert_eq!(
            ShortcutMap::resolve("P", false, false, false, false),
            Some(ShortcutAction::Tool(ToolKind::Player))
        );
        assert_eq!(
            ShortcutMap::resolve("a", false, false, false, false),
            Some(ShortcutAction::Tool(ToolKind::Arrow))
        );
        assert_eq!(
            ShortcutMap::resolve("t", false, false, false, false),
            Some(ShortcutAction::Tool(ToolKind::Text))
        );
    }

    #[test]
    fn resolve_undo_redo() {
        // Cmd+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
        // Ctrl+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(ShortcutAction::Undo)
        );
        // Cmd+Shift+Z → Redo
        assert_eq!(
            ShortcutMap::resolve("Z", false, true, false, true),
            Some(ShortcutAction::Redo)
        );
        // Ctrl+Y → Redo
        assert_eq!(
            ShortcutMap::resolve("y", true, false, false, false),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn resolve_delete() {
        assert_eq!(
            ShortcutMap::resolve("Delete", false, false, false, false),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, false),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", true, false, false, false),
            Some(ShortcutAction::ClearAll)
        );
    }

    #[test]
    fn resolve_shifted_toggles() {
        assert_eq!(
            ShortcutMap::resolve("O", false, true, false, false),
            Some(ShortcutAction::ToggleOrientation)
        );
        assert_eq!(
            ShortcutMap::resolve("H", false, true, false, false),
            Some(ShortcutAction::ToggleSide)
        );
    }

    #[test]
    fn resolve_unknown_key() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("7", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("v", false, false, false, true), None);
    }

    #[test]
    fn resolve_modifier_precedence() {
        assert_eq!(ShortcutMap::resolve("z", false, false, false, false), None);
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
    }

    #[test]
    fn resolve_escape() {
        assert_eq!(
            ShortcutMap::resolve("Escape", false, false, false, false),
            Some(ShortcutAction::Deselect)
        );
    }
}
