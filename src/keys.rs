//! Keyboard shortcuts for the modal.
//!
//! The host translates raw key events into [`KeyCode`]s and hands them to
//! the session, which consults the binding table. Bindings are host-owned
//! configuration like the rest of the settings; the defaults match the
//! control-bar buttons.

use serde::{Deserialize, Serialize};

/// Keys the modal can bind actions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    Plus,
    Minus,
    Key0,
    C,
    D,
    E,
    L,
    R,
    T,
    Escape,
}

/// Actions a key press can trigger inside the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    ZoomIn,
    ZoomOut,
    RotateLeft,
    RotateRight,
    Reset,
    NextImage,
    PreviousImage,
    CopyImage,
    ToggleDraw,
    CloseModal,
}

impl KeyAction {
    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::ZoomIn => "Zoom in",
            KeyAction::ZoomOut => "Zoom out",
            KeyAction::RotateLeft => "Rotate left",
            KeyAction::RotateRight => "Rotate right",
            KeyAction::Reset => "Reset view",
            KeyAction::NextImage => "Next image",
            KeyAction::PreviousImage => "Previous image",
            KeyAction::CopyImage => "Copy image",
            KeyAction::ToggleDraw => "Toggle drawing",
            KeyAction::CloseModal => "Close",
        }
    }

    /// Get all actions in display order.
    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::ZoomIn,
            KeyAction::ZoomOut,
            KeyAction::RotateLeft,
            KeyAction::RotateRight,
            KeyAction::Reset,
            KeyAction::NextImage,
            KeyAction::PreviousImage,
            KeyAction::CopyImage,
            KeyAction::ToggleDraw,
            KeyAction::CloseModal,
        ]
    }
}

/// Keybinding table for the modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Hotkey for zooming in
    pub zoom_in: KeyCode,
    /// Hotkey for zooming out
    pub zoom_out: KeyCode,
    /// Hotkey for rotating a quarter turn counter-clockwise
    pub rotate_left: KeyCode,
    /// Hotkey for rotating a quarter turn clockwise
    pub rotate_right: KeyCode,
    /// Hotkey for resetting the view
    pub reset: KeyCode,
    /// Hotkey for navigating to the next image
    pub next_image: KeyCode,
    /// Hotkey for navigating to the previous image
    pub previous_image: KeyCode,
    /// Hotkey for copying the image to the clipboard
    pub copy_image: KeyCode,
    /// Hotkey for toggling draw mode
    pub toggle_draw: KeyCode,
    /// Hotkey for closing the modal (active even when shortcuts are off)
    pub close: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            zoom_in: KeyCode::Plus,
            zoom_out: KeyCode::Minus,
            rotate_left: KeyCode::L,
            rotate_right: KeyCode::R,
            reset: KeyCode::Key0,
            next_image: KeyCode::Right,
            previous_image: KeyCode::Left,
            copy_image: KeyCode::C,
            toggle_draw: KeyCode::D,
            close: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action bound to a key press, if any.
    pub fn action_for_key(&self, key: KeyCode) -> Option<KeyAction> {
        KeyAction::all()
            .iter()
            .copied()
            .find(|action| self.key_for_action(*action) == key)
    }

    /// Get the hotkey bound to an action.
    pub fn key_for_action(&self, action: KeyAction) -> KeyCode {
        match action {
            KeyAction::ZoomIn => self.zoom_in,
            KeyAction::ZoomOut => self.zoom_out,
            KeyAction::RotateLeft => self.rotate_left,
            KeyAction::RotateRight => self.rotate_right,
            KeyAction::Reset => self.reset,
            KeyAction::NextImage => self.next_image,
            KeyAction::PreviousImage => self.previous_image,
            KeyAction::CopyImage => self.copy_image,
            KeyAction::ToggleDraw => self.toggle_draw,
            KeyAction::CloseModal => self.close,
        }
    }

    /// Set the hotkey for an action.
    pub fn set_key(&mut self, action: KeyAction, key: KeyCode) {
        match action {
            KeyAction::ZoomIn => self.zoom_in = key,
            KeyAction::ZoomOut => self.zoom_out = key,
            KeyAction::RotateLeft => self.rotate_left = key,
            KeyAction::RotateRight => self.rotate_right = key,
            KeyAction::Reset => self.reset = key,
            KeyAction::NextImage => self.next_image = key,
            KeyAction::PreviousImage => self.previous_image = key,
            KeyAction::CopyImage => self.copy_image = key,
            KeyAction::ToggleDraw => self.toggle_draw = key,
            KeyAction::CloseModal => self.close = key,
        }
    }

    /// Check if a key is already bound to another action.
    /// Returns the conflicting action's display name, if any.
    pub fn key_conflict(&self, key: KeyCode, exclude: Option<KeyAction>) -> Option<&'static str> {
        KeyAction::all()
            .iter()
            .copied()
            .filter(|action| Some(*action) != exclude)
            .find(|action| self.key_for_action(*action) == key)
            .map(|action| action.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.action_for_key(KeyCode::Right),
            Some(KeyAction::NextImage)
        );
        assert_eq!(
            bindings.action_for_key(KeyCode::Left),
            Some(KeyAction::PreviousImage)
        );
        assert_eq!(bindings.action_for_key(KeyCode::Plus), Some(KeyAction::ZoomIn));
        assert_eq!(
            bindings.action_for_key(KeyCode::Escape),
            Some(KeyAction::CloseModal)
        );
        assert_eq!(bindings.action_for_key(KeyCode::T), None);
    }

    #[test]
    fn test_rebinding() {
        let mut bindings = KeyBindings::new();
        bindings.set_key(KeyAction::ZoomIn, KeyCode::Up);
        assert_eq!(bindings.action_for_key(KeyCode::Up), Some(KeyAction::ZoomIn));
        assert_eq!(bindings.action_for_key(KeyCode::Plus), None);
    }

    #[test]
    fn test_key_conflict_detection() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.key_conflict(KeyCode::C, None), Some("Copy image"));
        assert_eq!(
            bindings.key_conflict(KeyCode::C, Some(KeyAction::CopyImage)),
            None
        );
        assert_eq!(bindings.key_conflict(KeyCode::Up, None), None);
    }

    #[test]
    fn test_every_action_has_a_key() {
        let bindings = KeyBindings::new();
        for action in KeyAction::all() {
            let key = bindings.key_for_action(*action);
            assert_eq!(bindings.action_for_key(key), Some(*action));
        }
    }
}
