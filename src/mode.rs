//! Interaction modes for the modal.
//!
//! Exactly one mode is active at a time. Each mode answers two questions
//! through a single dispatch point: does it capture pointer events before
//! they reach the image, and which cursor should the host show.

use crate::event::CursorStyle;

/// The active interaction mode of an open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Pan and zoom the image; pointer events reach the image itself.
    #[default]
    View,
    /// Freehand drawing onto the annotation surface.
    Draw,
    /// Stamp typed text onto the annotation surface.
    Text,
    /// Erase previously drawn content.
    Erase,
}

impl InteractionMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::View => "View",
            InteractionMode::Draw => "Draw",
            InteractionMode::Text => "Text",
            InteractionMode::Erase => "Erase",
        }
    }

    /// Get all interaction modes.
    pub fn all() -> &'static [InteractionMode] {
        &[
            InteractionMode::View,
            InteractionMode::Draw,
            InteractionMode::Text,
            InteractionMode::Erase,
        ]
    }

    /// Whether pointer events are captured by the annotation overlay
    /// instead of reaching the image underneath.
    pub fn intercepts_pointer(&self) -> bool {
        !matches!(self, InteractionMode::View)
    }

    /// Whether this mode writes to the annotation surface.
    pub fn is_annotating(&self) -> bool {
        matches!(
            self,
            InteractionMode::Draw | InteractionMode::Text | InteractionMode::Erase
        )
    }

    /// The cursor the host should display while this mode is active
    /// and no gesture is in progress.
    pub fn cursor(&self) -> CursorStyle {
        match self {
            InteractionMode::View => CursorStyle::Grab,
            InteractionMode::Draw => CursorStyle::Crosshair,
            InteractionMode::Text => CursorStyle::Text,
            InteractionMode::Erase => CursorStyle::Crosshair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_view() {
        assert_eq!(InteractionMode::default(), InteractionMode::View);
    }

    #[test]
    fn test_view_passes_pointer_through() {
        assert!(!InteractionMode::View.intercepts_pointer());
        assert!(InteractionMode::Draw.intercepts_pointer());
        assert!(InteractionMode::Text.intercepts_pointer());
        assert!(InteractionMode::Erase.intercepts_pointer());
    }

    #[test]
    fn test_annotating_modes() {
        assert!(!InteractionMode::View.is_annotating());
        for mode in InteractionMode::all() {
            if *mode != InteractionMode::View {
                assert!(mode.is_annotating(), "{} should annotate", mode.name());
            }
        }
    }

    #[test]
    fn test_cursor_per_mode() {
        assert_eq!(InteractionMode::View.cursor(), CursorStyle::Grab);
        assert_eq!(InteractionMode::Draw.cursor(), CursorStyle::Crosshair);
        assert_eq!(InteractionMode::Erase.cursor(), CursorStyle::Crosshair);
        assert_eq!(InteractionMode::Text.cursor(), CursorStyle::Text);
    }
}
