//! Pointer events and cursor styles fed in by the host.

use crate::geometry::Point;

/// Identifies the window or document a pointer event originated from.
///
/// The same note can be open in the main window and in popout windows at
/// once; a gesture started in one must not react to events from another.
/// Hosts assign each event context a stable id and tag every event with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventSource(pub u64);

impl EventSource {
    /// Source id for hosts that only ever have one window.
    pub const MAIN: EventSource = EventSource(0);
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// A pointer event translated by the host into modal-content coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Window/document the event came from.
    pub source: EventSource,
    /// Position relative to the modal content area's top-left corner.
    pub position: Point,
    /// Button held or released for down/up events; `Left` for moves.
    pub button: MouseButton,
}

impl PointerEvent {
    /// Create a left-button pointer event.
    pub fn new(source: EventSource, position: Point) -> Self {
        Self {
            source,
            position,
            button: MouseButton::Left,
        }
    }
}

/// Cursor styles the host should display, keyed off the interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    /// Plain arrow.
    Default,
    /// Open hand, image can be dragged.
    Grab,
    /// Closed hand, drag in progress.
    Grabbing,
    /// Crosshair for drawing and erasing.
    Crosshair,
    /// Text insertion cursor.
    Text,
}
