//! In-progress pointer gestures.
//!
//! A modal tracks at most one gesture at a time. Every gesture records the
//! event source it started from, and move/up events from any other source
//! are ignored; with the same note open in a popout window, only the window
//! that started a drag may continue it.

use crate::constants::modal::{MIN_HEIGHT, MIN_WIDTH};
use crate::event::EventSource;
use crate::geometry::{Point, Size};

/// Which modal edge or corner a resize was grabbed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl ResizeDirection {
    /// Get all resize handles.
    pub fn all() -> &'static [ResizeDirection] {
        &[
            ResizeDirection::North,
            ResizeDirection::NorthEast,
            ResizeDirection::East,
            ResizeDirection::SouthEast,
            ResizeDirection::South,
            ResizeDirection::SouthWest,
            ResizeDirection::West,
            ResizeDirection::NorthWest,
        ]
    }

    /// Size of the modal after dragging this handle by the given pointer
    /// delta. East/south handles grow with positive deltas, west/north
    /// handles grow with negative ones; edge handles move one axis only.
    /// The result is clamped to the minimum modal size, without a maximum.
    pub fn apply(&self, start: Size, dx: f32, dy: f32) -> Size {
        let (dw, dh) = match self {
            ResizeDirection::North => (0.0, -dy),
            ResizeDirection::NorthEast => (dx, -dy),
            ResizeDirection::East => (dx, 0.0),
            ResizeDirection::SouthEast => (dx, dy),
            ResizeDirection::South => (0.0, dy),
            ResizeDirection::SouthWest => (-dx, dy),
            ResizeDirection::West => (-dx, 0.0),
            ResizeDirection::NorthWest => (-dx, -dy),
        };

        Size::new(
            (start.width + dw).max(MIN_WIDTH),
            (start.height + dh).max(MIN_HEIGHT),
        )
    }
}

/// State for the gesture currently in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,
    /// Dragging the image to pan it. Stores where the drag started and
    /// the pan offset at that moment, so each move recomputes the offset
    /// from scratch instead of accumulating deltas.
    Dragging {
        source: EventSource,
        start: Point,
        start_offset: Point,
    },
    /// Resizing the modal by one of its handles.
    Resizing {
        source: EventSource,
        start: Point,
        start_size: Size,
        direction: ResizeDirection,
    },
    /// A drawing or erasing stroke on the annotation surface.
    Annotating { source: EventSource },
}

impl Default for GestureState {
    fn default() -> Self {
        GestureState::Idle
    }
}

impl GestureState {
    /// Check if any gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }

    /// The event source that started the gesture, if one is active.
    pub fn source(&self) -> Option<EventSource> {
        match self {
            GestureState::Idle => None,
            GestureState::Dragging { source, .. }
            | GestureState::Resizing { source, .. }
            | GestureState::Annotating { source } => Some(*source),
        }
    }

    /// Whether an event from the given source may continue this gesture.
    pub fn accepts(&self, source: EventSource) -> bool {
        self.source() == Some(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_resize_both_axes() {
        let start = Size::new(400.0, 300.0);

        let grown = ResizeDirection::SouthEast.apply(start, 100.0, 50.0);
        assert_eq!(grown, Size::new(500.0, 350.0));

        // North-west grows when dragged up and left
        let grown = ResizeDirection::NorthWest.apply(start, -100.0, -50.0);
        assert_eq!(grown, Size::new(500.0, 350.0));
    }

    #[test]
    fn test_edge_resize_single_axis() {
        let start = Size::new(400.0, 300.0);

        let resized = ResizeDirection::East.apply(start, 80.0, 999.0);
        assert_eq!(resized, Size::new(480.0, 300.0));

        let resized = ResizeDirection::North.apply(start, 999.0, -60.0);
        assert_eq!(resized, Size::new(400.0, 360.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let start = Size::new(400.0, 300.0);
        let shrunk = ResizeDirection::SouthEast.apply(start, -1000.0, -1000.0);
        assert_eq!(shrunk, Size::new(MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_resize_has_no_maximum() {
        let start = Size::new(400.0, 300.0);
        let grown = ResizeDirection::SouthEast.apply(start, 10_000.0, 10_000.0);
        assert_eq!(grown, Size::new(10_400.0, 10_300.0));
    }

    #[test]
    fn test_gesture_source_gating() {
        let gesture = GestureState::Dragging {
            source: EventSource(1),
            start: Point::ZERO,
            start_offset: Point::ZERO,
        };

        assert!(gesture.is_active());
        assert!(gesture.accepts(EventSource(1)));
        assert!(!gesture.accepts(EventSource(2)));
        assert!(!GestureState::Idle.accepts(EventSource(1)));
    }
}
