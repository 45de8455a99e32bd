//! Circular navigation across the images of one note.
//!
//! The host discovers which sibling images belong to the current note and
//! hands the engine an ordered list of ids. The gallery only tracks order
//! and the current position; resolving an id to pixels is the host's job.

use serde::{Deserialize, Serialize};

/// Opaque identifier for one image, assigned by the host.
///
/// Typically a vault path or URL; the engine never inspects it beyond
/// equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(String);

impl ImageId {
    /// Create an image id from its host-side key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The host-side key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered image list of one open modal, with wrapping navigation.
#[derive(Debug, Clone)]
pub struct Gallery {
    entries: Vec<ImageId>,
    current: usize,
}

impl Gallery {
    /// Gallery holding only the clicked image; navigation stays disabled.
    pub fn single(current: ImageId) -> Self {
        Self {
            entries: vec![current],
            current: 0,
        }
    }

    /// Build a gallery from the discovered sibling list.
    ///
    /// When the clicked image is missing from the discovered list (the
    /// discovery heuristic missed it), it is prepended at index 0 so the
    /// modal always opens on the image that was clicked.
    pub fn from_discovered(current: ImageId, discovered: Vec<ImageId>) -> Self {
        match discovered.iter().position(|id| *id == current) {
            Some(index) => Self {
                entries: discovered,
                current: index,
            },
            None => {
                log::debug!("Clicked image {} not in discovered list, prepending", current);
                let mut entries = Vec::with_capacity(discovered.len() + 1);
                entries.push(current);
                entries.extend(discovered);
                Self {
                    entries,
                    current: 0,
                }
            }
        }
    }

    /// Number of images in the gallery.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A gallery is never empty; both constructors guarantee one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether next/previous navigation is meaningful.
    pub fn can_navigate(&self) -> bool {
        self.entries.len() > 1
    }

    /// The image currently shown.
    pub fn current(&self) -> &ImageId {
        &self.entries[self.current]
    }

    /// Index of the current image.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// All image ids in gallery order.
    pub fn entries(&self) -> &[ImageId] {
        &self.entries
    }

    /// Advance to the next image (wrapping past the end).
    pub fn advance_next(&mut self) -> &ImageId {
        if self.can_navigate() {
            self.current = (self.current + 1) % self.entries.len();
        }
        self.current()
    }

    /// Go back to the previous image (wrapping past the start).
    pub fn advance_prev(&mut self) -> &ImageId {
        if self.can_navigate() {
            self.current = if self.current == 0 {
                self.entries.len() - 1
            } else {
                self.current - 1
            };
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ImageId> {
        names.iter().map(|n| ImageId::new(*n)).collect()
    }

    #[test]
    fn test_matched_current_keeps_discovered_order() {
        let gallery = Gallery::from_discovered(ImageId::new("b"), ids(&["a", "b", "c"]));
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.current_index(), 1);
        assert_eq!(gallery.current().as_str(), "b");
    }

    #[test]
    fn test_unmatched_current_prepended_at_zero() {
        let gallery = Gallery::from_discovered(ImageId::new("x"), ids(&["a", "b"]));
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.current_index(), 0);
        assert_eq!(gallery.current().as_str(), "x");
        assert_eq!(gallery.entries()[1].as_str(), "a");
    }

    #[test]
    fn test_navigation_wraps_both_directions() {
        let mut gallery = Gallery::from_discovered(ImageId::new("c"), ids(&["a", "b", "c"]));
        assert_eq!(gallery.advance_next().as_str(), "a");
        assert_eq!(gallery.advance_next().as_str(), "b");

        let mut gallery = Gallery::from_discovered(ImageId::new("a"), ids(&["a", "b", "c"]));
        assert_eq!(gallery.advance_prev().as_str(), "c");
        assert_eq!(gallery.advance_prev().as_str(), "b");
    }

    #[test]
    fn test_single_image_disables_navigation() {
        let mut gallery = Gallery::single(ImageId::new("only"));
        assert!(!gallery.can_navigate());
        assert_eq!(gallery.advance_next().as_str(), "only");
        assert_eq!(gallery.advance_prev().as_str(), "only");
        assert_eq!(gallery.current_index(), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut gallery = Gallery::from_discovered(ImageId::new("a"), ids(&["a", "b", "c"]));
        for _ in 0..3 {
            gallery.advance_next();
        }
        assert_eq!(gallery.current().as_str(), "a");
    }
}
