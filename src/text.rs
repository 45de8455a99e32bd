//! System font lookup for text stamping.
//!
//! The surface stamps text with whatever sans-serif face the system offers.
//! Lookup runs once per surface and is cached; a machine without usable
//! fonts degrades text stamping to a logged no-op rather than an error.

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use rusttype::Font;

/// Lazily resolved system font for one annotation surface.
#[derive(Default)]
pub struct FontStore {
    font: Option<Font<'static>>,
    resolved: bool,
}

impl FontStore {
    /// Create a store that has not looked anything up yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The system font, resolving it on first use.
    pub fn get(&mut self) -> Option<&Font<'static>> {
        if !self.resolved {
            self.resolved = true;
            self.font = load_system_font();
            if self.font.is_none() {
                log::warn!("No usable system font found; text stamping is disabled");
            }
        }
        self.font.as_ref()
    }
}

fn load_system_font() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let query = Query {
        families: &[Family::SansSerif],
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db.query(&query)?;
    let face = db.face(id)?;

    match &face.source {
        Source::File(path) => {
            let bytes = std::fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        Source::SharedFile(path, _) => {
            let bytes = std::fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_runs_once() {
        let mut store = FontStore::new();
        let first = store.get().is_some();
        assert!(store.resolved);
        // Second call must agree with the first, whether or not a font
        // exists on this machine
        assert_eq!(store.get().is_some(), first);
    }
}
