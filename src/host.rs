//! Collaborator traits the host implements, plus shipped adapters.
//!
//! The engine never touches host internals: every outward dependency goes
//! through one of these narrow traits. The adapters at the bottom cover the
//! common desktop case (filesystem resources, `arboard` clipboard, log
//! notices); hosts with their own plumbing implement the traits directly.

use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

use crate::error::ClipboardError;
use crate::gallery::ImageId;
use crate::image::decode_bitmap;

/// Resolves image identifiers to loadable resources.
pub trait ResourceResolver {
    /// A loadable URI for the image, or `None` if the id cannot be resolved.
    fn resolve(&self, id: &ImageId) -> Option<String>;

    /// The raw encoded bytes behind a URI. Used by clipboard copy.
    fn read(&self, uri: &str) -> io::Result<Vec<u8>>;
}

/// Collects a text string from the user for text stamping.
pub trait TextPrompt {
    /// Show a modal text-entry UI and return the entered string.
    /// `None` means the user cancelled; nothing is stamped.
    fn prompt(&mut self) -> Option<String>;
}

/// Accepts an encoded image blob for the OS clipboard.
pub trait ClipboardSink {
    /// Place the image on the clipboard. Failures are reported through the
    /// notice surface by the session, never raised to the host.
    fn copy_image(&mut self, bytes: &[u8]) -> Result<(), ClipboardError>;
}

/// Shows a transient on-screen message that auto-dismisses after ~2 s.
pub trait NoticeSink {
    fn notice(&mut self, message: &str);
}

/// Resolves image ids as file paths under a root directory.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    /// Create a resolver rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceResolver for FsResolver {
    fn resolve(&self, id: &ImageId) -> Option<String> {
        let path = self.root.join(id.as_str());
        if path.is_file() {
            Some(path.to_string_lossy().into_owned())
        } else {
            log::debug!("No file for image id {} under {:?}", id, self.root);
            None
        }
    }

    fn read(&self, uri: &str) -> io::Result<Vec<u8>> {
        std::fs::read(uri)
    }
}

/// Clipboard adapter backed by the `arboard` crate.
///
/// Decodes the blob and hands straight-alpha RGBA to the OS clipboard. A
/// clipboard connection is opened per copy; copies are rare enough that
/// holding one open is not worth the platform quirks.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ClipboardSink for ArboardClipboard {
    fn copy_image(&mut self, bytes: &[u8]) -> Result<(), ClipboardError> {
        let bitmap = decode_bitmap(bytes)?;

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        let image = arboard::ImageData {
            width: bitmap.width() as usize,
            height: bitmap.height() as usize,
            bytes: Cow::Borrowed(bitmap.pixels()),
        };
        clipboard
            .set_image(image)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// Notice sink that logs instead of rendering a toast. Useful for tests
/// and headless hosts.
#[derive(Debug, Default)]
pub struct LogNotice;

impl NoticeSink for LogNotice {
    fn notice(&mut self, message: &str) {
        log::info!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_resolver_resolves_existing_files() {
        let dir = std::env::temp_dir().join("lightbox-fs-resolver-test");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("pic.png");
        std::fs::write(&file, b"bytes").unwrap();

        let resolver = FsResolver::new(&dir);
        let uri = resolver.resolve(&ImageId::new("pic.png")).unwrap();
        assert_eq!(resolver.read(&uri).unwrap(), b"bytes");

        assert!(resolver.resolve(&ImageId::new("missing.png")).is_none());
        std::fs::remove_dir_all(&dir).ok();
    }
}
