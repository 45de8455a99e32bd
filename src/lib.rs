//! Lightbox - the view-transform and annotation engine behind an image modal.
//!
//! A note-taking host opens one [`ModalSession`] per image modal, forwards
//! pointer, wheel, and keyboard events into it, and renders from its
//! accessors: the composed image transform, the image's screen rectangle,
//! the annotation overlay pixmap, and the cursor to show. Host chrome
//! (buttons, windows, settings persistence, sibling-image discovery) stays
//! outside, reached through the collaborator traits in [`host`].

pub mod constants;
pub mod error;
pub mod event;
pub mod gallery;
pub mod gesture;
pub mod geometry;
pub mod host;
pub mod image;
pub mod keys;
pub mod mode;
pub mod session;
pub mod settings;
pub mod surface;
mod text;
pub mod transform;

pub use error::{ClipboardError, SurfaceError};
pub use event::{CursorStyle, EventSource, MouseButton, PointerEvent};
pub use gallery::{Gallery, ImageId};
pub use gesture::{GestureState, ResizeDirection};
pub use geometry::{Point, Rect, Size};
pub use host::{ClipboardSink, NoticeSink, ResourceResolver, TextPrompt};
pub use self::image::{decode_bitmap, ImageBitmap};
pub use keys::{KeyAction, KeyBindings, KeyCode};
pub use mode::InteractionMode;
pub use session::{LoadTicket, ModalSession};
pub use settings::ViewerSettings;
pub use surface::{AnnotationSurface, Brush};
pub use transform::ViewTransform;
