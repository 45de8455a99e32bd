//! One open modal: state ownership, event routing, and synchronization.
//!
//! A [`ModalSession`] owns the view transform, the annotation surface, the
//! gallery position, and the in-flight gesture for a single modal. The host
//! forwards pointer, wheel, and key events into it and renders from its
//! accessors. Every mutation that can move the image's screen rectangle
//! funnels through one sync point so the surface never drifts out of lock.

use crate::constants::modal::{
    CONTROLS_HEIGHT, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH,
};
use crate::error::ClipboardError;
use crate::event::{CursorStyle, EventSource, PointerEvent};
use crate::gallery::Gallery;
use crate::gesture::{GestureState, ResizeDirection};
use crate::geometry::{Rect, Size};
use crate::host::{ClipboardSink, NoticeSink, ResourceResolver, TextPrompt};
use crate::image::ImageBitmap;
use crate::keys::{KeyAction, KeyBindings, KeyCode};
use crate::mode::InteractionMode;
use crate::settings::ViewerSettings;
use crate::surface::{AnnotationSurface, Brush};
use crate::transform::ViewTransform;

/// Identifies one pending image load.
///
/// Navigation issues a fresh ticket per swap; a load completing with a
/// stale ticket is ignored, which makes the load listener one-shot without
/// any cancellation machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// The engine state behind one open image modal.
pub struct ModalSession {
    transform: ViewTransform,
    surface: AnnotationSurface,
    mode: InteractionMode,
    gesture: GestureState,
    gallery: Gallery,
    settings: ViewerSettings,
    keys: KeyBindings,
    modal_size: Size,
    load_ticket: u64,
    resolver: Box<dyn ResourceResolver>,
    prompt: Box<dyn TextPrompt>,
    clipboard: Box<dyn ClipboardSink>,
    notices: Box<dyn NoticeSink>,
    closed: bool,
    close_requested: bool,
}

impl ModalSession {
    /// Open a session on the gallery's current image.
    ///
    /// The first load ticket is already pending; the host resolves
    /// [`Self::current_image_uri`], loads the bitmap, and completes with
    /// [`Self::finish_image_load`] and [`Self::pending_load`].
    pub fn new(
        gallery: Gallery,
        settings: ViewerSettings,
        resolver: Box<dyn ResourceResolver>,
        prompt: Box<dyn TextPrompt>,
        clipboard: Box<dyn ClipboardSink>,
        notices: Box<dyn NoticeSink>,
    ) -> Self {
        log::debug!(
            "Opening modal on {} ({} image(s))",
            gallery.current(),
            gallery.len()
        );
        Self {
            transform: ViewTransform::default(),
            surface: AnnotationSurface::new(),
            mode: InteractionMode::default(),
            gesture: GestureState::Idle,
            gallery,
            settings,
            keys: KeyBindings::default(),
            modal_size: Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            load_ticket: 1,
            resolver,
            prompt,
            clipboard,
            notices,
            closed: false,
            close_requested: false,
        }
    }

    // --- Image loading ---------------------------------------------------

    /// The ticket of the load currently awaited.
    pub fn pending_load(&self) -> LoadTicket {
        LoadTicket(self.load_ticket)
    }

    /// Loadable URI for the image currently shown, if the resolver knows it.
    pub fn current_image_uri(&self) -> Option<String> {
        self.resolver.resolve(self.gallery.current())
    }

    /// Complete an image load.
    ///
    /// A stale ticket (the user navigated on before the load finished) is
    /// ignored. A current ticket installs the natural size, optionally
    /// resizes the modal to match, refits the view, and clears the overlay.
    pub fn finish_image_load(&mut self, ticket: LoadTicket, bitmap: &ImageBitmap) {
        if ticket != self.pending_load() {
            log::debug!("Ignoring stale image load ({:?})", ticket);
            return;
        }

        self.transform = ViewTransform::new(bitmap.size());
        if self.settings.sync_modal_size {
            self.modal_size = Size::new(
                (bitmap.width() as f32).max(MIN_WIDTH),
                (bitmap.height() as f32 + CONTROLS_HEIGHT).max(MIN_HEIGHT),
            );
        }
        self.transform.reset_view(self.viewport());
        self.surface.clear();
        self.sync_surface();
    }

    // --- Navigation ------------------------------------------------------

    /// Move to the next image, wrapping past the end.
    ///
    /// Returns the new load ticket, or `None` in a single-image gallery.
    /// The overlay is cleared immediately; the transform reset waits for
    /// the load to complete so the old image stays placed until then.
    pub fn next_image(&mut self) -> Option<LoadTicket> {
        if self.closed || !self.gallery.can_navigate() {
            return None;
        }
        self.end_gesture();
        self.gallery.advance_next();
        Some(self.begin_image_load())
    }

    /// Move to the previous image, wrapping past the start.
    pub fn previous_image(&mut self) -> Option<LoadTicket> {
        if self.closed || !self.gallery.can_navigate() {
            return None;
        }
        self.end_gesture();
        self.gallery.advance_prev();
        Some(self.begin_image_load())
    }

    fn begin_image_load(&mut self) -> LoadTicket {
        self.load_ticket += 1;
        self.surface.clear();
        log::debug!(
            "Loading image {} (ticket {})",
            self.gallery.current(),
            self.load_ticket
        );
        self.pending_load()
    }

    // --- View operations -------------------------------------------------

    /// Zoom in by the configured increment.
    pub fn zoom_in(&mut self) {
        self.transform.zoom_in(self.settings.zoom_increment);
        self.sync_surface();
    }

    /// Zoom out by the configured increment, clamped at the zoom floor.
    pub fn zoom_out(&mut self) {
        self.transform.zoom_out(self.settings.zoom_increment);
        self.sync_surface();
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate_left(&mut self) {
        self.transform.rotate_left();
        self.sync_surface();
    }

    /// Rotate a quarter turn clockwise.
    pub fn rotate_right(&mut self) {
        self.transform.rotate_right();
        self.sync_surface();
    }

    /// Reset rotation and pan and refit the image to the live viewport.
    pub fn reset_view(&mut self) {
        self.transform.reset_view(self.viewport());
        self.sync_surface();
    }

    /// Zoom by wheel. Positive deltas zoom in. Only active in view mode so
    /// a stray wheel over the drawing surface doesn't move the image.
    pub fn wheel(&mut self, delta: f32) {
        if self.closed || self.mode != InteractionMode::View {
            return;
        }
        if delta > 0.0 {
            self.zoom_in();
        } else if delta < 0.0 {
            self.zoom_out();
        }
    }

    // --- Pointer routing -------------------------------------------------

    /// Route a pointer press by the active mode.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        if self.closed {
            return;
        }
        match self.mode {
            InteractionMode::View => {
                if self.image_rect().contains(event.position) {
                    self.gesture = GestureState::Dragging {
                        source: event.source,
                        start: event.position,
                        start_offset: self.transform.offset,
                    };
                }
            }
            InteractionMode::Draw => {
                let local = self.surface.to_local(event.position);
                self.surface.begin_stroke(local);
                self.gesture = GestureState::Annotating {
                    source: event.source,
                };
            }
            InteractionMode::Erase => {
                let local = self.surface.to_local(event.position);
                self.surface.begin_erase(local);
                self.gesture = GestureState::Annotating {
                    source: event.source,
                };
            }
            InteractionMode::Text => {
                // Single-shot: prompt, stamp, no gesture to track
                match self.prompt.prompt() {
                    Some(text) if !text.trim().is_empty() => {
                        let local = self.surface.to_local(event.position);
                        self.surface.stamp_text(local, &text);
                    }
                    _ => log::debug!("Text stamp cancelled"),
                }
            }
        }
    }

    /// Continue the in-flight gesture. Events from a window other than the
    /// one the gesture started in are ignored.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        if self.closed || !self.gesture.accepts(event.source) {
            return;
        }
        match self.gesture {
            GestureState::Dragging {
                start, start_offset, ..
            } => {
                self.transform.offset = start_offset.offset(
                    event.position.x - start.x,
                    event.position.y - start.y,
                );
                self.sync_surface();
            }
            GestureState::Resizing {
                start,
                start_size,
                direction,
                ..
            } => {
                self.modal_size = direction.apply(
                    start_size,
                    event.position.x - start.x,
                    event.position.y - start.y,
                );
                self.sync_surface();
            }
            GestureState::Annotating { .. } => {
                let local = self.surface.to_local(event.position);
                match self.mode {
                    InteractionMode::Draw => self.surface.extend_stroke(local),
                    InteractionMode::Erase => self.surface.extend_erase(local),
                    _ => {}
                }
            }
            GestureState::Idle => {}
        }
    }

    /// End the in-flight gesture on pointer release.
    pub fn pointer_up(&mut self, event: PointerEvent) {
        if self.gesture.accepts(event.source) {
            self.end_gesture();
        }
    }

    /// End the in-flight gesture when the pointer leaves the window that
    /// started it.
    pub fn pointer_leave(&mut self, source: EventSource) {
        if self.gesture.accepts(source) {
            self.end_gesture();
        }
    }

    /// Start resizing the modal from one of its eight handles.
    pub fn begin_resize(&mut self, direction: ResizeDirection, event: PointerEvent) {
        if self.closed {
            return;
        }
        self.end_gesture();
        self.gesture = GestureState::Resizing {
            source: event.source,
            start: event.position,
            start_size: self.modal_size,
            direction,
        };
    }

    fn end_gesture(&mut self) {
        if let GestureState::Annotating { .. } = self.gesture {
            match self.mode {
                InteractionMode::Erase => self.surface.end_erase(),
                _ => self.surface.end_stroke(),
            }
        }
        self.gesture = GestureState::Idle;
    }

    // --- Modes and keys --------------------------------------------------

    /// The active interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switch interaction mode, ending any in-flight gesture first.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode == mode {
            return;
        }
        self.end_gesture();
        log::debug!("Mode {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
    }

    /// Toggle between draw mode and view mode.
    pub fn toggle_draw(&mut self) {
        let next = if self.mode == InteractionMode::Draw {
            InteractionMode::View
        } else {
            InteractionMode::Draw
        };
        self.set_mode(next);
    }

    /// Handle a key press.
    ///
    /// The binding table is consulted only while shortcuts are enabled in
    /// the settings, except for the close key, which always works.
    pub fn handle_key(&mut self, key: KeyCode) {
        if self.closed {
            return;
        }
        let Some(action) = self.keys.action_for_key(key) else {
            return;
        };
        if action != KeyAction::CloseModal && !self.settings.enable_keyboard_shortcuts {
            return;
        }
        match action {
            KeyAction::ZoomIn => self.zoom_in(),
            KeyAction::ZoomOut => self.zoom_out(),
            KeyAction::RotateLeft => self.rotate_left(),
            KeyAction::RotateRight => self.rotate_right(),
            KeyAction::Reset => self.reset_view(),
            KeyAction::NextImage => {
                self.next_image();
            }
            KeyAction::PreviousImage => {
                self.previous_image();
            }
            KeyAction::CopyImage => self.copy_current_image(),
            KeyAction::ToggleDraw => self.toggle_draw(),
            KeyAction::CloseModal => self.request_close(),
        }
    }

    /// The keybinding table.
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.keys
    }

    /// Mutable access for hosts that let users rebind keys.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.keys
    }

    // --- Clipboard and annotations ---------------------------------------

    /// Copy the current image to the clipboard.
    ///
    /// Both outcomes surface as a notice; failures are logged and never
    /// propagated.
    pub fn copy_current_image(&mut self) {
        match self.try_copy() {
            Ok(()) => self.notices.notice("Image copied to clipboard"),
            Err(e) => {
                log::warn!("Copy failed: {e}");
                self.notices.notice("Failed to copy image");
            }
        }
    }

    fn try_copy(&mut self) -> Result<(), ClipboardError> {
        let current = self.gallery.current();
        let uri = self.resolver.resolve(current).ok_or_else(|| {
            ClipboardError::Unavailable(format!("No source for image {current}"))
        })?;
        let bytes = self.resolver.read(&uri)?;
        self.clipboard.copy_image(&bytes)
    }

    /// Wipe the annotation overlay and confirm it to the user.
    pub fn clear_annotations(&mut self) {
        self.end_gesture();
        self.surface.clear();
        self.notices.notice("Drawing cleared");
    }

    /// The active brush.
    pub fn brush(&self) -> Brush {
        self.surface.brush()
    }

    /// Replace the active brush.
    pub fn set_brush(&mut self, brush: Brush) {
        self.surface.set_brush(brush);
    }

    // --- Lifecycle -------------------------------------------------------

    /// Ask the host to close the modal; picked up via
    /// [`Self::take_close_request`].
    pub fn request_close(&mut self) {
        self.end_gesture();
        self.close_requested = true;
    }

    /// Consume a pending close request, if any.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    /// Close the session, tearing down any in-flight gesture.
    pub fn close(&mut self) {
        self.end_gesture();
        self.closed = true;
        log::debug!("Modal closed on {}", self.gallery.current());
    }

    /// Whether the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // --- Geometry and render state ---------------------------------------

    /// Current modal size.
    pub fn modal_size(&self) -> Size {
        self.modal_size
    }

    /// Install a new modal size (host window resized), clamped to the
    /// minimums, and re-lock the overlay.
    pub fn set_modal_size(&mut self, size: Size) {
        self.modal_size = Size::new(size.width.max(MIN_WIDTH), size.height.max(MIN_HEIGHT));
        self.sync_surface();
    }

    /// The image viewport: the modal minus the control bar.
    pub fn viewport(&self) -> Size {
        Size::new(
            self.modal_size.width,
            (self.modal_size.height - CONTROLS_HEIGHT).max(0.0),
        )
    }

    /// The view transform state.
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Composed transform for the image element, for the host renderer.
    pub fn transform_matrix(&self) -> tiny_skia::Transform {
        self.transform.matrix(self.viewport())
    }

    /// The image's current screen rectangle in viewport coordinates.
    pub fn image_rect(&self) -> Rect {
        self.transform.screen_rect(self.viewport())
    }

    /// The annotation overlay.
    pub fn surface(&self) -> &AnnotationSurface {
        &self.surface
    }

    /// The overlay's raster content, if allocated.
    pub fn surface_pixmap(&self) -> Option<&tiny_skia::Pixmap> {
        self.surface.pixmap()
    }

    /// The cursor the host should show right now.
    pub fn cursor(&self) -> CursorStyle {
        if let GestureState::Dragging { .. } = self.gesture {
            CursorStyle::Grabbing
        } else {
            self.mode.cursor()
        }
    }

    /// Whether next/previous controls should be enabled.
    pub fn can_navigate(&self) -> bool {
        self.gallery.can_navigate()
    }

    /// Whether the copy button should be shown.
    pub fn show_copy_button(&self) -> bool {
        self.settings.show_copy_button
    }

    /// The gallery backing this session.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// The settings this session reads.
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Re-lock the annotation surface to the image's screen rectangle.
    /// Every transform or modal-size mutation ends up here.
    fn sync_surface(&mut self) {
        let rect = self.transform.screen_rect(self.viewport());
        if let Err(e) = self.surface.resync(rect) {
            log::warn!("Annotation surface out of sync: {e}");
        }
    }
}
