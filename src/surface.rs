//! The annotation overlay drawn on top of the image.
//!
//! The surface is a raster buffer sized to the image's current on-screen
//! rectangle, not its natural size: zooming in gives the pen more pixels to
//! work with, and the overlay never needs its own transform. The price is
//! that the buffer must be resynchronized after every transform change, and
//! a significant resize drops the drawn content (see [`AnnotationSurface::resync`]).

use rusttype::{point as glyph_origin, Scale};
use tiny_skia::{
    BlendMode, Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    Stroke, Transform,
};

use crate::constants::brush::{
    DEFAULT_COLOR, DEFAULT_WIDTH, ERASER_WIDTH_FACTOR, TEXT_STAMP_SIZE,
};
use crate::constants::surface::RESYNC_TOLERANCE_PX;
use crate::error::SurfaceError;
use crate::geometry::{Point, Rect};
use crate::text::FontStore;

/// Stroke color and width for drawing, erasing, and text stamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// Straight-alpha RGBA color.
    pub color: [u8; 4],
    /// Stroke width in surface pixels.
    pub width: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Brush {
    /// The eraser stamps and strokes at this width.
    fn eraser_width(&self) -> f32 {
        self.width * ERASER_WIDTH_FACTOR
    }
}

/// The drawing plane locked to the displayed image's screen rectangle.
///
/// Owns the raster buffer, the active brush, and the in-progress stroke
/// state. All drawing coordinates are surface-local; callers convert
/// viewport coordinates through [`AnnotationSurface::to_local`] first.
pub struct AnnotationSurface {
    /// Backing buffer; `None` until the image rectangle has a usable size.
    pixmap: Option<Pixmap>,
    /// Position and size relative to the shared modal container.
    rect: Rect,
    brush: Brush,
    /// Last point of the stroke or erase gesture in progress.
    last_point: Option<Point>,
    /// Blend mode for stroke segments. `Clear` while an erase gesture runs,
    /// restored to `SourceOver` when it ends.
    composite: BlendMode,
    fonts: FontStore,
}

impl Default for AnnotationSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationSurface {
    /// Create an empty surface with no backing buffer yet.
    pub fn new() -> Self {
        Self {
            pixmap: None,
            rect: Rect::default(),
            brush: Brush::default(),
            last_point: None,
            composite: BlendMode::SourceOver,
            fonts: FontStore::new(),
        }
    }

    /// Current position and size relative to the modal container.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The backing buffer, if one is allocated.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// The active brush.
    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Replace the active brush.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Convert a viewport coordinate into surface-local pixels.
    ///
    /// The surface moves on every pan, zoom, rotate, and modal resize, so
    /// every pointer coordinate must pass through here before drawing.
    pub fn to_local(&self, viewport_point: Point) -> Point {
        viewport_point.offset(-self.rect.x, -self.rect.y)
    }

    /// Re-lock the surface to the image's new screen rectangle.
    ///
    /// The buffer is reallocated at the rectangle's integral dimensions.
    /// When both axes moved by less than [`RESYNC_TOLERANCE_PX`] the old
    /// raster is copied back at the origin; a larger change means a new
    /// image or a deliberate resize, and the content is dropped instead of
    /// rescaled.
    pub fn resync(&mut self, image_rect: Rect) -> Result<(), SurfaceError> {
        self.rect = image_rect;

        let width = image_rect.width.round().max(0.0) as u32;
        let height = image_rect.height.round().max(0.0) as u32;
        if width == 0 || height == 0 {
            self.pixmap = None;
            return Ok(());
        }

        if let Some(existing) = &self.pixmap {
            if existing.width() == width && existing.height() == height {
                return Ok(());
            }
        }

        let mut fresh =
            Pixmap::new(width, height).ok_or(SurfaceError::Allocation { width, height })?;

        if let Some(old) = self.pixmap.take() {
            let dw = (old.width() as f32 - width as f32).abs();
            let dh = (old.height() as f32 - height as f32).abs();
            if dw < RESYNC_TOLERANCE_PX && dh < RESYNC_TOLERANCE_PX {
                fresh.draw_pixmap(
                    0,
                    0,
                    old.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            } else {
                log::debug!(
                    "Annotation buffer {}x{} -> {}x{}, dropping content",
                    old.width(),
                    old.height(),
                    width,
                    height
                );
            }
        }

        self.pixmap = Some(fresh);
        Ok(())
    }

    /// Start a freehand stroke at a surface-local point.
    pub fn begin_stroke(&mut self, point: Point) {
        self.last_point = Some(point);
    }

    /// Extend the stroke to a surface-local point, rendering the segment
    /// immediately. Long freehand paths accumulate one segment at a time.
    pub fn extend_stroke(&mut self, point: Point) {
        let Some(last) = self.last_point else { return };
        self.stroke_segment(last, point, self.brush.width);
        self.last_point = Some(point);
    }

    /// Finalize the stroke, discarding the in-progress path state.
    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    /// Start an erase gesture: switch to the subtractive composite and
    /// stamp a cleared circle at the point.
    pub fn begin_erase(&mut self, point: Point) {
        self.composite = BlendMode::Clear;
        self.last_point = Some(point);

        let Some(pixmap) = self.pixmap.as_mut() else { return };
        let Some(circle) = PathBuilder::from_circle(point.x, point.y, self.brush.eraser_width())
        else {
            return;
        };
        let paint = erase_paint();
        pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Extend the erase gesture with a cleared segment.
    pub fn extend_erase(&mut self, point: Point) {
        let Some(last) = self.last_point else { return };
        self.stroke_segment(last, point, self.brush.eraser_width());
        self.last_point = Some(point);
    }

    /// End the erase gesture, restoring the additive composite so a later
    /// draw stroke paints instead of clearing.
    pub fn end_erase(&mut self) {
        self.composite = BlendMode::SourceOver;
        self.last_point = None;
    }

    /// Stamp a text string at a surface-local point with the brush color
    /// and the fixed stamp size. A missing system font makes this a no-op.
    pub fn stamp_text(&mut self, point: Point, text: &str) {
        if text.is_empty() {
            return;
        }
        let Self { pixmap, fonts, brush, .. } = self;
        let Some(pixmap) = pixmap.as_mut() else { return };
        let Some(font) = fonts.get() else { return };

        let scale = Scale::uniform(TEXT_STAMP_SIZE);
        let ascent = font.v_metrics(scale).ascent;
        let start = glyph_origin(point.x, point.y + ascent);
        let [r, g, b, a] = brush.color;

        let width = pixmap.width();
        let height = pixmap.height();
        let data = pixmap.data_mut();

        for glyph in font.layout(text, scale, start) {
            let Some(bounds) = glyph.pixel_bounding_box() else { continue };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bounds.min.x;
                let py = gy as i32 + bounds.min.y;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    return;
                }
                let alpha = (coverage * a as f32) as u16;
                if alpha == 0 {
                    return;
                }

                // Premultiplied source-over into the RGBA buffer
                let src = [
                    (r as u16 * alpha / 255) as u8,
                    (g as u16 * alpha / 255) as u8,
                    (b as u16 * alpha / 255) as u8,
                    alpha as u8,
                ];
                let inverse = 255 - alpha;
                let index = ((py as u32 * width + px as u32) * 4) as usize;
                for channel in 0..4 {
                    let dst = data[index + channel] as u16;
                    data[index + channel] =
                        src[channel].saturating_add((dst * inverse / 255) as u8);
                }
            });
        }
    }

    /// Wipe the buffer to transparent without deallocating it.
    pub fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(Color::TRANSPARENT);
        }
        self.last_point = None;
    }

    /// Whether any pixel of the buffer is non-transparent.
    pub fn has_content(&self) -> bool {
        self.pixmap
            .as_ref()
            .is_some_and(|pixmap| pixmap.data().iter().any(|byte| *byte != 0))
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f32) {
        let Some(pixmap) = self.pixmap.as_mut() else { return };

        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else { return };

        let mut paint = if self.composite == BlendMode::Clear {
            erase_paint()
        } else {
            let mut paint = Paint::default();
            let [r, g, b, a] = self.brush.color;
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = true;
            paint
        };
        paint.blend_mode = self.composite;

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Paint for subtractive operations. Color is irrelevant with
/// `BlendMode::Clear`; only the coverage matters.
fn erase_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = true;
    paint.blend_mode = BlendMode::Clear;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_with_buffer(width: f32, height: f32) -> AnnotationSurface {
        let mut surface = AnnotationSurface::new();
        surface
            .resync(Rect::new(0.0, 0.0, width, height))
            .unwrap();
        surface
    }

    fn pixel(surface: &AnnotationSurface, x: u32, y: u32) -> [u8; 4] {
        let pixmap = surface.pixmap().unwrap();
        let index = ((y * pixmap.width() + x) * 4) as usize;
        let data = pixmap.data();
        [data[index], data[index + 1], data[index + 2], data[index + 3]]
    }

    fn draw_line(surface: &mut AnnotationSurface, from: Point, to: Point) {
        surface.begin_stroke(from);
        surface.extend_stroke(to);
        surface.end_stroke();
    }

    #[test]
    fn test_resync_allocates_to_rect_dimensions() {
        let mut surface = AnnotationSurface::new();
        assert!(surface.pixmap().is_none());

        surface
            .resync(Rect::new(40.0, 20.0, 300.0, 200.0))
            .unwrap();
        let pixmap = surface.pixmap().unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (300, 200));
        assert_eq!(surface.rect(), Rect::new(40.0, 20.0, 300.0, 200.0));
    }

    #[test]
    fn test_resync_zero_size_drops_buffer() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        surface.resync(Rect::new(0.0, 0.0, 0.0, 100.0)).unwrap();
        assert!(surface.pixmap().is_none());
    }

    #[test]
    fn test_resync_within_tolerance_keeps_content() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        draw_line(
            &mut surface,
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
        );
        assert!(surface.has_content());

        // 2 px on each axis is within tolerance: content survives
        surface
            .resync(Rect::new(0.0, 0.0, 102.0, 102.0))
            .unwrap();
        assert!(surface.has_content());
        assert_ne!(pixel(&surface, 20, 10)[3], 0);
    }

    #[test]
    fn test_resync_beyond_tolerance_drops_content() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        draw_line(
            &mut surface,
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
        );

        // 50 px on one axis is a real resize: content is dropped
        surface
            .resync(Rect::new(0.0, 0.0, 150.0, 102.0))
            .unwrap();
        assert!(!surface.has_content());
    }

    #[test]
    fn test_resync_same_size_repositions_only() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        draw_line(
            &mut surface,
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
        );

        surface
            .resync(Rect::new(55.0, 77.0, 100.0, 100.0))
            .unwrap();
        assert!(surface.has_content());
        assert_eq!(surface.rect(), Rect::new(55.0, 77.0, 100.0, 100.0));
    }

    #[test]
    fn test_to_local_subtracts_surface_origin() {
        let mut surface = AnnotationSurface::new();
        surface
            .resync(Rect::new(120.0, 80.0, 200.0, 100.0))
            .unwrap();
        let local = surface.to_local(Point::new(150.0, 90.0));
        assert_eq!(local, Point::new(30.0, 10.0));
    }

    #[test]
    fn test_stroke_renders_segment() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        draw_line(
            &mut surface,
            Point::new(10.0, 50.0),
            Point::new(90.0, 50.0),
        );
        // A point in the middle of the segment is painted with the brush
        assert_ne!(pixel(&surface, 50, 50)[3], 0);
        // A far corner stays transparent
        assert_eq!(pixel(&surface, 5, 5)[3], 0);
    }

    #[test]
    fn test_extend_without_begin_is_noop() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        surface.extend_stroke(Point::new(50.0, 50.0));
        surface.extend_erase(Point::new(50.0, 50.0));
        assert!(!surface.has_content());
    }

    #[test]
    fn test_erase_removes_drawn_pixels() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        draw_line(
            &mut surface,
            Point::new(10.0, 50.0),
            Point::new(90.0, 50.0),
        );
        assert_ne!(pixel(&surface, 50, 50)[3], 0);

        surface.begin_erase(Point::new(50.0, 50.0));
        surface.end_erase();
        assert_eq!(pixel(&surface, 50, 50)[3], 0);
    }

    #[test]
    fn test_erase_path_clears_along_segment() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        draw_line(
            &mut surface,
            Point::new(10.0, 50.0),
            Point::new(90.0, 50.0),
        );

        surface.begin_erase(Point::new(20.0, 50.0));
        surface.extend_erase(Point::new(80.0, 50.0));
        surface.end_erase();
        assert_eq!(pixel(&surface, 50, 50)[3], 0);
    }

    #[test]
    fn test_composite_restored_after_erase() {
        let mut surface = surface_with_buffer(100.0, 100.0);

        surface.begin_erase(Point::new(50.0, 50.0));
        surface.extend_erase(Point::new(60.0, 50.0));
        surface.end_erase();

        // A draw stroke after the erase gesture must be additive again
        draw_line(
            &mut surface,
            Point::new(10.0, 20.0),
            Point::new(90.0, 20.0),
        );
        assert_ne!(pixel(&surface, 50, 20)[3], 0);
    }

    #[test]
    fn test_clear_wipes_but_keeps_buffer() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        draw_line(
            &mut surface,
            Point::new(10.0, 50.0),
            Point::new(90.0, 50.0),
        );
        surface.clear();
        assert!(!surface.has_content());
        assert!(surface.pixmap().is_some());
    }

    #[test]
    fn test_drawing_without_buffer_is_noop() {
        let mut surface = AnnotationSurface::new();
        surface.begin_stroke(Point::new(10.0, 10.0));
        surface.extend_stroke(Point::new(20.0, 20.0));
        surface.end_stroke();
        surface.begin_erase(Point::new(10.0, 10.0));
        surface.end_erase();
        surface.stamp_text(Point::new(10.0, 10.0), "hi");
        assert!(surface.pixmap().is_none());
    }

    #[test]
    fn test_stamp_empty_text_is_noop() {
        let mut surface = surface_with_buffer(100.0, 100.0);
        surface.stamp_text(Point::new(10.0, 10.0), "");
        assert!(!surface.has_content());
    }
}
