//! View-transform mathematics for the image modal.
//!
//! This module contains the pan/zoom/rotate state for one open modal and
//! the math to place the image on screen, extracted for testability.

use crate::constants::zoom::{MIN_SCALE, ROTATION_STEP_DEGREES};
use crate::geometry::{Point, Rect, Size};

/// Pan/zoom/rotate state for the image inside an open modal.
///
/// The image is laid out centered in the viewport, then offset by the pan
/// translation, scaled, and rotated about its own center. The pan offset is
/// stored in un-scaled, un-rotated screen pixels, so a drag maps one-to-one
/// onto it no matter how far the view is zoomed or turned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Zoom factor relative to the image's natural size. Never below
    /// [`MIN_SCALE`].
    pub scale: f32,
    /// Accumulated rotation in degrees. Grows by ±90 per rotate action and
    /// is intentionally never wrapped; rendering reduces it modulo 360.
    pub rotation_degrees: i32,
    /// Pan translation applied to the image center, in screen pixels.
    pub offset: Point,
    /// Natural (intrinsic) size of the loaded bitmap. Zero until the
    /// image finishes loading.
    pub natural: Size,
}

impl ViewTransform {
    /// Create a transform for an image with the given natural size.
    pub fn new(natural: Size) -> Self {
        Self {
            scale: 1.0,
            rotation_degrees: 0,
            offset: Point::ZERO,
            natural,
        }
    }

    /// Whether a bitmap has been measured yet.
    pub fn is_loaded(&self) -> bool {
        !self.natural.is_empty()
    }

    /// Record the natural size of a newly loaded bitmap.
    pub fn set_natural_size(&mut self, natural: Size) {
        self.natural = natural;
    }

    /// Fit the image into the viewport without ever upscaling.
    ///
    /// The resulting scale is `min(1, min(vw/nw, vh/nh))`, clamped to the
    /// zoom floor. Does nothing while no image is loaded (natural size is
    /// still zero), so an aborted load leaves the view untouched.
    ///
    /// # Returns
    /// The scale now in effect.
    pub fn fit_to_viewport(&mut self, viewport: Size) -> f32 {
        if !self.is_loaded() || viewport.is_empty() {
            return self.scale;
        }

        let fit = (viewport.width / self.natural.width)
            .min(viewport.height / self.natural.height)
            .min(1.0);
        self.scale = fit.max(MIN_SCALE);
        self.scale
    }

    /// Zoom in by an additive increment. There is no upper bound.
    pub fn zoom_in(&mut self, increment: f32) {
        self.scale = (self.scale + increment).max(MIN_SCALE);
    }

    /// Zoom out by an additive increment, clamped at the zoom floor.
    pub fn zoom_out(&mut self, increment: f32) {
        self.scale = (self.scale - increment).max(MIN_SCALE);
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate_left(&mut self) {
        self.rotation_degrees -= ROTATION_STEP_DEGREES;
    }

    /// Rotate a quarter turn clockwise.
    pub fn rotate_right(&mut self) {
        self.rotation_degrees += ROTATION_STEP_DEGREES;
    }

    /// Apply a pan delta in screen pixels.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.offset = self.offset.offset(dx, dy);
    }

    /// Reset rotation and pan, then re-derive the scale by fitting the
    /// image to the live viewport. The scale is whatever fit produces,
    /// not a hardcoded 1.0.
    pub fn reset_view(&mut self, viewport: Size) {
        self.rotation_degrees = 0;
        self.offset = Point::ZERO;
        self.fit_to_viewport(viewport);
    }

    /// Rotation reduced to the quarter turn actually rendered: 0, 90,
    /// 180, or 270 degrees.
    pub fn normalized_rotation(&self) -> i32 {
        self.rotation_degrees.rem_euclid(360)
    }

    /// Sine and cosine of the rendered rotation, exact at quarter turns.
    fn rotation_sin_cos(&self) -> (f32, f32) {
        match self.normalized_rotation() {
            90 => (1.0, 0.0),
            180 => (0.0, -1.0),
            270 => (-1.0, 0.0),
            _ => (0.0, 1.0),
        }
    }

    /// The composed transform mapping image pixel coordinates to viewport
    /// coordinates: translate to viewport center plus pan offset, then
    /// scale, then rotate about the image center.
    pub fn matrix(&self, viewport: Size) -> tiny_skia::Transform {
        let (sin, cos) = self.rotation_sin_cos();
        let center = Rect::from_size(viewport).center();

        tiny_skia::Transform::from_translate(
            -self.natural.width / 2.0,
            -self.natural.height / 2.0,
        )
        .post_concat(tiny_skia::Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0))
        .post_concat(tiny_skia::Transform::from_scale(self.scale, self.scale))
        .post_concat(tiny_skia::Transform::from_translate(
            center.x + self.offset.x,
            center.y + self.offset.y,
        ))
    }

    /// Axis-aligned bounds of the transformed image in viewport
    /// coordinates. Width and height swap on odd quarter turns.
    pub fn screen_rect(&self, viewport: Size) -> Rect {
        let scaled_w = self.natural.width * self.scale;
        let scaled_h = self.natural.height * self.scale;

        let (width, height) = match self.normalized_rotation() {
            90 | 270 => (scaled_h, scaled_w),
            _ => (scaled_w, scaled_h),
        };

        let center = Rect::from_size(viewport).center();
        Rect::new(
            center.x + self.offset.x - width / 2.0,
            center.y + self.offset.y - height / 2.0,
            width,
            height,
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}
