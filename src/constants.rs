//! Global constants for the lightbox engine.
//!
//! This module centralizes the numeric knobs for zooming, modal sizing,
//! brushes, and the annotation surface so behavior is tuned in one place.

/// Zoom and rotation constants.
pub mod zoom {
    /// Smallest scale the view may reach; zoom-out clamps here.
    pub const MIN_SCALE: f32 = 0.1;

    /// Additive scale step used when the host supplies no increment.
    pub const DEFAULT_INCREMENT: f32 = 0.1;

    /// Rotation step per rotate action, in degrees.
    pub const ROTATION_STEP_DEGREES: i32 = 90;
}

/// Modal window sizing constants.
pub mod modal {
    /// Minimum modal width when resizing by handle.
    pub const MIN_WIDTH: f32 = 200.0;

    /// Minimum modal height when resizing by handle.
    pub const MIN_HEIGHT: f32 = 150.0;

    /// Modal width before the first image load reports a size.
    pub const DEFAULT_WIDTH: f32 = 800.0;

    /// Modal height before the first image load reports a size.
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Height of the control bar at the bottom of the modal. The image
    /// viewport is the modal size minus this strip.
    pub const CONTROLS_HEIGHT: f32 = 50.0;
}

/// Brush defaults for drawing, erasing, and text stamping.
pub mod brush {
    /// Default stroke width in pixels.
    pub const DEFAULT_WIDTH: f32 = 3.0;

    /// Default brush color (opaque red), RGBA.
    pub const DEFAULT_COLOR: [u8; 4] = [255, 0, 0, 255];

    /// Eraser radius and stroke width as a multiple of the brush width.
    pub const ERASER_WIDTH_FACTOR: f32 = 2.0;

    /// Font size for stamped text, in pixels.
    pub const TEXT_STAMP_SIZE: f32 = 24.0;
}

/// Annotation surface constants.
pub mod surface {
    /// Dimension delta below which a resynced buffer keeps its contents.
    /// Larger deltas mean a new image or a deliberate resize; the raster
    /// is dropped rather than rescaled.
    pub const RESYNC_TOLERANCE_PX: f32 = 5.0;
}
