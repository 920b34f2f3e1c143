//! Pointer mapping from a scaled, letterboxed display rectangle to native
//! browser-viewport coordinates ("contain" scaling).
//!
//! The screenshot (or live view) is rendered into a display rectangle with
//! uniform aspect-preserving scale, centered with letterbox padding on the
//! shorter axis. A click in the padding has no counterpart in the page and
//! is dropped. Only invoked while the human holds the input channel.

use serde::Serialize;

/// Native frame width assumed before the first frame arrives.
pub const DEFAULT_NATIVE_WIDTH: u32 = 1280;
/// Native frame height assumed before the first frame arrives.
pub const DEFAULT_NATIVE_HEIGHT: u32 = 800;

/// Native (unscaled) dimensions of the source frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeSize {
    /// Width in native pixels.
    pub width: u32,
    /// Height in native pixels.
    pub height: u32,
}

impl Default for NativeSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_NATIVE_WIDTH,
            height: DEFAULT_NATIVE_HEIGHT,
        }
    }
}

/// A pointer position in native browser-viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NativePoint {
    /// Native x coordinate.
    pub x: u32,
    /// Native y coordinate.
    pub y: u32,
}

/// The contain-scaling transform for one display rectangle / frame pair.
#[derive(Clone, Copy, Debug)]
pub struct ContainTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    native_width: f64,
    native_height: f64,
}

impl ContainTransform {
    /// Build the transform for a frame of `native` size rendered into a
    /// `display_width` × `display_height` rectangle.
    ///
    /// Zero native dimensions fall back to the defaults so the transform is
    /// well-defined before the first frame loads.
    #[must_use]
    pub fn new(display_width: f64, display_height: f64, native: NativeSize) -> Self {
        let native = if native.width == 0 || native.height == 0 {
            NativeSize::default()
        } else {
            native
        };
        let native_width = f64::from(native.width);
        let native_height = f64::from(native.height);
        let scale = f64::min(display_width / native_width, display_height / native_height);
        let rendered_width = native_width * scale;
        let rendered_height = native_height * scale;
        Self {
            scale,
            offset_x: (display_width - rendered_width) / 2.0,
            offset_y: (display_height - rendered_height) / 2.0,
            native_width,
            native_height,
        }
    }

    /// Uniform scale factor applied to the frame.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Horizontal letterbox offset in display pixels.
    #[must_use]
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Vertical letterbox offset in display pixels.
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Map a pointer position (relative to the rectangle's top-left corner)
    /// to native coordinates.
    ///
    /// Returns `None` when the pointer landed in the letterbox padding or
    /// when the transform is degenerate (zero-sized display rectangle); such
    /// clicks are dropped.
    #[must_use]
    pub fn map(&self, pointer_x: f64, pointer_y: f64) -> Option<NativePoint> {
        if self.scale <= 0.0 {
            return None;
        }
        let native_x = ((pointer_x - self.offset_x) / self.scale).round();
        let native_y = ((pointer_y - self.offset_y) / self.scale).round();
        if native_x < 0.0
            || native_y < 0.0
            || native_x > self.native_width
            || native_y > self.native_height
        {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(NativePoint {
            x: native_x as u32,
            y: native_y as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn wide_frame_in_square_box_letterboxes_vertically() {
        let t = ContainTransform::new(800.0, 800.0, NativeSize { width: 1280, height: 800 });
        assert!((t.scale() - 0.625).abs() < EPS);
        assert!((t.offset_x() - 0.0).abs() < EPS);
        assert!((t.offset_y() - 150.0).abs() < EPS);
    }

    #[test]
    fn pointer_on_content_maps_to_native() {
        let t = ContainTransform::new(800.0, 800.0, NativeSize { width: 1280, height: 800 });
        assert_eq!(t.map(400.0, 150.0), Some(NativePoint { x: 640, y: 0 }));
    }

    #[test]
    fn pointer_in_letterbox_is_rejected() {
        let t = ContainTransform::new(800.0, 800.0, NativeSize { width: 1280, height: 800 });
        // (0,0) is inside the top letterbox band: native y would be -240
        assert_eq!(t.map(0.0, 0.0), None);
    }

    #[test]
    fn bottom_right_content_corner_is_accepted() {
        let t = ContainTransform::new(800.0, 800.0, NativeSize { width: 1280, height: 800 });
        // Bottom edge of the rendered content (inclusive bounds)
        assert_eq!(t.map(800.0, 650.0), Some(NativePoint { x: 1280, y: 800 }));
    }

    #[test]
    fn pointer_past_bottom_letterbox_is_rejected() {
        let t = ContainTransform::new(800.0, 800.0, NativeSize { width: 1280, height: 800 });
        assert_eq!(t.map(400.0, 799.0), None);
    }

    #[test]
    fn tall_frame_letterboxes_horizontally() {
        let t = ContainTransform::new(800.0, 800.0, NativeSize { width: 400, height: 800 });
        assert!((t.scale() - 1.0).abs() < EPS);
        assert!((t.offset_x() - 200.0).abs() < EPS);
        assert!((t.offset_y() - 0.0).abs() < EPS);
        assert_eq!(t.map(100.0, 400.0), None);
        assert_eq!(t.map(200.0, 400.0), Some(NativePoint { x: 0, y: 400 }));
    }

    #[test]
    fn exact_fit_has_no_offsets() {
        let t = ContainTransform::new(1280.0, 800.0, NativeSize { width: 1280, height: 800 });
        assert!((t.scale() - 1.0).abs() < EPS);
        assert_eq!(t.map(640.0, 400.0), Some(NativePoint { x: 640, y: 400 }));
    }

    #[test]
    fn zero_native_size_falls_back_to_defaults() {
        let t = ContainTransform::new(800.0, 800.0, NativeSize { width: 0, height: 0 });
        // Defaults are 1280x800, so this behaves like the letterbox case
        assert!((t.scale() - 0.625).abs() < EPS);
        assert_eq!(t.map(400.0, 150.0), Some(NativePoint { x: 640, y: 0 }));
    }

    #[test]
    fn degenerate_display_rectangle_rejects_everything() {
        let t = ContainTransform::new(0.0, 0.0, NativeSize::default());
        assert_eq!(t.map(0.0, 0.0), None);
    }

    #[test]
    fn rounding_is_to_nearest() {
        let t = ContainTransform::new(640.0, 400.0, NativeSize { width: 1280, height: 800 });
        // scale 0.5: display (101, 101) -> native (202, 202)
        assert_eq!(t.map(101.0, 101.0), Some(NativePoint { x: 202, y: 202 }));
        assert_eq!(t.map(100.6, 100.6), Some(NativePoint { x: 201, y: 201 }));
    }
}
