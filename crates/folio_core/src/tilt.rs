//! # Tilt Controller
//!
//! Pointer-driven 3D tilt for cards. Stateless: every pointer-move computes
//! a fresh transform from the pointer position inside the element's bounds,
//! and pointer-leave resets to the identity. No smoothing, no timers.
//!
//! ```text
//!  pointer above center  -> top edge tilts toward the viewer (rotateX > 0)
//!  pointer left of center -> left edge tilts away            (rotateY < 0)
//! ```

use crate::config::TiltConfig;
use crate::geometry::Rect;
use crate::surface::{ElementId, Surface};

/// A card transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    /// Rotation around the horizontal axis (degrees).
    pub rotate_x: f32,
    /// Rotation around the vertical axis (degrees).
    pub rotate_y: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Perspective distance (CSS pixels).
    pub perspective_px: f32,
}

impl TiltTransform {
    /// The resting transform: no rotation, no scale.
    #[must_use]
    pub const fn identity(perspective_px: f32) -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            scale: 1.0,
            perspective_px,
        }
    }

    /// Computes the hover transform for a pointer at viewport `(x, y)`.
    ///
    /// Offsets are normalized against the element's half-size, so a pointer
    /// inside the bounds maps to `[-max_angle, max_angle]` on both axes.
    /// Degenerate bounds produce no rotation.
    #[must_use]
    pub fn from_pointer(bounds: Rect, x: f32, y: f32, config: &TiltConfig) -> Self {
        let mut transform = Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            scale: config.hover_scale,
            perspective_px: config.perspective_px,
        };
        if bounds.is_degenerate() {
            return transform;
        }

        let (local_x, local_y) = bounds.to_local(x, y);
        let (center_x, center_y) = bounds.local_center();
        let offset_y = (local_y - center_y) / center_y;
        let offset_x = (local_x - center_x) / center_x;

        transform.rotate_x = offset_y * -config.max_angle_deg;
        transform.rotate_y = offset_x * config.max_angle_deg;
        transform
    }

    /// Renders the transform as a CSS `transform` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.perspective_px,
            clean(self.rotate_x),
            clean(self.rotate_y),
            s = self.scale,
        )
    }
}

/// Turns `-0` into `0` so resting cards don't print `rotateX(-0deg)`.
fn clean(angle: f32) -> f32 {
    if angle == 0.0 {
        0.0
    } else {
        angle
    }
}

/// Applies tilt transforms to card elements.
#[derive(Debug, Clone)]
pub struct TiltController {
    config: TiltConfig,
}

impl TiltController {
    /// Creates a controller.
    #[must_use]
    pub fn new(config: TiltConfig) -> Self {
        Self { config }
    }

    /// Handles a pointer move over `target` and returns the applied transform.
    pub fn on_pointer_move(
        &self,
        surface: &dyn Surface,
        target: ElementId,
        bounds: Rect,
        x: f32,
        y: f32,
    ) -> TiltTransform {
        let transform = TiltTransform::from_pointer(bounds, x, y, &self.config);
        surface.set_style(target, "transform", &transform.to_css());
        transform
    }

    /// Handles the pointer leaving `target`.
    pub fn on_pointer_leave(&self, surface: &dyn Surface, target: ElementId) -> TiltTransform {
        let transform = TiltTransform::identity(self.config.perspective_px);
        surface.set_style(target, "transform", &transform.to_css());
        transform
    }
}
