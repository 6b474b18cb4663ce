//! Oriented rectangle geometry shared by every body in the arena
//!
//! A rectangle is defined by:
//! - center: position in screen space (y grows downward)
//! - width, length: extents along the local x and y axes
//! - angle: rotation about the center, in degrees

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::render::{Drawable, SpriteId};

/// A rectangle rotated about its own center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    center: DVec2,
    width: f64,
    length: f64,
    /// Rotation (degrees)
    angle: f64,
    /// Opaque handle owned by the renderer
    sprite: SpriteId,
}

impl OrientedRect {
    pub fn new(sprite: SpriteId, center: DVec2, width: f64, length: f64, angle: f64) -> Self {
        Self {
            center,
            width,
            length,
            angle,
            sprite,
        }
    }

    /// Axis-aligned square of side `side`
    pub fn square(sprite: SpriteId, center: DVec2, side: f64) -> Self {
        Self::new(sprite, center, side, side, 0.0)
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    #[inline]
    pub fn set_center(&mut self, center: DVec2) {
        self.center = center;
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Rotation in degrees
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    /// Half extents (width / 2, length / 2)
    #[inline]
    pub fn half_extents(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.length / 2.0)
    }

    /// Corner positions in order: top-left, top-right, bottom-right,
    /// bottom-left (local frame, before rotation).
    ///
    /// Edge and axis derivation depend on this adjacency.
    pub fn vertices(&self) -> [DVec2; 4] {
        let DVec2 { x: hw, y: hl } = self.half_extents();
        let rotation = DVec2::from_angle(self.angle.to_radians());

        [
            DVec2::new(-hw, -hl),
            DVec2::new(hw, -hl),
            DVec2::new(hw, hl),
            DVec2::new(-hw, hl),
        ]
        .map(|corner| self.center + rotation.rotate(corner))
    }

    /// Edges as (start, end) pairs, wrapping the last vertex to the first
    pub fn edges(&self) -> [(DVec2, DVec2); 4] {
        let v = self.vertices();
        [(v[0], v[1]), (v[1], v[2]), (v[2], v[3]), (v[3], v[0])]
    }

    /// Candidate separating axes: the unnormalized normal (-dy, dx) of
    /// every edge
    pub fn axes(&self) -> [DVec2; 4] {
        self.edges().map(|(start, end)| (end - start).perp())
    }

    /// Top-left pixel of the unrotated bounding box
    pub fn top_left(&self) -> (i32, i32) {
        let corner = self.center - self.half_extents() + DVec2::splat(0.5);
        (corner.x.floor() as i32, corner.y.floor() as i32)
    }

    /// Width in whole pixels (truncated)
    #[inline]
    pub fn pixel_width(&self) -> i32 {
        self.width as i32
    }

    /// Length in whole pixels (truncated)
    #[inline]
    pub fn pixel_length(&self) -> i32 {
        self.length as i32
    }

    /// Snapshot for the renderer
    pub fn to_drawable(&self) -> Drawable {
        let (x, y) = self.top_left();
        Drawable {
            x,
            y,
            width: self.pixel_width(),
            length: self.pixel_length(),
            sprite: self.sprite,
            angle: self.angle,
        }
    }
}
