//! Collision detection and response for oriented rectangles
//!
//! Detection uses the Separating Axis Theorem over the edge normals of both
//! rectangles. Response reflects the moving body's velocity off whichever edge
//! of the obstacle lies closest to the body's center.

use glam::DVec2;

use super::rect::OrientedRect;
use crate::consts::EPSILON;

/// Closed interval of projections onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

impl Projection {
    /// True if the intervals share at least one point
    #[inline]
    pub fn overlaps(&self, other: &Projection) -> bool {
        !(self.max < other.min || other.max < self.min)
    }
}

/// Project every vertex onto `axis` and keep the extremes
pub fn project(vertices: &[DVec2], axis: DVec2) -> Projection {
    vertices.iter().map(|v| v.dot(axis)).fold(
        Projection {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |acc, p| Projection {
            min: acc.min.min(p),
            max: acc.max.max(p),
        },
    )
}

/// Check whether two rectangles overlap
///
/// Touching rectangles count as overlapping. Results near tangency are subject
/// to floating point rounding.
pub fn intersects(a: &OrientedRect, b: &OrientedRect) -> bool {
    let verts_a = a.vertices();
    let verts_b = b.vertices();

    a.axes().into_iter().chain(b.axes()).all(|axis| {
        let proj_a = project(&verts_a, axis);
        let proj_b = project(&verts_b, axis);
        proj_a.overlaps(&proj_b)
    })
}

/// Perpendicular distance from `point` to the infinite line through `p1`
/// and `p2`
///
/// Returns `None` when the two points coincide.
pub fn line_distance(point: DVec2, p1: DVec2, p2: DVec2) -> Option<f64> {
    let d = p2 - p1;
    let len = d.length();
    if len < EPSILON {
        return None;
    }
    let numerator = d.y * point.x - d.x * point.y + p2.x * p1.y - p2.y * p1.x;
    Some(numerator.abs() / len)
}

/// The obstacle edge whose line lies closest to `point`
///
/// Ties keep the earliest edge. Degenerate edges are skipped.
pub fn nearest_edge(point: DVec2, obstacle: &OrientedRect) -> Option<(DVec2, DVec2)> {
    let mut best: Option<((DVec2, DVec2), f64)> = None;
    for (p1, p2) in obstacle.edges() {
        let Some(dist) = line_distance(point, p1, p2) else {
            continue;
        };
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some(((p1, p2), dist)),
        }
    }
    best.map(|(edge, _)| edge)
}

/// Reflect velocity off a surface with the given (unnormalized) normal
///
/// Splits `v` into `u`, its projection onto the normal, and the tangential
/// remainder `w = v - u`, then returns `w - u`.
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    let u = velocity.dot(normal) / normal.dot(normal) * normal;
    let w = velocity - u;
    w - u
}

/// Velocity of `moving` after an elastic hit on the immovable `obstacle`
///
/// The reflecting surface is the obstacle edge nearest to the moving body's
/// center. The result is not renormalized. If the obstacle has no usable edge
/// the velocity is returned unchanged.
pub fn bounce(moving: &OrientedRect, obstacle: &OrientedRect, velocity: DVec2) -> DVec2 {
    match nearest_edge(moving.center(), obstacle) {
        Some((p1, p2)) => {
            let normal = DVec2::new(-(p1.y - p2.y), p1.x - p2.x);
            reflect_velocity(velocity, normal)
        }
        None => {
            log::debug!("Obstacle at {:?} has no usable edge, skipping bounce", obstacle.center());
            velocity
        }
    }
}
