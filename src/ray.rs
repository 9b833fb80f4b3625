//! Ray representation for path tracing.
//!
//! A ray is the half-line r(t) = origin + t * direction used for all
//! intersection queries.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// The direction is not required to be unit length; scattered rays in
/// particular carry unnormalized directions.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,
    /// Direction vector of the ray, not necessarily normalized.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute the point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
