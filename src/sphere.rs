//! Sphere primitive and its ray intersection tests.

use glam::Vec3A;

use crate::aabb::Aabb;
use crate::interval::Interval;
use crate::ray::Ray;

/// Ray-sphere intersection data.
///
/// Transient result of a single intersection query. The normal is unit
/// length and always points outward from the sphere; it is never flipped
/// toward the incoming ray (the dielectric scatter path resolves facing
/// itself).
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point where the ray intersects the sphere.
    pub p: Vec3A,
    /// Outward surface normal at the intersection point.
    pub normal: Vec3A,
    /// Ray parameter at which the hit occurred.
    pub t: f32,
}

/// Sphere primitive defined by center and radius.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point in world coordinates.
    pub center: Vec3A,
    /// Radius, always non-negative.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Bounding box of the sphere, computed on demand.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(
            self.center - Vec3A::splat(self.radius),
            self.center + Vec3A::splat(self.radius),
        )
    }

    /// Exact analytic ray-sphere intersection.
    ///
    /// Solves the quadratic |origin + t*dir - center|^2 = radius^2 using
    /// the half-b form. A non-positive discriminant is a miss (tangent
    /// rays count as misses). The nearer root is preferred; both roots
    /// are tested against the open interval `ray_t`.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - r.origin;
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant <= 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        Some(HitRecord {
            p,
            normal: (p - self.center) / self.radius,
            t: root,
        })
    }

    /// Box-filtered intersection: slab test first, exact test only if it
    /// passes. Reports exactly the same hits as `hit` alone.
    pub fn bounded_hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        if !self.bounding_box().hit(r, ray_t) {
            return None;
        }
        self.hit(r, ray_t)
    }
}
