//! Axis-aligned bounding box used as a cheap rejection test.
//!
//! A passing slab test does not guarantee a real hit; callers must follow
//! it with the exact primitive test.

use glam::Vec3A;

use crate::interval::Interval;
use crate::ray::Ray;

/// Axis-aligned bounding box given by its two corner points.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Corner with the smallest coordinate on every axis.
    pub min: Vec3A,
    /// Corner with the largest coordinate on every axis.
    pub max: Vec3A,
}

impl Aabb {
    /// Create a bounding box from its min and max corners.
    pub fn new(min: Vec3A, max: Vec3A) -> Self {
        Self { min, max }
    }

    /// Slab test: does the ray pass through the box within `ray_t`?
    ///
    /// A zero direction component divides to ±inf, which removes that
    /// axis's constraint; the NaN from a ray origin exactly on a slab
    /// plane is dropped by the min/max folding below.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let origin = r.origin.to_array();
        let direction = r.direction.to_array();
        let min = self.min.to_array();
        let max = self.max.to_array();

        for axis in 0..3 {
            let inv_d = 1.0 / direction[axis];
            let mut t0 = (min[axis] - origin[axis]) * inv_d;
            let mut t1 = (max[axis] - origin[axis]) * inv_d;

            // A negative direction crosses the far plane first
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = ray_t.min.max(t0);
            ray_t.max = ray_t.max.min(t1);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3A::new(-1.0, -1.0, -1.0), Vec3A::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_hit_through_center() {
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, 1.0));
        assert!(unit_box().hit(&r, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_miss_pointing_away() {
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(!unit_box().hit(&r, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_miss_offset_ray() {
        let r = Ray::new(Vec3A::new(5.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, 1.0));
        assert!(!unit_box().hit(&r, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_negative_direction() {
        let r = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(unit_box().hit(&r, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_zero_direction_component_inside_slab() {
        // Direction has no y or z component; those axes must impose no
        // constraint while the origin lies between their slabs.
        let r = Ray::new(Vec3A::new(-5.0, 0.5, 0.5), Vec3A::new(1.0, 0.0, 0.0));
        assert!(unit_box().hit(&r, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_zero_direction_component_outside_slab() {
        let r = Ray::new(Vec3A::new(-5.0, 2.0, 0.0), Vec3A::new(1.0, 0.0, 0.0));
        assert!(!unit_box().hit(&r, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_interval_limits_hit() {
        // Box entry is at t = 4, exit at t = 6
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, 1.0));
        assert!(!unit_box().hit(&r, Interval::new(0.001, 3.0)));
        assert!(!unit_box().hit(&r, Interval::new(7.0, f32::INFINITY)));
        assert!(unit_box().hit(&r, Interval::new(0.001, 5.0)));
    }
}
