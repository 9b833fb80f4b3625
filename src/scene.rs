//! Scene description and closest-hit query.

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::sphere::{HitRecord, Sphere};

/// Immutable scene description: spheres paired with materials by index.
///
/// Sphere i is shaded with material i. The pairing invariant is kept by
/// construction through `add`, and enforced with a fail-fast assertion in
/// `from_parts`. The scene is read-only during rendering.
#[derive(Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from parallel sphere and material lists.
    ///
    /// Panics if the lists differ in length.
    pub fn from_parts(spheres: Vec<Sphere>, materials: Vec<Material>) -> Self {
        assert_eq!(
            spheres.len(),
            materials.len(),
            "every sphere needs exactly one material"
        );
        Self { spheres, materials }
    }

    /// Add a sphere and its material to the scene.
    pub fn add(&mut self, sphere: Sphere, material: Material) {
        self.spheres.push(sphere);
        self.materials.push(material);
    }

    /// Number of spheres in the scene.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// True if the scene contains no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Material paired with the sphere at `index`.
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    /// Find the closest hit along the ray within `ray_t`, together with
    /// the index of the sphere that produced it.
    ///
    /// The scan shrinks the upper bound to each accepted hit's t, so a
    /// later sphere must be strictly closer to win; ties resolve to the
    /// lowest index.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<(HitRecord, usize)> {
        let mut closest_so_far = ray_t.max;
        let mut found = None;

        for (index, sphere) in self.spheres.iter().enumerate() {
            if let Some(rec) = sphere.bounded_hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                found = Some((rec, index));
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3A;

    fn gray() -> Material {
        Material::Lambertian {
            albedo: Vec3A::splat(0.5),
        }
    }

    #[test]
    fn test_closest_sphere_wins() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3A::new(0.0, 0.0, -10.0), 1.0), gray());
        scene.add(Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 1.0), gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let (rec, index) = scene.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert_eq!(index, 1);
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_tie_resolves_to_lowest_index() {
        let mut scene = Scene::new();
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 1.0);
        scene.add(sphere, gray());
        scene.add(sphere, gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let (_, index) = scene.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_miss_returns_none() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 1.0), gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert!(scene.hit(&r, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_interval_excludes_hits() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 1.0), gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert!(scene.hit(&r, Interval::new(0.001, 1.5)).is_none());
    }

    #[test]
    #[should_panic(expected = "exactly one material")]
    fn test_from_parts_length_mismatch_panics() {
        let spheres = vec![Sphere::new(Vec3A::ZERO, 1.0)];
        Scene::from_parts(spheres, Vec::new());
    }
}
