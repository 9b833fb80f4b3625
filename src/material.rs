//! Material scattering model.
//!
//! Three closed material kinds: Lambertian (diffuse), Metal (glossy
//! specular), and Dielectric (refractive). The diffuse direction is the
//! classic unnormalized `normal + point-in-sphere` form, and metal fuzz
//! perturbs the normal before reflecting; both are kept in that exact
//! formulation for output fidelity.

use glam::Vec3A;
use rand::Rng;

use crate::random;
use crate::ray::Ray;
use crate::sphere::HitRecord;

/// RGB color carried along a light path.
pub type Color = Vec3A;

/// Surface material of a sphere.
///
/// The variant determines which fields are meaningful; there is no shared
/// state across variants.
#[derive(Debug, Clone, Copy)]
pub enum Material {
    /// Diffuse material for matte surfaces.
    Lambertian {
        /// Surface color / reflectance.
        albedo: Color,
    },
    /// Reflective material with optional glossy roughness.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Perturbation of the reflection axis (0.0 = perfect mirror).
        fuzz: f32,
    },
    /// Transparent refractive material such as glass.
    Dielectric {
        /// Index of refraction (> 1 for typical media).
        refraction_index: f32,
    },
}

impl Material {
    /// Scatter an incoming ray at a hit point.
    ///
    /// Returns the attenuation and the outgoing ray, or None if the ray
    /// is absorbed (a metal reflection driven into the surface).
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        match self {
            Material::Lambertian { albedo } => {
                let target = rec.p + rec.normal + random::random_in_unit_sphere(rng);
                // Direction stays unnormalized on purpose
                Some((*albedo, Ray::new(rec.p, target - rec.p)))
            }

            Material::Metal { albedo, fuzz } => {
                let axis = rec.normal + *fuzz * random::random_in_unit_sphere(rng);
                let reflected = reflect(r_in.direction.normalize(), axis);
                // Absorbed if the fuzzed reflection points into the surface
                if reflected.dot(rec.normal) > 0.0 {
                    Some((*albedo, Ray::new(rec.p, reflected)))
                } else {
                    None
                }
            }

            Material::Dielectric { refraction_index } => {
                let dir = r_in.direction;
                let (outward_normal, ni_over_nt, cosine) = if dir.dot(rec.normal) > 0.0 {
                    // Exiting the medium
                    (
                        -rec.normal,
                        *refraction_index,
                        refraction_index * dir.dot(rec.normal) / dir.length(),
                    )
                } else {
                    // Entering the medium
                    (
                        rec.normal,
                        1.0 / refraction_index,
                        -dir.dot(rec.normal) / dir.length(),
                    )
                };

                let scattered = match refract(dir, outward_normal, ni_over_nt) {
                    Some(refracted)
                        if random::random_f32(rng) >= schlick(cosine, *refraction_index) =>
                    {
                        refracted
                    }
                    // Fresnel reflection, or total internal reflection
                    _ => reflect(dir, rec.normal),
                };

                // Glass keeps all the light it does not absorb
                Some((Color::ONE, Ray::new(rec.p, scattered)))
            }
        }
    }
}

/// Mirror v across the surface normal n.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract v through an interface with the given refraction ratio.
///
/// Returns None when the discriminant is non-positive, meaning total
/// internal reflection.
pub fn refract(v: Vec3A, n: Vec3A, ni_over_nt: f32) -> Option<Vec3A> {
    let unit = v.normalize();
    let dt = unit.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (unit - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick approximation of the Fresnel reflectance.
pub fn schlick(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const EPS: f32 = 1e-5;

    fn head_on_hit() -> HitRecord {
        HitRecord {
            p: Vec3A::new(0.0, 0.0, 1.0),
            normal: Vec3A::new(0.0, 0.0, 1.0),
            t: 4.0,
        }
    }

    #[test]
    fn test_reflect_is_involutive() {
        let n = Vec3A::new(0.0, 1.0, 0.0);
        for v in [
            Vec3A::new(1.0, -1.0, 0.0),
            Vec3A::new(0.3, -2.0, 0.7),
            Vec3A::new(-1.0, 0.5, 2.0),
        ] {
            let twice = reflect(reflect(v, n), n);
            assert!(twice.abs_diff_eq(v, EPS));
        }
    }

    #[test]
    fn test_refract_round_trip() {
        // Passing back through the interface with the inverse ratio must
        // recover the original direction.
        let n = Vec3A::new(0.0, 1.0, 0.0);
        let v = Vec3A::new(0.5, -1.0, 0.3).normalize();
        let ratio = 1.0 / 1.5;
        let inside = refract(v, n, ratio).expect("no total internal reflection entering");
        let back = refract(inside, n, 1.0 / ratio).expect("round trip must refract");
        assert!(back.abs_diff_eq(v, EPS));
    }

    #[test]
    fn test_total_internal_reflection() {
        // Grazing exit from glass to air
        let n = Vec3A::new(0.0, 1.0, 0.0);
        let v = Vec3A::new(0.9, -0.5, 0.0);
        assert!(refract(v, n, 1.5).is_none());
    }

    #[test]
    fn test_schlick_head_on() {
        // (1 - cos)^5 vanishes, leaving r0 = ((1 - 1.5) / (1 + 1.5))^2
        let r = schlick(1.0, 1.5);
        assert!((r - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_lambertian_always_scatters_near_normal() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mat = Material::Lambertian {
            albedo: Vec3A::new(0.8, 0.4, 0.4),
        };
        let hit = head_on_hit();
        let r_in = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        for _ in 0..100 {
            let (attenuation, scattered) = mat.scatter(&r_in, &hit, &mut rng).unwrap();
            assert_eq!(attenuation, Vec3A::new(0.8, 0.4, 0.4));
            assert!(scattered.origin.abs_diff_eq(hit.p, EPS));
            // Direction is normal plus a point strictly inside the unit
            // sphere, so it can deviate less than 90 degrees
            assert!(scattered.direction.dot(hit.normal) > 0.0);
        }
    }

    #[test]
    fn test_mirror_metal_reflects_exactly() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mat = Material::Metal {
            albedo: Vec3A::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        };
        let hit = head_on_hit();
        let r_in = Ray::new(Vec3A::new(-1.0, 0.0, 2.0), Vec3A::new(1.0, 0.0, -1.0));
        let (_, scattered) = mat.scatter(&r_in, &hit, &mut rng).unwrap();
        let expected = Vec3A::new(1.0, 0.0, 1.0).normalize();
        assert!(scattered.direction.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_grazing_metal_absorbs() {
        // With fuzz 1.0 and a grazing incoming ray, some perturbed
        // reflections point into the surface and must be absorbed
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mat = Material::Metal {
            albedo: Vec3A::ONE,
            fuzz: 1.0,
        };
        let hit = head_on_hit();
        let r_in = Ray::new(Vec3A::new(-5.0, 0.0, 1.001), Vec3A::new(1.0, 0.0, -0.0002));
        let absorbed = (0..200).any(|_| mat.scatter(&r_in, &hit, &mut rng).is_none());
        assert!(absorbed);
    }

    #[test]
    fn test_dielectric_always_scatters_white() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mat = Material::Dielectric {
            refraction_index: 1.5,
        };
        let hit = head_on_hit();
        let entering = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        let exiting = Ray::new(Vec3A::new(0.0, 0.0, 0.0), Vec3A::new(0.0, 0.0, 1.0));
        for r_in in [entering, exiting] {
            for _ in 0..50 {
                let (attenuation, _) = mat.scatter(&r_in, &hit, &mut rng).unwrap();
                assert_eq!(attenuation, Color::ONE);
            }
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        // Head-on reflectance is r0 = 0.04, so refraction dominates
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mat = Material::Dielectric {
            refraction_index: 1.5,
        };
        let hit = head_on_hit();
        let r_in = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        let mut refracted = 0;
        for _ in 0..200 {
            let (_, scattered) = mat.scatter(&r_in, &hit, &mut rng).unwrap();
            if scattered.direction.z < 0.0 {
                refracted += 1;
            }
        }
        assert!(refracted > 150);
    }
}
