//! Random sampling for path tracing.
//!
//! Every helper takes an explicit generator so each unit of parallel work
//! owns its own stream: rendering is deterministic for a fixed seed and
//! free of shared-generator races. Pixels derive independent ChaCha20
//! streams via `pixel_stream`.

use glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generate a random f32 in [0.0, 1.0).
pub fn random_f32(rng: &mut impl Rng) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max).
pub fn random_f32_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Uniform point inside the unit sphere, by rejection sampling over the
/// enclosing [-1, 1) cube.
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform point inside the unit disk (z = 0), by rejection sampling over
/// the enclosing [-1, 1) square.
pub fn random_in_unit_disk(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut impl Rng) -> Vec3A {
    Vec3A::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut impl Rng, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

/// Independent per-pixel generator.
///
/// All pixels share the base seed but select disjoint ChaCha20 streams
/// keyed by their coordinates, so concurrent workers never contend and a
/// render reproduces exactly for a given seed.
pub fn pixel_stream(seed: u64, x: u32, y: u32) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(((y as u64) << 32) | x as u64);
    rng
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_sphere_points_are_inside() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_unit_disk_points_are_inside_and_flat() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_pixel_streams_are_deterministic() {
        let mut a = pixel_stream(42, 3, 11);
        let mut b = pixel_stream(42, 3, 11);
        for _ in 0..16 {
            assert_eq!(random_f32(&mut a), random_f32(&mut b));
        }
    }

    #[test]
    fn test_pixel_streams_are_independent() {
        let mut a = pixel_stream(42, 3, 11);
        let mut b = pixel_stream(42, 4, 11);
        let same = (0..16).all(|_| random_f32(&mut a) == random_f32(&mut b));
        assert!(!same);
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = random_f32_range(&mut rng, 2.0, 5.0);
            assert!((2.0..5.0).contains(&x));
        }
    }
}
