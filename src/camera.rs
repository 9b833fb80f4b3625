//! Camera, ray generation, and the radiance integration loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;
use rayon::prelude::*;

use crate::interval::Interval;
use crate::material::Color;
use crate::random;
use crate::ray::Ray;
use crate::scene::Scene;

/// Hits closer than this are ignored, so secondary rays cannot
/// re-intersect the surface they originate on.
const T_MIN: f32 = 1e-3;

/// Thin-lens camera and renderer.
///
/// Configure the public fields, then call `render`. The camera derives an
/// orthonormal basis and a virtual film rectangle at the focus distance;
/// depth of field comes entirely from jittering ray origins within the
/// lens disk (aperture 0 is a pinhole).
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixels.
    pub image_width: u32,
    /// Rendered image height in pixels.
    pub image_height: u32,
    /// Number of radiance samples per pixel.
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces per sample.
    pub max_depth: u32,
    /// Vertical field of view in degrees.
    pub vfov: f32,
    /// Eye position.
    pub lookfrom: Vec3A,
    /// Point the camera looks at.
    pub lookat: Vec3A,
    /// Camera-relative up direction.
    pub vup: Vec3A,
    /// Lens aperture diameter; 0.0 disables depth of field.
    pub aperture: f32,
    /// Distance from the eye to the plane of perfect focus.
    pub focus_dist: f32,
    /// Base seed for the per-pixel random streams.
    pub seed: u64,

    // Derived state, computed by initialize()
    origin: Vec3A,
    lower_left: Vec3A,
    horizontal: Vec3A,
    vertical: Vec3A,
    u: Vec3A,
    v: Vec3A,
    w: Vec3A,
    lens_radius: f32,
    pixel_samples_scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create a camera with default settings: 1280x720, 64 samples per
    /// pixel, 20 bounces, 60 degree FOV, pinhole lens.
    pub fn new() -> Self {
        Self {
            image_width: 1280,
            image_height: 720,
            samples_per_pixel: 64,
            max_depth: 20,
            vfov: 60.0,
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            aperture: 0.0,
            focus_dist: 1.0,
            seed: 0,
            origin: Vec3A::ZERO,
            lower_left: Vec3A::ZERO,
            horizontal: Vec3A::ZERO,
            vertical: Vec3A::ZERO,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            lens_radius: 0.0,
            pixel_samples_scale: 1.0,
        }
    }

    /// Derive the camera basis and film rectangle from the settings.
    fn initialize(&mut self) {
        self.image_height = self.image_height.max(1);
        let aspect = self.image_width as f32 / self.image_height as f32;

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.origin = self.lookfrom;
        self.lens_radius = self.aperture / 2.0;

        // Orthonormal basis: w opposes the view direction
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Film rectangle placed at the focus distance
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;
        self.lower_left = self.origin
            - half_width * self.focus_dist * self.u
            - half_height * self.focus_dist * self.v
            - self.focus_dist * self.w;
        self.horizontal = 2.0 * half_width * self.focus_dist * self.u;
        self.vertical = 2.0 * half_height * self.focus_dist * self.v;
    }

    /// Generate a ray through normalized film coordinates (s, t) in
    /// [0, 1], with the origin jittered inside the lens disk.
    fn get_ray(&self, s: f32, t: f32, rng: &mut impl Rng) -> Ray {
        let rd = self.lens_radius * random::random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let start = self.origin + offset;
        Ray::new(
            start,
            self.lower_left + s * self.horizontal + t * self.vertical - start,
        )
    }

    /// Integrate the radiance arriving along a ray.
    ///
    /// Bounded loop over scatter events carrying the current ray and the
    /// attenuation accumulated so far. A miss returns the sky gradient
    /// scaled by that attenuation; reaching the bounce limit or a failed
    /// scatter returns black. Also returns the number of rays traced for
    /// throughput accounting.
    fn ray_color(&self, r: &Ray, scene: &Scene, rng: &mut impl Rng) -> (Color, u32) {
        let mut current = *r;
        let mut attenuation = Color::ONE;
        let mut bounces = 0u32;

        loop {
            bounces += 1;

            let Some((rec, index)) = scene.hit(&current, Interval::new(T_MIN, f32::INFINITY))
            else {
                return (attenuation * sky_color(&current), bounces);
            };

            if bounces >= self.max_depth {
                return (Color::ZERO, bounces);
            }
            match scene.material(index).scatter(&current, &rec, rng) {
                Some((scatter_attenuation, scattered)) => {
                    attenuation *= scatter_attenuation;
                    current = scattered;
                }
                // Absorbed
                None => return (Color::ZERO, bounces),
            }
        }
    }

    /// Render the scene to an HDR image buffer with linear RGB values.
    ///
    /// Pixels are processed in parallel; each derives its own random
    /// stream from the camera seed, so the output is identical for a
    /// given seed regardless of thread scheduling.
    pub fn render(&mut self, scene: &Scene) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);

        info!("Rendering on {} CPU cores...", rayon::current_num_threads());
        let start = Instant::now();
        let pb = ProgressBar::new(self.image_width as u64 * self.image_height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );
        let ray_count = AtomicU64::new(0);

        let camera = &*self;
        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let mut rng = random::pixel_stream(camera.seed, i, j);
            let mut color = Color::ZERO;
            let mut rays = 0u64;

            for _ in 0..camera.samples_per_pixel {
                let s = (i as f32 + random::random_f32(&mut rng)) / camera.image_width as f32;
                // Film t runs bottom-up, image rows top-down
                let t =
                    1.0 - (j as f32 + random::random_f32(&mut rng)) / camera.image_height as f32;
                let ray = camera.get_ray(s, t, &mut rng);
                let (sample, bounces) = camera.ray_color(&ray, scene, &mut rng);
                color += sample;
                rays += bounces as u64;
            }

            ray_count.fetch_add(rays, Ordering::Relaxed);
            color *= camera.pixel_samples_scale;
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        });

        pb.finish();
        let elapsed = start.elapsed();
        let total_rays = ray_count.load(Ordering::Relaxed);
        info!("Image generated in {:.2?}", elapsed);
        info!(
            "Traced {} rays ({:.2}M rays/s)",
            total_rays,
            total_rays as f64 / elapsed.as_secs_f64() / 1e6
        );

        image
    }
}

/// Background gradient: white at the horizon blending to sky blue upward.
fn sky_color(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let alpha = 0.5 * (unit_direction.y + 1.0);
    (1.0 - alpha) * Color::ONE + alpha * Color::new(0.5, 0.7, 1.0)
}
