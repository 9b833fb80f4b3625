use clap::Parser;
use glam::Vec3A;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

mod cli;
mod logger;
mod output;

use cli::{Args, ScenePreset};
use logger::init_logger;
use output::{save_image_as_exr, save_image_as_png, send_image_to_tev};
use raydiance::camera::Camera;
use raydiance::material::Material;
use raydiance::random;
use raydiance::scene::Scene;
use raydiance::sphere::Sphere;

/// Nine-sphere test scene: a large ground sphere, a row of lambert and
/// metal spheres with increasing fuzz, one glass sphere, and one small
/// elevated diffuse sphere.
fn default_scene() -> Scene {
    let spheres = vec![
        Sphere::new(Vec3A::new(0.0, -100.5, -1.0), 100.0),
        Sphere::new(Vec3A::new(2.0, 0.0, -1.0), 0.5),
        Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 0.5),
        Sphere::new(Vec3A::new(-2.0, 0.0, -1.0), 0.5),
        Sphere::new(Vec3A::new(2.0, 0.0, 1.0), 0.5),
        Sphere::new(Vec3A::new(0.0, 0.0, 1.0), 0.5),
        Sphere::new(Vec3A::new(-2.0, 0.0, 1.0), 0.5),
        Sphere::new(Vec3A::new(0.5, 1.0, 0.5), 0.5),
        Sphere::new(Vec3A::new(-1.5, 1.5, 0.0), 0.3),
    ];
    let materials = vec![
        Material::Lambertian { albedo: Vec3A::new(0.8, 0.8, 0.8) },
        Material::Lambertian { albedo: Vec3A::new(0.8, 0.4, 0.4) },
        Material::Lambertian { albedo: Vec3A::new(0.4, 0.8, 0.4) },
        Material::Metal { albedo: Vec3A::new(0.4, 0.4, 0.8), fuzz: 0.0 },
        Material::Metal { albedo: Vec3A::new(0.4, 0.8, 0.4), fuzz: 0.0 },
        Material::Metal { albedo: Vec3A::new(0.4, 0.8, 0.4), fuzz: 0.2 },
        Material::Metal { albedo: Vec3A::new(0.4, 0.8, 0.4), fuzz: 0.6 },
        Material::Dielectric { refraction_index: 1.5 },
        Material::Lambertian { albedo: Vec3A::new(0.8, 0.6, 0.2) },
    ];
    Scene::from_parts(spheres, materials)
}

/// Random "book cover" scene: a gray ground sphere, a jittered 22x22
/// grid of small spheres, and three large feature spheres.
fn cover_scene(rng: &mut impl Rng) -> Scene {
    let mut scene = Scene::new();

    scene.add(
        Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0),
        Material::Lambertian { albedo: Vec3A::splat(0.5) },
    );

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(rng);
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(rng),
            );

            // Keep the small spheres away from the large glass sphere row
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                Material::Lambertian {
                    albedo: random::random_color(rng) * random::random_color(rng),
                }
            } else if choose_mat < 0.95 {
                Material::Metal {
                    albedo: random::random_color_range(rng, 0.5, 1.0),
                    fuzz: random::random_f32_range(rng, 0.0, 0.5),
                }
            } else {
                Material::Dielectric { refraction_index: 1.5 }
            };
            scene.add(Sphere::new(center, 0.2), material);
        }
    }

    scene.add(
        Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0),
        Material::Dielectric { refraction_index: 1.5 },
    );
    scene.add(
        Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0),
        Material::Lambertian { albedo: Vec3A::new(0.4, 0.2, 0.1) },
    );
    scene.add(
        Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0),
        Material::Metal { albedo: Vec3A::new(0.7, 0.6, 0.5), fuzz: 0.0 },
    );

    scene
}

/// Configure the camera for the chosen scene preset.
fn create_camera(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.image_width = args.width;
    camera.image_height = args.height;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.seed = args.seed;
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);

    match args.scene {
        ScenePreset::Default => {
            camera.lookfrom = Vec3A::new(0.0, 2.0, 3.0);
            camera.vfov = 60.0;
            camera.aperture = 0.1;
            camera.focus_dist = 3.0;
        }
        ScenePreset::Cover => {
            camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
            camera.vfov = 20.0;
            camera.aperture = 0.1;
            camera.focus_dist = 10.0;
        }
    }

    camera
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    info!(
        "Raydiance {} - git {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );
    info!(
        "Image resolution: {}x{}, samples per pixel: {}, seed: {}",
        args.width, args.height, args.samples_per_pixel, args.seed
    );

    let scene = match args.scene {
        ScenePreset::Default => default_scene(),
        ScenePreset::Cover => {
            let mut rng = ChaCha20Rng::seed_from_u64(args.seed);
            cover_scene(&mut rng)
        }
    };
    info!("Scene contains {} spheres", scene.len());

    let mut camera = create_camera(&args);
    let image = camera.render(&scene);

    if args.tev || args.tev_address.is_some() {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address);
    }

    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
