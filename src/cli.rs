use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scene presets.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenePreset {
    /// Nine-sphere test scene with lambert, metal, and glass spheres
    Default,
    /// Random field of small spheres around three large feature spheres
    Cover,
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "raydiance")]
#[command(about = "A stochastic path tracer for sphere scenes")]
pub struct Args {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "64")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces per sample
    #[arg(long, default_value = "20")]
    pub max_depth: u32,

    /// Base seed for the random sampling streams
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Scene preset to render
    #[arg(long, value_enum, default_value = "default")]
    pub scene: ScenePreset,

    /// Send the image to TEV for visualization
    #[arg(long)]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long)]
    pub tev_address: Option<String>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png")]
    pub output: String,
}
