//! Image output: PNG and EXR export, plus live viewing in TEV.
//!
//! The renderer produces linear f32 RGB. PNG export applies a perceptual
//! transfer curve and quantizes to 8 bits; EXR export keeps the linear
//! HDR values; TEV receives the linear values over a TCP socket.

use std::net::TcpStream;

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

/// Approximate sRGB encoding of a linear channel value in [0, 1].
///
/// Uses the single power curve 1.055 * x^(1/2.4) - 0.055, clamped at
/// zero, rather than the piecewise standard curve.
fn linear_to_srgb(linear: f32) -> f32 {
    (1.055 * linear.powf(1.0 / 2.4) - 0.055).max(0.0)
}

/// Save a linear f32 RGB image as an 8-bit PNG.
///
/// Channel values are clamped to [0, 1] before the transfer curve, so
/// overexposed areas saturate to white. I/O failures are logged, not
/// fatal.
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb([
                (linear_to_srgb(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_srgb(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_srgb(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
            ])
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save a linear f32 RGB image as an EXR file with full HDR precision.
///
/// No tone mapping or gamma is applied; the file keeps the linear light
/// values for viewing or grading downstream.
pub fn save_image_as_exr(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let width = image.width() as usize;
    let result = write_rgb_file(output_path, width, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}

/// Send a linear f32 RGB image to a running TEV instance.
///
/// Connection or protocol failures are logged as warnings; rendering
/// output on disk is unaffected.
pub fn send_image_to_tev(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, tev_address: &str) {
    // Default port if none was given
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };
    let (width, height) = image.dimensions();

    debug!("Connecting to TEV at {}", tev_address);
    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }
    let mut client = TevClient::wrap(stream);

    if let Err(e) = client.send(PacketCreateImage {
        image_name: "raydiance",
        width,
        height,
        channel_names: &["R", "G", "B"],
        grab_focus: true,
    }) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    // TEV wants planar channel data, the buffer is interleaved
    let pixel_count = width as usize * height as usize;
    let mut planar = Vec::with_capacity(pixel_count * 3);
    for channel in 0..3 {
        planar.extend(image.pixels().map(|pixel| pixel[channel]));
    }

    let result = client.send(PacketUpdateImage {
        image_name: "raydiance",
        grab_focus: false,
        channel_names: &["R", "G", "B"],
        x: 0,
        y: 0,
        width,
        height,
        channel_offsets: &[0, pixel_count as u64, 2 * pixel_count as u64],
        channel_strides: &[1, 1, 1],
        data: &planar,
    });
    match result {
        Ok(_) => info!("Image sent to TEV at {}", tev_address),
        Err(e) => warn!("Failed to send image data to TEV: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_curve_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transfer_curve_brightens_midtones() {
        let mid = linear_to_srgb(0.5);
        assert!(mid > 0.5 && mid < 1.0);
    }
}
