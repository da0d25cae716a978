use image::{DynamicImage, GrayImage, Luma, Rgb};
use imageproc::map::map_pixels;

/// ITU-R 601 luma in 16-bit fixed point: 0.299 R + 0.587 G + 0.114 B, rounded.
pub fn luma(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0.map(u32::from);
    ((r * 19595 + g * 38470 + b * 7471 + 0x8000) >> 16) as u8
}

/// Reduces an image of any channel layout to a single-channel luminance image.
///
/// Single-channel input is copied as-is and the gray sample of gray+alpha input
/// is kept. Alpha never contributes to the result. Wider sample types are
/// first reduced to 8-bit RGB.
pub fn to_luminance(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(gray_alpha) => map_pixels(gray_alpha, |p| Luma([p.0[0]])),
        other => map_pixels(&other.to_rgb8(), |p| Luma([luma(p)])),
    }
}
