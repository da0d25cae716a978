//! Single-channel filters used by the edge pipeline.
//!
//! The 3x3 kernels follow the classic raster-filter convention: interior pixels
//! are convolved, rounded half-up and clamped to `[0, 255]`, while the outermost
//! rows and columns are copied from the input unchanged.

use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;
use num_traits::clamp;

/// Edge enhancement: a high-pass kernel with a strong center weight.
pub const EDGE_ENHANCE: Kernel3x3 = Kernel3x3 {
    weights: [-1, -1, -1, -1, 10, -1, -1, -1, -1],
    divisor: 2,
};

/// Discrete Laplacian-style edge magnitude.
pub const FIND_EDGES: Kernel3x3 = Kernel3x3 {
    weights: [-1, -1, -1, -1, 8, -1, -1, -1, -1],
    divisor: 1,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel3x3 {
    /// Row-major weights.
    pub weights: [i32; 9],
    pub divisor: i32,
}

impl Kernel3x3 {
    /// Convolves `image` with this kernel. Images narrower or shorter than three
    /// pixels are returned unchanged.
    pub fn apply(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let mut out = image.clone();
        if width < 3 || height < 3 {
            return out;
        }

        let divisor = self.divisor.max(1) as f32;
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let mut sum = 0i32;
                for (i, weight) in self.weights.iter().enumerate() {
                    let sx = x + i as u32 % 3 - 1;
                    let sy = y + i as u32 / 3 - 1;
                    sum += weight * i32::from(image.get_pixel(sx, sy).0[0]);
                }
                let value = (sum as f32 / divisor + 0.5).floor();
                out.put_pixel(x, y, Luma([clamp(value, 0.0, 255.0) as u8]));
            }
        }

        out
    }
}

/// The smoothing, sharpening and gradient-magnitude stages of edge detection.
///
/// Every method is pure and maps a single-channel image to one of the same
/// dimensions.
pub trait EdgeFilters {
    fn blur(&self, image: &GrayImage, radius: f32) -> GrayImage;
    fn sharpen(&self, image: &GrayImage) -> GrayImage;
    fn gradient_magnitude(&self, image: &GrayImage) -> GrayImage;
}

/// Gaussian blur from `imageproc`, [`EDGE_ENHANCE`] and [`FIND_EDGES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFilters;

impl EdgeFilters for StandardFilters {
    /// `radius` is used as the Gaussian standard deviation and must be positive.
    fn blur(&self, image: &GrayImage, radius: f32) -> GrayImage {
        gaussian_blur_f32(image, radius)
    }

    fn sharpen(&self, image: &GrayImage) -> GrayImage {
        EDGE_ENHANCE.apply(image)
    }

    fn gradient_magnitude(&self, image: &GrayImage) -> GrayImage {
        FIND_EDGES.apply(image)
    }
}
