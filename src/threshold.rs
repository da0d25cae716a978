use image::{GrayImage, Luma};
use imageproc::map::map_pixels;

use crate::mask::{BACKGROUND, FOREGROUND, Mask};

/// Default binarization level for luminance masks.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Binarizes a luminance image into a 0/255 image: samples `>= threshold`
/// become 255, everything else 0.
///
/// A threshold of 0 marks every pixel.
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    map_pixels(image, |p| {
        if p.0[0] >= threshold {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Thresholds a luminance image into a [`Mask`] of the same dimensions.
///
/// # Arguments
///
/// * `image` - Luminance image, usually from [`crate::luminance::to_luminance`].
/// * `threshold` - Samples at or above this level become
///   [`crate::MaskValue::Foreground`].
///
/// # Examples
///
/// ```
/// use contour_highlight::{MaskValue, threshold::threshold_mask};
/// use image::{GrayImage, Luma};
///
/// let image = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 127 } else { 128 }]));
/// let mask = threshold_mask(&image, 128);
/// assert_eq!(mask.get(0, 0), Some(MaskValue::Background));
/// assert_eq!(mask.get(1, 0), Some(MaskValue::Foreground));
/// ```
pub fn threshold_mask(image: &GrayImage, threshold: u8) -> Mask {
    Mask::from_luma(&binarize(image, threshold))
}
