//! Two-valued pixel masks shared between the mask producers (thresholding, edge
//! detection) and the mask consumers (renderer, filler).

use image::{GrayImage, Luma, math::Rect};

use crate::error::{ContourError, Result};
use crate::rect::{bounding_box, corner_points};

/// Byte value stored for [`MaskValue::Background`].
pub const BACKGROUND: u8 = 0;
/// Byte value stored for [`MaskValue::Foreground`].
pub const FOREGROUND: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskValue {
    Foreground,
    Background,
}

impl MaskValue {
    fn from_byte(value: u8) -> Self {
        if value == FOREGROUND {
            Self::Foreground
        } else {
            Self::Background
        }
    }
}

/// A `width` x `height` grid of [`MaskValue`]s backed by 0/255 bytes.
///
/// A mask is immutable once built. The byte representation keeps it
/// interchangeable with single-channel images produced by the filter stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pixels: GrayImage,
}

impl Mask {
    /// Builds a mask by evaluating `f` at every coordinate.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> MaskValue,
    {
        let pixels = GrayImage::from_fn(width, height, |x, y| match f(x, y) {
            MaskValue::Foreground => Luma([FOREGROUND]),
            MaskValue::Background => Luma([BACKGROUND]),
        });
        Self { pixels }
    }

    /// Interprets a single-channel image as a mask: samples equal to 255 are
    /// foreground, everything else is background.
    pub fn from_luma(image: &GrayImage) -> Self {
        let mut pixels = image.clone();
        for p in pixels.pixels_mut() {
            if p.0[0] != FOREGROUND {
                p.0[0] = BACKGROUND;
            }
        }
        Self { pixels }
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` of the mask, comparable with
    /// [`image::GenericImageView::dimensions`] of the buffer it is applied to.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Returns the value at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<MaskValue> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| MaskValue::from_byte(p.0[0]))
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.get(x, y) == Some(MaskValue::Foreground)
    }

    /// The flat row-major byte sequence (`BACKGROUND` = 0, `FOREGROUND` = 255).
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn into_image(self) -> GrayImage {
        self.pixels
    }

    pub fn foreground_count(&self) -> usize {
        self.as_raw().iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// Iterates over the coordinates of all foreground pixels in row-major order.
    pub fn foreground_points(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pixels
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] == FOREGROUND)
            .map(|(x, y, _)| (x, y))
    }

    /// The four image corners. Their mask values are kept as computed, but
    /// they never anchor a bounding box.
    pub fn corners(&self) -> [(u32, u32); 4] {
        corner_points(self.width(), self.height())
    }

    /// Bounding box of the foreground pixels, ignoring the four image corners.
    pub fn bounding_box(&self) -> Option<Rect> {
        let corners = self.corners();
        bounding_box(
            self.foreground_points()
                .filter(|point| !corners.contains(point)),
        )
    }

    /// Fails with [`ContourError::DimensionMismatch`] unless the mask is
    /// exactly `width` x `height`.
    pub fn ensure_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if self.dimensions() != (width, height) {
            return Err(ContourError::DimensionMismatch {
                expected: self.dimensions(),
                actual: (width, height),
            });
        }
        Ok(())
    }
}
