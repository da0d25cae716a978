//! Point filling of thresholded luminance masks.
//!
//! Unlike [`crate::render::ContourRenderer`], which marks foreground pixels,
//! the filler paints where the mask is *background*. The two stages consume
//! masks produced under different conventions and the polarity of each is kept
//! as is.

use image::{ImageBuffer, Pixel};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mask::{BACKGROUND, Mask};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Paint each background pixel.
    #[default]
    Points,
    /// For every background pixel `(x, y)` with `x < width - 1` and
    /// `y < height - 1`, paint `(x, y)`, `(x + 1, y)` and `(x, y + 1)`.
    Segments,
}

/// Paints `color` onto `target` wherever `mask` is background.
///
/// Foreground pixels are never written. Rows are filled in parallel.
pub fn fill_background<P>(
    target: &mut ImageBuffer<P, Vec<u8>>,
    mask: &Mask,
    color: P,
    mode: FillMode,
) -> Result<()>
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    let (width, height) = target.dimensions();
    mask.ensure_dimensions(width, height)?;
    if width == 0 || height == 0 {
        return Ok(());
    }

    match mode {
        FillMode::Points => fill_points(target, mask, color),
        FillMode::Segments => fill_segments(target, mask, color),
    }

    debug!(
        "filled {} background pixels ({mode:?}) on {width}x{height}",
        mask.as_raw().iter().filter(|&&v| v == BACKGROUND).count()
    );
    Ok(())
}

fn fill_points<P>(target: &mut ImageBuffer<P, Vec<u8>>, mask: &Mask, color: P)
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    let channels = P::CHANNEL_COUNT as usize;
    let width = target.width() as usize;
    let color = color.channels();

    target
        .par_chunks_mut(width * channels)
        .zip(mask.as_raw().par_chunks(width))
        .for_each(|(row, mask_row)| {
            for (pixel, &value) in row.chunks_exact_mut(channels).zip(mask_row) {
                if value == BACKGROUND {
                    pixel.copy_from_slice(color);
                }
            }
        });
}

fn fill_segments<P>(target: &mut ImageBuffer<P, Vec<u8>>, mask: &Mask, color: P)
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    let (width, height) = target.dimensions();
    let raw = mask.as_raw();

    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            if raw[(y * width + x) as usize] == BACKGROUND {
                target.put_pixel(x, y, color);
                target.put_pixel(x + 1, y, color);
                target.put_pixel(x, y + 1, color);
            }
        }
    }
}
