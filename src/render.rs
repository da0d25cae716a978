//! Corner-bracket rendering of edge masks.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};
use crate::mask::Mask;
use crate::threshold::DEFAULT_THRESHOLD;

/// Geometry of one edge overlay, together with the binarization level of the
/// edge mask it traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThicknessParams {
    /// Step between visited rows and columns, also the length of each stroke.
    pub contour_stride: u32,
    /// Thickness of each stroke in pixels.
    pub stroke_width: u32,
    /// Edge threshold used by [`crate::edges::EdgePipeline::for_params`] to
    /// build the mask drawn with these strokes. The renderer itself only
    /// reads the stroke geometry.
    pub threshold: u8,
}

impl Default for ThicknessParams {
    fn default() -> Self {
        Self {
            contour_stride: 1,
            stroke_width: 1,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ThicknessParams {
    /// Checks that the stroke geometry can be drawn.
    ///
    /// # Returns
    ///
    /// [`ContourError::DegenerateParameter`] naming `contour_stride` or
    /// `stroke_width` when either is zero. Any value from 1 up to `u32::MAX`
    /// is accepted; oversized strokes are clipped at the image border.
    pub fn validate(&self) -> Result<()> {
        if self.contour_stride == 0 {
            return Err(ContourError::degenerate(
                "contour_stride",
                "must be at least 1, a zero stride never advances",
            ));
        }
        if self.stroke_width == 0 {
            return Err(ContourError::degenerate(
                "stroke_width",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Row-major scan positions `(x, y)` with both coordinates stepping by `stride`.
///
/// With `stride == 1` every pixel of the grid is produced exactly once.
///
/// # Panics
///
/// Panics if `stride` is zero.
pub fn scan_positions(width: u32, height: u32, stride: u32) -> impl Iterator<Item = (u32, u32)> {
    assert!(stride > 0, "scan stride must be positive");
    let step = stride as usize;
    (0..height)
        .step_by(step)
        .flat_map(move |y| (0..width).step_by(step).map(move |x| (x, y)))
}

/// Paints an edge mask as a filled region plus corner brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourRenderer {
    color: Rgb<u8>,
    params: ThicknessParams,
}

impl ContourRenderer {
    pub fn new(color: Rgb<u8>, params: ThicknessParams) -> Self {
        Self { color, params }
    }

    pub fn params(&self) -> &ThicknessParams {
        &self.params
    }

    /// Renders `mask` onto `target`.
    ///
    /// Every foreground pixel is first overwritten with the stroke color. Then
    /// the mask is scanned with the configured stride and at each foreground
    /// position a horizontal stroke to `(x + stride, y)` and a vertical stroke
    /// to `(x, y + stride)` are drawn, `stroke_width` pixels thick and clipped to
    /// the image.
    ///
    /// Parameters and dimensions are checked before any pixel is written.
    pub fn render(&self, target: &mut RgbImage, mask: &Mask) -> Result<()> {
        self.params.validate()?;
        mask.ensure_dimensions(target.width(), target.height())?;

        for (x, y) in mask.foreground_points() {
            target.put_pixel(x, y, self.color);
        }

        let ThicknessParams {
            contour_stride: stride,
            stroke_width: width,
            ..
        } = self.params;
        let bounds = target.dimensions();
        let length = u64::from(stride) + 1;
        let thickness = u64::from(width);
        let offset = (i64::from(width) - 1) / 2;
        let mut marks = 0usize;

        for (x, y) in scan_positions(mask.width(), mask.height(), stride) {
            if !mask.is_foreground(x, y) {
                continue;
            }
            let (x, y) = (i64::from(x), i64::from(y));
            let horizontal = clipped_rect(x, y - offset, length, thickness, bounds);
            let vertical = clipped_rect(x - offset, y, thickness, length, bounds);
            for rect in horizontal.into_iter().chain(vertical) {
                draw_filled_rect_mut(target, rect, self.color);
            }
            marks += 1;
        }

        debug!(
            "rendered {marks} contour marks (stride={stride}, width={width}) on {}x{}",
            target.width(),
            target.height()
        );
        Ok(())
    }
}

/// Intersects the rectangle with top-left `(left, top)` and size
/// `width` x `height` with an image of size `bounds`.
///
/// The arithmetic is done in 64 bits so that strides and widths up to
/// `u32::MAX` never overflow. Returns `None` when nothing is left.
fn clipped_rect(left: i64, top: i64, width: u64, height: u64, bounds: (u32, u32)) -> Option<Rect> {
    let clip = |start: i64, len: u64, limit: u32| {
        let end = start.saturating_add(i64::try_from(len).unwrap_or(i64::MAX));
        let (start, end) = (start.max(0), end.min(i64::from(limit)));
        (start < end).then_some((start, end - start))
    };
    let (x, w) = clip(left, width, bounds.0)?;
    let (y, h) = clip(top, height, bounds.1)?;
    Some(Rect::at(i32::try_from(x).ok()?, i32::try_from(y).ok()?).of_size(w as u32, h as u32))
}

/// Renders `mask` onto an RGB copy of `base`.
pub fn draw_contours_edge(
    base: &DynamicImage,
    mask: &Mask,
    params: ThicknessParams,
    color: Rgb<u8>,
) -> Result<RgbImage> {
    let mut canvas = base.to_rgb8();
    ContourRenderer::new(color, params).render(&mut canvas, mask)?;
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::MaskValue;
    use std::collections::HashSet;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn params(stride: u32, width: u32) -> ThicknessParams {
        ThicknessParams {
            contour_stride: stride,
            stroke_width: width,
            ..Default::default()
        }
    }

    fn single_point(size: u32, px: u32, py: u32) -> Mask {
        Mask::from_fn(size, size, |x, y| {
            if (x, y) == (px, py) {
                MaskValue::Foreground
            } else {
                MaskValue::Background
            }
        })
    }

    fn painted(image: &RgbImage) -> HashSet<(u32, u32)> {
        image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == RED)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn unit_stride_visits_every_pixel_once() {
        let positions: Vec<_> = scan_positions(7, 5, 1).collect();
        assert_eq!(positions.len(), 35);
        let unique: HashSet<_> = positions.iter().copied().collect();
        assert_eq!(unique.len(), 35);
        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[1], (1, 0));
        assert_eq!(positions[7], (0, 1));
    }

    #[test]
    fn wider_stride_samples_sparsely() {
        let positions: Vec<_> = scan_positions(5, 4, 2).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (2, 0), (4, 0), (0, 2), (2, 2), (4, 2)]
        );
    }

    #[test]
    fn single_point_draws_bracket() {
        let mask = single_point(6, 2, 2);
        let mut canvas = RgbImage::new(6, 6);
        ContourRenderer::new(RED, params(1, 1))
            .render(&mut canvas, &mask)
            .unwrap();

        let expected: HashSet<_> = [(2, 2), (3, 2), (2, 3)].into_iter().collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn stride_extends_strokes() {
        let mask = single_point(8, 2, 2);
        let mut canvas = RgbImage::new(8, 8);
        ContourRenderer::new(RED, params(2, 1))
            .render(&mut canvas, &mask)
            .unwrap();

        let expected: HashSet<_> = [(2, 2), (3, 2), (4, 2), (2, 3), (2, 4)]
            .into_iter()
            .collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn stride_skips_unvisited_mask_pixels_for_brackets() {
        // (1, 1) is not on the stride-2 grid: it is stencilled but gets no bracket.
        let mask = single_point(6, 1, 1);
        let mut canvas = RgbImage::new(6, 6);
        ContourRenderer::new(RED, params(2, 1))
            .render(&mut canvas, &mask)
            .unwrap();

        let expected: HashSet<_> = [(1, 1)].into_iter().collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn stroke_width_thickens_both_strokes() {
        let mask = single_point(9, 4, 4);
        let mut canvas = RgbImage::new(9, 9);
        ContourRenderer::new(RED, params(1, 3))
            .render(&mut canvas, &mask)
            .unwrap();

        let painted = painted(&canvas);
        // Horizontal stroke covers rows 3..=5 over columns 4..=5.
        for y in 3..=5 {
            assert!(painted.contains(&(4, y)));
            assert!(painted.contains(&(5, y)));
        }
        // Vertical stroke covers columns 3..=5 over rows 4..=5.
        for x in 3..=5 {
            assert!(painted.contains(&(x, 5)));
        }
        assert!(!painted.contains(&(6, 4)));
        assert!(!painted.contains(&(4, 6)));
    }

    #[test]
    fn strokes_are_clipped_at_the_border() {
        let mask = single_point(4, 3, 3);
        let mut canvas = RgbImage::new(4, 4);
        ContourRenderer::new(RED, params(3, 2))
            .render(&mut canvas, &mask)
            .unwrap();

        let expected: HashSet<_> = [(3, 3)].into_iter().collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn stride_longer_than_the_image_is_clipped() {
        let mask = single_point(4, 0, 0);
        let mut canvas = RgbImage::new(4, 4);
        ContourRenderer::new(RED, params(10, 1))
            .render(&mut canvas, &mask)
            .unwrap();

        let expected: HashSet<_> = (0..4).map(|x| (x, 0)).chain((0..4).map(|y| (0, y))).collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn half_range_stride_does_not_overflow() {
        let mask = single_point(5, 1, 2);
        let mut canvas = RgbImage::new(5, 5);
        ContourRenderer::new(RED, params(1 << 31, 1))
            .render(&mut canvas, &mask)
            .unwrap();

        // Only (0, 0) is on the scan grid, so (1, 2) is stencilled without a bracket.
        let expected: HashSet<_> = [(1, 2)].into_iter().collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn maximal_stride_and_width_fill_the_image() {
        // Bracket at (0, 0) spans every row and every column once clipped.
        let mask = single_point(4, 0, 0);
        let mut canvas = RgbImage::new(4, 4);
        ContourRenderer::new(RED, params(u32::MAX, u32::MAX))
            .render(&mut canvas, &mask)
            .unwrap();

        let expected: HashSet<_> = (0..4).flat_map(|y| (0..4).map(move |x| (x, y))).collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn maximal_width_is_centered_on_the_stroke() {
        let mask = Mask::from_fn(4, 5, |x, y| {
            if (x, y) == (0, 0) {
                MaskValue::Foreground
            } else {
                MaskValue::Background
            }
        });
        let mut canvas = RgbImage::new(4, 5);
        ContourRenderer::new(RED, params(1, u32::MAX))
            .render(&mut canvas, &mask)
            .unwrap();

        // Horizontal stroke: columns 0..=1 over all rows; vertical: rows 0..=1 over all columns.
        let expected: HashSet<_> = (0..5)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| x <= 1 || y <= 1)
            .collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn maximal_stride_with_wide_strokes() {
        let mask = single_point(4, 0, 0);
        let mut canvas = RgbImage::new(4, 4);
        ContourRenderer::new(RED, params(u32::MAX, 3))
            .render(&mut canvas, &mask)
            .unwrap();

        // Width 3 shifts each stroke one pixel back, which clips to rows 0..=1
        // for the horizontal stroke and columns 0..=1 for the vertical one.
        let expected: HashSet<_> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| x <= 1 || y <= 1)
            .collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn zero_stride_is_rejected_before_drawing() {
        let mask = single_point(4, 1, 1);
        let mut canvas = RgbImage::new(4, 4);
        let result = ContourRenderer::new(RED, params(0, 1)).render(&mut canvas, &mask);

        assert!(matches!(
            result,
            Err(ContourError::DegenerateParameter {
                name: "contour_stride",
                ..
            })
        ));
        assert!(painted(&canvas).is_empty());
    }

    #[test]
    fn zero_width_is_rejected() {
        let mask = single_point(4, 1, 1);
        let mut canvas = RgbImage::new(4, 4);
        assert!(
            ContourRenderer::new(RED, params(1, 0))
                .render(&mut canvas, &mask)
                .is_err()
        );
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let mask = single_point(4, 1, 1);
        let mut canvas = RgbImage::new(5, 5);
        let result = ContourRenderer::new(RED, params(1, 1)).render(&mut canvas, &mask);

        assert!(matches!(
            result,
            Err(ContourError::DimensionMismatch {
                expected: (4, 4),
                actual: (5, 5)
            })
        ));
        assert!(painted(&canvas).is_empty());
    }

    #[test]
    fn draw_contours_edge_leaves_base_untouched() {
        let base = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 5, Rgb([9, 9, 9])));
        let mask = single_point(5, 0, 0);
        let out = draw_contours_edge(&base, &mask, params(1, 1), RED).unwrap();

        assert_eq!(out.get_pixel(0, 0), &RED);
        assert_eq!(out.get_pixel(4, 4), &Rgb([9, 9, 9]));
        assert_eq!(base.to_rgb8().get_pixel(0, 0), &Rgb([9, 9, 9]));
    }
}
