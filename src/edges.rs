//! Boundary masks from luminance images.
//!
//! The pipeline runs four stages in a fixed order:
//!
//! 1. Gaussian smoothing, so that sharpening does not amplify sensor noise.
//! 2. Edge enhancement, which steepens local intensity gradients.
//! 3. Binarization at the caller's threshold.
//! 4. A find-edges transform over the binary image. Thresholding first yields
//!    crisp one-pixel boundaries instead of a noisy continuous gradient field.
//!
//! Each stage completes over the whole image before the next one starts.

use image::GrayImage;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};
use crate::filters::{EdgeFilters, StandardFilters};
use crate::mask::Mask;
use crate::render::ThicknessParams;
use crate::threshold::{DEFAULT_THRESHOLD, binarize};

pub const DEFAULT_BLUR_RADIUS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Standard deviation of the smoothing stage.
    pub blur_radius: f32,
    /// Binarization level applied after edge enhancement.
    pub threshold: u8,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            blur_radius: DEFAULT_BLUR_RADIUS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl EdgeConfig {
    /// Fails with [`ContourError::DegenerateParameter`] unless `blur_radius`
    /// is finite and positive.
    pub fn validate(&self) -> Result<()> {
        if !self.blur_radius.is_finite() || self.blur_radius <= 0.0 {
            return Err(ContourError::degenerate(
                "blur_radius",
                format!("must be a positive finite number, got {}", self.blur_radius),
            ));
        }
        Ok(())
    }
}

/// Every intermediate image of one edge-detection run.
#[derive(Debug, Clone)]
pub struct EdgeStages {
    pub blurred: GrayImage,
    pub sharpened: GrayImage,
    pub binary: GrayImage,
    pub edges: GrayImage,
    pub mask: Mask,
}

#[derive(Debug, Clone, Default)]
pub struct EdgePipeline<F = StandardFilters> {
    filters: F,
    config: EdgeConfig,
}

impl EdgePipeline {
    /// Creates a pipeline running the standard Gaussian blur and 3x3 kernels.
    ///
    /// # Arguments
    ///
    /// * `config` - Blur radius and binarization threshold. They are checked by
    ///   [`EdgePipeline::detect`], not here.
    ///
    /// # Examples
    ///
    /// ```
    /// use contour_highlight::edges::{EdgeConfig, EdgePipeline};
    /// use image::{GrayImage, Luma};
    ///
    /// let image = GrayImage::from_fn(16, 16, |x, _| Luma([if x < 8 { 0 } else { 255 }]));
    /// let mask = EdgePipeline::new(EdgeConfig::default()).detect(&image).unwrap();
    /// assert_eq!(mask.dimensions(), (16, 16));
    /// ```
    pub fn new(config: EdgeConfig) -> Self {
        Self::with_filters(StandardFilters, config)
    }

    /// Creates a pipeline whose binarization threshold is the one carried by
    /// the overlay `params`, so the mask and the strokes drawn from it agree.
    pub fn for_params(blur_radius: f32, params: &ThicknessParams) -> Self {
        Self::new(EdgeConfig {
            blur_radius,
            threshold: params.threshold,
        })
    }
}

impl<F: EdgeFilters> EdgePipeline<F> {
    pub fn with_filters(filters: F, config: EdgeConfig) -> Self {
        Self { filters, config }
    }

    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Produces the boundary mask of `luminance`.
    pub fn detect(&self, luminance: &GrayImage) -> Result<Mask> {
        self.detect_stages(luminance).map(|stages| stages.mask)
    }

    /// Like [`EdgePipeline::detect`], keeping the output of every stage.
    pub fn detect_stages(&self, luminance: &GrayImage) -> Result<EdgeStages> {
        self.config.validate()?;
        let EdgeConfig {
            blur_radius,
            threshold,
        } = self.config;
        let (width, height) = luminance.dimensions();

        let blurred = self.filters.blur(luminance, blur_radius);
        let sharpened = self.filters.sharpen(&blurred);
        let binary = binarize(&sharpened, threshold);
        let edges = self.filters.gradient_magnitude(&binary);

        for (stage, image) in [("blur", &blurred), ("sharpen", &sharpened), ("edges", &edges)] {
            if image.dimensions() != (width, height) {
                debug!("edge stage `{stage}` changed the image size");
                return Err(ContourError::DimensionMismatch {
                    expected: (width, height),
                    actual: image.dimensions(),
                });
            }
        }

        let mask = Mask::from_luma(&edges);
        debug!(
            "edge pipeline: {width}x{height}, radius={blur_radius}, threshold={threshold}, {} edge pixels",
            mask.foreground_count()
        );

        Ok(EdgeStages {
            blurred,
            sharpened,
            binary,
            edges,
            mask,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn square(size: u32, inset: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let inside = (inset..size - inset).contains(&x) && (inset..size - inset).contains(&y);
            Luma([if inside { 230 } else { 20 }])
        })
    }

    #[test]
    fn detection_is_deterministic() {
        let image = square(32, 8);
        let pipeline = EdgePipeline::new(EdgeConfig::default());
        let first = pipeline.detect(&image).unwrap();
        let second = pipeline.detect(&image).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.dimensions(), (32, 32));
    }

    #[test]
    fn square_produces_boundary_inside_image() {
        let image = square(32, 8);
        let mask = EdgePipeline::new(EdgeConfig::default())
            .detect(&image)
            .unwrap();

        assert!(mask.foreground_count() > 0);
        // Far from the square there is nothing to mark.
        assert!(!mask.is_foreground(2, 16));
        assert!(!mask.is_foreground(16, 16));

        let bbox = mask.bounding_box().unwrap();
        assert!(bbox.x >= 4 && bbox.x <= 10, "bbox: {bbox:?}");
        assert!(bbox.x + bbox.width <= 28, "bbox: {bbox:?}");
    }

    #[test]
    fn overlay_params_set_the_threshold() {
        // A faint square: sharpening never gets anywhere near 255.
        let faint = GrayImage::from_fn(32, 32, |x, y| {
            let inside = (8..24).contains(&x) && (8..24).contains(&y);
            Luma([if inside { 110 } else { 100 }])
        });
        let with_threshold = |threshold| {
            let params = ThicknessParams {
                threshold,
                ..Default::default()
            };
            EdgePipeline::for_params(1.5, &params)
        };

        let pipeline = with_threshold(255);
        assert_eq!(pipeline.config().threshold, 255);
        assert_eq!(pipeline.config().blur_radius, 1.5);
        assert_eq!(pipeline.detect(&faint).unwrap().foreground_count(), 0);

        assert!(with_threshold(105).detect(&faint).unwrap().foreground_count() > 0);
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let dark = GrayImage::from_pixel(10, 10, Luma([10]));
        let mask = EdgePipeline::new(EdgeConfig::default())
            .detect(&dark)
            .unwrap();
        assert_eq!(mask.foreground_count(), 0);
    }

    #[test]
    fn stages_are_exposed() {
        let image = square(24, 6);
        let stages = EdgePipeline::new(EdgeConfig::default())
            .detect_stages(&image)
            .unwrap();
        assert!(stages.binary.as_raw().iter().all(|&v| v == 0 || v == 255));
        assert_eq!(stages.mask, Mask::from_luma(&stages.edges));
        assert_eq!(stages.blurred.dimensions(), (24, 24));
    }

    #[test]
    fn rejects_degenerate_radius() {
        let image = square(8, 2);
        for radius in [0.0, -1.0, f32::NAN] {
            let pipeline = EdgePipeline::new(EdgeConfig {
                blur_radius: radius,
                threshold: 128,
            });
            assert!(matches!(
                pipeline.detect(&image),
                Err(ContourError::DegenerateParameter { name: "blur_radius", .. })
            ));
        }
    }

    struct Identity;

    impl EdgeFilters for Identity {
        fn blur(&self, image: &GrayImage, _radius: f32) -> GrayImage {
            image.clone()
        }
        fn sharpen(&self, image: &GrayImage) -> GrayImage {
            image.clone()
        }
        fn gradient_magnitude(&self, image: &GrayImage) -> GrayImage {
            image.clone()
        }
    }

    #[test]
    fn custom_filters_reduce_to_thresholding() {
        let image = GrayImage::from_raw(4, 1, vec![0, 100, 200, 255]).unwrap();
        let mask = EdgePipeline::with_filters(Identity, EdgeConfig::default())
            .detect(&image)
            .unwrap();
        assert_eq!(mask.as_raw(), &[0, 0, 255, 255]);
    }
}
