//! End-to-end contour products for one input image.

use image::{DynamicImage, Rgb, RgbImage};
use log::{debug, warn};

use crate::colors::{parse_color, to_rgb};
use crate::config::PipelineConfig;
use crate::edges::EdgePipeline;
use crate::error::Result;
use crate::fill::fill_background;
use crate::luminance::to_luminance;
use crate::report::Report;
use crate::render::draw_contours_edge;
use crate::threshold::threshold_mask;

pub const ORIGINAL: &str = "Original Image";
pub const CONTOURS_WITHOUT_EDGE: &str = "Contours Without Edge";
pub const CONTOURS_WITH_EDGE: &str = "Contours With Edge";
pub const CONTOURS_WITH_CUSTOM_EDGE: &str = "Contours With Custom Edge Thickness";

#[derive(Debug, Clone, Default)]
pub struct ContourPipeline {
    config: PipelineConfig,
}

impl ContourPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage on `original` and returns the labeled products in order:
    /// the original, the plain contours, the default edge overlay and the
    /// custom-thickness overlay, followed by the edge stages when requested.
    ///
    /// The plain contours keep an alpha channel when `original` has one. The
    /// edge overlays are always RGB.
    ///
    /// # Returns
    ///
    /// The [`Report`], or the first parameter error. All parameters are
    /// validated before any pixel is processed.
    pub fn run(&self, original: &DynamicImage) -> Result<Report> {
        let config = &self.config;
        config.validate()?;
        let fill_color = parse_color(&config.fill_color)?;
        let stroke_color = to_rgb(parse_color(&config.stroke_color)?);
        let (width, height) = (original.width(), original.height());
        debug!("running contour pipeline on {width}x{height} image with {config:?}");

        let luminance = to_luminance(original);

        let mask = threshold_mask(&luminance, config.mask_threshold);
        let plain = if original.color().has_alpha() {
            let mut plain = original.to_rgba8();
            fill_background(&mut plain, &mask, fill_color, config.fill_mode)?;
            DynamicImage::ImageRgba8(plain)
        } else {
            let mut plain = original.to_rgb8();
            fill_background(&mut plain, &mask, to_rgb(fill_color), config.fill_mode)?;
            DynamicImage::ImageRgb8(plain)
        };

        let base = if config.white_bg {
            DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
        } else {
            plain.clone()
        };

        let edge_params = config.edge_params();
        let edges = EdgePipeline::for_params(config.edge.blur_radius, &edge_params)
            .detect_stages(&luminance)?;
        if edges.mask.foreground_count() == 0 {
            warn!("edge pipeline found no boundaries, overlays equal their background");
        } else if let Some(bbox) = edges.mask.bounding_box() {
            debug!(
                "edge bounds: x={} y={} {}x{}",
                bbox.x, bbox.y, bbox.width, bbox.height
            );
        }

        let with_edge = draw_contours_edge(&base, &edges.mask, edge_params, stroke_color)?;
        let with_custom_edge =
            draw_contours_edge(&base, &edges.mask, config.custom_params(), stroke_color)?;

        let mut report = Report::new();
        report.push(ORIGINAL, original.clone());
        report.push(CONTOURS_WITHOUT_EDGE, plain);
        report.push(CONTOURS_WITH_EDGE, with_edge);
        report.push(CONTOURS_WITH_CUSTOM_EDGE, with_custom_edge);

        if config.with_stages {
            report.push("Edge Blurred", edges.blurred);
            report.push("Edge Sharpened", edges.sharpened);
            report.push("Edge Binary", edges.binary);
            report.push("Edge Mask", edges.mask.into_image());
        }

        Ok(report)
    }
}
