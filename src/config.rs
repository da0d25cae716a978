use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::parse_color;
use crate::edges::EdgeConfig;
use crate::error::{ContourError, Result};
use crate::fill::FillMode;
use crate::render::ThicknessParams;
use crate::threshold::DEFAULT_THRESHOLD;

/// Settings of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Luminance threshold of the plain contour mask.
    pub mask_threshold: u8,
    pub edge: EdgeConfig,
    /// Scan step of the edge renderer.
    pub contour_stride: u32,
    /// Stroke width of the custom-thickness product.
    pub contour_line_thickness: u32,
    /// Draw edge overlays on a blank white canvas instead of the plain contours.
    pub white_bg: bool,
    pub fill_color: String,
    pub stroke_color: String,
    pub fill_mode: FillMode,
    /// Append the intermediate edge images to the report.
    pub with_stages: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mask_threshold: DEFAULT_THRESHOLD,
            edge: EdgeConfig::default(),
            contour_stride: 1,
            contour_line_thickness: 1,
            white_bg: false,
            fill_color: "white".to_string(),
            stroke_color: "red".to_string(),
            fill_mode: FillMode::Points,
            with_stages: false,
        }
    }
}

impl PipelineConfig {
    /// Thickness of the default edge overlay.
    pub fn edge_params(&self) -> ThicknessParams {
        ThicknessParams {
            contour_stride: self.contour_stride,
            stroke_width: 1,
            threshold: self.edge.threshold,
        }
    }

    /// Thickness of the custom edge overlay.
    pub fn custom_params(&self) -> ThicknessParams {
        ThicknessParams {
            stroke_width: self.contour_line_thickness,
            ..self.edge_params()
        }
    }

    /// Checks every parameter so that failures surface before any pixel work.
    pub fn validate(&self) -> Result<()> {
        self.edge.validate()?;
        self.edge_params().validate()?;
        self.custom_params().validate()?;
        parse_color(&self.fill_color)?;
        parse_color(&self.stroke_color)?;
        Ok(())
    }
}

/// Reads a JSON pipeline configuration. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let config_error = |reason: String| ContourError::Config {
        path: path.to_path_buf(),
        reason,
    };
    let data = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    serde_json::from_str(&data).map_err(|e| config_error(e.to_string()))
}
