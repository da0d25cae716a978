//! Contour highlighting for raster images, built on [imageproc].
//!
//! An image is reduced to luminance, thresholded into a [`mask::Mask`] and run
//! through an edge pipeline. The masks are then painted back onto copies of the
//! image: [`fill`] marks the background of the luminance mask point by point,
//! while [`render`] draws corner brackets along detected edges. The
//! [`pipeline::ContourPipeline`] sequences these into a labeled [`report::Report`].

pub mod colors;
pub mod config;
pub mod edges;
pub mod error;
pub mod fill;
pub mod filters;
pub mod io;
pub mod luminance;
pub mod mask;
pub mod pipeline;
pub mod rect;
pub mod render;
pub mod report;
pub mod text;
pub mod threshold;

pub use config::PipelineConfig;
pub use error::{ContourError, Result};
pub use mask::{Mask, MaskValue};
pub use pipeline::ContourPipeline;
pub use render::ThicknessParams;
pub use report::Report;
