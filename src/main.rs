use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contour_highlight::{
    ContourPipeline, PipelineConfig, colors::WHITE, config::load_config, fill::FillMode, io,
};
use image::DynamicImage;
use log::info;

#[derive(Parser, Debug)]
#[command(about = "Process and visualize contours in images")]
struct Args {
    /// Path to the image file
    #[arg(long = "img_path")]
    img_path: PathBuf,

    /// Thickness of contour lines in the custom-thickness overlay [default: 1]
    #[arg(long = "contour_line_thickness", value_parser = clap::value_parser!(u32).range(1..))]
    contour_line_thickness: Option<u32>,

    /// Draw the edge overlays on a white background
    #[arg(long = "white_bg")]
    white_bg: bool,

    /// Color used to fill the plain contours [default: white]
    #[arg(long = "contour_fill_color")]
    contour_fill_color: Option<String>,

    /// Color of the edge strokes [default: red]
    #[arg(long = "stroke_color")]
    stroke_color: Option<String>,

    /// Edge detection threshold, 0-255 [default: 128]
    #[arg(long)]
    threshold: Option<u8>,

    /// Gaussian blur radius applied before edge detection [default: 2.0]
    #[arg(long = "blur_radius")]
    blur_radius: Option<f32>,

    /// Scan step of the edge renderer [default: 1]
    #[arg(long = "contour_stride", value_parser = clap::value_parser!(u32).range(1..))]
    contour_stride: Option<u32>,

    /// Paint plain contours as segments instead of points
    #[arg(long)]
    segments: bool,

    /// JSON configuration file; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the result images
    #[arg(long = "output_dir", default_value = "output")]
    output_dir: PathBuf,

    /// Also write all results side by side into one image
    #[arg(long)]
    montage: bool,

    /// Also write the intermediate edge detection images
    #[arg(long = "save_stages")]
    save_stages: bool,
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(thickness) = self.contour_line_thickness {
            config.contour_line_thickness = thickness;
        }
        if let Some(color) = &self.contour_fill_color {
            config.fill_color = color.clone();
        }
        if let Some(color) = &self.stroke_color {
            config.stroke_color = color.clone();
        }
        if let Some(threshold) = self.threshold {
            config.edge.threshold = threshold;
        }
        if let Some(radius) = self.blur_radius {
            config.edge.blur_radius = radius;
        }
        if let Some(stride) = self.contour_stride {
            config.contour_stride = stride;
        }
        config.white_bg |= self.white_bg;
        config.with_stages |= self.save_stages;
        if self.segments {
            config.fill_mode = FillMode::Segments;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.pipeline_config()?;
    config.validate().context("invalid pipeline parameters")?;

    let original = io::load(&args.img_path).context("reading the input image")?;
    let report = ContourPipeline::new(config)
        .run(&original)
        .context("processing contours")?;

    report
        .save_all(&args.output_dir)
        .context("saving the result images")?;

    if args.montage {
        let path = args.output_dir.join("side_by_side.png");
        let sheet = report.side_by_side(8, WHITE);
        io::save(&DynamicImage::ImageRgba8(sheet), &path).context("saving the side-by-side image")?;
        info!("saved {}", path.display());
    }

    Ok(())
}
