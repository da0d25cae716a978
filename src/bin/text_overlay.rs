use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contour_highlight::{
    colors::parse_color,
    io,
    text::{TextOverlay, load_font},
};
use image::DynamicImage;
use log::info;

#[derive(Parser, Debug)]
#[command(about = "Stamp centered multi-line text on an image")]
struct Args {
    /// Path to the image file
    #[arg(long = "img_path")]
    img_path: PathBuf,

    /// Text to draw; `\n` separates lines
    #[arg(long)]
    text: String,

    /// Local TrueType/OpenType font file
    #[arg(long)]
    font: PathBuf,

    #[arg(long = "font_size", default_value_t = 50.0)]
    font_size: f32,

    /// Fill color of the box behind the text
    #[arg(long, default_value = "white")]
    background: String,

    #[arg(long = "text_color", default_value = "black")]
    text_color: String,

    /// Where to write the result
    #[arg(long, default_value = "result.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let font = load_font(&args.font)?;
    let overlay = TextOverlay::new(args.text.replace("\\n", "\n"), args.font_size)
        .background(parse_color(&args.background).context("--background")?)
        .text_color(parse_color(&args.text_color).context("--text_color")?);

    let mut image = io::load(&args.img_path)
        .context("reading the input image")?
        .to_rgba8();
    let layout = overlay.apply(&mut image, &font).context("drawing the text")?;
    info!("text box {:?}", layout.bounds);

    io::save(&DynamicImage::ImageRgba8(image), &args.out).context("saving the result")?;
    info!("saved {}", args.out.display());
    Ok(())
}
