//! Color specifications accepted by the pipeline and the command line tools.

use image::{Rgb, Rgba};
use palette::{FromColor, Hsl, Srgb};

use crate::error::{ContourError, Result};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Parses a color specification into an opaque-by-default RGBA color.
///
/// Accepted forms:
///
/// * SVG/CSS color names, case-insensitive (`"white"`, `"Crimson"`).
/// * Hex codes `#rgb`, `#rrggbb` and `#rrggbbaa`.
/// * `rgb(r, g, b)`, `rgba(r, g, b, a)` and bare `r,g,b[,a]` with 0-255 components.
/// * `hsl(h, s%, l%)` with hue in degrees.
///
/// # Examples
///
/// ```
/// use contour_highlight::colors::parse_color;
/// use image::Rgba;
///
/// assert_eq!(parse_color("white").unwrap(), Rgba([255, 255, 255, 255]));
/// assert_eq!(parse_color("#f00").unwrap(), Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("0, 128, 255").unwrap(), Rgba([0, 128, 255, 255]));
/// ```
pub fn parse_color(spec: &str) -> Result<Rgba<u8>> {
    let trimmed = spec.trim();
    let lower = trimmed.to_ascii_lowercase();
    let invalid = || ContourError::InvalidColor(spec.to_string());

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }
    if let Some(body) = function_body(&lower, "hsl") {
        return parse_hsl(body).ok_or_else(invalid);
    }
    if let Some(body) = function_body(&lower, "rgba").or_else(|| function_body(&lower, "rgb")) {
        return parse_components(body).ok_or_else(invalid);
    }
    if lower.contains(',') {
        return parse_components(&lower).ok_or_else(invalid);
    }

    let named: Srgb<u8> = palette::named::from_str(&lower).ok_or_else(invalid)?;
    Ok(Rgba([named.red, named.green, named.blue, 255]))
}

/// Drops the alpha channel; drawing never blends.
pub fn to_rgb(color: Rgba<u8>) -> Rgb<u8> {
    let [r, g, b, _] = color.0;
    Rgb([r, g, b])
}

fn function_body<'a>(spec: &'a str, name: &str) -> Option<&'a str> {
    spec.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [255u8; 4];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(Rgba(out))
        }
        6 | 8 => {
            let mut out = [255u8; 4];
            for (i, slot) in out.iter_mut().take(hex.len() / 2).enumerate() {
                *slot = byte(&hex[2 * i..2 * i + 2])?;
            }
            Some(Rgba(out))
        }
        _ => None,
    }
}

fn parse_components(body: &str) -> Option<Rgba<u8>> {
    let parts: Vec<u8> = body
        .split(',')
        .map(|p| p.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [r, g, b] => Some(Rgba([*r, *g, *b, 255])),
        [r, g, b, a] => Some(Rgba([*r, *g, *b, *a])),
        _ => None,
    }
}

fn parse_hsl(body: &str) -> Option<Rgba<u8>> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let [hue, saturation, lightness] = parts.as_slice() else {
        return None;
    };
    let percent = |s: &str| -> Option<f32> {
        let value: f32 = s.strip_suffix('%')?.trim().parse().ok()?;
        (0.0..=100.0).contains(&value).then_some(value / 100.0)
    };

    let hsl_color = Hsl::new(
        hue.parse::<f32>().ok()?,
        percent(saturation)?,
        percent(lightness)?,
    );
    let srgb: Srgb<u8> = Srgb::from_color(hsl_color).into_format();

    Some(Rgba([srgb.red, srgb.green, srgb.blue, 255]))
}
