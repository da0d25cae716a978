//! Centered multi-line text stamped on an image over a solid box.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_text_mut, text_size},
    rect::Rect,
};

use crate::colors::{BLACK, WHITE};
use crate::error::{ContourError, Result};

/// Loads a TrueType/OpenType font from a local file.
pub fn load_font(path: &Path) -> Result<FontVec> {
    let font_error = |reason: String| ContourError::Font {
        path: path.to_path_buf(),
        reason,
    };
    let bytes = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
    FontVec::try_from_vec(bytes).map_err(|e| font_error(e.to_string()))
}

/// A positioned line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    pub lines: Vec<PlacedLine>,
    /// Inclusive `(left, top, right, bottom)` of the box behind the text.
    pub bounds: (i32, i32, i32, i32),
}

impl TextLayout {
    pub fn rect(&self) -> Option<Rect> {
        let (left, top, right, bottom) = self.bounds;
        let width = u32::try_from(right - left + 1).ok()?;
        let height = u32::try_from(bottom - top + 1).ok()?;
        (width > 0 && height > 0).then(|| Rect::at(left, top).of_size(width, height))
    }
}

/// Stacks lines of measured `(width, height)` around `center`.
///
/// The block is vertically centered on the total height; each line is
/// horizontally centered on its own width.
pub fn layout_lines(lines: &[(&str, (u32, u32))], center: (i32, i32)) -> TextLayout {
    let (cx, cy) = center;
    let total_height: i32 = lines.iter().map(|(_, (_, h))| *h as i32).sum();
    let top = cy - total_height / 2;

    let mut y = top;
    let mut left = i32::MAX;
    let mut right = i32::MIN;
    let mut placed = Vec::with_capacity(lines.len());

    for (text, (w, h)) in lines {
        let half = *w as i32 / 2;
        left = left.min(cx - half);
        right = right.max(cx + half);
        placed.push(PlacedLine {
            x: cx - half,
            y,
            text: text.to_string(),
        });
        y += *h as i32;
    }

    if placed.is_empty() {
        return TextLayout {
            lines: placed,
            bounds: (cx, cy, cx - 1, cy - 1),
        };
    }

    TextLayout {
        lines: placed,
        bounds: (left, top, right, y),
    }
}

/// Text drawn centered on an image over a filled bounding box.
#[derive(Debug, Clone)]
pub struct TextOverlay {
    pub text: String,
    pub font_size: f32,
    pub background: Rgba<u8>,
    pub text_color: Rgba<u8>,
}

impl TextOverlay {
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            background: WHITE,
            text_color: BLACK,
        }
    }

    pub fn background(mut self, color: Rgba<u8>) -> Self {
        self.background = color;
        self
    }

    pub fn text_color(mut self, color: Rgba<u8>) -> Self {
        self.text_color = color;
        self
    }

    fn scale(&self) -> Result<PxScale> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ContourError::degenerate(
                "font_size",
                format!("must be a positive finite number, got {}", self.font_size),
            ));
        }
        Ok(PxScale::from(self.font_size))
    }

    /// Measures every line with `font` and centers the block on the image.
    pub fn layout(&self, font: &FontVec, image_size: (u32, u32)) -> Result<TextLayout> {
        let scale = self.scale()?;
        let measured: Vec<(&str, (u32, u32))> = self
            .text
            .split('\n')
            .map(|line| (line, text_size(scale, font, line)))
            .collect();
        let center = ((image_size.0 / 2) as i32, (image_size.1 / 2) as i32);
        Ok(layout_lines(&measured, center))
    }

    /// Fills the text box with the background color and draws the text on top.
    pub fn apply(&self, image: &mut RgbaImage, font: &FontVec) -> Result<TextLayout> {
        let scale = self.scale()?;
        let layout = self.layout(font, image.dimensions())?;
        if let Some(rect) = layout.rect() {
            draw_filled_rect_mut(image, rect, self.background);
        }
        for line in &layout.lines {
            draw_text_mut(image, self.text_color, line.x, line.y, scale, font, &line.text);
        }
        Ok(layout)
    }
}
