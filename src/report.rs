//! Labeled result images and how they are persisted and composed.

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba, RgbaImage, imageops};
use log::info;

use crate::error::Result;
use crate::io::save;

#[derive(Debug, Clone)]
pub struct LabeledImage {
    pub label: String,
    pub image: DynamicImage,
}

/// An ordered set of labeled images produced by one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: Vec<LabeledImage>,
}

/// File name of a labeled image: spaces become underscores, `.png` is appended.
pub fn file_name(label: &str) -> String {
    format!("{}.png", label.replace(' ', "_"))
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an image under `label`.
    ///
    /// # Arguments
    ///
    /// * `label` - Display name, also the stem of the file written by [`Report::save_all`].
    /// * `image` - Any buffer convertible to a [`DynamicImage`], such as an
    ///   `RgbImage` or a `GrayImage` stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use contour_highlight::Report;
    /// use image::GrayImage;
    ///
    /// let mut report = Report::new();
    /// report.push("Edge Mask", GrayImage::new(4, 4));
    /// assert_eq!(report.labels().collect::<Vec<_>>(), vec!["Edge Mask"]);
    /// ```
    pub fn push(&mut self, label: impl Into<String>, image: impl Into<DynamicImage>) {
        self.entries.push(LabeledImage {
            label: label.into(),
            image: image.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledImage> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&DynamicImage> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.image)
    }

    /// Writes every image to `dir/<label>.png` and returns the written paths
    /// in report order. Stops at the first failure.
    pub fn save_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.entries
            .iter()
            .map(|entry| {
                let path = dir.join(file_name(&entry.label));
                save(&entry.image, &path)?;
                info!("saved {}", path.display());
                Ok(path)
            })
            .collect()
    }

    /// Places all images left to right, top-aligned, separated by `gap`
    /// pixels of `background`.
    pub fn side_by_side(&self, gap: u32, background: Rgba<u8>) -> RgbaImage {
        let height = self.entries.iter().map(|e| e.image.height()).max().unwrap_or(0);
        let width = self.entries.iter().map(|e| e.image.width()).sum::<u32>()
            + gap * self.entries.len().saturating_sub(1) as u32;

        let mut canvas = RgbaImage::from_pixel(width, height, background);
        let mut x = 0i64;
        for entry in &self.entries {
            imageops::overlay(&mut canvas, &entry.image.to_rgba8(), x, 0);
            x += i64::from(entry.image.width() + gap);
        }
        canvas
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a LabeledImage;
    type IntoIter = std::slice::Iter<'a, LabeledImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
