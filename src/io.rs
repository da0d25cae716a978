use std::path::Path;

use image::{DynamicImage, ImageError};
use log::debug;

use crate::error::{ContourError, Result};

/// Decodes the image at `path`, guessing the format from its contents.
pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let image = image::ImageReader::open(path)
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.with_guessed_format().map_err(ImageError::IoError))
        .and_then(|reader| reader.decode())
        .map_err(|source| ContourError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        "loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

/// Encodes `image` to `path`, choosing the format from the extension and
/// creating missing parent directories.
pub fn save(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let encode_error = |source| ContourError::Encode {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| encode_error(ImageError::IoError(e)))?;
    }
    image.save(path).map_err(encode_error)
}
