use std::path::PathBuf;

/// Errors raised by the contour pipeline and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ContourError {
    /// The source image is missing, unreadable or in an unsupported format.
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The destination is unwritable or has an unsupported extension.
    #[error("failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A mask and the buffer it is applied to disagree in size.
    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        expected.0,
        expected.1,
        actual.0,
        actual.1
    )]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A parameter value that would make a stage meaningless or non-terminating.
    #[error("invalid parameter `{name}`: {reason}")]
    DegenerateParameter { name: &'static str, reason: String },

    #[error("unrecognized color `{0}`")]
    InvalidColor(String),

    #[error("failed to load config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("failed to load font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ContourError>;

impl ContourError {
    pub(crate) fn degenerate(name: &'static str, reason: impl Into<String>) -> Self {
        Self::DegenerateParameter {
            name,
            reason: reason.into(),
        }
    }
}
