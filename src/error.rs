//! Error type shared by every fallible palette operation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Error, Debug)]
pub enum PaletteError {
    /// A string that is not `#RRGGBB` / `RRGGBB`.
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    /// A palette must hold at least one color.
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// The uploaded image could not be decoded.
    #[error("Unable to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("PNG encode error: {0}")]
    Encode(#[source] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Random source unavailable: {0}")]
    Random(getrandom::Error),
}

impl PaletteError {
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PaletteError::InvalidHex("#12".into()).to_string(),
            "Invalid hex color: \"#12\""
        );
        assert_eq!(
            PaletteError::IndexOutOfRange { index: 4, len: 2 }.to_string(),
            "Index 4 out of range (length 2)"
        );
        assert_eq!(
            PaletteError::invalid_parameter("swatch", 0).to_string(),
            "Invalid parameter: swatch = 0"
        );
    }
}
