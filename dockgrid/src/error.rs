use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DockLayoutError {
    #[error("Unknown anchor value: `{0}`")]
    UnknownAnchor(String),

    #[error("Unknown alignment value: `{0}`")]
    UnknownAlignment(String),

    #[error("Client size must be finite and non-negative, got {width}x{height}")]
    InvalidClientSize { width: f32, height: f32 },

    #[error("Minimum fill size must be finite and non-negative, got {width}x{height}")]
    InvalidFillMinimum { width: f32, height: f32 },

    #[error("Invalid layout options: {0}")]
    InvalidOptions(String),
}
