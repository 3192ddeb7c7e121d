use magick_rust::MagickError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThemeError>;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// Logo, font or avatar image could not be located or decoded
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("ImageMagick error: {0}")]
    Magick(#[from] MagickError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid render input: {0}")]
    Input(#[from] serde_json::Error),
}
