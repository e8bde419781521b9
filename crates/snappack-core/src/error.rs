use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unknown package: {0}")]
    UnknownPackage(String),
    #[error("Invalid source image dimensions: {width}x{height}")]
    InvalidSource { width: u32, height: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, SnapPackError>;
