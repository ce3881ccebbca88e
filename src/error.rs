use std::io;
#[cfg(feature = "render")]
use std::path::PathBuf;

use mixlink_core::CoreError;
use thiserror::Error;

use crate::convert::ConvertError;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "render")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[cfg(feature = "render")]
    #[error("unusable font {}: {reason}", .path.display())]
    Font { path: PathBuf, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("layout out of range: {0}")]
    Layout(String),
    #[error("{0} support was not compiled in")]
    Unavailable(&'static str),
    #[error("no background strategy succeeded")]
    Exhausted,
}
