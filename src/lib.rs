pub mod background;
pub mod catalog;
pub mod config;
pub mod convert;
#[cfg(feature = "render")]
pub mod draw;
pub mod error;
#[cfg(feature = "render")]
pub mod fonts;
#[cfg(feature = "render")]
pub mod icon;
pub mod logger;
pub mod svg;

pub use error::AssetError;
pub use mixlink_core::{RasterImage, Rgb};
