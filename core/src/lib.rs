mod error;
mod png;
mod raster;

pub use error::CoreError;
pub use png::{encode, encode_solid, write_png, SIGNATURE};
pub use raster::{RasterImage, Rgb};
