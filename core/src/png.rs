use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CoreError;
use crate::raster::{RasterImage, Rgb};

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_TRUECOLOR: u8 = 2;
const FILTER_NONE: u8 = 0;

/// Serialize `image` as an 8-bit truecolor, non-interlaced PNG.
///
/// Dimensions are not validated; a zero-sized image yields a file most
/// decoders reject.
pub fn encode(image: &RasterImage) -> Result<Vec<u8>, CoreError> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&image.width().to_be_bytes());
    ihdr.extend_from_slice(&image.height().to_be_bytes());
    // depth, color type, compression, filter method, interlace
    ihdr.extend_from_slice(&[BIT_DEPTH, COLOR_TYPE_TRUECOLOR, 0, 0, 0]);

    let idat = deflate(&scanlines(image))?;

    let mut out = Vec::with_capacity(SIGNATURE.len() + 3 * 12 + ihdr.len() + idat.len());
    out.extend_from_slice(&SIGNATURE);
    push_chunk(&mut out, b"IHDR", &ihdr);
    push_chunk(&mut out, b"IDAT", &idat);
    push_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

pub fn encode_solid(width: u32, height: u32, color: Rgb) -> Result<Vec<u8>, CoreError> {
    encode(&RasterImage::filled(width, height, color))
}

/// Encode fully in memory, then write in one call.
pub fn write_png(path: &Path, image: &RasterImage) -> Result<(), CoreError> {
    let bytes = encode(image)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn scanlines(image: &RasterImage) -> Vec<u8> {
    let stride = 1 + image.width() as usize * 3;
    let mut raw = Vec::with_capacity(stride * image.height() as usize);
    for row in image.rows() {
        raw.push(FILTER_NONE);
        for px in row {
            raw.extend_from_slice(&px.channels());
        }
    }
    raw
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>, CoreError> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::best());
    enc.write_all(raw)?;
    Ok(enc.finish()?)
}

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    let mut crc = crc32fast::Hasher::new();
    crc.update(tag);
    crc.update(payload);

    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}
