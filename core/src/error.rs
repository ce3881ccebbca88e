use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("scanline {row} has {found} pixels, expected {expected}")]
    RaggedScanline {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
