use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedplateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Source {width}x{height} is smaller than the {target_width}x{target_height} target rectangle")]
    SourceTooSmall {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },

    #[error("ROI ({x}, {y}, {width}x{height}) exceeds source dimensions ({source_width}x{source_height})")]
    RoiOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    #[error("ROI size {width}x{height} does not match the session target {target_width}x{target_height}")]
    RoiSizeMismatch {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },

    #[error("No ROI placed for {0}")]
    RoiMissing(PathBuf),

    #[error("Invalid tile grid: {cols}x{rows}")]
    InvalidGrid { cols: u32, rows: u32 },

    #[error("Unknown image: {0}")]
    UnknownImage(PathBuf),

    #[error("Image {path} excluded: {reason}")]
    ImageExcluded { path: PathBuf, reason: String },

    #[error("Tile index {index} out of range (total: {total})")]
    TileIndexOutOfRange { index: usize, total: usize },

    #[error("Tile {index} already resolved as {status}")]
    TileAlreadyResolved { index: usize, status: &'static str },

    #[error("{pending} of {total} tiles still pending review")]
    TilesPending { pending: usize, total: usize },

    #[error("Report field `{0}` must not be blank")]
    BlankReportField(&'static str),

    #[error("Nothing to report: no confirmed tiles")]
    EmptyReport,

    #[error("Batch cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SeedplateError>;
