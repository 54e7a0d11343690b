use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{MAX_GRID_DIM, TILE_DIR_NAME};
use crate::error::{Result, SeedplateError};
use crate::geometry::SourceRect;
use crate::roi::validate_roi;

/// Tile grid dimensions (columns x rows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub cols: u32,
    pub rows: u32,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            cols: crate::consts::GRID_COLS,
            rows: crate::consts::GRID_ROWS,
        }
    }
}

impl TileGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    pub fn len(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validated(&self) -> Result<()> {
        let in_range = |n: u32| n >= 1 && n <= MAX_GRID_DIM;
        if !in_range(self.cols) || !in_range(self.rows) {
            return Err(SeedplateError::InvalidGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

/// One tile's place within the ROI grid, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePlacement {
    pub index: usize,
    pub rect: SourceRect,
}

/// Partition an ROI into a row-major grid of equal tiles.
///
/// `tileW = roi.w div cols`, `tileH = roi.h div rows`; the division remainder
/// is dropped rather than absorbed into the last row/column, since downstream
/// consumers expect a constant tile size. Offsets are computed in `u64` so an
/// ROI positioned near `u32::MAX` cannot wrap. Crops are clipped to the ROI
/// and to addressable pixel space, and tiles reduced to zero width or height
/// are skipped.
pub fn layout(roi: &SourceRect, grid: &TileGrid) -> Result<Vec<TilePlacement>> {
    grid.validated()?;

    let tile_w = roi.width / grid.cols;
    let tile_h = roi.height / grid.rows;
    let end_x = (u64::from(roi.x) + u64::from(roi.width)).min(u64::from(u32::MAX));
    let end_y = (u64::from(roi.y) + u64::from(roi.height)).min(u64::from(u32::MAX));

    let mut placements = Vec::with_capacity(grid.len());
    for index in 0..grid.len() {
        let row = index as u32 / grid.cols;
        let col = index as u32 % grid.cols;
        let x = u64::from(roi.x) + u64::from(col) * u64::from(tile_w);
        let y = u64::from(roi.y) + u64::from(row) * u64::from(tile_h);
        let width = u64::from(tile_w).min(end_x.saturating_sub(x));
        let height = u64::from(tile_h).min(end_y.saturating_sub(y));
        if width == 0 || height == 0 {
            continue;
        }
        placements.push(TilePlacement {
            index,
            rect: SourceRect::new(x as u32, y as u32, width as u32, height as u32),
        });
    }
    Ok(placements)
}

/// Deterministic tile file path: `<base>_<index+1>.<ext>`, with the base name
/// and extension taken from the source file. Re-exports overwrite in place.
pub fn tile_path(dir: &Path, source: &Path, index: usize) -> PathBuf {
    let base = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("tile");
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    dir.join(format!("{}_{}.{}", base, index + 1, ext))
}

/// Default export directory: a fixed subdirectory beside the source image.
pub fn default_output_dir(source: &Path) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(TILE_DIR_NAME)
}

/// One successfully exported tile crop.
#[derive(Clone, Debug)]
pub struct ExportedTile {
    pub placement: TilePlacement,
    pub path: PathBuf,
}

/// Outcome of an export pass. Per-tile save failures are isolated here
/// instead of aborting the remaining tiles.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub exported: Vec<ExportedTile>,
    pub failed: Vec<(usize, String)>,
}

/// Crop every tile of `roi` out of `image` and save each as an independent
/// file under `output_dir`.
///
/// `progress` is called with `(tiles_done, total_tiles)`.
pub fn export_tiles(
    image: &DynamicImage,
    source_path: &Path,
    roi: &SourceRect,
    grid: &TileGrid,
    output_dir: &Path,
    mut progress: impl FnMut(usize, usize),
) -> Result<ExportOutcome> {
    validate_roi(roi, image.width(), image.height())?;
    let placements = layout(roi, grid)?;
    std::fs::create_dir_all(output_dir)?;

    let total = placements.len();
    let mut outcome = ExportOutcome::default();
    for (done, placement) in placements.into_iter().enumerate() {
        let r = placement.rect;
        let crop = image.crop_imm(r.x, r.y, r.width, r.height);
        let path = tile_path(output_dir, source_path, placement.index);
        match crop.save(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "tile saved");
                outcome.exported.push(ExportedTile { placement, path });
            }
            Err(err) => {
                warn!(tile = placement.index, error = %err, "tile export failed");
                outcome.failed.push((placement.index, err.to_string()));
            }
        }
        progress(done + 1, total);
    }
    Ok(outcome)
}
