use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classify::SeedCounts;
use crate::error::{Result, SeedplateError};
use crate::geometry::SourceRect;
use crate::io::probe_dimensions;
use crate::roi::{validate_roi, TargetSize};
use crate::tiler::{ExportedTile, TileGrid};

/// Review status of one tile. Transitions only leave `Pending` and are
/// terminal once set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileStatus {
    Pending,
    Confirmed,
    Removed,
}

impl TileStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Removed => "removed",
        }
    }
}

impl std::fmt::Display for TileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts and review state for one exported tile.
#[derive(Clone, Debug)]
pub struct TileResult {
    /// Row-major grid index.
    pub index: usize,
    pub rect: SourceRect,
    pub path: PathBuf,
    pub counts: SeedCounts,
    pub status: TileStatus,
}

impl TileResult {
    pub fn pending(exported: &ExportedTile) -> Self {
        Self {
            index: exported.placement.index,
            rect: exported.placement.rect,
            path: exported.path.clone(),
            counts: SeedCounts::default(),
            status: TileStatus::Pending,
        }
    }
}

/// Why an image is excluded from placement and tiling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageStatus {
    Ready,
    /// File missing, unreadable, or corrupt.
    LoadFailed(String),
    /// Source smaller than the session target rectangle.
    TooSmall,
}

/// One registered source image and everything the session knows about it.
#[derive(Clone, Debug)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub status: ImageStatus,
    pub roi: Option<SourceRect>,
    pub tiles: Vec<TileResult>,
}

impl ImageEntry {
    pub fn is_ready(&self) -> bool {
        self.status == ImageStatus::Ready
    }

    /// Whether the user has confirmed an ROI for this image.
    pub fn is_delimited(&self) -> bool {
        self.roi.is_some()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Owns all per-image annotation state for one run: the ROI map and the
/// per-tile results. Replaces the original's global mutable UI state with an
/// explicit object passed to the mapper and tiler.
pub struct Session {
    target: TargetSize,
    grid: TileGrid,
    entries: Vec<ImageEntry>,
}

impl Session {
    pub fn new(target: TargetSize, grid: TileGrid) -> Self {
        Self {
            target,
            grid,
            entries: Vec::new(),
        }
    }

    pub fn target(&self) -> TargetSize {
        self.target
    }

    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Register a source image by probing its dimensions. Load failures and
    /// undersized plates are flagged on the entry, never fatal: they are
    /// excluded from placement and tiling but stay visible in the list.
    pub fn add_image(&mut self, path: PathBuf) {
        let (width, height, status) = match probe_dimensions(&path) {
            Ok((w, h)) if self.target.fits(w, h) => (w, h, ImageStatus::Ready),
            Ok((w, h)) => {
                warn!(
                    path = %path.display(),
                    width = w,
                    height = h,
                    "image smaller than target rectangle, excluded"
                );
                (w, h, ImageStatus::TooSmall)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load image");
                (0, 0, ImageStatus::LoadFailed(err.to_string()))
            }
        };
        self.entries.push(ImageEntry {
            path,
            width,
            height,
            status,
            roi: None,
            tiles: Vec::new(),
        });
    }

    pub fn entry(&self, path: &Path) -> Option<&ImageEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    fn index_of(&self, path: &Path) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.path == path)
            .ok_or_else(|| SeedplateError::UnknownImage(path.to_path_buf()))
    }

    fn ensure_ready(&self, idx: usize) -> Result<()> {
        let entry = &self.entries[idx];
        match &entry.status {
            ImageStatus::Ready => Ok(()),
            ImageStatus::TooSmall => {
                Err(self.target.too_small_error(entry.width, entry.height))
            }
            ImageStatus::LoadFailed(reason) => Err(SeedplateError::ImageExcluded {
                path: entry.path.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// Confirm the ROI for an image. Fails closed: the ROI must match the
    /// session target size and lie fully inside the source, and nothing is
    /// stored otherwise. Re-confirmation replaces the ROI and discards any
    /// tiles from the prior placement.
    pub fn confirm_roi(&mut self, path: &Path, roi: SourceRect) -> Result<()> {
        let idx = self.index_of(path)?;
        self.ensure_ready(idx)?;
        if roi.width != self.target.width || roi.height != self.target.height {
            return Err(SeedplateError::RoiSizeMismatch {
                width: roi.width,
                height: roi.height,
                target_width: self.target.width,
                target_height: self.target.height,
            });
        }
        let entry = &self.entries[idx];
        validate_roi(&roi, entry.width, entry.height)?;

        let entry = &mut self.entries[idx];
        entry.roi = Some(roi);
        entry.tiles.clear();
        Ok(())
    }

    /// Record the exported tiles for an image, each starting `Pending` with
    /// empty counts.
    pub fn attach_tiles(&mut self, path: &Path, exported: &[ExportedTile]) -> Result<()> {
        let idx = self.index_of(path)?;
        if self.entries[idx].roi.is_none() {
            return Err(SeedplateError::RoiMissing(path.to_path_buf()));
        }
        self.entries[idx].tiles = exported.iter().map(TileResult::pending).collect();
        Ok(())
    }

    fn tile_mut(&mut self, path: &Path, index: usize) -> Result<&mut TileResult> {
        let idx = self.index_of(path)?;
        let total = self.entries[idx].tiles.len();
        self.entries[idx]
            .tiles
            .iter_mut()
            .find(|t| t.index == index)
            .ok_or(SeedplateError::TileIndexOutOfRange { index, total })
    }

    /// Store classifier counts for a tile still under review.
    pub fn set_counts(&mut self, path: &Path, index: usize, counts: SeedCounts) -> Result<()> {
        let tile = self.tile_mut(path, index)?;
        if tile.status != TileStatus::Pending {
            return Err(SeedplateError::TileAlreadyResolved {
                index,
                status: tile.status.name(),
            });
        }
        tile.counts = counts;
        Ok(())
    }

    pub fn confirm_tile(&mut self, path: &Path, index: usize) -> Result<()> {
        self.transition(path, index, TileStatus::Confirmed)
    }

    pub fn remove_tile(&mut self, path: &Path, index: usize) -> Result<()> {
        self.transition(path, index, TileStatus::Removed)
    }

    fn transition(&mut self, path: &Path, index: usize, to: TileStatus) -> Result<()> {
        let tile = self.tile_mut(path, index)?;
        if tile.status != TileStatus::Pending {
            return Err(SeedplateError::TileAlreadyResolved {
                index,
                status: tile.status.name(),
            });
        }
        tile.status = to;
        Ok(())
    }

    pub fn total_tiles(&self) -> usize {
        self.entries.iter().map(|e| e.tiles.len()).sum()
    }

    /// Tiles still awaiting a confirm/remove decision, across all images.
    pub fn pending_tiles(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| &e.tiles)
            .filter(|t| t.status == TileStatus::Pending)
            .count()
    }

    /// Next image still awaiting delimitation, searching forward from
    /// `after` and wrapping around. `None` when every valid image is done.
    pub fn next_undelimited(&self, after: Option<&Path>) -> Option<&ImageEntry> {
        let start = after
            .and_then(|p| self.entries.iter().position(|e| e.path == p))
            .map(|i| i + 1)
            .unwrap_or(0);
        let n = self.entries.len();
        (0..n)
            .map(|offset| &self.entries[(start + offset) % n])
            .find(|e| e.is_ready() && !e.is_delimited())
    }

    /// Fail-closed gate for report generation: every tile must be resolved.
    pub fn ensure_review_complete(&self) -> Result<()> {
        let pending = self.pending_tiles();
        if pending > 0 {
            return Err(SeedplateError::TilesPending {
                pending,
                total: self.total_tiles(),
            });
        }
        Ok(())
    }
}
