use serde::{Deserialize, Serialize};

use crate::consts::{TARGET_RECT_HEIGHT, TARGET_RECT_WIDTH};
use crate::error::{Result, SeedplateError};
use crate::geometry::SourceRect;

/// Session-wide ROI dimensions in source pixels. Only the ROI position is
/// user-controlled; its size is this constant for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            width: TARGET_RECT_WIDTH,
            height: TARGET_RECT_HEIGHT,
        }
    }
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a source of the given dimensions can host a full ROI.
    pub fn fits(&self, source_width: u32, source_height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && source_width >= self.width
            && source_height >= self.height
    }

    /// ROI of this target size positioned at `(x, y)`.
    pub fn roi_at(&self, x: u32, y: u32) -> SourceRect {
        SourceRect::new(x, y, self.width, self.height)
    }

    /// Error for a source too small to host the target, for per-file reporting.
    pub fn too_small_error(&self, source_width: u32, source_height: u32) -> SeedplateError {
        SeedplateError::SourceTooSmall {
            width: source_width,
            height: source_height,
            target_width: self.width,
            target_height: self.height,
        }
    }
}

/// Validate that an ROI lies fully inside the source image. Widened
/// arithmetic keeps positions near `u32::MAX` from wrapping past the check.
pub fn validate_roi(roi: &SourceRect, source_width: u32, source_height: u32) -> Result<()> {
    let exceeds_width = u64::from(roi.x) + u64::from(roi.width) > u64::from(source_width);
    let exceeds_height = u64::from(roi.y) + u64::from(roi.height) > u64::from(source_height);
    if exceeds_width || exceeds_height {
        return Err(SeedplateError::RoiOutOfBounds {
            x: roi.x,
            y: roi.y,
            width: roi.width,
            height: roi.height,
            source_width,
            source_height,
        });
    }
    Ok(())
}
