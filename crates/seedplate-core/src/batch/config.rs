use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::ReportMeta;
use crate::roi::TargetSize;
use crate::tiler::TileGrid;

/// One image in a batch run: where it is and where its ROI was placed, in
/// original-image pixels. The ROI size comes from the session target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchImage {
    pub path: PathBuf,
    pub roi_x: u32,
    pub roi_y: u32,
}

/// Configuration for a headless batch pass over a set of delimited plates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    pub images: Vec<BatchImage>,

    /// Viability report output path.
    pub report: PathBuf,

    /// ROI coordinate export path (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<PathBuf>,

    /// Tile output directory. Defaults to `imagens_recortadas` beside each
    /// source image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub target: TargetSize,

    #[serde(default)]
    pub grid: TileGrid,

    #[serde(default)]
    pub meta: ReportMeta,
}
