use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::SeedCounts;
use crate::error::{Result, SeedplateError};
use crate::session::{Session, TileStatus};

/// Operator-supplied report metadata. All fields must be non-blank before a
/// report is generated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReportMeta {
    pub analyst: String,
    pub batch_label: String,
}

impl ReportMeta {
    pub fn validated(&self) -> Result<()> {
        if self.analyst.trim().is_empty() {
            return Err(SeedplateError::BlankReportField("analyst"));
        }
        if self.batch_label.trim().is_empty() {
            return Err(SeedplateError::BlankReportField("batch_label"));
        }
        Ok(())
    }
}

/// One confirmed tile in the report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub image: String,
    /// 1-based tile number matching the exported file name.
    pub tile: usize,
    pub counts: SeedCounts,
}

/// Viability report: one row per confirmed tile plus an aggregate.
#[derive(Clone, Debug)]
pub struct Report {
    pub meta: ReportMeta,
    pub rows: Vec<ReportRow>,
    pub totals: SeedCounts,
}

/// Build the viability report from a fully reviewed session.
///
/// Refuses synchronously while any tile is still `Pending` or a metadata
/// field is blank; removed tiles are excluded from rows and totals.
pub fn build_report(session: &Session, meta: &ReportMeta) -> Result<Report> {
    meta.validated()?;
    session.ensure_review_complete()?;

    let mut rows = Vec::new();
    let mut totals = SeedCounts::default();
    for entry in session.entries() {
        for tile in &entry.tiles {
            if tile.status != TileStatus::Confirmed {
                continue;
            }
            totals.accumulate(&tile.counts);
            rows.push(ReportRow {
                image: entry.file_name(),
                tile: tile.index + 1,
                counts: tile.counts,
            });
        }
    }
    if rows.is_empty() {
        return Err(SeedplateError::EmptyReport);
    }
    Ok(Report {
        meta: meta.clone(),
        rows,
        totals,
    })
}

/// Write the report as a delimited text file: a header, one row per
/// confirmed tile, and a trailing aggregate row.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let mut out = String::new();
    let _ = writeln!(out, "# analyst: {}", report.meta.analyst);
    let _ = writeln!(out, "# batch: {}", report.meta.batch_label);
    let _ = writeln!(out, "image,tile,total,viable,inviable,viability_pct");
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{:.1}",
            row.image,
            row.tile,
            row.counts.total,
            row.counts.viable,
            row.counts.inviable,
            row.counts.viability_percent()
        );
    }
    let _ = writeln!(
        out,
        "TOTAL,,{},{},{},{:.1}",
        report.totals.total,
        report.totals.viable,
        report.totals.inviable,
        report.totals.viability_percent()
    );
    std::fs::write(path, out)?;
    Ok(())
}

/// Export confirmed ROI coordinates, one row per delimited image, in
/// original-image pixels.
pub fn write_roi_coordinates(session: &Session, path: &Path) -> Result<()> {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "filename,roi_x_original,roi_y_original,roi_width_original,roi_height_original"
    );
    let mut any = false;
    for entry in session.entries() {
        if let Some(roi) = &entry.roi {
            any = true;
            let _ = writeln!(
                out,
                "{},{},{},{},{}",
                entry.file_name(),
                roi.x,
                roi.y,
                roi.width,
                roi.height
            );
        }
    }
    if !any {
        return Err(SeedplateError::EmptyReport);
    }
    std::fs::write(path, out)?;
    Ok(())
}
