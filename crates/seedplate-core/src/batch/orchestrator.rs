use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::classify::{SeedClassifier, SeedCounts};
use crate::consts::PARALLEL_TILE_THRESHOLD;
use crate::error::{Result, SeedplateError};
use crate::io::load_source;
use crate::report::{build_report, write_report, write_roi_coordinates};
use crate::session::{Session, TileStatus};
use crate::tiler::{default_output_dir, export_tiles};

use super::config::BatchConfig;
use super::types::{BatchStage, NoOpReporter, ProgressReporter};

/// Summary of a completed batch pass.
#[derive(Clone, Debug)]
pub struct BatchSummary {
    pub images_tiled: usize,
    pub images_skipped: usize,
    pub tiles_exported: usize,
    pub tiles_failed: usize,
    pub report_rows: usize,
    pub report: PathBuf,
}

struct ClassifyJob {
    image: PathBuf,
    index: usize,
    tile: PathBuf,
}

/// Run the full batch pass: register images, tile every delimited plate,
/// classify each exported tile, and write the viability report.
///
/// Per-file and per-tile failures are recorded and skipped; the batch keeps
/// going. `cancel` is checked between images and between tiles, and a raised
/// flag aborts with [`SeedplateError::Cancelled`], leaving files already
/// written in place.
pub fn run_batch(
    config: &BatchConfig,
    classifier: &dyn SeedClassifier,
    reporter: Arc<dyn ProgressReporter>,
    cancel: &AtomicBool,
) -> Result<BatchSummary> {
    // Blank metadata would only surface at the report stage otherwise, after
    // all the tiling and classification work is already done.
    config.meta.validated()?;

    let mut images = config.images.clone();
    images.sort_by(|a, b| a.path.cmp(&b.path));

    let mut session = Session::new(config.target, config.grid);

    reporter.begin_stage(BatchStage::Loading, Some(images.len()));
    for (done, image) in images.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Err(SeedplateError::Cancelled);
        }
        session.add_image(image.path.clone());
        reporter.advance(done + 1);
    }
    reporter.finish_stage();

    let mut summary = BatchSummary {
        images_tiled: 0,
        images_skipped: 0,
        tiles_exported: 0,
        tiles_failed: 0,
        report_rows: 0,
        report: config.report.clone(),
    };

    reporter.begin_stage(BatchStage::Tiling, Some(images.len()));
    for (done, image) in images.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Err(SeedplateError::Cancelled);
        }
        match tile_one(config, &mut session, image) {
            Ok((exported, failed)) => {
                summary.images_tiled += 1;
                summary.tiles_exported += exported;
                summary.tiles_failed += failed;
            }
            Err(err) => {
                warn!(path = %image.path.display(), error = %err, "image skipped");
                summary.images_skipped += 1;
            }
        }
        reporter.advance(done + 1);
    }
    reporter.finish_stage();

    classify_tiles(&mut session, classifier, &reporter, cancel)?;

    reporter.begin_stage(BatchStage::Reporting, None);
    if let Some(ref coords) = config.coordinates {
        write_roi_coordinates(&session, coords)?;
    }
    let report = build_report(&session, &config.meta)?;
    write_report(&report, &config.report)?;
    summary.report_rows = report.rows.len();
    reporter.finish_stage();

    info!(
        images = summary.images_tiled,
        tiles = summary.tiles_exported,
        rows = summary.report_rows,
        "batch complete"
    );
    Ok(summary)
}

/// Convenience wrapper without progress reporting or cancellation.
pub fn run_batch_silent(
    config: &BatchConfig,
    classifier: &dyn SeedClassifier,
) -> Result<BatchSummary> {
    run_batch(
        config,
        classifier,
        Arc::new(NoOpReporter),
        &AtomicBool::new(false),
    )
}

/// Confirm the ROI for one image, decode it, and export its tiles.
/// Returns `(tiles_exported, tiles_failed)`.
fn tile_one(
    config: &BatchConfig,
    session: &mut Session,
    image: &super::config::BatchImage,
) -> Result<(usize, usize)> {
    let roi = config.target.roi_at(image.roi_x, image.roi_y);
    session.confirm_roi(&image.path, roi)?;

    let decoded = load_source(&image.path)?;
    let output_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&image.path));

    let outcome = export_tiles(
        &decoded,
        &image.path,
        &roi,
        &config.grid,
        &output_dir,
        |_, _| {},
    )?;
    let counts = (outcome.exported.len(), outcome.failed.len());
    session.attach_tiles(&image.path, &outcome.exported)?;
    Ok(counts)
}

/// Classify every pending tile, confirming successes and removing tiles whose
/// classification failed. The batch acts as the reviewer here; interactive
/// front-ends drive confirm/remove from user actions instead.
fn classify_tiles(
    session: &mut Session,
    classifier: &dyn SeedClassifier,
    reporter: &Arc<dyn ProgressReporter>,
    cancel: &AtomicBool,
) -> Result<()> {
    let jobs: Vec<ClassifyJob> = session
        .entries()
        .iter()
        .flat_map(|entry| {
            entry
                .tiles
                .iter()
                .filter(|t| t.status == TileStatus::Pending)
                .map(|t| ClassifyJob {
                    image: entry.path.clone(),
                    index: t.index,
                    tile: t.path.clone(),
                })
        })
        .collect();

    reporter.begin_stage(BatchStage::Classifying, Some(jobs.len()));

    let done = AtomicUsize::new(0);
    let classify_one = |job: &ClassifyJob| -> Result<std::result::Result<SeedCounts, String>> {
        if cancel.load(Ordering::Relaxed) {
            return Err(SeedplateError::Cancelled);
        }
        let counts = load_source(&job.tile)
            .and_then(|img| classifier.classify(&img))
            .map_err(|e| e.to_string());
        reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
        Ok(counts)
    };

    let results: Vec<std::result::Result<SeedCounts, String>> =
        if jobs.len() >= PARALLEL_TILE_THRESHOLD {
            jobs.par_iter().map(classify_one).collect::<Result<_>>()?
        } else {
            jobs.iter().map(classify_one).collect::<Result<_>>()?
        };

    for (job, outcome) in jobs.iter().zip(results) {
        match outcome {
            Ok(counts) => {
                session.set_counts(&job.image, job.index, counts)?;
                session.confirm_tile(&job.image, job.index)?;
            }
            Err(reason) => {
                warn!(
                    tile = %job.tile.display(),
                    error = %reason,
                    "tile classification failed, removed from report"
                );
                session.remove_tile(&job.image, job.index)?;
            }
        }
    }
    reporter.finish_stage();
    Ok(())
}
