mod common;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::sync::Mutex;

use seedplate_core::batch::config::{BatchConfig, BatchImage};
use seedplate_core::batch::{run_batch, run_batch_silent, BatchStage, ProgressReporter};
use seedplate_core::classify::StubClassifier;
use seedplate_core::error::SeedplateError;
use seedplate_core::report::ReportMeta;
use seedplate_core::roi::TargetSize;
use seedplate_core::tiler::TileGrid;

fn config(dir: &tempfile::TempDir, images: Vec<BatchImage>) -> BatchConfig {
    BatchConfig {
        images,
        report: dir.path().join("report.csv"),
        coordinates: Some(dir.path().join("coords.csv")),
        output_dir: Some(dir.path().join("tiles")),
        target: TargetSize::new(48, 16),
        grid: TileGrid::new(3, 2),
        meta: ReportMeta {
            analyst: "maria".into(),
            batch_label: "lote-7".into(),
        },
    }
}

#[test]
fn test_full_batch_run() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_coord_image(dir.path(), "plate_a.png", 60, 20);
    let b = common::write_coord_image(dir.path(), "plate_b.png", 60, 20);

    let config = config(
        &dir,
        vec![
            BatchImage { path: a, roi_x: 6, roi_y: 2 },
            BatchImage { path: b, roi_x: 0, roi_y: 0 },
        ],
    );
    let summary = run_batch_silent(&config, &StubClassifier).unwrap();

    assert_eq!(summary.images_tiled, 2);
    assert_eq!(summary.images_skipped, 0);
    assert_eq!(summary.tiles_exported, 12);
    assert_eq!(summary.tiles_failed, 0);
    assert_eq!(summary.report_rows, 12);

    let report = std::fs::read_to_string(&config.report).unwrap();
    // 2 metadata comments + header + 12 rows + aggregate.
    assert_eq!(report.lines().count(), 16);

    let coords = std::fs::read_to_string(config.coordinates.as_ref().unwrap()).unwrap();
    assert_eq!(coords.lines().count(), 3);

    for i in 1..=6 {
        assert!(dir.path().join(format!("tiles/plate_a_{i}.png")).exists());
        assert!(dir.path().join(format!("tiles/plate_b_{i}.png")).exists());
    }
}

#[test]
fn test_bad_images_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let good = common::write_coord_image(dir.path(), "plate_good.png", 60, 20);
    // Too small to host the 48x16 target.
    let small = common::write_coord_image(dir.path(), "plate_small.png", 30, 10);

    let config = config(
        &dir,
        vec![
            BatchImage { path: good, roi_x: 0, roi_y: 0 },
            BatchImage { path: small, roi_x: 0, roi_y: 0 },
            BatchImage {
                path: PathBuf::from("/nonexistent/plate.png"),
                roi_x: 0,
                roi_y: 0,
            },
        ],
    );
    let summary = run_batch_silent(&config, &StubClassifier).unwrap();

    assert_eq!(summary.images_tiled, 1);
    assert_eq!(summary.images_skipped, 2);
    assert_eq!(summary.report_rows, 6);
}

#[test]
fn test_out_of_bounds_roi_skips_image() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_coord_image(dir.path(), "plate_a.png", 60, 20);

    let config = config(&dir, vec![BatchImage { path: a, roi_x: 20, roi_y: 0 }]);
    // 20 + 48 > 60: placement is refused, nothing partial is written.
    let err = run_batch_silent(&config, &StubClassifier).unwrap_err();
    assert!(matches!(err, SeedplateError::EmptyReport));
    assert!(!dir.path().join("tiles/plate_a_1.png").exists());
}

#[test]
fn test_blank_metadata_fails_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_coord_image(dir.path(), "plate_a.png", 60, 20);

    let mut config = config(&dir, vec![BatchImage { path: a, roi_x: 0, roi_y: 0 }]);
    config.meta.analyst = "  ".into();

    let err = run_batch_silent(&config, &StubClassifier).unwrap_err();
    assert!(matches!(err, SeedplateError::BlankReportField("analyst")));

    // Rejected up front: no tiles, no coordinate file, no report.
    assert!(!dir.path().join("tiles").exists());
    assert!(!config.coordinates.as_ref().unwrap().exists());
    assert!(!config.report.exists());
}

#[test]
fn test_cancelled_before_start() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_coord_image(dir.path(), "plate_a.png", 60, 20);

    let config = config(&dir, vec![BatchImage { path: a, roi_x: 0, roi_y: 0 }]);
    let cancel = AtomicBool::new(true);
    let err = run_batch(
        &config,
        &StubClassifier,
        Arc::new(RecordingReporter::default()),
        &cancel,
    )
    .unwrap_err();
    assert!(matches!(err, SeedplateError::Cancelled));
    assert!(!config.report.exists());
}

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: BatchStage, _total_items: Option<usize>) {
        if let Ok(mut stages) = self.stages.lock() {
            stages.push(stage.to_string());
        }
    }
}

#[test]
fn test_progress_stages_reported_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_coord_image(dir.path(), "plate_a.png", 60, 20);

    let config = config(&dir, vec![BatchImage { path: a, roi_x: 0, roi_y: 0 }]);
    let reporter = Arc::new(RecordingReporter::default());
    run_batch(
        &config,
        &StubClassifier,
        reporter.clone(),
        &AtomicBool::new(false),
    )
    .unwrap();

    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            "Loading images",
            "Exporting tiles",
            "Counting seeds",
            "Writing report"
        ]
    );
}

#[test]
fn test_batch_config_defaults_from_toml() {
    let text = r#"
report = "out.csv"

[[images]]
path = "plate_a.png"
roi_x = 10
roi_y = 20

[meta]
analyst = "maria"
batch_label = "lote-7"
"#;
    let config: BatchConfig = toml::from_str(text).unwrap();
    assert_eq!(config.images.len(), 1);
    assert_eq!(config.images[0].roi_x, 10);
    assert_eq!(config.target, TargetSize::default());
    assert_eq!(config.grid, TileGrid::default());
    assert!(config.output_dir.is_none());
    assert!(config.coordinates.is_none());
}
