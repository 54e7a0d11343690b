use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use seedplate_core::batch::config::{BatchConfig, BatchImage};
use seedplate_core::report::ReportMeta;
use seedplate_core::roi::TargetSize;
use seedplate_core::tiler::TileGrid;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full default BatchConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = BatchConfig {
        images: vec![BatchImage {
            path: PathBuf::from("plate_001.tif"),
            roi_x: 0,
            roi_y: 0,
        }],
        report: PathBuf::from("viability_report.csv"),
        coordinates: Some(PathBuf::from("roi_coordinates.csv")),
        output_dir: None,
        target: TargetSize::default(),
        grid: TileGrid::default(),
        meta: ReportMeta {
            analyst: String::from("analyst name"),
            batch_label: String::from("batch label"),
        },
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
