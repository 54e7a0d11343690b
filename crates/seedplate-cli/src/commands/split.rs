use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use seedplate_core::consts::{
    GRID_COLS, GRID_ROWS, TARGET_RECT_HEIGHT, TARGET_RECT_WIDTH,
};
use seedplate_core::io::load_source;
use seedplate_core::roi::{validate_roi, TargetSize};
use seedplate_core::tiler::{default_output_dir, export_tiles, TileGrid};

#[derive(Args)]
pub struct SplitArgs {
    /// Input image
    pub file: PathBuf,

    /// ROI left edge in source pixels
    #[arg(short = 'x', long)]
    pub roi_x: u32,

    /// ROI top edge in source pixels
    #[arg(short = 'y', long)]
    pub roi_y: u32,

    /// Target rectangle width in source pixels
    #[arg(long, default_value_t = TARGET_RECT_WIDTH)]
    pub target_width: u32,

    /// Target rectangle height in source pixels
    #[arg(long, default_value_t = TARGET_RECT_HEIGHT)]
    pub target_height: u32,

    /// Tile grid columns
    #[arg(long, default_value_t = GRID_COLS)]
    pub cols: u32,

    /// Tile grid rows
    #[arg(long, default_value_t = GRID_ROWS)]
    pub rows: u32,

    /// Output directory (default: imagens_recortadas beside the source)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &SplitArgs) -> Result<()> {
    let target = TargetSize::new(args.target_width, args.target_height);
    let grid = TileGrid::new(args.cols, args.rows);

    let image = load_source(&args.file)?;
    if !target.fits(image.width(), image.height()) {
        bail!(target.too_small_error(image.width(), image.height()));
    }
    let roi = target.roi_at(args.roi_x, args.roi_y);
    validate_roi(&roi, image.width(), image.height())?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.file));

    println!(
        "Splitting {} ({}x{}), ROI at ({}, {}), {}x{} grid",
        args.file.display(),
        image.width(),
        image.height(),
        roi.x,
        roi.y,
        grid.cols,
        grid.rows
    );

    let pb = ProgressBar::new(grid.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} tiles")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let outcome = export_tiles(&image, &args.file, &roi, &grid, &output_dir, |done, _| {
        pb.set_position(done as u64)
    })?;
    pb.finish_and_clear();

    println!(
        "{} tiles saved to {}",
        outcome.exported.len(),
        output_dir.display()
    );
    for (index, reason) in &outcome.failed {
        eprintln!("  tile {} failed: {}", index + 1, reason);
    }
    Ok(())
}
