use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::Style;
use seedplate_core::consts::{TARGET_RECT_HEIGHT, TARGET_RECT_WIDTH};
use seedplate_core::roi::TargetSize;
use seedplate_core::session::{ImageStatus, Session};
use seedplate_core::tiler::TileGrid;

#[derive(Args)]
pub struct InfoArgs {
    /// Image files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Target rectangle width in source pixels
    #[arg(long, default_value_t = TARGET_RECT_WIDTH)]
    pub target_width: u32,

    /// Target rectangle height in source pixels
    #[arg(long, default_value_t = TARGET_RECT_HEIGHT)]
    pub target_height: u32,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let target = TargetSize::new(args.target_width, args.target_height);
    let mut session = Session::new(target, TileGrid::default());
    for file in &args.files {
        session.add_image(file.clone());
    }

    let ok = Style::new().green();
    let bad = Style::new().red();
    println!(
        "Target rectangle: {}x{} px",
        target.width, target.height
    );
    for entry in session.entries() {
        match &entry.status {
            ImageStatus::Ready => println!(
                "  {:<40} {}x{}  {}",
                entry.file_name(),
                entry.width,
                entry.height,
                ok.apply_to("ok")
            ),
            ImageStatus::TooSmall => println!(
                "  {:<40} {}x{}  {}",
                entry.file_name(),
                entry.width,
                entry.height,
                bad.apply_to("too small for target")
            ),
            ImageStatus::LoadFailed(reason) => println!(
                "  {:<40} {}",
                entry.file_name(),
                bad.apply_to(format!("load failed: {reason}"))
            ),
        }
    }
    Ok(())
}
