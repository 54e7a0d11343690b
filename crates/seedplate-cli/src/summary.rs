use console::Style;
use seedplate_core::batch::config::BatchConfig;
use seedplate_core::batch::BatchSummary;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
    warn: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
            warn: Style::new().yellow(),
        }
    }
}

pub fn print_run_summary(config: &BatchConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Seedplate Batch"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Images"),
        s.value.apply_to(config.images.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Target"),
        s.value
            .apply_to(format!("{}x{} px", config.target.width, config.target.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Grid"),
        s.value
            .apply_to(format!("{}x{}", config.grid.cols, config.grid.rows))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Report"),
        s.path.apply_to(config.report.display())
    );
    println!();
}

pub fn print_batch_result(summary: &BatchSummary) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tiled"),
        s.value.apply_to(summary.images_tiled)
    );
    if summary.images_skipped > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Skipped"),
            s.warn.apply_to(summary.images_skipped)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tiles"),
        s.value.apply_to(summary.tiles_exported)
    );
    if summary.tiles_failed > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed"),
            s.warn.apply_to(summary.tiles_failed)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Report rows"),
        s.value.apply_to(summary.report_rows)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Report"),
        s.path.apply_to(summary.report.display())
    );
    println!();
}
