/// Default ROI width in source pixels (seed plate target rectangle).
pub const TARGET_RECT_WIDTH: u32 = 5676;

/// Default ROI height in source pixels.
pub const TARGET_RECT_HEIGHT: u32 = 1892;

/// Default tile grid columns.
pub const GRID_COLS: u32 = 6;

/// Default tile grid rows.
pub const GRID_ROWS: u32 = 2;

/// Floor for the display scale factor, guarding against zero-area viewports.
pub const MIN_SCALE_FACTOR: f32 = 1e-3;

/// Fallback viewport width (pixels) when the windowing layer reports zero area.
pub const FALLBACK_VIEWPORT_WIDTH: f32 = 400.0;

/// Fallback viewport height (pixels) when the windowing layer reports zero area.
pub const FALLBACK_VIEWPORT_HEIGHT: f32 = 300.0;

/// Output subdirectory for exported tiles, created beside the source images.
pub const TILE_DIR_NAME: &str = "imagens_recortadas";

/// Minimum tile count to use Rayon parallelism during classification.
pub const PARALLEL_TILE_THRESHOLD: usize = 2;

/// Upper bound on tile grid columns and rows. Keeps grid arithmetic far from
/// integer overflow and rejects nonsense values from the command line.
pub const MAX_GRID_DIM: u32 = 64;
