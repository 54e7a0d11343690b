pub mod error;
pub mod consts;
pub mod geometry;
pub mod io;
pub mod roi;
pub mod viewport;
pub mod tiler;
pub mod classify;
pub mod session;
pub mod report;
pub mod batch;
