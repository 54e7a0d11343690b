use crate::consts::{
    FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH, MIN_SCALE_FACTOR,
};
use crate::error::Result;
use crate::geometry::{clamp_position, DisplayRect, SourceRect};
use crate::roi::TargetSize;

/// Maps between a source image's native pixel space and its scaled on-screen
/// representation, and keeps the draggable ROI rectangle inside the displayed
/// image.
///
/// Construction fails when the source cannot host a full target rectangle, so
/// placement is never offered for undersized plates.
#[derive(Clone, Debug)]
pub struct ViewportMapper {
    source_width: u32,
    source_height: u32,
    target: TargetSize,
    scale: f32,
}

impl ViewportMapper {
    pub fn new(
        source_width: u32,
        source_height: u32,
        target: TargetSize,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<Self> {
        if !target.fits(source_width, source_height) {
            return Err(target.too_small_error(source_width, source_height));
        }
        let scale =
            Self::compute_scale(source_width, source_height, viewport_width, viewport_height);
        Ok(Self {
            source_width,
            source_height,
            target,
            scale,
        })
    }

    /// `min(vw/sw, vh/sh, 1.0)`, floored at a small epsilon. A viewport that
    /// has not yet been sized (zero or negative area) falls back to a default
    /// size instead of producing a degenerate scale. Never upscales past 1.0.
    pub fn compute_scale(
        source_width: u32,
        source_height: u32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> f32 {
        let (vw, vh) = if viewport_width <= 0.0 || viewport_height <= 0.0 {
            (FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT)
        } else {
            (viewport_width, viewport_height)
        };
        let scale_x = vw / source_width as f32;
        let scale_y = vh / source_height as f32;
        scale_x.min(scale_y).min(1.0).max(MIN_SCALE_FACTOR)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Displayed pixmap dimensions.
    pub fn display_size(&self) -> (f32, f32) {
        (
            self.source_width as f32 * self.scale,
            self.source_height as f32 * self.scale,
        )
    }

    /// The displayed image area; the ROI rectangle may not leave it.
    pub fn boundary(&self) -> DisplayRect {
        let (w, h) = self.display_size();
        DisplayRect::new(0.0, 0.0, w, h)
    }

    /// Display size of the ROI rectangle, clamped to the boundary.
    fn roi_display_size(&self) -> (f32, f32) {
        let b = self.boundary();
        let w = (self.target.width as f32 * self.scale).max(1.0).min(b.width);
        let h = (self.target.height as f32 * self.scale)
            .max(1.0)
            .min(b.height);
        (w, h)
    }

    /// Initial ROI rectangle, anchored at the displayed image's top-left.
    pub fn place_initial_roi(&self) -> DisplayRect {
        let b = self.boundary();
        let (w, h) = self.roi_display_size();
        DisplayRect::new(b.x, b.y, w, h)
    }

    /// Translate the ROI rectangle by `(dx, dy)`, clamped so the whole
    /// rectangle stays inside the displayed image.
    pub fn drag(&self, rect: &DisplayRect, dx: f32, dy: f32) -> DisplayRect {
        let b = self.boundary();
        let (x, y) = clamp_position(rect.x + dx, rect.y + dy, rect.width, rect.height, &b);
        DisplayRect::new(x, y, rect.width, rect.height)
    }

    /// Resolve the display rectangle's top-left into a full source-space ROI.
    /// The position is clamped to `[0, W - targetW] x [0, H - targetH]` so the
    /// ROI fits inside the source even when scale rounding pushed it out.
    pub fn to_source(&self, rect: &DisplayRect) -> SourceRect {
        let max_x = (self.source_width - self.target.width) as f32;
        let max_y = (self.source_height - self.target.height) as f32;
        let x = (rect.x / self.scale).round().min(max_x).max(0.0) as u32;
        let y = (rect.y / self.scale).round().min(max_y).max(0.0) as u32;
        self.target.roi_at(x, y)
    }

    /// Redisplay a previously saved ROI: the inverse of [`Self::to_source`],
    /// clamped to the displayed image area.
    pub fn from_source(&self, roi: &SourceRect) -> DisplayRect {
        let b = self.boundary();
        let (w, h) = self.roi_display_size();
        let (x, y) = clamp_position(
            roi.x as f32 * self.scale,
            roi.y as f32 * self.scale,
            w,
            h,
            &b,
        );
        DisplayRect::new(x, y, w, h)
    }
}

/// An in-progress drag of the ROI rectangle. Only presses that land inside
/// the current rectangle start a gesture; everything else is ignored.
#[derive(Clone, Copy, Debug)]
pub struct DragGesture {
    grab_dx: f32,
    grab_dy: f32,
}

impl DragGesture {
    pub fn begin(pointer_x: f32, pointer_y: f32, rect: &DisplayRect) -> Option<Self> {
        rect.contains(pointer_x, pointer_y).then_some(Self {
            grab_dx: pointer_x - rect.x,
            grab_dy: pointer_y - rect.y,
        })
    }

    /// Rectangle position for the current pointer location, preserving the
    /// grab offset and clamped to the mapper's boundary.
    pub fn update(
        &self,
        pointer_x: f32,
        pointer_y: f32,
        rect: &DisplayRect,
        mapper: &ViewportMapper,
    ) -> DisplayRect {
        let b = mapper.boundary();
        let (x, y) = clamp_position(
            pointer_x - self.grab_dx,
            pointer_y - self.grab_dy,
            rect.width,
            rect.height,
            &b,
        );
        DisplayRect::new(x, y, rect.width, rect.height)
    }
}
