// File: crates/chart-core/src/types.rs
// Summary: Shared layout types and constants (margins, measured plot dimensions).

/// Default wrapper width in pixels, used by headless rendering.
pub const WIDTH: f64 = 640.0;
/// Default wrapper height in pixels, used by headless rendering.
pub const HEIGHT: f64 = 320.0;

/// Plot margins, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Offset {
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }

    /// Overwrite only the sides present in `patch`.
    pub fn merge(self, patch: OffsetPatch) -> Self {
        Self {
            top: patch.top.unwrap_or(self.top),
            left: patch.left.unwrap_or(self.left),
            bottom: patch.bottom.unwrap_or(self.bottom),
            right: patch.right.unwrap_or(self.right),
        }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::new(0.0, 45.0, 30.0, 0.0)
    }
}

/// Partial margin override; unset sides keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetPatch {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub bottom: Option<f64>,
    pub right: Option<f64>,
}

impl OffsetPatch {
    pub fn left(mut self, v: f64) -> Self { self.left = Some(v); self }
    pub fn top(mut self, v: f64) -> Self { self.top = Some(v); self }
    pub fn bottom(mut self, v: f64) -> Self { self.bottom = Some(v); self }
    pub fn right(mut self, v: f64) -> Self { self.right = Some(v); self }
}

/// Measured outer box and the derived inner plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartDimensions {
    pub outer_width: f64,
    pub outer_height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub offset: Offset,
}

impl ChartDimensions {
    /// Derive plot dimensions from a measured box.
    ///
    /// Returns `None` until both outer dimensions are positive; inner sizes never go below 0.
    pub fn measure(outer_width: f64, outer_height: f64, offset: Offset) -> Option<Self> {
        if !(outer_width > 0.0) || !(outer_height > 0.0) {
            return None;
        }
        Some(Self {
            outer_width,
            outer_height,
            inner_width: (outer_width - offset.hsum()).max(0.0),
            inner_height: (outer_height - offset.vsum()).max(0.0),
            offset,
        })
    }
}
