use std::ops::Range;

use crate::raster::indexed::Raster;

/// Smallest indicator radius in pixels, whatever the image width.
pub const MIN_RADIUS: u32 = 5;

/// Layout of one row of indicator circles, centered horizontally near the bottom edge.
///
/// Coordinates are signed: a row wider than the image starts left of it and is clipped
/// when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct IndicatorPlan {
    pub radius: u32,
    /// Center-to-center distance between neighbours.
    pub spacing: u32,
    pub start_x: i64,
    pub y: i64,
    pub count: u32,
    /// Already clamped into `0..count`.
    pub current: u32,
}

impl IndicatorPlan {
    /// Circle centers, left to right.
    pub fn centers(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (0..self.count).map(move |n| self.center(n))
    }

    pub fn center(&self, n: u32) -> (i64, i64) {
        (
            self.start_x + i64::from(n) * i64::from(self.spacing),
            self.y,
        )
    }

    pub fn is_current(&self, n: u32) -> bool {
        n == self.current
    }

    /// Indices of the circles whose disc overlaps columns `0..width`.
    ///
    /// Every other circle is clipped away entirely, so drawing only this range keeps the work
    /// bounded by the image width however large `count` is.
    pub fn visible(&self, width: u32) -> Range<u32> {
        if self.count == 0 || width == 0 {
            return 0..0;
        }
        let r = i64::from(self.radius);
        let s = i64::from(self.spacing.max(1));
        // center + r >= 0 and center - r <= width - 1
        let lo = -(self.start_x + r).div_euclid(s);
        let hi = (i64::from(width) - 1 + r - self.start_x).div_euclid(s);
        let lo = lo.max(0);
        let hi = hi.min(i64::from(self.count) - 1);
        if lo > hi {
            return 0..0;
        }
        lo as u32..hi as u32 + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The sequence has no frames to indicate.
    NoIndicators,
    /// Width or height is unknown (or zero).
    UnknownDimensions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    Draw(IndicatorPlan),
    Skip(SkipReason),
}

impl PlanOutcome {
    pub fn plan(&self) -> Option<&IndicatorPlan> {
        match self {
            Self::Draw(p) => Some(p),
            Self::Skip(_) => None,
        }
    }
}

/// Compute the indicator row for an image of `width` x `height`.
///
/// Malformed input is tolerated rather than rejected: a negative `total` counts as zero and
/// `current` is clamped into the row. The overlay is cosmetic, so the worst outcome is a skip.
pub fn plan_indicators(
    width: Option<u32>,
    height: Option<u32>,
    total: i64,
    current: i64,
) -> PlanOutcome {
    let count = total.clamp(0, i64::from(u32::MAX)) as u32;
    if count == 0 {
        return PlanOutcome::Skip(SkipReason::NoIndicators);
    }
    let (width, height) = match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return PlanOutcome::Skip(SkipReason::UnknownDimensions),
    };
    let current = current.clamp(0, i64::from(count) - 1) as u32;

    let radius = (width / 100).max(MIN_RADIUS);
    let spacing = 3 * radius;
    let row_half = f64::from(spacing) * f64::from(count - 1) / 2.0;
    let start_x = (f64::from(width) / 2.0 - row_half).floor() as i64;
    let y = i64::from(height) - 3 * i64::from(radius);

    PlanOutcome::Draw(IndicatorPlan {
        radius,
        spacing,
        start_x,
        y,
        count,
        current,
    })
}

/// [`plan_indicators`] for a decoded raster.
pub fn plan_for_raster(raster: &Raster, total: i64, current: i64) -> PlanOutcome {
    plan_indicators(
        Some(raster.width()),
        Some(raster.height()),
        total,
        current,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/geometry.rs"]
mod tests;
