use crate::{
    foundation::core::Rgb8,
    overlay::geometry::{IndicatorPlan, PlanOutcome, plan_for_raster},
    raster::indexed::Raster,
};

/// Colors and proportions of the indicator dots.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IndicatorStyle {
    /// Outer disc of every dot.
    pub track: Rgb8,
    /// Inner disc punched into every dot except the current one.
    pub mask: Rgb8,
    /// Inner radius as a fraction of the outer radius.
    pub inner_ratio: f32,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            track: Rgb8::from_hex(0xDDDDDD),
            mask: Rgb8::WHITE,
            inner_ratio: 0.75,
        }
    }
}

impl IndicatorStyle {
    pub fn inner_radius(&self, radius: u32) -> u32 {
        let r = (radius as f32 * self.inner_ratio.clamp(0.0, 1.0)).floor() as u32;
        r.max(1)
    }
}

/// Draw the planned dots onto `raster` and hand it back.
///
/// A skipped plan returns the raster untouched, color table included. Otherwise the track and
/// mask colors are resolved once against the raster's own table, every outer disc is drawn
/// and then, for each dot but the current one, the smaller mask disc on top of it.
pub fn render_indicators(
    mut raster: Raster,
    outcome: &PlanOutcome,
    style: &IndicatorStyle,
) -> Raster {
    let Some(plan) = outcome.plan() else {
        return raster;
    };

    let track = raster.resolve_color(style.track);
    let mask = raster.resolve_color(style.mask);
    draw_row(&mut raster, plan, style, track, mask);
    raster
}

/// Plan and draw the indicator row for frame `current` of `total`.
pub fn overlay_indicator(
    raster: Raster,
    total: i64,
    current: i64,
    style: &IndicatorStyle,
) -> Raster {
    let outcome = plan_for_raster(&raster, total, current);
    if let PlanOutcome::Skip(reason) = outcome {
        tracing::debug!(?reason, total, current, "indicator skipped");
    }
    render_indicators(raster, &outcome, style)
}

fn draw_row(
    raster: &mut Raster,
    plan: &IndicatorPlan,
    style: &IndicatorStyle,
    track: u8,
    mask: u8,
) {
    let inner = style.inner_radius(plan.radius);
    for n in plan.visible(raster.width()) {
        let (cx, cy) = plan.center(n);
        raster.fill_circle(cx, cy, plan.radius, track);
        if !plan.is_current(n) {
            raster.fill_circle(cx, cy, inner, mask);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/render.rs"]
mod tests;
