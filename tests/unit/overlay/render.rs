use super::*;
use crate::{overlay::geometry::plan_indicators, raster::palette::ColorTable};

const BG: Rgb8 = Rgb8::new(0x20, 0x40, 0x80);

fn track() -> Rgb8 {
    IndicatorStyle::default().track
}

#[test]
fn zero_total_returns_identical_raster() {
    let input = Raster::filled(100, 100, BG);
    let out = overlay_indicator(input.clone(), 0, 0, &IndicatorStyle::default());
    assert_eq!(out, input);
    assert_eq!(out.table().len(), 1);
}

#[test]
fn skipped_plan_is_pass_through() {
    let input = Raster::filled(10, 10, BG);
    let outcome = plan_indicators(None, None, 3, 0);
    let out = render_indicators(input.clone(), &outcome, &IndicatorStyle::default());
    assert_eq!(out, input);
}

#[test]
fn current_dot_is_solid_and_others_are_rings() {
    let out = overlay_indicator(Raster::filled(100, 100, BG), 3, 1, &IndicatorStyle::default());

    // Centers at x = 35, 50, 65 on y = 85 with radius 5.
    assert_eq!(out.color_at(35, 85), Some(Rgb8::WHITE));
    assert_eq!(out.color_at(50, 85), Some(track()));
    assert_eq!(out.color_at(65, 85), Some(Rgb8::WHITE));

    // Ring edges keep the track color; outside the disc stays background.
    assert_eq!(out.color_at(30, 85), Some(track()));
    assert_eq!(out.color_at(70, 85), Some(track()));
    assert_eq!(out.color_at(35, 79), Some(BG));
    assert_eq!(out.color_at(42, 85), Some(BG));
}

#[test]
fn exactly_one_solid_dot_for_every_position() {
    let total = 5;
    for current in 0..total {
        let out = overlay_indicator(
            Raster::filled(200, 80, BG),
            total,
            current,
            &IndicatorStyle::default(),
        );
        let plan = plan_indicators(Some(200), Some(80), total, current);
        let plan = plan.plan().unwrap();

        let solid: Vec<u32> = (0..plan.count)
            .filter(|&n| {
                let (cx, cy) = plan.center(n);
                out.color_at(cx as u32, cy as u32) == Some(track())
            })
            .collect();
        assert_eq!(solid, vec![current as u32]);
    }
}

#[test]
fn overlay_adds_at_most_two_colors() {
    let out = overlay_indicator(Raster::filled(100, 100, BG), 3, 0, &IndicatorStyle::default());
    assert_eq!(out.table().entries(), &[BG, track(), Rgb8::WHITE]);
}

#[test]
fn existing_colors_are_reused() {
    let table = ColorTable::from_colors([Rgb8::WHITE, track(), BG]).unwrap();
    let raster = Raster::from_parts(100, 100, vec![2; 100 * 100], table).unwrap();
    let out = overlay_indicator(raster, 2, 0, &IndicatorStyle::default());
    assert_eq!(out.table().len(), 3);
}

#[test]
fn full_table_never_grows() {
    let table = ColorTable::from_colors((0..=255u8).map(|v| Rgb8::new(v, 0, 0))).unwrap();
    let raster = Raster::from_parts(100, 100, vec![0; 100 * 100], table).unwrap();
    let out = overlay_indicator(raster, 3, 1, &IndicatorStyle::default());

    assert_eq!(out.table().len(), ColorTable::CAPACITY);
    // Nearest red-ramp entries to light gray and white.
    assert_eq!(out.color_at(50, 85), Some(Rgb8::new(0xDD, 0, 0)));
    assert_eq!(out.color_at(35, 85), Some(Rgb8::new(0xFF, 0, 0)));
}

#[test]
fn rows_wider_than_the_image_are_clipped() {
    let out = overlay_indicator(Raster::filled(20, 20, BG), 10, 0, &IndicatorStyle::default());
    assert_eq!(out.dimensions(), (20, 20));
    assert_eq!(out.pixels().len(), 400);
}

#[test]
fn inner_radius_floors_and_stays_positive() {
    let style = IndicatorStyle::default();
    assert_eq!(style.inner_radius(5), 3);
    assert_eq!(style.inner_radius(12), 9);
    assert_eq!(style.inner_radius(1), 1);
}

#[test]
fn clipped_row_matches_drawing_every_circle() {
    let style = IndicatorStyle::default();
    for (total, current) in [(40, 0), (40, 19), (40, 39), (7, 3)] {
        let out = overlay_indicator(Raster::filled(60, 40, BG), total, current, &style);

        let mut expected = Raster::filled(60, 40, BG);
        let track = expected.resolve_color(style.track);
        let mask = expected.resolve_color(style.mask);
        let PlanOutcome::Draw(plan) = plan_for_raster(&expected, total, current) else {
            panic!("expected a plan");
        };
        for (n, (cx, cy)) in plan.centers().enumerate() {
            expected.fill_circle(cx, cy, plan.radius, track);
            if !plan.is_current(n as u32) {
                expected.fill_circle(cx, cy, style.inner_radius(plan.radius), mask);
            }
        }
        assert_eq!(out, expected, "total {total}, current {current}");
    }
}

#[test]
fn huge_total_only_draws_what_is_on_screen() {
    let started = std::time::Instant::now();
    let out = overlay_indicator(
        Raster::filled(100, 100, Rgb8::BLACK),
        50_000_000,
        0,
        &IndicatorStyle::default(),
    );
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
    assert_eq!(out.dimensions(), (100, 100));
    // The row starts at x = -374_999_943, so centers land on x = 12, 27, 42, ... and the
    // current dot is far off to the left: every visible dot is a ring.
    assert_eq!(out.color_at(12, 85), Some(Rgb8::WHITE));
    assert_eq!(out.color_at(17, 85), Some(track()));
    assert_eq!(out.color_at(57, 85), Some(Rgb8::WHITE));
}
