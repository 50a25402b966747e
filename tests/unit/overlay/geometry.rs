use super::*;

fn draw(outcome: PlanOutcome) -> IndicatorPlan {
    match outcome {
        PlanOutcome::Draw(p) => p,
        PlanOutcome::Skip(r) => panic!("expected a plan, got skip {r:?}"),
    }
}

#[test]
fn small_square_image_matches_reference_layout() {
    let plan = draw(plan_indicators(Some(100), Some(100), 3, 1));
    assert_eq!(plan.radius, 5);
    assert_eq!(plan.spacing, 15);
    assert_eq!(plan.start_x, 35);
    assert_eq!(plan.y, 85);
    assert_eq!(plan.current, 1);
    assert_eq!(plan.centers().collect::<Vec<_>>(), vec![(35, 85), (50, 85), (65, 85)]);
}

#[test]
fn radius_scales_with_width_but_not_below_minimum() {
    assert_eq!(draw(plan_indicators(Some(40), Some(40), 1, 0)).radius, MIN_RADIUS);
    assert_eq!(draw(plan_indicators(Some(599), Some(40), 1, 0)).radius, 5);
    assert_eq!(draw(plan_indicators(Some(1280), Some(720), 1, 0)).radius, 12);
}

#[test]
fn zero_or_negative_total_skips() {
    assert_eq!(
        plan_indicators(Some(100), Some(100), 0, 0),
        PlanOutcome::Skip(SkipReason::NoIndicators)
    );
    assert_eq!(
        plan_indicators(Some(100), Some(100), -4, 2),
        PlanOutcome::Skip(SkipReason::NoIndicators)
    );
}

#[test]
fn missing_dimensions_skip() {
    assert_eq!(
        plan_indicators(None, Some(100), 3, 0),
        PlanOutcome::Skip(SkipReason::UnknownDimensions)
    );
    assert_eq!(
        plan_indicators(Some(100), None, 3, 0),
        PlanOutcome::Skip(SkipReason::UnknownDimensions)
    );
    assert_eq!(
        plan_indicators(Some(0), Some(100), 3, 0),
        PlanOutcome::Skip(SkipReason::UnknownDimensions)
    );
}

#[test]
fn current_index_is_clamped_into_row() {
    assert_eq!(draw(plan_indicators(Some(100), Some(100), 3, 7)).current, 2);
    assert_eq!(draw(plan_indicators(Some(100), Some(100), 3, -1)).current, 0);
}

#[test]
fn row_is_centered_within_one_pixel() {
    for width in [1u32, 7, 99, 100, 101, 333, 640, 1919] {
        for total in 1..=12i64 {
            let plan = draw(plan_indicators(Some(width), Some(50), total, 0));
            let first = plan.start_x;
            let last = plan.start_x + i64::from(plan.spacing) * (total - 1);
            let doubled_mid = first + last;
            assert!(
                (doubled_mid - i64::from(width)).abs() <= 1,
                "width={width} total={total} first={first} last={last}"
            );
        }
    }
}

#[test]
fn plans_depend_only_on_their_own_dimensions() {
    let small = draw(plan_indicators(Some(100), Some(100), 4, 0));
    let large = draw(plan_indicators(Some(1000), Some(500), 4, 0));
    let small_again = draw(plan_indicators(Some(100), Some(100), 4, 0));

    assert_eq!(small, small_again);
    assert_eq!(large.radius, 10);
    assert_eq!(large.y, 470);
    assert_ne!(small.start_x, large.start_x);
}

#[test]
fn visible_range_covers_the_whole_row_when_it_fits() {
    let plan = draw(plan_indicators(Some(100), Some(100), 3, 1));
    assert_eq!(plan.visible(100), 0..3);
    assert_eq!(plan.visible(0), 0..0);
}

#[test]
fn visible_range_keeps_only_circles_touching_the_image() {
    let width = 100;
    let plan = draw(plan_indicators(Some(width), Some(100), 4_000_000_000, 0));
    let visible = plan.visible(width);
    assert!(!visible.is_empty());
    assert!(visible.len() <= 10, "{visible:?}");

    let r = i64::from(plan.radius);
    let touches = |n: u32| {
        let (cx, _) = plan.center(n);
        cx + r >= 0 && cx - r < i64::from(width)
    };
    assert!(visible.clone().all(touches));
    assert!(!touches(visible.start - 1));
    assert!(!touches(visible.end));
}

#[test]
fn visible_range_of_a_row_starting_right_of_the_image_is_empty() {
    let plan = IndicatorPlan {
        radius: 5,
        spacing: 15,
        start_x: 200,
        y: 10,
        count: 4,
        current: 0,
    };
    assert_eq!(plan.visible(100), 0..0);
    let plan = IndicatorPlan { start_x: -200, ..plan };
    assert_eq!(plan.visible(100), 0..0);
}
