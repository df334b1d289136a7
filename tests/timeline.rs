use chrono::NaiveDate;
use roadmap_timeline::LayoutError;
use roadmap_timeline::timeline::{TimelineWindow, bar_span, months_between, position_of};
use roadmap_timeline::zoom::{ZoomLevel, resolve_constants};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn forty_five_days_at_default_width() {
    let x = position_of(ymd(2025, 2, 15), ymd(2025, 1, 1), 100.0);
    assert!((x - 147.83).abs() < 0.05, "x = {x}");
}

#[test]
fn forty_five_days_at_half_zoom() {
    let width = resolve_constants(ZoomLevel::Half, false).month_width_px;
    let x = position_of(ymd(2025, 2, 15), ymd(2025, 1, 1), width);
    assert!((x - 59.13).abs() < 0.05, "x = {x}");
}

#[test]
fn origin_maps_to_zero_and_earlier_dates_clamp() {
    let origin = ymd(2025, 1, 1);
    for width in [1.0, 40.0, 100.0, 150.0] {
        assert_eq!(position_of(origin, origin, width), 0.0);
    }
    assert_eq!(position_of(ymd(2024, 6, 1), origin, 100.0), 0.0);
}

#[test]
fn position_is_monotonic_and_continuous() {
    let origin = ymd(2025, 1, 1);
    let mut prev = 0.0f32;
    let mut date = ymd(2024, 12, 1);
    while date < ymd(2026, 3, 1) {
        let x = position_of(date, origin, 100.0);
        assert!(x >= prev, "{date}: {x} < {prev}");
        // No stepping at month boundaries: one day is always ~3.3px.
        if date > origin {
            assert!(x - prev < 3.4, "{date}: jump of {}", x - prev);
        }
        prev = x;
        date = date.succ_opt().unwrap();
    }
    assert!((months_between(ymd(2025, 1, 1), ymd(2025, 1, 31)) - 30.0 / 30.44).abs() < 1e-6);
}

#[test]
fn short_bars_get_minimum_width() {
    let origin = ymd(2025, 1, 1);
    let (x, w) = bar_span(ymd(2025, 3, 1), ymd(2025, 3, 1), origin, 100.0, 2.0);
    assert!(x > 0.0);
    assert_eq!(w, 2.0);

    let (x, w) = bar_span(ymd(2024, 11, 1), ymd(2025, 2, 1), origin, 100.0, 2.0);
    assert_eq!(x, 0.0, "start before origin clamps");
    assert!((w - 31.0 / 30.44 * 100.0).abs() < 0.01);
}

#[test]
fn window_rejects_invalid_dimensions() {
    let origin = ymd(2025, 1, 1);
    assert_eq!(
        TimelineWindow::new(origin, 0.0, 12),
        Err(LayoutError::NonPositiveMonthWidth(0.0))
    );
    assert_eq!(TimelineWindow::new(origin, 100.0, 0), Err(LayoutError::EmptyWindow));
    assert!(TimelineWindow::new(origin, 100.0, 12).is_ok());
}

#[test]
fn anchored_window_starts_before_today() {
    let constants = resolve_constants(ZoomLevel::Normal, false);
    let window = TimelineWindow::anchored(ymd(2025, 3, 18), &constants, 1);
    assert_eq!(window.origin_date(), ymd(2025, 2, 1));
    assert_eq!(window.total_months(), 13);
    assert_eq!(window.end_date(), ymd(2026, 3, 1));
    assert!(window.contains(ymd(2025, 2, 1)));
    assert!(!window.contains(ymd(2025, 1, 31)));
    assert!(!window.contains(ymd(2026, 3, 1)));
    assert!(window.overlaps(ymd(2024, 1, 1), ymd(2025, 2, 1)));
    assert!(!window.overlaps(ymd(2024, 1, 1), ymd(2025, 1, 31)));
    assert_eq!(window.width_px(), 1300.0);
}

#[test]
fn month_ticks_cover_the_window() {
    let window = TimelineWindow::new(ymd(2025, 1, 1), 100.0, 3).unwrap();
    let ticks = window.month_ticks();
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["Jan 25", "Feb 25", "Mar 25"]);
    assert_eq!(ticks[0].x_px, 0.0);
    assert!((ticks[1].x_px - 31.0 / 30.44 * 100.0).abs() < 0.01);
}

#[test]
fn date_at_inverts_x_of() {
    let window = TimelineWindow::new(ymd(2025, 1, 1), 100.0, 13).unwrap();
    for date in [ymd(2025, 1, 1), ymd(2025, 2, 15), ymd(2025, 9, 30)] {
        let back = window.date_at(window.x_of(date));
        assert!((back - date).num_days().abs() <= 1, "{date} -> {back}");
    }
}
