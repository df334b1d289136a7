use roadmap_timeline::LayoutConfig;
use roadmap_timeline::zoom::{ZoomLevel, resolve_constants, resolve_constants_scaled};

#[test]
fn table_lookup_per_level() {
    assert_eq!(resolve_constants(ZoomLevel::Half, false).month_width_px, 40.0);
    assert_eq!(resolve_constants(ZoomLevel::Normal, false).month_width_px, 100.0);
    assert_eq!(resolve_constants(ZoomLevel::OneAndHalf, false).month_width_px, 150.0);

    let widths: Vec<f32> = ZoomLevel::ALL
        .iter()
        .map(|z| resolve_constants(*z, false).month_width_px)
        .collect();
    assert!(widths.windows(2).all(|w| w[0] < w[1]), "month width grows with zoom: {widths:?}");
}

#[test]
fn unknown_factor_falls_back_to_normal() {
    assert_eq!(ZoomLevel::from_factor(0.75), ZoomLevel::ThreeQuarters);
    assert_eq!(ZoomLevel::from_factor(0.9), ZoomLevel::Normal);
    assert_eq!(ZoomLevel::from_factor(-3.0), ZoomLevel::Normal);
    assert_eq!(ZoomLevel::from_factor(f32::NAN), ZoomLevel::Normal);
    assert_eq!(ZoomLevel::default(), ZoomLevel::Normal);
}

#[test]
fn stepping_clamps_at_both_ends() {
    assert_eq!(ZoomLevel::OneAndHalf.zoom_in(), ZoomLevel::OneAndHalf);
    assert_eq!(ZoomLevel::Half.zoom_out(), ZoomLevel::Half);
    assert_eq!(ZoomLevel::Normal.zoom_in(), ZoomLevel::OneAndQuarter);
    assert_eq!(ZoomLevel::Normal.zoom_out(), ZoomLevel::ThreeQuarters);
}

#[test]
fn reset_after_any_steps_gives_default_constants() {
    let default = resolve_constants(ZoomLevel::Normal, false);
    let mut z = ZoomLevel::Normal;
    for step in 0..12 {
        z = if step % 3 == 0 { z.zoom_out() } else { z.zoom_in() };
    }
    for _ in 0..7 {
        z = z.zoom_out();
    }
    assert_eq!(z, ZoomLevel::Half);
    assert_eq!(resolve_constants(ZoomLevel::from_factor(1.0), false), default);
}

#[test]
fn mobile_scales_only_viewport_constants() {
    let desktop = resolve_constants(ZoomLevel::Normal, false);
    let mobile = resolve_constants(ZoomLevel::Normal, true);
    let scale = LayoutConfig::default().mobile_scale;
    assert_eq!(scale, 0.8);
    assert_eq!(mobile.month_width_px, desktop.month_width_px * scale);
    assert_eq!(mobile.label_width_px, desktop.label_width_px * scale);
    assert_eq!(mobile.font_size_px, desktop.font_size_px * scale);
    assert_eq!(mobile.bar_height_px, desktop.bar_height_px);
    assert_eq!(mobile.touch_target_px, desktop.touch_target_px);
    assert_eq!(mobile.visible_months, desktop.visible_months);

    let custom = resolve_constants_scaled(ZoomLevel::Normal, true, 0.5);
    assert_eq!(custom.month_width_px, 50.0);
}

#[test]
fn serializes_as_factor() {
    assert_eq!(serde_json::to_string(&ZoomLevel::Half).unwrap(), "0.5");
    let z: ZoomLevel = serde_json::from_str("1.25").unwrap();
    assert_eq!(z, ZoomLevel::OneAndQuarter);
    let fallback: ZoomLevel = serde_json::from_str("3.0").unwrap();
    assert_eq!(fallback, ZoomLevel::Normal);
}
