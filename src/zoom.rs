//! Zoom scale model: five discrete zoom levels, each mapped to a bundle of
//! layout constants through a lookup table.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;

/// One of the five supported zoom steps, ordered from most zoomed out to
/// most zoomed in. Serialized as its numeric factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub enum ZoomLevel {
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 5] = [
        ZoomLevel::Half,
        ZoomLevel::ThreeQuarters,
        ZoomLevel::Normal,
        ZoomLevel::OneAndQuarter,
        ZoomLevel::OneAndHalf,
    ];

    pub fn factor(self) -> f32 {
        match self {
            ZoomLevel::Half => 0.5,
            ZoomLevel::ThreeQuarters => 0.75,
            ZoomLevel::Normal => 1.0,
            ZoomLevel::OneAndQuarter => 1.25,
            ZoomLevel::OneAndHalf => 1.5,
        }
    }

    /// Map a numeric factor to its level. Anything that is not one of the
    /// five factors falls back to `Normal`.
    pub fn from_factor(factor: f32) -> Self {
        match Self::ALL.iter().find(|z| (z.factor() - factor).abs() < 1e-4) {
            Some(level) => *level,
            None => {
                log::debug!("unknown zoom factor {factor}, using 1.0");
                ZoomLevel::Normal
            }
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Next larger level; stays put at the top.
    pub fn zoom_in(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Next smaller level; stays put at the bottom.
    pub fn zoom_out(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    /// Desktop constants for this level.
    pub fn constants(self) -> LayoutConstants {
        ZOOM_TABLE[self.index()]
    }
}

impl From<f32> for ZoomLevel {
    fn from(factor: f32) -> Self {
        Self::from_factor(factor)
    }
}

impl From<ZoomLevel> for f32 {
    fn from(level: ZoomLevel) -> Self {
        level.factor()
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// Layout constants for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConstants {
    pub month_width_px: f32,
    pub visible_months: u32,
    pub font_size_px: f32,
    pub label_width_px: f32,
    pub bar_height_px: f32,
    pub touch_target_px: f32,
    pub milestone_font_size_px: f32,
    pub density_scale: f32,
    pub row_padding_px: f32,
}

impl LayoutConstants {
    /// Shrink the viewport-sensitive subset (widths, fonts, padding) by
    /// `scale`. Bar height, touch target and month count are left alone.
    pub fn scaled_for_mobile(self, scale: f32) -> Self {
        Self {
            month_width_px: self.month_width_px * scale,
            font_size_px: self.font_size_px * scale,
            label_width_px: self.label_width_px * scale,
            milestone_font_size_px: self.milestone_font_size_px * scale,
            row_padding_px: self.row_padding_px * scale,
            ..self
        }
    }
}

// Indexed by `ZoomLevel as usize`.
const ZOOM_TABLE: [LayoutConstants; 5] = [
    LayoutConstants {
        month_width_px: 40.0,
        visible_months: 24,
        font_size_px: 8.0,
        label_width_px: 100.0,
        bar_height_px: 8.0,
        touch_target_px: 16.0,
        milestone_font_size_px: 8.0,
        density_scale: 0.6,
        row_padding_px: 6.0,
    },
    LayoutConstants {
        month_width_px: 60.0,
        visible_months: 18,
        font_size_px: 10.0,
        label_width_px: 140.0,
        bar_height_px: 10.0,
        touch_target_px: 20.0,
        milestone_font_size_px: 9.0,
        density_scale: 0.8,
        row_padding_px: 8.0,
    },
    LayoutConstants {
        month_width_px: 100.0,
        visible_months: 13,
        font_size_px: 14.0,
        label_width_px: 200.0,
        bar_height_px: 14.0,
        touch_target_px: 24.0,
        milestone_font_size_px: 10.0,
        density_scale: 1.0,
        row_padding_px: 12.0,
    },
    LayoutConstants {
        month_width_px: 125.0,
        visible_months: 10,
        font_size_px: 16.0,
        label_width_px: 240.0,
        bar_height_px: 16.0,
        touch_target_px: 28.0,
        milestone_font_size_px: 11.0,
        density_scale: 1.2,
        row_padding_px: 14.0,
    },
    LayoutConstants {
        month_width_px: 150.0,
        visible_months: 8,
        font_size_px: 18.0,
        label_width_px: 280.0,
        bar_height_px: 18.0,
        touch_target_px: 32.0,
        milestone_font_size_px: 12.0,
        density_scale: 1.4,
        row_padding_px: 16.0,
    },
];

/// Constants for `zoom` on a desktop or mobile viewport, using the default
/// [`LayoutConfig::mobile_scale`].
pub fn resolve_constants(zoom: ZoomLevel, is_mobile: bool) -> LayoutConstants {
    resolve_constants_scaled(zoom, is_mobile, LayoutConfig::default().mobile_scale)
}

/// Like [`resolve_constants`] with an explicit mobile scale.
pub fn resolve_constants_scaled(zoom: ZoomLevel, is_mobile: bool, mobile_scale: f32) -> LayoutConstants {
    let base = zoom.constants();
    if is_mobile {
        base.scaled_for_mobile(mobile_scale)
    } else {
        base
    }
}
