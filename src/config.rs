//! Tunables for a layout pass.
//!
//! Everything that used to be a free-floating constant lives here and is
//! handed to the layout functions explicitly. The defaults reproduce the
//! reference roadmap output; change them only together with the expected
//! renders.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Average rendered width of one milestone label character.
    pub avg_char_width_px: f32,
    /// A truncated label never keeps fewer characters than this.
    pub min_readable_chars: usize,
    pub ellipsis: String,
    /// Budget for a month bucket with no same-parity neighbor.
    pub solo_span_months: f32,
    /// Distance assumed on a side that has no same-parity neighbor.
    pub neighbor_fallback_months: f32,
    pub min_span_months: f32,
    pub max_span_months: f32,
    /// Height of one stacked milestone label line.
    pub milestone_line_height_px: f32,
    /// Project name character width, as a fraction of the name font size.
    pub name_char_width_factor: f32,
    /// Project name line height, as a multiple of the name font size.
    pub name_line_height_factor: f32,
    /// Reserved above the first row so its "above" labels are not clipped.
    pub top_margin_px: f32,
    pub inter_row_spacing_px: f32,
    pub min_bar_width_px: f32,
    /// Applied to the mobile-scaled subset of the zoom constants.
    pub mobile_scale: f32,
    /// Months of history shown before the month containing "today".
    pub lookback_months: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            avg_char_width_px: 8.0,
            min_readable_chars: 10,
            ellipsis: "...".to_string(),
            solo_span_months: 8.0,
            neighbor_fallback_months: 6.0,
            min_span_months: 1.5,
            max_span_months: 8.0,
            milestone_line_height_px: 12.0,
            name_char_width_factor: 0.6,
            name_line_height_factor: 1.2,
            top_margin_px: 10.0,
            inter_row_spacing_px: 4.0,
            min_bar_width_px: 2.0,
            mobile_scale: 0.8,
            lookback_months: 1,
        }
    }
}

impl LayoutConfig {
    /// Reject configurations the layout math cannot work with.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("avg_char_width_px", self.avg_char_width_px),
            ("solo_span_months", self.solo_span_months),
            ("neighbor_fallback_months", self.neighbor_fallback_months),
            ("min_span_months", self.min_span_months),
            ("max_span_months", self.max_span_months),
            ("name_char_width_factor", self.name_char_width_factor),
            ("mobile_scale", self.mobile_scale),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidConfig {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        let non_negative = [
            ("milestone_line_height_px", self.milestone_line_height_px),
            ("name_line_height_factor", self.name_line_height_factor),
            ("top_margin_px", self.top_margin_px),
            ("inter_row_spacing_px", self.inter_row_spacing_px),
            ("min_bar_width_px", self.min_bar_width_px),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::InvalidConfig {
                    field,
                    reason: format!("must be zero or positive, got {value}"),
                });
            }
        }
        if self.min_span_months > self.max_span_months {
            return Err(LayoutError::InvalidConfig {
                field: "min_span_months",
                reason: format!(
                    "{} exceeds max_span_months {}",
                    self.min_span_months, self.max_span_months
                ),
            });
        }
        Ok(())
    }
}
