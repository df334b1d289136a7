//! Row heights and vertical offsets for the visible project set.

use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::dates::MonthKey;
use crate::label_place::{AverageCharWidth, Measurer, ResolvedLabels};
use crate::milestones::{MonthBucket, Parity};
use crate::model::LayoutRow;
use crate::zoom::LayoutConstants;

/// Greedy word wrap. Words longer than a line are split hard.
pub fn wrap_text(text: &str, chars_per_line: usize) -> Vec<String> {
    let width = chars_per_line.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Wrap a project name into the label column of the active zoom level.
pub fn wrap_name(name: &str, constants: &LayoutConstants, cfg: &LayoutConfig) -> Vec<String> {
    let measurer = AverageCharWidth::new(constants.font_size_px * cfg.name_char_width_factor);
    wrap_text(name, measurer.chars_fitting(constants.label_width_px))
}

/// Bar height plus one name line height for every wrapped line past the first.
pub fn name_height(line_count: usize, constants: &LayoutConstants, cfg: &LayoutConfig) -> f32 {
    let extra_lines = line_count.saturating_sub(1) as f32;
    constants.bar_height_px + extra_lines * constants.font_size_px * cfg.name_line_height_factor
}

/// Tallest label stack on each side of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackHeights {
    pub above: f32,
    pub below: f32,
}

pub fn milestone_heights(
    buckets: &BTreeMap<MonthKey, MonthBucket>,
    labels: &BTreeMap<MonthKey, ResolvedLabels>,
    cfg: &LayoutConfig,
) -> StackHeights {
    let mut heights = StackHeights::default();
    for (key, bucket) in buckets {
        let line_count = labels.get(key).map_or(bucket.len(), |l| l.lines.len());
        let h = line_count as f32 * cfg.milestone_line_height_px;
        match bucket.parity {
            Parity::Above => heights.above = heights.above.max(h),
            Parity::Below => heights.below = heights.below.max(h),
        }
    }
    heights
}

/// Everything about a row's height that does not depend on its position.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMetrics {
    pub project_id: String,
    pub name_height: f32,
    pub stacks: StackHeights,
}

impl RowMetrics {
    pub fn content_height(&self, constants: &LayoutConstants) -> f32 {
        let stacked = self.stacks.above + constants.bar_height_px + self.stacks.below;
        self.name_height.max(stacked)
    }

    /// Content plus padding, never below the touch target size.
    pub fn row_height(&self, constants: &LayoutConstants) -> f32 {
        (self.content_height(constants) + constants.row_padding_px).max(constants.touch_target_px)
    }
}

/// Stack rows top to bottom in a single pass. Returns the rows and the total
/// height of the chart body (zero for no rows).
pub fn accumulate_rows(
    metrics: &[RowMetrics],
    constants: &LayoutConstants,
    cfg: &LayoutConfig,
) -> (Vec<LayoutRow>, f32) {
    if metrics.is_empty() {
        return (Vec::new(), 0.0);
    }
    let mut rows = Vec::with_capacity(metrics.len());
    let mut top = cfg.top_margin_px;
    for (i, m) in metrics.iter().enumerate() {
        if i > 0 {
            top += cfg.inter_row_spacing_px;
        }
        let height = m.row_height(constants);
        rows.push(LayoutRow {
            project_id: m.project_id.clone(),
            top_offset_px: top,
            height_px: height,
            bar_y: top + m.stacks.above + constants.bar_height_px / 2.0,
            above_label_height_px: m.stacks.above,
            below_label_height_px: m.stacks.below,
        });
        top += height;
    }
    (rows, top)
}
