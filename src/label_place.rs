//! Deterministic label budgeting for milestone month buckets.
//!
//! Each month bucket renders its milestones as a vertical stack of lines
//! (`"4th: Spain Launch"`) next to the first marker of the month. Stacks on
//! the same side of the bar may collide horizontally, stacks on opposite
//! sides never do. The width a bucket may use is therefore derived from its
//! nearest same-side neighbors only:
//!
//! - no same-side bucket at all: a generous solo span (8 months by default)
//! - otherwise the span between the midpoints to the left and right
//!   neighbors; a missing neighbor is replaced by a fixed distance
//!   (6 months by default) on that side
//! - the span is clamped to `[min_span_months, max_span_months]`
//!
//! The pixel width is then converted to a character budget using a
//! [`Measurer`] and every line of the stack is shortened to that budget
//! with a trailing ellipsis. The algorithm is fully deterministic and uses
//! no font metrics.
//!
//! Glossary:
//! - Anchor: the date of the earliest milestone in a bucket; the marker and
//!   the label stack are drawn there.
//! - Same-row bucket: another bucket of the same project with the same parity.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::LayoutConfig;
use crate::dates::MonthKey;
use crate::milestones::MonthBucket;
use crate::timeline::days_between;
use crate::timeline::AVERAGE_DAYS_PER_MONTH;

/// Text width estimation.
pub trait Measurer {
    /// Rendered width of `text` in pixels.
    fn measure(&self, text: &str) -> f32;
    /// How many characters fit into `width_px`.
    fn chars_fitting(&self, width_px: f32) -> usize;
}

/// Every character is assumed to be `px_per_char` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageCharWidth {
    pub px_per_char: f32,
}

impl AverageCharWidth {
    pub fn new(px_per_char: f32) -> Self {
        Self { px_per_char }
    }
}

impl Measurer for AverageCharWidth {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.px_per_char
    }

    fn chars_fitting(&self, width_px: f32) -> usize {
        if self.px_per_char <= 0.0 || width_px <= 0.0 {
            return 0;
        }
        (width_px / self.px_per_char).floor() as usize
    }
}

/// Horizontal room granted to one bucket's label stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBudget {
    pub span_months: f32,
    pub available_width_px: f32,
    /// Characters that fit into `available_width_px`.
    pub raw_char_limit: usize,
    /// Limit actually enforced: never below the minimum readable length
    /// plus the ellipsis, so a truncated line is never longer than this.
    pub char_limit: usize,
}

/// Width in months available to a bucket anchored at `anchor`, given the
/// anchors of the other buckets sharing its side of the bar.
pub fn span_months(anchor: NaiveDate, same_row_anchors: &[NaiveDate], cfg: &LayoutConfig) -> f32 {
    if same_row_anchors.is_empty() {
        return cfg.solo_span_months;
    }
    let left = same_row_anchors.iter().filter(|d| **d < anchor).max();
    let right = same_row_anchors.iter().filter(|d| **d > anchor).min();

    let half_gap_months = |from: NaiveDate, to: NaiveDate| {
        days_between(from, to) as f32 / 2.0 / AVERAGE_DAYS_PER_MONTH
    };
    let left_part = left.map_or(cfg.neighbor_fallback_months, |l| half_gap_months(*l, anchor));
    let right_part = right.map_or(cfg.neighbor_fallback_months, |r| half_gap_months(anchor, *r));

    (left_part + right_part).clamp(cfg.min_span_months, cfg.max_span_months)
}

/// Budget for `bucket`, looking only at same-parity buckets in `all`.
pub fn label_budget(
    bucket: &MonthBucket,
    all: &BTreeMap<MonthKey, MonthBucket>,
    month_width_px: f32,
    measurer: &dyn Measurer,
    cfg: &LayoutConfig,
) -> LabelBudget {
    let span = match bucket.anchor_date() {
        Some(anchor) => {
            let same_row: Vec<NaiveDate> = all
                .values()
                .filter(|b| b.key != bucket.key && b.parity == bucket.parity)
                .filter_map(MonthBucket::anchor_date)
                .collect();
            span_months(anchor, &same_row, cfg)
        }
        None => cfg.solo_span_months,
    };
    let available_width_px = span * month_width_px;
    let raw_char_limit = measurer.chars_fitting(available_width_px);
    let floor = cfg.min_readable_chars + cfg.ellipsis.chars().count();
    LabelBudget {
        span_months: span,
        available_width_px,
        raw_char_limit,
        char_limit: raw_char_limit.max(floor),
    }
}

/// Shorten `text` to at most `char_limit` characters, ending in the
/// configured ellipsis. Text that already fits is returned unchanged.
pub fn truncate_label(text: &str, char_limit: usize, cfg: &LayoutConfig) -> String {
    if text.chars().count() <= char_limit {
        return text.to_string();
    }
    let ellipsis_len = cfg.ellipsis.chars().count();
    if char_limit <= ellipsis_len {
        return cfg.ellipsis.chars().take(char_limit).collect();
    }
    let mut out: String = text.chars().take(char_limit - ellipsis_len).collect();
    out.push_str(&cfg.ellipsis);
    out
}

/// A bucket's label stack after truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLabels {
    pub budget: LabelBudget,
    pub lines: Vec<String>,
}

/// Resolve the label stack of every bucket of one project. Lines whose
/// measured width fits the bucket's span are kept whole; the rest are cut
/// to the character budget.
pub fn resolve_labels(
    buckets: &BTreeMap<MonthKey, MonthBucket>,
    month_width_px: f32,
    measurer: &dyn Measurer,
    cfg: &LayoutConfig,
) -> BTreeMap<MonthKey, ResolvedLabels> {
    buckets
        .iter()
        .map(|(key, bucket)| {
            let budget = label_budget(bucket, buckets, month_width_px, measurer, cfg);
            let lines = bucket
                .display_lines()
                .into_iter()
                .map(|line| {
                    if measurer.measure(&line) <= budget.available_width_px {
                        line
                    } else {
                        truncate_label(&line, budget.char_limit, cfg)
                    }
                })
                .collect();
            (*key, ResolvedLabels { budget, lines })
        })
        .collect()
}

// Tests are in `tests/label_place.rs` and exercise the public API only.
