//! Coordinate mapper: calendar dates to horizontal pixel positions.
//!
//! Position is a continuous linear function of elapsed days. A month is
//! always [`AVERAGE_DAYS_PER_MONTH`] days wide, never the calendar-exact
//! length, so a date's x does not jump at month boundaries.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::LayoutError;
use crate::zoom::LayoutConstants;

pub const AVERAGE_DAYS_PER_MONTH: f32 = 30.44;

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Signed elapsed time between two dates in average-length months.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> f32 {
    days_between(from, to) as f32 / AVERAGE_DAYS_PER_MONTH
}

/// Horizontal position of `date`. Dates before `origin` clamp to 0; there is
/// no upper clamp.
pub fn position_of(date: NaiveDate, origin: NaiveDate, month_width_px: f32) -> f32 {
    (months_between(origin, date) * month_width_px).max(0.0)
}

/// `(x, width)` of a bar spanning `start..end`, with `width` floored at
/// `min_width_px` so very short ranges stay visible.
pub fn bar_span(
    start: NaiveDate,
    end: NaiveDate,
    origin: NaiveDate,
    month_width_px: f32,
    min_width_px: f32,
) -> (f32, f32) {
    let x = position_of(start, origin, month_width_px);
    let width = position_of(end, origin, month_width_px) - x;
    (x, width.max(min_width_px))
}

/// The horizontal extent of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindow {
    origin_date: NaiveDate,
    month_width_px: f32,
    total_months: u32,
}

impl TimelineWindow {
    pub fn new(origin_date: NaiveDate, month_width_px: f32, total_months: u32) -> Result<Self, LayoutError> {
        if !(month_width_px.is_finite() && month_width_px > 0.0) {
            return Err(LayoutError::NonPositiveMonthWidth(month_width_px));
        }
        if total_months == 0 {
            return Err(LayoutError::EmptyWindow);
        }
        Ok(Self {
            origin_date,
            month_width_px,
            total_months,
        })
    }

    /// Window starting on the first of the month `lookback_months` before the
    /// month containing `today`, spanning the zoom level's visible months.
    ///
    /// `constants` must come from the zoom table (possibly mobile-scaled by
    /// a positive factor), which always has a positive month width.
    pub fn anchored(today: NaiveDate, constants: &LayoutConstants, lookback_months: u32) -> Self {
        debug_assert!(constants.month_width_px > 0.0);
        let month_start = today.with_day(1).unwrap_or(today);
        let origin_date = month_start
            .checked_sub_months(Months::new(lookback_months))
            .unwrap_or(month_start);
        Self {
            origin_date,
            month_width_px: constants.month_width_px,
            total_months: constants.visible_months.max(1),
        }
    }

    pub fn origin_date(&self) -> NaiveDate {
        self.origin_date
    }

    pub fn month_width_px(&self) -> f32 {
        self.month_width_px
    }

    pub fn total_months(&self) -> u32 {
        self.total_months
    }

    /// First day after the visible range.
    pub fn end_date(&self) -> NaiveDate {
        self.origin_date
            .checked_add_months(Months::new(self.total_months))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.origin_date && date < self.end_date()
    }

    /// True when `start..=end` overlaps the visible range at all.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        end >= self.origin_date && start < self.end_date()
    }

    pub fn x_of(&self, date: NaiveDate) -> f32 {
        position_of(date, self.origin_date, self.month_width_px)
    }

    /// Inverse of [`Self::x_of`] for non-negative `x`, rounded down to a whole day.
    pub fn date_at(&self, x: f32) -> NaiveDate {
        let days = (x.max(0.0) / self.month_width_px * AVERAGE_DAYS_PER_MONTH).floor() as u64;
        self.origin_date
            .checked_add_days(chrono::Days::new(days))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn width_px(&self) -> f32 {
        self.total_months as f32 * self.month_width_px
    }

    /// One axis tick per calendar month in the window.
    pub fn month_ticks(&self) -> Vec<MonthTick> {
        (0..self.total_months)
            .filter_map(|i| self.origin_date.checked_add_months(Months::new(i)))
            .map(|start| MonthTick {
                label: dates::month_label(start),
                x_px: self.x_of(start),
                start,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTick {
    pub start: NaiveDate,
    pub label: String,
    pub x_px: f32,
}
