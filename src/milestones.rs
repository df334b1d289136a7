//! Monthly grouping: milestones are bucketed by calendar month and each
//! bucket gets a fixed side of the bar.
//!
//! The side is a pure function of the month number (odd months above, even
//! months below). It does not look at what the neighboring buckets contain,
//! so two adjacent months can never stack labels on the same side, but two
//! months apart always share one.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::{self, MonthKey};
use crate::model::MilestoneRecord;

/// Which side of the bar a month bucket's labels render on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Above,
    Below,
}

impl Parity {
    pub fn of_month(month: u32) -> Self {
        if month % 2 == 1 { Parity::Above } else { Parity::Below }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Above => write!(f, "above"),
            Parity::Below => write!(f, "below"),
        }
    }
}

/// Label side for a `"{year}-{month:02}"` key. Keys that do not parse get
/// `Above`.
pub fn monthly_label_position(month_key: &str) -> Parity {
    MonthKey::parse(month_key)
        .map(|k| Parity::of_month(k.month))
        .unwrap_or(Parity::Above)
}

/// A milestone whose date has already been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedMilestone {
    pub date: NaiveDate,
    pub record: MilestoneRecord,
}

impl DatedMilestone {
    /// `"{day}{suffix}: {label}"`, e.g. `4th: Spain Launch`.
    pub fn display_line(&self) -> String {
        let day = self.date.day();
        format!("{}{}: {}", day, dates::ordinal_suffix(day), self.record.label)
    }
}

/// Parse milestone dates, dropping (with a warning) the ones that are
/// missing or malformed.
pub fn parse_milestones(records: &[MilestoneRecord]) -> Vec<DatedMilestone> {
    records
        .iter()
        .filter_map(|m| match dates::parse_optional(m.date.as_deref()) {
            Some(date) => Some(DatedMilestone { date, record: m.clone() }),
            None => {
                log::warn!(
                    "dropping milestone '{}': unparseable or missing date {:?}",
                    m.label,
                    m.date
                );
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub parity: Parity,
    /// Sorted by day of month; same-day milestones keep input order.
    pub milestones: Vec<DatedMilestone>,
}

impl MonthBucket {
    /// Date of the earliest milestone, where the marker and label stack sit.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        self.milestones.first().map(|m| m.date)
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Untruncated label stack, one line per milestone.
    pub fn display_lines(&self) -> Vec<String> {
        self.milestones.iter().map(DatedMilestone::display_line).collect()
    }
}

/// Bucket already-dated milestones by calendar month, in chronological key
/// order.
pub fn group_dated(milestones: impl IntoIterator<Item = DatedMilestone>) -> BTreeMap<MonthKey, MonthBucket> {
    let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
    for m in milestones {
        let key = MonthKey::of(m.date);
        buckets
            .entry(key)
            .or_insert_with(|| MonthBucket {
                key,
                parity: Parity::of_month(key.month),
                milestones: Vec::new(),
            })
            .milestones
            .push(m);
    }
    for bucket in buckets.values_mut() {
        bucket.milestones.sort_by_key(|m| m.date.day());
    }
    buckets
}

/// Parse and bucket raw milestone records.
pub fn group_by_month(records: &[MilestoneRecord]) -> BTreeMap<MonthKey, MonthBucket> {
    group_dated(parse_milestones(records))
}
