use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geometry::RectF;
use crate::milestones::Parity;
use crate::timeline::{MonthTick, TimelineWindow};
use crate::zoom::{LayoutConstants, ZoomLevel};

// ────────────────────────────────────────────────────────────────────────────
// Input records
// ────────────────────────────────────────────────────────────────────────────

/// One roadmap row as delivered by the data collaborator.
///
/// Dates stay as raw strings (`dd-MMM-yy` or `MM/dd/yyyy`); they are parsed
/// during the layout pass so that a bad value only drops the item it
/// belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Overall status, doubles as the color key of an unphased bar.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub phases: Vec<PhaseRecord>,
    #[serde(default)]
    pub milestones: Vec<MilestoneRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Either a status (`Green`, `Amber`, ...) or a phase color key.
    #[serde(default, alias = "status", alias = "statusOrPhaseColorKey")]
    pub color_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRecord {
    #[serde(default)]
    pub date: Option<String>,
    pub label: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_key_milestone: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout output
// ────────────────────────────────────────────────────────────────────────────

/// Vertical geometry of one project row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRow {
    pub project_id: String,
    pub top_offset_px: f32,
    pub height_px: f32,
    /// Vertical center of the Gantt bar.
    #[serde(rename = "barCenterY", alias = "barY")]
    pub bar_y: f32,
    pub above_label_height_px: f32,
    pub below_label_height_px: f32,
}

/// A phase bar, or the project's own bar when it has no phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarLayout {
    /// `None` for the unphased project bar.
    pub name: Option<String>,
    pub x_px: f32,
    pub width_px: f32,
    pub color_key: String,
    pub rect: RectF,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneLayout {
    pub date: NaiveDate,
    pub label: String,
    pub x_px: f32,
    /// Marker center; milestones sit on the bar.
    pub y_px: f32,
    pub parity: Parity,
    /// Top edge of the label stack.
    pub label_y_px: f32,
    /// Filled only for the first milestone of its month.
    pub display_lines: Vec<String>,
    pub should_render_marker_shape: bool,
    pub is_grouped_with_others: bool,
    pub completed: bool,
    pub is_key_milestone: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLayout {
    pub row: LayoutRow,
    pub name_lines: Vec<String>,
    pub bars: Vec<BarLayout>,
    pub milestones: Vec<MilestoneLayout>,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    pub zoom: ZoomLevel,
    pub is_mobile: bool,
    pub today: NaiveDate,
    pub window: TimelineWindow,
    pub constants: LayoutConstants,
    pub month_ticks: Vec<MonthTick>,
    /// `None` when today falls outside the window.
    pub today_x_px: Option<f32>,
    pub projects: Vec<ProjectLayout>,
    pub total_height_px: f32,
}

impl TimelineLayout {
    pub fn rows(&self) -> impl Iterator<Item = &LayoutRow> {
        self.projects.iter().map(|p| &p.row)
    }

    pub fn project(&self, id: &str) -> Option<&ProjectLayout> {
        self.projects.iter().find(|p| p.row.project_id == id)
    }
}
