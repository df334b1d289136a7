//! One layout pass over the visible project set.
//!
//! Data flows strictly upward: zoom constants feed the timeline window, the
//! window positions milestones, milestones are grouped by month, the month
//! buckets get their label budgets and finally the row calculator stacks
//! everything vertically. The pass is pure; the same inputs always give
//! the same [`TimelineLayout`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::config::LayoutConfig;
use crate::dates::{self, MonthKey};
use crate::error::LayoutError;
use crate::geometry::RectF;
use crate::label_place::{self, AverageCharWidth, ResolvedLabels};
use crate::milestones::{self, MonthBucket, Parity};
use crate::model::{
    BarLayout, LayoutRow, MilestoneLayout, ProjectLayout, ProjectRecord, TimelineLayout,
};
use crate::rows::{self, RowMetrics};
use crate::timeline::{self, TimelineWindow};
use crate::zoom::{self, LayoutConstants, ZoomLevel};

/// Layout engine bound to a validated configuration.
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    cfg: LayoutConfig,
    measurer: AverageCharWidth,
}

impl Default for TimelineEngine {
    fn default() -> Self {
        let cfg = LayoutConfig::default();
        Self {
            measurer: AverageCharWidth::new(cfg.avg_char_width_px),
            cfg,
        }
    }
}

/// Bar geometry before the row's vertical position is known.
struct PendingBar {
    name: Option<String>,
    x_px: f32,
    width_px: f32,
    color_key: String,
}

/// Per-project intermediate results of the horizontal half of the pass.
struct PendingProject {
    name_lines: Vec<String>,
    bars: Vec<PendingBar>,
    buckets: BTreeMap<MonthKey, MonthBucket>,
    labels: BTreeMap<MonthKey, ResolvedLabels>,
}

impl TimelineEngine {
    pub fn new(cfg: LayoutConfig) -> Result<Self, LayoutError> {
        cfg.validate()?;
        Ok(Self {
            measurer: AverageCharWidth::new(cfg.avg_char_width_px),
            cfg,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn constants(&self, zoom: ZoomLevel, is_mobile: bool) -> LayoutConstants {
        zoom::resolve_constants_scaled(zoom, is_mobile, self.cfg.mobile_scale)
    }

    pub fn window(&self, today: NaiveDate, constants: &LayoutConstants) -> TimelineWindow {
        TimelineWindow::anchored(today, constants, self.cfg.lookback_months)
    }

    /// Lay out `projects` in the given order.
    pub fn layout(
        &self,
        projects: &[ProjectRecord],
        zoom: ZoomLevel,
        is_mobile: bool,
        today: NaiveDate,
    ) -> TimelineLayout {
        let constants = self.constants(zoom, is_mobile);
        let window = self.window(today, &constants);

        let pending: Vec<PendingProject> = projects
            .iter()
            .map(|p| self.place_horizontally(p, &window, &constants))
            .collect();

        let metrics: Vec<RowMetrics> = projects
            .iter()
            .zip(&pending)
            .map(|(p, pp)| RowMetrics {
                project_id: p.id.clone(),
                name_height: rows::name_height(pp.name_lines.len(), &constants, &self.cfg),
                stacks: rows::milestone_heights(&pp.buckets, &pp.labels, &self.cfg),
            })
            .collect();
        let (layout_rows, total_height_px) = rows::accumulate_rows(&metrics, &constants, &self.cfg);

        let projects = pending
            .into_iter()
            .zip(layout_rows)
            .map(|(pp, row)| self.place_vertically(pp, row, &window, &constants))
            .collect();

        TimelineLayout {
            zoom,
            is_mobile,
            today,
            window,
            constants,
            month_ticks: window.month_ticks(),
            today_x_px: window.contains(today).then(|| window.x_of(today)),
            projects,
            total_height_px,
        }
    }

    fn place_horizontally(
        &self,
        project: &ProjectRecord,
        window: &TimelineWindow,
        constants: &LayoutConstants,
    ) -> PendingProject {
        let name_lines = rows::wrap_name(&project.name, constants, &self.cfg);
        let bars = self.bars_for(project, window);

        let dated = milestones::parse_milestones(&project.milestones);
        let visible = dated.into_iter().filter(|m| {
            let inside = window.contains(m.date);
            if !inside {
                log::debug!(
                    "project {}: milestone '{}' on {} is outside the window",
                    project.id,
                    m.record.label,
                    m.date
                );
            }
            inside
        });
        let buckets = milestones::group_dated(visible);
        let labels =
            label_place::resolve_labels(&buckets, window.month_width_px(), &self.measurer, &self.cfg);

        PendingProject {
            name_lines,
            bars,
            buckets,
            labels,
        }
    }

    fn bars_for(&self, project: &ProjectRecord, window: &TimelineWindow) -> Vec<PendingBar> {
        let mut bars = Vec::new();
        let mut any_valid_phase = false;
        for phase in &project.phases {
            let range = self.parse_range(
                phase.start_date.as_deref(),
                phase.end_date.as_deref(),
                &project.id,
                &phase.name,
            );
            if let Some((start, end)) = range {
                any_valid_phase = true;
                let name = Some(phase.name.as_str());
                bars.extend(self.bar(start, end, window, name, &phase.color_key));
            }
        }
        // Phases outside the window still count: the project bar is only for
        // projects without any usable phase.
        if any_valid_phase {
            return bars;
        }

        let range = self.parse_range(
            project.start_date.as_deref(),
            project.end_date.as_deref(),
            &project.id,
            &project.name,
        );
        match range {
            Some((start, end)) => bars.extend(self.bar(start, end, window, None, &project.status)),
            None => log::warn!("project {} has no drawable bar", project.id),
        }
        bars
    }

    fn parse_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        project_id: &str,
        what: &str,
    ) -> Option<(NaiveDate, NaiveDate)> {
        match (dates::parse_optional(start), dates::parse_optional(end)) {
            (Some(s), Some(e)) if s <= e => Some((s, e)),
            (Some(s), Some(e)) => {
                log::warn!("project {project_id}: '{what}' ends ({e}) before it starts ({s}), skipped");
                None
            }
            _ => {
                log::warn!(
                    "project {project_id}: '{what}' has a missing or unparseable date range ({start:?} .. {end:?}), skipped"
                );
                None
            }
        }
    }

    fn bar(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        window: &TimelineWindow,
        name: Option<&str>,
        color_key: &str,
    ) -> Option<PendingBar> {
        if !window.overlaps(start, end) {
            log::debug!("bar {name:?} ({start} .. {end}) is outside the window");
            return None;
        }
        let (x_px, width_px) = timeline::bar_span(
            start,
            end,
            window.origin_date(),
            window.month_width_px(),
            self.cfg.min_bar_width_px,
        );
        Some(PendingBar {
            name: name.map(str::to_string),
            x_px,
            width_px,
            color_key: color_key.to_string(),
        })
    }

    fn place_vertically(
        &self,
        pending: PendingProject,
        row: LayoutRow,
        window: &TimelineWindow,
        constants: &LayoutConstants,
    ) -> ProjectLayout {
        let half_bar = constants.bar_height_px / 2.0;
        let bar_top = row.bar_y - half_bar;
        let bar_bottom = row.bar_y + half_bar;

        let bars = pending
            .bars
            .into_iter()
            .map(|b| BarLayout {
                rect: RectF::from_origin_size(b.x_px, bar_top, b.width_px, constants.bar_height_px),
                name: b.name,
                x_px: b.x_px,
                width_px: b.width_px,
                color_key: b.color_key,
            })
            .collect();

        let mut placed = Vec::new();
        for (key, bucket) in &pending.buckets {
            let lines = pending
                .labels
                .get(key)
                .map(|l| l.lines.clone())
                .unwrap_or_else(|| bucket.display_lines());
            let stack_height = lines.len() as f32 * self.cfg.milestone_line_height_px;
            let label_y_px = match bucket.parity {
                Parity::Above => bar_top - stack_height,
                Parity::Below => bar_bottom,
            };
            let grouped = bucket.len() > 1;
            for (i, m) in bucket.milestones.iter().enumerate() {
                let first = i == 0;
                placed.push(MilestoneLayout {
                    date: m.date,
                    label: m.record.label.clone(),
                    x_px: window.x_of(m.date),
                    y_px: row.bar_y,
                    parity: bucket.parity,
                    label_y_px,
                    display_lines: if first { lines.clone() } else { Vec::new() },
                    should_render_marker_shape: first,
                    is_grouped_with_others: grouped,
                    completed: m.record.completed,
                    is_key_milestone: m.record.is_key_milestone,
                });
            }
        }

        ProjectLayout {
            row,
            name_lines: pending.name_lines,
            bars,
            milestones: placed,
        }
    }
}

/// Lay out with the default configuration.
pub fn layout_timeline(
    projects: &[ProjectRecord],
    zoom: ZoomLevel,
    is_mobile: bool,
    today: NaiveDate,
) -> TimelineLayout {
    TimelineEngine::default().layout(projects, zoom, is_mobile, today)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    project_ids: Vec<String>,
    zoom: ZoomLevel,
    is_mobile: bool,
}

/// Memoizes layout passes by visible project ids, zoom level and viewport.
///
/// The timeline is anchored on "today", so every entry is dropped as soon as
/// a pass is requested for a different day. The same happens when the pass
/// comes from an engine with a different [`LayoutConfig`]. Project contents
/// are not part of the key; call [`LayoutCache::clear`] after the records
/// behind an id change.
#[derive(Debug)]
pub struct LayoutCache {
    capacity: usize,
    today: Option<NaiveDate>,
    config: Option<LayoutConfig>,
    entries: IndexMap<CacheKey, Arc<TimelineLayout>>,
}

impl LayoutCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            today: None,
            config: None,
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get_or_layout(
        &mut self,
        engine: &TimelineEngine,
        projects: &[ProjectRecord],
        zoom: ZoomLevel,
        is_mobile: bool,
        today: NaiveDate,
    ) -> Arc<TimelineLayout> {
        if self.today != Some(today) {
            if !self.entries.is_empty() {
                log::debug!("today moved to {today}, dropping {} cached layouts", self.entries.len());
            }
            self.entries.clear();
            self.today = Some(today);
        }
        if self.config.as_ref() != Some(engine.config()) {
            if !self.entries.is_empty() {
                log::debug!("engine config changed, dropping {} cached layouts", self.entries.len());
            }
            self.entries.clear();
            self.config = Some(engine.config().clone());
        }

        let key = CacheKey {
            project_ids: projects.iter().map(|p| p.id.clone()).collect(),
            zoom,
            is_mobile,
        };
        if let Some(hit) = self.entries.get(&key) {
            log::debug!("layout cache hit ({} projects, zoom {zoom})", key.project_ids.len());
            return Arc::clone(hit);
        }

        log::debug!("layout cache miss ({} projects, zoom {zoom})", key.project_ids.len());
        let layout = Arc::new(engine.layout(projects, zoom, is_mobile, today));
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, Arc::clone(&layout));
        layout
    }
}
