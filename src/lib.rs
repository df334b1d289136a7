//! Gantt timeline layout engine for project roadmaps.
//!
//! Converts date-stamped project, phase and milestone records into plain
//! layout descriptors: bar rectangles, row offsets and milestone label
//! stacks that never overlap their same-side neighbors. The engine is pure
//! and synchronous; rendering and data retrieval live elsewhere.
//!
//! The binary `roadmap-timeline` reads project JSON and prints the layout.

pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod label_place;
pub mod milestones;
pub mod model;
pub mod rows;
pub mod source;
pub mod timeline;
pub mod zoom;

pub use config::LayoutConfig;
pub use engine::{LayoutCache, TimelineEngine, layout_timeline};
pub use error::LayoutError;
pub use model::{MilestoneRecord, PhaseRecord, ProjectRecord, TimelineLayout};
pub use zoom::{LayoutConstants, ZoomLevel, resolve_constants};
