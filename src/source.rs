//! Input loading: a small I/O abstraction plus JSON loaders for project
//! records and layout configuration.

use anyhow::{Context, Result, anyhow};
use camino::Utf8Path;

use crate::config::LayoutConfig;
use crate::model::ProjectRecord;

/// Trait for abstracting where input documents come from.
pub trait ContentSource {
    /// Read the document at the given logical path.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
}

/// Reads files directly from the local filesystem.
pub struct FsSource;

impl ContentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path.as_std_path()).with_context(|| format!("Failed to read {}", path))
    }
}

/// Parse project records from JSON text. Accepts either a bare array or an
/// object with a top-level `projects` array.
pub fn parse_projects(text: &str, origin: &str) -> Result<Vec<ProjectRecord>> {
    let v: serde_json::Value =
        serde_json::from_str(text).with_context(|| format!("Failed to parse JSON {}", origin))?;
    let list = match v {
        list @ serde_json::Value::Array(_) => list,
        serde_json::Value::Object(mut obj) => obj
            .remove("projects")
            .ok_or_else(|| anyhow!("Missing top-level 'projects' array in {}", origin))?,
        _ => return Err(anyhow!("Expected an array of projects in {}", origin)),
    };
    serde_json::from_value(list).with_context(|| format!("Failed to deserialize projects in {}", origin))
}

pub fn load_projects<S: ContentSource>(source: &mut S, path: &Utf8Path) -> Result<Vec<ProjectRecord>> {
    let text = source.read_to_string(path)?;
    parse_projects(&text, path.as_str())
}

/// Load a JSON layout config; missing fields keep their defaults.
pub fn load_config<S: ContentSource>(source: &mut S, path: &Utf8Path) -> Result<LayoutConfig> {
    let text = source.read_to_string(path)?;
    let cfg: LayoutConfig =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path))?;
    cfg.validate().with_context(|| format!("Invalid config {}", path))?;
    Ok(cfg)
}
