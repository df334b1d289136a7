use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use roadmap_timeline::LayoutConfig;
use roadmap_timeline::source::{ContentSource, FsSource, load_config, load_projects, parse_projects};
use std::collections::HashMap;

struct MemSource {
    files: HashMap<String, String>,
}

impl MemSource {
    fn with(path: &str, text: &str) -> Self {
        let mut files = HashMap::new();
        files.insert(path.to_string(), text.to_string());
        Self { files }
    }
}

impl ContentSource for MemSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not found: {}", path))
    }
}

const PORTFOLIO: &str = r#"[
  {
    "id": "PR00003652",
    "name": "Manufacturing Labor Forecasting Tool (MLFT)",
    "startDate": "12-Aug-24",
    "endDate": "01-Jul-25",
    "status": "Green",
    "phases": [
      { "name": "Execution", "startDate": "12-Aug-24", "endDate": "01-Jul-25", "status": "Green" }
    ],
    "milestones": [
      { "date": "15-Oct-24", "label": "SG3 Gate Review", "isKeyMilestone": true }
    ]
  },
  { "id": "PROG000328", "name": "Account IQ" }
]"#;

#[test]
fn loads_a_bare_project_array() {
    let mut src = MemSource::with("mem://portfolio.json", PORTFOLIO);
    let projects = load_projects(&mut src, Utf8Path::new("mem://portfolio.json")).expect("load");
    assert_eq!(projects.len(), 2);

    let mlft = &projects[0];
    assert_eq!(mlft.start_date.as_deref(), Some("12-Aug-24"));
    assert_eq!(mlft.phases[0].color_key, "Green");
    assert!(mlft.milestones[0].is_key_milestone);
    assert!(!mlft.milestones[0].completed);

    let account_iq = &projects[1];
    assert!(account_iq.phases.is_empty());
    assert_eq!(account_iq.end_date, None);
}

#[test]
fn loads_a_wrapped_project_list() {
    let text = format!(r#"{{ "view": "program", "projects": {PORTFOLIO} }}"#);
    let projects = parse_projects(&text, "inline").expect("parse");
    assert_eq!(projects.len(), 2);
}

#[test]
fn reports_malformed_documents() {
    let err = parse_projects(r#"{ "rows": [] }"#, "inline").unwrap_err();
    assert!(err.to_string().contains("projects"), "{err}");
    assert!(parse_projects("42", "inline").is_err());
    assert!(parse_projects("[{", "inline").is_err());

    let mut src = MemSource { files: HashMap::new() };
    assert!(load_projects(&mut src, Utf8Path::new("missing.json")).is_err());
}

#[test]
fn partial_config_keeps_defaults() {
    let mut src = MemSource::with("cfg.json", r#"{ "avg_char_width_px": 7.0, "lookback_months": 3 }"#);
    let cfg = load_config(&mut src, Utf8Path::new("cfg.json")).expect("config");
    assert_eq!(cfg.avg_char_width_px, 7.0);
    assert_eq!(cfg.lookback_months, 3);
    assert_eq!(cfg.min_readable_chars, LayoutConfig::default().min_readable_chars);
    assert_eq!(cfg.ellipsis, "...");
}

#[test]
fn inconsistent_config_is_an_error() {
    let mut src = MemSource::with("cfg.json", r#"{ "min_span_months": 10.0 }"#);
    let err = load_config(&mut src, Utf8Path::new("cfg.json")).unwrap_err();
    assert!(format!("{err:#}").contains("min_span_months"), "{err:#}");
}

#[test]
fn reads_from_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("projects.json")).unwrap();
    std::fs::write(&path, PORTFOLIO).unwrap();
    let projects = load_projects(&mut FsSource, &path).unwrap();
    assert_eq!(projects[1].name, "Account IQ");

    let missing = load_projects(&mut FsSource, &path.with_file_name("nope.json")).unwrap_err();
    assert!(missing.to_string().contains("nope.json"));
}
