use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use indexmap::IndexMap;
use rayon::prelude::*;
use roadmap_timeline::source::{FsSource, load_config, load_projects};
use roadmap_timeline::{LayoutConfig, TimelineEngine, TimelineLayout, ZoomLevel, dates};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out roadmap project JSON as a Gantt timeline", long_about = None)]
struct Cli {
    /// Project JSON files, one per chart view
    #[arg(value_name = "PROJECTS_JSON", required = true)]
    inputs: Vec<String>,

    /// Zoom factor: 0.5, 0.75, 1.0, 1.25 or 1.5 (anything else means 1.0)
    #[arg(long, default_value_t = 1.0)]
    zoom: f32,

    /// Use the mobile viewport constants
    #[arg(long)]
    mobile: bool,

    /// Anchor date (dd-MMM-yy or MM/dd/yyyy), defaults to the local date
    #[arg(long)]
    today: Option<String>,

    /// JSON layout configuration; missing fields keep their defaults
    #[arg(long, value_name = "CONFIG_JSON")]
    config: Option<String>,

    /// Log dropped records and cache decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    let cfg = match &cli.config {
        Some(p) => load_config(&mut FsSource, &Utf8PathBuf::from(p))?,
        None => LayoutConfig::default(),
    };
    let engine = TimelineEngine::new(cfg).context("Invalid layout configuration")?;
    let today = match &cli.today {
        Some(raw) => dates::parse_date(raw).ok_or_else(|| anyhow!("Unrecognized --today date: {}", raw))?,
        None => chrono::Local::now().date_naive(),
    };
    let zoom = ZoomLevel::from_factor(cli.zoom);

    // Each view is an independent pass.
    let layouts: Vec<(String, TimelineLayout)> = cli
        .inputs
        .par_iter()
        .map(|input| -> Result<(String, TimelineLayout)> {
            let path = Utf8PathBuf::from(input);
            let projects = load_projects(&mut FsSource, &path)?;
            log::debug!("{}: {} projects", path, projects.len());
            Ok((input.clone(), engine.layout(&projects, zoom, cli.mobile, today)))
        })
        .collect::<Result<_>>()?;

    let json = if layouts.len() == 1 {
        serde_json::to_string_pretty(&layouts[0].1)?
    } else {
        let by_input: IndexMap<String, TimelineLayout> = layouts.into_iter().collect();
        serde_json::to_string_pretty(&by_input)?
    };
    println!("{}", json);
    Ok(())
}
