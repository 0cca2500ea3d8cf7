use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kleplace_parser::{parse, Layout, PlacedKey};
use kleplace_pcb::{LayoutResolver, MemoryBoard, PlacementConfig, PlacementReport};
use tracing::debug;

use crate::error::CliError;

pub struct PlaceArgs {
    pub layout: PathBuf,
    pub board: PathBuf,
    pub config: Option<PathBuf>,
    pub pitch: Option<f64>,
    pub secondary_angle: Option<f64>,
    pub output: Option<PathBuf>,
}

fn load_keys(path: &Path) -> Result<Vec<PlacedKey>, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CliError::input(format!("Could not read layout {}: {e}", path.display()))
    })?;
    let layout = Layout::from_json_str(&raw)?;
    let keys = parse(&layout);
    debug!(path = %path.display(), keys = keys.len(), "parsed layout");
    Ok(keys)
}

pub fn run_parse(layout: &Path, json: bool) -> Result<(), CliError> {
    let keys = load_keys(layout)?;
    let rendered = if json {
        serde_json::to_string_pretty(&keys).map_err(|e| CliError::processing(e.to_string()))?
    } else {
        render_table(&keys)
    };
    write_stdout(&rendered).map_err(|e| CliError::processing(format!("{e:#}")))
}

pub fn run_place(args: PlaceArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => PlacementConfig::from_path(path)?,
        None => PlacementConfig::default(),
    };
    if let Some(pitch) = args.pitch {
        config.pitch = pitch;
    }
    if let Some(angle) = args.secondary_angle {
        config.secondary.angle = angle;
    }
    let resolver = LayoutResolver::new(config)?;

    // Everything is loaded and validated before the board is touched.
    let keys = load_keys(&args.layout)?;
    let mut board = MemoryBoard::from_path(&args.board)?;

    let report = resolver.place(&mut board, &keys)?;
    eprintln!("{}", summary(&report, keys.len()));

    let rendered = board
        .to_json_string_pretty()
        .map_err(|e| CliError::processing(e.to_string()))?;
    let written = match &args.output {
        Some(path) => write_file(path, &rendered),
        None => write_stdout(&rendered),
    };
    written.map_err(|e| CliError::processing(format!("{e:#}")))
}

fn summary(report: &PlacementReport, total: usize) -> String {
    format!(
        "Placed {} of {} keys ({} without footprint, {} without diode)",
        report.placed.len(),
        total,
        report.missing_primaries.len(),
        report.missing_secondaries.len()
    )
}

fn render_table(keys: &[PlacedKey]) -> String {
    let mut out = String::from("label\tx\ty\tw\th\n");
    for key in keys {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            key.label.escape_debug(),
            key.x,
            key.y,
            key.w,
            key.h
        ));
    }
    out
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn write_stdout(contents: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(contents.as_bytes())
        .context("Failed to write to stdout")?;
    if !contents.ends_with('\n') {
        stdout.write_all(b"\n").context("Failed to write to stdout")?;
    }
    Ok(())
}
