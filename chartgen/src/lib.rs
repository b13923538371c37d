use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use voteboard::api::{Affiliation, Candidate, ElectionResults};
use voteboard::chart::{PieChartData, with_percentages};
use voteboard::{ColorAssigner, ColorScheme, PaletteConfig, sort_by_name, sort_by_votes};
use walkdir::WalkDir;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "chartgen",
    author,
    version,
    about = "Turn election result exports into chart-ready snapshots with stable party colors",
    long_about = None
)]
pub struct Cli {
    /// Election export (JSON) or a directory searched recursively for exports
    #[arg(long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination file for the generated chart snapshot
    #[arg(long, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Color variant for chart slices: `accessible` or `plain`
    #[arg(long, default_value_t = ColorScheme::Accessible)]
    pub scheme: ColorScheme,

    /// Candidate ordering within each affiliation
    #[arg(long, value_enum, default_value_t = CandidateOrder::Votes)]
    pub order: CandidateOrder,

    /// Palette configuration; defaults to $VOTEBOARD_PALETTE_CONFIG
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    Votes,
    Name,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub scheme: ColorScheme,
    pub order: CandidateOrder,
    pub elections: Vec<ElectionChart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ElectionChart {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub chart: PieChartData,
    pub affiliations: Vec<AffiliationSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AffiliationSummary {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub votes: u64,
    pub percentage: f64,
    pub candidates: Vec<Candidate>,
}

pub fn run(cli: Cli) -> Result<()> {
    let assigner = load_assigner(cli.config.as_deref())?;
    let exports = collect_exports(&cli.input)?;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create output parent directory '{}'",
                    parent.display()
                )
            })?;
        }
    }

    let mut elections = Vec::with_capacity(exports.len());
    for path in &exports {
        let election = read_election(path)?;
        debug!(
            path = %path.display(),
            affiliations = election.affiliations.len(),
            "read election export"
        );
        let chart = build_election_chart(election, cli.scheme, cli.order, &assigner)
            .with_context(|| format!("failed to build charts for '{}'", path.display()))?;
        elections.push(chart);
    }

    elections.sort_by_key(|election| (election.date.is_none(), election.date));

    let snapshot = ChartSnapshot {
        scheme: cli.scheme,
        order: cli.order,
        elections,
    };

    let json = serde_json::to_vec_pretty(&snapshot)?;
    fs::write(&cli.output, json)
        .with_context(|| format!("failed to write snapshot to '{}'", cli.output.display()))?;

    info!(
        target: "voteboard::chartgen",
        input = %cli.input.display(),
        output = %cli.output.display(),
        elections = snapshot.elections.len(),
        scheme = %snapshot.scheme,
        "chart snapshot written"
    );

    Ok(())
}

pub fn build_election_chart(
    election: ElectionResults,
    scheme: ColorScheme,
    order: CandidateOrder,
    assigner: &ColorAssigner,
) -> Result<ElectionChart> {
    let chart =
        PieChartData::for_affiliations(&election.name, &election.affiliations, scheme, assigner)?;

    let ranked = sort_by_votes(&with_percentages(&election.affiliations)?)?;
    let affiliations = ranked
        .into_iter()
        .map(|affiliation| summarize(affiliation, scheme, order, assigner))
        .collect::<Result<Vec<_>>>()?;

    Ok(ElectionChart {
        id: election.id,
        name: election.name,
        date: election.date,
        chart,
        affiliations,
    })
}

fn summarize(
    affiliation: Affiliation,
    scheme: ColorScheme,
    order: CandidateOrder,
    assigner: &ColorAssigner,
) -> Result<AffiliationSummary> {
    let candidates = match order {
        CandidateOrder::Votes => sort_by_votes(&affiliation.candidates),
        CandidateOrder::Name => sort_by_name(&affiliation.candidates),
    }
    .with_context(|| format!("invalid candidate list for '{}'", affiliation.name))?;

    Ok(AffiliationSummary {
        id: affiliation.id,
        color: scheme.color(assigner, &affiliation.name).to_string(),
        votes: affiliation.vv_count.unwrap_or_default(),
        percentage: affiliation.percentage.unwrap_or_default(),
        name: affiliation.name,
        candidates,
    })
}

fn load_assigner(config: Option<&Path>) -> Result<ColorAssigner> {
    let config = match config {
        Some(path) => {
            if !path.is_file() {
                bail!("palette config '{}' does not exist", path.display());
            }
            PaletteConfig::load_from_path(path)
                .with_context(|| format!("failed to load palette config '{}'", path.display()))?
        }
        None => PaletteConfig::load().context("failed to load palette config from environment")?,
    };

    Ok(ColorAssigner::new(config)?)
}

fn collect_exports(input: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(input)
        .with_context(|| format!("failed to read metadata for '{}'", input.display()))?;

    if metadata.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut exports = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry
            .with_context(|| format!("failed to walk input directory '{}'", input.display()))?;

        if entry.file_type().is_file() && is_json(entry.path()) {
            exports.push(entry.into_path());
        }
    }

    if exports.is_empty() {
        bail!("no election exports found in '{}'", input.display());
    }

    exports.sort();
    Ok(exports)
}

fn read_election(path: &Path) -> Result<ElectionResults> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read election export '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse election export '{}'", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
