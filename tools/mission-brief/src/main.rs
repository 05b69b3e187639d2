//! mission-brief: print procedurally generated Neon Ascendant mission briefs.
//!
//! Usage:
//!   mission-brief --count 5 --seed 1337
//!   mission-brief generate --catalog catalog.json --format json --output briefs.json
//!   mission-brief export-catalog --output catalog.json
//!   mission-brief simulate --archetype specter --district "ghost grid" --difficulty 7 --seed 7

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use neon_mission::simulation::DEFAULT_DIFFICULTY;
use neon_mission::{
    AssetCatalog, CatalogSource, EmbeddedCatalog, MissionBrief, MissionGenerator, MissionReport,
    MissionSimulator, SimulationRequest,
};

/// Neon Ascendant mission brief generator
#[derive(Parser)]
#[command(name = "mission-brief", version, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Options for the default `generate` command
    #[command(flatten)]
    generate: Generate,
}

#[derive(Subcommand)]
enum Command {
    /// Generate mission briefs (default)
    Generate(Generate),

    /// Write the embedded catalog as JSON, as a starting point for custom catalogs
    ExportCatalog(ExportCatalog),

    /// Play one mission through its four stages and report the outcome
    Simulate(Simulate),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

#[derive(Args, Debug)]
struct Generate {
    /// Number of briefs to generate
    #[arg(short = 'n', long, default_value_t = 3, allow_negative_numbers = true)]
    count: i32,

    /// RNG seed; the same seed always yields the same briefs
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON catalog to draw from instead of the embedded one
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Simulate {
    /// Force an archetype by name (case-insensitive); random when omitted
    #[arg(long)]
    archetype: Option<String>,

    /// Force a district by name (case-insensitive); random when omitted
    #[arg(long)]
    district: Option<String>,

    /// Baseline difficulty, 1 or higher
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY, allow_negative_numbers = true)]
    difficulty: i32,

    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON catalog to draw from instead of the embedded one
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportCatalog {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Generate(cmd)) => cmd.execute(),
        Some(Command::ExportCatalog(cmd)) => cmd.execute(),
        Some(Command::Simulate(cmd)) => cmd.execute(),
        None => cli.generate.execute(),
    }
}

impl Generate {
    fn execute(self) -> Result<()> {
        let briefs = match &self.catalog {
            Some(path) => {
                let catalog = AssetCatalog::load(path)
                    .with_context(|| format!("loading catalog {}", path.display()))?;
                self.draw(catalog)?
            }
            None => self.draw(EmbeddedCatalog)?,
        };

        let rendered = match self.format {
            Format::Markdown => briefs
                .iter()
                .map(MissionBrief::to_markdown)
                .collect::<Vec<_>>()
                .join("\n"),
            Format::Json => {
                let mut json = serde_json::to_string_pretty(&briefs)?;
                json.push('\n');
                json
            }
        };

        emit(self.output.as_deref(), &rendered)
    }

    fn draw<S: CatalogSource>(&self, source: S) -> Result<Vec<MissionBrief>> {
        let mut generator = match self.seed {
            Some(seed) => MissionGenerator::with_seed(source, seed),
            None => MissionGenerator::new(source),
        };
        Ok(generator.generate_briefs(self.count)?)
    }
}

impl Simulate {
    fn execute(self) -> Result<()> {
        let report = match &self.catalog {
            Some(path) => {
                let catalog = AssetCatalog::load(path)
                    .with_context(|| format!("loading catalog {}", path.display()))?;
                self.run(catalog)?
            }
            None => self.run(EmbeddedCatalog)?,
        };

        let rendered = match self.format {
            Format::Markdown => report.to_markdown(),
            Format::Json => {
                let mut json = serde_json::to_string_pretty(&report)?;
                json.push('\n');
                json
            }
        };

        emit(self.output.as_deref(), &rendered)
    }

    fn run<S: CatalogSource>(&self, source: S) -> Result<MissionReport> {
        let mut simulator = match self.seed {
            Some(seed) => MissionSimulator::with_seed(source, seed),
            None => MissionSimulator::new(source),
        };
        let request = SimulationRequest {
            archetype: self.archetype.clone(),
            district: self.district.clone(),
            difficulty: self.difficulty,
        };
        Ok(simulator.simulate(&request)?)
    }
}

impl ExportCatalog {
    fn execute(self) -> Result<()> {
        let mut json = AssetCatalog::from_source(&EmbeddedCatalog).to_json()?;
        json.push('\n');
        emit(self.output.as_deref(), &json)
    }
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}
