//! Cricket shot map CLI
//!
//! Headless front end for `cric_core`: analyze a delivery against a field
//! layout, dump the segment grid, or list the shots a delivery allows.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use cric_core::{
    Aggression, BatsmanProfile, Delivery, FieldConfig, FieldSession, Point, ShotCatalog,
};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::sync::Arc;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "cric_cli")]
#[command(version = cric_core::VERSION)]
#[command(about = "Score cricket shot placement against a field layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Score where the batsman is likely to hit a delivery
    Analyze {
        #[command(flatten)]
        field: FieldArgs,

        /// Batsman profile (YAML or JSON); defaults to the sample batsman
        #[arg(long)]
        batsman: Option<PathBuf>,

        /// Shot catalog (YAML or JSON); defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Delivery line, 1 (wide off) to 7 (wide leg)
        #[arg(long, default_value_t = 4)]
        line: u8,

        /// Delivery length, 1 (very short) to 7 (full toss)
        #[arg(long, default_value_t = 5)]
        length: u8,

        /// Batting intent, e.g. NEUTRAL or very-attacking
        #[arg(long, value_parser = parse_aggression)]
        aggression: Option<Aggression>,

        /// Number of segments to list
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Also list every potential shot value
        #[arg(long, default_value = "false")]
        shots: bool,

        /// Print the full analysis as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Dump the segment grid with current coverage
    Segments {
        #[command(flatten)]
        field: FieldArgs,

        /// Only this wedge
        #[arg(long)]
        wedge: Option<usize>,

        /// Print as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List catalog shots playable to a delivery
    Catalog {
        /// Shot catalog (YAML or JSON); defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        line: Option<u8>,

        #[arg(long)]
        length: Option<u8>,
    },
}

#[cfg(feature = "cli")]
#[derive(Args, Debug)]
struct FieldArgs {
    /// Field config (YAML or JSON); defaults to the standard layout
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the compact layout instead of the standard one
    #[arg(long, default_value = "false", conflicts_with = "config")]
    compact: bool,

    /// Fielder position as x,y (repeatable); replaces the configured fielders
    #[arg(long = "fielder", value_parser = parse_point)]
    fielders: Vec<Point>,

    /// Remove every fielder
    #[arg(long, default_value = "false", conflicts_with = "fielders")]
    no_fielders: bool,

    /// Base fielder pickup range
    #[arg(long)]
    fielder_range: Option<f64>,
}

#[cfg(feature = "cli")]
impl FieldArgs {
    fn resolve(&self) -> Result<FieldConfig> {
        let mut cfg = match &self.config {
            Some(path) => FieldConfig::load(path)
                .with_context(|| format!("loading field config {}", path.display()))?,
            None if self.compact => FieldConfig::compact(),
            None => FieldConfig::standard(),
        };
        if self.no_fielders {
            cfg.fielders.clear();
        } else if !self.fielders.is_empty() {
            cfg.fielders = self.fielders.clone();
        }
        if let Some(range) = self.fielder_range {
            cfg.fielder_range = range;
        }
        cfg.validate()?;
        tracing::debug!(
            fielders = cfg.fielders.len(),
            fielder_range = cfg.fielder_range,
            "field config resolved"
        );
        Ok(cfg)
    }
}

#[cfg(feature = "cli")]
fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(Point::new(x, y))
}

#[cfg(feature = "cli")]
fn parse_aggression(s: &str) -> std::result::Result<Aggression, String> {
    s.parse().map_err(|e: cric_core::ShotMapError| e.to_string())
}

#[cfg(feature = "cli")]
fn load_catalog(path: Option<&PathBuf>) -> Result<ShotCatalog> {
    match path {
        Some(path) => ShotCatalog::load(path)
            .with_context(|| format!("loading shot catalog {}", path.display())),
        None => Ok(ShotCatalog::standard().clone()),
    }
}

#[cfg(feature = "cli")]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            field,
            batsman,
            catalog,
            line,
            length,
            aggression,
            top,
            shots,
            json,
        } => {
            let config = field.resolve()?;
            let catalog = load_catalog(catalog.as_ref())?;
            let batsman = match batsman {
                Some(path) => BatsmanProfile::load(&path)
                    .with_context(|| format!("loading batsman {}", path.display()))?,
                None => BatsmanProfile::sample().clone(),
            };

            let mut session = FieldSession::new(config, Arc::new(catalog), Arc::new(batsman))?;
            if let Some(aggression) = aggression {
                session.set_aggression(aggression);
            }
            let analysis = session.commit_delivery(Delivery::new(line, length));

            if json {
                println!("{}", serde_json::to_string_pretty(analysis)?);
            } else {
                print_analysis(analysis, top, shots);
            }
        }

        Commands::Segments { field, wedge, json } => {
            let session = FieldSession::new(
                field.resolve()?,
                Arc::new(ShotCatalog::standard().clone()),
                Arc::new(BatsmanProfile::sample().clone()),
            )?;
            let fielder_count = session.fielders().len();
            let segments: Vec<_> = match wedge {
                Some(w) => session.segments_in_wedge(w).collect(),
                None => session.segments().iter().collect(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
            } else {
                println!("{:<8} {:>8} {:>9}  polygon", "segment", "coverage", "intensity");
                for seg in segments {
                    let corners: Vec<String> = seg
                        .polygon()
                        .vertices()
                        .iter()
                        .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                        .collect();
                    println!(
                        "{:<8} {:>8} {:>9.2}  {}",
                        seg.id().to_string(),
                        seg.coverage(),
                        seg.coverage_intensity(fielder_count),
                        corners.join(" ")
                    );
                }
            }
        }

        Commands::Catalog { catalog, line, length } => {
            let catalog = load_catalog(catalog.as_ref())?;
            let entries: Vec<_> = match (line, length) {
                (Some(line), Some(length)) => catalog.candidates(Delivery::new(line, length)),
                (None, None) => catalog.iter().collect(),
                _ => anyhow::bail!("--line and --length must be given together"),
            };

            println!("{:<16} {:<12} {:<8} {:<8} wedges", "shot", "power", "line", "length");
            for (name, def) in entries {
                let wedges: Vec<String> =
                    def.applicable_wedges.iter().map(|w| w.to_string()).collect();
                println!(
                    "{:<16} {:<12} {:<8} {:<8} {}",
                    name.as_str(),
                    format!("{}-{}", def.power_range.min, def.power_range.max),
                    format!("{}-{}", def.line_range.min, def.line_range.max),
                    format!("{}-{}", def.length_range.min, def.length_range.max),
                    wedges.join(",")
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_analysis(analysis: &cric_core::ShotAnalysis, top: usize, shots: bool) {
    println!("Delivery:   {}", analysis.delivery);
    println!("Aggression: {}", analysis.aggression);

    if !analysis.has_candidates() {
        println!("\nNo playable shots for this delivery.");
        return;
    }
    let names: Vec<&str> = analysis.candidates.iter().map(|s| s.as_str()).collect();
    println!("Candidates: {}", names.join(", "));

    println!("\nTop segments:");
    for (id, p) in analysis.distribution.top_segments(top) {
        let shot = analysis.adjusted[&cric_core::OutcomeId::Segment(id)].shot;
        println!("  {:<8} {:>6.2}%  {}", id.to_string(), p * 100.0, shot);
    }

    println!("\nZones:");
    for (zone, p) in analysis.zones.ranked() {
        println!("  Z{:<7} {:>6.2}%", zone, p * 100.0);
    }

    if shots {
        println!("\nPotential shots based on current delivery line and length:");
        for (id, scored) in analysis.ranked_potential() {
            println!("  {:<8} {:>8.2}  {}", id.to_string(), scored.value, scored.shot);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("cric_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
