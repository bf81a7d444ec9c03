use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starpath_cli::output::{render, OutputFormat, PlotStyle};
use starpath_lib::{FrontierSelection, PathSearchEngine, PointSet, RouteSummary, SearchOptions};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find a route between two stars where every hop stays within a radius"
)]
struct Cli {
    /// CSV file with one `x,y` point per line; line order gives the index.
    points: PathBuf,
    /// Index of the starting point.
    start: usize,
    /// Index of the destination point.
    end: usize,
    /// Maximum length of a single hop.
    #[arg(allow_negative_numbers = true)]
    radius: f32,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Rule used to pick the next frontier node.
    #[arg(long, value_enum, default_value_t = SelectionArg::FromStart)]
    selection: SelectionArg,
    /// Plot cells per 10 units of point space.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=20))]
    scale: u16,
}

/// CLI spelling of [`FrontierSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SelectionArg {
    /// Smallest distance travelled from the start.
    FromStart,
    /// Smallest distance travelled plus estimated distance to the goal.
    TotalCost,
}

impl From<SelectionArg> for FrontierSelection {
    fn from(value: SelectionArg) -> Self {
        match value {
            SelectionArg::FromStart => FrontierSelection::DistanceFromStart,
            SelectionArg::TotalCost => FrontierSelection::TotalCost,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    handle_search(&cli)
}

fn handle_search(cli: &Cli) -> Result<()> {
    let points = PointSet::from_path(&cli.points)
        .with_context(|| format!("failed to load points from {}", cli.points.display()))?;

    let options = SearchOptions {
        selection: cli.selection.into(),
    };
    let engine = PathSearchEngine::with_options(points, options);

    let outcome = engine
        .find_path(cli.start, cli.end, cli.radius)
        .context("invalid search arguments")?;

    match outcome.route() {
        Some(route) => info!(
            hops = route.hop_count(),
            distance = route.distance,
            "route found"
        ),
        None => info!(
            start = cli.start,
            end = cli.end,
            radius = cli.radius,
            "no route within radius"
        ),
    }

    let summary = RouteSummary::from_outcome(&engine, cli.start, cli.end, cli.radius, &outcome);
    let style = PlotStyle::detect(cli.scale);
    let mut stdout = io::stdout().lock();
    render(&mut stdout, &summary, cli.format, &style)?;
    stdout.flush()?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
