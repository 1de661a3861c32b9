//! Topoviz CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "topoviz")]
#[command(about = "Build network topologies and animate packets along shortest paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// TOML config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a demo network and save it
    Sample {
        /// star, ring, bus or hybrid
        #[arg(short, long, default_value = "ring")]
        kind: String,

        /// Number of nodes
        #[arg(short = 'n', long, default_value = "6")]
        count: usize,

        /// Snapshot file to write
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Recompute node positions for a topology kind
    Layout {
        /// Snapshot file to read
        snapshot: PathBuf,

        /// star, ring, bus or hybrid
        #[arg(short, long)]
        kind: String,

        /// Hub node for a star layout
        #[arg(long)]
        hub: Option<String>,

        /// Hybrid group as `kind:label,label,...` (repeatable)
        #[arg(short, long)]
        group: Vec<String>,

        /// Where to write the result (defaults to the input file)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the shortest path between two nodes
    Path {
        snapshot: PathBuf,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
    /// Print every animation frame for a packet from one node to another
    Animate {
        snapshot: PathBuf,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Wait the configured step between frames
        #[arg(long)]
        realtime: bool,
    },
    /// Find the node under a point, as a click would
    Pick {
        snapshot: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
    /// Show nodes, positions and links
    Inspect {
        snapshot: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "topoviz={log_level},topoviz_core={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sample { kind, count, out } => commands::sample(&config, &kind, count, &out),
        Commands::Layout {
            snapshot,
            kind,
            hub,
            group,
            out,
        } => commands::layout(&config, &snapshot, &kind, hub, &group, out.as_deref()),
        Commands::Path { snapshot, from, to } => commands::path(&snapshot, &from, &to),
        Commands::Animate {
            snapshot,
            from,
            to,
            realtime,
        } => commands::animate(&config, &snapshot, &from, &to, realtime),
        Commands::Pick { snapshot, x, y } => commands::pick(&config, &snapshot, x, y),
        Commands::Inspect { snapshot } => commands::inspect(&snapshot),
        Commands::Version => {
            println!("Topoviz v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
