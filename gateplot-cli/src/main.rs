use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gateplot::memory::Session;
use gateplot::{plot_gate, GateId, PlotOptions, SceneGraphSurface};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Render gate plots of a gated sample as scene graph JSON
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot one gate of a session
    Render {
        /// Session JSON holding the sample and its gating strategy
        #[arg(short, long)]
        session: PathBuf,

        /// Name of the gate to plot
        #[arg(short, long)]
        gate: String,

        /// Ancestors of the gate separated by `/`, starting at the root
        #[arg(short, long)]
        path: Option<String>,

        /// Plot options JSON; flags below take precedence over it
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        subsample: Option<usize>,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the gates of a session with their paths
    Gates {
        #[arg(short, long)]
        session: PathBuf,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    run(cli, &mut std::io::stdout().lock())
}

fn run(cli: Cli, stdout: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Render {
            session,
            gate,
            path,
            config,
            seed,
            subsample,
            out,
        } => {
            let session: Session = read_json(&session)?;
            let mut options: PlotOptions = match config {
                Some(config) => read_json(&config)?,
                None => PlotOptions::default(),
            };
            if let Some(seed) = seed {
                options.random_seed = seed;
            }
            if let Some(subsample) = subsample {
                options.subsample_count = subsample;
            }

            let mut gate_id = GateId::new(gate);
            if let Some(path) = path {
                gate_id = gate_id.with_path(path.split('/').filter(|s| !s.is_empty()));
            }

            let plot = plot_gate(&gate_id, &session.gating, &session.sample, &options, None)
                .with_context(|| format!("Failed to plot gate `{}`", gate_id.name))?;
            let scene = plot.render(SceneGraphSurface::new())?;
            let json = serde_json::to_string_pretty(&scene)?;

            match out {
                Some(out) => {
                    fs::write(&out, json)
                        .with_context(|| format!("Failed to write {}", out.display()))?;
                    info!("Saved scene graph to {}", out.display());
                }
                None => writeln!(stdout, "{json}")?,
            }
        }
        Commands::Gates { session } => {
            let session: Session = read_json(&session)?;
            for id in session.gating.gate_ids() {
                let path = id.path.unwrap_or_default().join("/");
                writeln!(stdout, "{path}\t{}", id.name)?;
            }
        }
    }
    Ok(())
}
