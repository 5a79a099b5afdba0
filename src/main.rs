mod aggregate;
mod config;
mod extract;
mod net;
mod pipeline;
mod profile;
mod render;
mod sources;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use net::HttpFetcher;
use pipeline::RunOptions;

#[derive(Parser)]
#[command(
    name = "dashboard",
    about = "Refresh a research-metrics README from public profile pages"
)]
struct Cli {
    /// Config file (created with defaults if missing)
    #[arg(short, long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect metrics and overwrite the README (default)
    Update {
        /// Write here instead of the config's readme_path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Collect metrics and print the rendered README without writing it
    Preview,
    /// Collect metrics and print them as JSON
    Collect,
    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut opts = RunOptions::new(&cli.config);
    opts.progress = std::io::stderr().is_terminal();

    match cli.command.unwrap_or(Commands::Update { output: None }) {
        Commands::Update { output } => {
            opts.output = output;
            let summary = pipeline::run_update(&opts, HttpFetcher::new()?).await?;
            tracing::info!(
                "{} sources collected into {}",
                summary.record.len(),
                summary.output.display()
            );
        }
        Commands::Preview => {
            let now = chrono::Local::now().naive_local();
            let document = pipeline::preview(&opts, HttpFetcher::new()?, now).await?;
            print!("{}", document);
        }
        Commands::Collect => {
            let (_, record) = pipeline::collect(&opts, HttpFetcher::new()?).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Init { force } => init_config(&cli.config, force)?,
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        tracing::debug!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }
    config::write(path, &config::Config::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
