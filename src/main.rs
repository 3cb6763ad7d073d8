// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sketchfiles::{Loader, LoaderConfig, TableOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Load sketch resources from files or URLs")]
struct Args {
    /// Directory relative paths are resolved against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,
    /// Request timeout for remote resources, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Retries after a transient remote failure
    #[arg(long, default_value_t = 0)]
    retries: u32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a delimited table and print it as JSON
    Table {
        path: String,
        /// First line holds the column names
        #[arg(long)]
        header: bool,
        /// Tab-separated instead of comma-separated
        #[arg(long)]
        tsv: bool,
        /// Also write the table to this Parquet file
        #[arg(long)]
        parquet: Option<PathBuf>,
    },
    /// Print the non-empty lines of a text resource
    Strings { path: String },
    /// Pretty-print a JSON resource
    Json { path: String },
    /// Print the size of a resource in bytes
    Bytes { path: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configure loader ─────────────────────────────────────────
    let args = Args::parse();
    let config = LoaderConfig {
        base_dir: args.base_dir,
        timeout_ms: args.timeout_ms,
        max_retries: args.retries,
        ..Default::default()
    };
    let loader = Loader::new(config).context("building loader")?;

    // ─── 3) run ──────────────────────────────────────────────────────
    match args.command {
        Command::Table {
            path,
            header,
            tsv,
            parquet,
        } => {
            let mut opts = if tsv {
                TableOptions::tsv()
            } else {
                TableOptions::csv()
            };
            opts.header = header;
            let table = loader
                .load_table(&path, opts)
                .await
                .with_context(|| format!("loading table {}", path))?;
            if let Some(out) = parquet {
                table
                    .write_parquet(&out)
                    .with_context(|| format!("writing {}", out.display()))?;
            }
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Command::Strings { path } => {
            let lines = loader
                .load_strings(&path)
                .await
                .with_context(|| format!("loading strings {}", path))?;
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Json { path } => {
            let value: serde_json::Value = loader
                .load_json(&path)
                .await
                .with_context(|| format!("loading JSON {}", path))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Bytes { path } => {
            let bytes = loader
                .load_bytes(&path)
                .await
                .with_context(|| format!("loading bytes {}", path))?;
            println!("{}", bytes.len());
        }
    }

    info!("done");
    Ok(())
}
