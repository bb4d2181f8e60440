use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ledgerlift_core::{Cell, OutputTable};
use ledgerlift_ingest::{LayoutProfile, convert_custom, convert_statement};
use std::path::{Path, PathBuf};

mod dump;
mod job;

use dump::DumpSource;
use job::JobFile;

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlift",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERLIFT_BUILD_SHA"), ")"),
    about = "Reconstruct transaction tables from extracted statement text"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a JSON extraction dump into a CSV transaction table
    Convert {
        /// Extraction dump: one entry per page with text and/or word boxes
        input: PathBuf,

        /// Issuer layout profile (see `ledgerlift banks`)
        #[arg(long, conflicts_with = "job")]
        bank: Option<String>,

        /// TOML job file with drawn areas for custom conversion
        #[arg(long)]
        job: Option<PathBuf>,

        /// Output CSV path (defaults to the input with a .csv extension)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the supported issuer layout profiles
    Banks,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Convert { input, bank, job, out } => {
            if !input.exists() {
                bail!("input not found: {}", input.display());
            }
            let source = DumpSource::load(&input)?;

            let table = match (bank, job) {
                (Some(bank), None) => {
                    let profile = LayoutProfile::by_name(&bank).with_context(|| {
                        format!("unknown bank {bank:?} (see `ledgerlift banks`)")
                    })?;
                    convert_statement(&source, &profile, None)
                }
                (None, Some(job_path)) => {
                    let job = JobFile::load(&job_path)?;
                    // The dump carries no page images, so OCR is off here;
                    // hosts with a renderer wire their own engine in.
                    convert_custom(&source, None, &job.to_options()?)
                }
                (None, None) => {
                    convert_statement(&source, &LayoutProfile::generic(), None)
                }
                (Some(_), Some(_)) => unreachable!("clap rejects --bank with --job"),
            };

            let out = out.unwrap_or_else(|| input.with_extension("csv"));
            write_csv(&table, &out)?;
            println!(
                "Wrote {} rows x {} columns to {}",
                table.rows.len(),
                table.headers.len(),
                out.display()
            );
        }

        Command::Banks => {
            for profile in LayoutProfile::all() {
                println!("{}", profile.name);
            }
        }
    }

    Ok(())
}

fn write_csv(table: &OutputTable, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        let record: Vec<String> = row.iter().map(render_cell).collect();
        wtr.write_record(&record)?;
    }
    wtr.flush().context("flushing csv")?;
    Ok(())
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{n:.0}")
            } else {
                format!("{n:.2}")
            }
        }
    }
}
