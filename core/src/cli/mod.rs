mod summary;

use crate::compare::compare;
use crate::config::TextEncoding;
use crate::error::AppError;
use crate::index::index_file;
use crate::report;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "linecmp")]
#[command(
    author,
    version,
    about = "Compare two text files line by line, skipping the header line",
    long_about = None
)]
pub struct Cli {
    /// First ("before") file
    pub before: PathBuf,

    /// Second ("after") file
    pub after: PathBuf,

    /// Directory for the result CSV files (created if missing)
    pub output_dir: PathBuf,

    /// Text encoding of both input files (default: utf-8, env: LINECMP_ENCODING)
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Summary output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Base name of `path` for display, falling back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Run the CLI: index both inputs, print the summary and write the result files.
pub fn run(cli: Cli) -> Result<(), String> {
    let encoding = TextEncoding::resolve(cli.encoding.as_deref()).map_err(AppError::from)?;

    if cli.format == OutputFormat::Text {
        println!("  {} {}", "Before:".dimmed(), cli.before.display());
        println!("  {} {}", "After:".dimmed(), cli.after.display());
        println!("  {} {}", "Output:".dimmed(), cli.output_dir.display());
        println!();
    }

    // Both inputs are indexed before anything is compared or written.
    let first = index_file(&cli.before, encoding).map_err(AppError::from)?;
    let second = index_file(&cli.after, encoding).map_err(AppError::from)?;
    let result = compare(&first, &second);

    let names = summary::Names {
        before: display_name(&cli.before),
        after: display_name(&cli.after),
    };
    match cli.format {
        OutputFormat::Text => summary::print_text(&names, &result.counts()),
        OutputFormat::Json => summary::print_json(&cli, encoding, &result.counts()),
    }

    let created = report::ensure_output_dir(&cli.output_dir).map_err(AppError::from)?;
    if created && cli.format == OutputFormat::Text {
        println!(
            "{} {}",
            "Created output directory".dimmed(),
            cli.output_dir.display()
        );
    }

    let outcomes = report::write_report(&cli.output_dir, &result);
    for outcome in outcomes {
        match outcome.result {
            Ok(()) if cli.format == OutputFormat::Text => {
                println!("  {} {}", "Wrote".dimmed(), outcome.path.display());
            }
            Ok(()) => {}
            Err(e) => eprintln!("{} {}", "Error:".red(), AppError::from(e)),
        }
    }

    if cli.format == OutputFormat::Text {
        println!(
            "{} {}",
            "Results written to".green(),
            cli.output_dir.display()
        );
    }

    Ok(())
}
