//! UniHub CLI - Command-line interface for the course resource index.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! uh list
//! uh list --under resources/CSE201/
//! uh show resources/CSE201/Notes/ds.pdf
//!
//! # Discover
//! uh search structures
//! uh complete "Algo"
//! uh popular -n 5 --json
//! uh tag exam
//! uh uploader asha
//! uh related resources/CSE201/Notes/ds.pdf
//! uh find CSE201
//!
//! # Use a specific manifest
//! uh --manifest ./resources.json stats
//! ```

mod config;
mod manifest;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use unihub_core::{IndexError, ResourceIndex, ResourceRecord};

/// UniHub resource index CLI.
///
/// Queries the resources listed in a JSON manifest: ordered listing,
/// autocomplete, keyword/tag/uploader lookup, popularity and relationships.
#[derive(Parser)]
#[command(name = "uh", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Manifest file (default: $UNIHUB_MANIFEST, then the platform data directory)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List resources in identifier order
    List {
        /// Only identifiers starting with this path prefix
        #[arg(long)]
        under: Option<String>,
    },
    /// Show one resource
    Show { id: String },
    /// Find resources containing a keyword (case-insensitive, whole token)
    Search { keyword: String },
    /// Complete a display-name prefix (case-sensitive)
    Complete { prefix: String },
    /// Most downloaded resources
    Popular {
        /// Maximum number of results to return
        #[arg(short = 'n', long, default_value_t = unihub_core::config::DEFAULT_POPULAR_COUNT)]
        limit: usize,
    },
    /// Resources carrying a tag (exact match)
    Tag { tag: String },
    /// Resources uploaded by a user (exact match)
    Uploader { user: String },
    /// Resources related to a resource
    Related { id: String },
    /// Resources whose path or name contains a fragment
    Find { fragment: String },
    /// Structure statistics
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => ExitCode::from(report(&err)),
    }
}

fn run(cli: &Cli) -> Result<String> {
    let path = config::manifest_path(cli.manifest.as_deref())?;
    let index = manifest::load_index(&path)?;
    debug!("Index ready with {} resources", index.len());
    execute(&index, &cli.command, cli.json)
}

/// Runs one query against a loaded index and renders the result.
fn execute(index: &ResourceIndex, command: &Command, json: bool) -> Result<String> {
    let render = |query: String, records: Vec<&ResourceRecord>| {
        if json {
            output::format_json(&query, &records)
        } else {
            output::format_human(&query, &records)
        }
    };

    let rendered = match command {
        Command::List { under: None } => render("all resources".into(), index.resources_in_order()?),
        Command::List { under: Some(prefix) } => render(
            format!("under \"{}\"", prefix),
            index.resources_under(prefix)?,
        ),
        Command::Show { id } => output::format_record(index.get_resource(id)?, json),
        Command::Search { keyword } => render(
            format!("search \"{}\"", keyword),
            index.search_by_keyword(keyword)?,
        ),
        Command::Complete { prefix } => output::format_names(
            &format!("\"{}\"", prefix),
            &index.autocomplete(prefix),
            json,
        ),
        Command::Popular { limit } => render(
            format!("top {} by downloads", limit),
            index.top_popular(*limit)?,
        ),
        Command::Tag { tag } => render(format!("tag \"{}\"", tag), index.resources_by_tag(tag)?),
        Command::Uploader { user } => render(
            format!("uploader \"{}\"", user),
            index.resources_by_uploader(user)?,
        ),
        Command::Related { id } => {
            // Unknown ids would otherwise look like isolated ones
            index.get_resource(id)?;
            output::format_related(id, &index.related_resources(id), json)
        }
        Command::Find { fragment } => render(
            format!("\"{}\"", fragment),
            index.find_by_name_fragment(fragment)?,
        ),
        Command::Stats => output::format_stats(&index.stats(), json),
    };
    Ok(rendered)
}

/// Prints `err` and returns the exit status: 2 for internal index faults,
/// 1 for everything else.
fn report(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<IndexError>() {
        Some(index_err) if index_err.is_internal() => {
            error!("{:#}", err);
            eprintln!("internal error");
            2
        }
        _ => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}
