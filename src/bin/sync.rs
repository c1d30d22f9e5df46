//! srslist-sync: CLI tool for fetching rule archives and producing text lists.

use clap::{Parser, Subcommand};
use srslist::pipeline::{self, SyncConfig};
use srslist::{binary, release, ArchiveFetcher};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "srslist-sync")]
#[command(version = "0.1.0")]
#[command(about = "Fetch rule archives and convert binary rule-sets to text lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download an archive and convert one member to a text list
    Convert {
        /// URL of the zip archive
        #[arg(short, long)]
        url: String,

        /// Member path inside the archive
        #[arg(short, long)]
        member: String,

        /// Output text file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run every job in a sync configuration file
    Update {
        /// YAML pipeline configuration
        #[arg(short, long, default_value = "sync.yml")]
        config: PathBuf,
    },

    /// Download and normalize a text list from a repository's latest release
    Clean {
        /// Repository in owner/name form
        #[arg(short, long)]
        repo: String,

        /// Release asset file name
        #[arg(short, long)]
        asset: String,

        /// Output text file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            url,
            member,
            output,
        } => convert(&url, &member, &output),
        Commands::Update { config } => update(&config),
        Commands::Clean {
            repo,
            asset,
            output,
        } => clean(&repo, &asset, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn convert(url: &str, member: &str, output: &PathBuf) -> srslist::Result<()> {
    let fetcher = ArchiveFetcher::new()?;
    let data = fetcher.fetch_and_extract(url, member)?;

    let rules = binary::decode(&data);
    println!(
        "Decoded {} domains, {} IP entries",
        rules.domains.len(),
        rules.ip_entries.len()
    );

    srslist::write_lines(output, rules.lines())?;
    println!("Wrote {:?}", output);
    Ok(())
}

fn update(config_path: &PathBuf) -> srslist::Result<()> {
    let config = SyncConfig::load(config_path)?;
    let report = pipeline::run(&config)?;

    println!(
        "Processed {} of {} jobs",
        report.succeeded.len(),
        report.succeeded.len() + report.failed.len()
    );
    for path in &report.succeeded {
        println!("  - {:?}", path);
    }

    if !report.any_ok() {
        return Err(srslist::Error::Config(
            "no configured member could be processed".to_string(),
        ));
    }
    Ok(())
}

fn clean(repo: &str, asset: &str, output: &PathBuf) -> srslist::Result<()> {
    // The GitHub API rejects requests without a User-Agent.
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("srslist/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;

    let count = release::fetch_clean_list(&client, repo, asset, output)?;
    println!("Wrote {} entries to {:?}", count, output);
    Ok(())
}
