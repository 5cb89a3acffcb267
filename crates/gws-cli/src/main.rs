//! `gwstool` — command-line tool for the UW Groups Web Service.
//!
//! # Usage
//!
//! ```text
//! gwstool group get u_dept_team
//! gwstool member add u_dept_team alice bob
//! gwstool --json search --name 'u_dept_*'
//! gwstool config init
//! ```

mod config;
mod group;
mod member;
mod output;
mod search;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gws_client::Client;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "gwstool",
  about = "CLI tool for the University of Washington Groups Web Service",
  version
)]
struct Args {
  /// Path to a key=value config file; overrides the default search path.
  #[arg(short, long, global = true, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Emit machine-readable JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  /// Make writes wait until they are visible to reads.
  #[arg(long, global = true)]
  synchronized: bool,

  /// Enable debug logging (-vv for trace).
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Group operations.
  #[command(subcommand)]
  Group(group::GroupCommand),

  /// Member operations.
  #[command(subcommand)]
  Member(member::MemberCommand),

  /// Affiliate operations.
  #[command(subcommand)]
  Affiliate(group::AffiliateCommand),

  /// Search for groups (requires at least one search parameter).
  Search(search::SearchArgs),

  /// Show a group's change history.
  History(group::HistoryArgs),

  /// Manage gwstool configuration.
  #[command(subcommand)]
  Config(config::ConfigCommand),
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let default_level = match args.verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
    )
    .with_writer(std::io::stderr)
    .init();

  // Config commands run without a client.
  if let Command::Config(cmd) = &args.command {
    return config::run(cmd, args.config.as_deref(), args.json);
  }

  let mut cfg = config::load(args.config.as_deref())?;
  cfg.synchronized = args.synchronized;
  tracing::debug!(api_url = %cfg.api_url, "connecting");
  let client = Client::new(cfg)?;

  match args.command {
    Command::Group(cmd) => group::run(&client, cmd, args.json).await,
    Command::Member(cmd) => member::run(&client, cmd, args.json).await,
    Command::Affiliate(cmd) => group::run_affiliate(&client, cmd, args.json).await,
    Command::Search(search_args) => search::run(&client, search_args, args.json).await,
    Command::History(history_args) => group::run_history(&client, history_args, args.json).await,
    Command::Config(_) => unreachable!("handled above"),
  }
}
