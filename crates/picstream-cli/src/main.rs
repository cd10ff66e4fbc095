//! Picstream CLI - Command-line client for Picstream
//!
//! Provides commands for:
//! - Authentication (register, login, logout, status)
//! - Browsing the paginated feed and revealing captions
//! - Favoriting posts and following the live favorites list
//! - Publishing a captioned photo
//! - Viewing and editing profiles

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod gallery;
mod notice;
mod output;
mod session_file;

use commands::{
    auth::AuthCommand, favorites::FavoritesCommand, feed::FeedCommand, post::PostCommand,
    profile::ProfileCommand,
};
use context::AppContext;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "picstream", version, about = "Photo-sharing client")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Account and session commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Browse the feed
    #[command(subcommand)]
    Feed(FeedCommand),
    /// Manage favorites
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Publish a captioned photo
    Post(PostCommand),
    /// View and edit profiles
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = AppContext::load(cli.config.as_deref(), format);

    match cli.command {
        Commands::Auth(cmd) => cmd.execute(&ctx).await,
        Commands::Feed(cmd) => cmd.execute(&ctx).await,
        Commands::Favorites(cmd) => cmd.execute(&ctx).await,
        Commands::Post(cmd) => cmd.execute(&ctx).await,
        Commands::Profile(cmd) => cmd.execute(&ctx).await,
    }
}
