//! CLI for Poke Blocker
//!
//! Developer tools that run the plugin's filter logic outside the client:
//! - encode / decode: percent-encoding as used in client links
//! - notice: render the notice shown for a blocked poke
//! - replay: run a scripted session of menu clicks and pokes

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "poke-blocker")]
#[command(about = "Poke Blocker - plugin filter tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Percent-encode text the way sender names are encoded in links
    Encode(commands::encode::EncodeArgs),

    /// Decode percent-encoded text
    Decode(commands::encode::DecodeArgs),

    /// Render the notice for a blocked poke
    Notice(commands::notice::NoticeArgs),

    /// Replay a JSON script of menu clicks and pokes
    Replay(commands::replay::ReplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode(args) => commands::encode::run_encode(args),
        Commands::Decode(args) => commands::encode::run_decode(args),
        Commands::Notice(args) => commands::notice::run(args),
        Commands::Replay(args) => commands::replay::run(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
