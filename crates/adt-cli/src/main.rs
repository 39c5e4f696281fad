//! ADT CLI - render files through the artificial double tracking effect.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adt")]
#[command(author, version, about = "ADT (Artificial Double Tracking) CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the ADT effect
    Process(commands::process::ProcessArgs),

    /// Generate a stereo test signal
    Generate(commands::generate::GenerateArgs),

    /// Show WAV file metadata and the ADT offset for its rate
    Info(commands::info::InfoArgs),

    /// Print the plugin descriptor
    Descriptor(commands::descriptor::DescriptorArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs on stderr, command output on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Descriptor(args) => commands::descriptor::run(args),
    }
}
