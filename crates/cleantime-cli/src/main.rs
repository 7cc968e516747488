use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cleantime", version, about = "Clean-time tracker, journal and SOS breathing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print current clean time and money saved as JSON
    Status,
    /// Live clean-time counter, one snapshot per second
    Watch {
        /// Stop after this many seconds (runs until Ctrl-C otherwise)
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Guided breathing with calming messages
    Sos {
        /// Stop after this many seconds (runs until Ctrl-C otherwise)
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Meditation stopwatch
    Meditate {
        #[command(subcommand)]
        action: commands::meditate::MeditateAction,
    },
    /// Mood and symptom journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Reinforcement cards, guided meditations and tips
    Content {
        #[command(subcommand)]
        action: commands::content::ContentAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CLEANTIME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::status(),
        Commands::Watch { seconds } => commands::status::watch(seconds),
        Commands::Sos { seconds } => commands::sos::run(seconds),
        Commands::Meditate { action } => commands::meditate::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Content { action } => commands::content::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
