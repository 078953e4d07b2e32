use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "notisync")]
#[command(about = "Drive the notification sync engine from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to engine config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a scripted sequence of snapshots through a live engine
    Replay {
        /// Replay script (JSON)
        script: PathBuf,
        /// Output events as JSON
        #[arg(long)]
        json: bool,
        /// How long to wait for each delivered snapshot to be published
        #[arg(long, default_value = "1000", value_name = "MS")]
        wait_ms: u64,
    },
    /// Show which records of a snapshot are new relative to another
    Diff {
        /// Previous snapshot file, or `-` for a cold start
        previous: String,
        /// Current snapshot file
        current: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
