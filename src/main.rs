//! Trace Detective CLI
//!
//! Parses stack traces out of mixed text, analyzes log files for error
//! patterns, and tracks debug sessions with timestamped notes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_detective::commands::{
    execute_analyze_log, execute_parse_trace, execute_session, AnalyzeLogArgs, OutputFormat,
    ParseTraceArgs, SessionAction,
};

/// Trace Detective - stack trace parsing and debug session management
#[derive(Parser, Debug)]
#[command(name = "trace-detective")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse stack traces from a file
    ParseTrace {
        /// File containing stack trace text
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Analyze a log file for errors
    AnalyzeLog {
        /// Log file to analyze
        file: PathBuf,

        /// Custom pattern to search for
        #[arg(long)]
        pattern: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage debug sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

/// Session subcommands
#[derive(Subcommand, Debug)]
enum SessionCommands {
    /// Start a new debug session
    Start {
        /// Description of the issue
        description: String,
    },

    /// Add a note to the current session
    Note {
        /// Note content
        note: String,
    },

    /// Close the current session
    Close {
        /// Description of the solution
        solution: String,
    },

    /// Show the current session
    Show,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::ParseTrace { file, format } => execute_parse_trace(ParseTraceArgs { file, format }),
        Commands::AnalyzeLog {
            file,
            pattern,
            format,
        } => execute_analyze_log(AnalyzeLogArgs {
            file,
            pattern,
            format,
        }),
        Commands::Session { command } => {
            let action = match command {
                SessionCommands::Start { description } => SessionAction::Start { description },
                SessionCommands::Note { note } => SessionAction::Note { content: note },
                SessionCommands::Close { solution } => SessionAction::Close { solution },
                SessionCommands::Show => SessionAction::Show,
            };
            execute_session(action)
        }
    }
}
