//! Session command implementation.
//!
//! The session command manages the debug session lifecycle:
//! start a session, attach timestamped notes while investigating, and
//! close it with the solution. All subcommands operate on the default
//! store under the working directory.
//!
//! Running `note` or `close` without an active session prints a notice
//! and exits cleanly; it is an expected state, not a failure.

use crate::output::render_session;
use crate::session::SessionStore;
use crate::utils::error::SessionError;
use anyhow::{Context, Result};
use log::info;

/// What the session command should do
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Start a new session, replacing any active one
    Start { description: String },
    /// Add a note to the active session
    Note { content: String },
    /// Close the active session with a solution
    Close { solution: String },
    /// Display the active session
    Show,
}

/// Execute a session subcommand
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Session directory cannot be created
/// * Session files cannot be read or written
pub fn execute_session(action: SessionAction) -> Result<()> {
    let store = SessionStore::open_default().context("Failed to open session store")?;

    match action {
        SessionAction::Start { description } => {
            let session = store
                .start(&description)
                .context("Failed to start debug session")?;
            info!("Session {} started", session.id);
            println!("Started debug session: {}", session.id);
            println!("Description: {}", session.description);
        }
        SessionAction::Note { content } => match store.add_note(&content) {
            Ok(session) => println!("Added note to session {}", session.id),
            Err(SessionError::NoActiveSession) => {
                println!("No active debug session. Start one with: session start <description>");
            }
            Err(other) => return Err(other).context("Failed to add session note"),
        },
        SessionAction::Close { solution } => match store.close(&solution) {
            Ok((session, archive)) => {
                info!("Session {} closed", session.id);
                println!("Closed debug session: {}", session.id);
                println!("Solution: {solution}");
                println!("Saved to: {}", archive.display());
            }
            Err(SessionError::NoActiveSession) => {
                println!("No active debug session to close.");
            }
            Err(other) => return Err(other).context("Failed to close debug session"),
        },
        SessionAction::Show => {
            match store.current().context("Failed to load debug session")? {
                Some(session) => println!("{}", render_session(&session)),
                None => println!("No active debug session."),
            }
        }
    }

    Ok(())
}
