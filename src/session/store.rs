//! File-backed debug session persistence.
//!
//! This module handles:
//! - Creating, annotating, and closing debug sessions
//! - The active-session slot file and per-session archive files
//! - Loading the active session tolerantly (corrupt slot reads as absent)
//!
//! The store keeps at most one active session. Starting a new session
//! overwrites the slot; closing moves the session into an archive file
//! named after its id and clears the slot.

use crate::utils::config::{CURRENT_SESSION_FILE, SESSION_DIR, SESSION_ID_FORMAT};
use crate::utils::error::SessionError;
use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Resolved,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// One timestamped note inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNote {
    pub timestamp: String,
    pub content: String,
}

/// A debug session as persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Timestamp-derived identifier, e.g. `20240301_153042`.
    pub id: String,
    pub description: String,
    pub start_time: String,
    pub notes: Vec<SessionNote>,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

/// Directory-backed store for debug sessions.
pub struct SessionStore {
    session_dir: PathBuf,
    current_session_file: PathBuf,
}

impl SessionStore {
    /// **Public** - Opens a store rooted at the given directory, creating
    /// it when absent.
    pub fn open(session_dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let session_dir = session_dir.into();
        fs::create_dir_all(&session_dir)?;
        let current_session_file = session_dir.join(CURRENT_SESSION_FILE);
        Ok(Self {
            session_dir,
            current_session_file,
        })
    }

    /// **Public** - Opens the default store under the working directory.
    pub fn open_default() -> Result<Self, SessionError> {
        Self::open(SESSION_DIR)
    }

    /// **Public** - Starts a new session, replacing any active one.
    pub fn start(&self, description: &str) -> Result<Session, SessionError> {
        let now = Local::now();
        let session = Session {
            id: now.format(SESSION_ID_FORMAT).to_string(),
            description: description.to_string(),
            start_time: now.to_rfc3339(),
            notes: Vec::new(),
            status: SessionStatus::Active,
            end_time: None,
            solution: None,
        };
        self.save_current(&session)?;
        debug!("Started session {} in {}", session.id, self.session_dir.display());
        Ok(session)
    }

    /// **Public** - Appends a timestamped note to the active session.
    ///
    /// # Errors
    /// [`SessionError::NoActiveSession`] when the slot is empty.
    pub fn add_note(&self, content: &str) -> Result<Session, SessionError> {
        let mut session = self.load_current()?.ok_or(SessionError::NoActiveSession)?;
        session.notes.push(SessionNote {
            timestamp: Local::now().to_rfc3339(),
            content: content.to_string(),
        });
        self.save_current(&session)?;
        Ok(session)
    }

    /// **Public** - Closes the active session with a solution.
    ///
    /// Stamps the end time, marks the session resolved, writes it to an
    /// archive file named after its id, and clears the active slot.
    ///
    /// # Returns
    /// The closed session and the path of its archive file.
    pub fn close(&self, solution: &str) -> Result<(Session, PathBuf), SessionError> {
        let mut session = self.load_current()?.ok_or(SessionError::NoActiveSession)?;
        session.end_time = Some(Local::now().to_rfc3339());
        session.solution = Some(solution.to_string());
        session.status = SessionStatus::Resolved;

        let archive_file = self.session_dir.join(format!("session_{}.json", session.id));
        write_session(&archive_file, &session)?;

        if self.current_session_file.exists() {
            fs::remove_file(&self.current_session_file)?;
        }
        debug!("Closed session {}, archived to {}", session.id, archive_file.display());
        Ok((session, archive_file))
    }

    /// **Public** - Returns the active session, if any.
    pub fn current(&self) -> Result<Option<Session>, SessionError> {
        self.load_current()
    }

    /// **Private** - Writes the active slot file.
    fn save_current(&self, session: &Session) -> Result<(), SessionError> {
        write_session(&self.current_session_file, session)
    }

    /// **Private** - Reads the active slot file.
    ///
    /// A missing slot is simply no session. A slot that fails to parse is
    /// treated the same way rather than wedging every session command.
    fn load_current(&self) -> Result<Option<Session>, SessionError> {
        let raw = match fs::read_to_string(&self.current_session_file) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SessionError::IoError(source)),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(parse_error) => {
                debug!(
                    "Ignoring unreadable session slot {}: {}",
                    self.current_session_file.display(),
                    parse_error
                );
                Ok(None)
            }
        }
    }
}

fn write_session(path: &Path, session: &Session) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(session)?;
    fs::write(path, json)?;
    Ok(())
}
