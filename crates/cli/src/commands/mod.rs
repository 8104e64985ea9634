//! CLI command implementations.
//!
//! Each command builds the same views the admin panel uses and prints the
//! result as plain text. Output goes to any [`Write`] so commands can be
//! tested without a terminal.

use std::io::Write;

use falcon_admin::api::{FalconApiError, FalconClient};
use falcon_admin::config::ConfigError;
use falcon_core::{RequestError, SessionGate, ValidationError, ViewError};
use thiserror::Error;

use crate::state_file::{FileFlagStore, StateFileError};

pub mod auth;
pub mod bookings;
pub mod records;
pub mod reports;

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend client error: {0}")]
    Client(#[from] FalconApiError),

    #[error(transparent)]
    State(#[from] StateFileError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not logged in. Run `falcon login` first.")]
    NotLoggedIn,
}

impl From<ViewError> for CommandError {
    fn from(error: ViewError) -> Self {
        match error {
            ViewError::Validation(e) => Self::Validation(e),
            ViewError::Request(e) => Self::Request(e),
        }
    }
}

/// Everything a command needs: the backend client and the session gate.
#[derive(Debug)]
pub struct Context {
    pub api: FalconClient,
    pub gate: SessionGate<FileFlagStore>,
}

impl Context {
    #[must_use]
    pub const fn new(api: FalconClient, gate: SessionGate<FileFlagStore>) -> Self {
        Self { api, gate }
    }

    /// Fail unless the gate is open.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotLoggedIn`] for a closed gate.
    pub const fn require_session(&self) -> Result<(), CommandError> {
        if self.gate.is_authenticated() {
            Ok(())
        } else {
            Err(CommandError::NotLoggedIn)
        }
    }
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

/// Print rows as space-aligned columns under a header.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> std::io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", format_line(headers.iter().copied(), &widths))?;
    for row in rows {
        writeln!(out, "{}", format_line(row.iter().map(String::as_str), &widths))?;
    }
    Ok(())
}
