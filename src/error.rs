//! # Error Types
//!
//! This module defines error types used throughout the mood-memo library.
//!
//! Most interactions never fail: a print request on an empty line or a busy
//! printer is simply ignored. Errors only show up at the edges (loading a
//! config, replaying a script, writing an exported image).

use thiserror::Error;

use crate::export::ExportError;

/// Main error type for mood-memo operations
#[derive(Debug, Error)]
pub enum MemoError {
    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Session script could not be parsed
    #[error("Script error: {0}")]
    Script(String),

    /// Print requested with blank text
    #[error("Nothing to print: the text is blank")]
    NothingToPrint,

    /// Image export failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
