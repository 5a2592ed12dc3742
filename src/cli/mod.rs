//! CLI support for gtoml
//!
//! Everything the `gtoml` binary does short of argument parsing lives here so
//! it can be driven and tested without spawning a process.

mod convert;
mod run;

pub use convert::{document_to_json, value_to_json};
pub use run::{
    QueryAnswer, QueryKind, QueryOptions, QueryOutcome, RunResult, execute, load_file,
    render_outcomes,
};

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {source_name}: {error}")]
    Parse {
        source_name: String,
        #[source]
        error: crate::ParseError,
    },

    #[error("Could not render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No input provided. Pass a file name or pipe a document to stdin.")]
    NoInput,
}
