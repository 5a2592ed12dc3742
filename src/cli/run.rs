//! Parse a document and run queries against it

use std::{fs, path::Path};

use tracing::{debug, info};

use super::{CliError, document_to_json};
use crate::{Document, LookupError, dump, parse};

/// Which accessor a query goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// `--get KEY`, top-level value
    Key,
    /// `--table TABLE.KEY`
    Table,
    /// `--array PATH`, one element per line
    Array,
}

/// Options for a run
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Label used in diagnostics and lookup errors (the file path, or `<stdin>`)
    pub source_name: String,
    /// Document text
    pub input: Option<String>,
    /// Queries, executed in order
    pub queries: Vec<(QueryKind, String)>,
    /// Print the whole document as JSON instead of the tree dump
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAnswer {
    Scalar(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub kind: QueryKind,
    pub path: String,
    pub result: Result<QueryAnswer, LookupError>,
}

/// Result of a run
#[derive(Debug)]
pub enum RunResult {
    /// No queries: the indented tree dump
    Dump(String),
    /// No queries and `json` set: the whole document
    Json(serde_json::Value),
    /// One outcome per query, in order
    Answers(Vec<QueryOutcome>),
}

/// Read a file into memory, the only file I/O in the crate
pub fn load_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn run_query(document: &Document, kind: QueryKind, path: &str) -> Result<QueryAnswer, LookupError> {
    match kind {
        QueryKind::Key => document.value_by_key(path).map(QueryAnswer::Scalar),
        QueryKind::Table => document.table_value(path).map(QueryAnswer::Scalar),
        QueryKind::Array => document.array_value(path).map(QueryAnswer::List),
    }
}

/// Parse the input and execute every query against it.
///
/// A parse failure aborts the run before any query; lookup failures are
/// collected per query.
pub fn execute(options: &QueryOptions) -> Result<RunResult, CliError> {
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;

    let document = parse(input, &options.source_name).map_err(|error| CliError::Parse {
        source_name: options.source_name.clone(),
        error,
    })?;
    info!(source = %options.source_name, items = document.top_level().len(), "document loaded");

    if options.queries.is_empty() {
        return Ok(if options.json {
            RunResult::Json(document_to_json(&document))
        } else {
            RunResult::Dump(dump(&document))
        });
    }

    let outcomes = options
        .queries
        .iter()
        .map(|(kind, path)| {
            let result = run_query(&document, *kind, path);
            debug!(?kind, path = %path, found = result.is_ok(), "query");
            QueryOutcome {
                kind: *kind,
                path: path.clone(),
                result,
            }
        })
        .collect();
    Ok(RunResult::Answers(outcomes))
}

/// Render query outcomes for standard output.
///
/// Plain text prints one value per line (array queries print one element per
/// line). JSON prints an object keyed by query path, with `null` for lookups
/// that failed.
pub fn render_outcomes(
    outcomes: &[QueryOutcome],
    json: bool,
    pretty: bool,
) -> Result<String, CliError> {
    if json {
        let object: serde_json::Map<String, serde_json::Value> = outcomes
            .iter()
            .map(|outcome| {
                let value = match &outcome.result {
                    Ok(QueryAnswer::Scalar(s)) => serde_json::Value::String(s.clone()),
                    Ok(QueryAnswer::List(items)) => serde_json::Value::Array(
                        items.iter().cloned().map(serde_json::Value::String).collect(),
                    ),
                    Err(_) => serde_json::Value::Null,
                };
                (outcome.path.clone(), value)
            })
            .collect();
        let value = serde_json::Value::Object(object);
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        return Ok(format!("{}\n", text));
    }

    let mut out = String::new();
    for outcome in outcomes {
        match &outcome.result {
            Ok(QueryAnswer::Scalar(s)) => {
                out.push_str(s);
                out.push('\n');
            }
            Ok(QueryAnswer::List(items)) => {
                for item in items {
                    out.push_str(item);
                    out.push('\n');
                }
            }
            Err(e) => {
                out.push_str(&e.to_string());
                out.push('\n');
            }
        }
    }
    Ok(out)
}
