use std::io::{self, Read};
use std::path::PathBuf;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser as ClapParser};
use gtoml::cli::{self, CliError, QueryKind, QueryOptions, RunResult};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "gtoml")]
#[command(about = "gtoml - read a TOML-like configuration file and query its values")]
#[command(version)]
struct Cli {
    /// Configuration file to read (reads stdin when omitted and piped)
    file: Option<PathBuf>,

    /// Print the value of a top-level key
    #[arg(short, long = "get", value_name = "KEY")]
    get: Vec<String>,

    /// Print the value of a key inside a table, as TABLE.KEY
    #[arg(short, long = "table", value_name = "TABLE.KEY")]
    table: Vec<String>,

    /// Print every element of an array, one per line (KEY or TABLE.KEY)
    #[arg(short, long = "array", value_name = "PATH")]
    array: Vec<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    match run(cli, &matches) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(CliError::NoInput) => {
            let _ = Cli::command().print_help();
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Query flags in the order they were given on the command line
fn queries_in_order(cli: &mut Cli, matches: &ArgMatches) -> Vec<(QueryKind, String)> {
    let groups = [
        ("get", QueryKind::Key, std::mem::take(&mut cli.get)),
        ("table", QueryKind::Table, std::mem::take(&mut cli.table)),
        ("array", QueryKind::Array, std::mem::take(&mut cli.array)),
    ];

    let mut indexed = Vec::new();
    for (id, kind, values) in groups {
        let indices = matches.indices_of(id).into_iter().flatten();
        indexed.extend(indices.zip(values).map(|(index, value)| (index, kind, value)));
    }
    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, kind, value)| (kind, value))
        .collect()
}

/// Returns `Ok(false)` when at least one lookup failed
fn run(mut cli: Cli, matches: &ArgMatches) -> Result<bool, CliError> {
    let (source_name, input) = match &cli.file {
        Some(path) => (path.display().to_string(), Some(cli::load_file(path)?)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            ("<stdin>".to_string(), Some(buffer))
        }
        None => (String::new(), None),
    };

    let queries = queries_in_order(&mut cli, matches);

    let options = QueryOptions {
        source_name,
        input,
        queries,
        json: cli.json,
        pretty: cli.pretty,
    };

    match cli::execute(&options)? {
        RunResult::Dump(text) => print!("{}", text),
        RunResult::Json(value) => {
            let json = if options.pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{}", json);
        }
        RunResult::Answers(outcomes) => {
            print!("{}", cli::render_outcomes(&outcomes, options.json, options.pretty)?);
            return Ok(outcomes.iter().all(|o| o.result.is_ok()));
        }
    }
    Ok(true)
}
