use gtoml::cli::{
    self, CliError, QueryAnswer, QueryKind, QueryOptions, RunResult, document_to_json,
};
use gtoml::{LookupError, parse};
use serde_json::json;

const RUSTFMT: &str = r#"
# rustfmt settings
version = "Two"
use_small_heuristics = "Max"
merge_derives = false
max_width = 100
ignore = [
    "target",   # build output
    "src/generated.rs",
]
"#;

const MANIFEST: &str = r#"
name = "workspace"

[package]
name = "gtoml"
version = "0.2.0"
authors = ["first", "second"]
publish = false

[profile]
opt_level = 3
ratio = 0.25

[[bin]]
name = "gtoml"
path = "src/main.rs"

[[bin]]
name = "gtoml-dump"
path = "src/dump.rs"
"#;

fn options(input: &str, queries: Vec<(QueryKind, &str)>) -> QueryOptions {
    QueryOptions {
        source_name: "test.toml".into(),
        input: Some(input.to_string()),
        queries: queries
            .into_iter()
            .map(|(kind, path)| (kind, path.to_string()))
            .collect(),
        json: false,
        pretty: false,
    }
}

fn answers(opts: &QueryOptions) -> Vec<Result<QueryAnswer, LookupError>> {
    match cli::execute(opts) {
        Ok(RunResult::Answers(outcomes)) => outcomes.into_iter().map(|o| o.result).collect(),
        Ok(other) => panic!("Expected answers, got {:?}", other),
        Err(e) => panic!("Run failed: {}", e),
    }
}

#[test]
fn test_rustfmt_style_document() {
    let doc = parse(RUSTFMT, "rustfmt.toml").unwrap();

    assert_eq!(doc.value_by_key("version").unwrap(), "Two");
    assert_eq!(doc.value_by_key("use_small_heuristics").unwrap(), "Max");
    assert_eq!(doc.value_by_key("merge_derives").unwrap(), "false");
    assert_eq!(doc.value_by_key("max_width").unwrap(), "100");

    let ignore = doc.node_by_key("ignore").unwrap();
    assert_eq!(doc.to_vector(ignore), vec!["target", "src/generated.rs"]);
    assert_eq!(
        doc.value_by_key("ignore").unwrap(),
        "[target,src/generated.rs]"
    );
}

#[test]
fn test_manifest_style_document() {
    let doc = parse(MANIFEST, "Cargo.toml").unwrap();

    assert_eq!(doc.value_by_key("name").unwrap(), "workspace");
    assert_eq!(doc.table_value("package.name").unwrap(), "gtoml");
    assert_eq!(doc.table_value("package.version").unwrap(), "0.2.0");
    assert_eq!(doc.table_value("package.authors").unwrap(), "first");
    assert_eq!(doc.table_value("package.publish").unwrap(), "false");
    assert_eq!(doc.table_value("profile.opt_level").unwrap(), "3");
    assert_eq!(doc.table_value("profile.ratio").unwrap(), "0.25");
    assert_eq!(
        doc.array_value("package.authors").unwrap(),
        vec!["first", "second"]
    );
    assert_eq!(doc.table_value("bin.path").unwrap(), "src/main.rs");
    assert_eq!(
        doc.value_by_key("missing").unwrap_err().to_string(),
        "ERROR: Could not find \"missing\" in file Cargo.toml"
    );
}

#[test]
fn test_execute_queries_in_order() {
    let opts = options(
        MANIFEST,
        vec![
            (QueryKind::Key, "name"),
            (QueryKind::Table, "package.version"),
            (QueryKind::Array, "package.authors"),
            (QueryKind::Key, "nope"),
        ],
    );

    let results = answers(&opts);
    assert_eq!(results.len(), 4);
    assert_eq!(results[0], Ok(QueryAnswer::Scalar("workspace".into())));
    assert_eq!(results[1], Ok(QueryAnswer::Scalar("0.2.0".into())));
    assert_eq!(
        results[2],
        Ok(QueryAnswer::List(vec!["first".into(), "second".into()]))
    );
    assert!(matches!(results[3], Err(LookupError::MissingKey { .. })));
}

#[test]
fn test_render_text_outcomes() {
    let opts = options(
        RUSTFMT,
        vec![
            (QueryKind::Key, "version"),
            (QueryKind::Array, "ignore"),
            (QueryKind::Key, "missing"),
        ],
    );
    let RunResult::Answers(outcomes) = cli::execute(&opts).unwrap() else {
        panic!("Expected answers");
    };

    let text = cli::render_outcomes(&outcomes, false, false).unwrap();
    assert_eq!(
        text,
        "Two\ntarget\nsrc/generated.rs\nERROR: Could not find \"missing\" in file test.toml\n"
    );
}

#[test]
fn test_render_json_outcomes() {
    let opts = options(
        RUSTFMT,
        vec![(QueryKind::Key, "max_width"), (QueryKind::Key, "missing")],
    );
    let RunResult::Answers(outcomes) = cli::execute(&opts).unwrap() else {
        panic!("Expected answers");
    };

    let text = cli::render_outcomes(&outcomes, true, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({ "max_width": "100", "missing": null }));
}

#[test]
fn test_execute_without_queries_dumps() {
    let opts = options("[package]\nname = \"x\"\n", vec![]);
    match cli::execute(&opts).unwrap() {
        RunResult::Dump(text) => {
            assert_eq!(text, "Table: package\n  Key: name, Value: String: x\n")
        }
        other => panic!("Expected dump, got {:?}", other),
    }
}

#[test]
fn test_execute_json_document() {
    let mut opts = options(MANIFEST, vec![]);
    opts.json = true;

    let RunResult::Json(value) = cli::execute(&opts).unwrap() else {
        panic!("Expected JSON");
    };
    assert_eq!(value["name"], json!("workspace"));
    assert_eq!(value["package"]["authors"], json!(["first", "second"]));
    assert_eq!(value["profile"]["opt_level"], json!(3));
    assert_eq!(value["profile"]["ratio"], json!(0.25));
    assert_eq!(value["bin"][1]["path"], json!("src/dump.rs"));
}

#[test]
fn test_document_to_json_direct() {
    let doc = parse("flag = true\nlist = [1, \"a\"]", "t").unwrap();
    assert_eq!(
        document_to_json(&doc),
        json!({ "flag": true, "list": [1, "a"] })
    );
}

#[test]
fn test_document_to_json_keeps_document_order() {
    let doc = parse("b = 1\na = 2\n[z]\ny = true\nx = false\n", "t").unwrap();
    let json = document_to_json(&doc);
    assert_eq!(
        serde_json::to_string(&json).unwrap(),
        r#"{"b":1,"a":2,"z":{"y":true,"x":false}}"#
    );
}

#[test]
fn test_document_to_json_first_duplicate_wins() {
    let doc = parse("a = 1\na = 2\n", "t").unwrap();
    assert_eq!(doc.value_by_key("a").unwrap(), "1");
    assert_eq!(document_to_json(&doc), json!({ "a": 1 }));
}

#[test]
fn test_parse_failure_serves_no_queries() {
    let opts = options("= broken", vec![(QueryKind::Key, "anything")]);
    match cli::execute(&opts) {
        Err(CliError::Parse { source_name, error }) => {
            assert_eq!(source_name, "test.toml");
            assert!(!error.is_conversion());
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_failure_message() {
    let opts = options("n = 99999999999999999999", vec![]);
    let err = cli::execute(&opts).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse test.toml: Integer out of range: 99999999999999999999 at line 1"
    );
}

#[test]
fn test_no_input() {
    let mut opts = options("", vec![]);
    opts.input = None;
    assert!(matches!(cli::execute(&opts), Err(CliError::NoInput)));
}

#[test]
fn test_load_file_reports_path() {
    let path = std::path::Path::new("definitely/not/here.toml");
    match cli::load_file(path) {
        Err(CliError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected IO error, got {:?}", other),
    }
}
