//! Unit tests for CLI commands

use crate::cli::{execute, Cli, CommandStatus, Commands};
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

const TABLE: &str = r#"
[[route]]
method = "GET"
path = "/api/user/:id/:post"
handler = "get_post"

[[route]]
method = "GET"
path = "/static/*filename"
handler = "serve_static"

[[route]]
method = "POST"
path = "/api/user/:id"
handler = "update_user"
"#;

fn table_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> (CommandStatus, String) {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let mut out = Vec::new();
    let status = execute(&cli, &mut out).unwrap();
    (status, String::from_utf8(out).unwrap())
}

#[test]
fn test_match_command_parses() {
    let cli = Cli::try_parse_from(["tailrouter", "match", "routes.toml", "GET", "/a", "--json"])
        .unwrap();
    match cli.command {
        Commands::Match {
            table,
            method,
            path,
            json,
        } => {
            assert_eq!(table.to_string_lossy(), "routes.toml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/a");
            assert!(json);
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_check_valid_table() {
    let file = table_file(TABLE);
    let path = file.path().to_string_lossy().to_string();
    let (status, out) = run(&["tailrouter", "check", &path]);
    assert_eq!(status, CommandStatus::Success);
    assert_eq!(out, "ok: 3 route(s)\n");
}

#[test]
fn test_check_reports_every_invalid_route() {
    let file = table_file(
        r#"
[[route]]
method = "GET"
path = "/user/:id"
handler = "a"

[[route]]
method = "GET"
path = "/user/list"
handler = "b"

[[route]]
method = "GET"
path = "/files/*rest/more"
handler = "c"
"#,
    );
    let path = file.path().to_string_lossy().to_string();
    let (status, out) = run(&["tailrouter", "check", &path]);
    assert_eq!(status, CommandStatus::Failure);
    assert!(out.starts_with("route table has 2 invalid route(s)\n"));
    assert!(out.contains("route #2 (GET /user/list)"));
    assert!(out.contains("route #3 (GET /files/*rest/more)"));
}

#[test]
fn test_routes_lists_by_method() {
    let file = table_file(TABLE);
    let path = file.path().to_string_lossy().to_string();
    let (status, out) = run(&["tailrouter", "routes", &path]);
    assert_eq!(status, CommandStatus::Success);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.contains(&"GET     /api/user/:id/:post -> get_post"));
    assert!(lines.contains(&"GET     /static/*filename -> serve_static"));
    assert_eq!(lines[2], "POST    /api/user/:id -> update_user");
}

#[test]
fn test_match_text_output() {
    let file = table_file(TABLE);
    let path = file.path().to_string_lossy().to_string();
    let (status, out) = run(&["tailrouter", "match", &path, "GET", "/api//user/7/./hello"]);
    assert_eq!(status, CommandStatus::Success);
    assert_eq!(out, "GET /api/user/7/hello -> get_post\n  id = 7\n  post = hello\n");
}

#[test]
fn test_match_json_output() {
    let file = table_file(TABLE);
    let path = file.path().to_string_lossy().to_string();
    let (status, out) = run(&[
        "tailrouter",
        "match",
        &path,
        "GET",
        "/static/css/site.css",
        "--json",
    ]);
    assert_eq!(status, CommandStatus::Success);
    let body: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(body["matched"], true);
    assert_eq!(body["handler"], "serve_static");
    assert_eq!(body["params"]["filename"], "/css/site.css");
}

#[test]
fn test_match_miss_fails() {
    let file = table_file(TABLE);
    let path = file.path().to_string_lossy().to_string();
    let (status, out) = run(&["tailrouter", "match", &path, "DELETE", "/api/user/7"]);
    assert_eq!(status, CommandStatus::Failure);
    assert_eq!(out, "DELETE /api/user/7: no route matched\n");
}

#[test]
fn test_match_rejects_invalid_method() {
    let file = table_file(TABLE);
    let path = file.path().to_string_lossy().to_string();
    let cli = Cli::try_parse_from(["tailrouter", "match", &path, "G T", "/"]).unwrap();
    let mut out = Vec::new();
    assert!(execute(&cli, &mut out).is_err());
}

#[test]
fn test_missing_table_is_an_error() {
    let cli = Cli::try_parse_from(["tailrouter", "check", "/definitely/not/here.toml"]).unwrap();
    let mut out = Vec::new();
    let err = execute(&cli, &mut out).unwrap_err();
    assert!(err.to_string().contains("failed to read route table"));
}
