use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use http::Method;
use serde_json::{json, Map, Value};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::path::normalize;
use crate::router::Router;
use crate::table::{load_table, TableError};

/// Command-line interface for tailrouter
#[derive(Parser)]
#[command(name = "tailrouter")]
#[command(about = "Validate and query URL route tables", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a route table and report every invalid route
    Check {
        /// Path to the TOML route table
        table: PathBuf,
    },
    /// List the routes of a table
    Routes {
        /// Path to the TOML route table
        table: PathBuf,
    },
    /// Resolve a request against a route table
    Match {
        /// Path to the TOML route table
        table: PathBuf,
        /// HTTP method of the request (case-sensitive)
        method: String,
        /// Request path
        path: String,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Whether a command succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Parse the process arguments and run the selected command against stdout
///
/// # Errors
///
/// Returns an error if the table cannot be loaded or output cannot be written.
pub fn run_cli() -> Result<CommandStatus> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    execute(&cli, &mut stdout.lock())
}

/// Run a parsed command, writing its report to `out`
///
/// # Errors
///
/// Returns an error if the table cannot be loaded, the method is not a valid
/// HTTP token, or output cannot be written.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<CommandStatus> {
    match &cli.command {
        Commands::Check { table } => {
            let table = load_table(table)?;
            match table.build_router() {
                Ok(router) => {
                    router.dump_routes();
                    writeln!(out, "ok: {} route(s)", router.len())?;
                    Ok(CommandStatus::Success)
                }
                Err(err) => report_table_errors(out, &err),
            }
        }
        Commands::Routes { table } => {
            let router = match load_table(table)?.build_router() {
                Ok(router) => router,
                Err(err) => return report_table_errors(out, &err),
            };
            for (method, pattern, handler) in router.route_entries() {
                writeln!(out, "{:<7} {pattern} -> {handler}", method.as_str())?;
            }
            Ok(CommandStatus::Success)
        }
        Commands::Match {
            table,
            method,
            path,
            json,
        } => {
            let method = Method::from_bytes(method.as_bytes())
                .map_err(|_| anyhow!("invalid HTTP method '{method}'"))?;
            let router = match load_table(table)?.build_router() {
                Ok(router) => router,
                Err(err) => return report_table_errors(out, &err),
            };
            print_match(out, &router, &method, path, *json)
        }
    }
}

fn print_match<W: Write>(
    out: &mut W,
    router: &Router<String>,
    method: &Method,
    path: &str,
    as_json: bool,
) -> Result<CommandStatus> {
    let found = router.at(method, path);
    let status = if found.is_some() {
        CommandStatus::Success
    } else {
        CommandStatus::Failure
    };

    if as_json {
        let body = match &found {
            Some(m) => {
                let params: Map<String, Value> = m
                    .params
                    .iter()
                    .map(|(name, value)| (name.to_string(), Value::from(value)))
                    .collect();
                json!({
                    "matched": true,
                    "method": method.as_str(),
                    "path": normalize(path),
                    "handler": m.value,
                    "params": params,
                })
            }
            None => json!({
                "matched": false,
                "method": method.as_str(),
                "path": normalize(path),
            }),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        return Ok(status);
    }

    match found {
        Some(m) => {
            writeln!(out, "{method} {} -> {}", normalize(path), m.value)?;
            for (name, value) in m.params.iter() {
                writeln!(out, "  {name} = {value}")?;
            }
        }
        None => writeln!(out, "{method} {}: no route matched", normalize(path))?,
    }
    Ok(status)
}

fn report_table_errors<W: Write>(out: &mut W, err: &TableError) -> Result<CommandStatus> {
    writeln!(out, "{err}")?;
    for (idx, entry, cause) in &err.errors {
        writeln!(
            out,
            "  route #{} ({} {}): {cause}",
            idx + 1,
            entry.method,
            entry.path
        )?;
    }
    Ok(CommandStatus::Failure)
}
