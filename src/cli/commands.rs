//! CLI command implementations
//!
//! Boot is the same for both commands: resolve the data path, load the
//! CSV into the trie, wrap it in a search engine. `query` runs once and
//! exits; `repl` keeps prompting until `!quit` or end of input. A filter
//! error inside the REPL is reported and the loop continues; the engine
//! and its trie are untouched by a failed query.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::dataset::load_trie;
use crate::search::SearchEngine;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{prompt_line, write_no_prefix, write_outcome};

/// Sentinel ending the interactive loop
const QUIT: &str = "!quit";

const FILTER_PROMPT: &str = "Filter expression (empty for none, '!quit' to exit): ";
const PREFIX_PROMPT: &str = "Name prefix (empty for all, '!quit' to exit): ";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the airports CSV (optional, default "airports.csv")
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    "airports.csv".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.data_file.is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }
        Ok(())
    }
}

/// Parse arguments, set up logging, dispatch.
pub fn run() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    run_command(Cli::parse_args())
}

/// Dispatch a parsed command
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Repl { config, data } => {
            let engine = boot(&resolve_data_path(config.as_deref(), data)?)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            repl_loop(&engine, &mut stdin.lock(), &mut stdout.lock())
        }
        Command::Query {
            prefix,
            filter,
            config,
            data,
        } => {
            let engine = boot(&resolve_data_path(config.as_deref(), data)?)?;
            let stdout = io::stdout();
            query(&engine, &mut stdout.lock(), &prefix, &filter)
        }
    }
}

/// The data path is the `--data` flag, else the config file, else the
/// built-in default. An absent config file is only an error when the flag
/// named it explicitly.
fn resolve_data_path(config: Option<&Path>, data: Option<PathBuf>) -> CliResult<PathBuf> {
    if let Some(data) = data {
        return Ok(data);
    }
    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Ok(PathBuf::from(config.data_file))
}

/// Load the dataset and wrap it in a search engine
fn boot(data: &Path) -> CliResult<SearchEngine> {
    Ok(SearchEngine::new(load_trie(data)?))
}

/// One-shot query: print the outcome, fail on a bad filter
fn query(
    engine: &SearchEngine,
    output: &mut impl Write,
    prefix: &str,
    filter: &str,
) -> CliResult<()> {
    let outcome = engine.find(prefix, filter)?;
    if outcome.prefix_matched {
        write_outcome(output, &outcome)
    } else {
        write_no_prefix(output, prefix)
    }
}

/// Interactive loop: filter first, then prefix, until `!quit` or EOF.
fn repl_loop(
    engine: &SearchEngine,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> CliResult<()> {
    loop {
        let filter = match prompt_line(input, output, FILTER_PROMPT)? {
            Some(line) if line != QUIT => line,
            _ => break,
        };
        let prefix = match prompt_line(input, output, PREFIX_PROMPT)? {
            Some(line) if line != QUIT => line,
            _ => break,
        };

        match engine.find(&prefix, &filter) {
            Ok(outcome) if outcome.prefix_matched => write_outcome(output, &outcome)?,
            Ok(_) => write_no_prefix(output, &prefix)?,
            Err(e) => {
                writeln!(output, "filter could not be evaluated: {}", e)?;
                output.flush()?;
            }
        }
    }
    writeln!(output, "Bye")?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldTuple, FieldValue};
    use crate::trie::NameTrie;
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    fn engine() -> SearchEngine {
        let mut trie = NameTrie::new();
        trie.insert(
            "Sheremetyevo",
            FieldTuple::new(vec![FieldValue::Int(110), FieldValue::str("RU")]),
        );
        SearchEngine::new(trie)
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.data_file, "airports.csv");
    }

    #[test]
    fn test_config_load_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        file.flush().unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data_file, "airports.csv");
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"data_file": "custom.csv"}"#).unwrap();
        file.flush().unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data_file, "custom.csv");
    }

    #[test]
    fn test_config_rejects_empty_data_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"data_file": ""}"#).unwrap();
        file.flush().unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_fatal() {
        let err = resolve_data_path(Some(Path::new("/nonexistent.json")), None).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn test_data_flag_overrides_config() {
        let path = resolve_data_path(None, Some(PathBuf::from("flag.csv"))).unwrap();
        assert_eq!(path, PathBuf::from("flag.csv"));
    }

    #[test]
    fn test_query_prints_rows_and_summary() {
        let mut output = Vec::new();
        query(&engine(), &mut output, "Sher", "").unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("\"Sheremetyevo\" [110, \"RU\"]\n"));
        assert!(text.contains("Rows found: 1\n"));
        assert!(text.contains("Search time: "));
    }

    #[test]
    fn test_query_unknown_prefix_reports_distinctly() {
        let mut output = Vec::new();
        query(&engine(), &mut output, "xyz", "").unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No rows match prefix 'xyz'\n"
        );
    }

    #[test]
    fn test_query_bad_filter_is_error() {
        let mut output = Vec::new();
        let err = query(&engine(), &mut output, "Sher", "[1]=(2").unwrap_err();
        assert!(err.message().contains("FILTER_UNBALANCED_PAREN"));
        // nothing partially printed
        assert!(output.is_empty());
    }

    #[test]
    fn test_repl_quit_at_filter_prompt() {
        let mut input = &b"!quit\n"[..];
        let mut output = Vec::new();

        repl_loop(&engine(), &mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains(FILTER_PROMPT));
        assert!(text.ends_with("Bye\n"));
    }

    #[test]
    fn test_repl_one_query_then_eof() {
        let mut input = &b"\nSher\n"[..];
        let mut output = Vec::new();

        repl_loop(&engine(), &mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\"Sheremetyevo\" [110, \"RU\"]"));
        assert!(text.contains("Rows found: 1"));
    }

    #[test]
    fn test_repl_survives_bad_filter() {
        let mut input = &b"[1]=(2\nSher\n\nSher\n!quit\n"[..];
        let mut output = Vec::new();

        repl_loop(&engine(), &mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("filter could not be evaluated"));
        // the loop went on to answer the second, valid query
        assert!(text.contains("Rows found: 1"));
    }
}
