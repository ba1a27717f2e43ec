// ffisync CLI - checks that an FFI consumer only imports what the native side exports

mod check;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use ffisync_check::{CheckError, Preset, UnusedExports};
use log::LevelFilter;

use exit_codes::{check_exit_code, EXIT_INPUT_UNAVAILABLE, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "ffisync")]
#[command(about = "Cross-language FFI symbol consistency checker")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the check described by a TOML config file
    #[command(after_help = "\
Examples:
  ffisync check bindings.ffisync.toml
  ffisync check bindings.ffisync.toml --json
  ffisync check bindings.ffisync.toml --unused-exports warn
  ffisync check bindings.ffisync.toml --output report.json")]
    Check {
        /// Path to the .ffisync.toml config file
        config: PathBuf,

        /// Write the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Override the config's unused-export policy (off, warn, deny)
        #[arg(long, value_name = "POLICY", value_parser = parse_unused_exports)]
        unused_exports: Option<UnusedExports>,

        /// Extract both sides on separate threads
        #[arg(long)]
        parallel: bool,
    },

    /// Compare source files directly, without a config file
    #[command(after_help = "\
Examples:
  ffisync compare --native src/lib.rs --native-preset rust-csharp-ffi \\
                  --consumer MainForm.cs --consumer-preset csharp-dllimport
  ffisync compare --native a.rs b.rs --native-preset rust-extern-c \\
                  --consumer app.py --consumer-pattern 'lib\\.(\\w+)\\(' --consumer-label Python")]
    Compare {
        /// Native-side source files
        #[arg(long, required = true, num_args = 1..)]
        native: Vec<PathBuf>,

        /// Consumer-side source files
        #[arg(long, required = true, num_args = 1..)]
        consumer: Vec<PathBuf>,

        /// Built-in native declaration pattern
        #[arg(long, value_name = "PRESET", value_parser = parse_preset,
              conflicts_with = "native_pattern", required_unless_present = "native_pattern")]
        native_preset: Option<Preset>,

        /// Native declaration regex with one capture group for the symbol
        #[arg(long, value_name = "REGEX")]
        native_pattern: Option<String>,

        /// Built-in consumer declaration pattern
        #[arg(long, value_name = "PRESET", value_parser = parse_preset,
              conflicts_with = "consumer_pattern", required_unless_present = "consumer_pattern")]
        consumer_preset: Option<Preset>,

        /// Consumer declaration regex with one capture group for the symbol
        #[arg(long, value_name = "REGEX")]
        consumer_pattern: Option<String>,

        /// Label for the native side in report lines
        #[arg(long, value_name = "LABEL")]
        native_label: Option<String>,

        /// Label for the consumer side in report lines
        #[arg(long, value_name = "LABEL")]
        consumer_label: Option<String>,

        /// Unused-export policy (off, warn, deny)
        #[arg(long, value_name = "POLICY", value_parser = parse_unused_exports, default_value = "off")]
        unused_exports: UnusedExports,

        /// Write the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate a config file (parse, compile patterns) without reading sources
    Validate {
        /// Path to the .ffisync.toml config file
        config: PathBuf,
    },

    /// List built-in declaration patterns
    Presets,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    s.parse().map_err(|e: CheckError| e.to_string())
}

fn parse_unused_exports(s: &str) -> Result<UnusedExports, String> {
    s.parse().map_err(|e: CheckError| e.to_string())
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("FFISYNC_REVISION"), ")",
        "\nengine:  ffisync-check ", env!("CARGO_PKG_VERSION"),
        "\nbuild:   ", env!("FFISYNC_PROFILE"),
        "\ntarget:  ", env!("FFISYNC_TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            config,
            json,
            output,
            unused_exports,
            parallel,
        } => check::cmd_check(config, json, output, unused_exports, parallel),
        Commands::Compare {
            native,
            consumer,
            native_preset,
            native_pattern,
            consumer_preset,
            consumer_pattern,
            native_label,
            consumer_label,
            unused_exports,
            json,
            output,
        } => check::cmd_compare(check::CompareArgs {
            native,
            consumer,
            native_preset,
            native_pattern,
            consumer_preset,
            consumer_pattern,
            native_label,
            consumer_label,
            unused_exports,
            json,
            output,
        }),
        Commands::Validate { config } => check::cmd_validate(config),
        Commands::Presets => check::cmd_presets(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_UNAVAILABLE, message: msg.into(), hint: None }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT, message: msg.into(), hint: None }
    }

    /// Exit with `code` and print nothing beyond what was already reported.
    pub fn silent(code: u8) -> Self {
        Self { code, message: String::new(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<CheckError> for CliError {
    fn from(err: CheckError) -> Self {
        let code = check_exit_code(&err);
        let hint = match &err {
            CheckError::InvalidPattern { .. } => {
                Some("the pattern needs exactly one capture group, e.g. `fn (\\w+)\\(`".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_write_failure_exits_with_output_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = CliError::from(CheckError::from(io_err));
        assert_eq!(err.code, EXIT_OUTPUT);
        assert!(err.message.contains("pipe closed"));
        assert!(err.hint.is_none());
    }

    #[test]
    fn invalid_pattern_carries_hint() {
        let err = CliError::from(CheckError::InvalidPattern {
            label: "C#".into(),
            message: "expected exactly one capture group, found 0".into(),
        });
        assert_eq!(err.code, exit_codes::EXIT_INVALID_CONFIG);
        assert!(err.hint.unwrap().contains("capture group"));
    }
}
