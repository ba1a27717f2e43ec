//! `ffisync check` / `compare` / `validate` / `presets`.
//!
//! Finding lines go to stderr, the JSON report to stdout or a file. The exit
//! code is the machine-readable verdict.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ffisync_check::config::CheckConfig;
use ffisync_check::engine::{check, check_config, CheckOptions};
use ffisync_check::report::{write_report, ExitStatus};
use ffisync_check::{CheckError, CheckResult, DeclarationPattern, Preset, Side, SourceText, UnusedExports};
use serde::Serialize;

use crate::exit_codes::{EXIT_FINDINGS, EXIT_UNUSED_EXPORTS};
use crate::CliError;

pub struct CompareArgs {
    pub native: Vec<PathBuf>,
    pub consumer: Vec<PathBuf>,
    pub native_preset: Option<Preset>,
    pub native_pattern: Option<String>,
    pub consumer_preset: Option<Preset>,
    pub consumer_pattern: Option<String>,
    pub native_label: Option<String>,
    pub consumer_label: Option<String>,
    pub unused_exports: UnusedExports,
    pub json: bool,
    pub output: Option<PathBuf>,
}

/// JSON report: the engine result plus the verdict.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a CheckResult,
    status: ExitStatus,
    exit_code: u8,
}

fn read_config(config_path: &Path) -> Result<CheckConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::input(format!("cannot read config {}: {e}", config_path.display()))
            .with_hint("create one with [native] and [consumer] sections, see `ffisync check --help`")
    })?;
    Ok(CheckConfig::from_toml(&config_str)?)
}

pub fn cmd_check(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    unused_exports: Option<UnusedExports>,
    parallel: bool,
) -> Result<(), CliError> {
    let config = read_config(&config_path)?;

    let mut options = CheckOptions::from(&config.check);
    if let Some(policy) = unused_exports {
        options.unused_exports = policy;
    }
    options.parallel |= parallel;

    // Source paths are relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    if let Some(name) = &config.name {
        log::info!("checking '{name}'");
    }
    let result = check_config(&config, base_dir, &options)?;

    finish(&result, options.unused_exports, json_output, output_file)
}

pub fn cmd_compare(args: CompareArgs) -> Result<(), CliError> {
    let native_pattern = side_pattern(
        Side::Native,
        args.native_preset,
        args.native_pattern.as_deref(),
        args.native_label.as_deref(),
    )?;
    let consumer_pattern = side_pattern(
        Side::Consumer,
        args.consumer_preset,
        args.consumer_pattern.as_deref(),
        args.consumer_label.as_deref(),
    )?;

    let native = load_sources(&args.native, Side::Native)?;
    let consumer = load_sources(&args.consumer, Side::Consumer)?;

    let options = CheckOptions {
        unused_exports: args.unused_exports,
        parallel: false,
    };
    let result = check(&native, &consumer, &native_pattern, &consumer_pattern, &options);

    finish(&result, options.unused_exports, args.json, args.output)
}

fn side_pattern(
    side: Side,
    preset: Option<Preset>,
    expr: Option<&str>,
    label: Option<&str>,
) -> Result<DeclarationPattern, CliError> {
    let pattern = match (preset, expr) {
        (Some(preset), None) => preset.pattern(label)?,
        (None, Some(expr)) => {
            let label = label.map(str::to_string).unwrap_or_else(|| side.to_string());
            DeclarationPattern::from_regex(label, expr)?
        }
        _ => {
            return Err(CliError::usage(format!(
                "exactly one of --{side}-preset or --{side}-pattern is required"
            )))
        }
    };
    Ok(pattern)
}

fn load_sources(paths: &[PathBuf], side: Side) -> Result<Vec<SourceText>, CliError> {
    let sources = paths
        .iter()
        .map(|path| SourceText::read(path, side))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sources)
}

fn finish(
    result: &CheckResult,
    policy: UnusedExports,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    {
        let stderr = io::stderr();
        let mut sink = stderr.lock();
        write_report(result, &mut sink)
            .map_err(CheckError::from)?;
    }

    let status = ExitStatus::of(result);
    let exit_code = if status == ExitStatus::Failure {
        EXIT_FINDINGS
    } else if policy == UnusedExports::Deny && !result.unused_exports.is_empty() {
        EXIT_UNUSED_EXPORTS
    } else {
        status.code()
    };

    if json_output || output_file.is_some() {
        let report = JsonReport { result, status, exit_code };
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::output(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| CheckError::Io(format!("cannot write {}: {e}", path.display())))?;
            log::info!("wrote {}", path.display());
        }

        if json_output {
            println!("{json_str}");
        }
    }

    log::info!(
        "{} finding(s), {} unused export(s)",
        result.findings.len(),
        result.unused_exports.len()
    );

    match exit_code {
        0 => Ok(()),
        code => Err(CliError::silent(code)),
    }
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let native = config.native.pattern(Side::Native)?;
    let consumer = config.consumer.pattern(Side::Consumer)?;

    eprintln!(
        "valid: {}native '{}' ({} file(s)), consumer '{}' ({} file(s)), unused exports {}",
        config.name.as_deref().map(|n| format!("'{n}': ")).unwrap_or_default(),
        native.label(),
        config.native.files.len(),
        consumer.label(),
        config.consumer.files.len(),
        config.check.unused_exports,
    );
    Ok(())
}

pub fn cmd_presets() -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for preset in Preset::ALL {
        writeln!(
            handle,
            "{:<18} {:<9} {}",
            preset.name(),
            preset.side().to_string(),
            preset.expression()
        )
        .map_err(CheckError::from)?;
    }
    Ok(())
}
