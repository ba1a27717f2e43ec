//! Report & exit-status driver. The only part of the engine that writes.
//!
//! Output goes to any [`Write`] sink: stderr in the CLI, a `Vec<u8>` in tests.

use std::io::{self, Write};

use serde::Serialize;

use crate::extract::extract;
use crate::model::{CheckResult, Finding};
use crate::pattern::DeclarationPattern;
use crate::reconcile::reconcile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    /// Every consumer symbol is exported by the native side.
    Success,
    /// At least one finding.
    Failure,
}

impl ExitStatus {
    pub fn of(result: &CheckResult) -> Self {
        Self::from_findings(&result.findings)
    }

    pub fn from_findings(findings: &[Finding]) -> Self {
        if findings.is_empty() {
            Self::Success
        } else {
            Self::Failure
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

pub fn format_finding(consumer_label: &str, symbol: &str) -> String {
    format!("only in {consumer_label}: {symbol}")
}

pub fn format_unused_export(native_label: &str, symbol: &str) -> String {
    format!("unused export in {native_label}: {symbol}")
}

/// One line per finding, then one per unused export (if any were computed).
pub fn write_report<W: Write>(result: &CheckResult, sink: &mut W) -> io::Result<()> {
    for finding in &result.findings {
        writeln!(sink, "{}", format_finding(&result.consumer_label, &finding.symbol))?;
    }
    for unused in &result.unused_exports {
        writeln!(sink, "{}", format_unused_export(&result.native_label, &unused.symbol))?;
    }
    Ok(())
}

/// Check one native blob against one consumer blob, writing a line per
/// finding to `sink`.
pub fn run<W: Write>(
    native_source: &str,
    consumer_source: &str,
    native_pattern: &DeclarationPattern,
    consumer_pattern: &DeclarationPattern,
    sink: &mut W,
) -> io::Result<ExitStatus> {
    let native = extract(native_source, native_pattern);
    let consumer = extract(consumer_source, consumer_pattern);
    let findings = reconcile(&native, &consumer);

    for finding in &findings {
        writeln!(sink, "{}", format_finding(consumer_pattern.label(), &finding.symbol))?;
    }

    Ok(ExitStatus::from_findings(&findings))
}
