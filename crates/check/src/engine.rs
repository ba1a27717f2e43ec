use std::path::Path;

use crate::config::{CheckConfig, CheckSection, UnusedExports};
use crate::error::CheckError;
use crate::extract::extract_sources;
use crate::model::{CheckResult, Side, SourceText, SymbolSet};
use crate::pattern::DeclarationPattern;
use crate::reconcile::{reconcile, unused_exports};

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    pub unused_exports: UnusedExports,
    /// Run the two extraction passes on separate threads.
    pub parallel: bool,
}

impl From<&CheckSection> for CheckOptions {
    fn from(section: &CheckSection) -> Self {
        Self {
            unused_exports: section.unused_exports,
            parallel: section.parallel,
        }
    }
}

/// Single pass: extract both sides, reconcile, collect findings.
pub fn check(
    native: &[SourceText],
    consumer: &[SourceText],
    native_pattern: &DeclarationPattern,
    consumer_pattern: &DeclarationPattern,
    options: &CheckOptions,
) -> CheckResult {
    let (native_set, consumer_set) = if options.parallel {
        extract_parallel(native, consumer, native_pattern, consumer_pattern)
    } else {
        (
            extract_sources(native, native_pattern),
            extract_sources(consumer, consumer_pattern),
        )
    };

    log::info!(
        "{} symbol(s) exported by {}, {} declared by {}",
        native_set.len(),
        native_pattern.label(),
        consumer_set.len(),
        consumer_pattern.label(),
    );

    let findings = reconcile(&native_set, &consumer_set);
    let unused = if options.unused_exports.enabled() {
        unused_exports(&native_set, &consumer_set)
    } else {
        Vec::new()
    };

    CheckResult {
        native_label: native_pattern.label().to_string(),
        consumer_label: consumer_pattern.label().to_string(),
        native_symbols: native_set.len(),
        consumer_symbols: consumer_set.len(),
        findings,
        unused_exports: unused,
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn extract_parallel(
    native: &[SourceText],
    consumer: &[SourceText],
    native_pattern: &DeclarationPattern,
    consumer_pattern: &DeclarationPattern,
) -> (SymbolSet, SymbolSet) {
    std::thread::scope(|s| {
        let native_pass = s.spawn(|| extract_sources(native, native_pattern));
        let consumer_set = extract_sources(consumer, consumer_pattern);
        let native_set = match native_pass.join() {
            Ok(set) => set,
            Err(payload) => std::panic::resume_unwind(payload),
        };
        (native_set, consumer_set)
    })
}

/// Load the configured files (relative to `base_dir`) and run the check.
pub fn check_config(
    config: &CheckConfig,
    base_dir: &Path,
    options: &CheckOptions,
) -> Result<CheckResult, CheckError> {
    let native_pattern = config.native.pattern(Side::Native)?;
    let consumer_pattern = config.consumer.pattern(Side::Consumer)?;

    let native = config.native.load(base_dir, Side::Native)?;
    let consumer = config.consumer.load(base_dir, Side::Consumer)?;

    Ok(check(&native, &consumer, &native_pattern, &consumer_pattern, options))
}
