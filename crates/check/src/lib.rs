//! `ffisync-check` — FFI symbol reconciliation engine.
//!
//! Pure engine crate: scans source text for declared symbols on the native
//! and consumer side of an FFI boundary and reports consumer imports the
//! native side does not export. No CLI dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod pattern;
pub mod presets;
pub mod reconcile;
pub mod report;

pub use config::{CheckConfig, UnusedExports};
pub use engine::{check, check_config, CheckOptions};
pub use error::CheckError;
pub use extract::{extract, extract_sources};
pub use model::{CheckResult, Finding, Side, SourceText, SymbolSet};
pub use pattern::{DeclarationPattern, RegexMatcher, SymbolMatcher};
pub use presets::Preset;
pub use reconcile::{reconcile, unused_exports};
pub use report::{run, ExitStatus};
