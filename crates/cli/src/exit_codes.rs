//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: CI gates rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Every consumer symbol is exported by the native side |
//! | 1    | Findings: consumer imports missing from native side  |
//! | 2    | CLI usage error (bad args)                           |
//! | 3    | Unused native exports under `--unused-exports deny`  |
//! | 4    | A source or config file could not be read            |
//! | 5    | Invalid config or declaration pattern                |
//! | 6    | Report output could not be written                   |

use ffisync_check::CheckError;

/// Success - no findings.
pub const EXIT_SUCCESS: u8 = 0;

/// Findings present. Like `diff(1)`, exit 1 means "sides differ."
pub const EXIT_FINDINGS: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// Matches clap's own exit code for argument errors.
pub const EXIT_USAGE: u8 = 2;

/// Native exports nobody imports, with the deny policy in effect.
pub const EXIT_UNUSED_EXPORTS: u8 = 3;

/// Input unavailable (missing or unreadable file).
pub const EXIT_INPUT_UNAVAILABLE: u8 = 4;

/// Config parse/validation failure, unknown preset, bad regex.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// Writing the report (stderr, stdout, --output file) failed.
pub const EXIT_OUTPUT: u8 = 6;

/// Map an engine error to its exit code.
pub fn check_exit_code(err: &CheckError) -> u8 {
    match err {
        CheckError::InputUnavailable { .. } => EXIT_INPUT_UNAVAILABLE,
        CheckError::InvalidPattern { .. }
        | CheckError::UnknownPreset(_)
        | CheckError::ConfigParse(_)
        | CheckError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        CheckError::Io(_) => EXIT_OUTPUT,
    }
}
