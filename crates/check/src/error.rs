use std::fmt;

use crate::model::Side;

#[derive(Debug)]
pub enum CheckError {
    /// Source text for one side could not be read.
    InputUnavailable { side: Side, path: String, message: String },
    /// Declaration pattern does not compile or has the wrong capture count.
    InvalidPattern { label: String, message: String },
    /// Preset name not in the built-in table.
    UnknownPreset(String),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (missing files, preset and pattern both set, etc.).
    ConfigValidation(String),
    /// IO error (report sink, etc.).
    Io(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputUnavailable { side, path, message } => {
                write!(f, "{side} source '{path}' unavailable: {message}")
            }
            Self::InvalidPattern { label, message } => {
                write!(f, "invalid declaration pattern for '{label}': {message}")
            }
            Self::UnknownPreset(name) => {
                write!(f, "unknown preset '{name}' (expected one of: {})", crate::presets::Preset::names().join(", "))
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<std::io::Error> for CheckError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
