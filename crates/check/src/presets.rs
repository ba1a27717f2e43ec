//! Built-in declaration patterns for the binding conventions we know about.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CheckError;
use crate::model::Side;
use crate::pattern::DeclarationPattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// `#[csharp_ffi] pub [unsafe] extern "C" fn name(` on one line.
    RustCsharpFfi,
    /// Any `pub [unsafe] extern "C" fn name(`, attributes allowed in front.
    RustExternC,
    /// `[DllImport("lib")] <modifiers> extern <type> name(` on one line.
    CsharpDllimport,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::RustCsharpFfi, Self::RustExternC, Self::CsharpDllimport];

    pub fn name(&self) -> &'static str {
        match self {
            Self::RustCsharpFfi => "rust-csharp-ffi",
            Self::RustExternC => "rust-extern-c",
            Self::CsharpDllimport => "csharp-dllimport",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Preset::name).collect()
    }

    /// The side this convention normally describes.
    pub fn side(&self) -> Side {
        match self {
            Self::RustCsharpFfi | Self::RustExternC => Side::Native,
            Self::CsharpDllimport => Side::Consumer,
        }
    }

    /// Label used when none is configured: the side name.
    pub fn default_label(&self) -> &'static str {
        match self.side() {
            Side::Native => "native",
            Side::Consumer => "consumer",
        }
    }

    pub fn expression(&self) -> &'static str {
        match self {
            Self::RustCsharpFfi => r#"#\[csharp_ffi\] pub (?:unsafe )?extern "C" fn ([0-9a-z_]+)\("#,
            Self::RustExternC => {
                r#"^\s*(?:#\[[^\]]*\]\s*)*pub\s+(?:unsafe\s+)?extern\s+"C"\s+fn\s+([A-Za-z_][A-Za-z0-9_]*)\s*\("#
            }
            Self::CsharpDllimport => {
                r#"\[DllImport\([^)]*\)\]\s*(?:\w+\s+)*extern\s+[\w.<>\[\]*?]+\s+(\w+)\s*\("#
            }
        }
    }

    /// Compile into a pattern labelled `label`, or the preset's default label.
    pub fn pattern(&self, label: Option<&str>) -> Result<DeclarationPattern, CheckError> {
        DeclarationPattern::from_regex(label.unwrap_or(self.default_label()), self.expression())
    }
}

impl FromStr for Preset {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| CheckError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
