use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CheckError;
use crate::model::{Side, SourceText};
use crate::pattern::DeclarationPattern;
use crate::presets::Preset;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub native: SideConfig,
    pub consumer: SideConfig,
    #[serde(default)]
    pub check: CheckSection,
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// One side of the boundary: which files to scan and how declarations look.
/// Exactly one of `preset` / `pattern` must be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideConfig {
    #[serde(default)]
    pub label: Option<String>,
    pub files: Vec<String>,
    #[serde(default)]
    pub preset: Option<Preset>,
    #[serde(default)]
    pub pattern: Option<String>,
}

impl SideConfig {
    /// Label used in report lines. Falls back to the side name.
    pub fn label(&self, side: Side) -> String {
        self.label.clone().unwrap_or_else(|| side.to_string())
    }

    pub fn pattern(&self, side: Side) -> Result<DeclarationPattern, CheckError> {
        let label = self.label(side);
        match (self.preset, &self.pattern) {
            (Some(preset), None) => preset.pattern(Some(&label)),
            (None, Some(expr)) => DeclarationPattern::from_regex(label, expr),
            _ => Err(CheckError::ConfigValidation(format!(
                "[{side}]: exactly one of 'preset' or 'pattern' is required"
            ))),
        }
    }

    /// Read every configured file, resolving relative paths against `base_dir`.
    pub fn load(&self, base_dir: &Path, side: Side) -> Result<Vec<SourceText>, CheckError> {
        self.files
            .iter()
            .map(|file| SourceText::read(&base_dir.join(file), side))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Check options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSection {
    #[serde(default)]
    pub unused_exports: UnusedExports,
    #[serde(default)]
    pub parallel: bool,
}

/// Policy for native exports no consumer declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnusedExports {
    /// Not computed.
    #[default]
    Off,
    /// Reported, exit status unaffected.
    Warn,
    /// Reported, and the caller should fail the run.
    Deny,
}

impl UnusedExports {
    pub fn enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl FromStr for UnusedExports {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "warn" => Ok(Self::Warn),
            "deny" => Ok(Self::Deny),
            other => Err(CheckError::ConfigValidation(format!(
                "unused_exports must be off, warn or deny, got '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for UnusedExports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CheckConfig {
    pub fn from_toml(input: &str) -> Result<Self, CheckError> {
        let config: CheckConfig =
            toml::from_str(input).map_err(|e| CheckError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn side(&self, side: Side) -> &SideConfig {
        match side {
            Side::Native => &self.native,
            Side::Consumer => &self.consumer,
        }
    }

    /// Structural checks plus pattern compilation. Does not touch the files.
    pub fn validate(&self) -> Result<(), CheckError> {
        for side in [Side::Native, Side::Consumer] {
            let cfg = self.side(side);

            if cfg.files.is_empty() {
                return Err(CheckError::ConfigValidation(format!(
                    "[{side}]: at least one file is required"
                )));
            }
            if cfg.files.iter().any(|f| f.trim().is_empty()) {
                return Err(CheckError::ConfigValidation(format!(
                    "[{side}]: file paths must not be empty"
                )));
            }
            if let Some(label) = &cfg.label {
                if label.trim().is_empty() {
                    return Err(CheckError::ConfigValidation(format!(
                        "[{side}]: label must not be empty"
                    )));
                }
            }

            // Compiles the regex and enforces preset XOR pattern
            cfg.pattern(side)?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "multiworld"

[native]
label = "Rust"
files = ["crate/multiworld-csharp/src/lib.rs"]
preset = "rust-csharp-ffi"

[consumer]
label = "C#"
files = ["crate/multiworld-bizhawk/OotrMultiworld/src/MainForm.cs"]
pattern = '\[DllImport\("multiworld"\)\] internal static extern \w+ (\w+)\('

[check]
unused_exports = "warn"
"#;

    #[test]
    fn parse_valid() {
        let config = CheckConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name.as_deref(), Some("multiworld"));
        assert_eq!(config.native.preset, Some(Preset::RustCsharpFfi));
        assert_eq!(config.consumer.label(Side::Consumer), "C#");
        assert_eq!(config.check.unused_exports, UnusedExports::Warn);
        assert!(!config.check.parallel);
    }

    #[test]
    fn check_section_defaults() {
        let input = r#"
[native]
files = ["lib.rs"]
preset = "rust-extern-c"

[consumer]
files = ["Native.cs"]
preset = "csharp-dllimport"
"#;
        let config = CheckConfig::from_toml(input).unwrap();
        assert_eq!(config.check.unused_exports, UnusedExports::Off);
        assert_eq!(config.native.label(Side::Native), "native");
        assert_eq!(config.consumer.label(Side::Consumer), "consumer");
    }

    #[test]
    fn label_falls_back_to_side_name() {
        let input = r#"
[native]
files = ["lib.rs"]
pattern = 'export (\w+)'

[consumer]
files = ["app.txt"]
pattern = 'import (\w+)'
"#;
        let config = CheckConfig::from_toml(input).unwrap();
        assert_eq!(config.native.label(Side::Native), "native");
        assert_eq!(config.consumer.pattern(Side::Consumer).unwrap().label(), "consumer");
    }

    #[test]
    fn reject_preset_and_pattern() {
        let input = r#"
[native]
files = ["lib.rs"]
preset = "rust-extern-c"
pattern = 'fn (\w+)'

[consumer]
files = ["Native.cs"]
preset = "csharp-dllimport"
"#;
        let err = CheckConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("exactly one of"));
    }

    #[test]
    fn reject_missing_files() {
        let input = r#"
[native]
files = []
preset = "rust-extern-c"

[consumer]
files = ["Native.cs"]
preset = "csharp-dllimport"
"#;
        let err = CheckConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("[native]: at least one file"));
    }

    #[test]
    fn reject_unknown_preset() {
        let input = r#"
[native]
files = ["lib.rs"]
preset = "rust-extern-cpp"

[consumer]
files = ["Native.cs"]
preset = "csharp-dllimport"
"#;
        let err = CheckConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, CheckError::ConfigParse(_)));
    }

    #[test]
    fn reject_pattern_without_capture() {
        let input = r#"
[native]
files = ["lib.rs"]
preset = "rust-extern-c"

[consumer]
label = "C#"
files = ["Native.cs"]
pattern = 'DllImport'
"#;
        let err = CheckConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, CheckError::InvalidPattern { ref label, .. } if label == "C#"));
    }

    #[test]
    fn reject_empty_label() {
        let input = r#"
[native]
label = " "
files = ["lib.rs"]
preset = "rust-extern-c"

[consumer]
files = ["Native.cs"]
preset = "csharp-dllimport"
"#;
        let err = CheckConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("label must not be empty"));
    }

    #[test]
    fn reject_bad_unused_policy() {
        let input = format!("{VALID}\n").replace("\"warn\"", "\"loud\"");
        assert!(CheckConfig::from_toml(&input).is_err());
        assert_eq!("deny".parse::<UnusedExports>().unwrap(), UnusedExports::Deny);
        assert!("loud".parse::<UnusedExports>().is_err());
    }
}
