//! Configuration: key lookup, per-file rule settings, and the TOML file format.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Namespaced key for the method body line limit. Wins over [`MAX_LINES_KEY`].
pub const MAX_LINES_NAMESPACED_KEY: &str =
    "dotnet_analyzer_diagnostic.wt_common_method_length_max_lines";
/// Bare key for the method body line limit.
pub const MAX_LINES_KEY: &str = "wt_common_method_length_max_lines";
/// Key for the `,`/`;` separated list of targeted path substrings.
pub const TARGET_PREFIXES_KEY: &str = "wt_common_analyzer_target_prefixes";
/// Key controlling whether test-classified code is skipped.
pub const EXCLUDE_TESTS_KEY: &str = "wt_common_analyzer_exclude_tests";

/// Default method body line limit.
pub const DEFAULT_MAX_METHOD_BODY_LINES: usize = 5;
/// Default targeted path substring.
pub const DEFAULT_TARGET_PREFIX: &str = "WorkTrack.";

/// Resolved key/value options for a source file.
///
/// This is the boundary to whatever configuration source the host uses
/// (editorconfig, TOML, environment). Implementations must be shareable
/// across analysis threads.
pub trait ConfigLookup: Send + Sync {
    /// Returns the raw value of `key` as it applies to `file`.
    fn value(&self, file: &Path, key: &str) -> Option<String>;
}

impl<S: std::hash::BuildHasher + Send + Sync> ConfigLookup for HashMap<String, String, S> {
    fn value(&self, _file: &Path, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl ConfigLookup for BTreeMap<String, String> {
    fn value(&self, _file: &Path, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Settings every rule sees for one file. Built once per file and not
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    max_method_body_lines: usize,
    target_path_prefixes: Vec<String>,
    exclude_tests: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_method_body_lines: DEFAULT_MAX_METHOD_BODY_LINES,
            target_path_prefixes: vec![DEFAULT_TARGET_PREFIX.to_string()],
            exclude_tests: true,
        }
    }
}

impl RuleConfig {
    /// Creates a configuration from explicit values.
    ///
    /// A zero line limit falls back to the default, as does a prefix list
    /// that is empty after trimming. Duplicate prefixes are dropped.
    #[must_use]
    pub fn new<I, S>(max_method_body_lines: usize, target_path_prefixes: I, exclude_tests: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self {
            exclude_tests,
            ..Self::default()
        };
        if max_method_body_lines > 0 {
            config.max_method_body_lines = max_method_body_lines;
        }
        let prefixes = normalize_prefixes(target_path_prefixes);
        if !prefixes.is_empty() {
            config.target_path_prefixes = prefixes;
        }
        config
    }

    /// Resolves the configuration for `file`.
    ///
    /// Missing or malformed values fall back to their defaults; this never
    /// fails.
    #[must_use]
    pub fn resolve(lookup: &dyn ConfigLookup, file: &Path) -> Self {
        let mut config = Self::default();

        let max_lines = lookup
            .value(file, MAX_LINES_NAMESPACED_KEY)
            .or_else(|| lookup.value(file, MAX_LINES_KEY));
        if let Some(raw) = max_lines {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_method_body_lines = n,
                _ => debug!(
                    "Ignoring invalid {} value {:?} for {}",
                    MAX_LINES_KEY,
                    raw,
                    file.display()
                ),
            }
        }

        if let Some(raw) = lookup.value(file, TARGET_PREFIXES_KEY) {
            let prefixes = normalize_prefixes(raw.split([',', ';']));
            if prefixes.is_empty() {
                debug!(
                    "Ignoring empty {} value for {}",
                    TARGET_PREFIXES_KEY,
                    file.display()
                );
            } else {
                config.target_path_prefixes = prefixes;
            }
        }

        if let Some(raw) = lookup.value(file, EXCLUDE_TESTS_KEY) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "true" => config.exclude_tests = true,
                "false" => config.exclude_tests = false,
                _ => debug!(
                    "Ignoring invalid {} value {:?} for {}",
                    EXCLUDE_TESTS_KEY,
                    raw,
                    file.display()
                ),
            }
        }

        config
    }

    /// Maximum number of lines allowed between a body's braces.
    #[must_use]
    pub fn max_method_body_lines(&self) -> usize {
        self.max_method_body_lines
    }

    /// Path substrings that opt a file into targeted rules.
    #[must_use]
    pub fn target_path_prefixes(&self) -> &[String] {
        &self.target_path_prefixes
    }

    /// Whether test-classified code is skipped.
    #[must_use]
    pub fn exclude_tests(&self) -> bool {
        self.exclude_tests
    }

    /// Returns true if `path` contains one of the target prefixes,
    /// ignoring case. An empty path is never targeted.
    #[must_use]
    pub fn targets(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        if path.trim().is_empty() {
            return false;
        }
        let path = path.to_lowercase();
        self.target_path_prefixes
            .iter()
            .any(|prefix| path.contains(&prefix.to_lowercase()))
    }
}

fn normalize_prefixes<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut prefixes: Vec<String> = Vec::new();
    for prefix in raw {
        let prefix = prefix.as_ref().trim();
        if !prefix.is_empty() && !prefixes.iter().any(|p| p == prefix) {
            prefixes.push(prefix.to_string());
        }
    }
    prefixes
}

/// Top-level configuration file.
///
/// ```toml
/// [rules.async-suffix]
/// enabled = false
///
/// [options]
/// wt_common_method_length_max_lines = 8
///
/// [[overrides]]
/// files = ["**/Legacy/**"]
/// options = { wt_common_method_length_max_lines = 40 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Per-rule settings, keyed by rule name or diagnostic id.
    #[serde(default)]
    pub rules: HashMap<String, RuleSettings>,

    /// Options applied to every file.
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,

    /// Options applied to files matching glob patterns. Later entries win.
    #[serde(default)]
    pub overrides: Vec<OptionsOverride>,
}

/// Per-rule settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Whether the rule runs. Rules are enabled unless set to `false`.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Options scoped to a set of files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsOverride {
    /// Glob patterns selecting the files.
    pub files: Vec<String>,
    /// Options for matching files.
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,
}

impl OptionsOverride {
    fn matches(&self, file: &Path) -> bool {
        self.files.iter().any(|pattern| match glob::Pattern::new(pattern) {
            Ok(p) => p.matches_path(file),
            Err(e) => {
                debug!("Skipping invalid override pattern {:?}: {}", pattern, e);
                false
            }
        })
    }
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Sets a global option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Checks if a rule is enabled, by name or diagnostic id.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        self.rules
            .get(rule)
            .map_or(true, |s| s.enabled.unwrap_or(true))
    }
}

impl ConfigLookup for Config {
    fn value(&self, file: &Path, key: &str) -> Option<String> {
        self.overrides
            .iter()
            .rev()
            .filter(|o| o.matches(file))
            .find_map(|o| o.options.get(key))
            .or_else(|| self.options.get(key))
            .and_then(option_text)
    }
}

/// Renders a TOML option as the raw string a lookup returns. Arrays
/// become comma-separated lists.
fn option_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => {
            let parts: Option<Vec<String>> = items.iter().map(option_text).collect();
            parts.map(|p| p.join(","))
        }
        toml::Value::Datetime(_) | toml::Value::Table(_) => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn resolve(pairs: &[(&str, &str)]) -> RuleConfig {
        RuleConfig::resolve(&lookup(pairs), Path::new("src/WorkTrack.Api/Orders.cs"))
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = resolve(&[]);
        assert_eq!(config, RuleConfig::default());
        assert_eq!(config.max_method_body_lines(), 5);
        assert_eq!(config.target_path_prefixes(), ["WorkTrack."]);
        assert!(config.exclude_tests());
    }

    #[test]
    fn test_namespaced_max_lines_wins() {
        let config = resolve(&[(MAX_LINES_NAMESPACED_KEY, "12"), (MAX_LINES_KEY, "3")]);
        assert_eq!(config.max_method_body_lines(), 12);

        let config = resolve(&[(MAX_LINES_KEY, " 7 ")]);
        assert_eq!(config.max_method_body_lines(), 7);
    }

    #[test]
    fn test_invalid_namespaced_value_does_not_fall_through() {
        let config = resolve(&[(MAX_LINES_NAMESPACED_KEY, "many"), (MAX_LINES_KEY, "9")]);
        assert_eq!(config.max_method_body_lines(), 5);
    }

    #[test]
    fn test_non_positive_max_lines_use_default() {
        assert_eq!(resolve(&[(MAX_LINES_KEY, "0")]).max_method_body_lines(), 5);
        assert_eq!(resolve(&[(MAX_LINES_KEY, "-4")]).max_method_body_lines(), 5);
    }

    #[test]
    fn test_prefixes_split_trim_and_dedupe() {
        let config = resolve(&[(TARGET_PREFIXES_KEY, " Acme. ;WorkTrack.,, Acme.;")]);
        assert_eq!(config.target_path_prefixes(), ["Acme.", "WorkTrack."]);
    }

    #[test]
    fn test_blank_prefix_list_keeps_default() {
        let config = resolve(&[(TARGET_PREFIXES_KEY, " ; , ")]);
        assert_eq!(config.target_path_prefixes(), ["WorkTrack."]);
    }

    #[test]
    fn test_exclude_tests_parses_booleans() {
        assert!(!resolve(&[(EXCLUDE_TESTS_KEY, "FALSE")]).exclude_tests());
        assert!(resolve(&[(EXCLUDE_TESTS_KEY, "yes")]).exclude_tests());
    }

    #[test]
    fn test_targets_matches_case_insensitively() {
        let config = RuleConfig::default();
        assert!(config.targets(Path::new("/repo/src/worktrack.api/Orders.cs")));
        assert!(!config.targets(Path::new("/repo/src/Other.Api/Orders.cs")));
        assert!(!config.targets(Path::new("")));
    }

    #[test]
    fn test_new_normalizes_inputs() {
        let config = RuleConfig::new(0, ["  ", "A.", "A."], false);
        assert_eq!(config.max_method_body_lines(), 5);
        assert_eq!(config.target_path_prefixes(), ["A."]);
        assert!(!config.exclude_tests());
    }

    #[test]
    fn test_parse_config_file() {
        let toml = r#"
[rules.async-suffix]
enabled = false

[options]
wt_common_method_length_max_lines = 8
wt_common_analyzer_target_prefixes = ["Acme.", "WorkTrack."]

[[overrides]]
files = ["**/Legacy/**"]
options = { wt_common_method_length_max_lines = 40 }

[[overrides]]
files = ["**/Legacy/Generated/**"]
options = { wt_common_method_length_max_lines = 100 }
"#;
        let config = Config::parse(toml).unwrap();
        assert!(!config.is_rule_enabled("async-suffix"));
        assert!(config.is_rule_enabled("method-length"));

        let plain = Path::new("src/Acme.Api/Orders.cs");
        let legacy = Path::new("src/Acme.Api/Legacy/Orders.cs");
        let generated = Path::new("src/Acme.Api/Legacy/Generated/Orders.cs");

        assert_eq!(config.value(plain, MAX_LINES_KEY).as_deref(), Some("8"));
        assert_eq!(config.value(legacy, MAX_LINES_KEY).as_deref(), Some("40"));
        assert_eq!(config.value(generated, MAX_LINES_KEY).as_deref(), Some("100"));
        assert_eq!(
            config.value(plain, TARGET_PREFIXES_KEY).as_deref(),
            Some("Acme.,WorkTrack.")
        );
        assert!(config.value(plain, EXCLUDE_TESTS_KEY).is_none());

        let resolved = RuleConfig::resolve(&config, legacy);
        assert_eq!(resolved.max_method_body_lines(), 40);
        assert_eq!(resolved.target_path_prefixes(), ["Acme.", "WorkTrack."]);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Config::parse("[options\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file_reports_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/stylecheck.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/stylecheck.toml"));
    }
}
