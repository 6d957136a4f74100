//! Config file loading for the command-line front end.
//!
//! The file is a flat `key = value` list with TOML-style literals:
//!
//! ```text
//! enabled = true
//! base_url = "https://api.openalex.org"
//! contact_email = "lab@example.org"   # polite pool
//! institution_id = "I92446798"
//! connect_timeout_secs = 10
//! read_timeout_secs = 30
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use openalex_tools::OpenAlexConfig;
use openalex_tools::client::normalize_base_url;
use tracing::debug;

const CONFIG_DIR_NAME: &str = "openalex-tools";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Values read from the config file. Unset keys keep library defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub contact_email: Option<String>,
    pub institution_id: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates values against client construction constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = self.base_url.as_deref() {
            normalize_base_url(base_url)
                .with_context(|| format!("Invalid config value for `base_url`: {base_url}"))?;
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }

    /// Layers file values over library defaults.
    #[must_use]
    pub fn into_openalex_config(self) -> OpenAlexConfig {
        let defaults = OpenAlexConfig::default();
        OpenAlexConfig {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            base_url: self.base_url.unwrap_or(defaults.base_url),
            contact_email: self.contact_email.or(defaults.contact_email),
            institution_id: self.institution_id.or(defaults.institution_id),
            connect_timeout_secs: self
                .connect_timeout_secs
                .unwrap_or(defaults.connect_timeout_secs),
            read_timeout_secs: self.read_timeout_secs.unwrap_or(defaults.read_timeout_secs),
        }
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub contact_email: Option<String>,
    pub institution_id: Option<String>,
}

impl ConfigOverrides {
    #[must_use]
    pub fn apply(self, mut config: OpenAlexConfig) -> OpenAlexConfig {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(contact_email) = self.contact_email {
            config.contact_email = Some(contact_email);
        }
        if let Some(institution_id) = self.institution_id {
            config.institution_id = Some(institution_id);
        }
        config
    }
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/openalex-tools/config.toml`
/// 2. `$HOME/.config/openalex-tools/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the effective configuration.
///
/// An explicit path must exist; the default path is optional.
pub fn load_config(explicit_path: Option<&Path>, overrides: ConfigOverrides) -> Result<OpenAlexConfig> {
    let file_config = match explicit_path {
        Some(path) => load_file_config(path)?,
        None => match resolve_default_config_path() {
            Some(path) if path.exists() => load_file_config(&path)?,
            _ => FileConfig::default(),
        },
    };
    let config = overrides.apply(file_config.into_openalex_config());
    normalize_base_url(&config.base_url)
        .with_context(|| format!("Invalid base URL '{}'", config.base_url))?;
    Ok(config)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    debug!(path = %path.display(), "Loading config file");
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_number}");

        match key {
            "enabled" => cfg.enabled = Some(parse_boolean(value).with_context(invalid)?),
            "base_url" => cfg.base_url = Some(parse_string_literal(value).with_context(invalid)?),
            "contact_email" => {
                cfg.contact_email = non_blank(parse_string_literal(value).with_context(invalid)?);
            }
            "institution_id" => {
                cfg.institution_id = non_blank(parse_string_literal(value).with_context(invalid)?);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
enabled = true
base_url = "http://127.0.0.1:8080"
contact_email = "lab@example.org"
institution_id = "I92446798"
connect_timeout_secs = 5
read_timeout_secs = 60
"#,
        )
        .unwrap();
        assert_eq!(cfg.enabled, Some(true));
        assert_eq!(cfg.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(cfg.contact_email.as_deref(), Some("lab@example.org"));
        assert_eq!(cfg.institution_id.as_deref(), Some("I92446798"));
        assert_eq!(cfg.connect_timeout_secs, Some(5));
        assert_eq!(cfg.read_timeout_secs, Some(60));
    }

    #[test]
    fn test_parse_config_partial_fields_keep_defaults() {
        let config = parse_config_str("enabled = false")
            .unwrap()
            .into_openalex_config();
        assert!(!config.enabled);
        assert_eq!(config.base_url, openalex_tools::DEFAULT_BASE_URL);
        assert!(config.institution_id.is_none());
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r##"
contact_email = "a#b@example.org" # contact
read_timeout_secs = 45 # seconds
"##,
        )
        .unwrap();
        assert_eq!(cfg.contact_email.as_deref(), Some("a#b@example.org"));
        assert_eq!(cfg.read_timeout_secs, Some(45));
    }

    #[test]
    fn test_parse_config_blank_strings_are_unset() {
        let cfg = parse_config_str(r#"institution_id = "  ""#).unwrap();
        assert!(cfg.institution_id.is_none());
    }

    // ==================== Validation ====================

    #[test]
    fn test_parse_config_rejects_invalid_timeout() {
        let err = parse_config_str("connect_timeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("connect_timeout_secs"));

        let err = parse_config_str("read_timeout_secs = 3601").unwrap_err();
        assert!(err.to_string().contains("read_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_non_http_base_url() {
        let err = parse_config_str(r#"base_url = "ftp://api.openalex.org""#).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("contact_email = lab@example.org").unwrap_err();
        assert!(err.to_string().contains("contact_email"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_boolean() {
        let err = parse_config_str("enabled = yes").unwrap_err();
        assert!(err.to_string().contains("enabled"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("enabled").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_keys() {
        let err = parse_config_str("unknown_key = 123").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("unknown_key"));
    }

    // ==================== Loading ====================

    #[test]
    fn test_load_config_explicit_path_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"contact_email = "file@example.org""#).unwrap();
        writeln!(file, r#"institution_id = "I1""#).unwrap();

        let overrides = ConfigOverrides {
            contact_email: Some("cli@example.org".to_string()),
            ..ConfigOverrides::default()
        };
        let config = load_config(Some(file.path()), overrides).unwrap();
        assert_eq!(config.contact_email.as_deref(), Some("cli@example.org"));
        assert_eq!(config.institution_id.as_deref(), Some("I1"));
    }

    #[test]
    fn test_load_config_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = load_config(Some(&missing), ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_rejects_bad_override_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let overrides = ConfigOverrides {
            base_url: Some("not a url".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(load_config(Some(&path), overrides).is_err());
    }
}
