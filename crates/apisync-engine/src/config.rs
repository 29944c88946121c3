//! `apisync.toml` loading

#![allow(clippy::result_large_err)]

use apisync_core_types::Sensitive;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::errors::{config_error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "apisync.toml";

/// One configured schema origin
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    #[serde(default)]
    pub name: String,
    /// `http(s)://` URL, `file://` URL or plain path to a canonical JSON schema
    pub url: String,
    /// Bearer token sent with HTTP fetches
    #[serde(default)]
    pub token: Option<Sensitive<String>>,
}

impl DataSourceConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSyncConfig {
    /// Where the lock and generated files live
    pub out_dir: PathBuf,
    #[serde(default)]
    pub using_multiple_origins: bool,
    #[serde(default)]
    pub origins: Vec<DataSourceConfig>,
    /// Directory of the config file; relative origin paths resolve here
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl ApiSyncConfig {
    /// Read and validate a config file.
    ///
    /// # Errors
    /// `Config` when the file is unreadable, malformed or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::from_toml(&content, &base_dir)
    }

    /// Parse config text; relative paths resolve against `base_dir`.
    ///
    /// # Errors
    /// `Config` when the text is malformed or fails validation.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self> {
        let mut config: ApiSyncConfig =
            toml::from_str(content).map_err(|e| config_error(format!("TOML parse error: {}", e)))?;
        config.base_dir = base_dir.to_path_buf();
        if config.out_dir.is_relative() {
            config.out_dir = base_dir.join(&config.out_dir);
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.origins.is_empty() {
            return Err(config_error("at least one origin must be configured"));
        }
        if self.multiple_origins() && self.origins.iter().any(|o| o.name.is_empty()) {
            return Err(config_error(
                "every origin needs a name when several are configured",
            ));
        }
        let mut seen = BTreeSet::new();
        for origin in &self.origins {
            if !seen.insert(origin.name.as_str()) {
                return Err(config_error(format!("duplicate origin name: {}", origin.name)));
            }
        }
        Ok(())
    }

    /// Multiple-origin layout is used when requested or when more than one
    /// origin is configured
    pub fn multiple_origins(&self) -> bool {
        self.using_multiple_origins || self.origins.len() > 1
    }

    pub fn origin(&self, name: &str) -> Option<&DataSourceConfig> {
        self.origins.iter().find(|o| o.name == name)
    }

    pub fn origin_names(&self) -> Vec<&str> {
        self.origins.iter().map(|o| o.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
out_dir = "src/services"

[[origins]]
name = "petstore"
url = "schemas/petstore.json"
token = "secret-token"
"#;

    #[test]
    fn test_relative_out_dir_resolves_against_base() {
        let config = ApiSyncConfig::from_toml(SAMPLE, Path::new("/project")).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("/project/src/services"));
        assert!(!config.multiple_origins());
        assert_eq!(config.origin_names(), vec!["petstore"]);
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let config = ApiSyncConfig::from_toml(SAMPLE, Path::new("/project")).unwrap();
        let origin = config.origin("petstore").unwrap();
        assert_eq!(origin.token.as_ref().unwrap().expose(), "secret-token");
        assert!(!format!("{:?}", config).contains("secret-token"));
    }

    #[test]
    fn test_unnamed_origin_rejected_with_multiple_origins() {
        let text = r#"
out_dir = "/out"

[[origins]]
name = "a"
url = "a.json"

[[origins]]
url = "b.json"
"#;
        let err = ApiSyncConfig::from_toml(text, Path::new("/")).unwrap_err();
        assert_eq!(err.code(), "ERR_CONFIG");
    }

    #[test]
    fn test_no_origins_rejected() {
        let err = ApiSyncConfig::from_toml("out_dir = \"/out\"\n", Path::new("/")).unwrap_err();
        assert!(err.message().contains("at least one origin"));
    }
}
