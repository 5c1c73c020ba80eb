//! Configuration file (portal.toml) and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use portal_pages::SiteConfig;
use portal_server::PortalServerConfig;
use serde::Deserialize;

/// Configuration file structure (portal.toml).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// Defaults to `<public_dir>/docs`
    pub docs_dir: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            docs_dir: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_public_dir() -> String {
    "public".to_string()
}

/// Environment variables that override `[site]` values.
const ENV_OVERRIDES: &[&str] = &[
    "PORTAL_API_URL",
    "PORTAL_DOCUMENT_TYPE",
    "PORTAL_INDEX_NAME",
    "PORTAL_HOME_LINK",
];

impl ConfigFile {
    /// Apply environment overrides, looking each variable up with `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for name in ENV_OVERRIDES {
            let Some(value) = lookup(*name).filter(|v| !v.is_empty()) else {
                continue;
            };

            let field = match *name {
                "PORTAL_API_URL" => &mut self.site.api_url,
                "PORTAL_DOCUMENT_TYPE" => &mut self.site.document_type,
                "PORTAL_INDEX_NAME" => &mut self.site.index_name,
                _ => &mut self.site.home_link,
            };

            tracing::debug!("{} overrides site config", name);
            *field = value;
        }
    }

    /// Resolve directories relative to `root` and build the server config.
    pub fn into_server_config(self, root: &Path) -> PortalServerConfig {
        let public_dir = root.join(&self.server.public_dir);
        let docs_dir = match &self.server.docs_dir {
            Some(dir) => root.join(dir),
            None => public_dir.join("docs"),
        };

        PortalServerConfig {
            public_dir,
            docs_dir,
            port: self.server.port,
            host: self.server.host,
            open: false,
            site: self.site,
        }
    }
}

/// Parse a config file. Returns defaults if it does not exist and an error if
/// it exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Load the config file, apply environment overrides and resolve paths
/// against the working directory. The only place the process environment is
/// read.
pub fn load(path: &Path) -> Result<PortalServerConfig> {
    let mut config = load_config(path)?;
    config.apply_env(|name| std::env::var(name).ok());

    let root: PathBuf = std::env::current_dir().context("Failed to resolve working directory")?;
    Ok(config.into_server_config(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_pages::AlertLevel;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("portal.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.site.index_name, "file_centric");
    }

    #[test]
    fn parses_full_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("portal.toml");
        fs::write(
            &path,
            r#"
[server]
port = 8080
docs_dir = "content/docs"

[site]
title = "Demo Portal"
index_name = "analysis_centric"

[[site.alerts]]
level = "critical"
title = "Outage"
message = "Search is down"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.docs_dir.as_deref(), Some("content/docs"));
        assert_eq!(config.site.title, "Demo Portal");
        assert_eq!(config.site.index_name, "analysis_centric");
        assert_eq!(config.site.document_type, "file");
        assert_eq!(config.site.alerts.len(), 1);
        assert_eq!(config.site.alerts[0].level, AlertLevel::Critical);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("portal.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn environment_overrides_site_values() {
        let mut config = ConfigFile::default();

        config.apply_env(|name| match name {
            "PORTAL_API_URL" => Some("https://api.example.org".to_string()),
            "PORTAL_HOME_LINK" => Some("https://example.org".to_string()),
            "PORTAL_INDEX_NAME" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.site.api_url, "https://api.example.org");
        assert_eq!(config.site.home_link, "https://example.org");
        assert_eq!(config.site.index_name, "file_centric");
        assert_eq!(config.site.document_type, "file");
    }

    #[test]
    fn resolves_directories_against_root() {
        let root = Path::new("/srv/portal");

        let default_docs = ConfigFile::default().into_server_config(root);
        let mut custom = ConfigFile::default();
        custom.server.docs_dir = Some("manuals".to_string());
        let custom_docs = custom.into_server_config(root);

        assert_eq!(default_docs.public_dir, root.join("public"));
        assert_eq!(default_docs.docs_dir, root.join("public").join("docs"));
        assert_eq!(custom_docs.docs_dir, root.join("manuals"));
    }
}
