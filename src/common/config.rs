//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::Result;

/// Directory name under the platform config root
const APP_NAME: &str = "webstep-cli";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Remote WebDriver server settings
    #[serde(default)]
    pub remote: Remote,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Default settings
#[derive(Debug, Deserialize)]
pub struct Defaults {
    /// Default browser to drive
    #[serde(default = "default_browser")]
    pub browser: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            browser: default_browser(),
        }
    }
}

fn default_browser() -> String {
    "chrome".to_string()
}

/// Remote WebDriver server settings
///
/// The `SELENIUM_REMOTE_URL` environment variable and the `--remote-url`
/// flag take precedence over the config file.
#[derive(Debug, Deserialize, Default)]
pub struct Remote {
    /// WebDriver server URL (e.g. a Selenium Grid hub)
    pub url: Option<String>,
}

/// Timeout settings in seconds, applied to the session at connect time
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Page load timeout
    #[serde(default = "default_page_load")]
    pub page_load_secs: u64,

    /// Script execution timeout
    #[serde(default = "default_script")]
    pub script_secs: u64,

    /// Implicit wait applied to element lookups
    #[serde(default = "default_implicit_wait")]
    pub implicit_wait_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            page_load_secs: default_page_load(),
            script_secs: default_script(),
            implicit_wait_secs: default_implicit_wait(),
        }
    }
}

fn default_page_load() -> u64 {
    30
}
fn default_script() -> u64 {
    30
}
fn default_implicit_wait() -> u64 {
    10
}

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/webstep-cli/`
/// - macOS: `~/Library/Application Support/webstep-cli/`
/// - Windows: `%APPDATA%\webstep-cli\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| super::Error::file_read(&path, &e))?;
                return toml::from_str(&content)
                    .map_err(|e| super::Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.defaults.browser, "chrome");
        assert_eq!(config.timeouts.page_load_secs, 30);
        assert_eq!(config.timeouts.implicit_wait_secs, 10);
        assert!(config.remote.url.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [remote]
            url = "http://grid.internal:4444"

            [timeouts]
            page_load_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.remote.url.as_deref(), Some("http://grid.internal:4444"));
        assert_eq!(config.timeouts.page_load_secs, 60);
        assert_eq!(config.timeouts.script_secs, 30);
        assert_eq!(config.defaults.browser, "chrome");
    }
}
