use crate::Result;
use crate::codegen::Target;
use crate::render::RenderOptions;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::sync::LazyLock;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "pinggen.toml";

static GO_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Language to generate code for
    #[serde(default)]
    pub target: Target,

    /// Package clause of generated Go files
    #[serde(default = "default_go_package")]
    pub go_package: String,

    /// Type of the log envelopes written by generated code
    #[serde(default = "default_mozlog_type")]
    pub mozlog_type: String,
}

fn default_go_package() -> String {
    RenderOptions::default().go_package
}

fn default_mozlog_type() -> String {
    RenderOptions::default().mozlog_type
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading pinggen configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no '{path}' found, using the default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading pinggen configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Settings handed to the renderers.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            go_package: self.go_package.clone(),
            mozlog_type: self.mozlog_type.clone(),
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the Go package is not an identifier or the mozlog type cannot be embedded in a string literal
    fn validate(&self) -> Result<()> {
        if !GO_IDENTIFIER.is_match(&self.go_package) {
            return Err(app_err!("go_package must be a valid Go identifier, got '{}'", self.go_package));
        }

        if self.mozlog_type.is_empty() {
            return Err(app_err!("mozlog_type must not be empty"));
        }

        if self.mozlog_type.contains(['"', '\'', '\\']) || self.mozlog_type.contains(char::is_control) {
            return Err(app_err!(
                "mozlog_type must not contain quotes, backslashes or control characters, got '{}'",
                self.mozlog_type
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
