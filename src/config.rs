use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "crispy.toml";

pub const ENV_URL: &str = "WEAVIATE_URL";
pub const ENV_API_KEY: &str = "WEAVIATE_API_KEY";
pub const ENV_OPENAI_KEY: &str = "OPENAI_API_KEY";

/// Main configuration for Crispy. Secrets never live here; see [`Credentials`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub weaviate: WeaviateConfig,
    pub display: DisplayConfig,
    pub server: ServerConfig,
}

/// Query settings for the vector database
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaviateConfig {
    /// Collection (class) queried with `nearText`
    pub collection: String,
    /// Result cap sent as `limit`. `None` leaves the server default in charge.
    pub limit: Option<usize>,
    /// Overall timeout for one query, in seconds
    pub timeout_secs: u64,
}

impl Default for WeaviateConfig {
    fn default() -> Self {
        Self {
            collection: "CrispyMuffins".into(),
            limit: Some(50),
            timeout_secs: 30,
        }
    }
}

/// Card grid settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Cards per grid row
    pub columns: usize,
    /// Fetch card images while rendering
    pub fetch_images: bool,
    /// Width of rendered images in the HTML UI, in pixels
    pub image_width: u32,
    /// Timeout for a single image fetch, in seconds
    pub image_timeout_secs: u64,
    /// Largest image payload embedded in a card, in bytes
    pub max_image_bytes: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            fetch_images: true,
            image_width: 230,
            image_timeout_secs: 10,
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

/// HTTP UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8501 }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration for a command.
    ///
    /// An explicit path must exist. Without one, `crispy.toml` in the working
    /// directory is used when present, otherwise defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = Self::default_path();
        if path.exists() {
            tracing::debug!("Using config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    fn validate(&self) -> Result<()> {
        if self.display.columns == 0 {
            bail!("display.columns must be at least 1");
        }
        if self.weaviate.collection.trim().is_empty() {
            bail!("weaviate.collection must not be empty");
        }
        if self.display.max_image_bytes == 0 {
            bail!("display.max_image_bytes must be at least 1");
        }
        if self.weaviate.limit == Some(0) {
            bail!("weaviate.limit must be at least 1 when set");
        }
        Ok(())
    }
}

/// Connection secrets, read from the process environment.
#[derive(Clone)]
pub struct Credentials {
    pub url: String,
    pub api_key: String,
    pub openai_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read all three variables. Any missing or empty one is fatal.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: required_env(ENV_URL)?,
            api_key: required_env(ENV_API_KEY)?,
            openai_api_key: required_env(ENV_OPENAI_KEY)?,
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => bail!(
            "Required environment variable '{}' is not set. \
             Check your .env file or system environment.",
            key
        ),
    }
}

/// Load a `.env` file from the working directory or a parent, if any.
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => bail!(
            "Failed to parse .env file at line {}, position {}",
            line,
            pos
        ),
        Err(dotenvy::Error::Io(_)) => Ok(()),
        Err(e) => Err(e).context("Failed to load .env file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.weaviate.collection, "CrispyMuffins");
        assert_eq!(config.weaviate.limit, Some(50));
        assert_eq!(config.display.columns, 3);
        assert!(config.display.fetch_images);
        assert_eq!(config.display.image_width, 230);
        assert_eq!(config.display.max_image_bytes, 5 * 1024 * 1024);
        assert_eq!(config.server.port, 8501);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
[display]
columns = 4
fetch_images = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.columns, 4);
        assert!(!config.display.fetch_images);
        assert_eq!(config.display.image_width, 230);
        assert_eq!(config.weaviate.collection, "CrispyMuffins");
    }

    #[test]
    fn test_parse_weaviate_section() {
        let toml_str = r#"
[weaviate]
collection = "CrispyNYC"
limit = 20
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.weaviate.collection, "CrispyNYC");
        assert_eq!(config.weaviate.limit, Some(20));
        assert_eq!(config.weaviate.timeout_secs, 30);
    }

    #[test]
    fn test_load_rejects_zero_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crispy.toml");
        std::fs::write(&path, "[display]\ncolumns = 0\n").unwrap();
        let err = Config::load(&path).unwrap_err().to_string();
        assert!(err.contains("columns"), "unexpected error: {err}");
    }

    #[test]
    fn test_load_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crispy.toml");
        std::fs::write(&path, "[display\ncolumns = ").unwrap();
        let err = format!("{:#}", Config::load(&path).unwrap_err());
        assert!(err.contains("Failed to parse config"), "unexpected error: {err}");
    }

    #[test]
    fn test_resolve_explicit_missing_file() {
        let result = Config::resolve(Some(Path::new("/nonexistent/crispy.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_keys() {
        let creds = Credentials {
            url: "https://example.weaviate.network".into(),
            api_key: "secret-1".into(),
            openai_api_key: "secret-2".into(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("example.weaviate.network"));
        assert!(!debug.contains("secret-1"));
        assert!(!debug.contains("secret-2"));
    }

    #[test]
    fn test_required_env_missing() {
        let err = required_env("CRISPY_TEST_DEFINITELY_UNSET_VAR")
            .unwrap_err()
            .to_string();
        assert!(err.contains("CRISPY_TEST_DEFINITELY_UNSET_VAR"));
    }
}
