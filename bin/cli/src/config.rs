//! Centralized CLI configuration.
//!
//! Loaded via the `config` crate from `FLOWCANVAS_`-prefixed environment
//! variables, with `__` separating nested keys:
//!
//! - `FLOWCANVAS_BACKEND__BASE_URL`, `FLOWCANVAS_BACKEND__BEARER_TOKEN`
//! - `FLOWCANVAS_RENDER__NODE_WIDTH`, `FLOWCANVAS_RENDER__CONTROL_OFFSET`

use flowcanvas_backend::BackendConfig;
use flowcanvas_render::RenderConfig;
use serde::Deserialize;

/// CLI configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    /// Node and connection layout for `render`.
    #[serde(default)]
    pub render: RenderConfig,

    /// REST backend for `save` and `execute`; absent if not configured.
    #[serde(default)]
    pub backend: Option<BackendConfig>,
}

impl CliConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(environment())
    }

    fn from_environment(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("FLOWCANVAS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
