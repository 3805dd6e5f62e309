use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Base figment: compiled-in defaults with environment overrides on top.
///
/// `VIDHOOK_SERVER__PORT=8080` style variables override nested keys, and a bare
/// `PORT` overrides `server.port` last.
fn with_env(figment: Figment) -> Figment {
    figment
        .merge(Env::prefixed("VIDHOOK_").split("__"))
        .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path));

    with_env(figment)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from defaults and environment variables only.
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    with_env(Figment::from(Serialized::defaults(Config::default())))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
