//! Load configuration from XDG `config.toml` and project `.env`, apply it to the process
//! environment with priority **existing env > .env > XDG**, and read typed settings
//! ([`RecommenderEnv`]) from the result.

mod dotenv;
mod settings;
#[cfg(feature = "tracing-init")]
mod tracing_init;
mod xdg_toml;

use std::path::Path;
use thiserror::Error;

pub use settings::{RecommenderEnv, DEFAULT_LISTEN_ADDR};
#[cfg(feature = "tracing-init")]
pub use tracing_init::{init_tracing, TracingGuard};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Sets environment variables from `.env` and `$XDG_CONFIG_HOME/<app_name>/config.toml`
/// `[env]`, but only for keys the process environment does not already define.
///
/// * `app_name`: e.g. `"rigsmith"`; selects the XDG config directory.
/// * `override_dir`: look for `.env` here instead of the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let mut merged = xdg_map;
    merged.extend(dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?);

    for (key, value) in merged {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}

/// Serializes tests that mutate process-wide environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
