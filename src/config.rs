//! Loading host configuration from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid. The
//! difficulty table is not configurable.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub port: u16,
  /// SPA assets; `index.html` is the fallback for unknown paths.
  pub static_dir: String,
  /// Feedback beat before the WebSocket host calls `advance`.
  pub feedback_delay_ms: u64,
  /// Upper bound for `GET /api/v1/questions?count=`.
  pub max_question_count: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      port: 3000,
      static_dir: "./static".into(),
      feedback_delay_ms: 1500,
      max_question_count: 50,
    }
  }
}

impl ServerConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str::<ServerConfig>(s)
  }

  /// `PORT` wins over the file.
  pub fn apply_env_overrides(mut self) -> Self {
    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
      self.port = port;
    }
    self
  }
}

/// Attempt to load `ServerConfig` from GAME_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_server_config_from_env() -> Option<ServerConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match ServerConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "lecture_dash", %path, "Loaded server config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "lecture_dash", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "lecture_dash", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_gives_defaults() {
    assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
  }

  #[test]
  fn partial_file_overrides_only_given_fields() {
    let cfg = ServerConfig::from_toml_str("feedback_delay_ms = 800\nstatic_dir = \"web\"\n").unwrap();
    assert_eq!(cfg.feedback_delay_ms, 800);
    assert_eq!(cfg.static_dir, "web");
    assert_eq!(cfg.port, 3000);
  }

  #[test]
  fn wrong_types_are_rejected() {
    assert!(ServerConfig::from_toml_str("port = \"eighty\"").is_err());
  }
}
