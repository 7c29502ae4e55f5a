// src/config.rs
use std::path::PathBuf;

use crate::errors::{EditorError, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub bind: String,
    pub image_model: String,
    pub text_model: String,
    pub api_base: String,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = value("ATELIER_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        if bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(EditorError::Config(format!(
                "ATELIER_BIND \"{}\" is not a socket address",
                bind
            )));
        }

        let api_base = value("ATELIER_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(EditorError::Config(format!(
                "ATELIER_API_BASE \"{}\" must be an http(s) URL",
                api_base
            )));
        }

        let static_dir = value("ATELIER_STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            api_key: value("GEMINI_API_KEY").or_else(|| value("API_KEY")),
            bind,
            image_model: value("ATELIER_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            text_model: value("ATELIER_TEXT_MODEL")
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            api_base,
            static_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let defaults = config(&[]).unwrap();
        assert_eq!(defaults.api_key, None);
        assert_eq!(defaults.bind, DEFAULT_BIND);
        assert_eq!(defaults.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(defaults.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(defaults.api_base, DEFAULT_API_BASE);
        assert!(defaults.static_dir.is_none());
    }

    #[test]
    fn gemini_key_wins_over_generic_key() {
        let preferred = config(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "gemini")]).unwrap();
        assert_eq!(preferred.api_key.as_deref(), Some("gemini"));
        let fallback = config(&[("API_KEY", "generic"), ("GEMINI_API_KEY", " ")]).unwrap();
        assert_eq!(fallback.api_key.as_deref(), Some("generic"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config(&[("ATELIER_BIND", "localhost")]),
            Err(EditorError::Config(_))
        ));
        assert!(matches!(
            config(&[("ATELIER_API_BASE", "ftp://example.com")]),
            Err(EditorError::Config(_))
        ));
    }
}
