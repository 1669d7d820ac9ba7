use std::path::PathBuf;

use axum::http::HeaderValue;
use reqwest::Url;

use crate::errors::AppError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:5001";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Clone, Debug)]
pub struct ShellConfig {
    pub port: u16,
    /// Chat backend serving `/api/chat` and `/api/session/{id}/history`.
    pub upstream_url: Url,
    /// Trunk output of the frontend crate.
    pub static_dir: PathBuf,
    /// Origins allowed to call `/api` cross-origin. Empty disables CORS.
    pub allowed_origins: Vec<HeaderValue>,
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::config(format!("PORT '{raw}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let upstream_raw = get("UPSTREAM_API_URL").unwrap_or_else(|| DEFAULT_UPSTREAM.to_string());
        let upstream_url = parse_upstream(&upstream_raw)?;

        let static_dir = get("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let allowed_origins = get("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|e| AppError::config(format!("ALLOWED_ORIGINS '{o}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            port,
            upstream_url,
            static_dir,
            allowed_origins,
        })
    }
}

fn parse_upstream(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim().trim_end_matches('/'))
        .map_err(|e| AppError::config(format!("UPSTREAM_API_URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(AppError::config(format!(
            "UPSTREAM_API_URL '{raw}' must be an http(s) URL"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ShellConfig, AppError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ShellConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_url.as_str(), "http://127.0.0.1:5001/");
        assert_eq!(config.static_dir, PathBuf::from("frontend/dist"));
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("UPSTREAM_API_URL", "https://chat.example.com/"),
            ("STATIC_DIR", "/srv/chat"),
            ("ALLOWED_ORIGINS", "http://localhost:8081, http://127.0.0.1:8081,"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.upstream_url.host_str(), Some("chat.example.com"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/chat"));
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(matches!(load(&[("PORT", "eighty")]), Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_non_http_upstream() {
        assert!(load(&[("UPSTREAM_API_URL", "ftp://example.com")]).is_err());
        assert!(load(&[("UPSTREAM_API_URL", "not a url")]).is_err());
    }
}
