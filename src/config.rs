use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "TriageCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "medgemma";
pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 30;

/// Log filter used when `RUST_LOG` is unset. `TRIAGECARE_LOG` overrides it.
pub fn default_log_filter() -> String {
    std::env::var("TRIAGECARE_LOG").unwrap_or_else(|_| "triagecare_lib=info".to_string())
}

/// Get the application data directory
/// ~/TriageCare/ when a home directory is known, ./TriageCare otherwise.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub ollama_url: String,
    pub model: String,
    pub generate_timeout_secs: u64,
    pub fallback_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: app_data_dir(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generate_timeout_secs: DEFAULT_GENERATE_TIMEOUT_SECS,
            fallback_enabled: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let generate_timeout_secs = match get("TRIAGECARE_GENERATE_TIMEOUT_SECS") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Ignoring invalid generate timeout");
                defaults.generate_timeout_secs
            }),
            None => defaults.generate_timeout_secs,
        };

        let fallback_enabled = !get("TRIAGECARE_FALLBACK").is_some_and(|v| {
            matches!(v.to_ascii_lowercase().as_str(), "off" | "false" | "0" | "no")
        });

        Self {
            data_dir: get("TRIAGECARE_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            ollama_url: get("TRIAGECARE_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            model: get("TRIAGECARE_MODEL").unwrap_or(defaults.model),
            generate_timeout_secs,
            fallback_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("TriageCare"));
    }

    #[test]
    fn app_name_is_triagecare() {
        assert_eq!(APP_NAME, "TriageCare");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("TRIAGECARE_DATA_DIR", "/tmp/tc"),
            ("TRIAGECARE_OLLAMA_URL", "http://gpu-box:11434"),
            ("TRIAGECARE_MODEL", "llama3"),
            ("TRIAGECARE_GENERATE_TIMEOUT_SECS", "5"),
            ("TRIAGECARE_FALLBACK", "OFF"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tc"));
        assert_eq!(config.ollama_url, "http://gpu-box:11434");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.generate_timeout_secs, 5);
        assert!(!config.fallback_enabled);
    }

    #[test]
    fn invalid_timeout_and_blank_values_fall_back() {
        let config = config_from(&[
            ("TRIAGECARE_GENERATE_TIMEOUT_SECS", "soon"),
            ("TRIAGECARE_MODEL", "   "),
            ("TRIAGECARE_FALLBACK", "on"),
        ]);
        assert_eq!(config.generate_timeout_secs, DEFAULT_GENERATE_TIMEOUT_SECS);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.fallback_enabled);
    }
}
