//! Application configuration for the CLI.

use std::path::PathBuf;

/// Default JPEG quality of the saved copy.
const DEFAULT_SAVE_QUALITY: u8 = 92;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where processed files go. `None` writes next to the input.
    pub output_dir: Option<PathBuf>,
    /// JPEG quality of the saved copy, `[1, 100]`.
    pub save_quality: u8,
}

impl AppConfig {
    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            output_dir: lookup("RETROCAM_OUTPUT_DIR")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            save_quality: lookup("RETROCAM_SAVE_QUALITY")
                .and_then(|s| s.trim().parse::<u8>().ok())
                .map(|q| q.clamp(1, 100))
                .unwrap_or(DEFAULT_SAVE_QUALITY),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.output_dir, None);
        assert_eq!(config.save_quality, 92);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(|key| match key {
            "RETROCAM_OUTPUT_DIR" => Some("/tmp/out".into()),
            "RETROCAM_SAVE_QUALITY" => Some(" 80 ".into()),
            _ => None,
        });
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.save_quality, 80);
    }

    #[test]
    fn test_bad_quality_falls_back() {
        let config = AppConfig::from_lookup(|key| {
            (key == "RETROCAM_SAVE_QUALITY").then(|| "high".to_string())
        });
        assert_eq!(config.save_quality, 92);

        let config = AppConfig::from_lookup(|key| {
            (key == "RETROCAM_SAVE_QUALITY").then(|| "0".to_string())
        });
        assert_eq!(config.save_quality, 1);
    }
}
