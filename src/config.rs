//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

const APP_NAME: &str = "liftlog";
pub const DATA_FILE: &str = "fitnessData.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_vars(
            env::var("LIFTLOG_DATA_DIR").ok(),
            env::var("LIFTLOG_LOG").ok(),
            env::var("RUST_LOG").ok(),
        )
    }

    /// `LIFTLOG_LOG` wins over `RUST_LOG`; neither set means `info`.
    fn from_vars(
        data_dir: Option<String>,
        app_log: Option<String>,
        rust_log: Option<String>,
    ) -> Self {
        let data_dir = match data_dir.filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        };

        AppConfig {
            data_dir,
            log_filter: app_log
                .or(rust_log)
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join(APP_NAME),
        None => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let cfg = AppConfig::from_vars(Some("/tmp/lifts".into()), None, None);
        assert_eq!(cfg.data_file(), PathBuf::from("/tmp/lifts/fitnessData.json"));
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn blank_dir_falls_back() {
        let cfg = AppConfig::from_vars(Some("  ".into()), Some("debug".into()), None);
        assert_eq!(cfg.data_dir, default_data_dir());
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn app_log_filter_beats_rust_log() {
        let both = AppConfig::from_vars(None, Some("liftlog=debug".into()), Some("warn".into()));
        assert_eq!(both.log_filter, "liftlog=debug");

        let rust_only = AppConfig::from_vars(None, None, Some("warn".into()));
        assert_eq!(rust_only.log_filter, "warn");
    }
}
