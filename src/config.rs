use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the launch table to open at startup.
pub const DATA_PATH_ENV: &str = "LAUNCH_DASH_DATA";

/// Used when [`DATA_PATH_ENV`] is unset or empty.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

/// Startup configuration. Log verbosity comes from `RUST_LOG` via `env_logger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let data_path = lookup(DATA_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        DashboardConfig { data_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundled_file_name() {
        let config = DashboardConfig::from_lookup(|_| None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn empty_variable_falls_back_to_default() {
        let config = DashboardConfig::from_lookup(|_| Some(OsString::new()));
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn reads_path_from_environment() {
        let config = DashboardConfig::from_lookup(|key| {
            (key == DATA_PATH_ENV).then(|| OsString::from("/data/launches.parquet"))
        });
        assert_eq!(config.data_path, PathBuf::from("/data/launches.parquet"));
    }
}
