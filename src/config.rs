//! Compile-time configuration for the dashboard.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dataset source
// ---------------------------------------------------------------------------

/// Where per-instrument datasets live and how they are named.
pub struct DatasetConfig {
    /// Base URL the filename is appended to.
    pub base_url: &'static str,
    /// Filename template; `{symbol}` is replaced by the instrument ticker.
    pub filename_template: &'static str,
    /// Timeout applied to the remote fetch.
    pub http_timeout_secs: u64,
}

/// Intraday bucket resolution used by the time-of-extreme charts.
pub struct BucketConfig {
    pub step_minutes: u32,
}

pub struct DashboardConfig {
    pub dataset: DatasetConfig,
    pub buckets: BucketConfig,
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    dataset: DatasetConfig {
        base_url: "https://raw.githubusercontent.com/TuckerArrants/daily_cycle/main",
        filename_template: "{symbol}_Full_Day_Partial_Day_From_2008_V1.csv",
        http_timeout_secs: 30,
    },
    buckets: BucketConfig { step_minutes: 5 },
};

/// Static username → password pairs accepted by the login form.
pub const USER_CREDENTIALS: &[(&str, &str)] = &[("badboyz", "bangbang"), ("dreamteam", "strike")];

/// Overrides the remote base URL.
pub const ENV_BASE_URL: &str = "DAILY_CYCLES_BASE_URL";
/// Switches to reading CSVs from a local directory.
pub const ENV_DATA_DIR: &str = "DAILY_CYCLES_DATA_DIR";

/// Expand the filename template for a ticker.
/// Example: "ES" → "ES_Full_Day_Partial_Day_From_2008_V1.csv"
pub fn dataset_filename(symbol: &str) -> String {
    DASHBOARD.dataset.filename_template.replace("{symbol}", symbol)
}

/// Base URL after applying [`ENV_BASE_URL`].
pub fn base_url() -> String {
    std::env::var(ENV_BASE_URL)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DASHBOARD.dataset.base_url.to_string())
}

/// Local data directory from [`ENV_DATA_DIR`], if set.
pub fn data_dir() -> Option<PathBuf> {
    std::env::var_os(ENV_DATA_DIR)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
