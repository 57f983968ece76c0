use crate::error::SettingsError;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Search settings, loadable from TOML.
///
/// ```toml
/// [full_text_search]
/// delay_in_ms = 250
///
/// [polling]
/// enabled = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Delay before a matched filter opens the menu.
    #[serde(default = "default_menu_tick_ms")]
    pub menu_tick_ms: u64,

    #[serde(default)]
    pub full_text_search: FullTextSearchSettings,

    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub polling: PollingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullTextSearchSettings {
    /// Quiet period after the last keystroke before free text is searched.
    #[serde(default = "default_delay_in_ms")]
    pub delay_in_ms: u64,

    #[serde(default = "default_phrase_slop")]
    pub phrase_slop: u32,

    #[serde(default = "default_true")]
    pub lenient: bool,

    #[serde(default = "default_true")]
    pub analyze_wildcard: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default)]
    pub all_projects: bool,

    /// Maximum number of hits per search.
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_limit_min")]
    pub limit_min: usize,

    #[serde(default = "default_limit_max")]
    pub limit_max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingSettings {
    /// Repeat the last search after each successful one.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between a successful search and its repeat.
    #[serde(default = "default_interval")]
    pub interval: u64,

    #[serde(default = "default_interval_min")]
    pub interval_min: u64,

    #[serde(default = "default_interval_max")]
    pub interval_max: u64,
}

fn default_true() -> bool {
    true
}

fn default_menu_tick_ms() -> u64 {
    1
}

fn default_delay_in_ms() -> u64 {
    400
}

fn default_phrase_slop() -> u32 {
    10
}

fn default_limit() -> usize {
    50
}

fn default_limit_min() -> usize {
    5
}

fn default_limit_max() -> usize {
    500
}

fn default_interval() -> u64 {
    10
}

fn default_interval_min() -> u64 {
    1
}

fn default_interval_max() -> u64 {
    300
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            menu_tick_ms: default_menu_tick_ms(),
            full_text_search: FullTextSearchSettings::default(),
            general: GeneralSettings::default(),
            polling: PollingSettings::default(),
        }
    }
}

impl Default for FullTextSearchSettings {
    fn default() -> Self {
        Self {
            delay_in_ms: default_delay_in_ms(),
            phrase_slop: default_phrase_slop(),
            lenient: true,
            analyze_wildcard: true,
        }
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            all_projects: false,
            limit: default_limit(),
            limit_min: default_limit_min(),
            limit_max: default_limit_max(),
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: default_interval(),
            interval_min: default_interval_min(),
            interval_max: default_interval_max(),
        }
    }
}

impl SearchSettings {
    /// Parses and validates TOML settings. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate().map_err(SettingsError::Invalid)?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), String> {
        let general = &self.general;
        if general.limit_min > general.limit_max {
            return Err(format!(
                "general.limit_min ({}) cannot exceed general.limit_max ({})",
                general.limit_min, general.limit_max
            ));
        }
        if !(general.limit_min..=general.limit_max).contains(&general.limit) {
            return Err(format!(
                "general.limit must be in [{}, {}], got {}",
                general.limit_min, general.limit_max, general.limit
            ));
        }

        let polling = &self.polling;
        if polling.interval_min == 0 {
            return Err("polling.interval_min must be > 0".to_string());
        }
        if polling.interval_min > polling.interval_max {
            return Err(format!(
                "polling.interval_min ({}) cannot exceed polling.interval_max ({})",
                polling.interval_min, polling.interval_max
            ));
        }
        if !(polling.interval_min..=polling.interval_max).contains(&polling.interval) {
            return Err(format!(
                "polling.interval must be in [{}, {}], got {}",
                polling.interval_min, polling.interval_max, polling.interval
            ));
        }

        Ok(())
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.full_text_search.delay_in_ms)
    }

    pub fn menu_tick(&self) -> Duration {
        Duration::from_millis(self.menu_tick_ms)
    }

    /// `None` when polling is disabled.
    pub fn polling_interval(&self) -> Option<Duration> {
        self.polling
            .enabled
            .then_some(Duration::from_secs(self.polling.interval))
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
