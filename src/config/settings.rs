use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Debug log file (or directory ending in a separator)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// Number of rotated log files to keep (0 keeps everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,

    /// Results requested per page from each provider
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Provider queried first
    #[serde(default = "ProviderSettings::default_primary")]
    pub primary: ProviderSettings,

    /// Provider queried only when the primary fails
    #[serde(default = "ProviderSettings::default_secondary")]
    pub secondary: ProviderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
            page_size: default_page_size(),
            primary: ProviderSettings::default_primary(),
            secondary: ProviderSettings::default_secondary(),
        }
    }
}

/// Debug log file rotation strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// Append to a single file
    None,
    /// One file per day
    Daily,
    /// One file per process run
    Session,
}

/// Settings for one upstream provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Provider implementation
    pub kind: ProviderKind,

    /// API key (only FDC requires one)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Optional custom API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderSettings {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: String::new(),
            api_base: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    fn default_primary() -> Self {
        let mut settings = Self::new(ProviderKind::Fdc);
        settings.api_key = "DEMO_KEY".to_string();
        settings
    }

    fn default_secondary() -> Self {
        Self::new(ProviderKind::OpenFoodFacts)
    }

    /// Configured base URL, or the provider's public endpoint
    pub fn base_url(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
    }
}

/// Supported food data providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// USDA FoodData Central
    Fdc,
    OpenFoodFacts,
    /// Offline sample data
    Stub,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Fdc => "https://api.nal.usda.gov/fdc",
            ProviderKind::OpenFoodFacts => "https://world.openfoodfacts.org",
            ProviderKind::Stub => "",
        }
    }
}

fn default_page_size() -> u32 {
    25
}

fn default_timeout_secs() -> u64 {
    10
}
