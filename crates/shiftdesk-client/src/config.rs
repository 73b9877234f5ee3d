use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{ClientError, Result};
use shiftdesk_common::feed::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use shiftdesk_common::virtual_list::SurfaceConfig;

/// RGB color values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Theme color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Secondary text, separators, hints
    pub muted: Rgb,
    /// Shifts with open slots
    pub open: Rgb,
    /// Fully booked shifts
    pub booked: Rgb,
    /// Pending claim counters
    pub pending: Rgb,
    /// Failures and toasts about them
    pub error: Rgb,
    /// Day headers, selection marker, panel titles
    pub accent: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            muted: Rgb::new(140, 140, 140),
            open: Rgb::new(134, 239, 172),
            booked: Rgb::new(253, 224, 71),
            pending: Rgb::new(216, 180, 254),
            error: Rgb::new(252, 129, 129),
            accent: Rgb::new(147, 197, 253),
        }
    }
}

impl ThemeColors {
    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            muted: Rgb::new(166, 173, 200),   // Subtext0
            open: Rgb::new(166, 227, 161),    // Green
            booked: Rgb::new(249, 226, 175),  // Yellow
            pending: Rgb::new(203, 166, 247), // Mauve
            error: Rgb::new(243, 139, 168),   // Red
            accent: Rgb::new(137, 180, 250),  // Blue
        }
    }

    /// Catppuccin Latte theme (light theme)
    pub fn catppuccin_latte() -> Self {
        Self {
            muted: Rgb::new(108, 111, 133),
            open: Rgb::new(64, 160, 43),
            booked: Rgb::new(223, 142, 29),
            pending: Rgb::new(136, 57, 239),
            error: Rgb::new(210, 15, 57),
            accent: Rgb::new(30, 102, 245),
        }
    }

    /// High contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            muted: Rgb::new(200, 200, 200),
            open: Rgb::new(0, 255, 0),
            booked: Rgb::new(255, 255, 0),
            pending: Rgb::new(255, 0, 255),
            error: Rgb::new(255, 0, 0),
            accent: Rgb::new(0, 255, 255),
        }
    }

    /// Get theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "default" => Some(Self::default()),
            "catppuccinmocha" => Some(Self::catppuccin_mocha()),
            "catppuccinlatte" => Some(Self::catppuccin_latte()),
            "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}

/// Theme configuration - either a preset name or custom colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    Preset(String),
    Custom(ThemeColors),
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::Preset("default".to_string())
    }
}

impl ThemeConfig {
    /// Resolve to actual theme colors, falling back to the default palette
    /// for unknown preset names
    pub fn resolve(&self) -> ThemeColors {
        match self {
            ThemeConfig::Preset(name) => ThemeColors::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme = %name, "unknown theme preset, using default");
                ThemeColors::default()
            }),
            ThemeConfig::Custom(colors) => colors.clone(),
        }
    }
}

/// Where shifts come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// A JSON array of shifts on disk; demo fixtures when no path is set
    Local {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    /// A shiftdesk feed server
    Remote {
        #[serde(default = "default_server_url", rename = "serverUrl")]
        server_url: String,
    },
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Local { path: None }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_tick_rate() -> u64 {
    16
}

/// Configuration settings for shiftdesk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Frame interval of the UI loop; scroll animations advance once per frame
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Set once the user dismissed the welcome banner
    #[serde(default)]
    pub banner_dismissed: bool,

    #[serde(default)]
    pub list: SurfaceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            source: SourceConfig::default(),
            page_size: default_page_size(),
            tick_rate_ms: default_tick_rate(),
            banner_dismissed: false,
            list: SurfaceConfig::default(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.shiftdesk.json)
    fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".shiftdesk.json"))
            .ok_or_else(|| ClientError::General("could not find home directory".to_string()))
    }

    /// Directory for logs and other runtime files (~/.shiftdesk)
    pub fn data_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".shiftdesk"))
            .ok_or_else(|| ClientError::General("could not find home directory".to_string()))
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file() -> Result<()> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            let data = serde_json::to_string_pretty(&Config::default())?;
            fs::write(&config_path, data)?;
        }
        Ok(())
    }

    /// Load configuration from file, merging with defaults
    pub fn load() -> Result<Self> {
        Self::ensure_config_file()?;
        let content = fs::read_to_string(Self::config_file_path()?)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(content)?;
        // Feed servers reject page sizes outside this range
        config.page_size = config.page_size.clamp(1, MAX_PAGE_SIZE);
        Ok(config)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Warning: failed to load config: {err}, using defaults");
                Self::default()
            }
        }
    }

    /// Save the configuration to file
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(Self::config_file_path()?, data)?;
        Ok(())
    }

    /// Remember that the banner was dismissed. Takes effect on the next start.
    pub fn dismiss_banner(&mut self) -> Result<()> {
        self.banner_dismissed = true;
        self.save()
    }
}
