use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::color::ColorScale;
use crate::views::scatter::{BUBBLE_SCALE_RANGE, DEFAULT_BUBBLE_SCALE};

/// Overrides the settings file location.
pub const CONFIG_ENV: &str = "ELEMENT_EXPLORER_CONFIG";
/// Overrides `data_path`.
pub const DATA_ENV: &str = "ELEMENT_EXPLORER_DATA";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User settings, stored as JSON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub data_path: PathBuf,
    /// Directory of `<atomic_number>.png` images for the detail tab.
    pub assets_dir: PathBuf,
    /// How many leading schema columns the table tab starts with.
    pub default_table_columns: usize,
    pub bubble_scale: f64,
    pub color_scale: ColorScale,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/elements.csv"),
            assets_dir: PathBuf::from("assets/elements"),
            default_table_columns: 5,
            bubble_scale: DEFAULT_BUBBLE_SCALE,
            color_scale: ColorScale::default(),
        }
    }
}

impl ExplorerConfig {
    /// Settings file location: `$ELEMENT_EXPLORER_CONFIG`, else the OS
    /// config dir (e.g. `~/.config/element-explorer/settings.json`).
    pub fn path() -> PathBuf {
        if let Some(p) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        match ProjectDirs::from("org", "element-explorer", "element-explorer") {
            Some(dirs) => dirs.config_dir().join("settings.json"),
            None => PathBuf::from("settings.json"),
        }
    }

    pub fn read_from(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config.sanitised())
    }

    /// Load from the standard location, then apply `$ELEMENT_EXPLORER_DATA`.
    /// Never fails: problems are logged and defaults used.
    pub fn load() -> Self {
        let path = Self::path();
        let config = if path.exists() {
            match Self::read_from(&path) {
                Ok(cfg) => {
                    log::info!("Config loaded from {}", path.display());
                    cfg
                }
                Err(e) => {
                    log::warn!("Ignoring config: {e:#}");
                    Self::default()
                }
            }
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.with_data_override(std::env::var_os(DATA_ENV).map(PathBuf::from))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Save to the standard location and return where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn with_data_override(mut self, data_path: Option<PathBuf>) -> Self {
        if let Some(p) = data_path {
            self.data_path = p;
        }
        self
    }

    /// Clamp values that came from disk into their usable ranges.
    fn sanitised(mut self) -> Self {
        if !self.bubble_scale.is_finite() {
            self.bubble_scale = DEFAULT_BUBBLE_SCALE;
        }
        self.bubble_scale = self
            .bubble_scale
            .clamp(*BUBBLE_SCALE_RANGE.start(), *BUBBLE_SCALE_RANGE.end());
        self.default_table_columns = self.default_table_columns.max(1);
        self
    }
}
