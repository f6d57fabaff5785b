use std::path::{Path, PathBuf};

use element_explorer::config::ExplorerConfig;
use element_explorer::data::filter::{ColumnConstraints, FilterCriteria};
use element_explorer::data::loader::load_file;
use element_explorer::data::model::{Dataset, Field, Property};
use element_explorer::views::scatter::ScatterRequest;
use egui_plot::LineStyle;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    PeriodicTable,
    Table,
    Trends,
    Scatter,
    Radar,
    Details,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::PeriodicTable,
        Tab::Table,
        Tab::Trends,
        Tab::Scatter,
        Tab::Radar,
        Tab::Details,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::PeriodicTable => "Periodic Table",
            Tab::Table => "Table View",
            Tab::Trends => "Trends",
            Tab::Scatter => "3D Visualization",
            Tab::Radar => "Radar Charts",
            Tab::Details => "Element Details",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tab selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TableState {
    pub columns: Vec<Field>,
    pub search: String,
    /// Only columns the user has narrowed carry an entry.
    pub constraints: ColumnConstraints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendLineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl TrendLineStyle {
    pub const ALL: [TrendLineStyle; 3] = [
        TrendLineStyle::Solid,
        TrendLineStyle::Dashed,
        TrendLineStyle::Dotted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrendLineStyle::Solid => "solid",
            TrendLineStyle::Dashed => "dash",
            TrendLineStyle::Dotted => "dot",
        }
    }

    pub fn line_style(self) -> LineStyle {
        match self {
            TrendLineStyle::Solid => LineStyle::Solid,
            TrendLineStyle::Dashed => LineStyle::Dashed { length: 10.0 },
            TrendLineStyle::Dotted => LineStyle::Dotted { spacing: 6.0 },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrendState {
    pub properties: Vec<Property>,
    pub smoothing: bool,
    pub show_markers: bool,
    pub line_style: TrendLineStyle,
}

impl Default for TrendState {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            smoothing: false,
            show_markers: true,
            line_style: TrendLineStyle::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScatterState {
    pub request: ScatterRequest,
    /// Orbit angles of the 3D projection, radians.
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for ScatterState {
    fn default() -> Self {
        Self {
            request: ScatterRequest::default(),
            yaw: 0.6,
            pitch: 0.4,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RadarState {
    pub element_ids: Vec<u32>,
    pub properties: Vec<Property>,
    /// Scale every spoke to the largest drawn value on it.
    pub normalise: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,
    pub source: Option<PathBuf>,

    /// Set when the last load failed; the views stay hidden until a file loads.
    pub load_error: Option<String>,

    /// Transient message for the top bar (exports, settings).
    pub status_message: Option<String>,

    pub tab: Tab,
    pub filters: FilterCriteria,
    pub table: TableState,
    pub trend: TrendState,
    pub scatter: ScatterState,
    pub radar: RadarState,
    pub detail_id: Option<u32>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        let mut scatter = ScatterState::default();
        scatter.request.bubble_scale = config.bubble_scale;
        scatter.request.color_scale = config.color_scale;
        Self {
            config,
            dataset: None,
            source: None,
            load_error: None,
            status_message: None,
            tab: Tab::default(),
            filters: FilterCriteria::default(),
            table: TableState::default(),
            trend: TrendState::default(),
            scatter,
            radar: RadarState::default(),
            detail_id: None,
        }
    }

    /// Load `path`, replacing the current dataset, or record the failure.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                self.source = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.load_error = Some(format!("Could not load {}: {e}", path.display()));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset every selection to its default.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let observed = dataset.observed_properties();

        self.filters = FilterCriteria::default();
        self.table = TableState {
            columns: Field::ALL
                .iter()
                .copied()
                .take(self.config.default_table_columns)
                .collect(),
            ..TableState::default()
        };
        self.trend.properties = observed.iter().copied().take(2).collect();

        let (lo, hi) = dataset.atomic_number_bounds();
        self.scatter.request.atomic_numbers = (lo, hi);

        self.radar.element_ids = dataset.elements().iter().take(2).map(|e| e.atomic_number).collect();
        self.radar.properties = observed.iter().copied().take(5).collect();
        self.detail_id = dataset.elements().first().map(|e| e.atomic_number);

        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
    }

    /// Persist the style settings the user can change at runtime.
    pub fn save_settings(&mut self) {
        self.config.bubble_scale = self.scatter.request.bubble_scale;
        self.config.color_scale = self.scatter.request.color_scale;
        self.status_message = Some(match self.config.save() {
            Ok(path) => format!("Settings saved to {}", path.display()),
            Err(e) => {
                log::warn!("Saving settings failed: {e:#}");
                format!("Saving settings failed: {e:#}")
            }
        });
    }
}

/// Add `item` if missing, remove it if present; keeps insertion order.
pub fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(i) = items.iter().position(|x| *x == item) {
        items.remove(i);
    } else {
        items.push(item);
    }
}
