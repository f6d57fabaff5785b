use eframe::egui::{self, Color32, RichText, Ui};
use element_explorer::config::ExplorerConfig;
use element_explorer::data::filter::apply;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    pub fn new(config: ExplorerConfig) -> Self {
        let mut state = AppState::new(config);
        let path = state.config.data_path.clone();
        state.load(&path);
        Self { state }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Load failure halts every view ----
        if let Some(err) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new(err).color(Color32::RED).heading());
                });
            });
            return;
        }
        let Some(dataset) = self.state.dataset.as_ref() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to explore  (File → Open…)");
                });
            });
            return;
        };

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, dataset, &mut self.state.filters);
            });

        // Rebuilt from scratch every frame.
        let view = apply(dataset, &self.state.filters);

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state.tab);
            ui.separator();
            let tab = self.state.tab;
            match tab {
                Tab::PeriodicTable => {
                    tabs::periodic_table(ui, &view, &mut self.state.tab, &mut self.state.detail_id)
                }
                Tab::Table => tabs::table_tab(
                    ui,
                    &view,
                    &mut self.state.table,
                    &mut self.state.status_message,
                ),
                Tab::Trends => plot::trend_tab(ui, dataset, &view, &mut self.state.trend),
                Tab::Scatter => plot::scatter_tab(ui, dataset, &view, &mut self.state.scatter),
                Tab::Radar => plot::radar_tab(ui, dataset, &view, &mut self.state.radar),
                Tab::Details => tabs::detail_tab(
                    ui,
                    &view,
                    &mut self.state.detail_id,
                    &self.state.config.assets_dir,
                ),
            }
        });
    }
}
