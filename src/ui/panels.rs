use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use element_explorer::data::filter::{FilterCriteria, MetalFilter, RadioactivityFilter};
use element_explorer::data::model::Dataset;

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the sidebar filters shared by every tab.
pub fn side_panel(ui: &mut Ui, dataset: &Dataset, filters: &mut FilterCriteria) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Search by element name");
            ui.text_edit_singleline(&mut filters.name_query);
            ui.add_space(6.0);

            value_set(ui, "Group", "group_filter", &dataset.groups(), &mut filters.groups);
            value_set(ui, "Period", "period_filter", &dataset.periods(), &mut filters.periods);
            ui.add_space(6.0);

            ui.strong("Metal type");
            egui::ComboBox::from_id_salt("metal_filter")
                .selected_text(filters.metal.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in MetalFilter::OPTIONS {
                        ui.selectable_value(&mut filters.metal, option, option.label());
                    }
                });

            ui.strong("Radioactivity");
            egui::ComboBox::from_id_salt("radioactivity_filter")
                .selected_text(filters.radioactivity.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in RadioactivityFilter::OPTIONS {
                        ui.selectable_value(&mut filters.radioactivity, option, option.label());
                    }
                });

            ui.add_space(8.0);
            if ui
                .add_enabled(!filters.is_unconstrained(), egui::Button::new("Reset filters"))
                .clicked()
            {
                *filters = FilterCriteria::default();
            }
        });
}

/// Collapsible multi-select over `options`. An empty selection means "all".
fn value_set(ui: &mut Ui, title: &str, id: &str, options: &[u8], selected: &mut BTreeSet<u8>) {
    let header = if selected.is_empty() {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                selected.clear();
            }
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for &value in options {
                    let is_selected = selected.contains(&value);
                    if ui.selectable_label(is_selected, value.to_string()).clicked() {
                        if is_selected {
                            selected.remove(&value);
                        } else {
                            selected.insert(value);
                        }
                    }
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save settings").clicked() {
                state.save_settings();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let shown = ds
                .elements()
                .iter()
                .filter(|e| state.filters.matches(e))
                .count();
            ui.label(format!("{} elements loaded, {shown} match the filters", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
        }
    });
}

/// Tab strip for the central panel.
pub fn tab_bar(ui: &mut Ui, current: &mut Tab) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(current, tab, tab.label());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open element table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
