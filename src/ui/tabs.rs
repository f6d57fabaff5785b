use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use element_explorer::color::{category_color, RADIOACTIVE_HIGHLIGHT};
use element_explorer::data::filter::{ColumnConstraint, FilteredView};
use element_explorer::data::model::{Category, Field, Value};
use element_explorer::views::detail::{detail, ABOUT_SECTIONS};
use element_explorer::views::grid::{layout, GridCell};
use element_explorer::views::table::{column_domain, table, ColumnDomain, Table, TableView, EXPORT_FILE_NAME};

use crate::state::{toggle, TableState, Tab};

const CELL_SIZE: Vec2 = Vec2::new(46.0, 46.0);

// ---------------------------------------------------------------------------
// Periodic table
// ---------------------------------------------------------------------------

pub fn periodic_table(ui: &mut Ui, view: &FilteredView<'_>, tab: &mut Tab, detail_id: &mut Option<u32>) {
    let grid = layout(view);
    let mut clicked = None;

    ScrollArea::both().show(ui, |ui: &mut Ui| {
        egui::Grid::new("periodic_grid")
            .spacing([3.0, 3.0])
            .show(ui, |ui: &mut Ui| {
                for row in grid.rows() {
                    for slot in row {
                        match slot {
                            Some(cell) => clicked = element_cell(ui, cell).or(clicked),
                            None => {
                                ui.allocate_exact_size(CELL_SIZE, Sense::hover());
                            }
                        }
                    }
                    ui.end_row();
                }
            });

        ui.add_space(12.0);
        for (title, strip) in [("Lanthanides", &grid.lanthanides), ("Actinides", &grid.actinides)] {
            if strip.is_empty() {
                continue;
            }
            ui.strong(title);
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for cell in strip {
                    clicked = element_cell(ui, cell).or(clicked);
                }
            });
        }

        ui.add_space(12.0);
        legend(ui);

        ui.add_space(12.0);
        about(ui);
    });

    if let Some(id) = clicked {
        *detail_id = Some(id);
        *tab = Tab::Details;
    }
}

/// One clickable cell; returns the atomic number when clicked.
fn element_cell(ui: &mut Ui, cell: &GridCell) -> Option<u32> {
    let text = RichText::new(format!("{}\n{}", cell.atomic_number, cell.symbol))
        .color(Color32::BLACK)
        .strong();
    let response = ui
        .add(egui::Button::new(text).fill(cell.color).min_size(CELL_SIZE))
        .on_hover_text(cell.name.as_str());
    response.clicked().then_some(cell.atomic_number)
}

fn legend(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for category in Category::ALL {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, category_color(category));
            ui.label(category.label());
            ui.add_space(8.0);
        }
    });
}

fn about(ui: &mut Ui) {
    ui.heading("About the Periodic Table");
    for (title, paragraphs) in ABOUT_SECTIONS {
        egui::CollapsingHeader::new(title)
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                for paragraph in paragraphs {
                    ui.label(*paragraph);
                }
            });
    }
}

// ---------------------------------------------------------------------------
// Table view
// ---------------------------------------------------------------------------

pub fn table_tab(
    ui: &mut Ui,
    view: &FilteredView<'_>,
    state: &mut TableState,
    status: &mut Option<String>,
) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.strong("Columns:");
        for field in Field::ALL {
            let on = state.columns.contains(&field);
            if ui.selectable_label(on, field.column_name()).clicked() {
                toggle(&mut state.columns, field);
            }
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("🔍 Search:");
        ui.text_edit_singleline(&mut state.search);
    });

    egui::CollapsingHeader::new("Filter by column values")
        .default_open(false)
        .show(ui, |ui: &mut Ui| constraint_controls(ui, view, state));

    let out = table(view, &state.columns, &state.search, &state.constraints);
    let rows = match &out {
        TableView::EmptySelection => {
            ui.colored_label(Color32::YELLOW, "⚠ Please select at least one column to display.");
            return;
        }
        TableView::Rows(rows) => rows,
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("{} rows", rows.len()));
        if ui.button("⬇ Download as CSV").clicked() {
            *status = Some(export_dialog(rows));
        }
    });
    ui.separator();
    data_table(ui, rows);
}

/// Range sliders for numeric columns and value pickers for small
/// categorical ones. Untouched controls add no constraint.
fn constraint_controls(ui: &mut Ui, view: &FilteredView<'_>, state: &mut TableState) {
    for &field in &state.columns {
        match column_domain(view, field) {
            ColumnDomain::Range { min, max } => {
                let (mut lo, mut hi) = match state.constraints.get(field) {
                    Some(ColumnConstraint::Range { min, max }) => (*min, *max),
                    _ => (min, max),
                };
                let mut changed = false;
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(format!("{} range:", field.column_name()));
                    changed |= ui.add(egui::Slider::new(&mut lo, min..=max).text("min")).changed();
                    changed |= ui.add(egui::Slider::new(&mut hi, min..=max).text("max")).changed();
                    if ui.small_button("Reset").clicked() {
                        state.constraints.clear(field);
                    }
                });
                if changed {
                    state
                        .constraints
                        .set(field, ColumnConstraint::Range { min: lo.min(hi), max: lo.max(hi) });
                }
            }
            ColumnDomain::Values(values) => {
                let mut accepted: BTreeSet<Value> = match state.constraints.get(field) {
                    Some(ColumnConstraint::OneOf(set)) => set.clone(),
                    _ => values.clone(),
                };
                let mut changed = false;
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    ui.label(format!("Select {}:", field.column_name()));
                    for value in &values {
                        let mut on = accepted.contains(value);
                        if ui.checkbox(&mut on, value.to_string()).changed() {
                            changed = true;
                            if on {
                                accepted.insert(value.clone());
                            } else {
                                accepted.remove(value);
                            }
                        }
                    }
                });
                if changed {
                    state.constraints.set(field, ColumnConstraint::OneOf(accepted));
                }
            }
            ColumnDomain::Unconstrained => {}
        }
    }
}

fn data_table(ui: &mut Ui, rows: &Table) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(70.0), rows.columns.len())
        .header(22.0, |mut header| {
            for field in &rows.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(field.column_name());
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let record = &rows.rows[row.index()];
                for i in 0..rows.columns.len() {
                    row.col(|ui: &mut Ui| {
                        if record.highlight_radioactive {
                            ui.painter().rect_filled(ui.max_rect(), 0.0, RADIOACTIVE_HIGHLIGHT);
                            ui.label(RichText::new(record.cell_text(i)).color(Color32::BLACK));
                        } else {
                            ui.label(record.cell_text(i));
                        }
                    });
                }
            });
        });
}

/// Ask for a destination and write the table there; returns a status line.
fn export_dialog(rows: &Table) -> String {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Download filtered table")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return "Export cancelled".to_string();
    };

    let result = File::create(&path)
        .map_err(Into::into)
        .and_then(|file| rows.write_csv(file));
    match result {
        Ok(()) => {
            log::info!("Exported {} rows to {}", rows.len(), path.display());
            format!("Saved {} rows to {}", rows.len(), path.display())
        }
        Err(e) => {
            log::error!("CSV export to {} failed: {e}", path.display());
            format!("Export failed: {e}")
        }
    }
}

// ---------------------------------------------------------------------------
// Element details
// ---------------------------------------------------------------------------

pub fn detail_tab(ui: &mut Ui, view: &FilteredView<'_>, selected: &mut Option<u32>, assets_dir: &Path) {
    if view.is_empty() {
        ui.label("No element matches the current filters.");
        return;
    }
    // Only ids from the current view are offered, so the lookup below
    // cannot miss unless the selection went stale.
    if !selected.is_some_and(|id| view.get(id).is_some()) {
        *selected = view.iter().next().map(|e| e.atomic_number);
    }
    let Some(id) = *selected else {
        return;
    };

    let current = view.get(id).map(|e| e.name.clone()).unwrap_or_default();
    egui::ComboBox::from_id_salt("detail_element")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for element in view.iter() {
                ui.selectable_value(&mut *selected, Some(element.atomic_number), element.name.as_str());
            }
        });

    let card = match detail(view, id) {
        Ok(card) => card,
        Err(e) => {
            log::error!("{e}");
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };

    ui.add_space(8.0);
    ui.heading(RichText::new(format!("Element: {}", card.title())).color(Color32::from_rgb(0x2A, 0x7D, 0x8E)));

    ui.horizontal(|ui: &mut Ui| {
        match card.image_in(assets_dir) {
            Some(path) => {
                let uri = format!("file://{}", path.display());
                ui.add(egui::Image::new(uri).max_width(160.0).max_height(160.0));
            }
            None => {
                let (rect, _) = ui.allocate_exact_size(Vec2::splat(160.0), Sense::hover());
                ui.painter().rect_filled(rect, 6.0, category_color(card.element.category));
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    &card.element.symbol,
                    egui::FontId::proportional(56.0),
                    Color32::BLACK,
                );
            }
        }

        egui::Grid::new("detail_facts")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui: &mut Ui| {
                for fact in &card.facts {
                    ui.strong(fact.label);
                    ui.label(fact.display());
                    ui.end_row();
                }
            });
    });

    ui.separator();
    ui.heading("Definitions");
    for (term, definition) in card.glossary {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.strong(*term);
            ui.label(*definition);
        });
    }
}
