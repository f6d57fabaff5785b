use std::f64::consts::TAU;

use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};
use element_explorer::color::ColorScale;
use element_explorer::data::filter::FilteredView;
use element_explorer::data::model::{Dataset, Property};
use element_explorer::views::radar::{radar, RadarPolygon, RadarView};
use element_explorer::views::scatter::{scatter, ScatterPlot, ScatterView, BUBBLE_SCALE_RANGE};
use element_explorer::views::trend::{series, TrendView};

use crate::state::{toggle, RadarState, ScatterState, TrendLineStyle, TrendState};

/// Toggle buttons for a multi-select over `options`, keeping pick order.
fn property_picker(ui: &mut Ui, options: &[Property], selected: &mut Vec<Property>) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for &p in options {
            if ui.selectable_label(selected.contains(&p), p.label()).clicked() {
                toggle(selected, p);
            }
        }
    });
}

fn property_combo(ui: &mut Ui, label: &str, options: &[Property], value: &mut Property) {
    egui::ComboBox::from_label(label)
        .selected_text(value.label())
        .show_ui(ui, |ui: &mut Ui| {
            for &p in options {
                ui.selectable_value(value, p, p.label());
            }
        });
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

pub fn trend_tab(ui: &mut Ui, dataset: &Dataset, view: &FilteredView<'_>, state: &mut TrendState) {
    let options = dataset.observed_properties();
    if options.is_empty() {
        ui.colored_label(Color32::YELLOW, "⚠ No numeric properties found for comparison.");
        return;
    }

    ui.strong("Properties to compare");
    property_picker(ui, &options, &mut state.properties);
    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut state.show_markers, "Show markers");
        ui.checkbox(&mut state.smoothing, "Smooth the line");
        egui::ComboBox::from_label("Line style")
            .selected_text(state.line_style.label())
            .show_ui(ui, |ui: &mut Ui| {
                for style in TrendLineStyle::ALL {
                    ui.selectable_value(&mut state.line_style, style, style.label());
                }
            });
    });

    let lines = match series(view, &state.properties, state.smoothing) {
        TrendView::EmptySelection => {
            ui.colored_label(Color32::YELLOW, "⚠ Please select at least one property to visualize.");
            return;
        }
        TrendView::Series(lines) => lines,
    };

    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Atomic Number")
        .y_axis_label("Property Value")
        .show(ui, |plot_ui| {
            for line in &lines {
                let pts: Vec<[f64; 2]> = line
                    .points
                    .iter()
                    .map(|(z, v)| [f64::from(*z), *v])
                    .collect();
                if state.show_markers {
                    plot_ui.points(
                        Points::new(PlotPoints::from(pts.clone()))
                            .name(line.property.label())
                            .color(line.color)
                            .radius(2.5),
                    );
                }
                plot_ui.line(
                    Line::new(PlotPoints::from(pts))
                        .name(line.property.label())
                        .color(line.color)
                        .style(state.line_style.line_style())
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 3D bubble chart (orbit projection onto the plot plane)
// ---------------------------------------------------------------------------

pub fn scatter_tab(ui: &mut Ui, dataset: &Dataset, view: &FilteredView<'_>, state: &mut ScatterState) {
    let options = dataset.observed_properties();
    if options.is_empty() {
        ui.colored_label(Color32::YELLOW, "⚠ No numeric properties to plot.");
        return;
    }
    let (first, last) = dataset.atomic_number_bounds();
    let req = &mut state.request;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        property_combo(ui, "X", &options, &mut req.x);
        property_combo(ui, "Y", &options, &mut req.y);
        property_combo(ui, "Z", &options, &mut req.z);
        property_combo(ui, "Size", &options, &mut req.size);
        property_combo(ui, "Color", &options, &mut req.color);
    });
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Atomic number range:");
        ui.add(egui::DragValue::new(&mut req.atomic_numbers.0).range(first..=last));
        ui.add(egui::DragValue::new(&mut req.atomic_numbers.1).range(first..=last));
        ui.checkbox(&mut req.log_scale, "Logarithmic axes");
        egui::ComboBox::from_label("Color scale")
            .selected_text(req.color_scale.label())
            .show_ui(ui, |ui: &mut Ui| {
                for scale in ColorScale::ALL {
                    ui.selectable_value(&mut req.color_scale, scale, scale.label());
                }
            });
        ui.add(egui::Slider::new(&mut req.bubble_scale, BUBBLE_SCALE_RANGE).text("Bubble size"));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.add(egui::Slider::new(&mut state.yaw, -TAU..=TAU).text("Yaw"));
        ui.add(egui::Slider::new(&mut state.pitch, -1.5..=1.5).text("Pitch"));
    });

    let plot = match scatter(view, &state.request) {
        ScatterView::NoDataForSelection => {
            ui.colored_label(Color32::YELLOW, "⚠ No data for the current selection.");
            return;
        }
        ScatterView::Plot(plot) => plot,
    };
    let (cmin, cmax) = plot.color_range;
    ui.label(format!(
        "Color: {} from {cmin} to {cmax} ({})",
        plot.color.label(),
        plot.color_scale.label()
    ));

    let projection = Orbit::new(state.yaw, state.pitch, &plot);
    let bubble = state.request.bubble_scale as f32;
    let max_marker = plot
        .points
        .iter()
        .map(|p| p.marker_size.abs())
        .fold(0.0, f64::max);

    // Painter's order: farthest first.
    let mut order: Vec<(f64, usize)> = plot
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (projection.depth(p.position), i))
        .collect();
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    Plot::new("scatter_plot")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show(ui, |plot_ui| {
            for (axis, label) in plot.axes.iter().enumerate() {
                let mut tip = [0.0; 3];
                tip[axis] = 1.2;
                let end = projection.screen_unit(tip);
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[0.0, 0.0], end]))
                        .color(Color32::GRAY)
                        .width(1.0),
                );
                let suffix = if plot.log_scale { " (log)" } else { "" };
                plot_ui.text(Text::new(
                    PlotPoint::new(end[0], end[1]),
                    format!("{}{suffix}", label.label()),
                ));
            }

            for &(_, i) in &order {
                let p = &plot.points[i];
                let ratio = if max_marker > 0.0 { p.marker_size.abs() / max_marker } else { 1.0 };
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![projection.screen(p.position)]))
                        .name(format!(
                            "{} ({}) Z={}: {}={}, {}={}, {}={}",
                            p.name,
                            p.symbol,
                            p.atomic_number,
                            plot.axes[0].label(),
                            p.values[0],
                            plot.axes[1].label(),
                            p.values[1],
                            plot.axes[2].label(),
                            p.values[2],
                        ))
                        .color(p.color)
                        .radius(2.0 + ratio.sqrt() as f32 * bubble),
                );
            }
        });
}

/// Yaw/pitch camera over the unit cube the points are normalised into.
struct Orbit {
    yaw: f64,
    pitch: f64,
    /// Per-axis (centre, half-span) of the data.
    frame: [(f64, f64); 3],
}

impl Orbit {
    fn new(yaw: f64, pitch: f64, plot: &ScatterPlot) -> Self {
        let mut frame = [(0.0, 1.0); 3];
        for (axis, slot) in frame.iter_mut().enumerate() {
            let (lo, hi) = plot
                .points
                .iter()
                .map(|p| p.position[axis])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
            let half = (hi - lo) / 2.0;
            *slot = (lo + half, if half > 0.0 { half } else { 1.0 });
        }
        Self { yaw, pitch, frame }
    }

    fn normalise(&self, pos: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (axis, v) in out.iter_mut().enumerate() {
            let (centre, half) = self.frame[axis];
            *v = (pos[axis] - centre) / half;
        }
        out
    }

    /// Rotate a point already in unit-cube coordinates.
    fn rotate(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let x1 = x * cy - y * sy;
        let y1 = x * sy + y * cy;
        [x1, z * cp - y1 * sp, y1 * cp + z * sp]
    }

    fn screen_unit(&self, unit: [f64; 3]) -> [f64; 2] {
        let [sx, sy, _] = self.rotate(unit);
        [sx, sy]
    }

    fn screen(&self, pos: [f64; 3]) -> [f64; 2] {
        self.screen_unit(self.normalise(pos))
    }

    fn depth(&self, pos: [f64; 3]) -> f64 {
        self.rotate(self.normalise(pos))[2]
    }
}

// ---------------------------------------------------------------------------
// Radar chart
// ---------------------------------------------------------------------------

pub fn radar_tab(ui: &mut Ui, dataset: &Dataset, view: &FilteredView<'_>, state: &mut RadarState) {
    let options = dataset.observed_properties();

    egui::CollapsingHeader::new("Elements to compare")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for e in view.iter() {
                    let on = state.element_ids.contains(&e.atomic_number);
                    if ui.selectable_label(on, e.symbol.as_str()).on_hover_text(e.name.as_str()).clicked() {
                        toggle(&mut state.element_ids, e.atomic_number);
                    }
                }
            });
        });
    ui.strong("Properties to visualize");
    property_picker(ui, &options, &mut state.properties);
    ui.checkbox(&mut state.normalise, "Scale each axis to its largest value");

    let polygons = match radar(view, &state.element_ids, &state.properties) {
        RadarView::EmptySelection => {
            ui.colored_label(
                Color32::YELLOW,
                "⚠ Please select at least one element and one property for comparison.",
            );
            return;
        }
        RadarView::Polygons(polygons) => polygons,
    };

    let spokes = &state.properties;
    let scale: Vec<f64> = spokes
        .iter()
        .map(|p| {
            let max = polygons
                .iter()
                .flat_map(|poly| poly.vertices.iter())
                .filter(|(q, _)| q == p)
                .map(|(_, v)| v.abs())
                .fold(0.0, f64::max);
            if state.normalise && max > 0.0 { max } else { 1.0 }
        })
        .collect();
    let reach = if state.normalise {
        1.0
    } else {
        polygons
            .iter()
            .flat_map(|poly| poly.vertices.iter())
            .map(|(_, v)| v.abs())
            .fold(0.0, f64::max)
            .max(1.0)
    };

    let angle = |i: usize| TAU * i as f64 / spokes.len() as f64;
    let place = |poly: &RadarPolygon| -> Vec<[f64; 2]> {
        poly.vertices
            .iter()
            .filter_map(|(p, v)| {
                let i = spokes.iter().position(|q| q == p)?;
                let r = v / scale[i];
                Some([r * angle(i).cos(), r * angle(i).sin()])
            })
            .collect()
    };

    Plot::new("radar_plot")
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show(ui, |plot_ui| {
            for (i, p) in spokes.iter().enumerate() {
                let tip = [reach * 1.1 * angle(i).cos(), reach * 1.1 * angle(i).sin()];
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[0.0, 0.0], tip]))
                        .color(Color32::GRAY)
                        .width(1.0),
                );
                plot_ui.text(Text::new(PlotPoint::new(tip[0], tip[1]), p.label()));
            }
            for poly in &polygons {
                let pts = place(poly);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(pts.clone()))
                        .name(&poly.label)
                        .fill_color(poly.color.gamma_multiply(0.3))
                        .stroke(Stroke::new(2.0, poly.color)),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(&poly.label)
                        .color(poly.color)
                        .radius(3.0),
                );
            }
        });

    ui.separator();
    for poly in &polygons {
        let facts: Vec<String> = poly
            .vertices
            .iter()
            .map(|(p, v)| match p.unit() {
                Some(unit) => format!("{}: {v} {unit}", p.label()),
                None => format!("{}: {v}", p.label()),
            })
            .collect();
        ui.label(format!("{}  {}", poly.label, facts.join(" · ")));
    }
}
