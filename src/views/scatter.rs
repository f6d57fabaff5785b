use std::ops::RangeInclusive;

use eframe::egui::Color32;

use crate::color::ColorScale;
use crate::data::filter::FilteredView;
use crate::data::model::{Element, Property};

pub const DEFAULT_BUBBLE_SCALE: f64 = 10.0;
/// Range offered by the bubble size control.
pub const BUBBLE_SCALE_RANGE: RangeInclusive<f64> = 5.0..=30.0;

/// Field and style selections for the 3D bubble chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterRequest {
    pub x: Property,
    pub y: Property,
    pub z: Property,
    pub size: Property,
    pub color: Property,
    /// Inclusive atomic number bounds.
    pub atomic_numbers: (u32, u32),
    /// Log10 on all three positional axes.
    pub log_scale: bool,
    pub bubble_scale: f64,
    pub color_scale: ColorScale,
}

impl Default for ScatterRequest {
    fn default() -> Self {
        Self {
            x: Property::AtomicMass,
            y: Property::Density,
            z: Property::MeltingPoint,
            size: Property::BoilingPoint,
            color: Property::IonizationEnergy,
            atomic_numbers: (1, 118),
            log_scale: false,
            bubble_scale: DEFAULT_BUBBLE_SCALE,
            color_scale: ColorScale::default(),
        }
    }
}

impl ScatterRequest {
    pub fn with_fields(
        mut self,
        x: Property,
        y: Property,
        z: Property,
        size: Property,
        color: Property,
    ) -> Self {
        (self.x, self.y, self.z, self.size, self.color) = (x, y, z, size, color);
        self
    }

    pub fn with_range(mut self, lo: u32, hi: u32) -> Self {
        self.atomic_numbers = (lo, hi);
        self
    }

    pub fn with_log_scale(mut self, on: bool) -> Self {
        self.log_scale = on;
        self
    }

    pub fn with_bubble_scale(mut self, scale: f64) -> Self {
        self.bubble_scale = scale;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    /// Plot coordinates; log10 of the data values when the plot is in log scale.
    pub position: [f64; 3],
    /// Raw `x`, `y`, `z` values for hover text.
    pub values: [f64; 3],
    pub size_value: f64,
    /// `size_value` times the bubble multiplier.
    pub marker_size: f64,
    pub color_value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub axes: [Property; 3],
    pub size: Property,
    pub color: Property,
    pub log_scale: bool,
    pub color_scale: ColorScale,
    /// Smallest and largest color value among the points.
    pub color_range: (f64, f64),
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScatterView {
    /// Every element in range lacks at least one of the five fields.
    NoDataForSelection,
    Plot(ScatterPlot),
}

/// Measured values of one element, when all five fields are present.
struct Measured<'a> {
    element: &'a Element,
    xyz: [f64; 3],
    size: f64,
    color: f64,
}

/// Build the bubble chart payload.
///
/// Rows outside the atomic number range go first, then any row missing one
/// of the five fields. In log scale a non-positive positional value cannot
/// be placed, so that row is dropped as well.
pub fn scatter(view: &FilteredView<'_>, request: &ScatterRequest) -> ScatterView {
    let (lo, hi) = request.atomic_numbers;
    let measured: Vec<Measured<'_>> = view
        .iter()
        .filter(|e| (lo..=hi).contains(&e.atomic_number))
        .filter_map(|element| {
            Some(Measured {
                element,
                xyz: [
                    element.property(request.x)?,
                    element.property(request.y)?,
                    element.property(request.z)?,
                ],
                size: element.property(request.size)?,
                color: element.property(request.color)?,
            })
        })
        .filter(|m| !request.log_scale || m.xyz.iter().all(|v| *v > 0.0))
        .collect();

    if measured.is_empty() {
        return ScatterView::NoDataForSelection;
    }

    let (cmin, cmax) = measured
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| {
            (lo.min(m.color), hi.max(m.color))
        });
    let span = cmax - cmin;

    let points = measured
        .into_iter()
        .map(|m| {
            let t = if span > 0.0 { (m.color - cmin) / span } else { 0.5 };
            let position = if request.log_scale {
                m.xyz.map(f64::log10)
            } else {
                m.xyz
            };
            ScatterPoint {
                atomic_number: m.element.atomic_number,
                symbol: m.element.symbol.clone(),
                name: m.element.name.clone(),
                position,
                values: m.xyz,
                size_value: m.size,
                marker_size: m.size * request.bubble_scale,
                color_value: m.color,
                color: request.color_scale.sample(t),
            }
        })
        .collect();

    ScatterView::Plot(ScatterPlot {
        axes: [request.x, request.y, request.z],
        size: request.size,
        color: request.color,
        log_scale: request.log_scale,
        color_scale: request.color_scale,
        color_range: (cmin, cmax),
        points,
    })
}
