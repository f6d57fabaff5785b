use eframe::egui::Color32;

use crate::color::qualitative_color;
use crate::data::filter::FilteredView;
use crate::data::model::Property;

/// One element's polygon on the radar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarPolygon {
    pub atomic_number: u32,
    /// `"Name (Symbol)"`.
    pub label: String,
    /// Present properties only, in request order.
    pub vertices: Vec<(Property, f64)>,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RadarView {
    /// No element or no property selected.
    EmptySelection,
    Polygons(Vec<RadarPolygon>),
}

/// One polygon per selected element, in selection order.
///
/// Both selections are ordered sets: repeats collapse to their first
/// occurrence. Properties the element lacks are skipped rather than
/// defaulted. Ids not in the view and polygons left with no vertices are not
/// drawn, and the colour index counts drawn polygons only.
pub fn radar(view: &FilteredView<'_>, element_ids: &[u32], properties: &[Property]) -> RadarView {
    let element_ids = first_occurrences(element_ids);
    let properties = first_occurrences(properties);
    if element_ids.is_empty() || properties.is_empty() {
        return RadarView::EmptySelection;
    }

    let mut polygons: Vec<RadarPolygon> = Vec::new();
    for id in element_ids {
        let Some(element) = view.get(id) else {
            log::debug!("Radar selection {id} is not in the filtered view");
            continue;
        };
        let vertices: Vec<(Property, f64)> = properties
            .iter()
            .filter_map(|p| element.property(*p).map(|v| (*p, v)))
            .collect();
        if vertices.is_empty() {
            continue;
        }
        polygons.push(RadarPolygon {
            atomic_number: id,
            label: format!("{} ({})", element.name, element.symbol),
            vertices,
            color: qualitative_color(polygons.len()),
        });
    }

    RadarView::Polygons(polygons)
}

fn first_occurrences<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterCriteria};
    use crate::views::fixtures::sample;

    fn polygons(view: RadarView) -> Vec<RadarPolygon> {
        match view {
            RadarView::Polygons(p) => p,
            RadarView::EmptySelection => panic!("expected polygons"),
        }
    }

    #[test]
    fn test_requires_elements_and_properties() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        assert_eq!(radar(&view, &[], &[Property::Density]), RadarView::EmptySelection);
        assert_eq!(radar(&view, &[1], &[]), RadarView::EmptySelection);
    }

    #[test]
    fn test_absent_properties_drop_vertices() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        let out = polygons(radar(
            &view,
            &[1, 2],
            &[Property::AtomicMass, Property::Electronegativity],
        ));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label, "Hydrogen (H)");
        assert_eq!(out[0].vertices.len(), 2);
        assert_eq!(out[1].vertices, vec![(Property::AtomicMass, 4.002)]);
    }

    #[test]
    fn test_colour_follows_render_order() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        let props = [Property::AtomicMass, Property::Density];

        let forward = polygons(radar(&view, &[1, 2], &props));
        let reversed = polygons(radar(&view, &[2, 1], &props));
        assert_eq!(forward[0].color, qualitative_color(0));
        assert_eq!(reversed[0].atomic_number, 2);
        assert_eq!(reversed[0].color, qualitative_color(0));
    }

    #[test]
    fn test_empty_polygons_do_not_take_a_colour() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        // Helium has no electronegativity, so it yields no polygon.
        let out = polygons(radar(&view, &[2, 3], &[Property::Electronegativity]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].atomic_number, 3);
        assert_eq!(out[0].color, qualitative_color(0));
    }

    #[test]
    fn test_repeated_selections_collapse() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        let out = polygons(radar(
            &view,
            &[1, 1],
            &[Property::AtomicMass, Property::AtomicMass],
        ));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].vertices, vec![(Property::AtomicMass, 1.007)]);

        // The repeat of 1 takes no palette slot, so 3 keeps the second colour.
        let out = polygons(radar(&view, &[1, 1, 3], &[Property::Density]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].atomic_number, 3);
        assert_eq!(out[1].color, qualitative_color(1));
    }

    #[test]
    fn test_ids_outside_view_are_skipped() {
        let ds = sample();
        let view = apply(&ds, &FilterCriteria::default().with_periods([1]));
        let out = polygons(radar(&view, &[3, 1], &[Property::AtomicMass]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].atomic_number, 1);
    }
}
