//! End-to-end checks of the filter-and-derive pipeline over the bundled
//! 118-element table.

use std::path::Path;
use std::sync::OnceLock;

use approx::assert_relative_eq;
use element_explorer::data::filter::{
    apply, ColumnConstraints, FilterCriteria, FilteredView, MetalFilter, RadioactivityFilter,
};
use element_explorer::data::loader::load_file;
use element_explorer::data::model::{Category, Dataset, Field, MetalClass, Property, Value};
use element_explorer::error::LookupError;
use element_explorer::views::detail::detail;
use element_explorer::views::grid::{layout, ACTINIDE_RANGE, LANTHANIDE_RANGE};
use element_explorer::views::radar::{radar, RadarView};
use element_explorer::views::scatter::{scatter, ScatterRequest, ScatterView};
use element_explorer::views::table::{table, TableView};
use element_explorer::views::trend::{gaussian_smooth, series, TrendView, SMOOTHING_SIGMA};
use proptest::prelude::*;

fn dataset() -> &'static Dataset {
    static DATA: OnceLock<Dataset> = OnceLock::new();
    DATA.get_or_init(|| {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/elements.csv");
        load_file(&path).unwrap()
    })
}

// ---------------------------------------------------------------------------
// Dataset store
// ---------------------------------------------------------------------------

#[test]
fn test_bundled_table_loads_completely() {
    let ds = dataset();
    assert_eq!(ds.len(), 118);
    assert_eq!(ds.atomic_number_bounds(), (1, 118));
    assert_eq!(ds.groups(), (1..=18).collect::<Vec<u8>>());
    assert_eq!(ds.periods(), (1..=7).collect::<Vec<u8>>());
    assert_eq!(ds.observed_properties(), Property::ALL.to_vec());

    let hydrogen = ds.get(1).unwrap();
    assert_eq!(hydrogen.symbol, "H");
    assert_eq!(hydrogen.metal_class, MetalClass::Nonmetal);
    assert_eq!(hydrogen.property(Property::Density), Some(0.0000899));

    let helium = ds.get(2).unwrap();
    assert_eq!(helium.property(Property::Electronegativity), None);
    assert_eq!(helium.category, Category::NobleGas);

    // Authored flags are absent for the unnamed superheavies.
    assert_eq!(ds.get(110).unwrap().metal_class, MetalClass::Other);
    assert_eq!(ds.get(110).unwrap().category, Category::Unknown);
    assert_eq!(ds.get(113).unwrap().category, Category::Unknown);
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

fn criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::sample::select(vec!["", "ium", "on", "HY", "x", "gen"]),
        prop::collection::btree_set(1u8..=18, 0..4),
        prop::collection::btree_set(1u8..=7, 0..3),
        prop::sample::select(MetalFilter::OPTIONS.to_vec()),
        prop::sample::select(RadioactivityFilter::OPTIONS.to_vec()),
    )
        .prop_map(|(name, groups, periods, metal, radioactivity)| FilterCriteria {
            name_query: name.to_string(),
            groups,
            periods,
            metal,
            radioactivity,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_filter_is_idempotent_and_ordered(c in criteria()) {
        let ds = dataset();
        let first = apply(ds, &c).atomic_numbers();
        let second = apply(ds, &c).atomic_numbers();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_setting_order_does_not_matter(c in criteria()) {
        let forward = FilterCriteria::default()
            .with_name(c.name_query.clone())
            .with_groups(c.groups.clone())
            .with_periods(c.periods.clone())
            .with_metal(c.metal)
            .with_radioactivity(c.radioactivity);
        let backward = FilterCriteria::default()
            .with_radioactivity(c.radioactivity)
            .with_metal(c.metal)
            .with_periods(c.periods.clone())
            .with_groups(c.groups.clone())
            .with_name(c.name_query.clone());
        let ds = dataset();
        prop_assert_eq!(apply(ds, &forward).atomic_numbers(), apply(ds, &backward).atomic_numbers());
    }

    #[test]
    fn prop_view_is_the_and_of_single_predicates(c in criteria()) {
        let ds = dataset();
        let view = apply(ds, &c);
        let singles = [
            FilterCriteria::default().with_name(c.name_query.clone()),
            FilterCriteria::default().with_groups(c.groups.clone()),
            FilterCriteria::default().with_periods(c.periods.clone()),
            FilterCriteria::default().with_metal(c.metal),
            FilterCriteria::default().with_radioactivity(c.radioactivity),
        ];
        for element in ds.elements() {
            let expected = singles.iter().all(|s| s.matches(element));
            prop_assert_eq!(view.get(element.atomic_number).is_some(), expected);
        }
        prop_assert!(view.len() <= ds.len());
    }
}

#[test]
fn test_empty_multi_selects_admit_everything() {
    let ds = dataset();
    let view = apply(ds, &FilterCriteria::default());
    assert_eq!(view.len(), 118);
    // Lanthanides without a group survive an empty group selection only.
    assert!(view.get(60).is_some());
    assert!(apply(ds, &FilterCriteria::default().with_groups([3])).get(60).is_none());
}

// ---------------------------------------------------------------------------
// Derivers
// ---------------------------------------------------------------------------

#[test]
fn test_grid_strips_hold_exactly_the_f_block() {
    let ds = dataset();
    let grid = layout(&FilteredView::all(ds));

    let lanth: Vec<u32> = grid.lanthanides.iter().map(|c| c.atomic_number).collect();
    let act: Vec<u32> = grid.actinides.iter().map(|c| c.atomic_number).collect();
    assert_eq!(lanth, LANTHANIDE_RANGE.collect::<Vec<_>>());
    assert_eq!(act, ACTINIDE_RANGE.collect::<Vec<_>>());

    assert_eq!(grid.placed().count(), 118 - 30);
    assert!(grid
        .placed()
        .all(|c| !LANTHANIDE_RANGE.contains(&c.atomic_number) && !ACTINIDE_RANGE.contains(&c.atomic_number)));
    assert_eq!(grid.cell(6, 17).unwrap().symbol, "Og");
}

#[test]
fn test_table_export_round_trips() {
    let ds = dataset();
    let view = apply(ds, &FilterCriteria::default().with_periods([2, 3]));
    let columns = [
        Field::Symbol,
        Field::Name,
        Field::Property(Property::ElectronAffinity),
        Field::Radioactive,
    ];
    let TableView::Rows(t) = table(&view, &columns, "", &ColumnConstraints::default()) else {
        panic!("expected rows");
    };
    let csv_text = t.to_csv().unwrap();

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, vec!["Symbol", "Element", "ElectronAffinity", "Radioactive"]);

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), t.len());
    assert_eq!(records.len(), 16);
    for (record, row) in records.iter().zip(&t.rows) {
        let expected: Vec<String> = (0..columns.len()).map(|i| row.cell_text(i)).collect();
        let actual: Vec<&str> = record.iter().collect();
        assert_eq!(actual, expected);
    }
    // Neon has no electron affinity: the cell stays empty, never "0".
    let neon = records.iter().find(|r| &r[0] == "Ne").unwrap();
    assert_eq!(&neon[2], "");
}

#[test]
fn test_trend_point_counts() {
    let ds = dataset();
    let view = FilteredView::all(ds);
    let absent = view
        .iter()
        .filter(|e| e.property(Property::ElectronAffinity).is_none())
        .count();
    assert!(absent > 0);

    let TrendView::Series(raw) = series(&view, &[Property::ElectronAffinity], false) else {
        panic!("expected series");
    };
    assert_eq!(raw[0].points.len(), view.len() - absent);

    let TrendView::Series(smooth) = series(&view, &[Property::ElectronAffinity], true) else {
        panic!("expected series");
    };
    assert_eq!(smooth[0].points.len(), view.len());

    let filled: Vec<f64> = view
        .iter()
        .map(|e| e.property(Property::ElectronAffinity).unwrap_or(0.0))
        .collect();
    let expected = gaussian_smooth(&filled, SMOOTHING_SIGMA);
    for ((_, got), want) in smooth[0].points.iter().zip(&expected) {
        assert_relative_eq!(*got, *want, epsilon = 1e-12);
    }
}

#[test]
fn test_scatter_requires_all_five_fields() {
    let ds = dataset();
    let view = FilteredView::all(ds);
    let request = ScatterRequest::default().with_range(1, 10);
    let ScatterView::Plot(plot) = scatter(&view, &request) else {
        panic!("expected points");
    };
    let ids: Vec<u32> = plot.points.iter().map(|p| p.atomic_number).collect();
    assert_eq!(ids, vec![1, 3, 4, 5, 6, 7, 8, 9, 10]);

    // Above 110 every element lacks at least one of the five fields.
    let heavy = ScatterRequest::default().with_range(110, 118);
    assert_eq!(scatter(&view, &heavy), ScatterView::NoDataForSelection);
}

#[test]
fn test_radar_hydrogen_and_helium() {
    let ds = dataset();
    let view = FilteredView::all(ds);

    let RadarView::Polygons(both) = radar(&view, &[1, 2], &[Property::AtomicMass, Property::Density]) else {
        panic!("expected polygons");
    };
    assert!(both.iter().all(|p| p.vertices.len() == 2));

    let RadarView::Polygons(partial) =
        radar(&view, &[1, 2], &[Property::AtomicMass, Property::Electronegativity])
    else {
        panic!("expected polygons");
    };
    assert_eq!(partial[0].vertices.len(), 2);
    assert_eq!(partial[1].vertices.len(), 1);
    assert_eq!(partial[1].label, "Helium (He)");
}

#[test]
fn test_detail_lookup() {
    let ds = dataset();
    assert_eq!(detail(ds, 119).unwrap_err(), LookupError::NotFound(119));

    let card = detail(ds, 26).unwrap();
    assert_eq!(card.element.symbol, "Fe");
    let valence = card
        .facts
        .iter()
        .find(|f| f.field == Field::Property(Property::NumberOfValence))
        .unwrap();
    assert_eq!(valence.value, Value::Absent);
    let group = card.facts.iter().find(|f| f.field == Field::Group).unwrap();
    assert_eq!(group.value, Value::Integer(8));
}
