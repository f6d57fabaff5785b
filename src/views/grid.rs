use std::ops::RangeInclusive;

use eframe::egui::Color32;

use crate::color::category_color;
use crate::data::filter::FilteredView;
use crate::data::model::{Category, Element};

pub const GRID_ROWS: usize = 7;
pub const GRID_COLUMNS: usize = 18;

/// Atomic numbers drawn in the lanthanide strip instead of the main grid.
pub const LANTHANIDE_RANGE: RangeInclusive<u32> = 57..=71;
/// Atomic numbers drawn in the actinide strip instead of the main grid.
pub const ACTINIDE_RANGE: RangeInclusive<u32> = 89..=103;

/// One populated periodic-table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    pub color: Color32,
}

impl GridCell {
    fn new(element: &Element, color: Color32) -> Self {
        GridCell {
            atomic_number: element.atomic_number,
            symbol: element.symbol.clone(),
            name: element.name.clone(),
            color,
        }
    }
}

/// The 7 × 18 main grid plus the two f-block strips.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Row-major, `GRID_ROWS * GRID_COLUMNS` slots.
    cells: Vec<Option<GridCell>>,
    pub lanthanides: Vec<GridCell>,
    pub actinides: Vec<GridCell>,
}

impl GridLayout {
    /// Cell at zero-based `(row, column)`, i.e. `(period - 1, group - 1)`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        if row >= GRID_ROWS || column >= GRID_COLUMNS {
            return None;
        }
        self.cells[row * GRID_COLUMNS + column].as_ref()
    }

    /// Rows of the main grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<GridCell>]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    /// Populated cells of the main grid, row-major.
    pub fn placed(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flatten()
    }
}

/// Place the filtered elements on the periodic table.
///
/// f-block atomic numbers always go to their strip, ordered by atomic
/// number, whatever their group. Everything else needs both a group and a
/// period in range. Out-of-range positions are skipped and a second element
/// landing on an occupied cell replaces the first.
pub fn layout(view: &FilteredView<'_>) -> GridLayout {
    let mut grid = GridLayout {
        cells: vec![None; GRID_ROWS * GRID_COLUMNS],
        lanthanides: Vec::new(),
        actinides: Vec::new(),
    };

    // The view is ordered by atomic number, so the strips come out sorted.
    for element in view.iter() {
        let n = element.atomic_number;
        if LANTHANIDE_RANGE.contains(&n) {
            grid.lanthanides
                .push(GridCell::new(element, category_color(Category::Lanthanide)));
            continue;
        }
        if ACTINIDE_RANGE.contains(&n) {
            grid.actinides
                .push(GridCell::new(element, category_color(Category::Actinide)));
            continue;
        }

        let Some(group) = element.group else {
            continue;
        };
        let (row, column) = (usize::from(element.period), usize::from(group));
        if !(1..=GRID_ROWS).contains(&row) || !(1..=GRID_COLUMNS).contains(&column) {
            log::warn!(
                "{} (Z={n}) has period {row} / group {column}, outside the grid; skipped",
                element.name
            );
            continue;
        }

        let slot = &mut grid.cells[(row - 1) * GRID_COLUMNS + (column - 1)];
        if let Some(previous) = slot {
            log::warn!(
                "{} (Z={n}) replaces {} at period {row}, group {column}",
                element.name,
                previous.name
            );
        }
        *slot = Some(GridCell::new(element, category_color(element.category)));
    }

    grid
}
