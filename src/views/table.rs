use std::collections::BTreeSet;
use std::io::Write;

use crate::data::filter::{ColumnConstraints, FilteredView};
use crate::data::model::{Field, FieldKind, Value};
use crate::error::ExportError;

/// Categorical columns with at most this many distinct values get a
/// whitelist control; wider ones are left unconstrained.
pub const LOW_CARDINALITY_LIMIT: usize = 10;

/// Suggested file name for exported tables.
pub const EXPORT_FILE_NAME: &str = "filtered_periodic_table.csv";

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub atomic_number: u32,
    /// One value per selected column, in column order.
    pub cells: Vec<Value>,
    pub highlight_radioactive: bool,
}

impl TableRow {
    pub fn cell_text(&self, column: usize) -> String {
        self.cells.get(column).map(Value::to_string).unwrap_or_default()
    }

    /// All cell texts joined by single spaces; what the search box matches.
    fn search_text(&self) -> String {
        self.cells
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The projected, filtered rows of the table view.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Field>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the rows as CSV with a header of the selected column names.
    pub fn write_csv<W: Write>(&self, sink: W) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(self.columns.iter().map(|f| f.column_name()))?;
        for row in &self.rows {
            writer.write_record(row.cells.iter().map(Value::to_string))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    /// No column selected; nothing to project.
    EmptySelection,
    Rows(Table),
}

// ---------------------------------------------------------------------------
// Deriver
// ---------------------------------------------------------------------------

/// Project the filtered view onto `columns`, keep the rows that pass the
/// column constraints and contain `search` (case-insensitive) anywhere in
/// their joined cell text.
///
/// Constraints on columns that are not selected are ignored.
pub fn table(
    view: &FilteredView<'_>,
    columns: &[Field],
    search: &str,
    constraints: &ColumnConstraints,
) -> TableView {
    if columns.is_empty() {
        return TableView::EmptySelection;
    }

    let needle = search.trim().to_lowercase();
    let rows = view
        .iter()
        .filter(|e| constraints.matches_on(e, columns))
        .map(|e| TableRow {
            atomic_number: e.atomic_number,
            cells: columns.iter().map(|f| e.value(*f)).collect(),
            highlight_radioactive: e.radioactive,
        })
        .filter(|row| needle.is_empty() || row.search_text().to_lowercase().contains(&needle))
        .collect();

    TableView::Rows(Table {
        columns: columns.to_vec(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// Constraint domains
// ---------------------------------------------------------------------------

/// The observed domain of a column over a view, used to seed its control.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDomain {
    /// Numeric column: smallest and largest present value.
    Range { min: f64, max: f64 },
    /// Low-cardinality column: every distinct present value.
    Values(BTreeSet<Value>),
    /// No present values, or too many distinct ones to pick from.
    Unconstrained,
}

pub fn column_domain(view: &FilteredView<'_>, field: Field) -> ColumnDomain {
    match field.kind() {
        FieldKind::Numeric => {
            let (min, max) = view
                .iter()
                .filter_map(|e| e.numeric(field))
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            if min <= max {
                ColumnDomain::Range { min, max }
            } else {
                ColumnDomain::Unconstrained
            }
        }
        FieldKind::Categorical | FieldKind::Text => {
            let values: BTreeSet<Value> = view
                .iter()
                .map(|e| e.value(field))
                .filter(|v| !v.is_absent())
                .collect();
            if values.is_empty() || values.len() > LOW_CARDINALITY_LIMIT {
                ColumnDomain::Unconstrained
            } else {
                ColumnDomain::Values(values)
            }
        }
    }
}
