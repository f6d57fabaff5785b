use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, Element, Field, MetalClass, Value};

// ---------------------------------------------------------------------------
// Filter criteria: the sidebar selections as one immutable value
// ---------------------------------------------------------------------------

/// Single-select "metal type" control. `All` means no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetalFilter {
    #[default]
    All,
    Metal,
    Nonmetal,
    Metalloid,
}

impl MetalFilter {
    pub const OPTIONS: [MetalFilter; 4] = [
        MetalFilter::All,
        MetalFilter::Metal,
        MetalFilter::Nonmetal,
        MetalFilter::Metalloid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetalFilter::All => "All",
            MetalFilter::Metal => "Metal",
            MetalFilter::Nonmetal => "Nonmetal",
            MetalFilter::Metalloid => "Metalloid",
        }
    }

    fn accepts(self, class: MetalClass) -> bool {
        match self {
            MetalFilter::All => true,
            MetalFilter::Metal => class == MetalClass::Metal,
            MetalFilter::Nonmetal => class == MetalClass::Nonmetal,
            MetalFilter::Metalloid => class == MetalClass::Metalloid,
        }
    }
}

/// Single-select radioactivity control. `All` means no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadioactivityFilter {
    #[default]
    All,
    Radioactive,
    NonRadioactive,
}

impl RadioactivityFilter {
    pub const OPTIONS: [RadioactivityFilter; 3] = [
        RadioactivityFilter::All,
        RadioactivityFilter::Radioactive,
        RadioactivityFilter::NonRadioactive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RadioactivityFilter::All => "All",
            RadioactivityFilter::Radioactive => "Radioactive",
            RadioactivityFilter::NonRadioactive => "Non-Radioactive",
        }
    }

    fn accepts(self, radioactive: bool) -> bool {
        match self {
            RadioactivityFilter::All => true,
            RadioactivityFilter::Radioactive => radioactive,
            RadioactivityFilter::NonRadioactive => !radioactive,
        }
    }
}

/// Global filter selections shared by every view.
///
/// All active predicates are AND-ed; within the group and period sets
/// membership is OR. An empty set or empty name query is no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub name_query: String,
    pub groups: BTreeSet<u8>,
    pub periods: BTreeSet<u8>,
    pub metal: MetalFilter,
    pub radioactivity: RadioactivityFilter,
}

impl FilterCriteria {
    pub fn with_name(mut self, query: impl Into<String>) -> Self {
        self.name_query = query.into();
        self
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = u8>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    pub fn with_periods(mut self, periods: impl IntoIterator<Item = u8>) -> Self {
        self.periods = periods.into_iter().collect();
        self
    }

    pub fn with_metal(mut self, metal: MetalFilter) -> Self {
        self.metal = metal;
        self
    }

    pub fn with_radioactivity(mut self, radioactivity: RadioactivityFilter) -> Self {
        self.radioactivity = radioactivity;
        self
    }

    /// Whether no predicate is active.
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Whether one element passes every active predicate.
    pub fn matches(&self, element: &Element) -> bool {
        self.matches_name(element)
            && (self.groups.is_empty()
                || element.group.is_some_and(|g| self.groups.contains(&g)))
            && (self.periods.is_empty() || self.periods.contains(&element.period))
            && self.metal.accepts(element.metal_class)
            && self.radioactivity.accepts(element.radioactive)
    }

    fn matches_name(&self, element: &Element) -> bool {
        self.name_query.is_empty()
            || element
                .name
                .to_lowercase()
                .contains(&self.name_query.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The ordered subsequence of the dataset passing the current criteria.
/// Borrows from the dataset; rebuilt on every interaction.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    elements: Vec<&'a Element>,
}

impl<'a> FilteredView<'a> {
    /// The unfiltered view.
    pub fn all(dataset: &'a Dataset) -> Self {
        FilteredView {
            elements: dataset.elements().iter().collect(),
        }
    }

    pub fn elements(&self) -> &[&'a Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Element> + '_ {
        self.elements.iter().copied()
    }

    pub fn get(&self, atomic_number: u32) -> Option<&'a Element> {
        self.iter().find(|e| e.atomic_number == atomic_number)
    }

    pub fn atomic_numbers(&self) -> Vec<u32> {
        self.iter().map(|e| e.atomic_number).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Return the elements that pass all active filters, in dataset order.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView {
        elements: dataset
            .elements()
            .iter()
            .filter(|e| criteria.matches(e))
            .collect(),
    }
}

/// Anything elements can be looked up in by atomic number.
pub trait ElementSource {
    fn find(&self, atomic_number: u32) -> Option<&Element>;
}

impl ElementSource for Dataset {
    fn find(&self, atomic_number: u32) -> Option<&Element> {
        self.get(atomic_number)
    }
}

impl ElementSource for FilteredView<'_> {
    fn find(&self, atomic_number: u32) -> Option<&Element> {
        self.get(atomic_number)
    }
}

// ---------------------------------------------------------------------------
// Per-view column constraints
// ---------------------------------------------------------------------------

/// A constraint on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    /// Inclusive numeric range.
    Range { min: f64, max: f64 },
    /// Accepted values of a low-cardinality column.
    OneOf(BTreeSet<Value>),
}

impl ColumnConstraint {
    /// Absent values fail every explicit constraint.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ColumnConstraint::Range { min, max } => value
                .as_f64()
                .is_some_and(|v| *min <= v && v <= *max),
            ColumnConstraint::OneOf(accepted) => !value.is_absent() && accepted.contains(value),
        }
    }
}

/// Column constraints keyed by field. A field without an entry is
/// unconstrained; constraints on different fields are AND-ed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnConstraints {
    constraints: BTreeMap<Field, ColumnConstraint>,
}

impl ColumnConstraints {
    pub fn set(&mut self, field: Field, constraint: ColumnConstraint) {
        self.constraints.insert(field, constraint);
    }

    pub fn with(mut self, field: Field, constraint: ColumnConstraint) -> Self {
        self.set(field, constraint);
        self
    }

    pub fn clear(&mut self, field: Field) {
        self.constraints.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&ColumnConstraint> {
        self.constraints.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Check the constraints on `columns` only; others are ignored.
    pub fn matches_on(&self, element: &Element, columns: &[Field]) -> bool {
        columns.iter().all(|field| {
            self.constraints
                .get(field)
                .map_or(true, |c| c.accepts(&element.value(*field)))
        })
    }
}
