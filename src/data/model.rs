use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Value – a single cell of the element table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, as read from a source file or projected
/// into a table. `Absent` is distinct from zero everywhere.
/// Used in `BTreeSet` whitelists downstream, so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Absent,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Absent => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Absent, Absent) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

/// Text form used for table cells, search and CSV export.
/// Booleans print as the dataset's `yes`/`no` literals; absent prints empty.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(true) => write!(f, "yes"),
            Value::Bool(false) => write!(f, "no"),
            Value::Absent => Ok(()),
        }
    }
}

impl Value {
    /// Interpret the value as a finite `f64`. Text, booleans and non-finite
    /// floats count as absent.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) if v.is_finite() => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as an integer; floats qualify only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Non-empty text content, trimmed.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Absent => None,
            other => {
                let s = other.to_string();
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Value::Absent, Value::Float)
    }
}

// ---------------------------------------------------------------------------
// Category / MetalClass
// ---------------------------------------------------------------------------

/// Detailed element class, the `Type` column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    Nonmetal,
    Halogen,
    NobleGas,
    Lanthanide,
    Actinide,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::AlkaliMetal,
        Category::AlkalineEarthMetal,
        Category::TransitionMetal,
        Category::PostTransitionMetal,
        Category::Metalloid,
        Category::Nonmetal,
        Category::Halogen,
        Category::NobleGas,
        Category::Lanthanide,
        Category::Actinide,
        Category::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::AlkaliMetal => "Alkali Metal",
            Category::AlkalineEarthMetal => "Alkaline Earth Metal",
            Category::TransitionMetal => "Transition Metal",
            Category::PostTransitionMetal => "Post-Transition Metal",
            Category::Metalloid => "Metalloid",
            Category::Nonmetal => "Nonmetal",
            Category::Halogen => "Halogen",
            Category::NobleGas => "Noble Gas",
            Category::Lanthanide => "Lanthanide",
            Category::Actinide => "Actinide",
            Category::Unknown => "Unknown",
        }
    }

    /// Parse a `Type` label, ignoring case, spaces, hyphens and underscores.
    /// Returns `None` for labels outside the enumeration.
    pub fn parse(label: &str) -> Option<Category> {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let category = match key.as_str() {
            "alkalimetal" => Category::AlkaliMetal,
            "alkalineearthmetal" => Category::AlkalineEarthMetal,
            "transitionmetal" => Category::TransitionMetal,
            // Some published tables label post-transition metals plainly "Metal".
            "posttransitionmetal" | "metal" => Category::PostTransitionMetal,
            "metalloid" => Category::Metalloid,
            "nonmetal" => Category::Nonmetal,
            "halogen" => Category::Halogen,
            "noblegas" => Category::NobleGas,
            "lanthanide" => Category::Lanthanide,
            "actinide" => Category::Actinide,
            "unknown" => Category::Unknown,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse Metal / Nonmetal / Metalloid classification used by the
/// "metal type" filter. Kept alongside [`Category`], never merged into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetalClass {
    Metal,
    Nonmetal,
    Metalloid,
    Other,
}

impl MetalClass {
    pub fn label(self) -> &'static str {
        match self {
            MetalClass::Metal => "Metal",
            MetalClass::Nonmetal => "Nonmetal",
            MetalClass::Metalloid => "Metalloid",
            MetalClass::Other => "Other",
        }
    }

    /// Fallback classification for sources without authored flag columns.
    pub fn from_category(category: Category) -> MetalClass {
        match category {
            Category::AlkaliMetal
            | Category::AlkalineEarthMetal
            | Category::TransitionMetal
            | Category::PostTransitionMetal
            | Category::Lanthanide
            | Category::Actinide => MetalClass::Metal,
            Category::Metalloid => MetalClass::Metalloid,
            Category::Nonmetal | Category::Halogen | Category::NobleGas => MetalClass::Nonmetal,
            Category::Unknown => MetalClass::Other,
        }
    }
}

impl fmt::Display for MetalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Property – the optional numeric measurements
// ---------------------------------------------------------------------------

/// Optional numeric property of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    AtomicMass,
    Electronegativity,
    IonizationEnergy,
    ElectronAffinity,
    Density,
    MeltingPoint,
    BoilingPoint,
    NumberOfShells,
    NumberOfValence,
}

impl Property {
    pub const ALL: [Property; 9] = [
        Property::AtomicMass,
        Property::Electronegativity,
        Property::IonizationEnergy,
        Property::ElectronAffinity,
        Property::Density,
        Property::MeltingPoint,
        Property::BoilingPoint,
        Property::NumberOfShells,
        Property::NumberOfValence,
    ];

    /// Canonical column header.
    pub fn column_name(self) -> &'static str {
        match self {
            Property::AtomicMass => "AtomicMass",
            Property::Electronegativity => "Electronegativity",
            Property::IonizationEnergy => "IonizationEnergy",
            Property::ElectronAffinity => "ElectronAffinity",
            Property::Density => "Density",
            Property::MeltingPoint => "MeltingPoint",
            Property::BoilingPoint => "BoilingPoint",
            Property::NumberOfShells => "NumberofShells",
            Property::NumberOfValence => "NumberofValence",
        }
    }

    /// Alternative headers found in published versions of the table.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Property::AtomicMass => &["Mass"],
            Property::IonizationEnergy => &["FirstIonization"],
            _ => &[],
        }
    }

    pub fn from_column_name(name: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| {
            p.column_name().eq_ignore_ascii_case(name)
                || p.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Property::AtomicMass => "Atomic Mass",
            Property::Electronegativity => "Electronegativity",
            Property::IonizationEnergy => "Ionization Energy",
            Property::ElectronAffinity => "Electron Affinity",
            Property::Density => "Density",
            Property::MeltingPoint => "Melting Point",
            Property::BoilingPoint => "Boiling Point",
            Property::NumberOfShells => "Number of Shells",
            Property::NumberOfValence => "Valence Electrons",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Property::AtomicMass => Some("g/mol"),
            Property::IonizationEnergy | Property::ElectronAffinity => Some("eV"),
            Property::Density => Some("g/cm³"),
            Property::MeltingPoint | Property::BoilingPoint => Some("K"),
            _ => None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Field – the fixed, typed schema of an element row
// ---------------------------------------------------------------------------

/// How a field behaves in tables and constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
    Text,
}

/// One column of the element schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    AtomicNumber,
    Name,
    Symbol,
    Group,
    Period,
    Phase,
    Category,
    MetalClass,
    Radioactive,
    Property(Property),
}

impl Field {
    pub const ALL: [Field; 18] = [
        Field::AtomicNumber,
        Field::Name,
        Field::Symbol,
        Field::Group,
        Field::Period,
        Field::Phase,
        Field::Category,
        Field::MetalClass,
        Field::Radioactive,
        Field::Property(Property::AtomicMass),
        Field::Property(Property::Electronegativity),
        Field::Property(Property::IonizationEnergy),
        Field::Property(Property::ElectronAffinity),
        Field::Property(Property::Density),
        Field::Property(Property::MeltingPoint),
        Field::Property(Property::BoilingPoint),
        Field::Property(Property::NumberOfShells),
        Field::Property(Property::NumberOfValence),
    ];

    /// Column header, as used in source files and exports.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::AtomicNumber => "AtomicNumber",
            Field::Name => "Element",
            Field::Symbol => "Symbol",
            Field::Group => "Group",
            Field::Period => "Period",
            Field::Phase => "Phase",
            Field::Category => "Type",
            Field::MetalClass => "MetalType",
            Field::Radioactive => "Radioactive",
            Field::Property(p) => p.column_name(),
        }
    }

    pub fn from_column_name(name: &str) -> Option<Field> {
        if name.eq_ignore_ascii_case("Name") {
            return Some(Field::Name);
        }
        Field::ALL
            .into_iter()
            .find(|f| f.column_name().eq_ignore_ascii_case(name))
            .or_else(|| Property::from_column_name(name).map(Field::Property))
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::AtomicNumber | Field::Group | Field::Period | Field::Property(_) => {
                FieldKind::Numeric
            }
            Field::Phase | Field::Category | Field::MetalClass | Field::Radioactive => {
                FieldKind::Categorical
            }
            Field::Name | Field::Symbol => FieldKind::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::AtomicNumber => "Atomic Number",
            Field::Name => "Element",
            Field::Symbol => "Symbol",
            Field::Group => "Group",
            Field::Period => "Period",
            Field::Phase => "Phase",
            Field::Category => "Type",
            Field::MetalClass => "Metal Type",
            Field::Radioactive => "Radioactive",
            Field::Property(p) => p.label(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Element – one row of the dataset
// ---------------------------------------------------------------------------

/// A single chemical element. `atomic_number` is the stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub atomic_number: u32,
    pub name: String,
    pub symbol: String,
    /// 1–18, absent for most lanthanides and actinides.
    pub group: Option<u8>,
    pub period: u8,
    pub phase: Option<String>,
    pub category: Category,
    pub metal_class: MetalClass,
    pub radioactive: bool,
    /// Present numeric properties only; a missing key means absent.
    pub properties: BTreeMap<Property, f64>,
}

impl Element {
    pub fn property(&self, property: Property) -> Option<f64> {
        self.properties.get(&property).copied()
    }

    /// Project one schema field as a cell value.
    pub fn value(&self, field: Field) -> Value {
        match field {
            Field::AtomicNumber => Value::Integer(i64::from(self.atomic_number)),
            Field::Name => Value::Text(self.name.clone()),
            Field::Symbol => Value::Text(self.symbol.clone()),
            Field::Group => self
                .group
                .map_or(Value::Absent, |g| Value::Integer(i64::from(g))),
            Field::Period => Value::Integer(i64::from(self.period)),
            Field::Phase => self
                .phase
                .as_ref()
                .map_or(Value::Absent, |p| Value::Text(p.clone())),
            Field::Category => Value::Text(self.category.label().to_string()),
            Field::MetalClass => Value::Text(self.metal_class.label().to_string()),
            Field::Radioactive => Value::Bool(self.radioactive),
            Field::Property(p) => self.property(p).into(),
        }
    }

    /// Numeric view of a field, `None` when absent or non-numeric.
    pub fn numeric(&self, field: Field) -> Option<f64> {
        self.value(field).as_f64()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable element table, ordered by ascending atomic number.
#[derive(Debug, Clone)]
pub struct Dataset {
    elements: Vec<Element>,
    /// Properties with at least one present value.
    observed_properties: BTreeSet<Property>,
}

impl Dataset {
    /// Sort by atomic number and validate identity uniqueness.
    pub fn from_elements(mut elements: Vec<Element>) -> Result<Self, DataLoadError> {
        if elements.is_empty() {
            return Err(DataLoadError::Empty);
        }
        elements.sort_by_key(|e| e.atomic_number);
        if let Some(pair) = elements
            .windows(2)
            .find(|w| w[0].atomic_number == w[1].atomic_number)
        {
            return Err(DataLoadError::DuplicateAtomicNumber(pair[0].atomic_number));
        }

        let observed_properties = elements
            .iter()
            .flat_map(|e| e.properties.keys().copied())
            .collect();

        Ok(Dataset {
            elements,
            observed_properties,
        })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, atomic_number: u32) -> Option<&Element> {
        self.elements
            .binary_search_by_key(&atomic_number, |e| e.atomic_number)
            .ok()
            .map(|i| &self.elements[i])
    }

    /// Numeric properties that carry data, in schema order.
    pub fn observed_properties(&self) -> Vec<Property> {
        self.observed_properties.iter().copied().collect()
    }

    /// Distinct groups present, ascending.
    pub fn groups(&self) -> Vec<u8> {
        let set: BTreeSet<u8> = self.elements.iter().filter_map(|e| e.group).collect();
        set.into_iter().collect()
    }

    /// Distinct periods present, ascending.
    pub fn periods(&self) -> Vec<u8> {
        let set: BTreeSet<u8> = self.elements.iter().map(|e| e.period).collect();
        set.into_iter().collect()
    }

    /// Smallest and largest atomic number.
    pub fn atomic_number_bounds(&self) -> (u32, u32) {
        let first = self.elements.first().map_or(0, |e| e.atomic_number);
        let last = self.elements.last().map_or(0, |e| e.atomic_number);
        (first, last)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
