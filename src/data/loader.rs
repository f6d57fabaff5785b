use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Category, Dataset, Element, Field, MetalClass, Property, Value};
use crate::error::DataLoadError;

/// Columns every source must provide.
pub const REQUIRED_FIELDS: [Field; 7] = [
    Field::Name,
    Field::Symbol,
    Field::AtomicNumber,
    Field::Group,
    Field::Period,
    Field::Category,
    Field::Radioactive,
];

/// One source row: column header → raw cell.
type RawRow = BTreeMap<String, Value>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the element table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one row per element (the reference format)
/// * `.json`    – `[{ "AtomicNumber": 1, "Element": "Hydrogen", ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv_reader(std::fs::File::open(path)?)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} elements from {} ({} properties with data)",
        dataset.len(),
        path.display(),
        dataset.observed_properties().len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a CSV element table from any reader.
///
/// Required headers: `Element, Symbol, AtomicNumber, Group, Period, Type,
/// Radioactive`. Recognised property headers become numeric properties; the
/// optional `Metal`/`Nonmetal`/`Metalloid` flag columns drive the coarse
/// metal class. Anything else is ignored.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, cell)| (h.clone(), guess_value_type(cell)))
            .collect();
        rows.push(row);
    }

    build_dataset(&headers, rows)
}

fn guess_value_type(s: &str) -> Value {
    if s.is_empty() {
        return Value::Absent;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "AtomicNumber": 1, "Element": "Hydrogen", "Symbol": "H", "Group": 1, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, DataLoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or_else(|| DataLoadError::MalformedRow {
        row: 0,
        message: "expected a top-level JSON array of records".into(),
    })?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| DataLoadError::MalformedRow {
            row: i,
            message: "record is not a JSON object".into(),
        })?;

        let mut row = RawRow::new();
        for (key, val) in obj {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
            row.insert(key.clone(), json_to_value(val));
        }
        rows.push(row);
    }

    build_dataset(&headers, rows)
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => guess_value_type(s.trim()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Absent,
        other => Value::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by **Pandas** (`df.to_parquet()`), **Polars**
/// (`df.write_parquet()`) and by the `convert-dataset` tool.
fn load_parquet(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let raw: RawRow = headers
                .iter()
                .enumerate()
                .map(|(col_idx, name)| (name.clone(), extract_value(batch.column(col_idx), row)))
                .collect();
            rows.push(raw);
        }
    }

    build_dataset(&headers, rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Absent;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map_or(Value::Absent, |s| guess_value_type(s.value(row).trim())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map_or(Value::Absent, |s| guess_value_type(s.value(row).trim())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(Value::Absent, |a| Value::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(Value::Absent, |a| Value::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(Value::Absent, |a| Value::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(Value::Absent, |a| Value::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(Value::Absent, |a| Value::Bool(a.value(row))),
        other => {
            log::debug!("Unsupported parquet column type {other:?}, treating cell as absent");
            Value::Absent
        }
    }
}

// ---------------------------------------------------------------------------
// Normalisation: raw rows → Elements
// ---------------------------------------------------------------------------

/// Which header feeds which field.
struct ColumnMap {
    fields: BTreeMap<Field, String>,
    /// Authored Metal / Nonmetal / Metalloid flag columns.
    flags: BTreeMap<MetalClass, String>,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self, DataLoadError> {
        let mut fields = BTreeMap::new();
        let mut flags = BTreeMap::new();

        for header in headers {
            let flag = [MetalClass::Metal, MetalClass::Nonmetal, MetalClass::Metalloid]
                .into_iter()
                .find(|c| c.label().eq_ignore_ascii_case(header));
            if let Some(class) = flag {
                flags.insert(class, header.clone());
                continue;
            }
            match Field::from_column_name(header) {
                // MetalType is derived; sources express it through the flag columns.
                Some(Field::MetalClass) | None => {
                    log::debug!("Ignoring column '{header}'");
                }
                Some(field) => {
                    fields.entry(field).or_insert_with(|| header.clone());
                }
            }
        }

        for required in REQUIRED_FIELDS {
            if !fields.contains_key(&required) {
                return Err(DataLoadError::MissingColumn(required.column_name()));
            }
        }

        Ok(ColumnMap { fields, flags })
    }

    fn cell(&self, row: &RawRow, field: Field) -> Value {
        self.fields
            .get(&field)
            .and_then(|h| row.get(h))
            .cloned()
            .unwrap_or(Value::Absent)
    }

    fn flag_set(&self, row: &RawRow, class: MetalClass) -> bool {
        self.flags
            .get(&class)
            .and_then(|h| row.get(h))
            .and_then(Value::as_text)
            .is_some_and(|s| s.eq_ignore_ascii_case("yes"))
    }
}

fn build_dataset(headers: &[String], rows: Vec<RawRow>) -> Result<Dataset, DataLoadError> {
    let columns = ColumnMap::resolve(headers)?;
    let elements = rows
        .iter()
        .enumerate()
        .map(|(i, row)| element_from_row(&columns, i + 1, row))
        .collect::<Result<Vec<_>, _>>()?;
    Dataset::from_elements(elements)
}

fn element_from_row(columns: &ColumnMap, row_no: usize, row: &RawRow) -> Result<Element, DataLoadError> {
    let malformed = |message: String| DataLoadError::MalformedRow {
        row: row_no,
        message,
    };

    let atomic_number = columns
        .cell(row, Field::AtomicNumber)
        .as_i64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| malformed("AtomicNumber is not a positive integer".into()))?;

    let period = columns
        .cell(row, Field::Period)
        .as_i64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| malformed(format!("Period of element {atomic_number} is not an integer")))?;

    let name = columns
        .cell(row, Field::Name)
        .as_text()
        .ok_or_else(|| malformed(format!("element {atomic_number} has no name")))?;
    let symbol = columns
        .cell(row, Field::Symbol)
        .as_text()
        .ok_or_else(|| malformed(format!("element {atomic_number} has no symbol")))?;

    let group = columns
        .cell(row, Field::Group)
        .as_i64()
        .and_then(|g| u8::try_from(g).ok());

    let category = match columns.cell(row, Field::Category).as_text() {
        None => Category::Unknown,
        Some(label) => Category::parse(&label).unwrap_or_else(|| {
            log::debug!("Unrecognised Type '{label}' for {name}, using Unknown");
            Category::Unknown
        }),
    };

    let metal_class = if columns.flags.is_empty() {
        MetalClass::from_category(category)
    } else if columns.flag_set(row, MetalClass::Metalloid) {
        MetalClass::Metalloid
    } else if columns.flag_set(row, MetalClass::Nonmetal) {
        MetalClass::Nonmetal
    } else if columns.flag_set(row, MetalClass::Metal) {
        MetalClass::Metal
    } else {
        MetalClass::Other
    };

    let radioactive = columns
        .cell(row, Field::Radioactive)
        .as_text()
        .is_some_and(|s| s.eq_ignore_ascii_case("yes"));

    let properties = Property::ALL
        .into_iter()
        .filter_map(|p| {
            columns
                .cell(row, Field::Property(p))
                .as_f64()
                .map(|v| (p, v))
        })
        .collect();

    Ok(Element {
        atomic_number,
        name,
        symbol,
        group,
        period,
        phase: columns.cell(row, Field::Phase).as_text(),
        category,
        metal_class,
        radioactive,
        properties,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str =
        "AtomicNumber,Element,Symbol,AtomicMass,Period,Group,Radioactive,Metal,Nonmetal,Metalloid,Type,Density";

    fn load(body: &str) -> Result<Dataset, DataLoadError> {
        load_csv_reader(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn test_csv_absent_values_stay_absent() {
        let ds = load("2,Helium,He,4.002,1,18,no,,yes,,Noble Gas,\n1,Hydrogen,H,1.007,1,1,no,,yes,,Nonmetal,0").unwrap();
        let hydrogen = ds.get(1).unwrap();
        let helium = ds.get(2).unwrap();
        assert_eq!(hydrogen.property(Property::Density), Some(0.0));
        assert_eq!(helium.property(Property::Density), None);
        assert_eq!(ds.elements()[0].atomic_number, 1);
    }

    #[test]
    fn test_csv_unparseable_number_becomes_absent() {
        let ds = load("26,Iron,Fe,unknown,4,8,no,yes,,,Transition Metal,7.874").unwrap();
        let iron = ds.get(26).unwrap();
        assert_eq!(iron.property(Property::AtomicMass), None);
        assert_eq!(iron.property(Property::Density), Some(7.874));
        assert_eq!(iron.metal_class, MetalClass::Metal);
    }

    #[test]
    fn test_missing_category_defaults_to_unknown() {
        let ds = load("113,Nihonium,Nh,284,7,13,yes,,,,,").unwrap();
        let nh = ds.get(113).unwrap();
        assert_eq!(nh.category, Category::Unknown);
        assert_eq!(nh.metal_class, MetalClass::Other);
        assert!(nh.radioactive);
    }

    #[test]
    fn test_missing_group_is_allowed() {
        let ds = load("58,Cerium,Ce,140.116,6,,no,yes,,,Lanthanide,6.77").unwrap();
        assert_eq!(ds.get(58).unwrap().group, None);
    }

    #[test]
    fn test_missing_required_column_is_reported() {
        let csv = "AtomicNumber,Element,Symbol,Period,Group,Type\n1,Hydrogen,H,1,1,Nonmetal";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn("Radioactive")));
    }

    #[test]
    fn test_bad_period_is_malformed_row() {
        let err = load("1,Hydrogen,H,1.007,first,1,no,,yes,,Nonmetal,0").unwrap_err();
        assert!(matches!(err, DataLoadError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn test_metal_class_derived_without_flag_columns() {
        let csv = "AtomicNumber,Element,Symbol,Period,Group,Type,Radioactive\n\
                   9,Fluorine,F,2,17,Halogen,no\n\
                   14,Silicon,Si,3,14,Metalloid,no";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.get(9).unwrap().metal_class, MetalClass::Nonmetal);
        assert_eq!(ds.get(14).unwrap().metal_class, MetalClass::Metalloid);
    }

    #[test]
    fn test_authored_flags_win_over_category() {
        // Flag says metalloid even though the Type column says Nonmetal.
        let ds = load("34,Selenium,Se,78.96,4,16,no,,,yes,Nonmetal,4.809").unwrap();
        let se = ds.get(34).unwrap();
        assert_eq!(se.category, Category::Nonmetal);
        assert_eq!(se.metal_class, MetalClass::Metalloid);
    }

    #[test]
    fn test_file_not_found_and_unsupported_extension() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));

        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "irrelevant").unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn test_json_records_load() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[
                {{"AtomicNumber": 1, "Element": "Hydrogen", "Symbol": "H", "Group": 1, "Period": 1,
                  "Type": "Nonmetal", "Radioactive": "no", "FirstIonization": 13.5984}},
                {{"AtomicNumber": 43, "Element": "Technetium", "Symbol": "Tc", "Group": 7, "Period": 5,
                  "Type": "Transition Metal", "Radioactive": "yes", "FirstIonization": null}}
            ]"#
        )
        .unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).unwrap().property(Property::IonizationEnergy), Some(13.5984));
        let tc = ds.get(43).unwrap();
        assert!(tc.radioactive);
        assert_eq!(tc.property(Property::IonizationEnergy), None);
        assert_eq!(tc.metal_class, MetalClass::Metal);
    }

    #[test]
    fn test_json_missing_required_key() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"AtomicNumber": 1, "Element": "Hydrogen"}}]"#).unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(_)));
    }
}
