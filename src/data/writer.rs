use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field as ArrowField, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{Dataset, MetalClass, Property};
use crate::error::DataLoadError;

/// Build one flat record batch from the dataset.
///
/// The coarse metal class is written as the authored `Metal` / `Nonmetal` /
/// `Metalloid` flag columns so that reading the file back preserves it.
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch, DataLoadError> {
    let elements = dataset.elements();

    let text = |f: &dyn Fn(usize) -> Option<String>| -> ArrayRef {
        Arc::new((0..elements.len()).map(f).collect::<StringArray>())
    };
    let flag = |class: MetalClass| -> ArrayRef {
        text(&|i| (elements[i].metal_class == class).then(|| "yes".to_string()))
    };

    let mut fields = vec![
        ArrowField::new("AtomicNumber", DataType::Int64, false),
        ArrowField::new("Element", DataType::Utf8, false),
        ArrowField::new("Symbol", DataType::Utf8, false),
        ArrowField::new("Group", DataType::Int64, true),
        ArrowField::new("Period", DataType::Int64, false),
        ArrowField::new("Phase", DataType::Utf8, true),
        ArrowField::new("Type", DataType::Utf8, true),
        ArrowField::new("Radioactive", DataType::Utf8, false),
        ArrowField::new("Metal", DataType::Utf8, true),
        ArrowField::new("Nonmetal", DataType::Utf8, true),
        ArrowField::new("Metalloid", DataType::Utf8, true),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(
            elements.iter().map(|e| i64::from(e.atomic_number)).collect::<Vec<_>>(),
        )),
        text(&|i| Some(elements[i].name.clone())),
        text(&|i| Some(elements[i].symbol.clone())),
        Arc::new(Int64Array::from(
            elements.iter().map(|e| e.group.map(i64::from)).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            elements.iter().map(|e| i64::from(e.period)).collect::<Vec<_>>(),
        )),
        text(&|i| elements[i].phase.clone()),
        text(&|i| Some(elements[i].category.label().to_string())),
        text(&|i| Some(if elements[i].radioactive { "yes" } else { "no" }.to_string())),
        flag(MetalClass::Metal),
        flag(MetalClass::Nonmetal),
        flag(MetalClass::Metalloid),
    ];

    for property in Property::ALL {
        fields.push(ArrowField::new(property.column_name(), DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(
            elements.iter().map(|e| e.property(property)).collect::<Vec<_>>(),
        )));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Write the dataset as a single-batch Parquet file.
pub fn write_parquet<W: Write + Send>(dataset: &Dataset, sink: W) -> Result<(), DataLoadError> {
    let batch = to_record_batch(dataset)?;
    let mut writer = ArrowWriter::try_new(sink, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_csv_reader, load_file};
    use crate::data::model::Category;

    const CSV: &str = "AtomicNumber,Element,Symbol,Period,Group,Type,Radioactive,Metal,Nonmetal,Metalloid,Density,Phase\n\
                       1,Hydrogen,H,1,1,Nonmetal,no,,yes,,0.0000899,gas\n\
                       58,Cerium,Ce,6,,Lanthanide,no,yes,,,6.77,solid\n\
                       84,Polonium,Po,6,16,Metalloid,yes,,,yes,,solid";

    #[test]
    fn test_parquet_round_trip_preserves_absence_and_class() {
        let original = load_csv_reader(CSV.as_bytes()).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        write_parquet(&original, file.reopen().unwrap()).unwrap();

        let reloaded = load_file(file.path()).unwrap();
        assert_eq!(reloaded.len(), 3);
        for (a, b) in original.elements().iter().zip(reloaded.elements()) {
            assert_eq!(a, b);
        }
        let ce = reloaded.get(58).unwrap();
        assert_eq!(ce.group, None);
        assert_eq!(ce.category, Category::Lanthanide);
        assert_eq!(reloaded.get(84).unwrap().property(Property::Density), None);
    }

    #[test]
    fn test_record_batch_has_one_column_per_field() {
        let ds = load_csv_reader(CSV.as_bytes()).unwrap();
        let batch = to_record_batch(&ds).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 11 + Property::ALL.len());
    }
}
