//! File-based configuration loader
//!
//! Assumptions come from a JSON document, field ranges from a `field,min,max` CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Assumptions, FieldRange, RangeTable};
use crate::calculator::Field;
use crate::error::ConfigError;

/// Default path to the assumptions document
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "config/calculators.json";

/// Default path to the range table
pub const DEFAULT_RANGES_PATH: &str = "config/ranges.csv";

/// Raw CSV row of the range table
#[derive(Debug, serde::Deserialize)]
struct RangeRow {
    field: String,
    min: f64,
    max: f64,
}

/// Load assumptions from a JSON file
///
/// Keys missing from the document keep their built-in values.
pub fn load_assumptions(path: &Path) -> Result<Assumptions, ConfigError> {
    let mut raw = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut raw))
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let assumptions: Assumptions =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    assumptions.check()?;
    Ok(assumptions)
}

/// Load range overrides from a CSV file on top of the built-in table
pub fn load_ranges(path: &Path) -> Result<RangeTable, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_ranges_from_reader(file)
}

/// Load range overrides from any reader (e.g., string buffer)
pub fn load_ranges_from_reader<R: Read>(reader: R) -> Result<RangeTable, ConfigError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut table = RangeTable::default();

    for result in csv_reader.deserialize() {
        let row: RangeRow = result?;
        let field: Field = row.field.parse()?;
        table.set(field, FieldRange::new(row.min, row.max))?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_ranges_overrides_only_listed_fields() {
        let csv = "field,min,max\ndurationYears,1,40\nstepUpPercent, 0 , 25\n";
        let table = load_ranges_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.get(Field::DurationYears), FieldRange::new(1.0, 40.0));
        assert_eq!(table.get(Field::StepUpPercent), FieldRange::new(0.0, 25.0));
        assert_eq!(
            table.get(Field::Principal),
            RangeTable::default().get(Field::Principal)
        );
    }

    #[test]
    fn test_load_ranges_rejects_unknown_field() {
        let csv = "field,min,max\nsalary,0,10\n";
        let err = load_ranges_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownField(_)));
    }

    #[test]
    fn test_load_ranges_rejects_inverted_row() {
        let csv = "field,min,max\ncorpus,10,1\n";
        let err = load_ranges_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
    }

    #[test]
    fn test_load_ranges_rejects_malformed_number() {
        let csv = "field,min,max\ncorpus,ten,100\n";
        assert!(matches!(
            load_ranges_from_reader(csv.as_bytes()),
            Err(ConfigError::Csv(_))
        ));
    }

    #[test]
    fn test_load_assumptions_missing_file() {
        let err = load_assumptions(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_shipped_config_files() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        let assumptions = load_assumptions(&manifest.join(DEFAULT_ASSUMPTIONS_PATH)).unwrap();
        assert_eq!(assumptions.corpus_multiple, 25.0);

        let ranges = load_ranges(&manifest.join(DEFAULT_RANGES_PATH)).unwrap();
        assert_eq!(ranges.get(Field::DurationYears), FieldRange::new(1.0, 30.0));
    }
}
