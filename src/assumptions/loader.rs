//! Load mortality tables from CSV files
//!
//! Table files are tab-delimited with a header row. The qx value is expected
//! in the third column; exports that only carry two columns fall back to the
//! second. Rows that parse to no usable number are skipped.

use super::MortalityTable;
use crate::error::PricingError;
use csv::ReaderBuilder;
use std::path::Path;

/// Load a mortality table from a tab-delimited CSV file
pub fn load_mortality_table<P: AsRef<Path>>(path: P) -> Result<MortalityTable, PricingError> {
    let path = path.as_ref();
    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)?;
    read_table(reader, &path.display().to_string())
}

/// Load a mortality table from any reader (e.g. string buffer)
pub fn load_mortality_table_from_reader<R: std::io::Read>(
    reader: R,
    name: &str,
) -> Result<MortalityTable, PricingError> {
    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);
    read_table(reader, name)
}

fn read_table<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    name: &str,
) -> Result<MortalityTable, PricingError> {
    let mut rates = Vec::new();

    for record in reader.records() {
        let record = record?;
        let qx = parse_field(record.get(2)).or_else(|| parse_field(record.get(1)));
        if let Some(qx) = qx {
            rates.push(qx);
        }
    }

    if rates.is_empty() {
        return Err(PricingError::EmptyTable {
            name: name.to_string(),
        });
    }

    Ok(MortalityTable::new(rates))
}

fn parse_field(field: Option<&str>) -> Option<f64> {
    field.and_then(|s| s.trim().parse().ok())
}
