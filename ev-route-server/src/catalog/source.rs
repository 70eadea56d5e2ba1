//! CSV parsing for the station dataset.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::{ChargingStation, Coordinate};

use super::error::CatalogError;

/// Column positions resolved from the header row.
///
/// Header names are matched exactly.
struct Columns {
    name: usize,
    latitude: usize,
    longitude: usize,
    address: usize,
    charger_type: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, CatalogError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| CatalogError::data_format(1, format!("missing column \"{column}\"")))
        };

        Ok(Self {
            name: find("Name")?,
            latitude: find("Latitude")?,
            longitude: find("Longitude")?,
            address: find("Address")?,
            charger_type: find("Charger Type")?,
        })
    }
}

/// Parse every row of a station CSV.
///
/// All-or-nothing: the first bad row fails the whole parse, so callers
/// never see a partial dataset.
pub fn parse_stations<R: Read>(reader: R) -> Result<Vec<ChargingStation>, CatalogError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut stations = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_error)?;
        // Header is line 1
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);
        stations.push(parse_record(&record, &columns, line)?);
    }

    Ok(stations)
}

fn parse_record(
    record: &StringRecord,
    columns: &Columns,
    line: u64,
) -> Result<ChargingStation, CatalogError> {
    let text = |idx: usize, column: &str| -> Result<String, CatalogError> {
        match record.get(idx) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(CatalogError::data_format(line, format!("{column} is empty"))),
        }
    };

    let number = |idx: usize, column: &str| -> Result<f64, CatalogError> {
        let raw = text(idx, column)?;
        raw.parse::<f64>().map_err(|_| {
            CatalogError::data_format(line, format!("{column} \"{raw}\" is not a number"))
        })
    };

    let name = text(columns.name, "Name")?;
    let latitude = number(columns.latitude, "Latitude")?;
    let longitude = number(columns.longitude, "Longitude")?;
    let location = Coordinate::new(latitude, longitude)
        .map_err(|e| CatalogError::data_format(line, format!("station \"{name}\": {e}")))?;
    let address = text(columns.address, "Address")?;
    let charger_type = text(columns.charger_type, "Charger Type")?;

    Ok(ChargingStation::new(name, location, address, charger_type))
}

fn csv_error(err: csv::Error) -> CatalogError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => CatalogError::Io {
            path: "<reader>".to_string(),
            source,
        },
        _ => CatalogError::data_format(line, message),
    }
}
