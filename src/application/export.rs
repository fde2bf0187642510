// src/application/export.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use csv::WriterBuilder;

/// UTF-8 byte-order mark; spreadsheet applications use it to detect UTF-8.
const BOM: &[u8] = b"\xef\xbb\xbf";

/// A rendered CSV download: the bytes plus the filename the response should
/// carry in its content-disposition header.
#[derive(Debug, Clone)]
pub struct CsvFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Serialize rows to CSV bytes: BOM prefix, header row, then one record per
/// row with RFC-4180 quoting (fields containing comma, quote or newline are
/// quoted, inner quotes doubled).
pub fn csv_export(headers: &[&str], rows: &[Vec<String>]) -> ApplicationResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    let mut out = Vec::with_capacity(BOM.len() + body.len());
    out.extend_from_slice(BOM);
    out.extend_from_slice(&body);
    Ok(out)
}
