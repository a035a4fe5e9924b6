use crate::models::RawRecord;

/// Split delimited text into header-keyed records.
///
/// The first non-blank row is the header. Rows whose cells are all blank are
/// skipped, short rows are padded with empty values and extra cells are
/// dropped. Unreadable rows are skipped rather than failing the whole file.
pub fn parse_records(text: &str, delimiter: u8) -> Vec<RawRecord> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = rdr
        .records()
        .filter_map(|result| result.ok())
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));

    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(|h| h.trim().to_string()).collect();

    let records = rows
        .map(|row| {
            let mut record = RawRecord::with_capacity(headers.len());
            for (i, header) in headers.iter().enumerate() {
                let value = row.get(i).unwrap_or("");
                record
                    .entry(header.clone())
                    .or_insert_with(|| value.to_string());
            }
            record
        })
        .collect();
    records
}
