use crate::error::ServiceError;
use crate::state::AppState;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::column_mapping::{ColumnMapping, CsvRow};
use common::model::contact::distinct_personas;
use common::responses::UploadResponse;
use futures_util::StreamExt;
use log::{debug, error, info};
use md5::Context;

/// Delimiters tried on the header line, in tie-breaking order.
const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// A fully buffered `csv` part with its MD5 fingerprint.
struct UploadedCsv {
    bytes: Vec<u8>,
    md5: String,
}

/// HTTP handler wrapper that converts the upload result to an `HttpResponse`.
///
/// - On success: returns `200 OK` with the mapped contacts.
/// - On failure: returns `400 Bad Request` for a missing or unreadable file,
///   `503 Service Unavailable` when the contacts could not be stored.
pub async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match upload_contacts(&state, payload).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            error!("CSV upload failed: {}", e);
            e.error_response()
        }
    }
}

/// Reads the multipart body, maps every CSV row to a contact and replaces the stored list.
///
/// Expected parts:
/// - `csv`: the file itself; its name must end with `.csv`.
/// - `mapping` (optional): a JSON `ColumnMapping`. When absent the mapping is
///   suggested from the CSV headers.
async fn upload_contacts(
    state: &AppState,
    mut payload: Multipart,
) -> Result<UploadResponse, ServiceError> {
    let mut csv: Option<UploadedCsv> = None;
    let mut mapping: Option<ColumnMapping> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("csv") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();

                if !filename.to_lowercase().ends_with(".csv") {
                    return Err(ServiceError::bad_request("The file must end with .csv"));
                }

                let mut md5_hasher = Context::new();
                let bytes = read_field(&mut field, state.upload_limit, |chunk| {
                    md5_hasher.consume(chunk)
                })
                .await?;
                csv = Some(UploadedCsv {
                    bytes,
                    md5: format!("{:x}", md5_hasher.finalize()),
                });
            }

            Some("mapping") => {
                let bytes = read_field(&mut field, state.upload_limit, |_| {}).await?;
                if !bytes.iter().all(u8::is_ascii_whitespace) {
                    let parsed: ColumnMapping = serde_json::from_slice(&bytes).map_err(|e| {
                        ServiceError::bad_request(format!("Invalid column mapping: {}", e))
                    })?;
                    mapping = Some(parsed);
                }
            }

            _ => {}
        }
    }

    let csv = csv.ok_or_else(|| ServiceError::bad_request("No file uploaded"))?;
    let (headers, rows) = parse_csv(&csv.bytes)?;
    let mapping = mapping.unwrap_or_else(|| ColumnMapping::suggest(&headers));
    debug!("Parsed {} rows with headers {:?}", rows.len(), headers);

    let contacts = mapping.apply_all(&rows);
    let roles = distinct_personas(&contacts);
    let unchanged = state
        .contacts
        .replace(contacts.clone(), csv.md5, headers.clone())
        .await?;
    info!(
        "Stored {} contacts ({})",
        contacts.len(),
        if unchanged { "same file as before" } else { "new file" }
    );

    Ok(UploadResponse {
        message: "CSV uploaded successfully".to_string(),
        total_contacts: contacts.len(),
        contacts,
        roles,
        headers,
        mapping,
        unchanged,
    })
}

/// Buffers one part, rejecting it once it grows past `limit` bytes.
async fn read_field(
    field: &mut Field,
    limit: usize,
    mut on_chunk: impl FnMut(&[u8]),
) -> Result<Vec<u8>, ServiceError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > limit {
            return Err(ServiceError::bad_request(format!(
                "Upload exceeds the limit of {} bytes",
                limit
            )));
        }
        on_chunk(&chunk);
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Splits a CSV file into its header names and one `CsvRow` per record.
///
/// Cells are trimmed. Short records simply lack the trailing columns; extra
/// cells beyond the header are dropped.
fn parse_csv(bytes: &[u8]) -> Result<(Vec<String>, Vec<CsvRow>), ServiceError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(bytes))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(String::is_empty) {
        return Err(ServiceError::bad_request("CSV file has no header row"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: CsvRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }
    Ok((headers, rows))
}

/// Picks the most frequent of `, ; \t |` on the header line, comma when none occurs.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let header_line = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    DELIMITERS
        .iter()
        .copied()
        .rev()
        .max_by_key(|&d| header_line.iter().filter(|&&b| b == d).count())
        .unwrap_or(b',')
}
