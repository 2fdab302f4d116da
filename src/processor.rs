use crate::entry::{LedgerRow, TransactionEntry};
use crate::error::LedgerError;
use crate::transaction::Transaction;

use std::fs::File;
use std::io::{BufReader, Read};
use std::iter::Iterator;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// The backend returns either a bare list or a paginated page.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonExport {
    List(Vec<Value>),
    Page { results: Vec<Value> },
}

/// Loads a JSON export. Records that aren't objects are logged and skipped;
/// only a malformed document is an error.
pub fn load_json(reader: impl Read) -> Result<Vec<Transaction>, LedgerError> {
    let export: JsonExport = serde_json::from_reader(reader)?;
    let records = match export {
        JsonExport::List(records) | JsonExport::Page { results: records } => records,
    };

    let stream = records
        .into_iter()
        .map(serde_json::from_value::<TransactionEntry>)
        .inspect(|result| {
            if let Err(e) = result {
                warn!("Error parsing transaction: {}", e);
            }
        })
        .filter_map(Result::ok);

    Ok(process_stream(stream))
}

/// Loads a CSV export with a header row. Bad rows are logged and skipped;
/// an unreadable header is an error.
#[inline]
pub fn process_csv_stream(reader: impl Read) -> Result<Vec<Transaction>, LedgerError> {
    let mut binding = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    binding.headers()?;

    let stream = binding
        .deserialize()
        .inspect(|result: &Result<LedgerRow, csv::Error>| {
            if let Err(e) = result {
                warn!("Error parsing transaction: {}", e);
            }
        })
        .filter_map(Result::ok);

    Ok(process_stream(stream))
}

#[inline]
pub fn process_stream<E>(stream: impl Iterator<Item = E>) -> Vec<Transaction>
where
    E: Into<Transaction>,
{
    let transactions: Vec<Transaction> = stream.map(Into::into).collect();

    debug!(count = transactions.len(), "loaded transactions");
    transactions
}

/// Picks the reader from the file extension.
pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<Transaction>, LedgerError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => load_json(BufReader::new(File::open(path)?)),
        "csv" => process_csv_stream(BufReader::new(File::open(path)?)),
        _ => Err(LedgerError::UnsupportedFormat(path.display().to_string())),
    }
}
