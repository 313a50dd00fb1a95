// CSV ingestion

use std::io::Read;
use std::path::Path;

use dashgen_core::{Dataset, RawValue, Row};

use crate::error::IoError;

pub fn import(path: &Path, max_rows: usize) -> Result<Dataset, IoError> {
    let content = read_file_as_utf8(path)?;
    from_csv_str(&crate::dataset_name(path), &content, max_rows)
}

/// Decode CSV text. First record is the header; the delimiter is sniffed.
pub fn from_csv_str(name: &str, content: &str, max_rows: usize) -> Result<Dataset, IoError> {
    let delimiter = sniff_delimiter(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = loop {
        match records.next() {
            Some(result) => {
                let record = result.map_err(|e| IoError::Parse(e.to_string()))?;
                if !is_blank(&record) {
                    break record;
                }
            }
            None => return Err(IoError::Empty),
        }
    };
    let columns: Vec<String> = header.iter().map(clean_header).collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in records {
        let record = result.map_err(|e| IoError::Parse(e.to_string()))?;
        if is_blank(&record) {
            continue;
        }
        if rows.len() >= max_rows {
            skipped += 1;
            continue;
        }
        let row: Row = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.as_str(), RawValue::from_text(record.get(i).unwrap_or(""))))
            .collect();
        rows.push(row);
    }

    if skipped > 0 {
        log::debug!("{name}: kept first {max_rows} rows, skipped {skipped}");
    }
    log::debug!(
        "{name}: {} columns, {} rows (delimiter {:?})",
        columns.len(),
        rows.len(),
        delimiter as char
    );

    Ok(Dataset::new(name, columns, rows))
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|f| f.is_empty()) && record.len() <= 1
}

/// Header names are trimmed and stripped of stray quote characters.
fn clean_header(field: &str) -> String {
    field.replace('"', "").trim().to_string()
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Higher field count breaks ties: more columns = more likely real delimiter
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            log::debug!("{}: not UTF-8, decoded as Windows-1252", path.display());
            Ok(decoded.into_owned())
        }
    }
}
