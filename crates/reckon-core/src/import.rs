//! CSV import for ratings and item tag weights
//!
//! Ratings use the MovieLens layout `user,item,rating[,timestamp]`; tag weights use
//! `item,tag,weight`. A header row is accepted on the first non-blank line only.
//! Fields may be quoted, so tags can contain commas.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{ReckonError, Result};
use crate::rating::Rating;
use crate::tags::TagModel;

/// Load ratings from a CSV file
pub fn load_ratings(path: &Path) -> Result<Vec<Rating>> {
    read_ratings(File::open(path)?, path)
}

/// Parse ratings from CSV text; `source` names the input in error messages
pub fn read_ratings(reader: impl Read, source: &Path) -> Result<Vec<Rating>> {
    let mut ratings = Vec::new();
    for_each_record(reader, source, |line_no, record| {
        if record.len() < 3 {
            return Err(ReckonError::parse(
                source,
                line_no,
                format!("expected user,item,rating but found {} field(s)", record.len()),
            ));
        }
        let user = parse_id(&record[0], source, line_no, "user")?;
        let item = parse_id(&record[1], source, line_no, "item")?;
        let value = parse_value(&record[2], source, line_no, "rating")?;
        ratings.push(Rating::new(user, item, value));
        Ok(())
    })?;

    tracing::debug!(source = %source.display(), count = ratings.len(), "read ratings");
    Ok(ratings)
}

/// Load per-item tag weights from a CSV file
pub fn load_tag_weights(path: &Path) -> Result<TagModel> {
    read_tag_weights(File::open(path)?, path)
}

/// Parse `item,tag,weight` rows; repeated (item, tag) pairs accumulate
pub fn read_tag_weights(reader: impl Read, source: &Path) -> Result<TagModel> {
    let mut model = TagModel::new();
    for_each_record(reader, source, |line_no, record| {
        if record.len() != 3 {
            return Err(ReckonError::parse(
                source,
                line_no,
                format!("expected item,tag,weight but found {} field(s)", record.len()),
            ));
        }
        let item = parse_id(&record[0], source, line_no, "item")?;
        let weight = parse_value(&record[2], source, line_no, "weight")?;
        model.add_weight(item, &record[1], weight);
        Ok(())
    })?;

    tracing::debug!(source = %source.display(), items = model.len(), "read tag weights");
    Ok(model)
}

/// Hand each non-blank record and its line number to `handle`.
/// The first record is skipped when its leading field is not numeric.
fn for_each_record(
    reader: impl Read,
    source: &Path,
    mut handle: impl FnMut(usize, &StringRecord) -> Result<()>,
) -> Result<()> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut seen_content = false;
    for result in csv_reader.records() {
        let record = result.map_err(|e| csv_error(source, e))?;
        let line_no = record.position().map_or(0, |p| p.line() as usize);
        if record.iter().all(str::is_empty) {
            continue;
        }

        if !seen_content {
            seen_content = true;
            if record[0].parse::<i64>().is_err() {
                tracing::trace!(source = %source.display(), line = line_no, "skipping header");
                continue;
            }
        }

        handle(line_no, &record)?;
    }

    Ok(())
}

fn csv_error(source: &Path, err: csv::Error) -> ReckonError {
    let line = err.position().map_or(0, |p| p.line() as usize);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => ReckonError::Io(io),
        _ => ReckonError::parse(source, line, reason),
    }
}

fn parse_id(field: &str, source: &Path, line_no: usize, what: &str) -> Result<i64> {
    field
        .parse::<i64>()
        .map_err(|e| ReckonError::parse(source, line_no, format!("bad {} id {:?}: {}", what, field, e)))
}

fn parse_value(field: &str, source: &Path, line_no: usize, what: &str) -> Result<f64> {
    let value = field
        .parse::<f64>()
        .map_err(|e| ReckonError::parse(source, line_no, format!("bad {} {:?}: {}", what, field, e)))?;
    if !value.is_finite() {
        return Err(ReckonError::parse(
            source,
            line_no,
            format!("{} must be finite, got {}", what, field),
        ));
    }
    Ok(value)
}
