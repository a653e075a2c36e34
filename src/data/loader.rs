//! # Dataset Loading
//!
//! Reads review datasets from JSON, JSON Lines or CSV and writes results as
//! pretty-printed JSON.

use super::review::{Dataset, ReviewRecord};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Load a dataset, choosing the format by file extension
///
/// Supported: `.json` (array of rows), `.jsonl` / `.ndjson` (one row per
/// line), `.csv` (header row). Ratings are checked to lie in 1-5 and any
/// stored category is re-derived from the stored score.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let dataset = match extension.as_str() {
        "json" => read_json(reader)?,
        "jsonl" | "ndjson" => read_json_lines(reader)?,
        "csv" => read_csv(reader)?,
        _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
    };

    info!("Loaded {} reviews from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Read a JSON array of rows
pub fn read_json<R: Read>(reader: R) -> Result<Dataset> {
    let records: Vec<ReviewRecord> = serde_json::from_reader(reader)?;
    Dataset::from_records(records)
}

/// Read one JSON row per line, skipping blank lines
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str::<ReviewRecord>(&line)?);
    }
    Dataset::from_records(records)
}

/// Read CSV with a header row
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: ReviewRecord = result?;
        records.push(record);
    }

    Dataset::from_records(records)
}

/// Write any serializable value as pretty-printed JSON
pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ReviewRow, UserType};
    use crate::report::SummaryReporter;
    use crate::sentiment::{categorize, SentimentCategory};
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_read_json_lines() {
        let input = "{\"text\": \"good\", \"rating\": 5, \"user_type\": \"multi\"}\n\n{\"text\": \"bad\", \"rating\": 1}\n";
        let dataset = read_json_lines(Cursor::new(input)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].user_type, Some(UserType::Multi));
        assert_eq!(dataset.rows()[1].user_type, None);
    }

    #[test]
    fn test_read_csv() {
        let input = "text,rating,user_type,timestamp\n\"Nice, soft\",4,single,1672574400000\nMeh,2,,\n";
        let dataset = read_csv(Cursor::new(input)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].text, "Nice, soft");
        assert_eq!(dataset.rows()[0].user_type, Some(UserType::Single));
        assert!(dataset.rows()[0].timestamp.is_some());
        assert_eq!(dataset.rows()[1].user_type, None);
        assert!(dataset.rows()[1].timestamp.is_none());
    }

    #[test]
    fn test_load_rejects_bad_rating() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, r#"[{"text": "x", "rating": 9}]"#).unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidRating { row: 0, rating: 9 }));
    }

    #[test]
    fn test_load_rejects_rating_outside_byte_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.jsonl");
        let lines = "{\"text\": \"x\", \"rating\": 4}\n{\"text\": \"y\", \"rating\": 300}\n";
        std::fs::write(&path, lines).unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidRating { row: 1, rating: 300 }));
    }

    #[test]
    fn test_loaded_category_follows_score() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scored.json");
        std::fs::write(
            &path,
            r#"[{"text": "x", "rating": 5, "sentiment": 0.9, "sentiment_category": "negative"}]"#,
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        let summary = SummaryReporter::new().summarize(&dataset).unwrap();

        assert_eq!(
            dataset.rows()[0].sentiment_category(),
            Some(categorize(0.9))
        );
        assert_eq!(summary.distribution.positive, 1);
        assert_eq!(summary.distribution.negative, 0);
    }

    #[test]
    fn test_csv_category_column_ignored() {
        let input = "text,rating,sentiment,sentiment_category\nMeh,2,-0.5,positive\n";
        let dataset = read_csv(Cursor::new(input)).unwrap();

        assert_eq!(
            dataset.rows()[0].sentiment_category(),
            Some(SentimentCategory::Negative)
        );
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.parquet");
        std::fs::write(&path, b"PAR1").unwrap();

        assert!(matches!(
            load_dataset(&path),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_write_then_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scored.json");
        let dataset = Dataset::new(vec![ReviewRow::new("fine", 3)])
            .with_scores(vec![0.2])
            .unwrap();

        write_json(&path, &dataset).unwrap();
        let loaded = load_dataset(&path).unwrap();

        assert_eq!(loaded, dataset);
    }
}
