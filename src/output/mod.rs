//! Output module for crawl results
//!
//! This module handles:
//! - The [`CrawlResult`] returned by a crawl
//! - Writing results as JSON to a file or to stdout

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Outcome of a single crawl
///
/// Serialises as `{"wordCounts": {...}, "urlsVisited": n}`, with the word
/// counts object keyed in ranked order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most popular words, already ranked
    #[serde(serialize_with = "serialize_ranked")]
    pub word_counts: Vec<(String, u64)>,

    /// Number of distinct addresses visited
    pub urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }
}

/// Writes the ranked pairs as a JSON object without reordering them
fn serialize_ranked<S>(word_counts: &[(String, u64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(word_counts.len()))?;
    for (word, count) in word_counts {
        map.serialize_entry(word, count)?;
    }
    map.end()
}

/// Writes a result as pretty-printed JSON followed by a newline
pub fn write_json<W: Write>(result: &CrawlResult, mut writer: W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a result to `path`, or to stdout when no path is given
///
/// # Arguments
///
/// * `result` - The crawl result to write
/// * `path` - Destination file; created or truncated
///
/// # Returns
///
/// * `Ok(())` - Result written
/// * `Err(OutputError)` - File could not be written
pub fn write_result(result: &CrawlResult, path: Option<&Path>) -> OutputResult<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            write_json(result, BufWriter::new(file))?;
            tracing::info!("Result written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_json(result, stdout.lock())?;
        }
    }
    Ok(())
}
