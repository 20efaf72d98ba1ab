use arrowword_core::{GRID_SIZE, Grid};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{ShapeError, WireCell, grid_from_wire, grid_to_wire};

/// Version written to and required from export files.
pub const FILE_VERSION: usize = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileDocument {
    version: usize,
    n: usize,
    #[serde(serialize_with = "serialize_timestamp")]
    created_at: DateTime<Utc>,
    grid: Vec<Vec<WireCell>>,
}

/// Writes `2026-01-02T03:04:05.000Z`, always with milliseconds.
fn serialize_timestamp<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Errors raised when importing a file.
///
/// The current grid must be left untouched when import fails.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ImportError {
    /// The file is not JSON.
    #[display("could not read file: {_0}")]
    Unreadable(serde_json::Error),
    /// The file is JSON but not a puzzle this version understands.
    #[display("invalid file: {_0}")]
    Invalid(InvalidFile),
}

/// Why an import file was rejected.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InvalidFile {
    /// Missing or unsupported `version`.
    #[display("unsupported version")]
    #[from(ignore)]
    Version,
    /// Missing or unsupported `n`.
    #[display("unsupported grid size")]
    #[from(ignore)]
    Size,
    /// No `grid` member.
    #[display("missing grid")]
    #[from(ignore)]
    MissingGrid,
    /// `grid` is not nested cells.
    #[display("{_0}")]
    Cells(serde_json::Error),
    /// The cells do not form a valid grid.
    #[display("{_0}")]
    Shape(ShapeError),
}

/// Serializes a grid as a pretty-printed export file.
///
/// Letters are kept; expectations are not written.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn export_file(grid: &Grid, created_at: DateTime<Utc>) -> Result<String, serde_json::Error> {
    let document = FileDocument {
        version: FILE_VERSION,
        n: GRID_SIZE,
        created_at,
        grid: grid_to_wire(grid),
    };
    serde_json::to_string_pretty(&document)
}

/// Suggests a file name for an export made at `created_at`.
///
/// # Examples
///
/// ```
/// use arrowword_share::export_file_name;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 5).unwrap();
/// assert_eq!(export_file_name(at), "arrowword-2026-03-01T09-30-05-000Z.json");
/// ```
#[must_use]
pub fn export_file_name(created_at: DateTime<Utc>) -> String {
    let stamp = created_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("arrowword-{stamp}.json")
}

/// Parses an export file.
///
/// # Errors
///
/// Returns [`ImportError::Unreadable`] if `text` is not JSON and
/// [`ImportError::Invalid`] unless it holds a version 1, 12×12 puzzle.
pub fn import_file(text: &str) -> Result<Grid, ImportError> {
    let document: Value = serde_json::from_str(text)?;
    if !member_is(&document, "version", FILE_VERSION) {
        return Err(InvalidFile::Version.into());
    }
    if !member_is(&document, "n", GRID_SIZE) {
        return Err(InvalidFile::Size.into());
    }
    let rows = document.get("grid").cloned().ok_or(InvalidFile::MissingGrid)?;
    let rows: Vec<Vec<WireCell>> = serde_json::from_value(rows).map_err(InvalidFile::Cells)?;
    let grid = grid_from_wire(rows).map_err(InvalidFile::Shape)?;
    log::debug!("imported grid with {} clues", grid.clues().count());
    Ok(grid)
}

/// Compares a numeric member by value, so `1.0` matches `1`.
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
fn member_is(document: &Value, key: &str, expected: usize) -> bool {
    document.get(key).and_then(Value::as_f64) == Some(expected as f64)
}
