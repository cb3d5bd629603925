//! Roster loading from tabular sources: CSV or spreadsheet with a header row,
//! or JSON rows.
//!
//! The roster is read once per session. Any schema problem is fatal and
//! surfaces as `RosterLoadError`.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::core::roster::Roster;
use crate::core::types::{Identity, IdentityId};
use crate::error::RosterLoadError;

/// Accepted header names for the identifier column.
const ID_COLUMNS: &[&str] = &["id", "identifier", "student_id", "學號"];
/// Accepted header names for the display-name column.
const NAME_COLUMNS: &[&str] = &["name", "display_name", "姓名"];

/// Largest float magnitude that still converts to `i64` exactly.
const MAX_EXACT_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

/// Load and validate a roster, choosing the parser from the file extension.
pub fn load_roster(path: &Path) -> Result<Roster, RosterLoadError> {
    debug!(path = %path.display(), "loading roster");
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let identities = match extension.as_deref() {
        Some("csv") => read_text(path).and_then(|contents| parse_csv(&contents)),
        Some("json") => read_text(path).and_then(|contents| parse_json(&contents)),
        Some("xlsx" | "xlsm" | "xls" | "ods") => parse_workbook(path),
        other => Err(format!(
            "unsupported roster format {:?}; expected .csv, .json, .xlsx, .xls or .ods",
            other.unwrap_or("")
        )),
    }
    .map_err(|reason| RosterLoadError::new(path, reason))?;

    let roster = Roster::from_identities(identities)
        .map_err(|errors| RosterLoadError::new(path, errors.join("; ")))?;
    if roster.is_empty() {
        return Err(RosterLoadError::new(path, "roster has no rows"));
    }
    info!(path = %path.display(), identities = roster.len(), "roster loaded");
    Ok(roster)
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("read failed: {err}"))
}

/// Parse RFC 4180 CSV text with a header row.
pub fn parse_csv(contents: &str) -> Result<Vec<Identity>, String> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|err| format!("read header row: {err}"))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| format!("read csv: {err}"))?;
        let line = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(index + 2);
        rows.push((line, record.iter().map(str::to_string).collect()));
    }
    identities_from_table("line", &header, rows)
}

/// Parse the first sheet of a workbook (header in the first non-empty row).
pub fn parse_workbook(path: &Path) -> Result<Vec<Identity>, String> {
    let mut workbook = open_workbook_auto(path).map_err(|err| format!("open workbook: {err}"))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "workbook has no sheets".to_string())?
        .map_err(|err| format!("read first sheet: {err}"))?;

    let mut rows = range
        .rows()
        .enumerate()
        .map(|(index, row)| (index + 1, row.iter().map(cell_text).collect::<Vec<_>>()));
    let (_, header) = rows.next().ok_or_else(|| "missing header row".to_string())?;
    let body = rows
        .filter(|(_, cells)| cells.iter().any(|cell| !cell.is_empty()))
        .collect();
    identities_from_table("row", &header, body)
}

/// Parse a JSON array of row objects.
pub fn parse_json(contents: &str) -> Result<Vec<Identity>, String> {
    let rows: Vec<Map<String, Value>> =
        serde_json::from_str(contents).map_err(|err| format!("parse json rows: {err}"))?;
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row_no = index + 1;
            let id_value = lookup(row, ID_COLUMNS)
                .ok_or_else(|| format!("row {row_no}: missing column 'id'"))?;
            let name_value = lookup(row, NAME_COLUMNS)
                .ok_or_else(|| format!("row {row_no}: missing column 'name'"))?;
            let id = match id_value {
                Value::Number(number) => number
                    .as_i64()
                    .ok_or_else(|| format!("row {row_no}: id {number} is not an integer"))?,
                Value::String(raw) => parse_id(raw).map_err(|err| format!("row {row_no}: {err}"))?,
                other => return Err(format!("row {row_no}: id must be an integer, got {other}")),
            };
            let name = match name_value {
                Value::String(name) => name.clone(),
                other => return Err(format!("row {row_no}: name must be a string, got {other}")),
            };
            Ok(Identity::new(id, name))
        })
        .collect()
}

/// Map header + text rows to identities. `unit` labels positions in errors.
fn identities_from_table(
    unit: &str,
    header: &[String],
    rows: Vec<(usize, Vec<String>)>,
) -> Result<Vec<Identity>, String> {
    let id_col = find_column(header, ID_COLUMNS)?;
    let name_col = find_column(header, NAME_COLUMNS)?;

    rows.into_iter()
        .map(|(at, cells)| {
            let id_cell = cells
                .get(id_col)
                .ok_or_else(|| format!("{unit} {at}: missing id cell"))?;
            let name_cell = cells
                .get(name_col)
                .ok_or_else(|| format!("{unit} {at}: missing name cell"))?;
            let id = parse_id(id_cell).map_err(|err| format!("{unit} {at}: {err}"))?;
            Ok(Identity::new(id, name_cell.as_str()))
        })
        .collect()
}

/// Spreadsheet cell as text. Whole-number floats render without a fraction
/// so `1001.0` reads as id `1001`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Float(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT_ID => {
            format!("{}", *value as i64)
        }
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn find_column(header: &[String], aliases: &[&str]) -> Result<usize, String> {
    header
        .iter()
        .position(|cell| aliases.iter().any(|alias| cell.eq_ignore_ascii_case(alias)))
        .ok_or_else(|| format!("missing column '{}'", aliases[0]))
}

fn lookup<'a>(row: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    row.iter()
        .find(|(key, _)| aliases.iter().any(|alias| key.eq_ignore_ascii_case(alias)))
        .map(|(_, value)| value)
}

fn parse_id(raw: &str) -> Result<IdentityId, String> {
    raw.trim()
        .parse::<IdentityId>()
        .map_err(|_| format!("id '{raw}' is not an integer"))
}
