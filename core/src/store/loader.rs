use crate::audit::action::ActionRecord;
use crate::error::{CoreError, CoreResult};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// File locations of the four tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSources {
    pub incidents: PathBuf,
    pub registry: PathBuf,
    pub friction: PathBuf,
    pub actions: PathBuf,
}

pub const INCIDENTS_TABLE: &str = "INCIDENTS";
pub const REGISTRY_TABLE: &str = "OWNERSHIP_REGISTRY";
pub const FRICTION_TABLE: &str = "FRICTION_DATA";
pub const ACTIONS_TABLE: &str = "ACTION_LOG";

/// Deserialize every row of a headed CSV table. Header names are trimmed;
/// cell values are kept as written.
pub fn read_rows<T: DeserializeOwned, R: Read>(table: &'static str, reader: R) -> CoreResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (idx, row) in rdr.deserialize().enumerate() {
        let row: T = row.map_err(|e| {
            CoreError::InvalidInput(format!("{} row {}: {}", table, idx + 1, e))
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read a table that must exist.
pub fn read_required_table<T: DeserializeOwned>(table: &'static str, path: &Path) -> CoreResult<Vec<T>> {
    if !path.is_file() {
        return Err(CoreError::TableMissing {
            table,
            path: path.display().to_string(),
        });
    }
    let rows = read_rows(table, File::open(path)?)?;
    log::debug!("loaded {} rows from {} ({})", rows.len(), table, path.display());
    Ok(rows)
}

/// Read the action table, substituting an empty table when it is absent or
/// unreadable.
pub fn read_action_table(path: &Path) -> Vec<ActionRecord> {
    if !path.is_file() {
        log::info!("{} not found at {}; starting with an empty log", ACTIONS_TABLE, path.display());
        return Vec::new();
    }
    match File::open(path)
        .map_err(CoreError::from)
        .and_then(|f| read_rows(ACTIONS_TABLE, f))
    {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("ignoring unreadable {} at {}: {}", ACTIONS_TABLE, path.display(), e);
            Vec::new()
        }
    }
}
