use super::types::RawTable;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

impl RawTable {
    /// Parse a `{"columns": [...], "rows": [[...], ...]}` document.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::parse(format!("table JSON: {e}")))
    }
}

/// Read a table file from disk.
pub async fn load_table(path: &Path) -> Result<RawTable> {
    info!(path = %path.display(), "loading hotel table");
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read {}: {e}", path.display()),
        ))
    })?;
    let table = RawTable::from_json(&content)?;
    info!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "hotel table loaded"
    );
    Ok(table)
}
