//! Google Sheets v4: column reads and single-cell writes.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::client::{GoogleClient, SHEETS_API_BASE};
use crate::core::error::PipelineError;
use crate::ingest::{Column, SheetStore, TargetCell};

/// `values.get` response; `values` is omitted when the range is empty.
#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Sheets client bound to one spreadsheet.
#[derive(Clone)]
pub struct SheetsClient {
    client: GoogleClient,
    base_url: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(client: GoogleClient, spreadsheet_id: impl Into<String>) -> Self {
        Self::with_base_url(client, SHEETS_API_BASE, spreadsheet_id)
    }

    /// Points the client at another API root (a mock server in tests).
    pub fn with_base_url(client: GoogleClient, base_url: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }
}

#[async_trait]
impl SheetStore for SheetsClient {
    async fn column_values(&self, column: Column) -> Result<Vec<String>, PipelineError> {
        let request = self.client.http().get(self.values_url(&column.data_range()));

        let response = self.client.send(request).await.map_err(PipelineError::Spreadsheet)?;
        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| PipelineError::Spreadsheet(format!("unexpected values response: {}", e)))?;

        Ok(range.values.into_iter().map(|row| first_cell_text(&row)).collect())
    }

    async fn write_cell(&self, cell: TargetCell, value: &str) -> Result<(), PipelineError> {
        let range = cell.to_string();
        let request = self
            .client
            .http()
            .put(self.values_url(&range))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": [[value]],
            }));

        self.client.send(request).await.map_err(PipelineError::Spreadsheet)?;
        log::debug!("Wrote {} to {}", value, range);
        Ok(())
    }
}

fn first_cell_text(row: &[serde_json::Value]) -> String {
    match row.first() {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
