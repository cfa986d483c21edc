//! JSON export functionality
//!
//! Provides JSON serialization of the full dashboard with an export envelope.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::analytics::Dashboard;

/// Export format version
pub const EXPORT_VERSION: &str = "1.0";

/// Dashboard export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardExportJson {
    pub export_date: String,
    pub export_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub dashboard: Dashboard,
}

impl DashboardExportJson {
    pub fn new(dashboard: Dashboard, account_id: Option<&str>) -> Self {
        Self {
            export_date: chrono::Utc::now().to_rfc3339(),
            export_version: EXPORT_VERSION.to_string(),
            account_id: account_id.map(str::to_string),
            dashboard,
        }
    }
}

/// Write the dashboard as pretty-printed JSON
pub fn write_dashboard_json(
    dashboard: &Dashboard,
    account_id: Option<&str>,
    path: &Path,
) -> Result<(), ExportError> {
    let export = DashboardExportJson::new(dashboard.clone(), account_id);
    let json = serde_json::to_string_pretty(&export)?;

    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}
