use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub const EXPORT_VERSION: u32 = 1;

/// Export contract: the full AppState plus provenance. The state fields sit at
/// the top level, so a bare AppState document (older exports) imports too.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub export_version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: AppState,
}

impl ExportData {
    pub fn new(state: &AppState) -> Self {
        Self {
            export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            state: state.clone(),
        }
    }
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("nursepro_export_{}.json", date.format("%Y-%m-%d"))
}
