use std::collections::BTreeMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// EquipmentRecord – one row of the uploaded CSV
// ---------------------------------------------------------------------------

/// A single piece of equipment as stored by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquipmentRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

// ---------------------------------------------------------------------------
// Averages
// ---------------------------------------------------------------------------

/// Per-dataset means computed server-side. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Averages {
    #[serde(default)]
    pub flowrate: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dataset – the backend's analysis of one upload
// ---------------------------------------------------------------------------

/// Aggregates and rows for one uploaded CSV.
///
/// The client never computes any of this; it is rendered as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dataset {
    pub id: u64,
    pub filename: String,
    #[serde(default)]
    pub upload_date: Option<String>,
    pub total_count: u64,
    /// Equipment type → number of rows of that type.
    #[serde(default)]
    pub type_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub averages: Averages,
    #[serde(default)]
    pub equipment_list: Vec<EquipmentRecord>,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// Body of a successful `POST /upload/`.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub data: Dataset,
}

/// Body of `GET /history/`.
///
/// The backend wraps the list as `{ count, datasets }`; a bare array is
/// accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryResponse {
    Wrapped { datasets: Vec<Dataset> },
    List(Vec<Dataset>),
}

impl HistoryResponse {
    pub fn into_datasets(self) -> Vec<Dataset> {
        match self {
            HistoryResponse::Wrapped { datasets } => datasets,
            HistoryResponse::List(datasets) => datasets,
        }
    }
}

/// Body of `GET /health/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub datasets: Option<u64>,
}

/// Error envelope. The upload view uses `error`, framework-generated
/// responses (404, 405) use `detail`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error
            .or(self.detail)
            .filter(|msg| !msg.trim().is_empty())
    }
}
