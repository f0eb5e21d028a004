//! Client for the well-log storage service.
//!
//! Imported log runs are persisted by an external REST service. The
//! [`WellLogStore`] trait is the seam the import flow talks to; the HTTP
//! implementation posts JSON with the tenant header the service expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, EnumIter};
use thiserror::Error;

const WELL_LOGS_PATH: &str = "/api/nexus/rv/well-logs";
const USER_AGENT: &str = concat!("welllog/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Data Structures
// ============================================================================

/// Kind of logging run, as the storage service names it
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, EnumIter, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogType {
    #[default]
    Composite,
    Wireline,
    Lwd,
    Mwd,
    ProductionLog,
}

/// One stored `{depth, value}` pair. The storage contract has no null.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthValue {
    pub depth: f64,
    pub value: f64,
}

/// A curve as sent to (and returned by) the storage service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WellLogCurve {
    pub name: String,
    pub unit: String,
    pub description: String,
    pub data: Vec<DepthValue>,
}

/// Body of the create-well-log request
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWellLogRequest {
    pub well_id: String,
    pub name: String,
    pub log_type: LogType,
    pub top_depth: f64,
    pub bottom_depth: f64,
    pub curves: Vec<WellLogCurve>,
    pub source_file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub las_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_company: Option<String>,
    pub data_format: String,
    pub available_curves: Vec<String>,
}

impl CreateWellLogRequest {
    /// Total `{depth, value}` pairs across all curves
    pub fn data_point_count(&self) -> usize {
        self.curves.iter().map(|c| c.data.len()).sum()
    }
}

/// Identifier of a stored log run
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogRunId(pub String);

impl fmt::Display for LogRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response body of a successful create. The service returns the new asset
/// either as `assetId` or as an entity id (`"id"` or `{"id": "..."}`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedWellLog {
    asset_id: Option<String>,
    id: Option<serde_json::Value>,
}

impl CreatedWellLog {
    fn into_id(self) -> Option<LogRunId> {
        if let Some(asset_id) = self.asset_id {
            return Some(LogRunId(asset_id));
        }
        match self.id? {
            serde_json::Value::String(id) => Some(LogRunId(id)),
            serde_json::Value::Object(map) => map
                .get("id")
                .and_then(|v| v.as_str())
                .map(|id| LogRunId(id.to_string())),
            _ => None,
        }
    }
}

/// Failures talking to the storage service
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage service returned status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Transport(String),
    #[error("failed to parse storage response: {0}")]
    Decode(String),
}

// ============================================================================
// Store Trait
// ============================================================================

/// Persistence collaborator for imported log runs
pub trait WellLogStore: Send + Sync {
    /// Create a log run. Blocking; call from a background thread.
    fn create_well_log(
        &self,
        tenant_id: &str,
        request: &CreateWellLogRequest,
    ) -> Result<LogRunId, StoreError>;
}

/// Storage service reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpWellLogStore {
    base_url: String,
    token: Option<String>,
}

impl HttpWellLogStore {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, WELL_LOGS_PATH)
    }
}

impl WellLogStore for HttpWellLogStore {
    fn create_well_log(
        &self,
        tenant_id: &str,
        request: &CreateWellLogRequest,
    ) -> Result<LogRunId, StoreError> {
        let url = self.endpoint();
        tracing::info!(
            "Posting log run '{}' ({} curves) to {}",
            request.name,
            request.curves.len(),
            url
        );

        let mut builder = ureq::post(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .header("X-Tenant-Id", tenant_id);
        if let Some(token) = &self.token {
            builder = builder.header("X-Authorization", &format!("Bearer {}", token));
        }

        let mut response = match builder.send_json(request) {
            Ok(resp) => resp,
            Err(ureq::Error::StatusCode(status)) => return Err(StoreError::Status(status)),
            Err(e) => return Err(StoreError::Transport(e.to_string())),
        };

        let created: CreatedWellLog = response
            .body_mut()
            .read_json()
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        created
            .into_id()
            .ok_or_else(|| StoreError::Decode("response carries no log run id".to_string()))
    }
}
