use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shared status pipeline for modification and feature requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
    Rejected,
    Approved,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Approved => "approved",
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "approved" => Ok(Self::Approved),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// A client-submitted change request against an existing project.
#[derive(Debug, Clone, Serialize)]
pub struct ModificationRequest {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    pub title: String,
    pub details: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Like a modification request, but staff attach a cost/duration estimate
/// before approval. Estimates are only ever set by employees.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRequest {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    pub title: String,
    pub details: String,
    pub status: RequestStatus,
    pub estimated_cost: Option<i64>,
    pub estimated_days: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct NewRequest {
    pub project_id: String,
    pub client_id: String,
    pub title: String,
    pub details: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequestStatus {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetFeatureEstimate {
    pub estimated_cost: i64,
    pub estimated_days: i32,
}
