use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered delivery pipeline; `completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Analysis,
    Design,
    Backend,
    Deployment,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Design => "design",
            Self::Backend => "backend",
            Self::Deployment => "deployment",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analysis" => Ok(Self::Analysis),
            "design" => Ok(Self::Design),
            "backend" => Ok(Self::Backend),
            "deployment" => Ok(Self::Deployment),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown project status: {other}")),
        }
    }
}

/// A delivery project owned by exactly one client. `days_remaining` is an
/// externally maintained counter, not derived from dates.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub days_remaining: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A unit of work assigned to one employee on one project. Completion and
/// the remaining-hours estimate mutate independently.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeTask {
    pub id: String,
    pub employee_id: String,
    pub project_id: String,
    pub title: String,
    pub completed: bool,
    pub hours_remaining: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub client_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_days_remaining")]
    pub days_remaining: i32,
}

fn default_days_remaining() -> i32 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectStatus {
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectDays {
    pub days_remaining: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployeeTask {
    pub employee_id: String,
    pub project_id: String,
    pub title: String,
    pub hours_remaining: i32,
}

/// Partial progress update: either field may be supplied on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskProgress {
    pub hours_remaining: Option<i32>,
    pub completed: Option<bool>,
}
