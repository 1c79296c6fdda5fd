use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service categories stored as lowercase strings in every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    WebDevelopment,
    MobileDevelopment,
    Design,
    Marketing,
    ContentWriting,
    Other,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "web_development",
            Self::MobileDevelopment => "mobile_development",
            Self::Design => "design",
            Self::Marketing => "marketing",
            Self::ContentWriting => "content_writing",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web_development" => Ok(Self::WebDevelopment),
            "mobile_development" => Ok(Self::MobileDevelopment),
            "design" => Ok(Self::Design),
            "marketing" => Ok(Self::Marketing),
            "content_writing" => Ok(Self::ContentWriting),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown service category: {other}")),
        }
    }
}

/// A catalog item clients order. Read-mostly; seeded on first boot.
/// Prices are integer cents.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub price: i64,
    pub features: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A discount code. Validity is a pure function of the current time:
/// active AND (no expiry OR expiry in the future).
#[derive(Debug, Clone, Serialize)]
pub struct DiscountCode {
    pub id: String,
    pub code: String,
    pub percent_off: i32,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DiscountCode {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.is_none_or(|exp| exp > now)
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct NewService {
    pub name: String,
    pub category: ServiceCategory,
    pub price: i64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDiscountCode {
    pub code: String,
    pub percent_off: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetServiceActive {
    pub is_active: bool,
}
