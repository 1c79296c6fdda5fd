use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery lifecycle of an order, independent from its payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Link from an order to its catalog service. An order created against an
/// unknown service id carries `Missing` instead of failing — downstream
/// code has to handle both arms explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ServiceRef {
    Valid(String),
    Missing,
}

impl ServiceRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Valid(id) => Some(id),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<Option<String>> for ServiceRef {
    fn from(id: Option<String>) -> Self {
        match id {
            Some(id) => Self::Valid(id),
            None => Self::Missing,
        }
    }
}

/// A client's order for a service. `order_number` is immutable once
/// assigned; only status, payment fields and `updated_at` ever change.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service: ServiceRef,
    pub service_name: Option<String>,
    pub price: i64,
    pub discount_code: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Invoice snapshot taken from an order at issue time. Append-only:
/// later order mutation never touches an issued invoice.
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub order_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub service_name: Option<String>,
    pub amount: i64,
    pub issued_at: DateTime<Utc>,
}

/// Result of a payment update: the mutated order plus the invoice that
/// was issued as part of the same write, if the transition produced one.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentUpdate {
    pub order: Order,
    pub invoice: Option<Invoice>,
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service_id: Option<String>,
    pub price: i64,
    pub discount_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderPayment {
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
}
