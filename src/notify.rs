//! Best-effort order-event notifications. Delivery goes to a configured
//! webhook; a failure is logged and never retried, and it never rolls
//! back the write that triggered it.

use serde_json::json;

use crate::models::orders::{Invoice, Order};

#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    pub async fn order_created(&self, order: &Order) {
        self.post(json!({
            "event": "order.created",
            "order_number": order.order_number,
            "customer_email": order.customer_email,
            "price": order.price,
        }))
        .await;
    }

    pub async fn order_paid(&self, order: &Order, invoice: Option<&Invoice>) {
        self.post(json!({
            "event": "order.paid",
            "order_number": order.order_number,
            "customer_email": order.customer_email,
            "amount": order.price,
            "invoice_number": invoice.map(|i| i.invoice_number.clone()),
        }))
        .await;
    }

    async fn post(&self, payload: serde_json::Value) {
        let Some(url) = &self.webhook_url else {
            tracing::debug!(event = %payload["event"], "No webhook configured, skipping notification");
            return;
        };
        if let Err(e) = self.client.post(url).json(&payload).send().await {
            tracing::warn!("Order notification failed (not retried): {e}");
        }
    }
}
