//! Tests for the pure aggregation layer: time buckets, trend clamps,
//! top-N ranking and ratio guards. Everything here runs on constructed
//! collections — no backend involved.
//!
//! Run with: `cargo test --test reports_test`
use chrono::{DateTime, Duration, TimeZone, Utc};

use agencyhub_backend::models::accounts::Client;
use agencyhub_backend::models::orders::{Order, OrderStatus, PaymentStatus, ServiceRef};
use agencyhub_backend::reports::{
    client_growth_by_month, completion_rate, month_buckets, orders_by_month, revenue_by_month,
    revenue_trend, top_services, trend_percent,
};

fn order_at(price: i64, paid: bool, service: &str, created_at: DateTime<Utc>) -> Order {
    Order {
        id: format!("order-{created_at}"),
        order_number: format!("ORD-{}", created_at.timestamp_millis()),
        customer_name: "Test Customer".to_string(),
        customer_email: "customer@example.com".to_string(),
        customer_phone: None,
        service: ServiceRef::Missing,
        service_name: Some(service.to_string()),
        price,
        discount_code: None,
        status: OrderStatus::Pending,
        payment_status: if paid {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Pending
        },
        payment_method: None,
        created_at,
        updated_at: None,
    }
}

fn client_at(email: &str, created_at: DateTime<Utc>) -> Client {
    Client {
        id: email.to_string(),
        name: "Test Client".to_string(),
        email: email.to_string(),
        password_hash: "x".to_string(),
        company: None,
        phone: None,
        created_at,
    }
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[test]
fn test_month_buckets_cross_year_boundary() {
    let buckets = month_buckets(at(2026, 2, 15));
    assert_eq!(
        buckets,
        vec![
            (2025, 9),
            (2025, 10),
            (2025, 11),
            (2025, 12),
            (2026, 1),
            (2026, 2),
        ]
    );
}

#[test]
fn test_revenue_by_month_over_empty_orders_still_has_six_buckets() {
    let now = at(2026, 2, 15);
    let series = revenue_by_month(&[], now);

    assert_eq!(series.len(), 6);
    for point in &series {
        assert_eq!(point.value, 0);
    }
    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
    // December 2025 and January 2026 stay distinct buckets.
    assert_eq!((series[3].year, series[3].month), (2025, 12));
    assert_eq!((series[4].year, series[4].month), (2026, 1));
}

#[test]
fn test_revenue_by_month_counts_paid_orders_only() {
    let now = at(2026, 2, 15);
    let orders = vec![
        order_at(500, true, "Business Website", at(2026, 2, 1)),
        order_at(300, false, "Business Website", at(2026, 2, 2)),
        order_at(200, true, "Brand Identity", at(2025, 12, 20)),
        // Outside the 6-month window entirely.
        order_at(9_999, true, "Business Website", at(2025, 1, 1)),
    ];

    let series = revenue_by_month(&orders, now);
    assert_eq!(series.last().unwrap().value, 500);
    assert_eq!(series[3].value, 200);
    let total: i64 = series.iter().map(|p| p.value).sum();
    assert_eq!(total, 700);
}

#[test]
fn test_orders_by_month_counts_regardless_of_payment() {
    let now = at(2026, 2, 15);
    let orders = vec![
        order_at(500, true, "A", at(2026, 2, 1)),
        order_at(300, false, "A", at(2026, 2, 2)),
    ];
    let series = orders_by_month(&orders, now);
    assert_eq!(series.last().unwrap().value, 2);
}

#[test]
fn test_client_growth_by_month() {
    let now = at(2026, 2, 15);
    let clients = vec![
        client_at("a@example.com", at(2026, 2, 1)),
        client_at("b@example.com", at(2026, 1, 10)),
        client_at("c@example.com", at(2024, 6, 1)),
    ];
    let series = client_growth_by_month(&clients, now);
    assert_eq!(series[4].value, 1);
    assert_eq!(series[5].value, 1);
    let total: i64 = series.iter().map(|p| p.value).sum();
    assert_eq!(total, 2);
}

#[test]
fn test_trend_clamp_rules() {
    // Zero prior window with recent revenue: flat +100, not a division.
    assert_eq!(trend_percent(0, 500), 100);
    // Both windows empty: no movement.
    assert_eq!(trend_percent(0, 0), 0);
    // Revenue fell to zero: -100.
    assert_eq!(trend_percent(100, 0), -100);
    assert_eq!(trend_percent(200, 300), 50);
    assert_eq!(trend_percent(300, 150), -50);
}

#[test]
fn test_revenue_trend_windows() {
    let now = at(2026, 6, 30);
    let orders = vec![
        // Recent 30 days.
        order_at(500, true, "A", now - Duration::days(5)),
        // Preceding 30-day window.
        order_at(250, true, "A", now - Duration::days(45)),
        // Unpaid orders never count.
        order_at(10_000, false, "A", now - Duration::days(3)),
    ];
    assert_eq!(revenue_trend(&orders, now), 100);

    // With nothing in the prior window the trend is the flat +100 signal.
    let recent_only = vec![order_at(500, true, "A", now - Duration::days(5))];
    assert_eq!(revenue_trend(&recent_only, now), 100);

    assert_eq!(revenue_trend(&[], now), 0);
}

#[test]
fn test_top_services_ranks_by_revenue_and_truncates_to_five() {
    let now = at(2026, 3, 1);
    let mut orders = Vec::new();
    for (i, name) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
        orders.push(order_at((i as i64 + 1) * 100, true, name, now));
    }
    // An order with no resolved service name is skipped entirely.
    let mut nameless = order_at(50_000, true, "ignored", now);
    nameless.service_name = None;
    orders.push(nameless);

    let top = top_services(&orders);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].service_name, "G");
    assert_eq!(top[0].revenue, 700);
    assert_eq!(top[4].service_name, "C");
}

#[test]
fn test_top_services_ties_keep_first_seen_order() {
    let now = at(2026, 3, 1);
    let orders = vec![
        order_at(100, true, "First", now),
        order_at(100, true, "Second", now),
    ];
    let top = top_services(&orders);
    assert_eq!(top[0].service_name, "First");
    assert_eq!(top[1].service_name, "Second");
}

#[test]
fn test_top_services_counts_unpaid_orders_but_not_their_revenue() {
    let now = at(2026, 3, 1);
    let orders = vec![
        order_at(100, true, "A", now),
        order_at(900, false, "A", now),
    ];
    let top = top_services(&orders);
    assert_eq!(top[0].orders, 2);
    assert_eq!(top[0].revenue, 100);
}

#[test]
fn test_completion_rate_guards_zero_total() {
    assert_eq!(completion_rate(0, 0), 0);
    assert_eq!(completion_rate(1, 2), 50);
    assert_eq!(completion_rate(2, 3), 67);
    assert_eq!(completion_rate(5, 5), 100);
}
