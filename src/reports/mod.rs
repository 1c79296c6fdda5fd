//! Derived-analytics layer: pure functions over already-fetched entity
//! collections. The relational backend pushes the dashboard counters into
//! SQL for efficiency; everything here must agree with those semantics.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::accounts::Client;
use crate::models::orders::{Order, OrderStatus, PaymentStatus};
use crate::models::projects::EmployeeTask;

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_orders: u64,
    pub open_orders: u64,
    pub total_revenue: i64,
    pub month_revenue: i64,
    pub total_clients: u64,
    pub total_students: u64,
    pub active_projects: u64,
    pub completed_projects: u64,
}

/// One calendar-month slot in a time series. Keyed by `(year, month)` so
/// a December/January boundary never folds two years together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySeries {
    pub revenue: Vec<MonthlyPoint>,
    pub orders: Vec<MonthlyPoint>,
    pub client_growth: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopService {
    pub service_name: String,
    pub orders: u64,
    pub revenue: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    pub total_revenue: i64,
    pub outstanding_revenue: i64,
    pub revenue_trend_percent: i64,
    pub top_services: Vec<TopService>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductivityRow {
    pub employee_id: String,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: u32,
    pub hours_remaining: i64,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The trailing six `(year, month)` buckets ending at the current month,
/// oldest first.
pub fn month_buckets(now: DateTime<Utc>) -> Vec<(i32, u32)> {
    let mut buckets = Vec::with_capacity(6);
    let (mut year, mut month) = (now.year(), now.month());
    for _ in 0..6 {
        buckets.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    buckets.reverse();
    buckets
}

fn bucketize<T>(items: &[T], now: DateTime<Utc>, mut f: impl FnMut(&T) -> ((i32, u32), i64)) -> Vec<MonthlyPoint> {
    let buckets = month_buckets(now);
    let mut totals: HashMap<(i32, u32), i64> = buckets.iter().map(|&k| (k, 0)).collect();
    for item in items {
        let (key, value) = f(item);
        if let Some(total) = totals.get_mut(&key) {
            *total += value;
        }
    }
    buckets
        .into_iter()
        .map(|(year, month)| MonthlyPoint {
            year,
            month,
            label: MONTH_LABELS[(month - 1) as usize].to_string(),
            value: totals[&(year, month)],
        })
        .collect()
}

fn month_key(at: DateTime<Utc>) -> (i32, u32) {
    (at.year(), at.month())
}

/// Paid revenue per trailing month. Months with no activity still appear
/// with a zero value.
pub fn revenue_by_month(orders: &[Order], now: DateTime<Utc>) -> Vec<MonthlyPoint> {
    bucketize(orders, now, |o| {
        let paid = if o.payment_status == PaymentStatus::Completed {
            o.price
        } else {
            0
        };
        (month_key(o.created_at), paid)
    })
}

/// Order volume per trailing month, regardless of payment state.
pub fn orders_by_month(orders: &[Order], now: DateTime<Utc>) -> Vec<MonthlyPoint> {
    bucketize(orders, now, |o| (month_key(o.created_at), 1))
}

/// New client registrations per trailing month.
pub fn client_growth_by_month(clients: &[Client], now: DateTime<Utc>) -> Vec<MonthlyPoint> {
    bucketize(clients, now, |c| (month_key(c.created_at), 1))
}

/// Paid revenue of the trailing 30 days compared against the preceding
/// 30-day window, as an integer percentage.
///
/// Degenerate inputs never leak: a zero prior window with positive recent
/// revenue reports a flat +100, two zero windows report 0, and any
/// non-finite intermediate is clamped to 0.
pub fn revenue_trend(orders: &[Order], now: DateTime<Utc>) -> i64 {
    let recent_start = now - Duration::days(30);
    let previous_start = now - Duration::days(60);

    let paid = |o: &&Order| o.payment_status == PaymentStatus::Completed;
    let recent: i64 = orders
        .iter()
        .filter(paid)
        .filter(|o| o.created_at >= recent_start && o.created_at <= now)
        .map(|o| o.price)
        .sum();
    let previous: i64 = orders
        .iter()
        .filter(paid)
        .filter(|o| o.created_at >= previous_start && o.created_at < recent_start)
        .map(|o| o.price)
        .sum();

    trend_percent(previous, recent)
}

/// The clamp rule shared by every trend metric.
pub fn trend_percent(previous: i64, recent: i64) -> i64 {
    if previous == 0 {
        return if recent > 0 { 100 } else { 0 };
    }
    let ratio = (recent - previous) as f64 / previous as f64 * 100.0;
    if ratio.is_finite() { ratio.round() as i64 } else { 0 }
}

/// Top five services by paid revenue. Ties keep the stable first-seen
/// order of the underlying collection.
pub fn top_services(orders: &[Order]) -> Vec<TopService> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<TopService> = Vec::new();

    for order in orders {
        let Some(name) = order.service_name.as_deref() else {
            continue;
        };
        let i = *index.entry(name).or_insert_with(|| {
            rows.push(TopService {
                service_name: name.to_string(),
                orders: 0,
                revenue: 0,
            });
            rows.len() - 1
        });
        rows[i].orders += 1;
        if order.payment_status == PaymentStatus::Completed {
            rows[i].revenue += order.price;
        }
    }

    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows.truncate(5);
    rows
}

/// Integer percentage with an explicit zero-total guard.
pub fn completion_rate(completed: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let ratio = completed as f64 / total as f64 * 100.0;
    if ratio.is_finite() { ratio.round() as u32 } else { 0 }
}

/// Dashboard counters computed in-process. The relational backend derives
/// the same numbers with SQL aggregates; both paths must agree.
pub fn dashboard_from_rows(
    orders: &[Order],
    total_clients: u64,
    total_students: u64,
    active_projects: u64,
    completed_projects: u64,
    now: DateTime<Utc>,
) -> DashboardStats {
    let start_of_month = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now);

    let paid = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Completed);

    DashboardStats {
        total_orders: orders.len() as u64,
        open_orders: orders
            .iter()
            .filter(|o| o.status != OrderStatus::Completed)
            .count() as u64,
        total_revenue: paid.clone().map(|o| o.price).sum(),
        month_revenue: paid
            .filter(|o| o.created_at >= start_of_month)
            .map(|o| o.price)
            .sum(),
        total_clients,
        total_students,
        active_projects,
        completed_projects,
    }
}

pub fn monthly_series(orders: &[Order], clients: &[Client], now: DateTime<Utc>) -> MonthlySeries {
    MonthlySeries {
        revenue: revenue_by_month(orders, now),
        orders: orders_by_month(orders, now),
        client_growth: client_growth_by_month(clients, now),
    }
}

pub fn financial_report(orders: &[Order], now: DateTime<Utc>) -> FinancialReport {
    let total_revenue: i64 = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Completed)
        .map(|o| o.price)
        .sum();
    let outstanding_revenue: i64 = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Pending)
        .map(|o| o.price)
        .sum();

    FinancialReport {
        total_revenue,
        outstanding_revenue,
        revenue_trend_percent: revenue_trend(orders, now),
        top_services: top_services(orders),
    }
}

/// Per-employee task completion and remaining workload, one row per
/// employee in first-seen task order.
pub fn productivity_report(tasks: &[EmployeeTask]) -> Vec<ProductivityRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<ProductivityRow> = Vec::new();

    for task in tasks {
        let i = *index.entry(task.employee_id.as_str()).or_insert_with(|| {
            rows.push(ProductivityRow {
                employee_id: task.employee_id.clone(),
                total_tasks: 0,
                completed_tasks: 0,
                completion_rate: 0,
                hours_remaining: 0,
            });
            rows.len() - 1
        });
        rows[i].total_tasks += 1;
        if task.completed {
            rows[i].completed_tasks += 1;
        } else {
            rows[i].hours_remaining += task.hours_remaining as i64;
        }
    }

    for row in &mut rows {
        row.completion_rate = completion_rate(row.completed_tasks, row.total_tasks);
    }
    rows
}
