//! End-to-end scenario over the in-memory backend: register a client,
//! open a project, place an order, complete payment, and watch the
//! invoice and dashboard revenue follow.
//!
//! Run with: `cargo test --test order_flow_test`
use agencyhub_backend::models::accounts::NewClient;
use agencyhub_backend::models::orders::{NewOrder, PaymentStatus};
use agencyhub_backend::models::projects::{NewProject, ProjectStatus};
use agencyhub_backend::store::Store;

#[tokio::test]
async fn test_order_to_invoice_to_dashboard() {
    let store = Store::memory();
    let baseline = store.entities().dashboard_stats().await.unwrap();

    // Register Sara (email unique within the client namespace).
    let sara = store
        .entities()
        .create_client(NewClient {
            name: "Sara".to_string(),
            email: "sara@example.com".to_string(),
            password_hash: "hashed".to_string(),
            company: None,
            phone: None,
        })
        .await
        .unwrap();

    // Open her project in the first pipeline stage.
    let project = store
        .entities()
        .create_project(NewProject {
            client_id: sara.id.clone(),
            name: "Marketing site".to_string(),
            description: Some("Five pages and a blog.".to_string()),
            days_remaining: 30,
        })
        .await
        .unwrap();
    assert_eq!(project.status, ProjectStatus::Analysis);

    // Place an order for 500, unpaid.
    let order = store
        .entities()
        .create_order(NewOrder {
            customer_name: "Sara".to_string(),
            customer_email: "sara@example.com".to_string(),
            customer_phone: None,
            service_id: None,
            price: 500,
            discount_code: None,
        })
        .await
        .unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert!(store.entities().invoices().await.unwrap().is_empty());

    // Unpaid revenue never shows up on the dashboard.
    let before_payment = store.entities().dashboard_stats().await.unwrap();
    assert_eq!(before_payment.total_revenue, baseline.total_revenue);
    assert_eq!(before_payment.total_orders, baseline.total_orders + 1);

    // Complete the payment: the invoice is issued in the same write.
    let update = store
        .entities()
        .update_order_payment(&order.id, PaymentStatus::Completed, Some("card".to_string()))
        .await
        .unwrap();
    let invoice = update.invoice.expect("payment completion issues the invoice");
    assert_eq!(invoice.amount, 500);
    assert_eq!(invoice.customer_email, "sara@example.com");

    // The dashboard now includes the 500 and Sara herself.
    let stats = store.entities().dashboard_stats().await.unwrap();
    assert_eq!(stats.total_revenue, baseline.total_revenue + 500);
    assert_eq!(stats.total_clients, baseline.total_clients + 1);
    assert_eq!(stats.active_projects, baseline.active_projects + 1);

    // Her order history resolves through the stored email.
    let orders = store.entities().orders_by_client(&sara.id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_number, order.order_number);
}
