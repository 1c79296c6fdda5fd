//! Tests for the entity-store contract, exercised through the in-memory
//! reference backend, plus the capability-gap behavior of the document
//! backend (which never touches the network here — the driver connects
//! lazily).
//!
//! Run with: `cargo test --test store_test`
use agencyhub_backend::models::accounts::NewClient;
use agencyhub_backend::models::chat::{NewChatMessage, OpenConversation};
use agencyhub_backend::models::orders::{NewOrder, PaymentStatus, ServiceRef};
use agencyhub_backend::models::projects::{NewEmployeeTask, NewProject, UpdateTaskProgress};
use agencyhub_backend::models::requests::NewRequest;
use agencyhub_backend::config::BackendKind;
use agencyhub_backend::store::{DocumentStore, Store, StoreError};

fn new_client(name: &str, email: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "hashed".to_string(),
        company: None,
        phone: None,
    }
}

fn new_order(email: &str, price: i64, service_id: Option<String>) -> NewOrder {
    NewOrder {
        customer_name: "Customer".to_string(),
        customer_email: email.to_string(),
        customer_phone: None,
        service_id,
        price,
        discount_code: None,
    }
}

#[tokio::test]
async fn test_create_then_get_returns_equal_entity() {
    let store = Store::memory();
    let created = store
        .entities()
        .create_client(new_client("Alice", "alice@example.com"))
        .await
        .unwrap();

    let fetched = store
        .entities()
        .client(&created.id)
        .await
        .unwrap()
        .expect("client should exist");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.email, "alice@example.com");

    let by_email = store
        .entities()
        .client_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("natural-key lookup should resolve");
    assert_eq!(by_email.id, created.id);
}

#[tokio::test]
async fn test_missing_ids_resolve_to_none_not_errors() {
    let store = Store::memory();
    assert!(store.entities().client("no-such-id").await.unwrap().is_none());
    assert!(store.entities().order("no-such-id").await.unwrap().is_none());
    assert!(store.entities().service("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts_within_namespace_only() {
    let store = Store::memory();
    store
        .entities()
        .create_client(new_client("Alice", "shared@example.com"))
        .await
        .unwrap();

    let dup = store
        .entities()
        .create_client(new_client("Alice Again", "shared@example.com"))
        .await;
    assert!(matches!(dup, Err(StoreError::Conflict { .. })));

    // The same address is free in the student namespace.
    let student = store
        .entities()
        .create_student(agencyhub_backend::models::accounts::NewStudent {
            name: "Alice Student".to_string(),
            email: "shared@example.com".to_string(),
            password_hash: "hashed".to_string(),
            phone: None,
        })
        .await;
    assert!(student.is_ok());
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let store = Store::memory();
    let after_construction = store.entities().services().await.unwrap().len();
    assert!(after_construction > 0);

    store.entities().ensure_seed_data().await.unwrap();
    store.entities().ensure_seed_data().await.unwrap();

    assert_eq!(
        store.entities().services().await.unwrap().len(),
        after_construction
    );
    let codes = store.entities().discount_codes().await.unwrap();
    let unique: std::collections::HashSet<&str> =
        codes.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes.len(), unique.len());
}

#[tokio::test]
async fn test_order_with_unknown_service_gets_missing_link() {
    let store = Store::memory();
    let order = store
        .entities()
        .create_order(new_order(
            "guest@example.com",
            100,
            Some("not-a-real-service".to_string()),
        ))
        .await
        .unwrap();

    assert!(order.service.is_missing());
    assert!(order.service_name.is_none());

    let with_service = {
        let services = store.entities().services().await.unwrap();
        store
            .entities()
            .create_order(new_order(
                "guest@example.com",
                100,
                Some(services[0].id.clone()),
            ))
            .await
            .unwrap()
    };
    assert!(matches!(with_service.service, ServiceRef::Valid(_)));
    assert!(with_service.service_name.is_some());
    let services = store.entities().services().await.unwrap();
    assert!(services.iter().any(|s| Some(s.id.as_str()) == with_service.service.id()));
}

#[tokio::test]
async fn test_order_numbers_are_unique_and_prefixed() {
    let store = Store::memory();
    let mut numbers = std::collections::HashSet::new();
    for _ in 0..50 {
        let order = store
            .entities()
            .create_order(new_order("bulk@example.com", 10, None))
            .await
            .unwrap();
        assert!(order.order_number.starts_with("ORD-"));
        assert!(numbers.insert(order.order_number));
    }
}

#[tokio::test]
async fn test_payment_completion_issues_invoice_exactly_once() {
    let store = Store::memory();
    let order = store
        .entities()
        .create_order(new_order("payer@example.com", 500, None))
        .await
        .unwrap();

    let update = store
        .entities()
        .update_order_payment(&order.id, PaymentStatus::Completed, Some("card".to_string()))
        .await
        .unwrap();
    let invoice = update.invoice.expect("completion should issue an invoice");
    assert!(invoice.invoice_number.starts_with("INV-"));
    assert_eq!(invoice.amount, 500);
    assert_eq!(invoice.order_id, order.id);

    // Later mutations of the order never touch the issued invoice, and a
    // repeat transition does not issue a second one.
    store
        .entities()
        .update_order_status(&order.id, agencyhub_backend::models::orders::OrderStatus::Completed)
        .await
        .unwrap();
    let again = store
        .entities()
        .update_order_payment(&order.id, PaymentStatus::Completed, None)
        .await
        .unwrap();
    assert!(again.invoice.is_none());

    let invoices = store.entities().invoices().await.unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].amount, 500);
}

#[tokio::test]
async fn test_unbilled_paid_orders_reconciliation() {
    let store = Store::memory();
    let order = store
        .entities()
        .create_order(new_order("payer@example.com", 500, None))
        .await
        .unwrap();

    // Nothing paid yet: nothing to reconcile.
    assert!(store.entities().unbilled_paid_orders().await.unwrap().is_empty());

    // The normal flow issues the invoice in the same write, so the
    // reconciliation stays empty afterwards too.
    store
        .entities()
        .update_order_payment(&order.id, PaymentStatus::Completed, None)
        .await
        .unwrap();
    assert!(store.entities().unbilled_paid_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_orders_by_client_joins_on_stored_email() {
    let store = Store::memory();
    let client = store
        .entities()
        .create_client(new_client("Joined", "joined@example.com"))
        .await
        .unwrap();
    store
        .entities()
        .create_order(new_order("joined@example.com", 100, None))
        .await
        .unwrap();
    store
        .entities()
        .create_order(new_order("other@example.com", 100, None))
        .await
        .unwrap();

    let orders = store.entities().orders_by_client(&client.id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].customer_email, "joined@example.com");

    // The relation is denormalized through the email string: an order
    // placed under a different address is invisible here even if it was
    // the same person.
    let unknown = store
        .entities()
        .orders_by_client("nonexistent-client")
        .await
        .unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn test_task_progress_fields_update_independently() {
    let store = Store::memory();
    let task = store
        .entities()
        .create_task(NewEmployeeTask {
            employee_id: "emp-1".to_string(),
            project_id: "proj-1".to_string(),
            title: "Wire the API".to_string(),
            hours_remaining: 8,
        })
        .await
        .unwrap();
    assert!(!task.completed);

    let hours_only = store
        .entities()
        .update_task_progress(
            &task.id,
            UpdateTaskProgress {
                hours_remaining: Some(3),
                completed: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(hours_only.hours_remaining, 3);
    assert!(!hours_only.completed);

    let completed_only = store
        .entities()
        .update_task_progress(
            &task.id,
            UpdateTaskProgress {
                hours_remaining: None,
                completed: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(completed_only.hours_remaining, 3);
    assert!(completed_only.completed);
}

#[tokio::test]
async fn test_enrollment_progress_is_set_not_derived() {
    let store = Store::memory();
    let courses = store.entities().courses().await.unwrap();
    let enrollment = store
        .entities()
        .create_enrollment(agencyhub_backend::models::academy::NewEnrollment {
            student_id: "student-1".to_string(),
            course_id: courses[0].id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(enrollment.progress, 0);

    // Recording lessons never moves the stored progress integer.
    store
        .entities()
        .record_lesson_progress(agencyhub_backend::models::academy::NewLessonProgress {
            enrollment_id: enrollment.id.clone(),
            lesson_index: 1,
        })
        .await
        .unwrap();
    let unchanged = store
        .entities()
        .enrollments_by_student("student-1")
        .await
        .unwrap();
    assert_eq!(unchanged[0].progress, 0);

    let updated = store
        .entities()
        .update_enrollment_progress(&enrollment.id, 40)
        .await
        .unwrap();
    assert_eq!(updated.progress, 40);

    // Out-of-range values clamp to the 0–100 contract.
    let clamped = store
        .entities()
        .update_enrollment_progress(&enrollment.id, 250)
        .await
        .unwrap();
    assert_eq!(clamped.progress, 100);
}

#[tokio::test]
async fn test_message_append_touches_conversation() {
    let store = Store::memory();
    let collab = store.collab().expect("memory backend has the collab segment");

    let conversation = collab
        .open_conversation(OpenConversation {
            project_id: "proj-1".to_string(),
            client_id: "client-1".to_string(),
            employee_id: None,
        })
        .await
        .unwrap();

    // Re-opening the same triple returns the existing thread.
    let reopened = collab
        .open_conversation(OpenConversation {
            project_id: "proj-1".to_string(),
            client_id: "client-1".to_string(),
            employee_id: None,
        })
        .await
        .unwrap();
    assert_eq!(reopened.id, conversation.id);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let message = collab
        .create_message(NewChatMessage {
            conversation_id: conversation.id.clone(),
            sender_id: "client-1".to_string(),
            content: "Any progress?".to_string(),
        })
        .await
        .unwrap();
    assert!(!message.is_read);

    let touched = collab
        .conversation(&conversation.id)
        .await
        .unwrap()
        .expect("conversation should exist");
    assert!(touched.last_activity_at > conversation.last_activity_at);
}

#[tokio::test]
async fn test_mark_read_flips_only_other_senders_messages() {
    let store = Store::memory();
    let collab = store.collab().unwrap();
    let conversation = collab
        .open_conversation(OpenConversation {
            project_id: "proj-1".to_string(),
            client_id: "client-1".to_string(),
            employee_id: Some("emp-1".to_string()),
        })
        .await
        .unwrap();

    for (sender, content) in [
        ("client-1", "Hello"),
        ("emp-1", "Hi, shipping today"),
        ("client-1", "Great"),
    ] {
        collab
            .create_message(NewChatMessage {
                conversation_id: conversation.id.clone(),
                sender_id: sender.to_string(),
                content: content.to_string(),
            })
            .await
            .unwrap();
    }

    // The employee reads the thread: only the client's two messages flip.
    let flipped = collab
        .mark_messages_read(&conversation.id, "emp-1")
        .await
        .unwrap();
    assert_eq!(flipped, 2);

    let messages = collab.messages(&conversation.id).await.unwrap();
    assert!(messages[0].is_read);
    assert!(!messages[1].is_read);
    assert!(messages[2].is_read);

    // Repeat reads find nothing left to flip.
    assert_eq!(
        collab
            .mark_messages_read(&conversation.id, "emp-1")
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_feature_request_estimates_are_staff_set_fields() {
    let store = Store::memory();
    let collab = store.collab().unwrap();
    let request = collab
        .create_feature_request(NewRequest {
            project_id: "proj-1".to_string(),
            client_id: "client-1".to_string(),
            title: "Dark mode".to_string(),
            details: "The dashboard needs a dark theme.".to_string(),
        })
        .await
        .unwrap();
    assert!(request.estimated_cost.is_none());

    let estimated = collab
        .set_feature_request_estimate(
            &request.id,
            agencyhub_backend::models::requests::SetFeatureEstimate {
                estimated_cost: 40_000,
                estimated_days: 10,
            },
        )
        .await
        .unwrap();
    assert_eq!(estimated.estimated_cost, Some(40_000));
    assert_eq!(estimated.estimated_days, Some(10));
}

#[tokio::test]
async fn test_document_backend_rejects_collab_segment() {
    // The driver connects lazily, so building the handle needs no server.
    let document = DocumentStore::connect("mongodb://127.0.0.1:27017", "agencyhub_test")
        .await
        .expect("lazy connect should not require a live server");
    let store = Store::from_document(document);
    assert_eq!(store.backend(), BackendKind::MongoDb);

    let err = match store.collab() {
        Ok(_) => panic!("collab must be a hard error, not an empty success"),
        Err(e) => e,
    };
    assert!(matches!(err, StoreError::Unsupported { .. }));
    assert!(err.to_string().contains("mongodb"));
}

#[tokio::test]
async fn test_project_pipeline_and_days_counter() {
    let store = Store::memory();
    let client = store
        .entities()
        .create_client(new_client("Owner", "owner@example.com"))
        .await
        .unwrap();

    let project = store
        .entities()
        .create_project(NewProject {
            client_id: client.id.clone(),
            name: "Site relaunch".to_string(),
            description: None,
            days_remaining: 30,
        })
        .await
        .unwrap();
    assert_eq!(
        project.status,
        agencyhub_backend::models::projects::ProjectStatus::Analysis
    );

    let advanced = store
        .entities()
        .update_project_status(
            &project.id,
            agencyhub_backend::models::projects::ProjectStatus::Design,
        )
        .await
        .unwrap();
    assert_eq!(
        advanced.status,
        agencyhub_backend::models::projects::ProjectStatus::Design
    );

    // The counter is externally maintained, not computed from dates.
    let counted = store
        .entities()
        .update_project_days(&project.id, 12)
        .await
        .unwrap();
    assert_eq!(counted.days_remaining, 12);

    let listed = store.entities().projects_by_client(&client.id).await.unwrap();
    assert_eq!(listed.len(), 1);
}
