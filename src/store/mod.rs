pub mod document;
pub mod memory;
pub mod relational;
pub mod seed;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{AppConfig, BackendKind};
use crate::models::academy::{
    Certificate, Course, Enrollment, LessonProgress, NewCertificate, NewCourse, NewEnrollment,
    NewLessonProgress, NewQuizAttempt, QuizAttempt,
};
use crate::models::accounts::{Client, Employee, NewClient, NewEmployee, NewStudent, Student};
use crate::models::catalog::{DiscountCode, NewDiscountCode, NewService, Service};
use crate::models::chat::{ChatConversation, ChatMessage, NewChatMessage, OpenConversation};
use crate::models::orders::{Invoice, NewOrder, Order, OrderStatus, PaymentStatus, PaymentUpdate};
use crate::models::projects::{
    EmployeeTask, NewEmployeeTask, NewProject, Project, ProjectStatus, UpdateTaskProgress,
};
use crate::models::requests::{
    FeatureRequest, ModificationRequest, NewRequest, RequestStatus, SetFeatureEstimate,
};
use crate::reports::DashboardStats;

pub use document::DocumentStore;
pub use memory::MemoryStore;
pub use relational::RelationalStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("document store error: {0}")]
    Document(#[from] mongodb::error::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists for {key}")]
    Conflict { entity: &'static str, key: String },

    #[error("{operation} is not supported by the {backend} backend")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Opaque entity id: a fresh UUID string. The document backend substitutes
/// its native ObjectId hex — callers must not assume either format.
pub(crate) fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Business identifier: `<PREFIX>-<millis>-<6 hex chars>`. The random
/// suffix closes the collision window of a purely timestamp-derived
/// number under rapid concurrent creation.
pub(crate) fn business_number(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{millis}-{}", &suffix[..6])
}

/// The capability contract every backend satisfies.
///
/// Per entity family: `create`, `get` by id, natural-key lookups, list /
/// list-by-parent, and named narrow mutations only — there is no generic
/// field write anywhere. Absence is `Ok(None)`, never an error; the store
/// trusts inputs the handler layer has already validated.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // ── accounts ──
    async fn create_client(&self, input: NewClient) -> StoreResult<Client>;
    async fn client(&self, id: &str) -> StoreResult<Option<Client>>;
    async fn client_by_email(&self, email: &str) -> StoreResult<Option<Client>>;
    async fn clients(&self) -> StoreResult<Vec<Client>>;

    async fn create_employee(&self, input: NewEmployee) -> StoreResult<Employee>;
    async fn employee(&self, id: &str) -> StoreResult<Option<Employee>>;
    async fn employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>>;
    async fn employees(&self) -> StoreResult<Vec<Employee>>;

    async fn create_student(&self, input: NewStudent) -> StoreResult<Student>;
    async fn student(&self, id: &str) -> StoreResult<Option<Student>>;
    async fn student_by_email(&self, email: &str) -> StoreResult<Option<Student>>;
    async fn students(&self) -> StoreResult<Vec<Student>>;

    // ── catalog ──
    async fn create_service(&self, input: NewService) -> StoreResult<Service>;
    async fn service(&self, id: &str) -> StoreResult<Option<Service>>;
    async fn services(&self) -> StoreResult<Vec<Service>>;
    async fn set_service_active(&self, id: &str, active: bool) -> StoreResult<Service>;

    async fn create_discount_code(&self, input: NewDiscountCode) -> StoreResult<DiscountCode>;
    async fn discount_code(&self, code: &str) -> StoreResult<Option<DiscountCode>>;
    async fn discount_codes(&self) -> StoreResult<Vec<DiscountCode>>;

    // ── orders & invoices ──
    async fn create_order(&self, input: NewOrder) -> StoreResult<Order>;
    async fn order(&self, id: &str) -> StoreResult<Option<Order>>;
    async fn order_by_number(&self, number: &str) -> StoreResult<Option<Order>>;
    async fn orders(&self) -> StoreResult<Vec<Order>>;
    /// Resolves the client's email, then filters orders on the
    /// denormalized customer email — there is no foreign key between the
    /// two entities.
    async fn orders_by_client(&self, client_id: &str) -> StoreResult<Vec<Order>>;
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order>;
    /// Updates the payment fields; a transition to `Completed` issues the
    /// order's invoice as part of the same write when none exists yet.
    async fn update_order_payment(
        &self,
        id: &str,
        status: PaymentStatus,
        method: Option<String>,
    ) -> StoreResult<PaymentUpdate>;

    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>>;
    async fn invoices(&self) -> StoreResult<Vec<Invoice>>;
    /// Reconciliation check: paid orders that somehow have no invoice.
    async fn unbilled_paid_orders(&self) -> StoreResult<Vec<Order>>;

    // ── projects & tasks ──
    async fn create_project(&self, input: NewProject) -> StoreResult<Project>;
    async fn project(&self, id: &str) -> StoreResult<Option<Project>>;
    async fn projects(&self) -> StoreResult<Vec<Project>>;
    async fn projects_by_client(&self, client_id: &str) -> StoreResult<Vec<Project>>;
    async fn update_project_status(&self, id: &str, status: ProjectStatus) -> StoreResult<Project>;
    async fn update_project_days(&self, id: &str, days_remaining: i32) -> StoreResult<Project>;

    async fn create_task(&self, input: NewEmployeeTask) -> StoreResult<EmployeeTask>;
    async fn tasks_by_employee(&self, employee_id: &str) -> StoreResult<Vec<EmployeeTask>>;
    async fn tasks_by_project(&self, project_id: &str) -> StoreResult<Vec<EmployeeTask>>;
    async fn all_tasks(&self) -> StoreResult<Vec<EmployeeTask>>;
    async fn update_task_progress(
        &self,
        id: &str,
        input: UpdateTaskProgress,
    ) -> StoreResult<EmployeeTask>;

    // ── academy ──
    async fn create_course(&self, input: NewCourse) -> StoreResult<Course>;
    async fn course(&self, id: &str) -> StoreResult<Option<Course>>;
    async fn courses(&self) -> StoreResult<Vec<Course>>;

    async fn create_enrollment(&self, input: NewEnrollment) -> StoreResult<Enrollment>;
    async fn enrollments_by_student(&self, student_id: &str) -> StoreResult<Vec<Enrollment>>;
    async fn update_enrollment_progress(&self, id: &str, progress: i32)
    -> StoreResult<Enrollment>;

    async fn record_lesson_progress(
        &self,
        input: NewLessonProgress,
    ) -> StoreResult<LessonProgress>;
    async fn lesson_progress(&self, enrollment_id: &str) -> StoreResult<Vec<LessonProgress>>;

    async fn record_quiz_attempt(&self, input: NewQuizAttempt) -> StoreResult<QuizAttempt>;
    async fn quiz_attempts(&self, enrollment_id: &str) -> StoreResult<Vec<QuizAttempt>>;

    async fn issue_certificate(&self, input: NewCertificate) -> StoreResult<Certificate>;
    async fn certificates_by_student(&self, student_id: &str) -> StoreResult<Vec<Certificate>>;

    // ── bootstrap & reporting ──
    /// Idempotent: inserts the default catalog only where it is absent.
    async fn ensure_seed_data(&self) -> StoreResult<()>;
    async fn dashboard_stats(&self) -> StoreResult<DashboardStats>;
}

/// Collaboration segment: chat threads and change requests. The document
/// backend does not implement this trait — the gap is a designed
/// asymmetry surfaced through [`Store::collab`], not a silent no-op.
#[async_trait]
pub trait CollabStore: Send + Sync {
    async fn open_conversation(&self, input: OpenConversation) -> StoreResult<ChatConversation>;
    async fn conversation(&self, id: &str) -> StoreResult<Option<ChatConversation>>;
    async fn conversations_by_client(&self, client_id: &str)
    -> StoreResult<Vec<ChatConversation>>;
    /// Appends a message and touches the parent conversation's
    /// `last_activity_at` in the same write.
    async fn create_message(&self, input: NewChatMessage) -> StoreResult<ChatMessage>;
    async fn messages(&self, conversation_id: &str) -> StoreResult<Vec<ChatMessage>>;
    /// Marks every message the reader did not send as read; returns the
    /// number of messages flipped.
    async fn mark_messages_read(&self, conversation_id: &str, reader_id: &str)
    -> StoreResult<u64>;

    async fn create_modification_request(
        &self,
        input: NewRequest,
    ) -> StoreResult<ModificationRequest>;
    async fn modification_requests_by_project(
        &self,
        project_id: &str,
    ) -> StoreResult<Vec<ModificationRequest>>;
    async fn update_modification_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> StoreResult<ModificationRequest>;

    async fn create_feature_request(&self, input: NewRequest) -> StoreResult<FeatureRequest>;
    async fn feature_requests_by_project(
        &self,
        project_id: &str,
    ) -> StoreResult<Vec<FeatureRequest>>;
    async fn update_feature_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> StoreResult<FeatureRequest>;
    async fn set_feature_request_estimate(
        &self,
        id: &str,
        input: SetFeatureEstimate,
    ) -> StoreResult<FeatureRequest>;
}

/// The backend selected once at boot, behind the two store traits.
#[derive(Clone)]
pub struct Store {
    backend: BackendKind,
    entities: Arc<dyn EntityStore>,
    collab: Option<Arc<dyn CollabStore>>,
}

impl Store {
    /// Connect the configured backend, run migrations where applicable
    /// and make sure the default catalog is present.
    pub async fn connect(config: &AppConfig) -> StoreResult<Self> {
        let store = match config.backend {
            BackendKind::Memory => Self::memory(),
            BackendKind::Postgres => {
                let relational = Arc::new(RelationalStore::connect(&config.database_url).await?);
                Self {
                    backend: BackendKind::Postgres,
                    entities: relational.clone(),
                    collab: Some(relational),
                }
            }
            BackendKind::MongoDb => {
                let document =
                    Arc::new(DocumentStore::connect(&config.mongodb_url, &config.mongodb_db).await?);
                Self {
                    backend: BackendKind::MongoDb,
                    entities: document,
                    collab: None,
                }
            }
        };
        store.entities().ensure_seed_data().await?;
        Ok(store)
    }

    /// The disposable in-memory backend, seeded at construction.
    pub fn memory() -> Self {
        let memory = Arc::new(MemoryStore::new());
        Self {
            backend: BackendKind::Memory,
            entities: memory.clone(),
            collab: Some(memory),
        }
    }

    /// Wrap an already-constructed document backend. Used by tests that
    /// need the capability-gap behavior without a live server.
    pub fn from_document(document: DocumentStore) -> Self {
        Self {
            backend: BackendKind::MongoDb,
            entities: Arc::new(document),
            collab: None,
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn entities(&self) -> &dyn EntityStore {
        self.entities.as_ref()
    }

    /// The collaboration segment, or a hard `Unsupported` error on a
    /// backend that lacks it. Callers must propagate the error — an empty
    /// success here would hide a real capability gap from operators.
    pub fn collab(&self) -> StoreResult<&dyn CollabStore> {
        self.collab
            .as_deref()
            .ok_or(StoreError::Unsupported {
                backend: self.backend.as_str(),
                operation: "chat/requests",
            })
    }
}
