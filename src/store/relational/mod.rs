//! Relational backend over SeaORM/Postgres. Owns schema migrations,
//! idempotent catalog seeding and the SQL-side dashboard aggregates.
//! Two-step writes (payment → invoice, message → conversation touch) run
//! inside one transaction here.

pub mod entities;

use async_trait::async_trait;
use chrono::{Datelike, TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Alias, ExprTrait, OnConflict};
use sea_orm::*;
use uuid::Uuid;

use crate::models::academy::{
    Certificate, Course, Enrollment, LessonProgress, NewCertificate, NewCourse, NewEnrollment,
    NewLessonProgress, NewQuizAttempt, QuizAttempt,
};
use crate::models::accounts::{Client, Employee, NewClient, NewEmployee, NewStudent, Student};
use crate::models::catalog::{DiscountCode, NewDiscountCode, NewService, Service};
use crate::models::chat::{ChatConversation, ChatMessage, NewChatMessage, OpenConversation};
use crate::models::orders::{
    Invoice, NewOrder, Order, OrderStatus, PaymentStatus, PaymentUpdate,
};
use crate::models::projects::{
    EmployeeTask, NewEmployeeTask, NewProject, Project, ProjectStatus, UpdateTaskProgress,
};
use crate::models::requests::{
    FeatureRequest, ModificationRequest, NewRequest, RequestStatus, SetFeatureEstimate,
};
use crate::reports::DashboardStats;
use crate::store::seed;
use crate::store::{
    CollabStore, EntityStore, StoreError, StoreResult, business_number,
};

use entities::academy::{certificates, courses, enrollments, lesson_progress, quiz_attempts};
use entities::accounts::{clients, employees, students};
use entities::catalog::{discount_codes, services};
use entities::chat::{conversations, messages};
use entities::orders::{invoices, orders};
use entities::projects::{employee_tasks, projects};
use entities::requests::{feature_requests, modification_requests};

pub struct RelationalStore {
    db: DatabaseConnection,
}

/// Ids arriving over the wire are opaque strings; one that does not parse
/// as a UUID simply cannot name a row here.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn txn_err(e: TransactionError<StoreError>) -> StoreError {
    match e {
        TransactionError::Connection(db) => StoreError::Database(db),
        TransactionError::Transaction(inner) => inner,
    }
}

impl RelationalStore {
    /// Connect, migrate and hand back a ready store.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let db = Database::connect(database_url).await?;
        migration::Migrator::up(&db, None).await?;
        Ok(Self { db })
    }

    async fn sum_paid_orders<F>(&self, extra: F) -> StoreResult<i64>
    where
        F: FnOnce(Select<orders::Entity>) -> Select<orders::Entity>,
    {
        let query = extra(
            orders::Entity::find()
                .filter(orders::Column::PaymentStatus.eq(PaymentStatus::Completed.as_str())),
        );
        let total: Option<Option<i64>> = query
            .select_only()
            .column_as(
                orders::Column::Price.sum().cast_as(Alias::new("BIGINT")),
                "total",
            )
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.flatten().unwrap_or(0))
    }
}

#[async_trait]
impl EntityStore for RelationalStore {
    async fn create_client(&self, input: NewClient) -> StoreResult<Client> {
        if clients::Entity::find()
            .filter(clients::Column::Email.eq(&input.email))
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict {
                entity: "client",
                key: input.email,
            });
        }
        let row = clients::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            company: Set(input.company),
            phone: Set(input.phone),
            created_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn client(&self, id: &str) -> StoreResult<Option<Client>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn client_by_email(&self, email: &str) -> StoreResult<Option<Client>> {
        Ok(clients::Entity::find()
            .filter(clients::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn clients(&self) -> StoreResult<Vec<Client>> {
        Ok(clients::Entity::find()
            .order_by_asc(clients::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create_employee(&self, input: NewEmployee) -> StoreResult<Employee> {
        if employees::Entity::find()
            .filter(employees::Column::Email.eq(&input.email))
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict {
                entity: "employee",
                key: input.email,
            });
        }
        let row = employees::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            job_title: Set(input.job_title),
            created_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn employee(&self, id: &str) -> StoreResult<Option<Employee>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(employees::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        Ok(employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(employees::Entity::find()
            .order_by_asc(employees::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create_student(&self, input: NewStudent) -> StoreResult<Student> {
        if students::Entity::find()
            .filter(students::Column::Email.eq(&input.email))
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict {
                entity: "student",
                key: input.email,
            });
        }
        let row = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            phone: Set(input.phone),
            created_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn student(&self, id: &str) -> StoreResult<Option<Student>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(students::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        Ok(students::Entity::find()
            .filter(students::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn students(&self) -> StoreResult<Vec<Student>> {
        Ok(students::Entity::find()
            .order_by_asc(students::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create_service(&self, input: NewService) -> StoreResult<Service> {
        let row = services::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            category: Set(input.category.as_str().to_string()),
            price: Set(input.price),
            features: Set(serde_json::json!(input.features)),
            is_active: Set(input.is_active),
            created_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn service(&self, id: &str) -> StoreResult<Option<Service>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(services::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn services(&self) -> StoreResult<Vec<Service>> {
        Ok(services::Entity::find()
            .order_by_asc(services::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn set_service_active(&self, id: &str, active: bool) -> StoreResult<Service> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("service", id))?;
        let row = services::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("service", id))?;
        let mut active_model: services::ActiveModel = row.into();
        active_model.is_active = Set(active);
        Ok(active_model.update(&self.db).await?.into())
    }

    async fn create_discount_code(&self, input: NewDiscountCode) -> StoreResult<DiscountCode> {
        if discount_codes::Entity::find()
            .filter(discount_codes::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict {
                entity: "discount code",
                key: input.code,
            });
        }
        let row = discount_codes::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            percent_off: Set(input.percent_off),
            is_active: Set(input.is_active),
            expires_at: Set(input.expires_at),
            created_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn discount_code(&self, code: &str) -> StoreResult<Option<DiscountCode>> {
        Ok(discount_codes::Entity::find()
            .filter(discount_codes::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn discount_codes(&self) -> StoreResult<Vec<DiscountCode>> {
        Ok(discount_codes::Entity::find()
            .order_by_asc(discount_codes::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create_order(&self, input: NewOrder) -> StoreResult<Order> {
        // Resolve the service link; an unknown id degrades to a null link
        // rather than rejecting the order.
        let service = match input.service_id.as_deref().and_then(parse_id) {
            Some(id) => services::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };
        let row = orders::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_number: Set(business_number("ORD")),
            customer_name: Set(input.customer_name),
            customer_email: Set(input.customer_email),
            customer_phone: Set(input.customer_phone),
            service_id: Set(service.as_ref().map(|s| s.id)),
            service_name: Set(service.map(|s| s.name)),
            price: Set(input.price),
            discount_code: Set(input.discount_code),
            status: Set(OrderStatus::Pending.as_str().to_string()),
            payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
            payment_method: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn order(&self, id: &str) -> StoreResult<Option<Order>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn order_by_number(&self, number: &str) -> StoreResult<Option<Order>> {
        Ok(orders::Entity::find()
            .filter(orders::Column::OrderNumber.eq(number))
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn orders(&self) -> StoreResult<Vec<Order>> {
        Ok(orders::Entity::find()
            .order_by_asc(orders::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn orders_by_client(&self, client_id: &str) -> StoreResult<Vec<Order>> {
        // Manual two-step join: resolve the client's email, then match
        // orders on the denormalized customer email. Renaming a client's
        // email orphans their history from this lookup.
        let Some(id) = parse_id(client_id) else {
            return Ok(Vec::new());
        };
        let Some(client) = clients::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(Vec::new());
        };
        Ok(orders::Entity::find()
            .filter(orders::Column::CustomerEmail.eq(client.email))
            .order_by_asc(orders::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("order", id))?;
        let row = orders::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("order", id))?;
        let mut active: orders::ActiveModel = row.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }

    async fn update_order_payment(
        &self,
        id: &str,
        status: PaymentStatus,
        method: Option<String>,
    ) -> StoreResult<PaymentUpdate> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("order", id))?;
        let id_owned = id.to_string();

        // Payment update and invoice issue are one transaction: a crash
        // between the two writes cannot leave a paid order unbilled.
        self.db
            .transaction::<_, PaymentUpdate, StoreError>(move |txn| {
                Box::pin(async move {
                    let row = orders::Entity::find_by_id(uuid)
                        .one(txn)
                        .await?
                        .ok_or_else(|| StoreError::not_found("order", &id_owned))?;

                    let mut active: orders::ActiveModel = row.into();
                    active.payment_status = Set(status.as_str().to_string());
                    if method.is_some() {
                        active.payment_method = Set(method);
                    }
                    active.updated_at = Set(Some(Utc::now()));
                    let updated = active.update(txn).await?;

                    let mut invoice = None;
                    if status == PaymentStatus::Completed {
                        let existing = invoices::Entity::find()
                            .filter(invoices::Column::OrderId.eq(updated.id))
                            .one(txn)
                            .await?;
                        if existing.is_none() {
                            let issued = invoices::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                invoice_number: Set(business_number("INV")),
                                order_id: Set(updated.id),
                                customer_name: Set(updated.customer_name.clone()),
                                customer_email: Set(updated.customer_email.clone()),
                                service_name: Set(updated.service_name.clone()),
                                amount: Set(updated.price),
                                issued_at: Set(Utc::now()),
                            };
                            invoice = Some(issued.insert(txn).await?.into());
                        }
                    }

                    Ok(PaymentUpdate {
                        order: updated.into(),
                        invoice,
                    })
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn invoices(&self) -> StoreResult<Vec<Invoice>> {
        Ok(invoices::Entity::find()
            .order_by_asc(invoices::Column::IssuedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn unbilled_paid_orders(&self) -> StoreResult<Vec<Order>> {
        let billed: Vec<Uuid> = invoices::Entity::find()
            .select_only()
            .column(invoices::Column::OrderId)
            .into_tuple()
            .all(&self.db)
            .await?;
        let mut query = orders::Entity::find()
            .filter(orders::Column::PaymentStatus.eq(PaymentStatus::Completed.as_str()));
        if !billed.is_empty() {
            query = query.filter(orders::Column::Id.is_not_in(billed));
        }
        Ok(query
            .order_by_asc(orders::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create_project(&self, input: NewProject) -> StoreResult<Project> {
        let client_id = parse_id(&input.client_id)
            .ok_or_else(|| StoreError::not_found("client", &input.client_id))?;
        let row = projects::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(client_id),
            name: Set(input.name),
            description: Set(input.description),
            status: Set(ProjectStatus::Analysis.as_str().to_string()),
            days_remaining: Set(input.days_remaining),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn project(&self, id: &str) -> StoreResult<Option<Project>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(projects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn projects(&self) -> StoreResult<Vec<Project>> {
        Ok(projects::Entity::find()
            .order_by_asc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn projects_by_client(&self, client_id: &str) -> StoreResult<Vec<Project>> {
        let Some(id) = parse_id(client_id) else {
            return Ok(Vec::new());
        };
        Ok(projects::Entity::find()
            .filter(projects::Column::ClientId.eq(id))
            .order_by_asc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn update_project_status(&self, id: &str, status: ProjectStatus) -> StoreResult<Project> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("project", id))?;
        let row = projects::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("project", id))?;
        let mut active: projects::ActiveModel = row.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }

    async fn update_project_days(&self, id: &str, days_remaining: i32) -> StoreResult<Project> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("project", id))?;
        let row = projects::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("project", id))?;
        let mut active: projects::ActiveModel = row.into();
        active.days_remaining = Set(days_remaining);
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }

    async fn create_task(&self, input: NewEmployeeTask) -> StoreResult<EmployeeTask> {
        let employee_id = parse_id(&input.employee_id)
            .ok_or_else(|| StoreError::not_found("employee", &input.employee_id))?;
        let project_id = parse_id(&input.project_id)
            .ok_or_else(|| StoreError::not_found("project", &input.project_id))?;
        let row = employee_tasks::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            project_id: Set(project_id),
            title: Set(input.title),
            completed: Set(false),
            hours_remaining: Set(input.hours_remaining),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn tasks_by_employee(&self, employee_id: &str) -> StoreResult<Vec<EmployeeTask>> {
        let Some(id) = parse_id(employee_id) else {
            return Ok(Vec::new());
        };
        Ok(employee_tasks::Entity::find()
            .filter(employee_tasks::Column::EmployeeId.eq(id))
            .order_by_asc(employee_tasks::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn tasks_by_project(&self, project_id: &str) -> StoreResult<Vec<EmployeeTask>> {
        let Some(id) = parse_id(project_id) else {
            return Ok(Vec::new());
        };
        Ok(employee_tasks::Entity::find()
            .filter(employee_tasks::Column::ProjectId.eq(id))
            .order_by_asc(employee_tasks::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn all_tasks(&self) -> StoreResult<Vec<EmployeeTask>> {
        Ok(employee_tasks::Entity::find()
            .order_by_asc(employee_tasks::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn update_task_progress(
        &self,
        id: &str,
        input: UpdateTaskProgress,
    ) -> StoreResult<EmployeeTask> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("task", id))?;
        let row = employee_tasks::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("task", id))?;
        let mut active: employee_tasks::ActiveModel = row.into();
        if let Some(hours) = input.hours_remaining {
            active.hours_remaining = Set(hours);
        }
        if let Some(completed) = input.completed {
            active.completed = Set(completed);
        }
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }

    async fn create_course(&self, input: NewCourse) -> StoreResult<Course> {
        let row = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            lesson_count: Set(input.lesson_count),
            is_active: Set(input.is_active),
            created_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn course(&self, id: &str) -> StoreResult<Option<Course>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(courses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn courses(&self) -> StoreResult<Vec<Course>> {
        Ok(courses::Entity::find()
            .order_by_asc(courses::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create_enrollment(&self, input: NewEnrollment) -> StoreResult<Enrollment> {
        let student_id = parse_id(&input.student_id)
            .ok_or_else(|| StoreError::not_found("student", &input.student_id))?;
        let course_id = parse_id(&input.course_id)
            .ok_or_else(|| StoreError::not_found("course", &input.course_id))?;
        let row = enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            course_id: Set(course_id),
            progress: Set(0),
            enrolled_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn enrollments_by_student(&self, student_id: &str) -> StoreResult<Vec<Enrollment>> {
        let Some(id) = parse_id(student_id) else {
            return Ok(Vec::new());
        };
        Ok(enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(id))
            .order_by_asc(enrollments::Column::EnrolledAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn update_enrollment_progress(
        &self,
        id: &str,
        progress: i32,
    ) -> StoreResult<Enrollment> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("enrollment", id))?;
        let row = enrollments::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("enrollment", id))?;
        let mut active: enrollments::ActiveModel = row.into();
        active.progress = Set(progress.clamp(0, 100));
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }

    async fn record_lesson_progress(
        &self,
        input: NewLessonProgress,
    ) -> StoreResult<LessonProgress> {
        let enrollment_id = parse_id(&input.enrollment_id)
            .ok_or_else(|| StoreError::not_found("enrollment", &input.enrollment_id))?;
        let row = lesson_progress::ActiveModel {
            id: Set(Uuid::new_v4()),
            enrollment_id: Set(enrollment_id),
            lesson_index: Set(input.lesson_index),
            completed_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn lesson_progress(&self, enrollment_id: &str) -> StoreResult<Vec<LessonProgress>> {
        let Some(id) = parse_id(enrollment_id) else {
            return Ok(Vec::new());
        };
        Ok(lesson_progress::Entity::find()
            .filter(lesson_progress::Column::EnrollmentId.eq(id))
            .order_by_asc(lesson_progress::Column::CompletedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn record_quiz_attempt(&self, input: NewQuizAttempt) -> StoreResult<QuizAttempt> {
        let enrollment_id = parse_id(&input.enrollment_id)
            .ok_or_else(|| StoreError::not_found("enrollment", &input.enrollment_id))?;
        let row = quiz_attempts::ActiveModel {
            id: Set(Uuid::new_v4()),
            enrollment_id: Set(enrollment_id),
            quiz_name: Set(input.quiz_name),
            score: Set(input.score),
            passed: Set(input.passed),
            attempted_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn quiz_attempts(&self, enrollment_id: &str) -> StoreResult<Vec<QuizAttempt>> {
        let Some(id) = parse_id(enrollment_id) else {
            return Ok(Vec::new());
        };
        Ok(quiz_attempts::Entity::find()
            .filter(quiz_attempts::Column::EnrollmentId.eq(id))
            .order_by_asc(quiz_attempts::Column::AttemptedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn issue_certificate(&self, input: NewCertificate) -> StoreResult<Certificate> {
        let student_id = parse_id(&input.student_id)
            .ok_or_else(|| StoreError::not_found("student", &input.student_id))?;
        let course_id = parse_id(&input.course_id)
            .ok_or_else(|| StoreError::not_found("course", &input.course_id))?;
        let approved_by = parse_id(&input.approved_by)
            .ok_or_else(|| StoreError::not_found("employee", &input.approved_by))?;
        let row = certificates::ActiveModel {
            id: Set(Uuid::new_v4()),
            certificate_number: Set(business_number("CERT")),
            student_id: Set(student_id),
            course_id: Set(course_id),
            approved_by: Set(approved_by),
            issued_at: Set(Utc::now()),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn certificates_by_student(&self, student_id: &str) -> StoreResult<Vec<Certificate>> {
        let Some(id) = parse_id(student_id) else {
            return Ok(Vec::new());
        };
        Ok(certificates::Entity::find()
            .filter(certificates::Column::StudentId.eq(id))
            .order_by_asc(certificates::Column::IssuedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn ensure_seed_data(&self) -> StoreResult<()> {
        // First boot only: the catalog tables are checked for emptiness,
        // and the inserts additionally carry ON CONFLICT DO NOTHING on
        // their natural keys so concurrent boots cannot duplicate rows.
        if services::Entity::find().count(&self.db).await? == 0 {
            let rows: Vec<services::ActiveModel> = seed::default_services()
                .into_iter()
                .map(|s| services::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(s.name),
                    category: Set(s.category.as_str().to_string()),
                    price: Set(s.price),
                    features: Set(serde_json::json!(s.features)),
                    is_active: Set(s.is_active),
                    created_at: Set(Utc::now()),
                })
                .collect();
            services::Entity::insert_many(rows)
                .on_conflict(
                    OnConflict::column(services::Column::Name)
                        .do_nothing()
                        .to_owned(),
                )
                .do_nothing()
                .exec(&self.db)
                .await?;
            tracing::info!("Seeded default services");
        }

        if discount_codes::Entity::find().count(&self.db).await? == 0 {
            let rows: Vec<discount_codes::ActiveModel> = seed::default_discount_codes()
                .into_iter()
                .map(|d| discount_codes::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    code: Set(d.code),
                    percent_off: Set(d.percent_off),
                    is_active: Set(d.is_active),
                    expires_at: Set(d.expires_at),
                    created_at: Set(Utc::now()),
                })
                .collect();
            discount_codes::Entity::insert_many(rows)
                .on_conflict(
                    OnConflict::column(discount_codes::Column::Code)
                        .do_nothing()
                        .to_owned(),
                )
                .do_nothing()
                .exec(&self.db)
                .await?;
            tracing::info!("Seeded default discount codes");
        }

        if courses::Entity::find().count(&self.db).await? == 0 {
            let rows: Vec<courses::ActiveModel> = seed::default_courses()
                .into_iter()
                .map(|c| courses::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    title: Set(c.title),
                    description: Set(c.description),
                    price: Set(c.price),
                    lesson_count: Set(c.lesson_count),
                    is_active: Set(c.is_active),
                    created_at: Set(Utc::now()),
                })
                .collect();
            courses::Entity::insert_many(rows)
                .on_conflict(
                    OnConflict::column(courses::Column::Title)
                        .do_nothing()
                        .to_owned(),
                )
                .do_nothing()
                .exec(&self.db)
                .await?;
            tracing::info!("Seeded default courses");
        }

        Ok(())
    }

    async fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        // Server-side counting and summing; rows never leave the database.
        let now = Utc::now();
        let start_of_month = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);

        let total_orders = orders::Entity::find().count(&self.db).await?;
        let open_orders = orders::Entity::find()
            .filter(orders::Column::Status.ne(OrderStatus::Completed.as_str()))
            .count(&self.db)
            .await?;
        let total_revenue = self.sum_paid_orders(|q| q).await?;
        let month_revenue = self
            .sum_paid_orders(|q| q.filter(orders::Column::CreatedAt.gte(start_of_month)))
            .await?;
        let total_clients = clients::Entity::find().count(&self.db).await?;
        let total_students = students::Entity::find().count(&self.db).await?;
        let active_projects = projects::Entity::find()
            .filter(projects::Column::Status.ne(ProjectStatus::Completed.as_str()))
            .count(&self.db)
            .await?;
        let completed_projects = projects::Entity::find()
            .filter(projects::Column::Status.eq(ProjectStatus::Completed.as_str()))
            .count(&self.db)
            .await?;

        Ok(DashboardStats {
            total_orders,
            open_orders,
            total_revenue,
            month_revenue,
            total_clients,
            total_students,
            active_projects,
            completed_projects,
        })
    }
}

#[async_trait]
impl CollabStore for RelationalStore {
    async fn open_conversation(&self, input: OpenConversation) -> StoreResult<ChatConversation> {
        let project_id = parse_id(&input.project_id)
            .ok_or_else(|| StoreError::not_found("project", &input.project_id))?;
        let client_id = parse_id(&input.client_id)
            .ok_or_else(|| StoreError::not_found("client", &input.client_id))?;
        let employee_id = match &input.employee_id {
            Some(id) => {
                Some(parse_id(id).ok_or_else(|| StoreError::not_found("employee", id))?)
            }
            None => None,
        };

        let mut query = conversations::Entity::find()
            .filter(conversations::Column::ProjectId.eq(project_id))
            .filter(conversations::Column::ClientId.eq(client_id));
        query = match employee_id {
            Some(id) => query.filter(conversations::Column::EmployeeId.eq(id)),
            None => query.filter(conversations::Column::EmployeeId.is_null()),
        };
        if let Some(existing) = query.one(&self.db).await? {
            return Ok(existing.into());
        }

        let now = Utc::now();
        let row = conversations::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            client_id: Set(client_id),
            employee_id: Set(employee_id),
            last_activity_at: Set(now),
            created_at: Set(now),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn conversation(&self, id: &str) -> StoreResult<Option<ChatConversation>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(conversations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn conversations_by_client(
        &self,
        client_id: &str,
    ) -> StoreResult<Vec<ChatConversation>> {
        let Some(id) = parse_id(client_id) else {
            return Ok(Vec::new());
        };
        Ok(conversations::Entity::find()
            .filter(conversations::Column::ClientId.eq(id))
            .order_by_desc(conversations::Column::LastActivityAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create_message(&self, input: NewChatMessage) -> StoreResult<ChatMessage> {
        let conversation_id = parse_id(&input.conversation_id)
            .ok_or_else(|| StoreError::not_found("conversation", &input.conversation_id))?;
        let sender_id = parse_id(&input.sender_id)
            .ok_or_else(|| StoreError::not_found("sender", &input.sender_id))?;
        let conversation_key = input.conversation_id.clone();
        let content = input.content;

        // Message append plus conversation touch in one transaction.
        self.db
            .transaction::<_, ChatMessage, StoreError>(move |txn| {
                Box::pin(async move {
                    let conversation = conversations::Entity::find_by_id(conversation_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| StoreError::not_found("conversation", &conversation_key))?;

                    let now = Utc::now();
                    let row = messages::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        conversation_id: Set(conversation_id),
                        sender_id: Set(sender_id),
                        content: Set(content),
                        is_read: Set(false),
                        created_at: Set(now),
                    };
                    let message = row.insert(txn).await?;

                    let mut touch: conversations::ActiveModel = conversation.into();
                    touch.last_activity_at = Set(now);
                    touch.update(txn).await?;

                    Ok(message.into())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn messages(&self, conversation_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let Some(id) = parse_id(conversation_id) else {
            return Ok(Vec::new());
        };
        Ok(messages::Entity::find()
            .filter(messages::Column::ConversationId.eq(id))
            .order_by_asc(messages::Column::CreatedAt)
            .order_by_asc(messages::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn mark_messages_read(
        &self,
        conversation_id: &str,
        reader_id: &str,
    ) -> StoreResult<u64> {
        let (Some(conversation_id), Some(reader_id)) =
            (parse_id(conversation_id), parse_id(reader_id))
        else {
            return Ok(0);
        };
        let result = messages::Entity::update_many()
            .col_expr(messages::Column::IsRead, Expr::value(true))
            .filter(messages::Column::ConversationId.eq(conversation_id))
            .filter(messages::Column::SenderId.ne(reader_id))
            .filter(messages::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn create_modification_request(
        &self,
        input: NewRequest,
    ) -> StoreResult<ModificationRequest> {
        let project_id = parse_id(&input.project_id)
            .ok_or_else(|| StoreError::not_found("project", &input.project_id))?;
        let client_id = parse_id(&input.client_id)
            .ok_or_else(|| StoreError::not_found("client", &input.client_id))?;
        let row = modification_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            client_id: Set(client_id),
            title: Set(input.title),
            details: Set(input.details),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn modification_requests_by_project(
        &self,
        project_id: &str,
    ) -> StoreResult<Vec<ModificationRequest>> {
        let Some(id) = parse_id(project_id) else {
            return Ok(Vec::new());
        };
        Ok(modification_requests::Entity::find()
            .filter(modification_requests::Column::ProjectId.eq(id))
            .order_by_asc(modification_requests::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn update_modification_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> StoreResult<ModificationRequest> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("modification request", id))?;
        let row = modification_requests::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("modification request", id))?;
        let mut active: modification_requests::ActiveModel = row.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }

    async fn create_feature_request(&self, input: NewRequest) -> StoreResult<FeatureRequest> {
        let project_id = parse_id(&input.project_id)
            .ok_or_else(|| StoreError::not_found("project", &input.project_id))?;
        let client_id = parse_id(&input.client_id)
            .ok_or_else(|| StoreError::not_found("client", &input.client_id))?;
        let row = feature_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            client_id: Set(client_id),
            title: Set(input.title),
            details: Set(input.details),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            estimated_cost: Set(None),
            estimated_days: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn feature_requests_by_project(
        &self,
        project_id: &str,
    ) -> StoreResult<Vec<FeatureRequest>> {
        let Some(id) = parse_id(project_id) else {
            return Ok(Vec::new());
        };
        Ok(feature_requests::Entity::find()
            .filter(feature_requests::Column::ProjectId.eq(id))
            .order_by_asc(feature_requests::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn update_feature_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> StoreResult<FeatureRequest> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("feature request", id))?;
        let row = feature_requests::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("feature request", id))?;
        let mut active: feature_requests::ActiveModel = row.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }

    async fn set_feature_request_estimate(
        &self,
        id: &str,
        input: SetFeatureEstimate,
    ) -> StoreResult<FeatureRequest> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::not_found("feature request", id))?;
        let row = feature_requests::Entity::find_by_id(uuid)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("feature request", id))?;
        let mut active: feature_requests::ActiveModel = row.into();
        active.estimated_cost = Set(Some(input.estimated_cost));
        active.estimated_days = Set(Some(input.estimated_days));
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?.into())
    }
}
