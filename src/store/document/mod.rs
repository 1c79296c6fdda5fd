//! Document backend over the MongoDB driver. Relational query semantics
//! (the email join, not-paid filters, ordering) are emulated with manual
//! filtering; seeding uses upsert-by-natural-key. The collaboration
//! segment (chat, modification/feature requests) is not implemented on
//! this backend — [`crate::store::Store::collab`] surfaces that gap as a
//! hard `Unsupported` error.

pub mod docs;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, doc, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

use crate::models::academy::{
    Certificate, Course, Enrollment, LessonProgress, NewCertificate, NewCourse, NewEnrollment,
    NewLessonProgress, NewQuizAttempt, QuizAttempt,
};
use crate::models::accounts::{Client, Employee, NewClient, NewEmployee, NewStudent, Student};
use crate::models::catalog::{DiscountCode, NewDiscountCode, NewService, Service};
use crate::models::orders::{
    Invoice, NewOrder, Order, OrderStatus, PaymentStatus, PaymentUpdate,
};
use crate::models::projects::{
    EmployeeTask, NewEmployeeTask, NewProject, Project, ProjectStatus, UpdateTaskProgress,
};
use crate::reports::DashboardStats;
use crate::store::seed;
use crate::store::{EntityStore, StoreError, StoreResult, business_number};

use docs::{
    CertificateDoc, ClientDoc, CourseDoc, DiscountCodeDoc, EmployeeDoc, EmployeeTaskDoc,
    EnrollmentDoc, InvoiceDoc, LessonProgressDoc, OrderDoc, ProjectDoc, QuizAttemptDoc,
    ServiceDoc, StudentDoc, to_bson_dt,
};

pub struct DocumentStore {
    db: Database,
}

/// An id string that is not a valid ObjectId cannot name a document here.
fn parse_oid(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn ser(value: &impl Serialize) -> StoreResult<Bson> {
    bson::to_bson(value).map_err(|e| StoreError::Document(e.into()))
}

impl DocumentStore {
    /// Build a handle on the named database. The driver connects lazily;
    /// no I/O happens until the first operation.
    pub async fn connect(url: &str, db_name: &str) -> StoreResult<Self> {
        let client = mongodb::Client::with_uri_str(url).await?;
        Ok(Self {
            db: client.database(db_name),
        })
    }

    fn clients_coll(&self) -> Collection<ClientDoc> {
        self.db.collection("clients")
    }

    fn employees_coll(&self) -> Collection<EmployeeDoc> {
        self.db.collection("employees")
    }

    fn students_coll(&self) -> Collection<StudentDoc> {
        self.db.collection("students")
    }

    fn services_coll(&self) -> Collection<ServiceDoc> {
        self.db.collection("services")
    }

    fn discounts_coll(&self) -> Collection<DiscountCodeDoc> {
        self.db.collection("discount_codes")
    }

    fn orders_coll(&self) -> Collection<OrderDoc> {
        self.db.collection("orders")
    }

    fn invoices_coll(&self) -> Collection<InvoiceDoc> {
        self.db.collection("invoices")
    }

    fn projects_coll(&self) -> Collection<ProjectDoc> {
        self.db.collection("projects")
    }

    fn tasks_coll(&self) -> Collection<EmployeeTaskDoc> {
        self.db.collection("employee_tasks")
    }

    fn courses_coll(&self) -> Collection<CourseDoc> {
        self.db.collection("courses")
    }

    fn enrollments_coll(&self) -> Collection<EnrollmentDoc> {
        self.db.collection("enrollments")
    }

    fn lessons_coll(&self) -> Collection<LessonProgressDoc> {
        self.db.collection("lesson_progress")
    }

    fn quizzes_coll(&self) -> Collection<QuizAttemptDoc> {
        self.db.collection("quiz_attempts")
    }

    fn certificates_coll(&self) -> Collection<CertificateDoc> {
        self.db.collection("certificates")
    }

    async fn collect_sorted<T, D>(
        &self,
        coll: &Collection<T>,
        filter: bson::Document,
        sort: bson::Document,
    ) -> StoreResult<Vec<D>>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + Into<D>,
    {
        let rows: Vec<T> = coll.find(filter).sort(sort).await?.try_collect().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl EntityStore for DocumentStore {
    async fn create_client(&self, input: NewClient) -> StoreResult<Client> {
        let coll = self.clients_coll();
        if coll
            .find_one(doc! { "email": &input.email })
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict {
                entity: "client",
                key: input.email,
            });
        }
        let row = ClientDoc {
            id: ObjectId::new(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            company: input.company,
            phone: input.phone,
            created_at: to_bson_dt(Utc::now()),
        };
        coll.insert_one(&row).await?;
        Ok(row.into())
    }

    async fn client(&self, id: &str) -> StoreResult<Option<Client>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .clients_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn client_by_email(&self, email: &str) -> StoreResult<Option<Client>> {
        Ok(self
            .clients_coll()
            .find_one(doc! { "email": email })
            .await?
            .map(Into::into))
    }

    async fn clients(&self) -> StoreResult<Vec<Client>> {
        self.collect_sorted(&self.clients_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn create_employee(&self, input: NewEmployee) -> StoreResult<Employee> {
        let coll = self.employees_coll();
        if coll
            .find_one(doc! { "email": &input.email })
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict {
                entity: "employee",
                key: input.email,
            });
        }
        let row = EmployeeDoc {
            id: ObjectId::new(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            job_title: input.job_title,
            created_at: to_bson_dt(Utc::now()),
        };
        coll.insert_one(&row).await?;
        Ok(row.into())
    }

    async fn employee(&self, id: &str) -> StoreResult<Option<Employee>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .employees_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        Ok(self
            .employees_coll()
            .find_one(doc! { "email": email })
            .await?
            .map(Into::into))
    }

    async fn employees(&self) -> StoreResult<Vec<Employee>> {
        self.collect_sorted(&self.employees_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn create_student(&self, input: NewStudent) -> StoreResult<Student> {
        let coll = self.students_coll();
        if coll
            .find_one(doc! { "email": &input.email })
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict {
                entity: "student",
                key: input.email,
            });
        }
        let row = StudentDoc {
            id: ObjectId::new(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            phone: input.phone,
            created_at: to_bson_dt(Utc::now()),
        };
        coll.insert_one(&row).await?;
        Ok(row.into())
    }

    async fn student(&self, id: &str) -> StoreResult<Option<Student>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .students_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        Ok(self
            .students_coll()
            .find_one(doc! { "email": email })
            .await?
            .map(Into::into))
    }

    async fn students(&self) -> StoreResult<Vec<Student>> {
        self.collect_sorted(&self.students_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn create_service(&self, input: NewService) -> StoreResult<Service> {
        let row = ServiceDoc {
            id: ObjectId::new(),
            name: input.name,
            category: input.category.as_str().to_string(),
            price: input.price,
            features: input.features,
            is_active: input.is_active,
            created_at: to_bson_dt(Utc::now()),
        };
        self.services_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn service(&self, id: &str) -> StoreResult<Option<Service>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .services_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn services(&self) -> StoreResult<Vec<Service>> {
        self.collect_sorted(&self.services_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn set_service_active(&self, id: &str, active: bool) -> StoreResult<Service> {
        let oid = parse_oid(id).ok_or_else(|| StoreError::not_found("service", id))?;
        let coll = self.services_coll();
        coll.update_one(doc! { "_id": oid }, doc! { "$set": { "is_active": active } })
            .await?;
        coll.find_one(doc! { "_id": oid })
            .await?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found("service", id))
    }

    async fn create_discount_code(&self, input: NewDiscountCode) -> StoreResult<DiscountCode> {
        let coll = self.discounts_coll();
        if coll.find_one(doc! { "code": &input.code }).await?.is_some() {
            return Err(StoreError::Conflict {
                entity: "discount code",
                key: input.code,
            });
        }
        let row = DiscountCodeDoc {
            id: ObjectId::new(),
            code: input.code,
            percent_off: input.percent_off,
            is_active: input.is_active,
            expires_at: input.expires_at.map(to_bson_dt),
            created_at: to_bson_dt(Utc::now()),
        };
        coll.insert_one(&row).await?;
        Ok(row.into())
    }

    async fn discount_code(&self, code: &str) -> StoreResult<Option<DiscountCode>> {
        Ok(self
            .discounts_coll()
            .find_one(doc! { "code": code })
            .await?
            .map(Into::into))
    }

    async fn discount_codes(&self) -> StoreResult<Vec<DiscountCode>> {
        self.collect_sorted(&self.discounts_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn create_order(&self, input: NewOrder) -> StoreResult<Order> {
        // Resolve the service link by hand; an unknown id keeps the order
        // with a missing link instead of rejecting it.
        let service = match input.service_id.as_deref().and_then(parse_oid) {
            Some(oid) => self.services_coll().find_one(doc! { "_id": oid }).await?,
            None => None,
        };
        let row = OrderDoc {
            id: ObjectId::new(),
            order_number: business_number("ORD"),
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            customer_phone: input.customer_phone,
            service_id: service.as_ref().map(|s| s.id),
            service_name: service.map(|s| s.name),
            price: input.price,
            discount_code: input.discount_code,
            status: OrderStatus::Pending.as_str().to_string(),
            payment_status: PaymentStatus::Pending.as_str().to_string(),
            payment_method: None,
            created_at: to_bson_dt(Utc::now()),
            updated_at: None,
        };
        self.orders_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn order(&self, id: &str) -> StoreResult<Option<Order>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .orders_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn order_by_number(&self, number: &str) -> StoreResult<Option<Order>> {
        Ok(self
            .orders_coll()
            .find_one(doc! { "order_number": number })
            .await?
            .map(Into::into))
    }

    async fn orders(&self) -> StoreResult<Vec<Order>> {
        self.collect_sorted(&self.orders_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn orders_by_client(&self, client_id: &str) -> StoreResult<Vec<Order>> {
        // Same manual join as the relational backend: client → email →
        // orders on the denormalized customer email.
        let Some(oid) = parse_oid(client_id) else {
            return Ok(Vec::new());
        };
        let Some(client) = self.clients_coll().find_one(doc! { "_id": oid }).await? else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.orders_coll(),
            doc! { "customer_email": client.email },
            doc! { "created_at": 1 },
        )
        .await
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let oid = parse_oid(id).ok_or_else(|| StoreError::not_found("order", id))?;
        let coll = self.orders_coll();
        coll.update_one(
            doc! { "_id": oid },
            doc! { "$set": {
                "status": status.as_str(),
                "updated_at": to_bson_dt(Utc::now()),
            } },
        )
        .await?;
        coll.find_one(doc! { "_id": oid })
            .await?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found("order", id))
    }

    async fn update_order_payment(
        &self,
        id: &str,
        status: PaymentStatus,
        method: Option<String>,
    ) -> StoreResult<PaymentUpdate> {
        let oid = parse_oid(id).ok_or_else(|| StoreError::not_found("order", id))?;
        let coll = self.orders_coll();

        let mut set = doc! {
            "payment_status": status.as_str(),
            "updated_at": to_bson_dt(Utc::now()),
        };
        if let Some(method) = method {
            set.insert("payment_method", method);
        }
        let result = coll
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::not_found("order", id));
        }
        let order: OrderDoc = coll
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| StoreError::not_found("order", id))?;

        // Second, independent write: no multi-document transaction here.
        // A crash between the two leaves a paid order unbilled, which
        // unbilled_paid_orders() exists to surface.
        let mut invoice = None;
        if status == PaymentStatus::Completed {
            let invoices = self.invoices_coll();
            if invoices
                .find_one(doc! { "order_id": oid })
                .await?
                .is_none()
            {
                let issued = InvoiceDoc {
                    id: ObjectId::new(),
                    invoice_number: business_number("INV"),
                    order_id: oid,
                    customer_name: order.customer_name.clone(),
                    customer_email: order.customer_email.clone(),
                    service_name: order.service_name.clone(),
                    amount: order.price,
                    issued_at: to_bson_dt(Utc::now()),
                };
                invoices.insert_one(&issued).await?;
                invoice = Some(issued.into());
            }
        }

        Ok(PaymentUpdate {
            order: order.into(),
            invoice,
        })
    }

    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .invoices_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn invoices(&self) -> StoreResult<Vec<Invoice>> {
        self.collect_sorted(&self.invoices_coll(), doc! {}, doc! { "issued_at": 1 })
            .await
    }

    async fn unbilled_paid_orders(&self) -> StoreResult<Vec<Order>> {
        let billed: Vec<InvoiceDoc> = self
            .invoices_coll()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        let billed: HashSet<ObjectId> = billed.into_iter().map(|i| i.order_id).collect();

        let paid: Vec<OrderDoc> = self
            .orders_coll()
            .find(doc! { "payment_status": PaymentStatus::Completed.as_str() })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(paid
            .into_iter()
            .filter(|o| !billed.contains(&o.id))
            .map(Into::into)
            .collect())
    }

    async fn create_project(&self, input: NewProject) -> StoreResult<Project> {
        let client_id = parse_oid(&input.client_id)
            .ok_or_else(|| StoreError::not_found("client", &input.client_id))?;
        let row = ProjectDoc {
            id: ObjectId::new(),
            client_id,
            name: input.name,
            description: input.description,
            status: ProjectStatus::Analysis.as_str().to_string(),
            days_remaining: input.days_remaining,
            created_at: to_bson_dt(Utc::now()),
            updated_at: None,
        };
        self.projects_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn project(&self, id: &str) -> StoreResult<Option<Project>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .projects_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn projects(&self) -> StoreResult<Vec<Project>> {
        self.collect_sorted(&self.projects_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn projects_by_client(&self, client_id: &str) -> StoreResult<Vec<Project>> {
        let Some(oid) = parse_oid(client_id) else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.projects_coll(),
            doc! { "client_id": oid },
            doc! { "created_at": 1 },
        )
        .await
    }

    async fn update_project_status(&self, id: &str, status: ProjectStatus) -> StoreResult<Project> {
        let oid = parse_oid(id).ok_or_else(|| StoreError::not_found("project", id))?;
        let coll = self.projects_coll();
        coll.update_one(
            doc! { "_id": oid },
            doc! { "$set": {
                "status": status.as_str(),
                "updated_at": to_bson_dt(Utc::now()),
            } },
        )
        .await?;
        coll.find_one(doc! { "_id": oid })
            .await?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found("project", id))
    }

    async fn update_project_days(&self, id: &str, days_remaining: i32) -> StoreResult<Project> {
        let oid = parse_oid(id).ok_or_else(|| StoreError::not_found("project", id))?;
        let coll = self.projects_coll();
        coll.update_one(
            doc! { "_id": oid },
            doc! { "$set": {
                "days_remaining": days_remaining,
                "updated_at": to_bson_dt(Utc::now()),
            } },
        )
        .await?;
        coll.find_one(doc! { "_id": oid })
            .await?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found("project", id))
    }

    async fn create_task(&self, input: NewEmployeeTask) -> StoreResult<EmployeeTask> {
        let employee_id = parse_oid(&input.employee_id)
            .ok_or_else(|| StoreError::not_found("employee", &input.employee_id))?;
        let project_id = parse_oid(&input.project_id)
            .ok_or_else(|| StoreError::not_found("project", &input.project_id))?;
        let row = EmployeeTaskDoc {
            id: ObjectId::new(),
            employee_id,
            project_id,
            title: input.title,
            completed: false,
            hours_remaining: input.hours_remaining,
            created_at: to_bson_dt(Utc::now()),
            updated_at: None,
        };
        self.tasks_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn tasks_by_employee(&self, employee_id: &str) -> StoreResult<Vec<EmployeeTask>> {
        let Some(oid) = parse_oid(employee_id) else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.tasks_coll(),
            doc! { "employee_id": oid },
            doc! { "created_at": 1 },
        )
        .await
    }

    async fn tasks_by_project(&self, project_id: &str) -> StoreResult<Vec<EmployeeTask>> {
        let Some(oid) = parse_oid(project_id) else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.tasks_coll(),
            doc! { "project_id": oid },
            doc! { "created_at": 1 },
        )
        .await
    }

    async fn all_tasks(&self) -> StoreResult<Vec<EmployeeTask>> {
        self.collect_sorted(&self.tasks_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn update_task_progress(
        &self,
        id: &str,
        input: UpdateTaskProgress,
    ) -> StoreResult<EmployeeTask> {
        let oid = parse_oid(id).ok_or_else(|| StoreError::not_found("task", id))?;
        let coll = self.tasks_coll();
        let mut set = doc! { "updated_at": to_bson_dt(Utc::now()) };
        if let Some(hours) = input.hours_remaining {
            set.insert("hours_remaining", hours);
        }
        if let Some(completed) = input.completed {
            set.insert("completed", completed);
        }
        let result = coll
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::not_found("task", id));
        }
        coll.find_one(doc! { "_id": oid })
            .await?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found("task", id))
    }

    async fn create_course(&self, input: NewCourse) -> StoreResult<Course> {
        let row = CourseDoc {
            id: ObjectId::new(),
            title: input.title,
            description: input.description,
            price: input.price,
            lesson_count: input.lesson_count,
            is_active: input.is_active,
            created_at: to_bson_dt(Utc::now()),
        };
        self.courses_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn course(&self, id: &str) -> StoreResult<Option<Course>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        Ok(self
            .courses_coll()
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into))
    }

    async fn courses(&self) -> StoreResult<Vec<Course>> {
        self.collect_sorted(&self.courses_coll(), doc! {}, doc! { "created_at": 1 })
            .await
    }

    async fn create_enrollment(&self, input: NewEnrollment) -> StoreResult<Enrollment> {
        let student_id = parse_oid(&input.student_id)
            .ok_or_else(|| StoreError::not_found("student", &input.student_id))?;
        let course_id = parse_oid(&input.course_id)
            .ok_or_else(|| StoreError::not_found("course", &input.course_id))?;
        let row = EnrollmentDoc {
            id: ObjectId::new(),
            student_id,
            course_id,
            progress: 0,
            enrolled_at: to_bson_dt(Utc::now()),
            updated_at: None,
        };
        self.enrollments_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn enrollments_by_student(&self, student_id: &str) -> StoreResult<Vec<Enrollment>> {
        let Some(oid) = parse_oid(student_id) else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.enrollments_coll(),
            doc! { "student_id": oid },
            doc! { "enrolled_at": 1 },
        )
        .await
    }

    async fn update_enrollment_progress(
        &self,
        id: &str,
        progress: i32,
    ) -> StoreResult<Enrollment> {
        let oid = parse_oid(id).ok_or_else(|| StoreError::not_found("enrollment", id))?;
        let coll = self.enrollments_coll();
        let result = coll
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "progress": progress.clamp(0, 100),
                    "updated_at": to_bson_dt(Utc::now()),
                } },
            )
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::not_found("enrollment", id));
        }
        coll.find_one(doc! { "_id": oid })
            .await?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found("enrollment", id))
    }

    async fn record_lesson_progress(
        &self,
        input: NewLessonProgress,
    ) -> StoreResult<LessonProgress> {
        let enrollment_id = parse_oid(&input.enrollment_id)
            .ok_or_else(|| StoreError::not_found("enrollment", &input.enrollment_id))?;
        let row = LessonProgressDoc {
            id: ObjectId::new(),
            enrollment_id,
            lesson_index: input.lesson_index,
            completed_at: to_bson_dt(Utc::now()),
        };
        self.lessons_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn lesson_progress(&self, enrollment_id: &str) -> StoreResult<Vec<LessonProgress>> {
        let Some(oid) = parse_oid(enrollment_id) else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.lessons_coll(),
            doc! { "enrollment_id": oid },
            doc! { "completed_at": 1 },
        )
        .await
    }

    async fn record_quiz_attempt(&self, input: NewQuizAttempt) -> StoreResult<QuizAttempt> {
        let enrollment_id = parse_oid(&input.enrollment_id)
            .ok_or_else(|| StoreError::not_found("enrollment", &input.enrollment_id))?;
        let row = QuizAttemptDoc {
            id: ObjectId::new(),
            enrollment_id,
            quiz_name: input.quiz_name,
            score: input.score,
            passed: input.passed,
            attempted_at: to_bson_dt(Utc::now()),
        };
        self.quizzes_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn quiz_attempts(&self, enrollment_id: &str) -> StoreResult<Vec<QuizAttempt>> {
        let Some(oid) = parse_oid(enrollment_id) else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.quizzes_coll(),
            doc! { "enrollment_id": oid },
            doc! { "attempted_at": 1 },
        )
        .await
    }

    async fn issue_certificate(&self, input: NewCertificate) -> StoreResult<Certificate> {
        let student_id = parse_oid(&input.student_id)
            .ok_or_else(|| StoreError::not_found("student", &input.student_id))?;
        let course_id = parse_oid(&input.course_id)
            .ok_or_else(|| StoreError::not_found("course", &input.course_id))?;
        let approved_by = parse_oid(&input.approved_by)
            .ok_or_else(|| StoreError::not_found("employee", &input.approved_by))?;
        let row = CertificateDoc {
            id: ObjectId::new(),
            certificate_number: business_number("CERT"),
            student_id,
            course_id,
            approved_by,
            issued_at: to_bson_dt(Utc::now()),
        };
        self.certificates_coll().insert_one(&row).await?;
        Ok(row.into())
    }

    async fn certificates_by_student(&self, student_id: &str) -> StoreResult<Vec<Certificate>> {
        let Some(oid) = parse_oid(student_id) else {
            return Ok(Vec::new());
        };
        self.collect_sorted(
            &self.certificates_coll(),
            doc! { "student_id": oid },
            doc! { "issued_at": 1 },
        )
        .await
    }

    async fn ensure_seed_data(&self) -> StoreResult<()> {
        // Upsert by natural key: the document-store equivalent of the
        // relational ON CONFLICT DO NOTHING inserts.
        for s in seed::default_services() {
            let row = ServiceDoc {
                id: ObjectId::new(),
                name: s.name.clone(),
                category: s.category.as_str().to_string(),
                price: s.price,
                features: s.features,
                is_active: s.is_active,
                created_at: to_bson_dt(Utc::now()),
            };
            self.services_coll()
                .update_one(
                    doc! { "name": &s.name },
                    doc! { "$setOnInsert": ser(&row)? },
                )
                .upsert(true)
                .await?;
        }

        for d in seed::default_discount_codes() {
            let row = DiscountCodeDoc {
                id: ObjectId::new(),
                code: d.code.clone(),
                percent_off: d.percent_off,
                is_active: d.is_active,
                expires_at: d.expires_at.map(to_bson_dt),
                created_at: to_bson_dt(Utc::now()),
            };
            self.discounts_coll()
                .update_one(
                    doc! { "code": &d.code },
                    doc! { "$setOnInsert": ser(&row)? },
                )
                .upsert(true)
                .await?;
        }

        for c in seed::default_courses() {
            let row = CourseDoc {
                id: ObjectId::new(),
                title: c.title.clone(),
                description: c.description,
                price: c.price,
                lesson_count: c.lesson_count,
                is_active: c.is_active,
                created_at: to_bson_dt(Utc::now()),
            };
            self.courses_coll()
                .update_one(
                    doc! { "title": &c.title },
                    doc! { "$setOnInsert": ser(&row)? },
                )
                .upsert(true)
                .await?;
        }

        Ok(())
    }

    async fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        // Counts stay server-side; the revenue sums are computed in
        // process from the fetched orders, matching the shared reporting
        // semantics.
        let orders: Vec<OrderDoc> = self
            .orders_coll()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        let orders: Vec<Order> = orders.into_iter().map(Into::into).collect();

        let total_clients = self.clients_coll().count_documents(doc! {}).await?;
        let total_students = self.students_coll().count_documents(doc! {}).await?;
        let active_projects = self
            .projects_coll()
            .count_documents(
                doc! { "status": { "$ne": ProjectStatus::Completed.as_str() } },
            )
            .await?;
        let completed_projects = self
            .projects_coll()
            .count_documents(doc! { "status": ProjectStatus::Completed.as_str() })
            .await?;

        Ok(crate::reports::dashboard_from_rows(
            &orders,
            total_clients,
            total_students,
            active_projects,
            completed_projects,
            Utc::now(),
        ))
    }
}
