//! In-memory backend: the development/testing reference implementation.
//! One state struct behind a single `RwLock`, so the two-step writes
//! (payment → invoice, message → conversation touch) are atomic here by
//! construction. Nothing survives a restart.

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::models::academy::{
    Certificate, Course, Enrollment, LessonProgress, NewCertificate, NewCourse, NewEnrollment,
    NewLessonProgress, NewQuizAttempt, QuizAttempt,
};
use crate::models::accounts::{Client, Employee, NewClient, NewEmployee, NewStudent, Student};
use crate::models::catalog::{DiscountCode, NewDiscountCode, NewService, Service};
use crate::models::chat::{ChatConversation, ChatMessage, NewChatMessage, OpenConversation};
use crate::models::orders::{
    Invoice, NewOrder, Order, OrderStatus, PaymentStatus, PaymentUpdate, ServiceRef,
};
use crate::models::projects::{
    EmployeeTask, NewEmployeeTask, NewProject, Project, ProjectStatus, UpdateTaskProgress,
};
use crate::models::requests::{
    FeatureRequest, ModificationRequest, NewRequest, RequestStatus, SetFeatureEstimate,
};
use crate::reports::{self, DashboardStats};
use crate::store::seed;
use crate::store::{
    CollabStore, EntityStore, StoreError, StoreResult, business_number, new_entity_id,
};

#[derive(Default)]
struct State {
    clients: HashMap<String, Client>,
    employees: HashMap<String, Employee>,
    students: HashMap<String, Student>,
    services: HashMap<String, Service>,
    discount_codes: HashMap<String, DiscountCode>,
    orders: HashMap<String, Order>,
    invoices: HashMap<String, Invoice>,
    projects: HashMap<String, Project>,
    tasks: HashMap<String, EmployeeTask>,
    courses: HashMap<String, Course>,
    enrollments: HashMap<String, Enrollment>,
    lesson_progress: HashMap<String, LessonProgress>,
    quiz_attempts: HashMap<String, QuizAttempt>,
    certificates: HashMap<String, Certificate>,
    conversations: HashMap<String, ChatConversation>,
    messages: HashMap<String, ChatMessage>,
    modification_requests: HashMap<String, ModificationRequest>,
    feature_requests: HashMap<String, FeatureRequest>,
}

impl State {
    fn seed(&mut self) {
        if self.services.is_empty() {
            for input in seed::default_services() {
                let service = build_service(input);
                self.services.insert(service.id.clone(), service);
            }
        }
        if self.discount_codes.is_empty() {
            for input in seed::default_discount_codes() {
                let code = build_discount_code(input);
                self.discount_codes.insert(code.id.clone(), code);
            }
        }
        if self.courses.is_empty() {
            for input in seed::default_courses() {
                let course = build_course(input);
                self.courses.insert(course.id.clone(), course);
            }
        }
    }
}

fn build_service(input: NewService) -> Service {
    Service {
        id: new_entity_id(),
        name: input.name,
        category: input.category,
        price: input.price,
        features: input.features,
        is_active: input.is_active,
        created_at: Utc::now(),
    }
}

fn build_discount_code(input: NewDiscountCode) -> DiscountCode {
    DiscountCode {
        id: new_entity_id(),
        code: input.code,
        percent_off: input.percent_off,
        is_active: input.is_active,
        expires_at: input.expires_at,
        created_at: Utc::now(),
    }
}

fn build_course(input: NewCourse) -> Course {
    Course {
        id: new_entity_id(),
        title: input.title,
        description: input.description,
        price: input.price,
        lesson_count: input.lesson_count,
        is_active: input.is_active,
        created_at: Utc::now(),
    }
}

/// Sort by creation timestamp (id as tiebreak) — map iteration order is
/// never exposed to callers.
fn sorted_by<T: Clone, K: Ord>(map: &HashMap<String, T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut rows: Vec<&T> = map.values().collect();
    rows.sort_by(|a, b| key(a).cmp(&key(b)));
    rows.into_iter().cloned().collect()
}

pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// A fresh store with the default catalog already present.
    pub fn new() -> Self {
        let mut state = State::default();
        state.seed();
        Self {
            state: RwLock::new(state),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn create_client(&self, input: NewClient) -> StoreResult<Client> {
        let mut state = self.state.write().await;
        if state.clients.values().any(|c| c.email == input.email) {
            return Err(StoreError::Conflict {
                entity: "client",
                key: input.email,
            });
        }
        let client = Client {
            id: new_entity_id(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            company: input.company,
            phone: input.phone,
            created_at: Utc::now(),
        };
        state.clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    async fn client(&self, id: &str) -> StoreResult<Option<Client>> {
        Ok(self.state.read().await.clients.get(id).cloned())
    }

    async fn client_by_email(&self, email: &str) -> StoreResult<Option<Client>> {
        let state = self.state.read().await;
        Ok(state.clients.values().find(|c| c.email == email).cloned())
    }

    async fn clients(&self) -> StoreResult<Vec<Client>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.clients, |c| (c.created_at, c.id.clone())))
    }

    async fn create_employee(&self, input: NewEmployee) -> StoreResult<Employee> {
        let mut state = self.state.write().await;
        if state.employees.values().any(|e| e.email == input.email) {
            return Err(StoreError::Conflict {
                entity: "employee",
                key: input.email,
            });
        }
        let employee = Employee {
            id: new_entity_id(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            job_title: input.job_title,
            created_at: Utc::now(),
        };
        state.employees.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    async fn employee(&self, id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.state.read().await.employees.get(id).cloned())
    }

    async fn employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        let state = self.state.read().await;
        Ok(state.employees.values().find(|e| e.email == email).cloned())
    }

    async fn employees(&self) -> StoreResult<Vec<Employee>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.employees, |e| (e.created_at, e.id.clone())))
    }

    async fn create_student(&self, input: NewStudent) -> StoreResult<Student> {
        let mut state = self.state.write().await;
        if state.students.values().any(|s| s.email == input.email) {
            return Err(StoreError::Conflict {
                entity: "student",
                key: input.email,
            });
        }
        let student = Student {
            id: new_entity_id(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            phone: input.phone,
            created_at: Utc::now(),
        };
        state.students.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    async fn student(&self, id: &str) -> StoreResult<Option<Student>> {
        Ok(self.state.read().await.students.get(id).cloned())
    }

    async fn student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        let state = self.state.read().await;
        Ok(state.students.values().find(|s| s.email == email).cloned())
    }

    async fn students(&self) -> StoreResult<Vec<Student>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.students, |s| (s.created_at, s.id.clone())))
    }

    async fn create_service(&self, input: NewService) -> StoreResult<Service> {
        let mut state = self.state.write().await;
        let service = build_service(input);
        state.services.insert(service.id.clone(), service.clone());
        Ok(service)
    }

    async fn service(&self, id: &str) -> StoreResult<Option<Service>> {
        Ok(self.state.read().await.services.get(id).cloned())
    }

    async fn services(&self) -> StoreResult<Vec<Service>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.services, |s| (s.created_at, s.id.clone())))
    }

    async fn set_service_active(&self, id: &str, active: bool) -> StoreResult<Service> {
        let mut state = self.state.write().await;
        let service = state
            .services
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("service", id))?;
        service.is_active = active;
        Ok(service.clone())
    }

    async fn create_discount_code(&self, input: NewDiscountCode) -> StoreResult<DiscountCode> {
        let mut state = self.state.write().await;
        if state.discount_codes.values().any(|d| d.code == input.code) {
            return Err(StoreError::Conflict {
                entity: "discount code",
                key: input.code,
            });
        }
        let code = build_discount_code(input);
        state.discount_codes.insert(code.id.clone(), code.clone());
        Ok(code)
    }

    async fn discount_code(&self, code: &str) -> StoreResult<Option<DiscountCode>> {
        let state = self.state.read().await;
        Ok(state
            .discount_codes
            .values()
            .find(|d| d.code == code)
            .cloned())
    }

    async fn discount_codes(&self) -> StoreResult<Vec<DiscountCode>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.discount_codes, |d| {
            (d.created_at, d.id.clone())
        }))
    }

    async fn create_order(&self, input: NewOrder) -> StoreResult<Order> {
        let mut state = self.state.write().await;
        // An unknown service id degrades to a missing link, never an error.
        let resolved = input
            .service_id
            .as_deref()
            .and_then(|id| state.services.get(id));
        let (service, service_name) = match resolved {
            Some(s) => (ServiceRef::Valid(s.id.clone()), Some(s.name.clone())),
            None => (ServiceRef::Missing, None),
        };
        let order = Order {
            id: new_entity_id(),
            order_number: business_number("ORD"),
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            customer_phone: input.customer_phone,
            service,
            service_name,
            price: input.price,
            discount_code: input.discount_code,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn order(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.state.read().await.orders.get(id).cloned())
    }

    async fn order_by_number(&self, number: &str) -> StoreResult<Option<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .find(|o| o.order_number == number)
            .cloned())
    }

    async fn orders(&self) -> StoreResult<Vec<Order>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.orders, |o| (o.created_at, o.id.clone())))
    }

    async fn orders_by_client(&self, client_id: &str) -> StoreResult<Vec<Order>> {
        let state = self.state.read().await;
        let Some(client) = state.clients.get(client_id) else {
            return Ok(Vec::new());
        };
        let mut rows: Vec<&Order> = state
            .orders
            .values()
            .filter(|o| o.customer_email == client.email)
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("order", id))?;
        order.status = status;
        order.updated_at = Some(Utc::now());
        Ok(order.clone())
    }

    async fn update_order_payment(
        &self,
        id: &str,
        status: PaymentStatus,
        method: Option<String>,
    ) -> StoreResult<PaymentUpdate> {
        // Single write-lock acquisition: the payment update and the
        // invoice issue are one atomic step on this backend.
        let mut state = self.state.write().await;
        let order = state
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("order", id))?;
        order.payment_status = status;
        if method.is_some() {
            order.payment_method = method;
        }
        order.updated_at = Some(Utc::now());
        let order = order.clone();

        let mut invoice = None;
        if status == PaymentStatus::Completed
            && !state.invoices.values().any(|i| i.order_id == order.id)
        {
            let issued = Invoice {
                id: new_entity_id(),
                invoice_number: business_number("INV"),
                order_id: order.id.clone(),
                customer_name: order.customer_name.clone(),
                customer_email: order.customer_email.clone(),
                service_name: order.service_name.clone(),
                amount: order.price,
                issued_at: Utc::now(),
            };
            state.invoices.insert(issued.id.clone(), issued.clone());
            invoice = Some(issued);
        }

        Ok(PaymentUpdate { order, invoice })
    }

    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        Ok(self.state.read().await.invoices.get(id).cloned())
    }

    async fn invoices(&self) -> StoreResult<Vec<Invoice>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.invoices, |i| (i.issued_at, i.id.clone())))
    }

    async fn unbilled_paid_orders(&self) -> StoreResult<Vec<Order>> {
        let state = self.state.read().await;
        let mut rows: Vec<&Order> = state
            .orders
            .values()
            .filter(|o| o.payment_status == PaymentStatus::Completed)
            .filter(|o| !state.invoices.values().any(|i| i.order_id == o.id))
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn create_project(&self, input: NewProject) -> StoreResult<Project> {
        let mut state = self.state.write().await;
        let project = Project {
            id: new_entity_id(),
            client_id: input.client_id,
            name: input.name,
            description: input.description,
            status: ProjectStatus::Analysis,
            days_remaining: input.days_remaining,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn project(&self, id: &str) -> StoreResult<Option<Project>> {
        Ok(self.state.read().await.projects.get(id).cloned())
    }

    async fn projects(&self) -> StoreResult<Vec<Project>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.projects, |p| (p.created_at, p.id.clone())))
    }

    async fn projects_by_client(&self, client_id: &str) -> StoreResult<Vec<Project>> {
        let state = self.state.read().await;
        let mut rows: Vec<&Project> = state
            .projects
            .values()
            .filter(|p| p.client_id == client_id)
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn update_project_status(&self, id: &str, status: ProjectStatus) -> StoreResult<Project> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("project", id))?;
        project.status = status;
        project.updated_at = Some(Utc::now());
        Ok(project.clone())
    }

    async fn update_project_days(&self, id: &str, days_remaining: i32) -> StoreResult<Project> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("project", id))?;
        project.days_remaining = days_remaining;
        project.updated_at = Some(Utc::now());
        Ok(project.clone())
    }

    async fn create_task(&self, input: NewEmployeeTask) -> StoreResult<EmployeeTask> {
        let mut state = self.state.write().await;
        let task = EmployeeTask {
            id: new_entity_id(),
            employee_id: input.employee_id,
            project_id: input.project_id,
            title: input.title,
            completed: false,
            hours_remaining: input.hours_remaining,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn tasks_by_employee(&self, employee_id: &str) -> StoreResult<Vec<EmployeeTask>> {
        let state = self.state.read().await;
        let mut rows: Vec<&EmployeeTask> = state
            .tasks
            .values()
            .filter(|t| t.employee_id == employee_id)
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn tasks_by_project(&self, project_id: &str) -> StoreResult<Vec<EmployeeTask>> {
        let state = self.state.read().await;
        let mut rows: Vec<&EmployeeTask> = state
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn all_tasks(&self) -> StoreResult<Vec<EmployeeTask>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.tasks, |t| (t.created_at, t.id.clone())))
    }

    async fn update_task_progress(
        &self,
        id: &str,
        input: UpdateTaskProgress,
    ) -> StoreResult<EmployeeTask> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("task", id))?;
        if let Some(hours) = input.hours_remaining {
            task.hours_remaining = hours;
        }
        if let Some(completed) = input.completed {
            task.completed = completed;
        }
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn create_course(&self, input: NewCourse) -> StoreResult<Course> {
        let mut state = self.state.write().await;
        let course = build_course(input);
        state.courses.insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn course(&self, id: &str) -> StoreResult<Option<Course>> {
        Ok(self.state.read().await.courses.get(id).cloned())
    }

    async fn courses(&self) -> StoreResult<Vec<Course>> {
        let state = self.state.read().await;
        Ok(sorted_by(&state.courses, |c| (c.created_at, c.id.clone())))
    }

    async fn create_enrollment(&self, input: NewEnrollment) -> StoreResult<Enrollment> {
        let mut state = self.state.write().await;
        let enrollment = Enrollment {
            id: new_entity_id(),
            student_id: input.student_id,
            course_id: input.course_id,
            progress: 0,
            enrolled_at: Utc::now(),
            updated_at: None,
        };
        state
            .enrollments
            .insert(enrollment.id.clone(), enrollment.clone());
        Ok(enrollment)
    }

    async fn enrollments_by_student(&self, student_id: &str) -> StoreResult<Vec<Enrollment>> {
        let state = self.state.read().await;
        let mut rows: Vec<&Enrollment> = state
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .collect();
        rows.sort_by(|a, b| (a.enrolled_at, &a.id).cmp(&(b.enrolled_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn update_enrollment_progress(
        &self,
        id: &str,
        progress: i32,
    ) -> StoreResult<Enrollment> {
        let mut state = self.state.write().await;
        let enrollment = state
            .enrollments
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("enrollment", id))?;
        enrollment.progress = progress.clamp(0, 100);
        enrollment.updated_at = Some(Utc::now());
        Ok(enrollment.clone())
    }

    async fn record_lesson_progress(
        &self,
        input: NewLessonProgress,
    ) -> StoreResult<LessonProgress> {
        let mut state = self.state.write().await;
        let record = LessonProgress {
            id: new_entity_id(),
            enrollment_id: input.enrollment_id,
            lesson_index: input.lesson_index,
            completed_at: Utc::now(),
        };
        state
            .lesson_progress
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn lesson_progress(&self, enrollment_id: &str) -> StoreResult<Vec<LessonProgress>> {
        let state = self.state.read().await;
        let mut rows: Vec<&LessonProgress> = state
            .lesson_progress
            .values()
            .filter(|l| l.enrollment_id == enrollment_id)
            .collect();
        rows.sort_by(|a, b| (a.completed_at, &a.id).cmp(&(b.completed_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn record_quiz_attempt(&self, input: NewQuizAttempt) -> StoreResult<QuizAttempt> {
        let mut state = self.state.write().await;
        let attempt = QuizAttempt {
            id: new_entity_id(),
            enrollment_id: input.enrollment_id,
            quiz_name: input.quiz_name,
            score: input.score,
            passed: input.passed,
            attempted_at: Utc::now(),
        };
        state
            .quiz_attempts
            .insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn quiz_attempts(&self, enrollment_id: &str) -> StoreResult<Vec<QuizAttempt>> {
        let state = self.state.read().await;
        let mut rows: Vec<&QuizAttempt> = state
            .quiz_attempts
            .values()
            .filter(|q| q.enrollment_id == enrollment_id)
            .collect();
        rows.sort_by(|a, b| (a.attempted_at, &a.id).cmp(&(b.attempted_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn issue_certificate(&self, input: NewCertificate) -> StoreResult<Certificate> {
        let mut state = self.state.write().await;
        let certificate = Certificate {
            id: new_entity_id(),
            certificate_number: business_number("CERT"),
            student_id: input.student_id,
            course_id: input.course_id,
            approved_by: input.approved_by,
            issued_at: Utc::now(),
        };
        state
            .certificates
            .insert(certificate.id.clone(), certificate.clone());
        Ok(certificate)
    }

    async fn certificates_by_student(&self, student_id: &str) -> StoreResult<Vec<Certificate>> {
        let state = self.state.read().await;
        let mut rows: Vec<&Certificate> = state
            .certificates
            .values()
            .filter(|c| c.student_id == student_id)
            .collect();
        rows.sort_by(|a, b| (a.issued_at, &a.id).cmp(&(b.issued_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn ensure_seed_data(&self) -> StoreResult<()> {
        self.state.write().await.seed();
        Ok(())
    }

    async fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        let state = self.state.read().await;
        let orders: Vec<Order> = state.orders.values().cloned().collect();
        Ok(reports::dashboard_from_rows(
            &orders,
            state.clients.len() as u64,
            state.students.len() as u64,
            state
                .projects
                .values()
                .filter(|p| p.status != ProjectStatus::Completed)
                .count() as u64,
            state
                .projects
                .values()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count() as u64,
            Utc::now(),
        ))
    }
}

#[async_trait]
impl CollabStore for MemoryStore {
    async fn open_conversation(&self, input: OpenConversation) -> StoreResult<ChatConversation> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.conversations.values().find(|c| {
            c.project_id == input.project_id
                && c.client_id == input.client_id
                && c.employee_id == input.employee_id
        }) {
            return Ok(existing.clone());
        }
        let now = Utc::now();
        let conversation = ChatConversation {
            id: new_entity_id(),
            project_id: input.project_id,
            client_id: input.client_id,
            employee_id: input.employee_id,
            last_activity_at: now,
            created_at: now,
        };
        state
            .conversations
            .insert(conversation.id.clone(), conversation.clone());
        Ok(conversation)
    }

    async fn conversation(&self, id: &str) -> StoreResult<Option<ChatConversation>> {
        Ok(self.state.read().await.conversations.get(id).cloned())
    }

    async fn conversations_by_client(
        &self,
        client_id: &str,
    ) -> StoreResult<Vec<ChatConversation>> {
        let state = self.state.read().await;
        let mut rows: Vec<&ChatConversation> = state
            .conversations
            .values()
            .filter(|c| c.client_id == client_id)
            .collect();
        // Most recently active thread first.
        rows.sort_by(|a, b| b.last_activity_at.cmp(&a.last_activity_at));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn create_message(&self, input: NewChatMessage) -> StoreResult<ChatMessage> {
        // Message append and conversation touch under one lock.
        let mut state = self.state.write().await;
        let conversation = state
            .conversations
            .get_mut(&input.conversation_id)
            .ok_or_else(|| StoreError::not_found("conversation", &input.conversation_id))?;
        let now = Utc::now();
        conversation.last_activity_at = now;

        let message = ChatMessage {
            id: new_entity_id(),
            conversation_id: input.conversation_id,
            sender_id: input.sender_id,
            content: input.content,
            is_read: false,
            created_at: now,
        };
        state.messages.insert(message.id.clone(), message.clone());
        Ok(message)
    }

    async fn messages(&self, conversation_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let state = self.state.read().await;
        let mut rows: Vec<&ChatMessage> = state
            .messages
            .values()
            .filter(|m| m.conversation_id == conversation_id)
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn mark_messages_read(
        &self,
        conversation_id: &str,
        reader_id: &str,
    ) -> StoreResult<u64> {
        let mut state = self.state.write().await;
        let mut flipped = 0;
        for message in state.messages.values_mut() {
            if message.conversation_id == conversation_id
                && message.sender_id != reader_id
                && !message.is_read
            {
                message.is_read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn create_modification_request(
        &self,
        input: NewRequest,
    ) -> StoreResult<ModificationRequest> {
        let mut state = self.state.write().await;
        let request = ModificationRequest {
            id: new_entity_id(),
            project_id: input.project_id,
            client_id: input.client_id,
            title: input.title,
            details: input.details,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        };
        state
            .modification_requests
            .insert(request.id.clone(), request.clone());
        Ok(request)
    }

    async fn modification_requests_by_project(
        &self,
        project_id: &str,
    ) -> StoreResult<Vec<ModificationRequest>> {
        let state = self.state.read().await;
        let mut rows: Vec<&ModificationRequest> = state
            .modification_requests
            .values()
            .filter(|r| r.project_id == project_id)
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn update_modification_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> StoreResult<ModificationRequest> {
        let mut state = self.state.write().await;
        let request = state
            .modification_requests
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("modification request", id))?;
        request.status = status;
        request.updated_at = Some(Utc::now());
        Ok(request.clone())
    }

    async fn create_feature_request(&self, input: NewRequest) -> StoreResult<FeatureRequest> {
        let mut state = self.state.write().await;
        let request = FeatureRequest {
            id: new_entity_id(),
            project_id: input.project_id,
            client_id: input.client_id,
            title: input.title,
            details: input.details,
            status: RequestStatus::Pending,
            estimated_cost: None,
            estimated_days: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        state
            .feature_requests
            .insert(request.id.clone(), request.clone());
        Ok(request)
    }

    async fn feature_requests_by_project(
        &self,
        project_id: &str,
    ) -> StoreResult<Vec<FeatureRequest>> {
        let state = self.state.read().await;
        let mut rows: Vec<&FeatureRequest> = state
            .feature_requests
            .values()
            .filter(|r| r.project_id == project_id)
            .collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows.into_iter().cloned().collect())
    }

    async fn update_feature_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> StoreResult<FeatureRequest> {
        let mut state = self.state.write().await;
        let request = state
            .feature_requests
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("feature request", id))?;
        request.status = status;
        request.updated_at = Some(Utc::now());
        Ok(request.clone())
    }

    async fn set_feature_request_estimate(
        &self,
        id: &str,
        input: SetFeatureEstimate,
    ) -> StoreResult<FeatureRequest> {
        let mut state = self.state.write().await;
        let request = state
            .feature_requests
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("feature request", id))?;
        request.estimated_cost = Some(input.estimated_cost);
        request.estimated_days = Some(input.estimated_days);
        request.updated_at = Some(Utc::now());
        Ok(request.clone())
    }
}
