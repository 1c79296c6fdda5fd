//! BSON document shapes for the document backend, with conversions to
//! the backend-neutral domain structs. Ids are native ObjectIds and are
//! exposed to callers as their hex strings.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

pub fn to_bson_dt(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

pub fn to_chrono_dt(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

fn opt_chrono(dt: Option<bson::DateTime>) -> Option<DateTime<Utc>> {
    dt.map(to_chrono_dt)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub created_at: bson::DateTime,
}

impl From<ClientDoc> for crate::models::accounts::Client {
    fn from(d: ClientDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            name: d.name,
            email: d.email,
            password_hash: d.password_hash,
            company: d.company,
            phone: d.phone,
            created_at: to_chrono_dt(d.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub job_title: Option<String>,
    pub created_at: bson::DateTime,
}

impl From<EmployeeDoc> for crate::models::accounts::Employee {
    fn from(d: EmployeeDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            name: d.name,
            email: d.email,
            password_hash: d.password_hash,
            job_title: d.job_title,
            created_at: to_chrono_dt(d.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: bson::DateTime,
}

impl From<StudentDoc> for crate::models::accounts::Student {
    fn from(d: StudentDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            name: d.name,
            email: d.email,
            password_hash: d.password_hash,
            phone: d.phone,
            created_at: to_chrono_dt(d.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub features: Vec<String>,
    pub is_active: bool,
    pub created_at: bson::DateTime,
}

impl From<ServiceDoc> for crate::models::catalog::Service {
    fn from(d: ServiceDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            name: d.name,
            category: d
                .category
                .parse()
                .unwrap_or(crate::models::catalog::ServiceCategory::Other),
            price: d.price,
            features: d.features,
            is_active: d.is_active,
            created_at: to_chrono_dt(d.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiscountCodeDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub code: String,
    pub percent_off: i32,
    pub is_active: bool,
    pub expires_at: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
}

impl From<DiscountCodeDoc> for crate::models::catalog::DiscountCode {
    fn from(d: DiscountCodeDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            code: d.code,
            percent_off: d.percent_off,
            is_active: d.is_active,
            expires_at: opt_chrono(d.expires_at),
            created_at: to_chrono_dt(d.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service_id: Option<ObjectId>,
    pub service_name: Option<String>,
    pub price: i64,
    pub discount_code: Option<String>,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub created_at: bson::DateTime,
    pub updated_at: Option<bson::DateTime>,
}

impl From<OrderDoc> for crate::models::orders::Order {
    fn from(d: OrderDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            order_number: d.order_number,
            customer_name: d.customer_name,
            customer_email: d.customer_email,
            customer_phone: d.customer_phone,
            service: crate::models::orders::ServiceRef::from(
                d.service_id.map(|id| id.to_hex()),
            ),
            service_name: d.service_name,
            price: d.price,
            discount_code: d.discount_code,
            status: d
                .status
                .parse()
                .unwrap_or(crate::models::orders::OrderStatus::Pending),
            payment_status: d
                .payment_status
                .parse()
                .unwrap_or(crate::models::orders::PaymentStatus::Pending),
            payment_method: d.payment_method,
            created_at: to_chrono_dt(d.created_at),
            updated_at: opt_chrono(d.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub invoice_number: String,
    pub order_id: ObjectId,
    pub customer_name: String,
    pub customer_email: String,
    pub service_name: Option<String>,
    pub amount: i64,
    pub issued_at: bson::DateTime,
}

impl From<InvoiceDoc> for crate::models::orders::Invoice {
    fn from(d: InvoiceDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            invoice_number: d.invoice_number,
            order_id: d.order_id.to_hex(),
            customer_name: d.customer_name,
            customer_email: d.customer_email,
            service_name: d.service_name,
            amount: d.amount,
            issued_at: to_chrono_dt(d.issued_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: ObjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub days_remaining: i32,
    pub created_at: bson::DateTime,
    pub updated_at: Option<bson::DateTime>,
}

impl From<ProjectDoc> for crate::models::projects::Project {
    fn from(d: ProjectDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            client_id: d.client_id.to_hex(),
            name: d.name,
            description: d.description,
            status: d
                .status
                .parse()
                .unwrap_or(crate::models::projects::ProjectStatus::Analysis),
            days_remaining: d.days_remaining,
            created_at: to_chrono_dt(d.created_at),
            updated_at: opt_chrono(d.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeTaskDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub employee_id: ObjectId,
    pub project_id: ObjectId,
    pub title: String,
    pub completed: bool,
    pub hours_remaining: i32,
    pub created_at: bson::DateTime,
    pub updated_at: Option<bson::DateTime>,
}

impl From<EmployeeTaskDoc> for crate::models::projects::EmployeeTask {
    fn from(d: EmployeeTaskDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            employee_id: d.employee_id.to_hex(),
            project_id: d.project_id.to_hex(),
            title: d.title,
            completed: d.completed,
            hours_remaining: d.hours_remaining,
            created_at: to_chrono_dt(d.created_at),
            updated_at: opt_chrono(d.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CourseDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub lesson_count: i32,
    pub is_active: bool,
    pub created_at: bson::DateTime,
}

impl From<CourseDoc> for crate::models::academy::Course {
    fn from(d: CourseDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            title: d.title,
            description: d.description,
            price: d.price,
            lesson_count: d.lesson_count,
            is_active: d.is_active,
            created_at: to_chrono_dt(d.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollmentDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub student_id: ObjectId,
    pub course_id: ObjectId,
    pub progress: i32,
    pub enrolled_at: bson::DateTime,
    pub updated_at: Option<bson::DateTime>,
}

impl From<EnrollmentDoc> for crate::models::academy::Enrollment {
    fn from(d: EnrollmentDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            student_id: d.student_id.to_hex(),
            course_id: d.course_id.to_hex(),
            progress: d.progress,
            enrolled_at: to_chrono_dt(d.enrolled_at),
            updated_at: opt_chrono(d.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LessonProgressDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub enrollment_id: ObjectId,
    pub lesson_index: i32,
    pub completed_at: bson::DateTime,
}

impl From<LessonProgressDoc> for crate::models::academy::LessonProgress {
    fn from(d: LessonProgressDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            enrollment_id: d.enrollment_id.to_hex(),
            lesson_index: d.lesson_index,
            completed_at: to_chrono_dt(d.completed_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizAttemptDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub enrollment_id: ObjectId,
    pub quiz_name: String,
    pub score: i32,
    pub passed: bool,
    pub attempted_at: bson::DateTime,
}

impl From<QuizAttemptDoc> for crate::models::academy::QuizAttempt {
    fn from(d: QuizAttemptDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            enrollment_id: d.enrollment_id.to_hex(),
            quiz_name: d.quiz_name,
            score: d.score,
            passed: d.passed,
            attempted_at: to_chrono_dt(d.attempted_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CertificateDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub certificate_number: String,
    pub student_id: ObjectId,
    pub course_id: ObjectId,
    pub approved_by: ObjectId,
    pub issued_at: bson::DateTime,
}

impl From<CertificateDoc> for crate::models::academy::Certificate {
    fn from(d: CertificateDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            certificate_number: d.certificate_number,
            student_id: d.student_id.to_hex(),
            course_id: d.course_id.to_hex(),
            approved_by: d.approved_by.to_hex(),
            issued_at: to_chrono_dt(d.issued_at),
        }
    }
}
