use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course in the academy catalog. Seeded alongside services.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub lesson_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A student's relationship to a course. `progress` is a 0–100 integer
/// set explicitly by callers — the store never derives it from lesson
/// records.
#[derive(Debug, Clone, Serialize)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub progress: i32,
    pub enrolled_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonProgress {
    pub id: String,
    pub enrollment_id: String,
    pub lesson_index: i32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub enrollment_id: String,
    pub quiz_name: String,
    pub score: i32,
    pub passed: bool,
    pub attempted_at: DateTime<Utc>,
}

/// Issued only on explicit staff approval — passing a quiz alone never
/// produces a certificate.
#[derive(Debug, Clone, Serialize)]
pub struct Certificate {
    pub id: String,
    pub certificate_number: String,
    pub student_id: String,
    pub course_id: String,
    pub approved_by: String,
    pub issued_at: DateTime<Utc>,
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub lesson_count: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEnrollment {
    pub student_id: String,
    pub course_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnrollmentProgress {
    pub progress: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLessonProgress {
    pub enrollment_id: String,
    pub lesson_index: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuizAttempt {
    pub enrollment_id: String,
    pub quiz_name: String,
    pub score: i32,
    pub passed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCertificate {
    pub student_id: String,
    pub course_id: String,
    pub approved_by: String,
}
