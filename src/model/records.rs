//! Server-defined records, displayed as-is. Optional fields default so a
//! sparse payload still renders.

use serde::{Deserialize, Serialize};

use super::{CertificateId, CourseId, EnrollmentId, LessonId, MessageId, Role, UserId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub instructor_id: Option<UserId>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub order_index: u32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub course_id: CourseId,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub student_id: Option<UserId>,
    #[serde(default)]
    pub enrolled_at: Option<String>,
    #[serde(default)]
    pub progress_percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStatus {
    #[serde(default)]
    pub is_enrolled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub recipient_id: UserId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub course_id: CourseId,
    #[serde(default)]
    pub completed_lesson_ids: Vec<LessonId>,
    #[serde(default)]
    pub total_lessons: u32,
}

impl Progress {
    pub fn is_completed(&self, lesson: &LessonId) -> bool {
        self.completed_lesson_ids.contains(lesson)
    }

    pub fn percent(&self) -> u32 {
        if self.total_lessons == 0 {
            return 0;
        }
        let done = self.completed_lesson_ids.len().min(self.total_lessons as usize) as u32;
        done * 100 / self.total_lessons
    }

    pub fn is_course_complete(&self) -> bool {
        self.total_lessons > 0 && self.completed_lesson_ids.len() as u32 >= self.total_lessons
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: CertificateId,
    pub course_id: CourseId,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub certificate_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Suspended,
    Banned,
}

/// Row of the administrator's user listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub suspended_until: Option<String>,
}

#[cfg(test)]
#[path = "../tests/model/records_tests.rs"]
mod tests;
