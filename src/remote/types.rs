//! DTOs and payload types for remote API requests/responses.

use serde::{Deserialize, Serialize};

use crate::model::{AccountStatus, CourseId, Identity, Role, UserId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginRequest<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

/// Payload of a successful login or registration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,

    /// Some deployments embed the user; otherwise it is fetched via the profile.
    #[serde(default)]
    pub user: Option<Identity>,
}

/// Which registration endpoint to use; also fixes the resulting role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationKind {
    Student,
    Instructor,
}

impl RegistrationKind {
    pub fn role(self) -> Role {
        match self {
            Self::Student => Role::Student,
            Self::Instructor => Role::Instructor,
        }
    }

    pub(super) fn path(self) -> &'static str {
        match self {
            Self::Student => "/auth/register/student",
            Self::Instructor => "/auth/register/instructor",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,

    /// Instructor registrations only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChangePasswordRequest<'a> {
    pub(super) current_password: &'a str,
    pub(super) new_password: &'a str,
}

/// Body for both course creation and course edits.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub order_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EnrollRequest<'a> {
    pub(super) course_id: &'a CourseId,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub recipient_id: UserId,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserStatusRequest<'a> {
    pub(super) status: AccountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) suspended_until: Option<&'a str>,
}
