//! Authentication, profile and user administration calls.

use anyhow::Result;
use reqwest::Method;

use crate::model::{AccountStatus, Identity, UserId, UserSummary};

use super::{
    AuthPayload, ChangePasswordRequest, LoginRequest, ProfileUpdate, RegistrationFields,
    RegistrationKind, RemoteClient, ResourceResult, UserStatusRequest,
};

impl RemoteClient {
    pub fn login(&self, email: &str, password: &str) -> Result<ResourceResult<AuthPayload>> {
        self.send_json(
            Method::POST,
            "/auth/login",
            &LoginRequest { email, password },
            "login",
        )
    }

    pub fn register(
        &self,
        kind: RegistrationKind,
        fields: &RegistrationFields,
    ) -> Result<ResourceResult<AuthPayload>> {
        self.send_json(Method::POST, kind.path(), fields, "register")
    }

    /// Resolves the attached credential to the user it belongs to.
    pub fn profile(&self) -> Result<ResourceResult<Identity>> {
        self.get("/users/profile", "fetch profile")
    }

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<ResourceResult<Identity>> {
        self.send_json(Method::PUT, "/users/profile", update, "update profile")
    }

    pub fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<ResourceResult<serde_json::Value>> {
        self.send_json(
            Method::PUT,
            "/users/password",
            &ChangePasswordRequest {
                current_password,
                new_password,
            },
            "change password",
        )
    }

    pub fn list_users(&self) -> Result<ResourceResult<Vec<UserSummary>>> {
        self.get("/admin/users", "list users")
    }

    pub fn set_user_status(
        &self,
        user_id: &UserId,
        status: AccountStatus,
        suspended_until: Option<&str>,
    ) -> Result<ResourceResult<UserSummary>> {
        self.send_json(
            Method::PUT,
            &format!("/admin/users/{}/status", user_id),
            &UserStatusRequest {
                status,
                suspended_until,
            },
            "set user status",
        )
    }
}
