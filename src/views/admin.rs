use tracing::info;

use crate::model::{AccountStatus, UserId, UserSummary};

use super::{Mount, ViewContext, ViewState, settle, settle_optional};

pub struct AdminUsersView {
    ctx: ViewContext,
    mount: Mount,
    pub state: ViewState<Vec<UserSummary>>,
    pub notice: Option<String>,
}

impl AdminUsersView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            mount: Mount::new(),
            state: ViewState::Loading,
            notice: None,
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn load(&mut self) {
        self.state = ViewState::Loading;
        let outcome = settle(self.ctx.client.list_users(), "list users");
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    /// Bans, suspends or reactivates a user and patches that row.
    pub fn set_status(
        &mut self,
        user: &UserId,
        status: AccountStatus,
        suspended_until: Option<&str>,
    ) -> bool {
        if status == AccountStatus::Suspended && suspended_until.is_none() {
            self.notice = Some("A suspension needs a reactivation date.".to_string());
            return false;
        }
        let outcome = settle_optional(
            self.ctx.client.set_user_status(user, status, suspended_until),
            "set user status",
        );
        if !self.mount.is_mounted() {
            return false;
        }
        match outcome {
            Ok(updated) => {
                info!(user = %user, ?status, "user status changed");
                if let Some(row) = self
                    .state
                    .data_mut()
                    .and_then(|rows| rows.iter_mut().find(|r| &r.id == user))
                {
                    match updated {
                        Some(updated) => *row = updated,
                        None => {
                            row.status = status;
                            row.suspended_until = suspended_until.map(str::to_string);
                        }
                    }
                }
                self.notice = None;
                true
            }
            Err(msg) => {
                self.notice = Some(msg);
                false
            }
        }
    }
}
