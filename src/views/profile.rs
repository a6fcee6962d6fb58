use crate::model::Identity;
use crate::remote::ProfileUpdate;
use crate::session::SessionStore;
use crate::store::CredentialStorage;

use super::{Mount, ViewContext, ViewState, settle, settle_ack};

pub struct ProfileView {
    ctx: ViewContext,
    mount: Mount,
    pub state: ViewState<Identity>,
    pub notice: Option<String>,
}

impl ProfileView {
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
        let outcome = settle(self.ctx.client.profile(), "fetch profile");
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    /// Saves the edit, then refreshes the session so every other
    /// subscriber sees the new name.
    pub fn save<S: CredentialStorage>(
        &mut self,
        session: &SessionStore<S>,
        update: &ProfileUpdate,
    ) -> bool {
        if update.email.as_deref().is_some_and(|e| !e.contains('@')) {
            self.notice = Some("Enter a valid email address.".to_string());
            return false;
        }
        let outcome = settle(self.ctx.client.update_profile(update), "update profile");
        if !self.mount.is_mounted() {
            return false;
        }
        match outcome {
            Ok(identity) => {
                self.state = ViewState::Ready(identity);
                self.notice = None;
                if let Ok(res) = session.refresh_identity()
                    && !res.is_success
                {
                    self.notice = Some(super::failure_message(&res));
                }
                true
            }
            Err(msg) => {
                self.notice = Some(msg);
                false
            }
        }
    }

    pub fn change_password(&mut self, current: &str, new: &str, confirm: &str) -> bool {
        if new.chars().count() < 6 {
            self.notice = Some("Password must be at least 6 characters.".to_string());
            return false;
        }
        if new != confirm {
            self.notice = Some("Passwords do not match.".to_string());
            return false;
        }
        match settle_ack(
            self.ctx.client.change_password(current, new),
            "change password",
        ) {
            Ok(()) => {
                self.notice = Some("Password updated.".to_string());
                true
            }
            Err(msg) => {
                self.notice = Some(msg);
                false
            }
        }
    }
}
