use tracing::warn;

use crate::account_state::AccountNotice;
use crate::guard::{GuardDecision, decide};
use crate::remote::{AuthPayload, RegistrationFields, RegistrationKind, ResourceResult};
use crate::routes::Route;
use crate::session::SessionStore;
use crate::store::CredentialStorage;

use super::{GENERIC_ERROR, failure_message};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub message: String,
    pub errors: Vec<String>,
    pub notice: Option<AccountNotice>,
}

impl Rejection {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
            notice: None,
        }
    }

    fn from_result<T>(res: &ResourceResult<T>) -> Self {
        let message = if res.message.trim().is_empty() {
            failure_message(res)
        } else {
            res.message.clone()
        };
        Self {
            message,
            errors: res.errors.clone(),
            notice: AccountNotice::from_result(res),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Redirect(Route),
    Rejected(Rejection),
}

fn outcome<S: CredentialStorage>(
    session: &SessionStore<S>,
    res: anyhow::Result<ResourceResult<AuthPayload>>,
    return_to: Option<&Route>,
) -> LoginOutcome {
    let res = match res {
        Ok(res) => res,
        Err(err) => {
            warn!(error = %format!("{:#}", err), "sign-in transport failure");
            return LoginOutcome::Rejected(Rejection::plain(GENERIC_ERROR));
        }
    };
    if !res.is_success {
        return LoginOutcome::Rejected(Rejection::from_result(&res));
    }

    let state = session.current();
    let Some(role) = state.role() else {
        return LoginOutcome::Rejected(Rejection::plain(GENERIC_ERROR));
    };
    match return_to {
        Some(route) if decide(&state, route.access()) == GuardDecision::Render => {
            LoginOutcome::Redirect(route.clone())
        }
        _ => LoginOutcome::Redirect(Route::landing_for(role)),
    }
}

/// Sign-in screen. Remembers the route the guard bounced the user from.
#[derive(Clone, Debug, Default)]
pub struct LoginView {
    pub return_to: Option<Route>,
    pub submitting: bool,
}

impl LoginView {
    pub fn new(return_to: Option<Route>) -> Self {
        Self {
            return_to,
            submitting: false,
        }
    }

    pub fn submit<S: CredentialStorage>(
        &mut self,
        session: &SessionStore<S>,
        email: &str,
        password: &str,
    ) -> LoginOutcome {
        if email.trim().is_empty() || password.is_empty() {
            return LoginOutcome::Rejected(Rejection::plain("Email and password are required."));
        }
        self.submitting = true;
        let res = session.login(email.trim(), password);
        self.submitting = false;
        outcome(session, res, self.return_to.as_ref())
    }
}

#[derive(Clone, Debug)]
pub struct RegisterView {
    pub kind: RegistrationKind,
    pub fields: RegistrationFields,
    pub confirm_password: String,
}

impl RegisterView {
    pub fn new(kind: RegistrationKind) -> Self {
        Self {
            kind,
            fields: RegistrationFields::default(),
            confirm_password: String::new(),
        }
    }

    /// Basic form constraints; the server validates the rest.
    pub fn validate(&self) -> Vec<String> {
        let f = &self.fields;
        let mut errors = Vec::new();
        if f.first_name.trim().is_empty() {
            errors.push("First name is required.".to_string());
        }
        if f.last_name.trim().is_empty() {
            errors.push("Last name is required.".to_string());
        }
        if !f.email.contains('@') {
            errors.push("Enter a valid email address.".to_string());
        }
        if f.password.chars().count() < 6 {
            errors.push("Password must be at least 6 characters.".to_string());
        }
        if f.password != self.confirm_password {
            errors.push("Passwords do not match.".to_string());
        }
        errors
    }

    pub fn submit<S: CredentialStorage>(&self, session: &SessionStore<S>) -> LoginOutcome {
        let errors = self.validate();
        if !errors.is_empty() {
            return LoginOutcome::Rejected(Rejection {
                message: "Please fix the highlighted fields.".to_string(),
                errors,
                notice: None,
            });
        }
        let res = session.register_as(self.kind, &self.fields);
        outcome(session, res, None)
    }
}
