//! The single source of truth for who is signed in.
//!
//! [`SessionStore`] owns the credential/identity pair and publishes every
//! change through a watch channel. Publishing is synchronous, so any
//! subscriber (the access guard, a view) sees the new state before the
//! mutating call returns.

use std::rc::Rc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::model::{Identity, Role};
use crate::remote::{
    AuthPayload, RegistrationFields, RegistrationKind, RemoteClient, ResourceResult,
    UNEXPECTED_RESPONSE,
};
use crate::store::{CREDENTIAL_KEY, CredentialStorage};

/// A credential together with the identity it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    pub credential: String,
    pub identity: Identity,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Restore has not finished yet.
    Loading,
    Anonymous,
    Authenticated(AuthSession),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(s) => Some(&s.identity),
            Self::Loading | Self::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|i| i.role)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

pub struct SessionStore<S> {
    client: Rc<RemoteClient>,
    storage: S,
    tx: watch::Sender<SessionState>,
}

impl<S: CredentialStorage> SessionStore<S> {
    /// Starts in [`SessionState::Loading`]; call [`SessionStore::restore`] next.
    pub fn new(client: Rc<RemoteClient>, storage: S) -> Self {
        let (tx, _) = watch::channel(SessionState::Loading);
        Self {
            client,
            storage,
            tx,
        }
    }

    pub fn client(&self) -> &Rc<RemoteClient> {
        &self.client
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.tx.borrow().identity().cloned()
    }

    /// Resolves a persisted credential into a session. Any failure leaves
    /// the session empty and the stored credential cleared; this never
    /// errors.
    pub fn restore(&self) -> SessionState {
        let token = match self.storage.load(CREDENTIAL_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => {
                debug!("no stored credential");
                self.client.set_credential(None);
                return self.publish(SessionState::Anonymous);
            }
            Err(err) => {
                warn!(error = %format!("{:#}", err), "could not read stored credential");
                return self.end_session();
            }
        };

        self.client.set_credential(Some(token.clone()));
        match self.client.profile() {
            Ok(res) => {
                let status = res.status_code;
                match res.into_payload() {
                    Some(identity) => {
                        info!(user = %identity.id, role = %identity.role, "session restored");
                        self.publish(SessionState::Authenticated(AuthSession {
                            credential: token,
                            identity,
                        }))
                    }
                    None => {
                        info!(status, "stored credential rejected");
                        self.end_session()
                    }
                }
            }
            Err(err) => {
                warn!(error = %format!("{:#}", err), "could not resolve stored credential");
                self.end_session()
            }
        }
    }

    /// Signs in. The server's envelope is handed back untouched on success
    /// so the caller can branch on the role; application failures come
    /// back as failure envelopes, transport failures as `Err`.
    pub fn login(&self, identifier: &str, secret: &str) -> Result<ResourceResult<AuthPayload>> {
        let res = self.client.login(identifier, secret)?;
        self.establish(res, None)
    }

    /// Registers a new account. The resulting role is fixed by `kind`,
    /// whatever the server reports.
    pub fn register_as(
        &self,
        kind: RegistrationKind,
        fields: &RegistrationFields,
    ) -> Result<ResourceResult<AuthPayload>> {
        let res = self.client.register(kind, fields)?;
        self.establish(res, Some(kind.role()))
    }

    pub fn logout(&self) {
        info!("signed out");
        self.end_session();
    }

    /// Re-reads the profile of the current session, e.g. after it was
    /// edited. A rejected credential ends the session.
    pub fn refresh_identity(&self) -> Result<ResourceResult<Identity>> {
        let SessionState::Authenticated(current) = self.current() else {
            return Ok(ResourceResult::failure(401, "not signed in", Vec::new()));
        };
        let res = self.client.profile()?;
        match res.payload() {
            Some(identity) => {
                self.publish(SessionState::Authenticated(AuthSession {
                    credential: current.credential,
                    identity: identity.clone(),
                }));
            }
            None if res.status_code == 401 => {
                info!("credential expired");
                self.end_session();
            }
            None => {}
        }
        Ok(res)
    }

    fn establish(
        &self,
        res: ResourceResult<AuthPayload>,
        forced_role: Option<Role>,
    ) -> Result<ResourceResult<AuthPayload>> {
        if !res.is_success {
            info!(status = res.status_code, "sign-in rejected");
            return Ok(res);
        }
        let Some(payload) = res.payload().filter(|p| !p.token.trim().is_empty()) else {
            warn!("sign-in succeeded without a credential");
            return Ok(ResourceResult::failure(
                res.status_code,
                UNEXPECTED_RESPONSE,
                Vec::new(),
            ));
        };

        let token = payload.token.clone();
        self.client.set_credential(Some(token.clone()));

        let mut identity = match payload.user.clone() {
            Some(user) => user,
            None => match self.client.profile() {
                Ok(profile) => match profile.payload() {
                    Some(identity) => identity.clone(),
                    None => {
                        info!(status = profile.status_code, "identity resolution failed");
                        self.end_session();
                        if profile.is_success {
                            return Ok(ResourceResult::failure(
                                profile.status_code,
                                UNEXPECTED_RESPONSE,
                                Vec::new(),
                            ));
                        }
                        return Ok(profile.cast_failure());
                    }
                },
                Err(err) => {
                    self.end_session();
                    return Err(err);
                }
            },
        };
        if let Some(role) = forced_role {
            identity.role = role;
        }

        if let Err(err) = self.storage.save(CREDENTIAL_KEY, &token) {
            warn!(error = %format!("{:#}", err), "credential not persisted; session ends with this process");
        }
        info!(user = %identity.id, role = %identity.role, "signed in");
        self.publish(SessionState::Authenticated(AuthSession {
            credential: token,
            identity,
        }));
        Ok(res)
    }

    fn end_session(&self) -> SessionState {
        if let Err(err) = self.storage.remove(CREDENTIAL_KEY) {
            warn!(error = %format!("{:#}", err), "could not clear stored credential");
        }
        self.client.set_credential(None);
        self.publish(SessionState::Anonymous)
    }

    fn publish(&self, state: SessionState) -> SessionState {
        self.tx.send_replace(state.clone());
        state
    }
}
