//! Wiring: one client, one session store, one guard, shared by every view.

use std::rc::Rc;

use anyhow::Result;

use crate::guard::AccessGuard;
use crate::model::ClientConfig;
use crate::remote::RemoteClient;
use crate::session::{SessionState, SessionStore};
use crate::store::CredentialStorage;
use crate::views::ViewContext;

pub struct App<S> {
    pub session: SessionStore<S>,
    pub guard: AccessGuard,
}

impl<S: CredentialStorage> App<S> {
    /// Builds the client and session store without touching the network.
    pub fn new(config: &ClientConfig, storage: S) -> Result<Self> {
        let client = Rc::new(RemoteClient::new(config)?);
        let session = SessionStore::new(client, storage);
        let guard = AccessGuard::new(session.subscribe());
        Ok(Self { session, guard })
    }

    /// [`App::new`] followed by session restore.
    pub fn start(config: &ClientConfig, storage: S) -> Result<Self> {
        let app = Self::new(config, storage)?;
        app.session.restore();
        Ok(app)
    }

    pub fn context(&self) -> ViewContext {
        ViewContext::new(Rc::clone(self.session.client()), self.session.subscribe())
    }

    pub fn state(&self) -> SessionState {
        self.session.current()
    }
}
