use std::cell::RefCell;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::ClientConfig;

mod envelope;
mod http_client;
mod types;
pub use self::envelope::*;
pub use self::types::*;

mod catalog;
mod identity;
mod learning;
mod messaging;

/// Transport to the REST API.
///
/// Every request carries the attached bearer credential, if any, and every
/// response is normalized into a [`ResourceResult`]. `Err` is reserved for
/// transport failures (no usable response at all). Nothing is retried.
pub struct RemoteClient {
    base_url: String,
    credential: RefCell<Option<String>>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent("lectern");
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("build reqwest client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: RefCell::new(None),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attaches (or with `None`, detaches) the credential sent on every
    /// subsequent request.
    pub fn set_credential(&self, credential: Option<String>) {
        *self.credential.borrow_mut() = credential;
    }

    pub fn has_credential(&self) -> bool {
        self.credential.borrow().is_some()
    }
}
