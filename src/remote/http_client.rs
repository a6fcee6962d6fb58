use anyhow::{Context, Result};
use reqwest::Method;
use reqwest::blocking::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{RemoteClient, ResourceResult, normalize};

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn auth(&self) -> Option<String> {
        self.credential
            .borrow()
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match self.auth() {
            Some(auth) => req.header(reqwest::header::AUTHORIZATION, auth),
            None => req,
        }
    }

    /// Sends `req` and normalizes whatever comes back. Only a missing or
    /// unreadable response is an error.
    pub(super) fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        label: &str,
    ) -> Result<ResourceResult<T>> {
        let resp = req.send().with_context(|| label.to_string())?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .with_context(|| format!("read {} response", label))?;
        let out = normalize::<T>(status, &body);
        debug!(
            call = label,
            status,
            success = out.is_success,
            "remote call finished"
        );
        Ok(out)
    }

    pub(super) fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        label: &str,
    ) -> Result<ResourceResult<T>> {
        self.execute(self.request(Method::GET, path), label)
    }

    pub(super) fn send_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        label: &str,
    ) -> Result<ResourceResult<T>> {
        self.execute(self.request(method, path).json(body), label)
    }

    pub(super) fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        label: &str,
    ) -> Result<ResourceResult<T>> {
        self.execute(self.request(Method::DELETE, path), label)
    }
}
