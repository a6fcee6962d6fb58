use anyhow::Result;
use reqwest::Method;

use crate::model::Message;

use super::{MessageDraft, RemoteClient, ResourceResult};

impl RemoteClient {
    pub fn send_message(&self, draft: &MessageDraft) -> Result<ResourceResult<Message>> {
        self.send_json(Method::POST, "/messages", draft, "send message")
    }

    pub fn inbox(&self) -> Result<ResourceResult<Vec<Message>>> {
        self.get("/messages/inbox", "inbox")
    }
}
