use crate::model::Message;
use crate::remote::MessageDraft;

use super::{Mount, ViewContext, ViewState, settle, settle_ack};

pub struct InboxView {
    ctx: ViewContext,
    mount: Mount,
    pub state: ViewState<Vec<Message>>,
    pub notice: Option<String>,
}

impl InboxView {
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
        let outcome = settle(self.ctx.client.inbox(), "inbox");
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    pub fn unread(&self) -> usize {
        self.state
            .data()
            .map_or(0, |msgs| msgs.iter().filter(|m| !m.is_read).count())
    }

    pub fn send(&mut self, draft: &MessageDraft) -> bool {
        if draft.subject.trim().is_empty() || draft.body.trim().is_empty() {
            self.notice = Some("Subject and message are required.".to_string());
            return false;
        }
        let outcome = settle_ack(self.ctx.client.send_message(draft), "send message");
        if !self.mount.is_mounted() {
            return false;
        }
        match outcome {
            Ok(()) => {
                self.notice = Some("Message sent.".to_string());
                self.load();
                true
            }
            Err(msg) => {
                self.notice = Some(msg);
                false
            }
        }
    }
}
