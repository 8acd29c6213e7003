use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// What gets delivered back to the requester: either formatted text or a raw
/// upstream payload passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPayload {
    Text(String),
    Raw(Value),
}

impl ReplyPayload {
    pub fn text(s: impl Into<String>) -> Self {
        ReplyPayload::Text(s.into())
    }
}

/// Capability for delivering a message back to whoever asked, independent of
/// any chat transport. The pipeline only ever calls `send`.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    async fn send(&self, payload: ReplyPayload) -> anyhow::Result<()>;
}

/// Test/bench helper that records everything sent through it.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: std::sync::Mutex<Vec<ReplyPayload>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<ReplyPayload> {
        self.sent.lock().expect("reply log poisoned").clone()
    }
}

#[async_trait]
impl ReplyChannel for RecordingChannel {
    async fn send(&self, payload: ReplyPayload) -> anyhow::Result<()> {
        self.sent.lock().expect("reply log poisoned").push(payload);
        Ok(())
    }
}
