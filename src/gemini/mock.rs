use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::{GenerateError, Generator};
use crate::media::EncodedImage;

/// Arguments of one `generate` call, as seen by [`MockGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub mime_type: &'static str,
    pub image_len: usize,
}

/// Scripted generator for tests and offline runs.
///
/// Replies are consumed in order; once exhausted every call answers
/// `"mock response"`.
pub struct MockGenerator {
    replies: Mutex<VecDeque<Result<String, GenerateError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
            gate: None,
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.replies.lock().push_back(Ok(text.into()));
        self
    }

    pub fn with_error(self, error: GenerateError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold every answer until the gate is notified once per call.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, image: &EncodedImage, prompt: &str) -> Result<String, GenerateError> {
        self.calls.lock().push(RecordedCall {
            prompt: prompt.to_string(),
            mime_type: image.mime_type,
            image_len: image.bytes.len(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/jpeg",
            bytes: Arc::from(vec![0xFF, 0xD8, 0xFF]),
        }
    }

    #[tokio::test]
    async fn replies_in_order_then_default() {
        let mock = MockGenerator::new()
            .with_text("first")
            .with_error(GenerateError::EmptyResponse);

        assert_eq!(mock.generate(&image(), "a").await.unwrap(), "first");
        assert_eq!(
            mock.generate(&image(), "b").await.unwrap_err(),
            GenerateError::EmptyResponse
        );
        assert_eq!(mock.generate(&image(), "c").await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn records_calls() {
        let mock = MockGenerator::new();
        mock.generate(&image(), "what is this").await.unwrap();

        assert_eq!(
            mock.calls(),
            vec![RecordedCall {
                prompt: "what is this".to_string(),
                mime_type: "image/jpeg",
                image_len: 3,
            }]
        );
        assert_eq!(mock.call_count(), 1);
    }
}
