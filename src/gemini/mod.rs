//! Gemini integration: the generator seam, its REST client and a mock.

mod client;
mod error;
mod mock;
mod types;

pub use client::GeminiClient;
pub use error::GenerateError;
pub use mock::{MockGenerator, RecordedCall};

use crate::media::EncodedImage;
use async_trait::async_trait;

/// Something that answers a prompt about an image.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, image: &EncodedImage, prompt: &str) -> Result<String, GenerateError>;
}
