//! Capability traits.
//!
//! [`LanguageModel`] is the fixed contract the Lexa adapter implements:
//! `generate` for a single request/response exchange and `stream` for an
//! incremental event stream. The embedding/image traits exist so the provider
//! facade can name the capabilities it refuses; no type in this crate
//! implements them.

use async_trait::async_trait;

use crate::error::LlmError;
use crate::stream::EventStream;
use crate::types::{CallOptions, GenerateResult};

/// A model addressable by id that can generate and stream chat completions.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider identifier (e.g. `"lexa"`).
    fn provider_id(&self) -> &str;

    /// The model id this instance is bound to.
    fn model_id(&self) -> &str;

    /// Issue one non-streaming generation call.
    async fn generate(&self, options: CallOptions) -> Result<GenerateResult, LlmError>;

    /// Issue one streaming generation call and return the event stream.
    async fn stream(&self, options: CallOptions) -> Result<EventStream, LlmError>;
}

/// Text embedding capability. Unimplemented by the Lexa provider; requesting
/// it fails fast without any network traffic.
pub trait EmbeddingModel: Send + Sync {
    fn model_id(&self) -> &str;
}

/// Image generation capability. Unimplemented by the Lexa provider; requesting
/// it fails fast without any network traffic.
pub trait ImageModel: Send + Sync {
    fn model_id(&self) -> &str;
}
