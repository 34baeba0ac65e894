//! Lexa provider.
//!
//! The provider facade binds a configuration (credential, base URL, default
//! headers) and immutable default settings to a model-id-addressable factory.
//! `language_model` always succeeds: ids are not validated against any known
//! list, and unknown ids flow through to the vendor. Embedding and image
//! models are unconditionally unsupported and fail before any network call.

pub mod language_model;
pub mod models;
pub mod streaming;
pub mod transformers;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::SecretString;

use crate::error::LlmError;
use crate::traits::{EmbeddingModel, ImageModel};

pub use language_model::{LexaLanguageModel, LexaModelMetadata};
pub use models::{DEFAULT_MODEL_ID, LEXA_MODELS, ModelSpec, find_model};

/// Provider identifier.
pub const PROVIDER_ID: &str = "lexa";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.lexa.chat/api";

/// Provider configuration. Immutable after construction; shared read-only by
/// every language model the provider creates.
#[derive(Debug, Clone)]
pub struct LexaConfig {
    pub base_url: String,
    pub api_key: SecretString,
    /// Default headers attached to every request after the auth and
    /// content-type headers.
    pub headers: HashMap<String, String>,
}

impl LexaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: SecretString::from(api_key.into()),
            headers: HashMap::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Process-lifetime-immutable default tunables, overridden per call.
#[derive(Debug, Clone, Default)]
pub struct LexaSettings {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
    /// Streaming preference consulted by the convenience facade when a chat
    /// request leaves its `stream` flag unset.
    pub enable_streaming: Option<bool>,
}

/// The Lexa provider facade.
#[derive(Clone)]
pub struct LexaProvider {
    config: Arc<LexaConfig>,
    settings: LexaSettings,
    http_client: reqwest::Client,
}

impl LexaProvider {
    pub fn new(config: LexaConfig) -> Self {
        Self::with_settings(config, LexaSettings::default())
    }

    pub fn with_settings(config: LexaConfig, settings: LexaSettings) -> Self {
        Self {
            config: Arc::new(config),
            settings,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a language model bound to `model_id`. Total: never fails and
    /// never validates the id.
    pub fn language_model(&self, model_id: impl Into<String>) -> LexaLanguageModel {
        LexaLanguageModel::new(
            model_id.into(),
            self.settings.clone(),
            self.config.clone(),
            self.http_client.clone(),
        )
    }

    /// Text embedding models are not supported; fails without any network
    /// interaction.
    pub fn text_embedding_model(
        &self,
        model_id: &str,
    ) -> Result<Arc<dyn EmbeddingModel>, LlmError> {
        Err(LlmError::UnsupportedOperation(format!(
            "Text embedding models are not supported by the Lexa provider (requested '{model_id}')"
        )))
    }

    /// Image models are not supported; fails without any network interaction.
    pub fn image_model(&self, model_id: &str) -> Result<Arc<dyn ImageModel>, LlmError> {
        Err(LlmError::UnsupportedOperation(format!(
            "Image models are not supported by the Lexa provider (requested '{model_id}')"
        )))
    }

    pub fn settings(&self) -> &LexaSettings {
        &self.settings
    }

    pub fn config(&self) -> &LexaConfig {
        &self.config
    }
}

/// Factory function mirroring the provider constructor.
pub fn create_lexa_provider(config: LexaConfig, settings: LexaSettings) -> LexaProvider {
    LexaProvider::with_settings(config, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LanguageModel;

    #[test]
    fn language_model_is_total_over_ids() {
        let provider = LexaProvider::new(LexaConfig::new("sk-test"));
        let model = provider.language_model("not-a-known-model");
        assert_eq!(model.model_id(), "not-a-known-model");
        assert_eq!(model.provider_id(), PROVIDER_ID);
    }

    #[test]
    fn embedding_and_image_models_are_unsupported() {
        let provider = LexaProvider::new(LexaConfig::new("sk-test"));
        assert!(matches!(
            provider.text_embedding_model("lexa-embed"),
            Err(LlmError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            provider.image_model("lexa-paint"),
            Err(LlmError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn config_defaults_to_public_base_url() {
        let config = LexaConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn metadata_reports_bound_model_and_base_url() {
        let provider = LexaProvider::new(
            LexaConfig::new("sk-test").with_base_url("http://localhost:9999/api"),
        );
        let metadata = provider.language_model("lexa-x1").provider_metadata();
        assert_eq!(metadata.provider, "lexa");
        assert_eq!(metadata.model, "lexa-x1");
        assert_eq!(metadata.base_url, "http://localhost:9999/api");
    }
}
