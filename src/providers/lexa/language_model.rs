//! The Lexa language model.
//!
//! One instance is bound to a model id plus the provider's shared config and
//! settings. Each call is a single outbound HTTP request; nothing is retained
//! between calls.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use secrecy::ExposeSecret;

use crate::error::{LlmError, classify_http_failure};
use crate::stream::EventStream;
use crate::traits::LanguageModel;
use crate::types::{CallOptions, GenerateResult};
use crate::utils::cancel::{CancelHandle, wrap_stream};

use super::streaming::create_event_stream;
use super::transformers::{build_request, parse_response};
use super::types::{LexaRequest, LexaResponse};
use super::{LexaConfig, LexaSettings, PROVIDER_ID};

/// Identifying metadata for a bound model instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexaModelMetadata {
    pub provider: &'static str,
    pub model: String,
    pub base_url: String,
}

/// A Lexa chat model bound to a provider configuration.
#[derive(Clone)]
pub struct LexaLanguageModel {
    model_id: String,
    settings: LexaSettings,
    config: Arc<LexaConfig>,
    http_client: reqwest::Client,
}

impl LexaLanguageModel {
    pub(crate) fn new(
        model_id: String,
        settings: LexaSettings,
        config: Arc<LexaConfig>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            model_id,
            settings,
            config,
            http_client,
        }
    }

    /// Provider/model/base-URL metadata for observability.
    pub fn provider_metadata(&self) -> LexaModelMetadata {
        LexaModelMetadata {
            provider: PROVIDER_ID,
            model: self.model_id.clone(),
            base_url: self.config.base_url.clone(),
        }
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, LlmError> {
        let mut headers = reqwest::header::HeaderMap::new();

        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!(
                "Bearer {}",
                self.config.api_key.expose_secret()
            ))
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid API key: {e}")))?,
        );

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        for (key, value) in &self.config.headers {
            let header_name =
                reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                    LlmError::ConfigurationError(format!("Invalid header name '{key}': {e}"))
                })?;
            let header_value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid header value '{value}': {e}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// Send the request and escalate any non-success status as a structured
    /// failure; a non-2xx is never returned as data.
    async fn send_request(&self, request: &LexaRequest) -> Result<reqwest::Response, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let headers = self.build_headers()?;

        tracing::debug!(
            model = %self.model_id,
            url = %url,
            stream = request.stream,
            "dispatching Lexa chat request"
        );

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http_failure(status.as_u16(), &headers, body));
        }

        Ok(response)
    }

    async fn generate_inner(&self, options: &CallOptions) -> Result<GenerateResult, LlmError> {
        let (request, warnings) = build_request(&self.model_id, options, &self.settings)?;
        let response = self.send_request(&request).await?;

        let body = response.text().await?;
        let parsed: LexaResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::ParseError(format!("Failed to parse Lexa response: {e}")))?;

        parse_response(parsed, warnings)
    }

    async fn stream_inner(&self, options: &CallOptions) -> Result<EventStream, LlmError> {
        let (request, warnings) = build_request(&self.model_id, options, &self.settings)?;
        let request = LexaRequest {
            stream: true,
            ..request
        };

        let response = self.send_request(&request).await?;
        let byte_stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| LlmError::HttpError(format!("Stream error: {e}"))));

        Ok(create_event_stream(byte_stream, warnings))
    }

    /// Race a call future against its cancel handle, if one was supplied.
    async fn with_cancellation<T>(
        cancel: Option<&CancelHandle>,
        fut: impl Future<Output = Result<T, LlmError>>,
    ) -> Result<T, LlmError> {
        match cancel {
            Some(handle) => {
                tokio::select! {
                    _ = handle.cancelled() => Err(LlmError::Cancelled),
                    result = fut => result,
                }
            }
            None => fut.await,
        }
    }
}

#[async_trait]
impl LanguageModel for LexaLanguageModel {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, options: CallOptions) -> Result<GenerateResult, LlmError> {
        let cancel = options.cancel.clone();
        Self::with_cancellation(cancel.as_ref(), self.generate_inner(&options)).await
    }

    async fn stream(&self, options: CallOptions) -> Result<EventStream, LlmError> {
        let cancel = options.cancel.clone();
        let stream =
            Self::with_cancellation(cancel.as_ref(), self.stream_inner(&options)).await?;

        // Once the response is open, cancellation stops further emission.
        Ok(match cancel {
            Some(handle) => wrap_stream(stream, handle),
            None => stream,
        })
    }
}
