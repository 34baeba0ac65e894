//! Lexa provider adapter.
//!
//! A typed Rust client for the Lexa chat-completion API with two surfaces:
//!
//! - A standardized [`LanguageModel`](traits::LanguageModel) interface:
//!   multi-part prompts in, content/finish-reason/usage out, with streaming
//!   as ordered [`StreamEvent`](stream::StreamEvent)s.
//! - An OpenAI-shaped convenience facade ([`Lexa`](openai_like::Lexa)) for
//!   callers that want string roles and string content.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use lexa_provider::openai_like::{ChatCompletionMessage, ChatCompletionRequest, ChatOutcome, Lexa};
//!
//! # async fn run() -> Result<(), lexa_provider::error::LlmError> {
//! let client = Lexa::new("your-api-key");
//! let outcome = client
//!     .chat(ChatCompletionRequest {
//!         messages: vec![ChatCompletionMessage::new("user", "Hello!")],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! if let ChatOutcome::Completion(completion) = outcome {
//!     println!("{}", completion.text().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod openai_like;
pub mod providers;
pub mod stream;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::LlmError;
pub use openai_like::{ChatCompletion, ChatCompletionMessage, ChatCompletionRequest, ChatOutcome, Lexa};
pub use providers::lexa::{
    DEFAULT_BASE_URL, DEFAULT_MODEL_ID, LexaConfig, LexaLanguageModel, LexaProvider, LexaSettings,
    create_lexa_provider,
};
pub use stream::{EventStream, StreamEvent};
pub use traits::LanguageModel;
pub use types::{
    CallOptions, CallWarning, ChatMessage, ContentPart, FinishReason, GenerateResult,
    MessageContent, MessageRole, Prompt, Tool, ToolChoice, Usage,
};
pub use utils::cancel::CancelHandle;
