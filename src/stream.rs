//! Standardized stream events.
//!
//! A streaming call yields [`StreamEvent`]s in the exact order their source
//! lines arrived from the vendor: zero or more text deltas followed by one
//! finish event. Everything else the vendor emits (role-only deltas, empty
//! deltas, keep-alive comments) is dropped before it reaches this type.

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::{CallWarning, Usage};

/// One standardized streaming event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    /// An incremental content fragment.
    TextDelta { delta: String },

    /// End of stream. `usage` is whatever the last vendor chunk carried and
    /// may be absent.
    Finish {
        usage: Option<Usage>,
        warnings: Vec<CallWarning>,
    },
}

/// Boxed stream of standardized events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;
