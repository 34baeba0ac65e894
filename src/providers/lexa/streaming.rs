//! Lexa streaming pipeline.
//!
//! Two chained stages over the raw response body:
//!
//! 1. **Framing** ([`frame_sse_records`]): bytes to discrete records. The
//!    vendor emits one `data: <json>` line per chunk, not always followed by
//!    a blank line, so framing is a plain newline splitter. Incomplete lines
//!    are buffered across transport chunks and any terminal line still in
//!    the buffer at end-of-stream is flushed, so a JSON payload split across
//!    reads is reassembled instead of lost. The `data: [DONE]` sentinel
//!    becomes a synthetic finish marker; payloads that fail to parse as
//!    JSON are skipped without raising, as are comment/keep-alive lines.
//! 2. **Projection** ([`LexaEventConverter`]): records to standardized
//!    events. A non-empty `choices[0].delta.content` emits a text delta; the
//!    finish marker emits a finish event carrying whatever usage the last
//!    chunk reported. Everything else (role-only deltas, empty deltas) is
//!    dropped without emission.
//!
//! Events come out in the exact order their source lines arrived.

use std::pin::Pin;
use std::sync::{Arc, Mutex};

use futures::Stream;
use futures_util::StreamExt;

use crate::error::LlmError;
use crate::stream::{EventStream, StreamEvent};
use crate::types::{CallWarning, Usage};

use super::transformers::convert_usage;
use super::types::LexaStreamChunk;

/// Sentinel terminator the vendor sends as the last `data:` payload.
const DONE_SENTINEL: &str = "[DONE]";

/// One framed record out of the SSE layer.
#[derive(Debug)]
pub enum LexaStreamRecord {
    Chunk(LexaStreamChunk),
    /// Synthetic finish marker for the `[DONE]` sentinel.
    Done,
}

/// Boxed stream of framed records.
pub type RecordStream = Pin<Box<dyn Stream<Item = Result<LexaStreamRecord, LlmError>> + Send>>;

/// Parse one completed line. Returns `None` for lines that carry no record:
/// blank lines, comments, non-`data:` fields, invalid UTF-8, and payloads
/// that fail to parse as JSON.
fn parse_sse_line(line: &[u8]) -> Option<LexaStreamRecord> {
    let line = std::str::from_utf8(line).ok()?;
    let data = line.trim_end_matches('\r').strip_prefix("data:")?.trim();
    if data.is_empty() {
        return None;
    }
    if data == DONE_SENTINEL {
        return Some(LexaStreamRecord::Done);
    }
    serde_json::from_str::<LexaStreamChunk>(data)
        .ok()
        .map(LexaStreamRecord::Chunk)
}

/// Stage one: frame a byte stream into parsed stream records.
///
/// One record per completed `data:` line. A line left incomplete by one
/// transport chunk is completed by the next; a final line without a trailing
/// newline is flushed when the stream ends.
pub fn frame_sse_records<S, B>(byte_stream: S) -> RecordStream
where
    S: Stream<Item = Result<B, LlmError>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let out = async_stream::stream! {
        let mut source = Box::pin(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(item) = source.next().await {
            match item {
                Ok(bytes) => buffer.extend_from_slice(bytes.as_ref()),
                Err(e) => {
                    yield Err(LlmError::StreamError(format!("SSE framing error: {e}")));
                    return;
                }
            }

            let mut start = 0;
            while let Some(offset) = buffer[start..].iter().position(|&b| b == b'\n') {
                let end = start + offset;
                if let Some(record) = parse_sse_line(&buffer[start..end]) {
                    yield Ok(record);
                }
                start = end + 1;
            }
            buffer.drain(..start);
        }

        if let Some(record) = parse_sse_line(&buffer) {
            yield Ok(record);
        }
    };

    Box::pin(out)
}

/// Stage two: project framed records onto standardized stream events.
#[derive(Clone)]
pub struct LexaEventConverter {
    warnings: Vec<CallWarning>,
    last_usage: Arc<Mutex<Option<Usage>>>,
}

impl LexaEventConverter {
    pub fn new(warnings: Vec<CallWarning>) -> Self {
        Self {
            warnings,
            last_usage: Arc::new(Mutex::new(None)),
        }
    }

    /// Convert one record. Returns `None` for records that produce no event.
    pub fn convert_record(&self, record: LexaStreamRecord) -> Option<StreamEvent> {
        match record {
            LexaStreamRecord::Done => {
                let usage = self
                    .last_usage
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .take();
                Some(StreamEvent::Finish {
                    usage,
                    warnings: self.warnings.clone(),
                })
            }
            LexaStreamRecord::Chunk(chunk) => {
                if let Some(usage) = chunk.usage {
                    *self.last_usage.lock().unwrap_or_else(|e| e.into_inner()) =
                        Some(convert_usage(usage));
                }

                let delta = chunk
                    .choices
                    .as_ref()
                    .and_then(|choices| choices.first())
                    .and_then(|choice| choice.delta.as_ref())
                    .and_then(|delta| delta.content.as_ref())
                    .filter(|content| !content.is_empty())?;

                Some(StreamEvent::TextDelta {
                    delta: delta.clone(),
                })
            }
        }
    }
}

/// Chain both stages over a raw byte stream.
pub fn create_event_stream<S, B>(byte_stream: S, warnings: Vec<CallWarning>) -> EventStream
where
    S: Stream<Item = Result<B, LlmError>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let converter = LexaEventConverter::new(warnings);
    let events = frame_sse_records(byte_stream).filter_map(move |item| {
        let converter = converter.clone();
        async move {
            match item {
                Ok(record) => converter.convert_record(record).map(Ok),
                Err(e) => Some(Err(e)),
            }
        }
    });

    Box::pin(events)
}
