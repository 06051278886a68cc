//! Shared test helpers for agent tests.

use reasonact_core::error::ProviderError;
use reasonact_core::provider::{
    ChunkReceiver, Provider, ProviderRequest, ProviderResponse, StreamChunk, Usage,
};
use reasonact_telemetry::{ModelPricing, PricingTable};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Model id every scripted response is priced under.
pub const MOCK_MODEL: &str = "mock-model";

/// Usage reported for every scripted response.
pub const MOCK_USAGE: Usage = Usage {
    prompt_tokens: 10,
    completion_tokens: 5,
    total_tokens: 15,
};

/// $1/M input, $2/M output: each scripted call costs 0.00002.
pub fn mock_pricing() -> Arc<PricingTable> {
    let table = PricingTable::empty();
    table.set(MOCK_MODEL, ModelPricing::new(1.0, 2.0));
    Arc::new(table)
}

pub const MOCK_CALL_COST: f64 = 0.00002;

/// One scripted provider reply.
#[derive(Clone)]
pub enum Scripted {
    Text(String),
    /// Text with no usage report.
    Unmetered(String),
    Fail(ProviderError),
}

/// A mock provider that returns a sequence of scripted responses.
///
/// `complete` returns the next reply whole; `stream` splits it into
/// small fragments followed by a usage chunk. Records every request.
/// Panics if more calls are made than responses provided.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Scripted>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider answering with each text in turn.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Scripted::Text(t.to_string())).collect())
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next(&self, request: ProviderRequest) -> Scripted {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            panic!(
                "ScriptedProvider: no more responses (call #{})",
                requests.len()
            )
        })
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        match self.next(request) {
            Scripted::Text(content) => Ok(ProviderResponse {
                content,
                usage: Some(MOCK_USAGE),
                // Not in the pricing table; cost follows the configured model.
                model: "served-by-scripted".into(),
            }),
            Scripted::Unmetered(content) => Ok(ProviderResponse {
                content,
                usage: None,
                model: "served-by-scripted".into(),
            }),
            Scripted::Fail(e) => Err(e),
        }
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ChunkReceiver, ProviderError> {
        let (content, usage) = match self.next(request) {
            Scripted::Text(content) => (content, Some(MOCK_USAGE)),
            Scripted::Unmetered(content) => (content, None),
            Scripted::Fail(e) => return Err(e),
        };

        let chars: Vec<char> = content.chars().collect();
        let (tx, rx) = tokio::sync::mpsc::channel(chars.len() / 4 + 2);
        for piece in chars.chunks(4) {
            let _ = tx
                .send(Ok(StreamChunk {
                    content: Some(piece.iter().collect()),
                    done: false,
                    usage: None,
                }))
                .await;
        }
        let _ = tx
            .send(Ok(StreamChunk {
                content: None,
                done: true,
                usage,
            }))
            .await;
        Ok(rx)
    }
}
