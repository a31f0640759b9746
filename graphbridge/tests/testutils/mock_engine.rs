//! Scripted engines for executor tests
//!
//! Responses are queued up front and handed out in order. Every call is
//! recorded so tests can assert on the exact text and parameters sent.

use async_trait::async_trait;
use graphbridge::{
    BlockingGraphEngine, EngineError, GraphEngine, NativeValue, Params, QueryResponse,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One recorded engine call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub text: String,
    pub params: Params,
}

#[derive(Default)]
struct Script {
    responses: VecDeque<Result<QueryResponse, EngineError>>,
    calls: Vec<RecordedCall>,
}

/// Async engine answering from a queue of scripted responses
///
/// With an empty queue it answers with an empty response.
#[derive(Clone, Default)]
pub struct MockEngine {
    script: Arc<Mutex<Script>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn respond(&self, response: QueryResponse) -> &Self {
        self.script.lock().responses.push_back(Ok(response));
        self
    }

    /// Queue a failure
    pub fn fail(&self, error: impl Into<EngineError>) -> &Self {
        self.script.lock().responses.push_back(Err(error.into()));
        self
    }

    /// Queue a single-row, single-column `count` response
    pub fn respond_count(&self, count: NativeValue) -> &Self {
        self.respond(QueryResponse::new(vec!["count".to_string()]).with_row(vec![count]))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().calls.len()
    }

    pub fn last_text(&self) -> Option<String> {
        self.script.lock().calls.last().map(|c| c.text.clone())
    }

    fn answer(&self, text: &str, params: &Params) -> Result<QueryResponse, EngineError> {
        let mut script = self.script.lock();
        script.calls.push(RecordedCall {
            text: text.to_string(),
            params: params.clone(),
        });
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResponse::default()))
    }
}

#[async_trait]
impl GraphEngine for MockEngine {
    async fn run_query(&self, text: &str, params: &Params) -> Result<QueryResponse, EngineError> {
        self.answer(text, params)
    }
}

/// Blocking counterpart of [`MockEngine`], for the async adapter path
#[derive(Clone, Default)]
pub struct BlockingMockEngine {
    inner: MockEngine,
}

impl BlockingMockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self) -> &MockEngine {
        &self.inner
    }
}

impl BlockingGraphEngine for BlockingMockEngine {
    fn run_query(&self, text: &str, params: &Params) -> Result<QueryResponse, EngineError> {
        self.inner.answer(text, params)
    }
}
