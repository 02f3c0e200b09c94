use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cdn::InvalidationClient;
use crate::error::InvalidatorResult;
use crate::types::{Invalidation, InvalidationRequest};

#[derive(Debug, Default)]
struct Inner {
    requests: Vec<InvalidationRequest>,
    responses: VecDeque<InvalidatorResult<Invalidation>>,
}

/// In-memory [`InvalidationClient`] recording every request.
///
/// Responses primed with [`MemoryInvalidationClient::push_response`] are returned in order.
/// Once they run out, each request succeeds with the id `INV<n>`, `n` counting from one.
#[derive(Debug, Clone, Default)]
pub struct MemoryInvalidationClient {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryInvalidationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_response(&self, response: InvalidatorResult<Invalidation>) {
        self.inner.lock().await.responses.push_back(response);
    }

    pub async fn requests(&self) -> Vec<InvalidationRequest> {
        self.inner.lock().await.requests.clone()
    }
}

impl InvalidationClient for MemoryInvalidationClient {
    async fn create_invalidation(
        &self,
        request: InvalidationRequest,
    ) -> InvalidatorResult<Invalidation> {
        let mut inner = self.inner.lock().await;
        inner.requests.push(request);

        match inner.responses.pop_front() {
            Some(response) => response,
            None => Ok(Invalidation::new(
                format!("INV{}", inner.requests.len()),
                Some("InProgress".to_string()),
            )),
        }
    }
}
