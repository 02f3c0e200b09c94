use std::future::Future;

use crate::error::InvalidatorResult;
use crate::types::{Invalidation, InvalidationRequest};

/// CDN provider able to drop cached objects of a distribution.
pub trait InvalidationClient {
    /// Submits `request` and returns the invalidation created by the provider.
    ///
    /// Every failure is reported as [`crate::error::ErrorKind::InvalidationRequestFailed`].
    fn create_invalidation(
        &self,
        request: InvalidationRequest,
    ) -> impl Future<Output = InvalidatorResult<Invalidation>> + Send;
}
