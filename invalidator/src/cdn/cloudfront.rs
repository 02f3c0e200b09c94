use aws_config::SdkConfig;
use aws_sdk_cloudfront::Client;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use std::fmt;
use tracing::debug;

use crate::aws::sdk_error_detail;
use crate::cdn::InvalidationClient;
use crate::error::{ErrorKind, InvalidatorError, InvalidatorResult};
use crate::invalidator_error;
use crate::types::{Invalidation, InvalidationRequest};

/// [`InvalidationClient`] backed by the CloudFront `CreateInvalidation` API.
#[derive(Debug, Clone)]
pub struct CloudFrontClient {
    client: Client,
}

impl CloudFrontClient {
    /// Creates a client from the process-wide SDK configuration.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

impl InvalidationClient for CloudFrontClient {
    async fn create_invalidation(
        &self,
        request: InvalidationRequest,
    ) -> InvalidatorResult<Invalidation> {
        let paths = Paths::builder()
            .quantity(request.paths().len() as i32)
            .set_items(Some(request.paths().to_vec()))
            .build()
            .map_err(build_error_to_invalidator_error)?;
        let invalidation_batch = InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(request.caller_reference())
            .build()
            .map_err(build_error_to_invalidator_error)?;

        debug!(
            distribution_id = request.distribution_id(),
            caller_reference = request.caller_reference(),
            "sending cloudfront invalidation request"
        );

        let output = self
            .client
            .create_invalidation()
            .distribution_id(request.distribution_id())
            .invalidation_batch(invalidation_batch)
            .send()
            .await
            .map_err(|err| {
                invalidator_error!(
                    ErrorKind::InvalidationRequestFailed,
                    "CloudFront invalidation request failed",
                    sdk_error_detail(&err)
                )
            })?;

        let Some(invalidation) = output.invalidation() else {
            return Err(invalidator_error!(
                ErrorKind::InvalidationRequestFailed,
                "Malformed CloudFront response",
                "the response did not contain an invalidation"
            ));
        };

        Ok(Invalidation::new(
            invalidation.id(),
            Some(invalidation.status().to_string()),
        ))
    }
}

fn build_error_to_invalidator_error(err: impl fmt::Display) -> InvalidatorError {
    invalidator_error!(
        ErrorKind::InvalidationRequestFailed,
        "Invalid CloudFront invalidation request",
        err
    )
}

#[cfg(test)]
mod tests {
    use aws_sdk_cloudfront::error::ErrorMetadata;
    use aws_sdk_cloudfront::operation::create_invalidation::{
        CreateInvalidationError, CreateInvalidationOutput,
    };
    use aws_sdk_cloudfront::primitives::DateTime;
    use aws_sdk_cloudfront::types;
    use aws_smithy_mocks::{mock, mock_client};
    use chrono::Utc;

    use super::*;

    fn request() -> InvalidationRequest {
        let now = chrono::DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();

        InvalidationRequest::all_paths("DIST1", now)
    }

    fn created(id: &str) -> CreateInvalidationOutput {
        let paths = types::Paths::builder()
            .quantity(1)
            .items("/*")
            .build()
            .unwrap();
        let batch = types::InvalidationBatch::builder()
            .paths(paths)
            .caller_reference("invalidation-1700000000")
            .build()
            .unwrap();
        let invalidation = types::Invalidation::builder()
            .id(id)
            .status("InProgress")
            .create_time(DateTime::from_secs(1_700_000_000))
            .invalidation_batch(batch)
            .build()
            .unwrap();

        CreateInvalidationOutput::builder()
            .invalidation(invalidation)
            .build()
    }

    #[tokio::test]
    async fn sends_all_paths_for_the_distribution() {
        let rule = mock!(Client::create_invalidation)
            .match_requests(|input| {
                let Some(batch) = input.invalidation_batch() else {
                    return false;
                };
                let Some(paths) = batch.paths() else {
                    return false;
                };

                input.distribution_id() == Some("DIST1")
                    && batch.caller_reference() == "invalidation-1700000000"
                    && paths.quantity() == 1
                    && paths.items() == ["/*".to_string()]
            })
            .then_output(|| created("INV1"));
        let client = CloudFrontClient {
            client: mock_client!(aws_sdk_cloudfront, [&rule]),
        };

        let invalidation = client.create_invalidation(request()).await.unwrap();

        assert_eq!(
            invalidation,
            Invalidation::new("INV1", Some("InProgress".into()))
        );
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn service_error_message_becomes_the_detail() {
        let rule = mock!(Client::create_invalidation).then_error(|| {
            CreateInvalidationError::generic(
                ErrorMetadata::builder()
                    .code("Throttling")
                    .message("Rate exceeded")
                    .build(),
            )
        });
        let client = CloudFrontClient {
            client: mock_client!(aws_sdk_cloudfront, [&rule]),
        };

        let err = client.create_invalidation(request()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidationRequestFailed);
        assert_eq!(err.message(), "Rate exceeded");
    }

    #[tokio::test]
    async fn response_without_invalidation_is_rejected() {
        let rule = mock!(Client::create_invalidation)
            .then_output(|| CreateInvalidationOutput::builder().build());
        let client = CloudFrontClient {
            client: mock_client!(aws_sdk_cloudfront, [&rule]),
        };

        let err = client.create_invalidation(request()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidationRequestFailed);
        assert_eq!(err.description(), "Malformed CloudFront response");
    }
}
