//! Shared AWS SDK plumbing for both service clients.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cloudfront::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use invalidator_config::shared::AwsConfig;
use std::error::Error;
use std::fmt::Debug;

/// Loads the SDK configuration shared by every client of the process.
///
/// Credentials always come from the default provider chain. Region and endpoint come from the
/// chain too unless `config` overrides them.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    loader.load().await
}

/// Returns the message a service attached to `err`, or the full error chain when there is none.
///
/// Transport failures such as timeouts carry no service message, and their top-level display
/// ("dispatch failure") hides the cause.
pub(crate) fn sdk_error_detail<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    match err
        .as_service_error()
        .and_then(|service_err| service_err.message())
    {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}
