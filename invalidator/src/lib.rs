//! Invalidates a CloudFront distribution on behalf of a CodePipeline job.
//!
//! [`handler::InvalidationHandler`] drives one invocation: it asks an
//! [`cdn::InvalidationClient`] to invalidate every path of the configured distribution and then
//! reports the outcome through a [`pipeline::JobResultReporter`]. Both collaborators are traits,
//! with AWS-backed implementations in [`cdn::cloudfront`] and [`pipeline::codepipeline`].

pub mod aws;
pub mod cdn;
pub mod error;
pub mod handler;
mod macros;
pub mod pipeline;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
