//! CDN side of the invocation: creating the invalidation.

mod base;
pub mod cloudfront;

pub use base::InvalidationClient;
