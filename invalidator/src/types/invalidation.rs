use chrono::{DateTime, Utc};

/// Path pattern matching every object in a distribution.
pub const ALL_PATHS: &str = "/*";

/// Prefix of the caller reference sent with each invalidation.
const CALLER_REFERENCE_PREFIX: &str = "invalidation";

/// Request to drop every cached object of a distribution.
///
/// The path list is fixed to [`ALL_PATHS`] and cannot be changed after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    distribution_id: String,
    caller_reference: String,
    paths: Vec<String>,
}

impl InvalidationRequest {
    /// Builds a request invalidating all paths of `distribution_id`.
    ///
    /// The caller reference is derived from `now` with second resolution, so two requests for
    /// the same distribution within one second share a reference and CloudFront treats the
    /// second one as a duplicate of the first.
    pub fn all_paths(distribution_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            distribution_id: distribution_id.into(),
            caller_reference: caller_reference(now),
            paths: vec![ALL_PATHS.to_string()],
        }
    }

    pub fn distribution_id(&self) -> &str {
        &self.distribution_id
    }

    pub fn caller_reference(&self) -> &str {
        &self.caller_reference
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

/// Invalidation accepted by the CDN provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    pub id: String,
    /// Provider status at creation time, usually `InProgress`.
    pub status: Option<String>,
}

impl Invalidation {
    pub fn new(id: impl Into<String>, status: Option<String>) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

fn caller_reference(now: DateTime<Utc>) -> String {
    format!("{CALLER_REFERENCE_PREFIX}-{}", now.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_targets_exactly_all_paths() {
        let request = InvalidationRequest::all_paths("DIST1", Utc::now());

        assert_eq!(request.distribution_id(), "DIST1");
        assert_eq!(request.paths(), ["/*".to_string()]);
    }

    #[test]
    fn caller_reference_is_derived_from_unix_seconds() {
        let now = DateTime::from_timestamp(1_700_000_000, 999_000_000).unwrap();

        let request = InvalidationRequest::all_paths("DIST1", now);

        assert_eq!(request.caller_reference(), "invalidation-1700000000");
    }

    #[test]
    fn caller_reference_changes_with_time() {
        let earlier = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let later = DateTime::from_timestamp(1_700_000_001, 0).unwrap();

        assert_ne!(
            InvalidationRequest::all_paths("DIST1", earlier).caller_reference(),
            InvalidationRequest::all_paths("DIST1", later).caller_reference()
        );
    }
}
