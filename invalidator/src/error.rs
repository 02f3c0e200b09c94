use std::error;
use std::fmt;

/// Convenient result type for invalidator operations.
pub type InvalidatorResult<T> = Result<T, InvalidatorError>;

/// Error raised while invalidating a distribution or reporting a job result.
///
/// Every error carries an [`ErrorKind`] and a static description. Errors coming from a remote
/// service also carry the service's own message as detail, which is what ends up in the failure
/// report shown in the pipeline console.
#[derive(Debug, Clone)]
pub struct InvalidatorError {
    repr: ErrorRepr,
}

#[derive(Debug, Clone)]
enum ErrorRepr {
    WithDescription(ErrorKind, &'static str),
    WithDescriptionAndDetail(ErrorKind, &'static str, String),
}

/// Categories of failures.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The invalidation could not be created: missing distribution id, network or credential
    /// failure, rejection by the provider, or an unusable response.
    InvalidationRequestFailed,
    /// The pipeline could not be told about the job result.
    ResultReportFailed,
    /// The job event cannot be correlated with a pipeline job.
    InvalidEvent,
}

impl InvalidatorError {
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => kind,
        }
    }

    pub fn description(&self) -> &'static str {
        match self.repr {
            ErrorRepr::WithDescription(_, desc)
            | ErrorRepr::WithDescriptionAndDetail(_, desc, _) => desc,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self.repr {
            ErrorRepr::WithDescriptionAndDetail(_, _, ref detail) => Some(detail.as_str()),
            ErrorRepr::WithDescription(..) => None,
        }
    }

    /// Returns the most specific human readable text for this error.
    ///
    /// That is the detail when one is present and not blank, the description otherwise.
    pub fn message(&self) -> &str {
        match self.detail() {
            Some(detail) if !detail.trim().is_empty() => detail,
            _ => self.description(),
        }
    }
}

impl PartialEq for InvalidatorError {
    fn eq(&self, other: &InvalidatorError) -> bool {
        self.kind() == other.kind()
    }
}

impl fmt::Display for InvalidatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.repr {
            ErrorRepr::WithDescription(kind, desc) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)
            }
            ErrorRepr::WithDescriptionAndDetail(kind, desc, ref detail) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;
                f.write_str(" -> ")?;
                detail.fmt(f)
            }
        }
    }
}

impl error::Error for InvalidatorError {}

impl From<(ErrorKind, &'static str)> for InvalidatorError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> InvalidatorError {
        InvalidatorError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

impl From<(ErrorKind, &'static str, String)> for InvalidatorError {
    fn from((kind, desc, detail): (ErrorKind, &'static str, String)) -> InvalidatorError {
        InvalidatorError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, desc, detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bail, invalidator_error};

    #[test]
    fn simple_error_has_no_detail() {
        let err = InvalidatorError::from((ErrorKind::InvalidEvent, "job id is empty"));

        assert_eq!(err.kind(), ErrorKind::InvalidEvent);
        assert_eq!(err.detail(), None);
        assert_eq!(err.message(), "job id is empty");
    }

    #[test]
    fn message_prefers_detail() {
        let err = invalidator_error!(
            ErrorKind::InvalidationRequestFailed,
            "CloudFront invalidation request failed",
            "timeout"
        );

        assert_eq!(err.detail(), Some("timeout"));
        assert_eq!(err.message(), "timeout");
    }

    #[test]
    fn blank_detail_falls_back_to_description() {
        let err = invalidator_error!(
            ErrorKind::ResultReportFailed,
            "CodePipeline request failed",
            "  "
        );

        assert_eq!(err.message(), "CodePipeline request failed");
    }

    #[test]
    fn display_includes_kind_description_and_detail() {
        let err = invalidator_error!(
            ErrorKind::InvalidationRequestFailed,
            "CloudFront invalidation request failed",
            "AccessDenied"
        );

        assert_eq!(
            err.to_string(),
            "InvalidationRequestFailed: CloudFront invalidation request failed -> AccessDenied"
        );
    }

    #[test]
    fn equality_compares_kinds() {
        let a = invalidator_error!(ErrorKind::ResultReportFailed, "a");
        let b = invalidator_error!(ErrorKind::ResultReportFailed, "b", "detail");
        let c = invalidator_error!(ErrorKind::InvalidEvent, "a");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn bail_returns_early() {
        fn check(empty: bool) -> InvalidatorResult<u8> {
            if empty {
                bail!(ErrorKind::InvalidEvent, "job id is empty");
            }

            Ok(1)
        }

        assert_eq!(check(false).unwrap(), 1);
        assert_eq!(check(true).unwrap_err().kind(), ErrorKind::InvalidEvent);
    }
}
