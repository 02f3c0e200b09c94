//! Values exchanged with the pipeline and the CDN provider during one invocation.

mod event;
mod invalidation;
mod report;

pub use event::{CodePipelineJob, CodePipelineJobEvent, JobId};
pub use invalidation::{ALL_PATHS, Invalidation, InvalidationRequest};
pub use report::{FailureDetails, FailureType, MAX_FAILURE_MESSAGE_CHARS};
