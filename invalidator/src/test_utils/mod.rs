//! In-memory collaborators for exercising the handler without AWS.

pub mod cdn;
pub mod pipeline;
