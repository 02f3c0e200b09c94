//! Pipeline side of the invocation: telling CodePipeline how the job went.

mod base;
pub mod codepipeline;
mod reporter;

pub use base::JobResultReporter;
pub use reporter::ResultReporter;
