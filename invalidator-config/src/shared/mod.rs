mod aws;
mod base;
mod invalidator;

pub use aws::*;
pub use base::*;
pub use invalidator::*;
