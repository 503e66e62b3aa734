/// Retry policies for the enrichment pipeline
pub mod backoff;

pub use backoff::{full_jitter, no_jitter, BackoffPolicy, JitterFn};
