/// Application services bridging DTOs, domain, and ports
mod model_invoker;
mod normalizer;

pub use model_invoker::ModelInvoker;
pub use normalizer::{EventNormalizer, EXPECTED_DETAIL_TYPE, EXPECTED_SOURCE};
