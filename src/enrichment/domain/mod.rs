pub mod finding;
pub mod notification;
pub mod prompt;

pub use finding::{FindingId, NormalizedFinding, ResourceId, Severity, UNKNOWN};
pub use notification::{DeliveryReceipt, ModelResponse, NotificationMessage};
pub use prompt::PromptContext;
