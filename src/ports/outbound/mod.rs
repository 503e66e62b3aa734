/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the pipeline uses to reach external
/// systems: the generative-model service and the notification channel.
pub mod model_client;
pub mod notification_channel;

pub use model_client::{ModelCallError, RemediationModel};
pub use notification_channel::NotificationChannel;
