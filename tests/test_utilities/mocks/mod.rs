/// Mock implementations for testing
mod mock_notification_channel;
mod mock_remediation_model;

pub use mock_notification_channel::MockNotificationChannel;
pub use mock_remediation_model::MockRemediationModel;
