/// Network adapters for external API calls
mod model_client;
mod webhook_channel;

pub use model_client::HttpModelClient;
pub use webhook_channel::WebhookChannel;
