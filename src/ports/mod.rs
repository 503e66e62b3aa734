/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports are the capability interfaces the pipeline depends on;
/// the host platform drives the use case directly, so there is no inbound
/// port layer.
pub mod outbound;
