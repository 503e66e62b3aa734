/// Application layer - Use cases, services, and DTOs
///
/// This layer orchestrates the enrichment domain and coordinates with
/// infrastructure through the outbound ports.
pub mod dto;
pub mod services;
pub mod use_cases;
