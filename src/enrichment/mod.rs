/// Finding-enrichment core - domain models, services, and policies
///
/// Pure business logic for turning a raw scan-finding event into a
/// notification: no I/O happens anywhere in this module tree.
pub mod domain;
pub mod policies;
pub mod services;
