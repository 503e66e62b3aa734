/// Type alias for Result with anyhow::Error as the error type.
///
/// Used on construction and configuration paths, where callers only need
/// a displayable failure. Pipeline stages return the classified
/// [`AlertError`](crate::shared::error::AlertError) instead, because the
/// error class decides whether a retry can ever succeed.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
