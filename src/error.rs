//! error handling

/// result type used throughout zipls
pub type Result<T> = anyhow::Result<T>;
