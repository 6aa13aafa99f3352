//! Gallery description error types.

/// Errors that can occur when loading a gallery description.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Failed to read the description file from disk.
    #[error("failed to read gallery description: {0}")]
    ReadError(#[source] std::io::Error),

    /// The file is not a valid gallery description.
    #[error("failed to parse gallery description: {0}")]
    ParseError(#[source] serde_json::Error),

    /// The description defines no rooms, so there is nowhere to stand.
    #[error("gallery description has no rooms")]
    NoRooms,
}
