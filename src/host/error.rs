//! Collaborator errors.

/// The device refused or could not perform a fullscreen change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FullscreenError {
    #[error("fullscreen request refused: {0}")]
    Refused(String),
}

/// The media element could not start a source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("playback of '{source_url}' rejected: {reason}")]
    PlaybackRejected { source_url: String, reason: String },
}
