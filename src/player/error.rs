//! Engine errors.
//!
//! None of these reach the caller. The engine logs them and keeps the session
//! going without the failed step.

use crate::host::{FullscreenError, MediaError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{operation} skipped: media element not attached")]
    MissingMediaElement { operation: &'static str },

    #[error(transparent)]
    Fullscreen(#[from] FullscreenError),

    #[error(transparent)]
    Media(#[from] MediaError),
}
