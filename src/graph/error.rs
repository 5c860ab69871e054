//! Graph errors.

use super::{Kind, NodeId};

/// A node action or option value that does not match exactly one known shape.
///
/// This is a content-authoring defect: the engine logs it and renders nothing
/// for the offending action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("payload is not an object")]
    NotAnObject,

    #[error("payload matches no known shape")]
    NoMatch,

    #[error("payload matches more than one shape: {kinds:?}")]
    Ambiguous { kinds: Vec<Kind> },

    #[error("unknown kind tag '{0}'")]
    UnknownKind(String),

    #[error("{kind} payload is missing field '{field}'")]
    MissingField { kind: Kind, field: &'static str },

    #[error("option list is empty")]
    EmptyOptions,

    #[error("option {index} has no label")]
    MissingLabel { index: usize },

    #[error("node {node} has no action")]
    MissingAction { node: NodeId },

    #[error("expected {expected}, found {found} payload")]
    UnexpectedKind { expected: &'static str, found: Kind },
}

/// Errors loading a graph root.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("graph root must be a video node, found {0} payload")]
    RootNotVideo(Kind),

    #[error("graph root is malformed: {0}")]
    MalformedRoot(#[from] ClassificationError),
}
