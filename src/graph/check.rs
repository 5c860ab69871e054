//! Whole-graph validation.
//!
//! The engine only classifies a payload when it is reached during playback.
//! This walks every reachable node up front so authoring defects can be found
//! before a viewer hits them.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{ClassificationError, NodeId, Payload, VideoNode};
use crate::player::resolver::{resolve_action, resolve_selection};

/// A defect found in a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Where the defect is, e.g. `node 1 > option 0`.
    pub path: String,
    pub kind: ProblemKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
    Classification(ClassificationError),
    DuplicateId(NodeId),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProblemKind::Classification(err) => write!(f, "{}: {}", self.path, err),
            ProblemKind::DuplicateId(id) => {
                write!(f, "{}: node id {} is used by another node", self.path, id)
            }
        }
    }
}

/// Check every node reachable from `root`.
///
/// Returns problems in depth-first order; an empty list means every action
/// and option value classifies.
pub fn check_graph(root: &Rc<VideoNode>) -> Vec<Problem> {
    let mut seen = HashMap::new();
    let mut problems = Vec::new();
    walk(root, &mut seen, &mut problems);
    problems
}

fn walk(
    node: &Rc<VideoNode>,
    seen: &mut HashMap<NodeId, *const VideoNode>,
    problems: &mut Vec<Problem>,
) {
    let path = format!("node {}", node.id);

    match seen.get(&node.id) {
        // Same node reachable twice (shared `Rc`), already checked.
        Some(ptr) if *ptr == Rc::as_ptr(node) => return,
        Some(_) => problems.push(Problem {
            path: path.clone(),
            kind: ProblemKind::DuplicateId(node.id),
        }),
        None => {
            seen.insert(node.id, Rc::as_ptr(node));
        }
    }

    let action_ok = match resolve_action(&node.action) {
        Ok(_) => true,
        Err(err) => {
            problems.push(Problem {
                path: format!("{} action", path),
                kind: ProblemKind::Classification(err),
            });
            false
        }
    };

    let Payload::Options(list) = &node.action else {
        return;
    };

    for (index, choice) in list.options.iter().enumerate() {
        if action_ok {
            if let Err(err) = resolve_selection(choice, index) {
                problems.push(Problem {
                    path: format!("{} > option {}", path, index),
                    kind: ProblemKind::Classification(err),
                });
            }
        }
        if let Payload::Video(child) = &choice.value {
            walk(child, seen, problems);
        }
    }
}
