//! Video node graph.
//!
//! A graph is a tree of [`VideoNode`]s built once by the content provider and
//! handed to the engine behind `Rc`. The engine never mutates it.
//!
//! - `error`: classification and load errors
//! - `shape`: reads JSON payloads into [`Payload`] values
//! - `load`: graph files on disk
//! - `check`: whole-graph validation used by `vidbot check`

pub mod check;
mod error;
pub mod load;
pub mod shape;

use std::fmt;
use std::rc::Rc;

pub use check::{check_graph, Problem};
pub use error::{ClassificationError, GraphError};
pub use load::{load_graph, parse_graph};

/// Stable identity of a video node.
pub type NodeId = u64;

/// A playable video together with what happens when it ends.
#[derive(Debug, PartialEq)]
pub struct VideoNode {
    pub id: NodeId,
    /// Media locator handed to the media element.
    pub source: String,
    /// Classified when the video ends.
    pub action: Payload,
}

impl VideoNode {
    pub fn new(id: NodeId, source: impl Into<String>, action: Payload) -> Rc<Self> {
        Rc::new(Self {
            id,
            source: source.into(),
            action,
        })
    }
}

/// The four payload kinds a node action or option value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Video,
    Options,
    Form,
    Redirect,
}

impl Kind {
    /// Tag used by explicitly tagged payloads (`"kind": "..."`).
    pub fn tag(&self) -> &'static str {
        match self {
            Kind::Video => "video",
            Kind::Options => "options",
            Kind::Form => "form",
            Kind::Redirect => "redirect",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "video" => Some(Kind::Video),
            "options" => Some(Kind::Options),
            "form" => Some(Kind::Form),
            "redirect" => Some(Kind::Redirect),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node action or an option value.
///
/// Payloads read from content that could not be classified are kept as
/// `Malformed` so that a single broken node does not prevent the rest of the
/// graph from loading. The error surfaces when the payload is classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Video(Rc<VideoNode>),
    Options(OptionList),
    Form(FormRequest),
    Redirect(Redirect),
    Malformed(ClassificationError),
}

impl Payload {
    pub fn options(options: Vec<Choice>) -> Self {
        Payload::Options(OptionList { options })
    }

    pub fn form(form_name: impl Into<String>) -> Self {
        Payload::Form(FormRequest {
            form_name: form_name.into(),
        })
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        Payload::Redirect(Redirect { url: url.into() })
    }
}

/// Ordered list of viewer choices. Render order is the list order.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionList {
    pub options: Vec<Choice>,
}

impl OptionList {
    /// Choices that can be rendered, with their position in the list.
    ///
    /// Choices without a label are skipped; selecting one is rejected by the
    /// resolver.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Choice)> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, choice)| choice.label.is_some())
    }
}

/// A single option of an [`OptionList`].
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: Option<String>,
    /// What selecting this option resolves to. Never an option list.
    pub value: Payload,
    /// Opaque rendering hook identifier, passed through to the UI untouched.
    pub renderer: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: Payload) -> Self {
        Self {
            label: Some(label.into()),
            value,
            renderer: None,
        }
    }
}

/// Opaque form slot. The engine only records that a form is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub form_name: String,
}

/// Terminal hand-off to the navigation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub url: String,
}
