//! Decision resolver.
//!
//! Pure classification of node actions and option values. The resolver holds
//! no state; the controller turns its outcomes into transitions and effects.

use std::rc::Rc;

use crate::graph::{Choice, ClassificationError, FormRequest, Kind, OptionList, Payload, VideoNode};
use crate::player::state::PendingAction;

/// Classify a payload as exactly one kind.
///
/// Option lists must be non-empty and their first option must carry a label.
/// Later options are validated individually when selected.
pub fn classify(payload: &Payload) -> Result<Kind, ClassificationError> {
    match payload {
        Payload::Video(_) => Ok(Kind::Video),
        Payload::Options(list) => {
            validate_options(list)?;
            Ok(Kind::Options)
        }
        Payload::Form(_) => Ok(Kind::Form),
        Payload::Redirect(_) => Ok(Kind::Redirect),
        Payload::Malformed(err) => Err(err.clone()),
    }
}

fn validate_options(list: &OptionList) -> Result<(), ClassificationError> {
    match list.options.first() {
        None => Err(ClassificationError::EmptyOptions),
        Some(first) if first.label.is_none() => Err(ClassificationError::MissingLabel { index: 0 }),
        Some(_) => Ok(()),
    }
}

/// What a node's action does once its video ends.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Render an option list or form.
    Show(PendingAction),
    /// Hand the URL to the navigation collaborator. Nothing is rendered.
    Navigate(String),
}

/// Resolve a node action.
pub fn resolve_action(action: &Payload) -> Result<ActionOutcome, ClassificationError> {
    match (classify(action)?, action) {
        (Kind::Options, Payload::Options(list)) => {
            Ok(ActionOutcome::Show(PendingAction::Options(list.clone())))
        }
        (Kind::Form, Payload::Form(form)) => Ok(ActionOutcome::Show(PendingAction::Form(form.clone()))),
        (Kind::Redirect, Payload::Redirect(redirect)) => {
            Ok(ActionOutcome::Navigate(redirect.url.clone()))
        }
        (found, _) => Err(ClassificationError::UnexpectedKind {
            expected: "an option list, form or redirect",
            found,
        }),
    }
}

/// What selecting an option does.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Offer the node to the selection hook, then swap the video.
    Play(Rc<VideoNode>),
    /// Render the form placeholder.
    ShowForm(FormRequest),
    /// Hand the URL to the navigation collaborator.
    Navigate(String),
}

/// Resolve the option at `index` of a rendered option list.
pub fn resolve_selection(choice: &Choice, index: usize) -> Result<Resolution, ClassificationError> {
    if choice.label.is_none() {
        return Err(ClassificationError::MissingLabel { index });
    }

    match (classify(&choice.value)?, &choice.value) {
        (Kind::Video, Payload::Video(node)) => Ok(Resolution::Play(Rc::clone(node))),
        (Kind::Form, Payload::Form(form)) => Ok(Resolution::ShowForm(form.clone())),
        (Kind::Redirect, Payload::Redirect(redirect)) => Ok(Resolution::Navigate(redirect.url.clone())),
        (found, _) => Err(ClassificationError::UnexpectedKind {
            expected: "a video node, form or redirect",
            found,
        }),
    }
}
