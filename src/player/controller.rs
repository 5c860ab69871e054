//! Playback controller.
//!
//! `transition` is a pure function from the current session state, an event
//! and a snapshot of what the host currently reports to the next state plus
//! the effects the engine must carry out. It never touches a collaborator.
//!
//! ```text
//!   Collapsed --activate--> Expanding --timer--> Expanded(Loading)
//!       ^                       |                  |  can play
//!       |                       |                  v
//!       +------ deactivate -----+--------- Expanded(Ready) --ended--> Expanded(Finished)
//!                                                  ^                         |
//!                                                  +---- select (video) -----+
//!   any --disable--> Disabled
//! ```

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::graph::VideoNode;
use crate::player::resolver::{resolve_action, resolve_selection, ActionOutcome, Resolution};
use crate::player::state::{LoadToken, Mode, PendingAction, Playback, SessionState, TimerId, Track};

/// Something that happened to the session.
#[derive(Debug, Clone)]
pub enum Event {
    /// Viewer clicked the preview.
    Activate,
    /// Viewer closed the expanded player.
    Deactivate,
    /// Viewer removed the module.
    DisableModule,
    /// A scheduled timer elapsed.
    TimerFired(TimerId),
    /// The media element can play the source loaded with this token.
    CanPlay(LoadToken),
    /// The source loaded with this token finished playing.
    Ended(LoadToken),
    /// The device reported a fullscreen change.
    FullscreenChanged,
    /// Viewer picked the option at this index of the rendered list.
    Select(usize),
    /// The selection hook asked for `node` to play from `source`.
    SwapVideo { node: Rc<VideoNode>, source: String },
    /// The caller supplied a new root node.
    SetRoot(Rc<VideoNode>),
}

/// Host facts sampled just before a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Observed {
    pub fullscreen_active: bool,
}

/// Side effect the engine performs against its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Schedule { timer: TimerId, delay: Duration },
    CancelTimer(TimerId),
    /// Assign the source, force a reload and start playback.
    LoadVideo { token: LoadToken, source: String },
    StopVideo,
    RequestFullscreen,
    ExitFullscreen,
    Navigate(String),
    /// Run the selection hook for this node.
    OfferNode(Rc<VideoNode>),
}

/// Result of a transition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

/// Compute the next state and effects for `event`.
pub fn transition(state: &SessionState, event: Event, observed: Observed) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    if matches!(next.mode, Mode::Disabled) {
        debug!(?event, "module disabled, ignoring event");
        return Transition {
            state: next,
            effects,
        };
    }

    match event {
        Event::Activate => activate(&mut next, &mut effects),
        Event::Deactivate => deactivate(&mut next, &mut effects, observed),
        Event::DisableModule => disable(&mut next, &mut effects, observed),
        Event::TimerFired(timer) => timer_fired(&mut next, &mut effects, timer),
        Event::CanPlay(token) => can_play(&mut next, token),
        Event::Ended(token) => ended(&mut next, &mut effects, token),
        Event::FullscreenChanged => {
            // Backing out of fullscreen via an OS gesture closes the player.
            if !observed.fullscreen_active && next.is_expanded() {
                info!("fullscreen exited externally, collapsing");
                deactivate(&mut next, &mut effects, observed);
            }
        }
        Event::Select(index) => select(&mut next, &mut effects, index),
        Event::SwapVideo { node, source } => {
            next.current = node;
            load_video(&mut next, &mut effects, source);
        }
        Event::SetRoot(node) => {
            if Rc::ptr_eq(&next.root, &node) {
                debug!(node = node.id, "root unchanged");
            } else {
                let source = node.source.clone();
                next.root = Rc::clone(&node);
                next.current = node;
                load_video(&mut next, &mut effects, source);
            }
        }
    }

    Transition {
        state: next,
        effects,
    }
}

/// The single entry point for changing what is playing.
///
/// Clears readiness and the pending action before the new source is issued,
/// so nothing observed afterwards can belong to the previous source. The
/// media element only exists while expanded; in other modes the source is
/// tracked and loaded once the player mounts.
fn load_video(state: &mut SessionState, effects: &mut Vec<Effect>, source: String) {
    state.set_pending_action(PendingAction::None);
    let token = state.issue_token();
    state.track = Some(Track {
        token,
        source: source.clone(),
    });

    if let Mode::Expanded(_) = state.mode {
        state.mode = Mode::Expanded(Playback::Loading);
        debug!(source = %source, token = token.0, "loading video");
        effects.push(Effect::LoadVideo { token, source });
    }
}

fn activate(state: &mut SessionState, effects: &mut Vec<Effect>) {
    if state.is_expanded() {
        debug!("already expanded, ignoring activate");
        return;
    }

    let timer = state.issue_timer();
    state.mode = Mode::Expanding { timer };
    effects.push(Effect::Schedule {
        timer,
        delay: state.activation_delay,
    });
}

fn timer_fired(state: &mut SessionState, effects: &mut Vec<Effect>, fired: TimerId) {
    match state.mode {
        Mode::Expanding { timer } if timer == fired => {
            state.mode = Mode::Expanded(Playback::Loading);
            let source = state.current.source.clone();
            load_video(state, effects, source);
            if state.device.is_mobile() {
                effects.push(Effect::RequestFullscreen);
            }
        }
        _ => debug!(timer = fired.0, "stale timer"),
    }
}

fn collapse(state: &mut SessionState, effects: &mut Vec<Effect>) {
    match state.mode {
        Mode::Expanding { timer } => effects.push(Effect::CancelTimer(timer)),
        Mode::Expanded(_) => effects.push(Effect::StopVideo),
        Mode::Collapsed | Mode::Disabled => {}
    }
    state.set_pending_action(PendingAction::None);
    state.track = None;
}

fn deactivate(state: &mut SessionState, effects: &mut Vec<Effect>, observed: Observed) {
    if !state.is_expanded() {
        debug!("not expanded, ignoring deactivate");
        return;
    }

    collapse(state, effects);
    state.mode = Mode::Collapsed;
    if state.device.is_mobile() && observed.fullscreen_active {
        effects.push(Effect::ExitFullscreen);
    }
}

fn disable(state: &mut SessionState, effects: &mut Vec<Effect>, observed: Observed) {
    collapse(state, effects);
    if observed.fullscreen_active {
        effects.push(Effect::ExitFullscreen);
    }
    state.disable_module();
    info!("module disabled");
}

fn can_play(state: &mut SessionState, token: LoadToken) {
    if !state.is_current_load(token) {
        debug!(token = token.0, "can play for superseded source");
        return;
    }
    if let Mode::Expanded(Playback::Loading) = state.mode {
        state.mode = Mode::Expanded(Playback::Ready);
    }
}

fn ended(state: &mut SessionState, effects: &mut Vec<Effect>, token: LoadToken) {
    if !state.is_current_load(token) {
        debug!(token = token.0, "ended for superseded source");
        return;
    }
    // Some players skip "can play" for cached media, so Loading also ends.
    if !matches!(
        state.mode,
        Mode::Expanded(Playback::Loading) | Mode::Expanded(Playback::Ready)
    ) {
        debug!(mode = ?state.mode, "ignoring ended");
        return;
    }
    state.mode = Mode::Expanded(Playback::Finished);

    let node = Rc::clone(&state.current);
    match resolve_action(&node.action) {
        Ok(ActionOutcome::Show(pending)) => state.set_pending_action(pending),
        Ok(ActionOutcome::Navigate(url)) => {
            info!(node = node.id, url = %url, "redirecting after video end");
            effects.push(Effect::Navigate(url));
        }
        Err(err) => {
            warn!(node = node.id, error = %err, "cannot classify node action, rendering nothing");
            state.set_pending_action(PendingAction::None);
        }
    }
}

fn select(state: &mut SessionState, effects: &mut Vec<Effect>, index: usize) {
    let PendingAction::Options(list) = &state.pending else {
        debug!(index, "no option list rendered, ignoring selection");
        return;
    };
    let Some(choice) = list.options.get(index) else {
        debug!(index, "selection out of range");
        return;
    };

    match resolve_selection(choice, index) {
        Ok(Resolution::Play(node)) => effects.push(Effect::OfferNode(node)),
        Ok(Resolution::ShowForm(form)) => state.set_pending_action(PendingAction::Form(form)),
        Ok(Resolution::Navigate(url)) => {
            info!(url = %url, "redirecting after selection");
            effects.push(Effect::Navigate(url));
        }
        Err(err) => warn!(index, error = %err, "cannot classify option value, ignoring selection"),
    }
}
