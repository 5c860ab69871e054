//! Branching playback engine.
//!
//! Owns the session state and the host collaborators. Every entry point turns
//! into a controller event; the resulting effects are carried out here.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::graph::{Choice, VideoNode};
use crate::host::{Host, MediaElement, VideoSwap};
use crate::player::controller::{transition, Effect, Event, Observed, Transition};
use crate::player::error::EngineError;
use crate::player::state::{
    DeviceClass, LoadToken, Mode, PendingAction, SessionState, TimerId, DEFAULT_ACTIVATION_DELAY,
    DEFAULT_MOBILE_BREAKPOINT,
};

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Delay between `activate` and the first load.
    pub activation_delay: Duration,
    /// Viewport width below which the device is mobile.
    pub mobile_breakpoint: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            activation_delay: DEFAULT_ACTIVATION_DELAY,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
        }
    }
}

/// One video bot session.
pub struct Engine {
    state: SessionState,
    preview_source: String,
    media: Option<Box<dyn MediaElement>>,
    host: Host,
}

impl Engine {
    /// Start a session. The viewport is sampled once, here.
    pub fn new(
        config: EngineConfig,
        preview_source: impl Into<String>,
        root: Rc<VideoNode>,
        host: Host,
    ) -> Self {
        let width = host.viewport.width();
        let state = SessionState::initialize(root, width, config.mobile_breakpoint)
            .with_activation_delay(config.activation_delay);
        debug!(width, device = ?state.device, "session started");

        Self {
            state,
            preview_source: preview_source.into(),
            media: None,
            host,
        }
    }

    // === Mounting ===

    /// Attach the expanded player's media element.
    pub fn attach_media(&mut self, media: Box<dyn MediaElement>) {
        self.media = Some(media);
    }

    /// Detach the media element, returning it.
    pub fn detach_media(&mut self) -> Option<Box<dyn MediaElement>> {
        self.media.take()
    }

    // === Viewer and host events ===

    pub fn activate(&mut self) {
        self.dispatch(Event::Activate);
    }

    pub fn deactivate(&mut self) {
        self.dispatch(Event::Deactivate);
    }

    /// Remove the module for the rest of the session.
    pub fn disable_module(&mut self) {
        self.dispatch(Event::DisableModule);
    }

    /// Supply a root node. A reference other than the last one supplied is
    /// loaded right away; the same reference again changes nothing.
    pub fn set_root(&mut self, node: Rc<VideoNode>) {
        self.dispatch(Event::SetRoot(node));
    }

    pub fn timer_fired(&mut self, timer: TimerId) {
        self.dispatch(Event::TimerFired(timer));
    }

    pub fn can_play(&mut self, token: LoadToken) {
        self.dispatch(Event::CanPlay(token));
    }

    pub fn ended(&mut self, token: LoadToken) {
        self.dispatch(Event::Ended(token));
    }

    /// The device changed fullscreen state on its own.
    pub fn fullscreen_changed(&mut self) {
        self.dispatch(Event::FullscreenChanged);
    }

    /// Select the option at `index` of the rendered option list.
    pub fn select(&mut self, index: usize) {
        self.dispatch(Event::Select(index));
    }

    // === Read-only view ===

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn pending_action(&self) -> &PendingAction {
        &self.state.pending
    }

    pub fn device_class(&self) -> DeviceClass {
        self.state.device
    }

    pub fn is_module_enabled(&self) -> bool {
        self.state.is_module_enabled()
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn is_playback_ready(&self) -> bool {
        self.state.is_playback_ready()
    }

    pub fn current_node(&self) -> &Rc<VideoNode> {
        &self.state.current
    }

    /// Locator of the collapsed preview media.
    pub fn preview_source(&self) -> &str {
        &self.preview_source
    }

    /// Token of the source currently loading or playing.
    pub fn current_load(&self) -> Option<LoadToken> {
        self.state.track.as_ref().map(|track| track.token)
    }

    /// Options to render, with the index to pass to [`Engine::select`].
    pub fn visible_choices(&self) -> Vec<(usize, &Choice)> {
        match &self.state.pending {
            PendingAction::Options(list) => list.visible().collect(),
            _ => Vec::new(),
        }
    }

    // === Dispatch ===

    fn dispatch(&mut self, event: Event) {
        let observed = Observed {
            fullscreen_active: self.host.fullscreen.is_active(),
        };
        let Transition { state, effects } = transition(&self.state, event, observed);
        if state.mode != self.state.mode {
            debug!(from = ?self.state.mode, to = ?state.mode, "mode changed");
        }
        self.state = state;

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Schedule { timer, delay } => self.host.scheduler.schedule(timer, delay),
            Effect::CancelTimer(timer) => self.host.scheduler.cancel(timer),
            Effect::LoadVideo { token, source } => match self.media.as_mut() {
                Some(media) => {
                    if let Err(err) = media.load(&source, token) {
                        warn!(error = %EngineError::from(err), "video load failed");
                    }
                }
                None => log_skipped(EngineError::MissingMediaElement {
                    operation: "load_video",
                }),
            },
            Effect::StopVideo => {
                if let Some(media) = self.media.as_mut() {
                    media.stop();
                }
            }
            Effect::RequestFullscreen => {
                if self.media.is_none() {
                    log_skipped(EngineError::MissingMediaElement {
                        operation: "request_fullscreen",
                    });
                } else if let Err(err) = self.host.fullscreen.request() {
                    log_skipped(err.into());
                }
            }
            Effect::ExitFullscreen => {
                if let Err(err) = self.host.fullscreen.exit() {
                    log_skipped(err.into());
                }
            }
            Effect::Navigate(url) => {
                info!(url = %url, "navigating");
                self.host.navigator.navigate_to(&url);
            }
            Effect::OfferNode(node) => {
                let mut swap = VideoSwap::default();
                self.host.selection.on_video_node_selected(&node, &mut swap);
                match swap.into_source() {
                    Some(source) => self.dispatch(Event::SwapVideo { node, source }),
                    None => debug!(node = node.id, "selection hook declined video swap"),
                }
            }
        }
    }
}

fn log_skipped(err: EngineError) {
    debug!(error = %err, "skipped");
}
