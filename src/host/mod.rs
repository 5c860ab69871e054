//! Host collaborators.
//!
//! The engine talks to the outside world only through these traits, so the
//! state machine can run without a display, a browser or a media stack.
//! `simulated` provides in-memory implementations for the CLI and tests.

mod error;
pub mod simulated;

use std::rc::Rc;
use std::time::Duration;

pub use error::{FullscreenError, MediaError};

use crate::graph::VideoNode;
use crate::player::state::{LoadToken, TimerId};

/// The expanded player's media element.
///
/// Only attached while the expanded player is mounted.
pub trait MediaElement {
    /// Assign `source`, force a reload and start playback.
    ///
    /// The host must tag the "can play" and "ended" events of this source
    /// with `token` when reporting them back to the engine.
    fn load(&mut self, source: &str, token: LoadToken) -> Result<(), MediaError>;

    /// Abandon the current source.
    fn stop(&mut self);
}

/// Device fullscreen capability.
///
/// Requests are fire-and-forget: the engine never waits for them to resolve.
/// Changes the device makes on its own are forwarded to
/// [`crate::player::Engine::fullscreen_changed`].
pub trait Fullscreen {
    /// Ask for the expanded container to go fullscreen.
    fn request(&mut self) -> Result<(), FullscreenError>;

    fn exit(&mut self) -> Result<(), FullscreenError>;

    fn is_active(&self) -> bool;
}

/// Page navigation.
pub trait Navigator {
    fn navigate_to(&mut self, url: &str);
}

/// One-shot timers.
///
/// When a scheduled timer elapses the host calls
/// [`crate::player::Engine::timer_fired`] with its id.
pub trait Scheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration);

    /// Cancel a timer. Cancelling an unknown or elapsed timer is a no-op.
    fn cancel(&mut self, timer: TimerId);
}

/// Device facts sampled once at session start.
pub trait Viewport {
    fn width(&self) -> u32;
}

/// Hook run whenever a selection resolves to a video node.
///
/// The hook may call [`VideoSwap::change_video`] to let the swap happen, with
/// the node's source or another one, or decline by not calling it.
pub trait SelectionHook {
    fn on_video_node_selected(&mut self, node: &Rc<VideoNode>, swap: &mut VideoSwap);
}

/// Swap request handed to a [`SelectionHook`].
#[derive(Debug, Default)]
pub struct VideoSwap {
    source: Option<String>,
}

impl VideoSwap {
    pub fn change_video(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    /// The requested source, if the hook asked for a swap.
    pub fn into_source(self) -> Option<String> {
        self.source
    }
}

/// Selection hook that always plays the selected node's own source.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaySelected;

impl SelectionHook for PlaySelected {
    fn on_video_node_selected(&mut self, node: &Rc<VideoNode>, swap: &mut VideoSwap) {
        swap.change_video(node.source.as_str());
    }
}

/// The collaborators an engine is wired to.
pub struct Host {
    pub fullscreen: Box<dyn Fullscreen>,
    pub navigator: Box<dyn Navigator>,
    pub scheduler: Box<dyn Scheduler>,
    pub viewport: Box<dyn Viewport>,
    pub selection: Box<dyn SelectionHook>,
}
