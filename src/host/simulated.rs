//! In-memory host.
//!
//! Every simulated collaborator shares one `World` through a [`SimHandle`],
//! which records what the engine asked for and lets a driver play the part
//! of the device: advancing time, leaving fullscreen, refusing requests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::{
    Fullscreen, FullscreenError, Host, MediaElement, MediaError, Navigator, Scheduler,
    SelectionHook, Viewport, VideoSwap,
};
use crate::graph::{NodeId, VideoNode};
use crate::player::state::{LoadToken, TimerId};

/// Something the engine did to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    Loaded { source: String, token: LoadToken },
    LoadRejected(String),
    Stopped,
    FullscreenRequested,
    FullscreenRefused,
    FullscreenExited,
    Navigated(String),
    TimerScheduled { timer: TimerId, delay: Duration },
    TimerCancelled(TimerId),
    NodeOffered(NodeId),
}

#[derive(Debug, Default)]
struct World {
    log: Vec<HostEffect>,
    now: Duration,
    timers: Vec<(TimerId, Duration)>,
    fullscreen_active: bool,
    refuse_fullscreen: bool,
    reject_loads: bool,
    decline_selections: bool,
    playing: Option<(String, LoadToken)>,
}

/// Shared view of a simulated host.
#[derive(Debug, Clone, Default)]
pub struct SimHandle {
    world: Rc<RefCell<World>>,
}

impl SimHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a [`Host`] whose collaborators all report into this handle.
    pub fn host(&self, viewport_width: u32) -> Host {
        Host {
            fullscreen: Box::new(SimFullscreen(self.clone())),
            navigator: Box::new(SimNavigator(self.clone())),
            scheduler: Box::new(SimScheduler(self.clone())),
            viewport: Box::new(SimViewport(viewport_width)),
            selection: Box::new(SimSelection(self.clone())),
        }
    }

    /// A media element reporting into this handle.
    pub fn media(&self) -> Box<dyn MediaElement> {
        Box::new(SimMedia(self.clone()))
    }

    /// Everything recorded so far.
    pub fn effects(&self) -> Vec<HostEffect> {
        self.world.borrow().log.clone()
    }

    /// Everything recorded since the last call.
    pub fn take_effects(&self) -> Vec<HostEffect> {
        std::mem::take(&mut self.world.borrow_mut().log)
    }

    pub fn loads(&self) -> Vec<String> {
        self.world
            .borrow()
            .log
            .iter()
            .filter_map(|effect| match effect {
                HostEffect::Loaded { source, .. } => Some(source.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.world
            .borrow()
            .log
            .iter()
            .filter_map(|effect| match effect {
                HostEffect::Navigated(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Source and token the media element is currently playing.
    pub fn playing(&self) -> Option<(String, LoadToken)> {
        self.world.borrow().playing.clone()
    }

    pub fn pending_timers(&self) -> Vec<TimerId> {
        self.world.borrow().timers.iter().map(|(id, _)| *id).collect()
    }

    /// Move time forward and return the timers that elapsed, in due order.
    pub fn advance(&self, by: Duration) -> Vec<TimerId> {
        let mut world = self.world.borrow_mut();
        world.now += by;
        let now = world.now;

        let mut due: Vec<(TimerId, Duration)> = world
            .timers
            .iter()
            .copied()
            .filter(|(_, at)| *at <= now)
            .collect();
        due.sort_by_key(|(id, at)| (*at, *id));
        world.timers.retain(|(_, at)| *at > now);

        due.into_iter().map(|(id, _)| id).collect()
    }

    pub fn is_fullscreen_active(&self) -> bool {
        self.world.borrow().fullscreen_active
    }

    /// Change fullscreen state as the device would on its own, e.g. an OS
    /// back gesture. The driver still has to notify the engine.
    pub fn set_fullscreen_active(&self, active: bool) {
        self.world.borrow_mut().fullscreen_active = active;
    }

    pub fn refuse_fullscreen(&self, refuse: bool) {
        self.world.borrow_mut().refuse_fullscreen = refuse;
    }

    /// Make the media element reject every source it is given.
    pub fn reject_loads(&self, reject: bool) {
        self.world.borrow_mut().reject_loads = reject;
    }

    /// Make the selection hook decline every video swap.
    pub fn decline_selections(&self, decline: bool) {
        self.world.borrow_mut().decline_selections = decline;
    }

    fn record(&self, effect: HostEffect) {
        self.world.borrow_mut().log.push(effect);
    }
}

struct SimMedia(SimHandle);

impl MediaElement for SimMedia {
    fn load(&mut self, source: &str, token: LoadToken) -> Result<(), MediaError> {
        if self.0.world.borrow().reject_loads {
            self.0.record(HostEffect::LoadRejected(source.to_string()));
            return Err(MediaError::PlaybackRejected {
                source_url: source.to_string(),
                reason: "autoplay blocked".to_string(),
            });
        }
        self.0.world.borrow_mut().playing = Some((source.to_string(), token));
        self.0.record(HostEffect::Loaded {
            source: source.to_string(),
            token,
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.0.world.borrow_mut().playing = None;
        self.0.record(HostEffect::Stopped);
    }
}

struct SimFullscreen(SimHandle);

impl Fullscreen for SimFullscreen {
    fn request(&mut self) -> Result<(), FullscreenError> {
        if self.0.world.borrow().refuse_fullscreen {
            self.0.record(HostEffect::FullscreenRefused);
            return Err(FullscreenError::Refused("denied by device".to_string()));
        }
        self.0.set_fullscreen_active(true);
        self.0.record(HostEffect::FullscreenRequested);
        Ok(())
    }

    fn exit(&mut self) -> Result<(), FullscreenError> {
        self.0.set_fullscreen_active(false);
        self.0.record(HostEffect::FullscreenExited);
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.0.is_fullscreen_active()
    }
}

struct SimNavigator(SimHandle);

impl Navigator for SimNavigator {
    fn navigate_to(&mut self, url: &str) {
        self.0.record(HostEffect::Navigated(url.to_string()));
    }
}

struct SimScheduler(SimHandle);

impl Scheduler for SimScheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        {
            let mut world = self.0.world.borrow_mut();
            let due = world.now + delay;
            world.timers.push((timer, due));
        }
        self.0.record(HostEffect::TimerScheduled { timer, delay });
    }

    fn cancel(&mut self, timer: TimerId) {
        self.0.world.borrow_mut().timers.retain(|(id, _)| *id != timer);
        self.0.record(HostEffect::TimerCancelled(timer));
    }
}

struct SimViewport(u32);

impl Viewport for SimViewport {
    fn width(&self) -> u32 {
        self.0
    }
}

struct SimSelection(SimHandle);

impl SelectionHook for SimSelection {
    fn on_video_node_selected(&mut self, node: &Rc<VideoNode>, swap: &mut VideoSwap) {
        self.0.record(HostEffect::NodeOffered(node.id));
        if !self.0.world.borrow().decline_selections {
            swap.change_video(node.source.as_str());
        }
    }
}
