//! Session state.
//!
//! Contains the central `SessionState` value and the types it is built from.
//! Flags that only make sense together live inside the same `Mode` variant,
//! so combinations such as "disabled but playback ready" cannot be expressed.

use std::rc::Rc;
use std::time::Duration;

use crate::graph::{FormRequest, OptionList, VideoNode};

/// Viewport width below which a device is treated as mobile.
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 800;

/// Delay between `activate` and the first video load.
pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_millis(200);

/// Device class, sampled once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Classify a viewport width. Widths strictly below `breakpoint` are mobile.
    pub fn from_viewport_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceClass::Mobile)
    }
}

/// Handle of a scheduled activation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Identifies one `load_video` call.
///
/// Media events carry the token of the load they belong to; events with any
/// other token are from a superseded source and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(pub u64);

/// Playback phase of the expanded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Source assigned, waiting for "can play".
    Loading,
    /// Playing.
    Ready,
    /// "ended" was handled for the current source.
    Finished,
}

/// Player mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Preview shown. Initial mode.
    Collapsed,
    /// Expansion animation running; the first load happens when `timer` fires.
    Expanding { timer: TimerId },
    /// Full player mounted.
    Expanded(Playback),
    /// Module removed. Terminal.
    Disabled,
}

/// What the viewer is shown once a video has ended.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PendingAction {
    #[default]
    None,
    Options(OptionList),
    Form(FormRequest),
}

impl PendingAction {
    pub fn is_none(&self) -> bool {
        matches!(self, PendingAction::None)
    }
}

/// The source currently tracked by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub token: LoadToken,
    pub source: String,
}

/// Central state of one viewing session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: Mode,
    pub device: DeviceClass,
    pub pending: PendingAction,
    /// Root node last supplied by the caller.
    pub root: Rc<VideoNode>,
    /// Node whose action is classified when the current video ends.
    pub current: Rc<VideoNode>,
    pub track: Option<Track>,
    pub activation_delay: Duration,
    next_timer: u64,
    next_token: u64,
}

impl SessionState {
    /// Start a session.
    ///
    /// # Arguments
    /// * `root` - Initial node to play
    /// * `viewport_width` - Device viewport width, sampled once
    /// * `breakpoint` - Width below which the device is mobile
    pub fn initialize(root: Rc<VideoNode>, viewport_width: u32, breakpoint: u32) -> Self {
        Self {
            mode: Mode::Collapsed,
            device: DeviceClass::from_viewport_width(viewport_width, breakpoint),
            pending: PendingAction::None,
            current: Rc::clone(&root),
            root,
            track: None,
            activation_delay: DEFAULT_ACTIVATION_DELAY,
            next_timer: 0,
            next_token: 0,
        }
    }

    pub fn with_activation_delay(mut self, delay: Duration) -> Self {
        self.activation_delay = delay;
        self
    }

    pub fn is_module_enabled(&self) -> bool {
        !matches!(self.mode, Mode::Disabled)
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.mode, Mode::Expanding { .. } | Mode::Expanded(_))
    }

    pub fn is_playback_ready(&self) -> bool {
        matches!(
            self.mode,
            Mode::Expanded(Playback::Ready) | Mode::Expanded(Playback::Finished)
        )
    }

    /// Replace the pending action. Any rendered option or form UI is
    /// invalidated by the replacement.
    pub fn set_pending_action(&mut self, action: PendingAction) {
        self.pending = action;
    }

    /// Disable the module. Idempotent and irreversible.
    pub fn disable_module(&mut self) {
        self.mode = Mode::Disabled;
        self.set_pending_action(PendingAction::None);
        self.track = None;
    }

    /// Whether `token` belongs to the source currently tracked.
    pub fn is_current_load(&self, token: LoadToken) -> bool {
        self.track.as_ref().is_some_and(|t| t.token == token)
    }

    pub(crate) fn issue_timer(&mut self) -> TimerId {
        self.next_timer += 1;
        TimerId(self.next_timer)
    }

    pub(crate) fn issue_token(&mut self) -> LoadToken {
        self.next_token += 1;
        LoadToken(self.next_token)
    }
}
