//! Branching playback engine.
//!
//! Plays a tree of video nodes: a collapsed preview expands into the full
//! player, and when a video ends its node's action decides what the viewer
//! sees next (an option menu, a form slot, or a redirect).
//!
//! # Architecture
//!
//! - `state`: `SessionState` and the types it is built from
//! - `controller`: pure transition function (mode changes, video loading)
//! - `resolver`: classification of node actions and option values
//! - `engine`: `Engine`, which runs transitions and carries out their effects
//!   against the host collaborators
//!
//! # Usage
//!
//! ```no_run
//! use vidbot::graph::load_graph;
//! use vidbot::host::simulated::SimHandle;
//! use vidbot::player::{Engine, EngineConfig};
//! use std::path::Path;
//!
//! let root = load_graph(Path::new("bot.json")).unwrap();
//! let sim = SimHandle::new();
//! let mut engine = Engine::new(EngineConfig::default(), "preview.mp4", root, sim.host(1280));
//! engine.attach_media(sim.media());
//! engine.activate();
//! ```

pub mod controller;
mod engine;
mod error;
pub mod resolver;
pub mod state;

pub use engine::{Engine, EngineConfig};
pub use error::EngineError;
pub use state::{DeviceClass, LoadToken, Mode, PendingAction, Playback, SessionState, TimerId};
