//! Video bot - branching video playback engine.
//!
//! A collapsed preview expands into a full player. When a video ends, the
//! node's action decides what comes next: a menu of options, a form slot, or
//! a redirect. Options lead to further video nodes, forms or redirects.
//!
//! - `graph`: video node graph and its JSON format
//! - `player`: session state, playback controller, decision resolver, engine
//! - `host`: collaborator traits (media, fullscreen, navigation, timers) and
//!   an in-memory simulation of them
//! - `driver`: scripted viewer/device commands over the simulated host

pub mod cli;
pub mod config;
pub mod driver;
pub mod graph;
pub mod host;
pub mod logging;
pub mod player;

pub use config::Config;
pub use graph::{load_graph, VideoNode};
pub use player::{Engine, EngineConfig};

/// Version string shown by `--version`.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("VIDBOT_BUILD_DATE"),
    ")"
);

/// Version string shown by `--version`.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VIDBOT_BUILD_DATE"),
    ")"
);
