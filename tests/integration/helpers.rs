//! Shared test helpers

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;
use vidbot::graph::load_graph;
use vidbot::host::simulated::SimHandle;
use vidbot::player::state::DEFAULT_ACTIVATION_DELAY;
use vidbot::{Engine, EngineConfig, VideoNode};

pub const DESKTOP_WIDTH: u32 = 1280;
pub const MOBILE_WIDTH: u32 = 390;

/// Directory holding the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture graph.
pub fn load_fixture(name: &str) -> Rc<VideoNode> {
    load_graph(&fixtures_dir().join(name)).expect("fixture should load")
}

/// Copy a fixture into a temp dir, returning the dir (keep it alive) and path.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

/// Engine over a simulated host with the media element attached.
pub fn engine_for(root: Rc<VideoNode>, width: u32) -> (Engine, SimHandle) {
    let sim = SimHandle::new();
    let mut engine = Engine::new(EngineConfig::default(), "preview.mp4", root, sim.host(width));
    engine.attach_media(sim.media());
    (engine, sim)
}

/// Activate and let the activation delay elapse.
pub fn expand(engine: &mut Engine, sim: &SimHandle) {
    engine.activate();
    for timer in sim.advance(DEFAULT_ACTIVATION_DELAY) {
        engine.timer_fired(timer);
    }
}

/// Report "can play" then "ended" for whatever is playing.
pub fn play_to_end(engine: &mut Engine, sim: &SimHandle) {
    let (_, token) = sim.playing().expect("something should be playing");
    engine.can_play(token);
    engine.ended(token);
}
