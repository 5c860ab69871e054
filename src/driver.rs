//! Scripted driver for the simulated host.
//!
//! Plays the part of both the viewer and the device: each [`Command`] is one
//! thing a viewer or a browser would do, applied to an [`Engine`] wired to a
//! [`SimHandle`]. Used by `vidbot play` and by the integration tests.

use std::fmt::Write as _;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::graph::{NodeId, Payload, VideoNode};
use crate::host::simulated::{HostEffect, SimHandle};
use crate::player::{DeviceClass, Engine, EngineConfig, Mode, PendingAction, Playback};

/// One driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click the preview
    Activate,
    /// Advance simulated time; defaults to the activation delay
    Tick(Option<u64>),
    /// Report "can play" for the playing source
    CanPlay,
    /// Report "ended" for the playing source
    End,
    /// Pick an option by index
    Select(usize),
    /// Close the expanded player
    Close,
    /// Leave fullscreen through the device
    FullscreenExit,
    /// Remove the module
    Disable,
    /// Swap the root node for the node with this id
    Root(NodeId),
    /// Print state without changing it
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let name = parts.next().context("Empty command")?;
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("Too many arguments for '{}'", name);
        }

        let command = match (name, arg) {
            ("activate", None) => Command::Activate,
            ("tick", None) => Command::Tick(None),
            ("tick", Some(ms)) => Command::Tick(Some(
                ms.parse().with_context(|| format!("Invalid milliseconds: {}", ms))?,
            )),
            ("canplay", None) => Command::CanPlay,
            ("end", None) => Command::End,
            ("select", Some(index)) => Command::Select(
                index
                    .parse()
                    .with_context(|| format!("Invalid option index: {}", index))?,
            ),
            ("close", None) => Command::Close,
            ("fs-exit", None) => Command::FullscreenExit,
            ("disable", None) => Command::Disable,
            ("root", Some(id)) => Command::Root(
                id.parse()
                    .with_context(|| format!("Invalid node id: {}", id))?,
            ),
            ("status", None) => Command::Status,
            ("quit", None) | ("exit", None) => Command::Quit,
            ("select", None) | ("root", None) => bail!("'{}' needs an argument", name),
            _ => bail!("Unknown command: {}", line.trim()),
        };
        Ok(command)
    }
}

/// Whether the driver should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Engine plus simulated host.
pub struct Driver {
    engine: Engine,
    sim: SimHandle,
    graph: Rc<VideoNode>,
    activation_delay: Duration,
}

impl Driver {
    pub fn new(
        config: EngineConfig,
        preview: &str,
        graph: Rc<VideoNode>,
        viewport_width: u32,
    ) -> Self {
        let sim = SimHandle::new();
        let mut engine = Engine::new(config, preview, Rc::clone(&graph), sim.host(viewport_width));
        engine.attach_media(sim.media());
        Self {
            engine,
            sim,
            graph,
            activation_delay: config.activation_delay,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn sim(&self) -> &SimHandle {
        &self.sim
    }

    /// Apply one command, appending a transcript of what happened to `out`.
    pub fn run(&mut self, command: &Command, out: &mut String) -> Flow {
        match command {
            Command::Activate => self.engine.activate(),
            Command::Tick(ms) => {
                let by = match ms {
                    Some(ms) => Duration::from_millis(*ms),
                    None => self.activation_delay,
                };
                for timer in self.sim.advance(by) {
                    self.engine.timer_fired(timer);
                }
            }
            Command::CanPlay => match self.sim.playing() {
                Some((_, token)) => self.engine.can_play(token),
                None => line(out, "nothing is playing"),
            },
            Command::End => match self.sim.playing() {
                Some((_, token)) => self.engine.ended(token),
                None => line(out, "nothing is playing"),
            },
            Command::Select(index) => self.engine.select(*index),
            Command::Close => self.engine.deactivate(),
            Command::FullscreenExit => {
                self.sim.set_fullscreen_active(false);
                self.engine.fullscreen_changed();
            }
            Command::Disable => self.engine.disable_module(),
            Command::Root(id) => match find_node(&self.graph, *id) {
                Some(node) => self.engine.set_root(node),
                None => line(out, &format!("no node with id {}", id)),
            },
            Command::Status => {}
            Command::Quit => return Flow::Quit,
        }

        for effect in self.sim.take_effects() {
            line(out, &describe_effect(&effect));
        }
        line(out, &self.status());
        Flow::Continue
    }

    /// One-line summary of the observable session state.
    pub fn status(&self) -> String {
        let engine = &self.engine;
        let mode = match engine.mode() {
            Mode::Collapsed => "collapsed".to_string(),
            Mode::Expanding { .. } => "expanding".to_string(),
            Mode::Expanded(Playback::Loading) => "expanded(loading)".to_string(),
            Mode::Expanded(Playback::Ready) => "expanded(ready)".to_string(),
            Mode::Expanded(Playback::Finished) => "expanded(finished)".to_string(),
            Mode::Disabled => "disabled".to_string(),
        };
        let pending = match engine.pending_action() {
            PendingAction::None => "none".to_string(),
            PendingAction::Form(form) => format!("form({})", form.form_name),
            PendingAction::Options(_) => {
                let labels: Vec<String> = engine
                    .visible_choices()
                    .iter()
                    .map(|(index, choice)| {
                        format!("{}:{}", index, choice.label.as_deref().unwrap_or_default())
                    })
                    .collect();
                format!("options[{}]", labels.join(", "))
            }
        };
        let device = match engine.device_class() {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Desktop => "desktop",
        };
        format!(
            "state: mode={} device={} node={} pending={}",
            mode,
            device,
            engine.current_node().id,
            pending
        )
    }
}

/// Depth-first search for the node with `id`.
pub fn find_node(root: &Rc<VideoNode>, id: NodeId) -> Option<Rc<VideoNode>> {
    if root.id == id {
        return Some(Rc::clone(root));
    }
    let Payload::Options(list) = &root.action else {
        return None;
    };
    list.options.iter().find_map(|choice| match &choice.value {
        Payload::Video(child) => find_node(child, id),
        _ => None,
    })
}

fn describe_effect(effect: &HostEffect) -> String {
    match effect {
        HostEffect::Loaded { source, token } => format!("host: load {} (load {})", source, token.0),
        HostEffect::LoadRejected(source) => format!("host: load of {} rejected", source),
        HostEffect::Stopped => "host: stop video".to_string(),
        HostEffect::FullscreenRequested => "host: enter fullscreen".to_string(),
        HostEffect::FullscreenRefused => "host: fullscreen refused".to_string(),
        HostEffect::FullscreenExited => "host: exit fullscreen".to_string(),
        HostEffect::Navigated(url) => format!("host: navigate {}", url),
        HostEffect::TimerScheduled { timer, delay } => {
            format!("host: timer {} in {}ms", timer.0, delay.as_millis())
        }
        HostEffect::TimerCancelled(timer) => format!("host: cancel timer {}", timer.0),
        HostEffect::NodeOffered(id) => format!("host: node {} selected", id),
    }
}

fn line(out: &mut String, text: &str) {
    let _ = writeln!(out, "{}", text);
}
