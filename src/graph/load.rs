//! Graph files.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::debug;

use super::shape::read_root;
use super::VideoNode;

/// Load a video node graph from a JSON file.
pub fn load_graph(path: &Path) -> Result<Rc<VideoNode>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    let root =
        parse_graph(&content).with_context(|| format!("Invalid graph file {}", path.display()))?;
    debug!(path = %path.display(), root = root.id, "loaded graph");
    Ok(root)
}

/// Parse a video node graph from JSON text.
pub fn parse_graph(json: &str) -> Result<Rc<VideoNode>> {
    let value: serde_json::Value = serde_json::from_str(json).context("Failed to parse graph JSON")?;
    Ok(read_root(&value)?)
}
