//! Check subcommand handler

use std::path::Path;

use anyhow::Result;

use vidbot::graph::{check_graph, load_graph};

/// Check a graph file. Returns the process exit code.
pub fn handle(path: &Path) -> Result<i32> {
    let root = load_graph(path)?;
    let problems = check_graph(&root);

    if problems.is_empty() {
        println!("{}: ok", path.display());
        return Ok(0);
    }

    for problem in &problems {
        println!("{}", problem);
    }
    println!(
        "{}: {} problem(s) found",
        path.display(),
        problems.len()
    );
    Ok(1)
}
