//! Graph loading and checking

use vidbot::graph::check::ProblemKind;
use vidbot::graph::{check_graph, load_graph, ClassificationError, Kind};

use super::helpers::{fixtures_dir, load_fixture, temp_fixture};

#[test]
fn fixtures_without_defects_pass() {
    for name in ["scenario.json", "menu.json"] {
        let root = load_fixture(name);
        assert!(check_graph(&root).is_empty(), "{} should be clean", name);
    }
}

#[test]
fn malformed_fixture_reports_every_defect() {
    let root = load_fixture("malformed.json");
    let problems = check_graph(&root);

    let paths: Vec<&str> = problems.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["node 2 action", "node 1 > option 1", "node 1 > option 2"]
    );
    assert_eq!(
        problems[0].kind,
        ProblemKind::Classification(ClassificationError::NoMatch)
    );
    assert_eq!(
        problems[1].kind,
        ProblemKind::Classification(ClassificationError::MissingLabel { index: 1 })
    );
    assert_eq!(
        problems[2].kind,
        ProblemKind::Classification(ClassificationError::Ambiguous {
            kinds: vec![Kind::Form, Kind::Redirect]
        })
    );
}

#[test]
fn empty_action_is_reported_at_root() {
    let root = load_fixture("empty_action.json");
    let problems = check_graph(&root);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].to_string(), "node 1 action: payload matches no known shape");
}

#[test]
fn graph_loads_from_copied_file() {
    let (temp_dir, path) = temp_fixture("menu.json");
    let root = load_graph(&path).expect("Should load graph");
    assert_eq!(root.source, "intro.mp4");
    drop(temp_dir);
}

#[test]
fn missing_graph_file_is_an_error() {
    let err = load_graph(&fixtures_dir().join("does_not_exist.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read graph file"));
}
