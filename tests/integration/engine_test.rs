//! Engine behaviour over the simulated host

use std::rc::Rc;
use std::time::Duration;

use vidbot::graph::{Choice, FormRequest, OptionList, Payload, VideoNode};
use vidbot::host::simulated::{HostEffect, SimHandle};
use vidbot::player::{DeviceClass, Mode, PendingAction, Playback};

use super::helpers::{engine_for, expand, load_fixture, play_to_end, DESKTOP_WIDTH, MOBILE_WIDTH};

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn option_leads_to_video_that_redirects() {
    let root = load_fixture("scenario.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);

    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);

    let PendingAction::Options(list) = engine.pending_action() else {
        panic!("expected option list, got {:?}", engine.pending_action());
    };
    assert_eq!(list.options.len(), 1);
    assert_eq!(list.options[0].label.as_deref(), Some("Go B"));

    engine.select(0);
    assert_eq!(sim.loads(), vec!["a.mp4".to_string(), "b.mp4".to_string()]);
    assert_eq!(engine.current_node().id, 2);
    assert!(engine.pending_action().is_none());

    play_to_end(&mut engine, &sim);
    assert_eq!(sim.navigations(), vec!["https://x".to_string()]);
    assert!(engine.pending_action().is_none());
}

#[test]
fn malformed_action_renders_nothing() {
    let root = load_fixture("empty_action.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);

    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);

    assert!(engine.pending_action().is_none());
    assert!(engine.visible_choices().is_empty());
    assert!(sim.navigations().is_empty());
    assert_eq!(engine.mode(), Mode::Expanded(Playback::Finished));
}

#[test]
fn nested_menu_reaches_form_and_redirect() {
    let root = load_fixture("menu.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);

    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);
    engine.select(0);
    play_to_end(&mut engine, &sim);

    let labels: Vec<&str> = engine
        .visible_choices()
        .into_iter()
        .filter_map(|(_, choice)| choice.label.as_deref())
        .collect();
    assert_eq!(labels, vec!["Sign up", "Pricing"]);

    engine.select(1);
    assert_eq!(
        sim.navigations(),
        vec!["https://example.com/pricing".to_string()]
    );
}

// ============================================================================
// Option lists
// ============================================================================

#[test]
fn ended_option_list_equals_node_action() {
    let root = load_fixture("menu.json");
    let Payload::Options(expected) = &root.action else {
        panic!("fixture root should have options");
    };
    let expected = expected.clone();
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);

    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);

    assert_eq!(engine.pending_action(), &PendingAction::Options(expected));
    assert_eq!(
        engine.visible_choices()[1].1.renderer.as_deref(),
        Some("contact-card")
    );
}

#[test]
fn selection_replaces_option_list() {
    let root = load_fixture("menu.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);

    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);

    engine.select(1);
    assert_eq!(
        engine.pending_action(),
        &PendingAction::Form(FormRequest {
            form_name: "contact".to_string()
        })
    );

    // The list is gone: other options cannot be selected any more.
    engine.select(0);
    engine.select(2);
    assert_eq!(sim.loads().len(), 1);
    assert!(sim.navigations().is_empty());
    assert!(matches!(engine.pending_action(), PendingAction::Form(_)));
}

#[test]
fn each_option_is_selectable_from_a_fresh_list() {
    let fresh = || {
        let (mut engine, sim) = engine_for(load_fixture("menu.json"), DESKTOP_WIDTH);
        expand(&mut engine, &sim);
        play_to_end(&mut engine, &sim);
        (engine, sim)
    };
    let offered = |sim: &SimHandle| {
        sim.effects()
            .iter()
            .filter(|e| matches!(e, HostEffect::NodeOffered(_)))
            .count()
    };

    // Video: offered once, loaded once, the list is replaced.
    let (mut engine, sim) = fresh();
    engine.select(0);
    assert_eq!(offered(&sim), 1);
    assert_eq!(sim.loads(), vec!["intro.mp4".to_string(), "more.mp4".to_string()]);
    assert!(sim.navigations().is_empty());
    assert_eq!(engine.current_node().id, 2);
    assert!(engine.pending_action().is_none());

    // Form: no host effect, the form replaces the list.
    let (mut engine, sim) = fresh();
    engine.select(1);
    assert_eq!(offered(&sim), 0);
    assert_eq!(sim.loads(), vec!["intro.mp4".to_string()]);
    assert!(sim.navigations().is_empty());
    assert_eq!(
        engine.pending_action(),
        &PendingAction::Form(FormRequest {
            form_name: "contact".to_string()
        })
    );

    // Redirect: exactly one navigation, nothing else.
    let (mut engine, sim) = fresh();
    engine.select(2);
    assert_eq!(offered(&sim), 0);
    assert_eq!(sim.loads(), vec!["intro.mp4".to_string()]);
    assert_eq!(sim.navigations(), vec!["https://example.com".to_string()]);
}

#[test]
fn video_option_selected_twice_loads_once() {
    let (mut engine, sim) = engine_for(load_fixture("menu.json"), DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);

    engine.select(0);
    engine.select(0);

    assert_eq!(sim.loads(), vec!["intro.mp4".to_string(), "more.mp4".to_string()]);
    assert_eq!(
        sim.effects()
            .iter()
            .filter(|e| matches!(e, HostEffect::NodeOffered(2)))
            .count(),
        1
    );
}

// ============================================================================
// Redirects
// ============================================================================

#[test]
fn node_redirect_navigates_exactly_once() {
    let root = VideoNode::new(1, "a.mp4", Payload::redirect("https://example.com/?q=1&x"));
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);

    expand(&mut engine, &sim);
    let (_, token) = sim.playing().unwrap();
    engine.can_play(token);
    engine.ended(token);
    engine.ended(token);

    assert_eq!(
        sim.navigations(),
        vec!["https://example.com/?q=1&x".to_string()]
    );
    assert!(engine.pending_action().is_none());
}

#[test]
fn option_redirect_leaves_pending_untouched() {
    let root = load_fixture("menu.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);
    let before = engine.pending_action().clone();

    engine.select(2);

    assert_eq!(sim.navigations(), vec!["https://example.com".to_string()]);
    assert_eq!(engine.pending_action(), &before);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn second_load_before_can_play_supersedes_first() {
    let root = VideoNode::new(1, "a.mp4", Payload::redirect("https://a"));
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    let (_, first) = sim.playing().unwrap();

    engine.set_root(VideoNode::new(2, "b.mp4", Payload::redirect("https://b")));
    let (source, second) = sim.playing().unwrap();
    assert_eq!(source, "b.mp4");
    assert!(!engine.is_playback_ready());
    assert!(engine.pending_action().is_none());

    engine.can_play(first);
    engine.ended(first);
    assert!(!engine.is_playback_ready());
    assert!(sim.navigations().is_empty());

    engine.can_play(second);
    assert!(engine.is_playback_ready());
    engine.ended(second);
    assert_eq!(sim.navigations(), vec!["https://b".to_string()]);
}

#[test]
fn resupplying_the_same_root_after_a_selection_keeps_playing() {
    let root = load_fixture("scenario.json");
    let (mut engine, sim) = engine_for(Rc::clone(&root), DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);
    engine.select(0);

    engine.set_root(Rc::clone(&root));

    assert_eq!(sim.loads(), vec!["a.mp4".to_string(), "b.mp4".to_string()]);
    assert_eq!(engine.current_node().id, 2);
}

#[test]
fn new_root_while_options_shown_clears_them() {
    let root = load_fixture("menu.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);
    assert!(!engine.visible_choices().is_empty());

    let next = VideoNode::new(9, "next.mp4", Payload::form("f"));
    engine.set_root(Rc::clone(&next));

    assert!(engine.pending_action().is_none());
    assert!(Rc::ptr_eq(engine.current_node(), &next));
    assert_eq!(sim.loads().last().map(String::as_str), Some("next.mp4"));
}

#[test]
fn new_root_while_collapsed_plays_on_activation() {
    let root = load_fixture("menu.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);

    engine.set_root(VideoNode::new(9, "next.mp4", Payload::form("f")));
    assert!(sim.loads().is_empty());

    expand(&mut engine, &sim);
    assert_eq!(sim.loads(), vec!["next.mp4".to_string()]);
}

// ============================================================================
// Expansion lifecycle
// ============================================================================

#[test]
fn close_during_delay_cancels_expansion() {
    let root = load_fixture("scenario.json");
    let (mut engine, sim) = engine_for(root, MOBILE_WIDTH);

    engine.activate();
    sim.advance(Duration::from_millis(100));
    engine.deactivate();
    for timer in sim.advance(Duration::from_millis(500)) {
        engine.timer_fired(timer);
    }

    assert_eq!(engine.mode(), Mode::Collapsed);
    assert!(sim.loads().is_empty());
    assert!(!sim.is_fullscreen_active());
}

#[test]
fn mobile_close_exits_fullscreen() {
    let root = load_fixture("scenario.json");
    let (mut engine, sim) = engine_for(root, MOBILE_WIDTH);
    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);
    assert!(sim.is_fullscreen_active());

    engine.deactivate();

    assert_eq!(engine.mode(), Mode::Collapsed);
    assert!(engine.pending_action().is_none());
    assert!(!sim.is_fullscreen_active());
    assert!(sim.effects().contains(&HostEffect::FullscreenExited));
}

#[test]
fn desktop_never_touches_fullscreen() {
    let root = load_fixture("scenario.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    engine.deactivate();

    assert!(!sim.effects().iter().any(|e| matches!(
        e,
        HostEffect::FullscreenRequested | HostEffect::FullscreenExited
    )));
}

#[test]
fn reactivation_loads_again() {
    let root = load_fixture("scenario.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    engine.deactivate();
    expand(&mut engine, &sim);

    assert_eq!(sim.loads(), vec!["a.mp4".to_string(), "a.mp4".to_string()]);
    assert_eq!(engine.mode(), Mode::Expanded(Playback::Loading));
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn device_boundary_is_800() {
    let (engine, _) = engine_for(load_fixture("scenario.json"), 799);
    assert_eq!(engine.device_class(), DeviceClass::Mobile);

    let (engine, _) = engine_for(load_fixture("scenario.json"), 800);
    assert_eq!(engine.device_class(), DeviceClass::Desktop);
}

#[test]
fn disable_module_twice_equals_once() {
    let root = load_fixture("scenario.json");
    let (mut once, _) = engine_for(Rc::clone(&root), DESKTOP_WIDTH);
    let (mut twice, _) = engine_for(root, DESKTOP_WIDTH);

    once.disable_module();
    twice.disable_module();
    twice.disable_module();

    assert_eq!(once.mode(), Mode::Disabled);
    assert_eq!(twice.mode(), once.mode());
    assert_eq!(twice.pending_action(), once.pending_action());
    assert!(!twice.is_module_enabled());
}

#[test]
fn nothing_re_enables_a_disabled_module() {
    let root = load_fixture("scenario.json");
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);
    engine.disable_module();

    engine.activate();
    for timer in sim.advance(Duration::from_secs(1)) {
        engine.timer_fired(timer);
    }
    engine.set_root(VideoNode::new(5, "z.mp4", Payload::form("f")));
    engine.select(0);
    engine.fullscreen_changed();

    assert!(!engine.is_module_enabled());
    assert!(sim.loads().is_empty());
}

#[test]
fn typed_graph_works_without_json() {
    let b = VideoNode::new(2, "b.mp4", Payload::form("later"));
    let root = VideoNode::new(
        1,
        "a.mp4",
        Payload::Options(OptionList {
            options: vec![Choice::new("B", Payload::Video(b))],
        }),
    );
    let (mut engine, sim) = engine_for(root, DESKTOP_WIDTH);
    expand(&mut engine, &sim);
    play_to_end(&mut engine, &sim);
    engine.select(0);
    play_to_end(&mut engine, &sim);

    assert_eq!(
        engine.pending_action(),
        &PendingAction::Form(FormRequest {
            form_name: "later".to_string()
        })
    );
}
