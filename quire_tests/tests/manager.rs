// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use quire::kurbo::{Point, Rect};
use quire::{SelectionAdjustment, TextRange};
use quire_flow::HapticFeedbackType;
use quire_input::{DragObserver, InputEvent, Key, TestContext, perform_input};

use crate::util::{TestEnv, Window, samples};

fn three_paragraphs() -> TestEnv {
    TestEnv::new(&[
        samples::PARAGRAPH_A,
        samples::PARAGRAPH_B,
        samples::PARAGRAPH_C,
    ])
}

#[test]
fn manager_selection_covers_partial_full_partial() {
    let mut env = three_paragraphs();
    env.select(Point::new(40.0, 10.0), Point::new(80.0, 50.0));

    let selection = env.manager.selection().unwrap();
    assert!(!selection.handles_crossed);
    assert_eq!(selection.start.selectable_id, env.id(0));
    assert_eq!(selection.start.offset, 4);
    assert_eq!(selection.end.selectable_id, env.id(2));
    assert_eq!(selection.end.offset, 8);

    assert_eq!(env.subselection(0), Some(TextRange::new(4, 19)));
    assert_eq!(env.subselection(1), Some(TextRange::new(0, 10)));
    assert_eq!(env.subselection(2), Some(TextRange::new(0, 8)));
    assert_eq!(
        env.manager.selected_text().as_deref(),
        Some("quick brown foxjumps overthe lazy")
    );
}

#[test]
fn manager_crossed_handles_select_the_same_text() {
    let mut env = three_paragraphs();
    env.select(Point::new(80.0, 50.0), Point::new(40.0, 10.0));

    let selection = env.manager.selection().unwrap();
    assert!(selection.handles_crossed);
    assert_eq!(selection.start.selectable_id, env.id(2));
    assert_eq!(selection.start.offset, 8);
    assert_eq!(selection.end.selectable_id, env.id(0));
    assert_eq!(selection.end.offset, 4);

    assert_eq!(env.subselection(0), Some(TextRange::new(19, 4)));
    assert_eq!(env.subselection(1), Some(TextRange::new(10, 0)));
    assert_eq!(env.subselection(2), Some(TextRange::new(8, 0)));
    assert_eq!(
        env.manager.selected_text().as_deref(),
        Some("quick brown foxjumps overthe lazy")
    );
}

#[test]
fn manager_copy_writes_clipboard() {
    let mut env = three_paragraphs();
    env.manager.copy();
    assert_eq!(*env.recorded.clipboard.borrow(), None);

    env.select(Point::new(40.0, 10.0), Point::new(40.0, 30.0));
    env.manager.copy();
    assert_eq!(
        env.recorded.clipboard.borrow().as_deref(),
        Some("quick brown foxjump")
    );
}

#[test]
fn manager_copy_shortcut_from_dispatched_keys() {
    let mut env = TestEnv::new(&["hello world"]);
    env.manager
        .start_selection(Point::new(70.0, 10.0), false, SelectionAdjustment::Word);

    let mut ctx = TestContext::new();
    let mut events: Vec<InputEvent> = Vec::new();
    perform_input(&mut ctx, &Window, &mut events, |d| {
        d.enqueue_key_down(Key::CTRL_LEFT)?;
        d.enqueue_key_down(Key::C)?;
        d.enqueue_key_up(Key::C)?;
        d.enqueue_key_up(Key::CTRL_LEFT)
    })
    .unwrap();

    let used: Vec<bool> = events
        .iter()
        .map(|event| match event {
            InputEvent::Key(key) => env.manager.on_key_event(key),
            _ => false,
        })
        .collect();
    assert_eq!(used, [false, true, false, false]);
    assert_eq!(env.recorded.clipboard.borrow().as_deref(), Some("world"));
}

#[test]
fn manager_toolbar_follows_gesture() {
    let mut env = TestEnv::new(&["hello world"]);
    let coordinates = env.coordinates[0].clone();
    env.manager.registrar().borrow_mut().notify_selection_update_start(
        coordinates,
        Point::new(70.0, 10.0),
        SelectionAdjustment::Word,
    );
    env.manager.process_registrar_events();
    assert!(env.manager.has_focus(), "starting a selection focuses the container");
    assert_eq!(env.range(), Some(TextRange::new(6, 11)));
    assert!(env.recorded.toolbar_shown.borrow().is_empty());

    env.manager
        .registrar()
        .borrow_mut()
        .notify_selection_update_end();
    env.manager.process_registrar_events();
    assert_eq!(
        env.recorded.toolbar_shown.borrow().as_slice(),
        [Rect::new(60.0, 0.0, 110.0, 120.0)]
    );

    env.manager.on_tap();
    assert_eq!(env.manager.selection(), None);
    assert_eq!(*env.recorded.toolbar_hides.borrow(), 1);
}

#[test]
fn manager_select_all_event() {
    let mut env = TestEnv::new(&["hello", "big world"]);
    let id = env.id(1);
    env.manager
        .registrar()
        .borrow_mut()
        .notify_selection_update_select_all(id);
    env.manager.process_registrar_events();
    assert_eq!(env.range(), Some(TextRange::new(0, 9)));
    assert_eq!(env.subselection(0), None);
    assert!(env.manager.has_focus(), "select all focuses the container");
}

#[test]
fn manager_focus_loss_releases_selection() {
    let mut env = three_paragraphs();
    env.manager.request_focus();
    env.select(Point::new(40.0, 10.0), Point::new(80.0, 50.0));
    assert!(!env.manager.selection_is_empty());

    env.manager.on_focus_changed(false);
    assert_eq!(env.manager.selection(), None);
    assert!(env.manager.registrar().borrow().subselections().is_empty());
    assert!(!env.manager.has_focus());
}

#[test]
fn manager_haptics_once_per_change() {
    let mut env = TestEnv::new(&["hello world"]);
    env.manager
        .start_selection(Point::new(10.0, 10.0), false, SelectionAdjustment::Word);
    assert_eq!(env.haptics(), 1);

    // Same word again: nothing changed.
    env.manager
        .start_selection(Point::new(20.0, 10.0), false, SelectionAdjustment::Word);
    assert_eq!(env.haptics(), 1);
    assert_eq!(
        env.recorded.haptics.borrow().as_slice(),
        [HapticFeedbackType::TextHandleMove]
    );

    env.manager.set_touch_mode(false);
    env.manager
        .start_selection(Point::new(70.0, 10.0), false, SelectionAdjustment::Word);
    assert_eq!(env.range(), Some(TextRange::new(6, 11)));
    assert_eq!(env.haptics(), 1, "no haptics outside touch mode");
}

#[test]
fn manager_unsubscribe_clears_selection() {
    let mut env = TestEnv::new(&["hello", "world"]);
    env.manager
        .start_selection(Point::new(10.0, 10.0), false, SelectionAdjustment::Word);
    assert!(env.manager.start_handle_position().is_some());

    let id = env.id(0);
    env.manager.registrar().borrow_mut().unsubscribe(id);
    env.manager.process_registrar_events();
    assert_eq!(env.manager.selection(), None);
    assert_eq!(env.manager.start_handle_position(), None);
    assert_eq!(env.manager.end_handle_position(), None);
}

#[test]
fn manager_unsubscribe_elsewhere_keeps_selection() {
    let mut env = TestEnv::new(&["hello", "world"]);
    env.manager
        .start_selection(Point::new(10.0, 10.0), false, SelectionAdjustment::Word);
    let id = env.id(1);
    env.manager.registrar().borrow_mut().unsubscribe(id);
    env.manager.process_registrar_events();
    assert_eq!(env.range(), Some(TextRange::new(0, 5)));
}

#[test]
fn manager_selectable_change_releases_selection() {
    let mut env = TestEnv::new(&["hello", "world"]);
    env.manager
        .start_selection(Point::new(10.0, 10.0), false, SelectionAdjustment::Word);
    let id = env.id(0);
    env.manager
        .registrar()
        .borrow_mut()
        .notify_selectable_change(id);
    env.manager.process_registrar_events();
    assert_eq!(env.manager.selection(), None);
}

#[test]
fn manager_handles_follow_moved_selectable() {
    let mut env = TestEnv::new(&["hello world"]);
    env.manager
        .start_selection(Point::new(70.0, 10.0), false, SelectionAdjustment::Word);
    assert_eq!(env.manager.start_handle_position(), Some(Point::new(60.0, 20.0)));
    assert_eq!(env.manager.end_handle_position(), Some(Point::new(110.0, 20.0)));

    env.coordinates[0].set_origin(Point::new(0.0, 100.0));
    let id = env.id(0);
    env.manager
        .registrar()
        .borrow_mut()
        .notify_position_change(id);
    env.manager.process_registrar_events();
    assert_eq!(env.manager.start_handle_position(), Some(Point::new(60.0, 120.0)));
    assert_eq!(env.manager.end_handle_position(), Some(Point::new(110.0, 120.0)));
}

#[test]
fn manager_context_menu_selects_word_once() {
    let mut env = TestEnv::new(&["hello world"]);
    env.manager
        .context_menu_open_adjustment(Point::new(70.0, 10.0));
    assert_eq!(env.range(), Some(TextRange::new(6, 11)));
    env.manager
        .context_menu_open_adjustment(Point::new(10.0, 10.0));
    assert_eq!(env.range(), Some(TextRange::new(6, 11)));
}

#[test]
fn manager_magnifier_tracks_dragged_handle() {
    let mut env = TestEnv::new(&["hello world"]);
    env.manager
        .start_selection(Point::new(70.0, 10.0), false, SelectionAdjustment::Word);
    env.manager.handle_drag_observer(false).on_down(Point::ZERO);
    assert_eq!(
        env.manager.current_drag_position(),
        Some(Point::new(110.0, 19.0))
    );
    assert_eq!(
        env.manager.magnifier_center(100.0),
        Some(Point::new(110.0, 10.0))
    );

    env.manager.handle_drag_observer(false).on_up();
    assert_eq!(env.manager.magnifier_center(100.0), None);
}
