use dragkit_animation::SpringSpec;
use dragkit_foundation::prelude::*;
use dragkit_foundation::{DragEndInfo, HapticFeedback, ItemData};
use dragkit_testing::{assert_point_approx_eq, assert_rect_approx_eq, DndEvent, DndTestRule};
use std::cell::RefCell;
use std::rc::Rc;

fn card(rule: &DndTestRule, id: &str, x: f32) -> ItemId {
    rule.add_draggable(DraggableOptions::new(id), Rect::new(x, 0.0, 100.0, 100.0))
}

fn target(rule: &DndTestRule, id: &str, x: f32) -> ItemId {
    rule.add_droppable(DroppableOptions::new(id), Rect::new(x, 0.0, 100.0, 100.0))
}

#[test]
fn item_a_dropped_on_target_b() {
    let rule = DndTestRule::new();
    let a = card(&rule, "A", 0.0);
    let b = target(&rule, "B", 150.0);
    let handle = rule.handle();

    rule.begin(50.0, 50.0);
    assert_eq!(rule.state("A"), Some(DraggableState::Dragging));
    assert_eq!(handle.active_id(), Some(a.clone()));
    assert_eq!(rule.begins()[0].active_layout, Rect::new(0.0, 0.0, 100.0, 100.0));

    rule.drag_by(100.0, 0.0);
    assert_eq!(rule.offset("A"), Point::new(100.0, 0.0));
    assert_eq!(handle.active_layout(), Some(Rect::new(100.0, 0.0, 100.0, 100.0)));
    assert_eq!(handle.droppable_active_id(), Some(b.clone()));
    assert_eq!(rule.updates()[0].droppable_active_id, Some(b.clone()));

    rule.release();
    let ends = rule.drag_ends();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].active.id, a);
    assert_eq!(ends[0].over.as_ref().map(|over| over.id.clone()), Some(b));
    assert_eq!(rule.state("A"), Some(DraggableState::Acting));
    assert_eq!(handle.active_id(), None);
    assert_eq!(handle.droppable_active_id(), None);

    rule.advance_frame();
    let returning = rule.offset("A");
    assert!(returning.x > 0.0 && returning.x < 100.0, "returning {returning:?}");

    rule.run_until_idle();
    assert_eq!(rule.state("A"), Some(DraggableState::Resting));
    assert_eq!(rule.offset("A"), Point::ZERO);
    assert_eq!(rule.drag_ends().len(), 1);
}

#[test]
fn begin_picks_the_item_under_the_pointer() {
    let rule = DndTestRule::new();
    card(&rule, "left", 0.0);
    card(&rule, "middle", 200.0);
    card(&rule, "right", 400.0);

    rule.begin(250.0, 10.0);
    assert_eq!(rule.handle().active_id(), Some(ItemId::from("middle")));
    assert_eq!(rule.state("left"), Some(DraggableState::Resting));
    assert_eq!(rule.state("right"), Some(DraggableState::Resting));
}

#[test]
fn begin_outside_every_item_does_nothing() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);

    rule.begin(150.0, 50.0);
    rule.drag_by(10.0, 10.0);
    rule.release();

    assert!(rule.events().is_empty());
    assert_eq!(rule.state("a"), Some(DraggableState::Resting));
    assert!(rule.runtime_handle().is_idle());
}

#[test]
fn disabled_items_and_providers_are_not_picked_up() {
    let rule = DndTestRule::new();
    rule.add_draggable(
        DraggableOptions::new("locked").disabled(true),
        Rect::new(0.0, 0.0, 100.0, 100.0),
    );
    rule.begin(50.0, 50.0);
    assert_eq!(rule.handle().active_id(), None);

    card(&rule, "free", 200.0);
    rule.provider().set_disabled(true);
    rule.begin(250.0, 50.0);
    assert_eq!(rule.handle().active_id(), None);

    rule.provider().set_disabled(false);
    rule.begin(250.0, 50.0);
    assert_eq!(rule.handle().active_id(), Some(ItemId::from("free")));
}

#[test]
fn disabling_mid_drag_lets_the_drag_finish() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    rule.begin(10.0, 10.0);
    rule.provider().set_disabled(true);
    rule.drag_by(30.0, 0.0);
    rule.release();

    assert_eq!(rule.offset("a").x, 30.0);
    assert_eq!(rule.drag_ends().len(), 1);
}

#[test]
fn live_offset_tracks_initial_offset_plus_translation() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    rule.begin(50.0, 50.0);

    for (tx, ty) in [(5.0, -3.0), (-120.0, 40.0), (0.0, 0.0), (999.0, -999.0)] {
        rule.drag_by(tx, ty);
        assert_eq!(rule.offset("a"), Point::new(tx, ty));
        assert_eq!(
            rule.handle().active_layout(),
            Some(Rect::new(tx, ty, 100.0, 100.0))
        );
    }
}

#[test]
fn first_overlapping_droppable_wins() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    target(&rule, "wide", 100.0);
    target(&rule, "also", 120.0);
    rule.add_droppable(
        DroppableOptions::new("off").disabled(true),
        Rect::new(0.0, 0.0, 500.0, 500.0),
    );

    rule.begin(50.0, 50.0);
    rule.drag_by(0.0, 0.0);
    assert_eq!(rule.handle().droppable_active_id(), None);

    rule.drag_by(50.0, 0.0);
    assert_eq!(rule.handle().droppable_active_id(), Some(ItemId::from("wide")));

    rule.drag_by(0.0, 300.0);
    assert_eq!(rule.handle().droppable_active_id(), None);
}

#[test]
fn touching_edges_do_not_count_as_overlap() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    target(&rule, "b", 150.0);

    rule.begin(50.0, 50.0);
    rule.drag_by(50.0, 0.0);
    assert_eq!(rule.handle().droppable_active_id(), None);
    rule.drag_by(50.5, 0.0);
    assert_eq!(rule.handle().droppable_active_id(), Some(ItemId::from("b")));
}

#[test]
fn failed_gesture_never_reports_a_drop() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    target(&rule, "b", 150.0);

    rule.begin(50.0, 50.0);
    rule.drag_by(100.0, 0.0);
    rule.finalize(GestureState::Failed, 0.0, 0.0);

    assert!(rule.drag_ends().is_empty());
    assert_eq!(rule.finalizes().len(), 1);
    assert_eq!(rule.state("a"), Some(DraggableState::Acting));
    rule.run_until_idle();
    assert_eq!(rule.state("a"), Some(DraggableState::Resting));
}

#[test]
fn cancelled_gesture_reports_drop_without_target_when_outside() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    target(&rule, "b", 150.0);

    rule.begin(50.0, 50.0);
    rule.drag_by(10.0, 0.0);
    rule.finalize(GestureState::Cancelled, 0.0, 0.0);

    let ends = rule.drag_ends();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].over, None);
}

#[test]
fn drop_carries_item_payloads() {
    let rule = DndTestRule::new();
    let card_data = ItemData::new(String::from("task #7"));
    let column_data = ItemData::new(3usize);
    rule.add_draggable(
        DraggableOptions::new("card").with_data(card_data.clone()),
        Rect::new(0.0, 0.0, 100.0, 100.0),
    );
    rule.add_droppable(
        DroppableOptions::new("column").with_data(column_data.clone()),
        Rect::new(150.0, 0.0, 100.0, 100.0),
    );

    rule.begin(50.0, 50.0);
    rule.drag_by(100.0, 0.0);
    rule.release();

    let DragEndInfo { active, over } = rule.drag_ends().remove(0);
    assert_eq!(active.data, Some(card_data));
    let over = over.expect("dropped over the column");
    assert_eq!(
        over.data.as_ref().and_then(|data| data.downcast_ref::<usize>()),
        Some(&3)
    );
}

#[test]
fn finalize_reports_layout_at_release() {
    let rule = DndTestRule::new();
    card(&rule, "a", 20.0);
    rule.begin(50.0, 50.0);
    rule.drag_by(15.0, 25.0);
    rule.release();

    let finalize = &rule.finalizes()[0];
    assert_eq!(finalize.active_id, ItemId::from("a"));
    assert_eq!(finalize.active_layout, Rect::new(35.0, 25.0, 100.0, 100.0));
}

#[test]
fn regrab_while_returning_keeps_resting_offset() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);

    rule.begin(50.0, 50.0);
    rule.drag_by(80.0, 40.0);
    rule.release();
    rule.advance_frames(2);
    let mid_flight = rule.offset("a");
    assert!(mid_flight.x > 0.0 && mid_flight.x < 80.0);

    rule.begin(50.0 + mid_flight.x, 50.0 + mid_flight.y);
    assert_eq!(rule.state("a"), Some(DraggableState::Dragging));
    assert_eq!(rule.resting_offset("a"), Point::ZERO);
    assert!(!rule.handle().is_animating(&ItemId::from("a")));

    rule.advance_frames(5);
    assert_eq!(rule.offset("a"), mid_flight);
    assert_eq!(rule.state("a"), Some(DraggableState::Dragging));

    rule.drag_by(10.0, 0.0);
    assert_point_approx_eq(
        rule.offset("a"),
        Point::new(mid_flight.x + 10.0, mid_flight.y),
        1e-4,
        "new drag starts from the mid-flight offset",
    );

    rule.release();
    rule.run_until_idle();
    assert_eq!(rule.state("a"), Some(DraggableState::Resting));
    assert_eq!(rule.offset("a"), Point::ZERO);
}

#[test]
fn release_velocity_seeds_the_return_spring() {
    let still = DndTestRule::new();
    let flung = DndTestRule::new();
    for rule in [&still, &flung] {
        card(rule, "a", 0.0);
        rule.begin(50.0, 50.0);
        rule.drag_by(100.0, 0.0);
    }
    still.finalize(GestureState::Ended, 0.0, 0.0);
    flung.finalize(GestureState::Ended, 3000.0, 0.0);

    still.advance_frame();
    flung.advance_frame();
    assert!(flung.offset("a").x > still.offset("a").x);

    flung.run_until_idle();
    assert_eq!(flung.offset("a"), Point::ZERO);
}

#[test]
fn haptics_fire_once_per_activation() {
    let rule = DndTestRule::with_config(
        DndConfig::default().with_haptic_feedback(HapticFeedback::ImpactLight),
    );
    card(&rule, "a", 0.0);

    rule.begin(50.0, 50.0);
    rule.drag_by(20.0, 0.0);
    rule.drag_by(40.0, 0.0);
    assert_eq!(rule.haptic_triggers(), vec![HapticFeedback::ImpactLight]);

    rule.release();
    rule.begin(50.0, 50.0);
    assert_eq!(rule.haptic_triggers().len(), 2);
}

#[test]
fn haptics_are_silent_without_feedback_kind() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    rule.begin(50.0, 50.0);
    assert!(rule.haptic_triggers().is_empty());
}

#[test]
fn content_offset_shifts_hit_testing() {
    let rule = DndTestRule::new();
    card(&rule, "below_fold", 0.0);
    rule.provider()
        .set_draggable_layout("below_fold", Rect::new(0.0, 600.0, 100.0, 100.0))
        .unwrap();

    rule.begin(50.0, 50.0);
    assert_eq!(rule.handle().active_id(), None);

    rule.provider().set_content_offset(Point::new(0.0, 580.0));
    assert_eq!(rule.handle().content_offset(), Point::new(0.0, 580.0));
    rule.begin(50.0, 50.0);
    assert_eq!(rule.handle().active_id(), Some(ItemId::from("below_fold")));
}

#[test]
fn callbacks_may_read_the_handle() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    target(&rule, "b", 150.0);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let handle = rule.handle();
    let seen_update = Rc::clone(&seen);
    let update_handle = handle.clone();
    let seen_end = Rc::clone(&seen);
    let end_handle = handle.clone();
    rule.provider().set_callbacks(
        DndCallbacks::new()
            .on_update(move |_, info| {
                seen_update.borrow_mut().push((
                    update_handle.active_id(),
                    update_handle.draggable_offset(&info.active_id),
                ));
            })
            .on_drag_end(move |info| {
                seen_end.borrow_mut().push((
                    end_handle.active_id(),
                    end_handle.draggable_offset(&info.active.id),
                ));
            }),
    );

    rule.begin(50.0, 50.0);
    rule.drag_by(100.0, 0.0);
    rule.release();

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            (Some(ItemId::from("a")), Some(Point::new(100.0, 0.0))),
            (None, Some(Point::new(100.0, 0.0))),
        ]
    );
}

#[test]
fn begin_callback_reports_translated_layout_for_moved_item() {
    let rule = DndTestRule::new();
    card(&rule, "a", 0.0);
    rule.begin(50.0, 50.0);
    rule.drag_by(30.0, 10.0);
    rule.release();
    rule.advance_frame();
    let live = rule.offset("a");
    rule.clear_events();

    rule.begin(40.0 + live.x, 40.0 + live.y);
    let begin = rule
        .events()
        .into_iter()
        .find_map(|event| match event {
            DndEvent::Begin { info, .. } => Some(info),
            _ => None,
        })
        .expect("begin recorded");
    assert_rect_approx_eq(
        begin.active_layout,
        Rect::new(live.x, live.y, 100.0, 100.0),
        1e-4,
        "begin layout",
    );
}

#[test]
fn inspection_snapshots_follow_registration_order() {
    let rule = DndTestRule::new();
    card(&rule, "z", 0.0);
    card(&rule, "y", 200.0);
    target(&rule, "t", 400.0);

    let handle = rule.handle();
    let ids: Vec<ItemId> = handle.draggable_layouts().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![ItemId::from("z"), ItemId::from("y")]);
    assert_eq!(
        handle.droppable_layouts(),
        vec![(ItemId::from("t"), Rect::new(400.0, 0.0, 100.0, 100.0))]
    );
    assert_eq!(
        handle.draggable_states(),
        vec![
            (ItemId::from("z"), DraggableState::Resting),
            (ItemId::from("y"), DraggableState::Resting),
        ]
    );
    assert!(handle
        .draggable_offsets()
        .iter()
        .chain(handle.resting_offsets().iter())
        .all(|(_, offset)| *offset == Point::ZERO));
}

#[test]
fn heavily_damped_stiff_spring_returns_item_to_rest() {
    let config = DndConfig::default().with_spring(SpringSpec::stiff().with_damping_ratio(5.0));
    let rule = DndTestRule::with_config(config);
    card(&rule, "a", 0.0);

    rule.begin(50.0, 50.0);
    rule.drag_by(100.0, 0.0);
    rule.release();
    rule.advance_frames(300);

    let offset = rule.offset("a");
    assert!(offset.x.is_finite() && offset.y.is_finite(), "{offset:?}");
    assert_eq!(offset, Point::ZERO);
    assert_eq!(rule.state("a"), Some(DraggableState::Resting));
    assert!(rule.runtime_handle().is_idle());

    rule.begin(50.0, 50.0);
    assert_eq!(rule.state("a"), Some(DraggableState::Dragging));
}
