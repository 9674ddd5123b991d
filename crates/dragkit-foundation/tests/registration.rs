use dragkit_core::Runtime;
use dragkit_foundation::prelude::*;
use dragkit_foundation::DndError;
use dragkit_testing::DndTestRule;

#[test]
fn provider_reports_registration_errors() {
    let runtime = Runtime::new();
    let provider = DndProvider::new(runtime.handle());

    provider.register_draggable(DraggableOptions::new(1u64)).unwrap();
    assert_eq!(
        provider.register_draggable(DraggableOptions::new(1u64)),
        Err(DndError::DuplicateItem { id: 1u64.into() })
    );
    assert_eq!(
        provider.set_droppable_layout(1u64, Rect::ZERO),
        Err(DndError::UnknownItem { id: 1u64.into() })
    );
    assert_eq!(
        provider.unregister_droppable("missing"),
        Err(DndError::UnknownItem {
            id: "missing".into()
        })
    );

    let err = provider.set_draggable_layout(2u64, Rect::ZERO).unwrap_err();
    assert_eq!(err.to_string(), "item 2 is not registered");
}

#[test]
fn same_id_may_be_draggable_and_droppable() {
    let rule = DndTestRule::new();
    rule.add_draggable(DraggableOptions::new("x"), Rect::new(0.0, 0.0, 50.0, 50.0));
    rule.add_droppable(DroppableOptions::new("x"), Rect::new(100.0, 0.0, 50.0, 50.0));

    rule.provider().unregister_droppable("x").unwrap();
    assert_eq!(rule.state("x"), Some(DraggableState::Resting));
}

#[test]
fn unregistering_during_return_stops_animation() {
    let rule = DndTestRule::new();
    rule.add_draggable(DraggableOptions::new("a"), Rect::new(0.0, 0.0, 100.0, 100.0));

    rule.begin(50.0, 50.0);
    rule.drag_by(60.0, 0.0);
    rule.release();
    rule.advance_frame();

    rule.provider().unregister_draggable("a").unwrap();
    assert!(rule.runtime_handle().is_idle());
    assert_eq!(rule.state("a"), None);
    rule.advance_frames(10);
    assert_eq!(rule.state("a"), None);
}

#[test]
fn unregistering_active_item_ends_drag_quietly() {
    let rule = DndTestRule::new();
    rule.add_draggable(DraggableOptions::new("a"), Rect::new(0.0, 0.0, 100.0, 100.0));
    rule.add_droppable(DroppableOptions::new("b"), Rect::new(50.0, 0.0, 100.0, 100.0));

    rule.begin(50.0, 50.0);
    rule.drag_by(10.0, 0.0);
    assert_eq!(rule.handle().droppable_active_id(), Some(ItemId::from("b")));

    rule.provider().unregister_draggable("a").unwrap();
    assert_eq!(rule.handle().active_id(), None);
    assert_eq!(rule.handle().droppable_active_id(), None);

    rule.drag_by(20.0, 0.0);
    rule.release();
    assert!(rule.finalizes().is_empty());
    assert!(rule.drag_ends().is_empty());
}

#[test]
fn unregistering_hovered_droppable_clears_target() {
    let rule = DndTestRule::new();
    rule.add_draggable(DraggableOptions::new("a"), Rect::new(0.0, 0.0, 100.0, 100.0));
    rule.add_droppable(DroppableOptions::new("b"), Rect::new(50.0, 0.0, 100.0, 100.0));

    rule.begin(50.0, 50.0);
    rule.drag_by(10.0, 0.0);
    rule.provider().unregister_droppable("b").unwrap();
    rule.release();

    let ends = rule.drag_ends();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].over, None);
}

#[test]
fn updated_options_apply_to_the_next_drop() {
    let rule = DndTestRule::new();
    rule.add_draggable(DraggableOptions::new("a"), Rect::new(0.0, 0.0, 100.0, 100.0));
    rule.add_droppable(DroppableOptions::new("b"), Rect::new(150.0, 0.0, 100.0, 100.0));

    rule.provider()
        .update_droppable_options(DroppableOptions::new("b").disabled(true))
        .unwrap();
    rule.begin(50.0, 50.0);
    rule.drag_by(100.0, 0.0);
    assert_eq!(rule.handle().droppable_active_id(), None);
    rule.release();
    assert_eq!(rule.drag_ends()[0].over, None);
}

#[test]
fn dropping_the_runtime_leaves_provider_inert() {
    let runtime = Runtime::new();
    let provider = DndProvider::new(runtime.handle());
    provider.register_draggable(DraggableOptions::new("a")).unwrap();
    provider
        .set_draggable_layout("a", Rect::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    drop(runtime);

    provider.on_begin(&GestureEvent::begin(5.0, 5.0));
    provider.on_update(&GestureEvent::update(3.0, 0.0));
    provider.on_finalize(&GestureEvent::finalize(GestureState::Ended, 0.0, 0.0));

    let handle = provider.handle();
    assert_eq!(handle.draggable_state(&"a".into()), Some(DraggableState::Acting));
    assert_eq!(handle.draggable_offset(&"a".into()), Some(Point::new(3.0, 0.0)));
}
