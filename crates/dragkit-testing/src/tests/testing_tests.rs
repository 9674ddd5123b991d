use super::*;
use dragkit_core::NANOS_PER_MILLI;

#[test]
fn rule_records_callbacks_in_order() {
    let rule = DndTestRule::new();
    rule.add_draggable(DraggableOptions::new(1u64), Rect::new(0.0, 0.0, 10.0, 10.0));

    rule.begin(5.0, 5.0);
    rule.drag_by(3.0, 0.0);
    rule.release();

    let kinds: Vec<&str> = rule
        .events()
        .iter()
        .map(|event| match event {
            DndEvent::Begin { .. } => "begin",
            DndEvent::Update { .. } => "update",
            DndEvent::Finalize { .. } => "finalize",
            DndEvent::DragEnd(_) => "drag_end",
        })
        .collect();
    assert_eq!(kinds, vec!["begin", "update", "finalize", "drag_end"]);

    rule.clear_events();
    assert!(rule.events().is_empty());
}

#[test]
fn advance_time_reaches_exact_target() {
    let rule = DndTestRule::new();
    rule.advance_time(Duration::from_millis(50));
    assert_eq!(rule.now_nanos(), 50 * NANOS_PER_MILLI);
}

#[test]
fn run_until_idle_returns_immediately_without_work() {
    let rule = DndTestRule::new();
    rule.run_until_idle();
    assert_eq!(rule.now_nanos(), 0);
}

#[test]
fn offsets_of_unknown_items_are_zero() {
    let rule = DndTestRule::new();
    assert_eq!(rule.offset("nope"), Point::ZERO);
    assert_eq!(rule.resting_offset("nope"), Point::ZERO);
    assert_eq!(rule.state("nope"), None);
}

#[test]
fn recording_haptics_keeps_every_trigger() {
    let haptics = RecordingHaptics::default();
    haptics.trigger(HapticFeedback::Selection);
    haptics.trigger(HapticFeedback::ImpactHeavy);
    assert_eq!(
        haptics.triggered(),
        vec![HapticFeedback::Selection, HapticFeedback::ImpactHeavy]
    );
}
