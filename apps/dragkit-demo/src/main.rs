//! Replays a short drag-and-drop session against a real-time frame loop.
//!
//! Card A is picked up, dragged onto column B and released. The card then
//! springs home while the loop feeds wall-clock frame timestamps. Run with
//! `RUST_LOG=debug` to see every engine transition.

use dragkit_core::{MonotonicClock, Runtime, NANOS_PER_MILLI};
use dragkit_foundation::prelude::*;
use dragkit_foundation::{HapticFeedback, Haptics, ItemData, PointerEvent};
use std::error::Error;
use std::thread;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const MAX_SETTLE_FRAMES: usize = 600;

struct LogHaptics;

impl Haptics for LogHaptics {
    fn trigger(&self, feedback: HapticFeedback) {
        log::info!("haptic feedback: {feedback:?}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== dragkit demo ===");
    println!("Dragging card A from (0, 0) onto column B at (150, 0)");
    println!();

    let runtime = Runtime::new();
    let clock = MonotonicClock::new();
    let config = DndConfig::default()
        .with_min_distance(4.0)
        .with_haptic_feedback(HapticFeedback::ImpactMedium)
        .with_debug(true);

    let callbacks = DndCallbacks::new()
        .on_begin(|_, info| log::info!("begin: {} at {:?}", info.active_id, info.active_layout))
        .on_update(|event, info| {
            log::debug!(
                "update: translation ({}, {}) over {:?}",
                event.translation_x,
                event.translation_y,
                info.droppable_active_id
            )
        })
        .on_drag_end(|info| {
            let title = info
                .active
                .data
                .as_ref()
                .and_then(|data| data.downcast_ref::<&str>())
                .copied()
                .unwrap_or("?");
            match &info.over {
                Some(over) => log::info!("dropped {title:?} on {}", over.id),
                None => log::info!("dropped {title:?} outside every column"),
            }
        });

    let provider = DndProvider::with_config(runtime.handle(), config)
        .with_callbacks(callbacks)
        .with_haptics(LogHaptics);

    provider.register_draggable(
        DraggableOptions::new("A").with_data(ItemData::new("Write release notes")),
    )?;
    provider.set_draggable_layout("A", Rect::new(0.0, 0.0, 100.0, 100.0))?;
    provider.register_droppable(DroppableOptions::new("B"))?;
    provider.set_droppable_layout("B", Rect::new(150.0, 0.0, 100.0, 100.0))?;

    let mut time_ms = 0;
    let feed = |event: PointerEvent| {
        provider.on_pointer_event(&event);
        runtime.advance_frame(clock.now_nanos());
    };
    feed(PointerEvent::down(50.0, 50.0, time_ms));
    for step in 1..=10 {
        time_ms += 16;
        feed(PointerEvent::moved(50.0 + step as f32 * 10.0, 50.0, time_ms));
        thread::sleep(FRAME);
    }
    time_ms += 16;
    feed(PointerEvent::up(150.0, 50.0, time_ms));

    let handle = provider.handle();
    let id = ItemId::from("A");
    let mut frames = 0;
    while !runtime.handle().is_idle() {
        if frames == MAX_SETTLE_FRAMES {
            return Err(format!("card did not settle after {MAX_SETTLE_FRAMES} frames").into());
        }
        thread::sleep(FRAME);
        runtime.advance_frame(clock.now_nanos());
        frames += 1;
        if frames % 5 == 0 {
            if let Some(offset) = handle.draggable_offset(&id) {
                log::info!("returning: ({:.1}, {:.1})", offset.x, offset.y);
            }
        }
    }

    println!();
    println!(
        "Card A is {:?} at {:?} after {} frames ({} ms)",
        handle.draggable_state(&id),
        handle.draggable_offset(&id),
        frames,
        clock.now_nanos() / NANOS_PER_MILLI
    );
    Ok(())
}
