//! Drag-and-drop engine for dragkit
//!
//! A [`DndProvider`] owns a registry of draggable items and droppable targets
//! and turns pan gestures into drag sessions:
//!
//! - pressing an item makes it *pending* (when an activation delay applies)
//!   or immediately *dragging*
//! - moving drags it by the gesture translation and tracks which droppable it
//!   overlaps
//! - releasing reports the drop and springs the item back to its resting
//!   offset
//!
//! Gestures come either from a host recognizer as [`GestureEvent`]s or as raw
//! [`PointerEvent`]s through the built-in [`PanRecognizer`]. All state is
//! single-threaded and driven by a [`dragkit_core::Runtime`].

mod callbacks;
mod config;
mod engine;
mod error;
mod gesture;
mod handle;
mod item;
mod options;
mod pointer;
mod provider;
mod recognizer;
mod registry;
mod state;
mod velocity_tracker;

pub use callbacks::{BeginInfo, DndCallbacks, DragEndInfo, FinalizeInfo, UpdateInfo};
pub use config::{DndConfig, HapticFeedback, Haptics, DEFAULT_MIN_DISTANCE};
pub use error::DndError;
pub use gesture::{GestureEvent, GestureInput, GestureState};
pub use handle::DndHandle;
pub use item::{ItemData, ItemId};
pub use options::{DraggableOptions, DroppableOptions};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use provider::DndProvider;
pub use recognizer::{PanRecognizer, MAX_RELEASE_VELOCITY};
pub use registry::{DndStore, OffsetPair};
pub use state::DraggableState;
pub use velocity_tracker::{VelocityTracker1D, ASSUME_STOPPED_MS};

pub mod prelude {
    pub use crate::{
        DndCallbacks, DndConfig, DndHandle, DndProvider, DraggableOptions, DraggableState,
        DroppableOptions, GestureEvent, GestureState, ItemId,
    };
    pub use dragkit_geometry::{Point, Rect};
}
