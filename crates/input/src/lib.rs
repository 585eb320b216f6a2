//! Pointer input: event vocabulary, pointer tracking and the interaction state machine.
//!
//! # Invariants
//! - Exactly one interaction state is active at a time; only the state machine writes it.
//! - The cursor affordance is a pure projection of the interaction state.
//! - Non-finite pointer coordinates never reach the tracked position.

pub mod event;
pub mod interaction;
pub mod pointer;

pub use event::PointerEvent;
pub use interaction::{CursorAffordance, InteractionState, InteractionStateMachine};
pub use pointer::PointerTracker;

pub fn crate_info() -> &'static str {
    "showroom-input v0.1.0"
}
