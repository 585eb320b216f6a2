//! Interaction kernel: drag velocity, per-frame rotation, hover testing and the session that owns them.
//!
//! # Invariants
//! - All session state mutates through `&mut Session`; there are no globals.
//! - Velocity magnitude never grows and never changes sign while no drag is active.
//! - Without a model every frame is a no-op for rotation; pointer handling still runs.

pub mod auto;
pub mod composer;
pub mod hover;
pub mod rotation;
pub mod session;

pub use auto::AutoRotationSpeeds;
pub use composer::{DragInput, RotationComposer, y_rotation};
pub use hover::HoverDetector;
pub use rotation::{Damping, RotationParams, RotationState};
pub use session::{Session, SessionReport};

pub fn crate_info() -> &'static str {
    "showroom-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
