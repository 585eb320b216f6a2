//! Developer tooling: session inspector and frame timing.
//!
//! # Invariants
//! - Tools only read the session; they never drive interaction state.

pub mod inspector;
pub mod stats;

pub use inspector::{ModelInfo, SessionInspector, SessionSummary};
pub use stats::FrameStats;

pub fn crate_info() -> &'static str {
    "showroom-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
