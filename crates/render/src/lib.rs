//! Rendering interface: renderers read a session and produce output.
//!
//! # Invariants
//! - Renderers take the session by shared reference and never mutate it.
//! - Everything drawn derives from the scene owned by the session.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "showroom-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
