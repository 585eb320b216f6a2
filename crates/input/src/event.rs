use glam::Vec2;

/// A pointer event in client pixel coordinates (origin top-left, y down).
///
/// Hosts translate their native events into these; the session never sees
/// window-system types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed.
    Down { x: f32, y: f32 },
    /// Primary button released.
    Up { x: f32, y: f32 },
    /// Pointer moved, button state unchanged.
    Move { x: f32, y: f32 },
    /// Pointer left the viewport.
    Leave,
}

impl PointerEvent {
    /// Client position carried by the event, if any.
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            Self::Down { x, y } | Self::Up { x, y } | Self::Move { x, y } => Some(Vec2::new(x, y)),
            Self::Leave => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Up { .. } => "up",
            Self::Move { .. } => "move",
            Self::Leave => "leave",
        }
    }
}
