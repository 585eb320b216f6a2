use glam::Vec2;
use showroom_common::{Result, ShowroomError, Viewport};

/// Map client pixels to normalized device coordinates, y up, clamped to [-1, 1].
pub fn to_ndc(client: Vec2, viewport: &Viewport) -> Vec2 {
    let x = (client.x / viewport.width()) * 2.0 - 1.0;
    let y = -(client.y / viewport.height()) * 2.0 + 1.0;
    Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// Tracks the pointer in device coordinates and the horizontal drag anchor.
///
/// The anchor moves with every delta sample, so each delta is measured from
/// the previous sample rather than from the start of the gesture.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Vec2,
    client: Option<Vec2>,
    anchor: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last computed pointer position in normalized device coordinates.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Last client position seen, in pixels.
    pub fn client(&self) -> Option<Vec2> {
        self.client
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// Record a pointer sample and recompute the device position.
    ///
    /// Non-finite coordinates are rejected and leave the tracker untouched.
    pub fn update_from_event(
        &mut self,
        client_x: f32,
        client_y: f32,
        viewport: &Viewport,
    ) -> Result<Vec2> {
        if !(client_x.is_finite() && client_y.is_finite()) {
            tracing::warn!("rejected pointer sample ({client_x}, {client_y})");
            return Err(ShowroomError::NonFinitePointer {
                x: client_x,
                y: client_y,
            });
        }
        let client = Vec2::new(client_x, client_y);
        self.client = Some(client);
        self.position = to_ndc(client, viewport);
        Ok(self.position)
    }

    /// Recompute the device position after the viewport changed size.
    pub fn refresh(&mut self, viewport: &Viewport) -> Vec2 {
        if let Some(client) = self.client {
            self.position = to_ndc(client, viewport);
        }
        self.position
    }

    /// Start a gesture at the given client position.
    pub fn begin_drag(&mut self, client_x: f32, client_y: f32) {
        self.anchor = Some(Vec2::new(client_x, client_y));
    }

    /// Horizontal pixels moved since the previous sample; the anchor follows.
    ///
    /// Without an anchor the sample becomes the anchor and the delta is zero.
    pub fn drag_delta(&mut self, client_x: f32, client_y: f32) -> f32 {
        let sample = Vec2::new(client_x, client_y);
        let delta = self.anchor.map_or(0.0, |anchor| sample.x - anchor.x);
        self.anchor = Some(sample);
        delta
    }

    pub fn end_drag(&mut self) {
        self.anchor = None;
    }
}
