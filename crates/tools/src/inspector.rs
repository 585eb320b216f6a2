use glam::{Vec2, Vec3};
use showroom_kernel::Session;

/// Read-only queries against a running session for debug panels and the CLI.
pub struct SessionInspector;

impl SessionInspector {
    pub fn summary(session: &Session) -> SessionSummary {
        SessionSummary {
            frame: session.frame(),
            state: session.interaction_state().as_str(),
            cursor: session.cursor().as_str(),
            hovered: session.hovered(),
            velocity: session.velocity(),
            pending_delta: session.pending_delta(),
            pointer: session.pointer(),
            auto_speeds: session.auto_speeds().get(),
            has_model: session.scene().model().is_some(),
        }
    }

    /// Transform and size of the attached model, if any.
    pub fn inspect_model(session: &Session) -> Option<ModelInfo> {
        session.scene().model().map(|model| ModelInfo {
            name: model.name.clone(),
            position: model.transform.position,
            rotation: model.transform.rotation(),
            scale: model.transform.scale,
            nodes: model.node_count(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frame: u64,
    pub state: &'static str,
    pub cursor: &'static str,
    pub hovered: bool,
    pub velocity: f32,
    pub pending_delta: f32,
    pub pointer: Vec2,
    pub auto_speeds: Vec3,
    pub has_model: bool,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: frame={} state={} cursor={} hovered={} velocity={:.4} pointer=({:.2}, {:.2})",
            self.frame,
            self.state,
            self.cursor,
            self.hovered,
            self.velocity,
            self.pointer.x,
            self.pointer.y
        )
    }
}

#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub position: Vec3,
    /// Euler angles, XYZ order, radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub nodes: usize,
}

impl std::fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model {} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3}) nodes={}",
            self.name,
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.nodes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_common::{ShowroomConfig, Viewport};
    use showroom_input::PointerEvent;
    use showroom_kernel::AutoRotationSpeeds;
    use showroom_scene::placeholder_model;

    fn session() -> Session {
        Session::new(
            ShowroomConfig::default(),
            Viewport::new(800.0, 600.0).unwrap(),
            AutoRotationSpeeds::zero(),
        )
        .unwrap()
    }

    #[test]
    fn summary_of_fresh_session() {
        let summary = SessionInspector::summary(&session());
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.state, "idle");
        assert_eq!(summary.cursor, "auto");
        assert!(!summary.has_model);
    }

    #[test]
    fn summary_tracks_drag() {
        let mut s = session();
        s.handle_pointer(PointerEvent::Down { x: 400.0, y: 300.0 }).unwrap();
        s.handle_pointer(PointerEvent::Move { x: 420.0, y: 300.0 }).unwrap();
        let summary = SessionInspector::summary(&s);
        assert_eq!(summary.state, "dragging");
        assert_eq!(summary.pending_delta, 20.0);
        assert!(format!("{summary}").contains("cursor=grabbing"));
    }

    #[test]
    fn inspect_model_when_attached() {
        let mut s = session();
        assert!(SessionInspector::inspect_model(&s).is_none());
        s.attach_model(placeholder_model(&ShowroomConfig::default().model));
        let info = SessionInspector::inspect_model(&s).unwrap();
        assert_eq!(info.name, "placeholder");
        assert!((info.position - Vec3::new(0.0, -0.1, 2.0)).abs().max_element() < 1e-6);
        assert!(format!("{info}").contains("nodes=1"));
    }
}
