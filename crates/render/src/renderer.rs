use glam::Vec3;
use showroom_kernel::Session;

/// Anything that can turn the current session into a frame of output.
pub trait Renderer {
    type Output;

    fn render(&self, session: &Session) -> Self::Output;
}

/// Renders the session as a short human-readable report.
///
/// Used by the CLI and by tests; no GPU involved.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, session: &Session) -> String {
        let scene = session.scene();
        let camera = &scene.camera;
        let mut out = format!("=== Showroom (frame={}) ===\n", session.frame());
        out.push_str(&format!(
            "Interaction: {} cursor={} hovered={}\n",
            session.interaction_state().as_str(),
            session.cursor().as_str(),
            session.hovered()
        ));
        out.push_str(&format!("Velocity: {:.4} rad/frame\n", session.velocity()));
        out.push_str(&format!(
            "Camera: eye={} target={} fov={:.0}\n",
            fmt_vec(camera.position),
            fmt_vec(camera.target),
            camera.fov.to_degrees()
        ));
        out.push_str(&format!("Walls: {}\n", scene.walls.len()));

        match scene.model() {
            Some(model) => {
                let t = &model.transform;
                out.push_str(&format!(
                    "Model: {} pos={} rot={} nodes={}\n",
                    model.name,
                    fmt_vec(t.position),
                    fmt_vec(t.rotation()),
                    model.node_count()
                ));
            }
            None => out.push_str("Model: (none)\n"),
        }
        out
    }
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}
