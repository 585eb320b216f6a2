use glam::Vec3;
use serde::Serialize;
use showroom_common::{
    ParallaxConfig, Result, RotationConfig, ShowroomConfig, Viewport,
};
use showroom_input::{
    CursorAffordance, InteractionState, InteractionStateMachine, PointerEvent, PointerTracker,
};
use showroom_scene::{Scene, SceneObject};

use crate::auto::AutoRotationSpeeds;
use crate::composer::{DragInput, RotationComposer};
use crate::hover::HoverDetector;
use crate::rotation::{RotationParams, RotationState};

/// Summary handed back when a session ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub frames: u64,
    pub drags: u64,
    pub rejected_events: u64,
    pub final_state: String,
    pub final_velocity: f32,
    /// Euler angles of the model at the end, if one was attached.
    pub model_rotation: Option<Vec3>,
}

/// One interactive viewing session: the scene plus every piece of pointer
/// and rotation state, mutated only through the methods below.
///
/// Hosts forward pointer events and resizes as they arrive and call
/// [`tick`](Self::tick) once per animation frame. Drag movement between two
/// frames is summed and consumed by the next frame.
#[derive(Debug)]
pub struct Session {
    config: ShowroomConfig,
    scene: Scene,
    viewport: Viewport,
    tracker: PointerTracker,
    hover: HoverDetector,
    machine: InteractionStateMachine,
    rotation: RotationState,
    composer: RotationComposer,
    pointer_inside: bool,
    pending_delta: f32,
    frame: u64,
    drags: u64,
    rejected_events: u64,
}

impl Session {
    /// Validate `config` and assemble the scene. The model slot starts empty.
    pub fn new(config: ShowroomConfig, viewport: Viewport, auto: AutoRotationSpeeds) -> Result<Self> {
        config.validate()?;
        let params = RotationParams::from_config(&config.rotation)?;
        let scene = Scene::from_config(&config, &viewport);
        let machine = InteractionStateMachine::new(config.rotation.require_hover_to_drag);

        tracing::info!(
            "session started: {}x{} viewport, auto speeds {:?}",
            viewport.width(),
            viewport.height(),
            auto.get()
        );

        Ok(Self {
            config,
            scene,
            viewport,
            tracker: PointerTracker::new(),
            hover: HoverDetector::new(),
            machine,
            rotation: RotationState::new(),
            composer: RotationComposer::new(auto, params),
            pointer_inside: false,
            pending_delta: 0.0,
            frame: 0,
            drags: 0,
            rejected_events: 0,
        })
    }

    /// Session whose auto-rotation speeds come from `seed`.
    pub fn with_seed(config: ShowroomConfig, viewport: Viewport, seed: u64) -> Result<Self> {
        let auto = AutoRotationSpeeds::from_seed(config.rotation.base_speed, seed);
        Self::new(config, viewport, auto)
    }

    pub fn config(&self) -> &ShowroomConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct access for tuning cameras, lights, walls and the model transform.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.machine.state()
    }

    pub fn cursor(&self) -> CursorAffordance {
        self.machine.cursor()
    }

    pub fn hovered(&self) -> bool {
        self.hover.hovered()
    }

    pub fn velocity(&self) -> f32 {
        self.rotation.velocity()
    }

    pub fn pending_delta(&self) -> f32 {
        self.pending_delta
    }

    pub fn pointer(&self) -> glam::Vec2 {
        self.tracker.position()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn auto_speeds(&self) -> AutoRotationSpeeds {
        self.composer.auto_speeds()
    }

    /// Dispatch one pointer event and return the cursor the host should show.
    ///
    /// Events with non-finite coordinates are rejected before touching any state.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<CursorAffordance> {
        if let Some(p) = event.position() {
            if let Err(e) = self.tracker.update_from_event(p.x, p.y, &self.viewport) {
                self.rejected_events += 1;
                return Err(e);
            }
            self.pointer_inside = true;
        }

        let cursor = match event {
            PointerEvent::Down { x, y } => {
                let hovered = self.retest_hover();
                if self.machine.on_pointer_down(hovered) {
                    self.rotation.reset();
                    self.pending_delta = 0.0;
                    self.tracker.begin_drag(x, y);
                    self.drags += 1;
                    tracing::debug!("drag started at ({x}, {y})");
                }
                self.machine.cursor()
            }
            PointerEvent::Move { x, y } => {
                let hovered = self.retest_hover();
                if self.machine.is_dragging() {
                    self.pending_delta += self.tracker.drag_delta(x, y);
                    self.machine.cursor()
                } else {
                    self.machine.on_hover(hovered)
                }
            }
            PointerEvent::Up { .. } => {
                let hovered = self.retest_hover();
                self.release(hovered)
            }
            PointerEvent::Leave => {
                self.pointer_inside = false;
                self.hover.clear();
                self.release(false)
            }
        };
        Ok(cursor)
    }

    /// New drawable size. Updates the camera aspect and the pointer's device position.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<CursorAffordance> {
        let viewport = Viewport::new(width, height).inspect_err(|_| {
            tracing::warn!("ignoring resize to {width}x{height}");
        })?;
        self.viewport = viewport;
        self.scene.camera.set_aspect(&viewport);
        self.tracker.refresh(&viewport);
        let hovered = self.retest_hover();
        Ok(self.machine.on_hover(hovered))
    }

    /// Advance one animation frame: camera parallax, then model rotation.
    pub fn tick(&mut self) {
        let parallax = self.config.parallax;
        self.scene
            .camera
            .apply_parallax(self.tracker.position(), parallax.strength, parallax.smoothing);

        let delta = std::mem::take(&mut self.pending_delta);
        let input = if self.machine.is_dragging() {
            DragInput::Dragging { delta }
        } else {
            DragInput::Released
        };
        self.composer
            .compose(self.scene.model_mut(), &mut self.rotation, input);
        self.frame += 1;
    }

    /// Put a model in the scene and re-test hover against it.
    pub fn attach_model(&mut self, model: SceneObject) -> CursorAffordance {
        self.scene.attach_model(model);
        let hovered = self.retest_hover();
        self.machine.on_hover(hovered)
    }

    pub fn detach_model(&mut self) -> Option<SceneObject> {
        let model = self.scene.detach_model();
        let hovered = self.retest_hover();
        self.machine.on_hover(hovered);
        model
    }

    /// Replace the drag tuning. Invalid values leave the current tuning in place.
    pub fn set_rotation_config(&mut self, rotation: RotationConfig) -> Result<()> {
        let params = RotationParams::from_config(&rotation)?;
        self.composer.set_params(params);
        self.machine
            .set_require_hover_to_drag(rotation.require_hover_to_drag);
        self.config.rotation = rotation;
        Ok(())
    }

    pub fn set_parallax(&mut self, parallax: ParallaxConfig) {
        self.config.parallax = parallax;
    }

    /// End the session.
    pub fn finish(self) -> SessionReport {
        let report = SessionReport {
            frames: self.frame,
            drags: self.drags,
            rejected_events: self.rejected_events,
            final_state: self.machine.state().as_str().to_string(),
            final_velocity: self.rotation.velocity(),
            model_rotation: self.scene.model().map(|m| m.transform.rotation()),
        };
        tracing::info!(
            "session finished after {} frames, {} drags",
            report.frames,
            report.drags
        );
        report
    }

    fn release(&mut self, hovered: bool) -> CursorAffordance {
        if self.machine.is_dragging() {
            // Movement no frame has seen yet still becomes the fling.
            if self.pending_delta != 0.0 {
                let sensitivity = self.composer.params().sensitivity;
                self.rotation.apply_delta(self.pending_delta, sensitivity);
                self.pending_delta = 0.0;
            }
            self.tracker.end_drag();
            tracing::debug!("drag released at velocity {}", self.rotation.velocity());
        }
        self.machine.on_pointer_release(hovered)
    }

    fn retest_hover(&mut self) -> bool {
        if !self.pointer_inside {
            self.hover.clear();
            return false;
        }
        self.hover
            .test(self.tracker.position(), &self.scene.camera, self.scene.model())
    }
}
