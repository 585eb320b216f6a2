use glam::{EulerRot, Quat};
use showroom_scene::SceneObject;

use crate::auto::AutoRotationSpeeds;
use crate::rotation::{RotationParams, RotationState};

/// Rotation of `angle` radians about Y, built through the XYZ Euler conversion.
pub fn y_rotation(angle: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, 0.0, angle, 0.0)
}

/// What the frame's drag input looks like to the composer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragInput {
    /// A drag is active; `delta` is the horizontal pixel movement since the last frame.
    Dragging { delta: f32 },
    Released,
}

/// Applies one frame of rotation to the model.
#[derive(Debug, Clone)]
pub struct RotationComposer {
    auto: AutoRotationSpeeds,
    params: RotationParams,
}

impl RotationComposer {
    pub fn new(auto: AutoRotationSpeeds, params: RotationParams) -> Self {
        Self { auto, params }
    }

    pub fn auto_speeds(&self) -> AutoRotationSpeeds {
        self.auto
    }

    pub fn params(&self) -> &RotationParams {
        &self.params
    }

    pub fn set_params(&mut self, params: RotationParams) {
        self.params = params;
    }

    /// Run one frame. Returns `false` without touching anything when there is no target.
    ///
    /// Auto-rotation goes first, then the drag or inertia quaternion is
    /// composed in front of the orientation so it turns about world Y.
    pub fn compose(
        &self,
        target: Option<&mut SceneObject>,
        rotation: &mut RotationState,
        input: DragInput,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };

        target.transform.rotate_euler(self.auto.get());

        match input {
            DragInput::Dragging { delta } => {
                let velocity = rotation.apply_delta(delta, self.params.sensitivity);
                turn(target, velocity);
            }
            DragInput::Released => {
                turn(target, rotation.velocity());
                rotation.decay(self.params.damping, self.params.min_velocity);
            }
        }
        true
    }
}

// A zero turn is skipped so the Euler view keeps its unwrapped angles.
fn turn(target: &mut SceneObject, velocity: f32) {
    if velocity != 0.0 {
        target.transform.premultiply(y_rotation(velocity));
    }
}
