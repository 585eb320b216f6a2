use showroom_common::{Result, RotationConfig, ShowroomError};

/// Per-frame decay factor, strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damping(f32);

impl Damping {
    pub fn new(factor: f32) -> Result<Self> {
        if factor > 0.0 && factor < 1.0 {
            Ok(Self(factor))
        } else {
            Err(ShowroomError::InvalidDamping(factor))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

/// Validated drag tuning: sensitivity, damping and the optional snap-to-zero floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationParams {
    pub sensitivity: f32,
    pub damping: Damping,
    pub min_velocity: Option<f32>,
}

impl RotationParams {
    pub fn new(sensitivity: f32, damping: f32, min_velocity: Option<f32>) -> Result<Self> {
        if !(sensitivity.is_finite() && sensitivity >= 0.0) {
            return Err(ShowroomError::InvalidSensitivity(sensitivity));
        }
        if let Some(min) = min_velocity {
            if !(min.is_finite() && min >= 0.0) {
                return Err(ShowroomError::InvalidThreshold(min));
            }
        }
        Ok(Self {
            sensitivity,
            damping: Damping::new(damping)?,
            min_velocity,
        })
    }

    pub fn from_config(config: &RotationConfig) -> Result<Self> {
        Self::new(config.sensitivity, config.damping, config.min_velocity)
    }
}

/// Angular velocity about the vertical axis, in radians per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    velocity: f32,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Convert a horizontal drag delta into velocity and store it.
    pub fn apply_delta(&mut self, delta_pixels: f32, sensitivity: f32) -> f32 {
        self.velocity = delta_pixels * sensitivity;
        self.velocity
    }

    /// Shrink the velocity by one frame of damping.
    ///
    /// With a floor set, any magnitude below it becomes exactly zero.
    pub fn decay(&mut self, damping: Damping, min_velocity: Option<f32>) {
        self.velocity *= damping.get();
        if min_velocity.is_some_and(|min| self.velocity.abs() < min) {
            self.velocity = 0.0;
        }
    }

    pub fn reset(&mut self) {
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damping() -> Damping {
        Damping::new(0.95).unwrap()
    }

    #[test]
    fn damping_must_be_inside_open_interval() {
        for bad in [0.0, 1.0, -0.5, 1.5, f32::NAN] {
            let err = Damping::new(bad).unwrap_err();
            assert!(err.is_invalid_input());
        }
        assert_eq!(Damping::new(0.5).unwrap().get(), 0.5);
    }

    #[test]
    fn params_reject_bad_values() {
        assert!(RotationParams::new(-0.1, 0.95, None).is_err());
        assert!(RotationParams::new(f32::INFINITY, 0.95, None).is_err());
        assert!(RotationParams::new(0.005, 0.95, Some(-1e-4)).is_err());
        assert!(RotationParams::new(0.005, 1.2, None).is_err());
        let p = RotationParams::from_config(&RotationConfig::default()).unwrap();
        assert_eq!(p.sensitivity, 0.005);
        assert_eq!(p.damping.get(), 0.95);
        assert_eq!(p.min_velocity, None);
    }

    #[test]
    fn apply_delta_is_linear() {
        let mut a = RotationState::new();
        let mut b = RotationState::new();
        let single = a.apply_delta(37.0, 0.005);
        let double = b.apply_delta(74.0, 0.005);
        assert!((double - 2.0 * single).abs() < 1e-7);
    }

    #[test]
    fn decay_never_grows_or_flips_and_converges() {
        for start in [0.25, -0.4] {
            let mut s = RotationState::new();
            s.apply_delta(start / 0.005, 0.005);
            let mut prev = s.velocity().abs();
            for _ in 0..2000 {
                s.decay(damping(), None);
                let v = s.velocity();
                assert!(v.abs() <= prev);
                assert!(v == 0.0 || v.signum() == start.signum());
                prev = v.abs();
            }
            assert!(prev < 1e-30);
        }
    }

    #[test]
    fn reset_then_decay_stays_zero() {
        let mut s = RotationState::new();
        s.apply_delta(120.0, 0.005);
        s.reset();
        for _ in 0..50 {
            s.decay(damping(), None);
            assert_eq!(s.velocity(), 0.0);
        }
    }

    #[test]
    fn ten_frames_of_decay() {
        let mut s = RotationState::new();
        assert!((s.apply_delta(50.0, 0.005) - 0.25).abs() < 1e-7);
        for _ in 0..10 {
            s.decay(damping(), None);
        }
        assert!((s.velocity() - 0.1496).abs() < 1e-4);
    }

    #[test]
    fn floor_snaps_small_velocity_to_zero() {
        let mut s = RotationState::new();
        s.apply_delta(1.0, 0.001);
        s.decay(damping(), Some(0.01));
        assert_eq!(s.velocity(), 0.0);
    }
}
