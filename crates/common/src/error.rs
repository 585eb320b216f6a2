/// Errors surfaced by the showroom crates.
///
/// Every variant except the I/O and JSON wrappers is an invalid-input rejection:
/// the value was refused before it could reach orientation state.
#[derive(Debug, thiserror::Error)]
pub enum ShowroomError {
    #[error("invalid viewport dimensions {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("non-finite pointer coordinates ({x}, {y})")]
    NonFinitePointer { x: f32, y: f32 },
    #[error("damping factor {0} is outside (0, 1)")]
    InvalidDamping(f32),
    #[error("sensitivity {0} must be finite and non-negative")]
    InvalidSensitivity(f32),
    #[error("velocity threshold {0} must be finite and non-negative")]
    InvalidThreshold(f32),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShowroomError {
    /// True for rejections of caller-supplied numeric input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, ShowroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_classification() {
        assert!(ShowroomError::InvalidDamping(1.5).is_invalid_input());
        assert!(
            ShowroomError::InvalidViewport {
                width: 0.0,
                height: 600.0
            }
            .is_invalid_input()
        );
        let io = ShowroomError::from(std::io::Error::other("disk"));
        assert!(!io.is_invalid_input());
    }

    #[test]
    fn messages_name_the_value() {
        let e = ShowroomError::InvalidViewport {
            width: 0.0,
            height: 600.0,
        };
        assert_eq!(e.to_string(), "invalid viewport dimensions 0x600");
    }
}
