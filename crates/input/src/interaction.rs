/// Which interaction the pointer is currently in with the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

impl InteractionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hovering => "hovering",
            Self::Dragging => "dragging",
        }
    }
}

/// Cursor shape the host should show. A pure function of [`InteractionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAffordance {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl CursorAffordance {
    /// CSS-style cursor name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "auto",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

impl From<InteractionState> for CursorAffordance {
    fn from(state: InteractionState) -> Self {
        match state {
            InteractionState::Idle => Self::Default,
            InteractionState::Hovering => Self::Grab,
            InteractionState::Dragging => Self::Grabbing,
        }
    }
}

/// Idle / Hovering / Dragging, driven by hover results and button edges.
///
/// Every input recomputes the cursor, even when the state did not change, so
/// hosts can apply the returned value unconditionally.
#[derive(Debug, Clone, Default)]
pub struct InteractionStateMachine {
    state: InteractionState,
    require_hover_to_drag: bool,
}

impl InteractionStateMachine {
    pub fn new(require_hover_to_drag: bool) -> Self {
        Self {
            state: InteractionState::Idle,
            require_hover_to_drag,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn cursor(&self) -> CursorAffordance {
        self.state.into()
    }

    pub fn is_dragging(&self) -> bool {
        self.state == InteractionState::Dragging
    }

    pub fn set_require_hover_to_drag(&mut self, require: bool) {
        self.require_hover_to_drag = require;
    }

    /// Fresh hover result. Ignored while dragging.
    pub fn on_hover(&mut self, hovered: bool) -> CursorAffordance {
        if !self.is_dragging() {
            self.transition(idle_or_hovering(hovered));
        }
        self.cursor()
    }

    /// Button pressed. Returns `true` when this press starts a drag.
    ///
    /// A press while already dragging counts as a new drag start.
    pub fn on_pointer_down(&mut self, hovered: bool) -> bool {
        if self.require_hover_to_drag && !hovered && !self.is_dragging() {
            self.on_hover(false);
            return false;
        }
        self.transition(InteractionState::Dragging);
        true
    }

    /// Button released or pointer left the surface.
    pub fn on_pointer_release(&mut self, hovered: bool) -> CursorAffordance {
        self.transition(idle_or_hovering(hovered));
        self.cursor()
    }

    fn transition(&mut self, next: InteractionState) {
        if self.state != next {
            tracing::debug!(
                "interaction {} -> {}",
                self.state.as_str(),
                next.as_str()
            );
            self.state = next;
        }
    }
}

fn idle_or_hovering(hovered: bool) -> InteractionState {
    if hovered {
        InteractionState::Hovering
    } else {
        InteractionState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_toggles_between_idle_and_hovering() {
        let mut sm = InteractionStateMachine::default();
        assert_eq!(sm.on_hover(true), CursorAffordance::Grab);
        assert_eq!(sm.state(), InteractionState::Hovering);
        assert_eq!(sm.on_hover(false), CursorAffordance::Default);
        assert_eq!(sm.state(), InteractionState::Idle);
    }

    #[test]
    fn down_from_idle_drags_without_hover() {
        let mut sm = InteractionStateMachine::default();
        assert!(sm.on_pointer_down(false));
        assert_eq!(sm.state(), InteractionState::Dragging);
        assert_eq!(sm.cursor(), CursorAffordance::Grabbing);
    }

    #[test]
    fn hover_is_ignored_while_dragging() {
        let mut sm = InteractionStateMachine::default();
        sm.on_pointer_down(true);
        assert_eq!(sm.on_hover(false), CursorAffordance::Grabbing);
        assert!(sm.is_dragging());
    }

    #[test]
    fn release_lands_on_hover_result() {
        let mut sm = InteractionStateMachine::default();
        sm.on_pointer_down(false);
        assert_eq!(sm.on_pointer_release(true), CursorAffordance::Grab);
        assert_eq!(sm.state(), InteractionState::Hovering);

        sm.on_pointer_down(true);
        assert_eq!(sm.on_pointer_release(false), CursorAffordance::Default);
        assert_eq!(sm.state(), InteractionState::Idle);
    }

    #[test]
    fn hover_requirement_blocks_off_model_press() {
        let mut sm = InteractionStateMachine::new(true);
        assert!(!sm.on_pointer_down(false));
        assert_eq!(sm.state(), InteractionState::Idle);
        assert!(sm.on_pointer_down(true));
        assert!(sm.is_dragging());
    }

    #[test]
    fn repeated_input_yields_same_cursor() {
        let mut sm = InteractionStateMachine::default();
        assert_eq!(sm.on_hover(true), sm.on_hover(true));
        assert_eq!(sm.state(), InteractionState::Hovering);
    }

    #[test]
    fn cursor_names() {
        assert_eq!(CursorAffordance::from(InteractionState::Idle).as_str(), "auto");
        assert_eq!(CursorAffordance::from(InteractionState::Hovering).as_str(), "grab");
        assert_eq!(CursorAffordance::from(InteractionState::Dragging).as_str(), "grabbing");
    }
}
