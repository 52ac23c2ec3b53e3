use crate::controller::control::{Control, Direction, DirectionalControls};

// Controller errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("Invalid binding for {direction}: {reason}")]
    InvalidBinding { direction: Direction, reason: String },

    #[error("Dead zone must be within [0.0, 1.0), got {0}")]
    InvalidDeadZone(f32),

    #[error("Horizontal and vertical movement cannot share axis {0}")]
    SharedAxis(u32),
}

/// A physical input device reduced to four directional controls.
///
/// Hosts call [`Controller::survey_controls`] once per tick before anything reads
/// the controls. A survey fully determines activation from the device's current
/// state, so calling it twice within one tick is harmless. An unreachable device
/// reads as "nothing pressed".
pub trait Controller {
    /// Short device label for logs and readouts.
    fn name(&self) -> &str;

    fn controls(&self) -> &DirectionalControls;

    fn controls_mut(&mut self) -> &mut DirectionalControls;

    /// Polls the device once and updates all four controls to match it.
    fn survey_controls(&mut self);

    /// False while the device could not be read. Controls then stay released.
    fn is_available(&self) -> bool {
        true
    }

    fn deactivate_all_controls(&mut self) {
        self.controls_mut().deactivate_all();
    }

    fn control(&self, direction: Direction) -> &Control {
        self.controls().get(direction)
    }

    fn control_mut(&mut self, direction: Direction) -> &mut Control {
        self.controls_mut().get_mut(direction)
    }

    /// Swaps in a different control for `direction`, returning the old one.
    fn replace_control(&mut self, direction: Direction, control: Control) -> Control {
        std::mem::replace(self.control_mut(direction), control)
    }

    fn move_up(&self) -> &Control {
        &self.controls().up
    }

    fn move_right(&self) -> &Control {
        &self.controls().right
    }

    fn move_down(&self) -> &Control {
        &self.controls().down
    }

    fn move_left(&self) -> &Control {
        &self.controls().left
    }
}
