//! Digital keyboard controller.

use crate::controller::control::{Direction, DirectionalControls};
use crate::controller::controller::{Controller, ControllerError};
use crate::device::{EguiKeySource, KeySource};
use eframe::egui::Key;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Raw key code bound to each direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: u32,
    pub right: u32,
    pub down: u32,
    pub left: u32,
}

impl Default for KeyBindings {
    // Arrow keys of the egui host. u32::MAX never names a key, so a missing
    // arrow key fails at construction instead of binding something random.
    fn default() -> Self {
        let code = |key: Key| EguiKeySource::key_code(key).unwrap_or(u32::MAX);
        Self {
            up: code(Key::ArrowUp),
            right: code(Key::ArrowRight),
            down: code(Key::ArrowDown),
            left: code(Key::ArrowLeft),
        }
    }
}

impl KeyBindings {
    pub fn code(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }
}

pub struct KeyboardController<K: KeySource> {
    controls: DirectionalControls,
    source: K,
    available: bool,
}

impl<K: KeySource> KeyboardController<K> {
    pub fn new(bindings: &KeyBindings, source: K) -> Result<Self, ControllerError> {
        let key_count = source.key_count();
        for direction in Direction::ALL {
            let code = bindings.code(direction);
            if code as usize >= key_count {
                return Err(ControllerError::InvalidBinding {
                    direction,
                    reason: format!("key code {} outside key table of {} keys", code, key_count),
                });
            }
        }

        info!("Creating keyboard controller with bindings: {:?}", bindings);
        Ok(Self {
            controls: DirectionalControls::new(
                bindings.up,
                bindings.right,
                bindings.down,
                bindings.left,
            ),
            source,
            available: true,
        })
    }

    pub fn source(&self) -> &K {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut K {
        &mut self.source
    }
}

impl<K: KeySource> Controller for KeyboardController<K> {
    fn name(&self) -> &str {
        "Keyboard"
    }

    fn controls(&self) -> &DirectionalControls {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut DirectionalControls {
        &mut self.controls
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn survey_controls(&mut self) {
        let keys = match self.source.key_states() {
            Ok(keys) => {
                if !self.available {
                    info!("Keyboard available again");
                    self.available = true;
                }
                keys
            }
            Err(e) => {
                if self.available {
                    warn!("Keyboard unavailable, treating as released: {}", e);
                    self.available = false;
                }
                self.controls.deactivate_all();
                return;
            }
        };

        for direction in Direction::ALL {
            let control = self.controls.get_mut(direction);
            if keys.is_pressed(control.input_id()) {
                control.activate_digital();
            } else {
                control.deactivate();
            }
        }
        debug!("Keyboard survey: {:?}", self.controls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FixedKeySource;

    const UP: u32 = 82;
    const RIGHT: u32 = 79;
    const DOWN: u32 = 81;
    const LEFT: u32 = 80;

    fn bindings() -> KeyBindings {
        KeyBindings {
            up: UP,
            right: RIGHT,
            down: DOWN,
            left: LEFT,
        }
    }

    fn controller() -> KeyboardController<FixedKeySource> {
        KeyboardController::new(&bindings(), FixedKeySource::default()).unwrap()
    }

    #[test]
    fn test_right_key_pressed() {
        let mut keyboard = controller();
        keyboard.source_mut().press(RIGHT);
        keyboard.survey_controls();

        assert!(keyboard.move_right().is_activated());
        assert_eq!(keyboard.move_right().value(), 1.0);
        assert!(!keyboard.move_up().is_activated());
        assert!(!keyboard.move_down().is_activated());
        assert!(!keyboard.move_left().is_activated());
    }

    #[test]
    fn test_diagonal_is_two_controls() {
        let mut keyboard = controller();
        keyboard.source_mut().press(UP);
        keyboard.source_mut().press(LEFT);
        keyboard.survey_controls();

        assert!(keyboard.move_up().is_activated());
        assert!(keyboard.move_left().is_activated());
        assert!(!keyboard.move_right().is_activated());
        assert!(!keyboard.move_down().is_activated());
    }

    #[test]
    fn test_released_key_is_cleared_on_next_survey() {
        let mut keyboard = controller();
        keyboard.source_mut().press(DOWN);
        keyboard.survey_controls();
        assert!(keyboard.move_down().is_activated());

        keyboard.source_mut().release(DOWN);
        keyboard.survey_controls();
        assert!(!keyboard.move_down().is_activated());
        assert_eq!(keyboard.move_down().value(), 0.0);
    }

    #[test]
    fn test_survey_polls_once() {
        let mut keyboard = controller();
        keyboard.survey_controls();
        assert_eq!(keyboard.source().polls(), 1);
    }

    #[test]
    fn test_unavailable_keyboard_deactivates_everything() {
        let mut keyboard = controller();
        keyboard.source_mut().press(UP);
        keyboard.survey_controls();
        assert!(keyboard.move_up().is_activated());

        keyboard.source_mut().set_available(false);
        keyboard.survey_controls();
        assert!(!keyboard.controls().any_activated());
        assert!(!keyboard.is_available());

        keyboard.source_mut().set_available(true);
        keyboard.survey_controls();
        assert!(keyboard.is_available());
        assert!(keyboard.move_up().is_activated());
    }

    #[test]
    fn test_binding_outside_key_table_is_rejected() {
        let result = KeyboardController::new(&bindings(), FixedKeySource::new(64));
        assert!(matches!(
            result,
            Err(ControllerError::InvalidBinding { direction: Direction::Up, .. })
        ));
    }

    #[test]
    fn test_controls_bound_to_configured_codes() {
        let keyboard = controller();
        assert_eq!(keyboard.move_up().input_id(), UP);
        assert_eq!(keyboard.move_right().input_id(), RIGHT);
        assert_eq!(keyboard.move_down().input_id(), DOWN);
        assert_eq!(keyboard.move_left().input_id(), LEFT);
    }

    #[test]
    fn test_default_bindings_fit_egui_key_table() {
        let keyboard = KeyboardController::new(&KeyBindings::default(), EguiKeySource::new());
        assert!(keyboard.is_ok());
    }
}
