//! Tick driver for the movement sandbox.
//!
//! Owns the available controllers, the character and the mover settings. Every
//! [`Sandbox::tick`] surveys the active controller and then moves the character,
//! in that order, so movement always reflects the current tick's input.

use crate::controller::{
    Controller, ControllerError, DirectionalControls, GamepadController, KeyboardController,
};
use crate::device::{AxisSource, KeySource};
use crate::model::{Character, Point};
use crate::mover::{Mover, MoverSettings};
use crate::settings::{ControlSettings, ControllerKind};
use tracing::{debug, info, warn};

pub const START_LOCATION: Point = Point::new(300.0, 300.0);

#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("Sandbox needs at least one controller")]
    NoControllers,

    #[error("Controller error: {0}")]
    ControllerError(#[from] ControllerError),
}

struct Slot {
    kind: ControllerKind,
    controller: Box<dyn Controller>,
}

/// Snapshot of what the sandbox did on the last tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlStatus {
    pub controller: String,
    pub available: bool,
    pub controls: DirectionalControls,
    pub location: Point,
    pub ticks: u64,
}

pub struct Sandbox {
    slots: Vec<Slot>,
    active: usize,
    character: Character,
    mover: MoverSettings,
    ticks: u64,
}

impl Sandbox {
    pub fn new(mover: MoverSettings) -> Self {
        Self {
            slots: Vec::new(),
            active: 0,
            character: Character::new(START_LOCATION),
            mover,
            ticks: 0,
        }
    }

    /// Builds the keyboard controller and, when a gamepad backend is present, the
    /// gamepad controller, then activates the kind the settings ask for.
    pub fn from_settings<K, A>(
        settings: &ControlSettings,
        keys: K,
        axes: Option<A>,
    ) -> Result<Self, SandboxError>
    where
        K: KeySource + 'static,
        A: AxisSource + 'static,
    {
        let mut sandbox = Self::new(settings.mover.clone());
        sandbox.add_controller(
            ControllerKind::Keyboard,
            Box::new(KeyboardController::new(&settings.keyboard, keys)?),
        );
        if let Some(axes) = axes {
            sandbox.add_controller(
                ControllerKind::Gamepad,
                Box::new(GamepadController::new(&settings.gamepad, axes)?),
            );
        }

        if !sandbox.select(settings.controller) {
            warn!(
                "{:?} controller not available, starting with {}",
                settings.controller,
                sandbox.active_controller()?.name()
            );
        }
        Ok(sandbox)
    }

    pub fn add_controller(&mut self, kind: ControllerKind, controller: Box<dyn Controller>) {
        info!("Registering {} controller", controller.name());
        self.slots.push(Slot { kind, controller });
    }

    pub fn controller_count(&self) -> usize {
        self.slots.len()
    }

    pub fn active_kind(&self) -> Option<ControllerKind> {
        self.slots.get(self.active).map(|slot| slot.kind)
    }

    pub fn active_controller(&self) -> Result<&dyn Controller, SandboxError> {
        self.slots
            .get(self.active)
            .map(|slot| slot.controller.as_ref())
            .ok_or(SandboxError::NoControllers)
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn mover_settings(&self) -> &MoverSettings {
        &self.mover
    }

    /// Makes the first controller of `kind` active. Returns false if there is none.
    pub fn select(&mut self, kind: ControllerKind) -> bool {
        match self.slots.iter().position(|slot| slot.kind == kind) {
            Some(index) => {
                self.switch_to(index);
                true
            }
            None => false,
        }
    }

    /// Switches to the next registered controller, wrapping around.
    pub fn cycle_controller(&mut self) -> Result<&dyn Controller, SandboxError> {
        if self.slots.is_empty() {
            return Err(SandboxError::NoControllers);
        }
        let next = (self.active + 1) % self.slots.len();
        self.switch_to(next);
        self.active_controller()
    }

    fn switch_to(&mut self, index: usize) {
        if index == self.active {
            return;
        }
        // stale activations of the old device must not leak into its next use
        if let Some(slot) = self.slots.get_mut(self.active) {
            slot.controller.deactivate_all_controls();
        }
        self.active = index;
        info!("Active controller: {}", self.slots[index].controller.name());
    }

    /// Survey, then move. Does nothing without controllers.
    pub fn tick(&mut self) {
        let Some(slot) = self.slots.get_mut(self.active) else {
            debug!("Tick without controllers");
            return;
        };
        slot.controller.survey_controls();
        Mover::with_settings(slot.controller.as_ref(), &self.mover)
            .move_character(&mut self.character);
        self.ticks += 1;
    }

    pub fn status(&self) -> Result<ControlStatus, SandboxError> {
        let controller = self.active_controller()?;
        Ok(ControlStatus {
            controller: controller.name().to_string(),
            available: controller.is_available(),
            controls: controller.controls().clone(),
            location: self.character.location(),
            ticks: self.ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{FixedAxisSource, FixedKeySource, GamepadAxis};
    use crate::controller::KeyBindings;

    fn settings() -> ControlSettings {
        ControlSettings {
            keyboard: KeyBindings {
                up: 82,
                right: 79,
                down: 81,
                left: 80,
            },
            ..ControlSettings::default()
        }
    }

    fn pressed(code: u32) -> FixedKeySource {
        let mut keys = FixedKeySource::default();
        keys.press(code);
        keys
    }

    #[test]
    fn test_tick_surveys_then_moves() {
        let mut sandbox =
            Sandbox::from_settings(&settings(), pressed(79), None::<FixedAxisSource>).unwrap();

        sandbox.tick();
        let status = sandbox.status().unwrap();
        assert_eq!(status.controller, "Keyboard");
        assert!(status.controls.right.is_activated());
        assert_eq!(status.location, Point::new(301.0, 300.0));
        assert_eq!(status.ticks, 1);
    }

    #[test]
    fn test_starts_with_requested_controller() {
        let settings = ControlSettings {
            controller: ControllerKind::Gamepad,
            ..settings()
        };
        let sandbox = Sandbox::from_settings(
            &settings,
            FixedKeySource::default(),
            Some(FixedAxisSource::new(1)),
        )
        .unwrap();
        assert_eq!(sandbox.active_kind(), Some(ControllerKind::Gamepad));
        assert_eq!(sandbox.controller_count(), 2);
        assert!(sandbox.status().unwrap().available);
    }

    #[test]
    fn test_status_reports_missing_gamepad() {
        let settings = ControlSettings {
            controller: ControllerKind::Gamepad,
            ..settings()
        };
        let mut sandbox = Sandbox::from_settings(
            &settings,
            FixedKeySource::default(),
            Some(FixedAxisSource::new(0)),
        )
        .unwrap();
        assert!(!sandbox.status().unwrap().available);

        sandbox.tick();
        let status = sandbox.status().unwrap();
        assert!(!status.available);
        assert_eq!(status.location, START_LOCATION);
    }

    #[test]
    fn test_falls_back_to_keyboard_without_gamepad_backend() {
        let settings = ControlSettings {
            controller: ControllerKind::Gamepad,
            ..settings()
        };
        let sandbox =
            Sandbox::from_settings(&settings, FixedKeySource::default(), None::<FixedAxisSource>)
                .unwrap();
        assert_eq!(sandbox.active_kind(), Some(ControllerKind::Keyboard));
    }

    #[test]
    fn test_cycle_clears_previous_controller() {
        let mut axes = FixedAxisSource::new(1);
        axes.set_axis(0, GamepadAxis::LeftStickY, -0.5);
        let mut sandbox = Sandbox::from_settings(&settings(), pressed(79), Some(axes)).unwrap();

        sandbox.tick();
        assert_eq!(sandbox.character().location(), Point::new(301.0, 300.0));

        let next = sandbox.cycle_controller().unwrap();
        assert_eq!(next.name(), "Gamepad");
        sandbox.tick();
        assert_eq!(sandbox.character().location(), Point::new(301.0, 299.5));

        let back = sandbox.cycle_controller().unwrap();
        assert_eq!(back.name(), "Keyboard");
        // gamepad controls were reset when switching away from it
        sandbox.cycle_controller().unwrap();
        assert!(!sandbox.status().unwrap().controls.any_activated());
    }

    #[test]
    fn test_empty_sandbox() {
        let mut sandbox = Sandbox::new(MoverSettings::default());
        sandbox.tick();
        assert!(sandbox.cycle_controller().is_err());
        assert!(sandbox.status().is_err());
        assert_eq!(sandbox.character().location(), START_LOCATION);
    }

    #[test]
    fn test_invalid_binding_fails_construction() {
        let settings = ControlSettings {
            keyboard: KeyBindings {
                up: 10_000,
                ..settings().keyboard
            },
            ..settings()
        };
        let result =
            Sandbox::from_settings(&settings, FixedKeySource::default(), None::<FixedAxisSource>);
        assert!(matches!(result, Err(SandboxError::ControllerError(_))));
    }
}
