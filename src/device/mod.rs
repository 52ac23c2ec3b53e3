//! Raw device polling layer
//!
//! Controllers never talk to a windowing or gamepad library directly. They poll
//! one of the two source traits defined here:
//!
//! 1. [`KeySource`] - full digital key-state table of a keyboard
//! 2. [`AxisSource`] - analog axis values of enumerated gamepads
//!
//! # Backends
//!
//! ```text
//! egui InputState ──► EguiKeySource   ──► KeyboardController
//! gilrs           ──► GilrsAxisSource ──► GamepadController
//! ```
//!
//! [`fixed`] holds in-memory sources with scripted state, used by tests and by
//! hosts that replay recorded input.

pub mod egui_keys;
pub mod fixed;
pub mod gilrs_axes;

use std::fmt;

pub use egui_keys::EguiKeySource;
pub use fixed::{FixedAxisSource, FixedKeySource};
pub use gilrs_axes::GilrsAxisSource;

// Device errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeviceError {
    #[error("Input device unavailable: {0}")]
    Unavailable(String),

    #[error("Gamepad {0} is not connected")]
    Disconnected(usize),

    #[error("Failed to initialize input backend: {0}")]
    InitializationError(String),
}

/// Snapshot of every digital key on a keyboard, indexed by raw key code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyStateTable {
    pressed: Vec<bool>,
}

impl KeyStateTable {
    /// Creates a table of `len` keys, all released.
    pub fn new(len: usize) -> Self {
        Self {
            pressed: vec![false; len],
        }
    }

    /// Creates a table of `len` keys with the given codes held down.
    /// Codes outside the table are ignored.
    pub fn with_pressed(len: usize, codes: &[u32]) -> Self {
        let mut table = Self::new(len);
        for &code in codes {
            table.set(code, true);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.pressed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    /// Unknown codes read as released.
    pub fn is_pressed(&self, code: u32) -> bool {
        self.pressed.get(code as usize).copied().unwrap_or(false)
    }

    pub fn set(&mut self, code: u32, pressed: bool) {
        if let Some(slot) = self.pressed.get_mut(code as usize) {
            *slot = pressed;
        }
    }
}

/// Analog axes a gamepad exposes, numbered the way settings refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickX = 0,
    LeftStickY = 1,
    RightStickX = 2,
    RightStickY = 3,
    LeftTrigger = 4,
    RightTrigger = 5,
}

impl GamepadAxis {
    pub const ALL: [GamepadAxis; 6] = [
        GamepadAxis::LeftStickX,
        GamepadAxis::LeftStickY,
        GamepadAxis::RightStickX,
        GamepadAxis::RightStickY,
        GamepadAxis::LeftTrigger,
        GamepadAxis::RightTrigger,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn is_vertical_stick(self) -> bool {
        matches!(self, GamepadAxis::LeftStickY | GamepadAxis::RightStickY)
    }
}

impl TryFrom<u32> for GamepadAxis {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        GamepadAxis::ALL
            .iter()
            .copied()
            .find(|axis| axis.id() == id)
            .ok_or(id)
    }
}

impl fmt::Display for GamepadAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamepadAxis::LeftStickX => "LeftStickX",
            GamepadAxis::LeftStickY => "LeftStickY",
            GamepadAxis::RightStickX => "RightStickX",
            GamepadAxis::RightStickY => "RightStickY",
            GamepadAxis::LeftTrigger => "LeftTrigger",
            GamepadAxis::RightTrigger => "RightTrigger",
        };
        write!(f, "{} ({})", name, self.id())
    }
}

/// Digital keyboard state provider.
pub trait KeySource {
    /// Number of key codes the table covers. Bindings must be below this.
    fn key_count(&self) -> usize;

    /// Returns the current state of every key.
    fn key_states(&mut self) -> Result<KeyStateTable, DeviceError>;
}

/// Analog gamepad state provider.
///
/// Axis values are normalized to `[-1.0, 1.0]`; on vertical stick axes "up" reads
/// negative.
pub trait AxisSource {
    /// Number of currently enumerated devices. Called once per survey, so
    /// backends that need to pump an event queue do it here.
    fn device_count(&mut self) -> usize;

    fn axis_value(&mut self, device: usize, axis: GamepadAxis) -> Result<f32, DeviceError>;
}

impl<T: KeySource + ?Sized> KeySource for Box<T> {
    fn key_count(&self) -> usize {
        (**self).key_count()
    }

    fn key_states(&mut self) -> Result<KeyStateTable, DeviceError> {
        (**self).key_states()
    }
}

impl<T: AxisSource + ?Sized> AxisSource for Box<T> {
    fn device_count(&mut self) -> usize {
        (**self).device_count()
    }

    fn axis_value(&mut self, device: usize, axis: GamepadAxis) -> Result<f32, DeviceError> {
        (**self).axis_value(device, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table_ignores_out_of_range_codes() {
        let mut table = KeyStateTable::with_pressed(4, &[1, 9]);
        assert!(table.is_pressed(1));
        assert!(!table.is_pressed(9));

        table.set(100, true);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_axis_ids() {
        assert_eq!(GamepadAxis::try_from(0), Ok(GamepadAxis::LeftStickX));
        assert_eq!(GamepadAxis::try_from(1), Ok(GamepadAxis::LeftStickY));
        assert_eq!(GamepadAxis::try_from(5), Ok(GamepadAxis::RightTrigger));
        assert_eq!(GamepadAxis::try_from(6), Err(6));
    }
}
