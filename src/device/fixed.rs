//! In-memory device sources with scripted state.

use super::{AxisSource, DeviceError, GamepadAxis, KeySource, KeyStateTable};

/// Key table of the size SDL-style scancodes need.
pub const DEFAULT_KEY_COUNT: usize = 512;

/// Keyboard whose key table is set by hand.
#[derive(Clone, Debug)]
pub struct FixedKeySource {
    table: KeyStateTable,
    available: bool,
    polls: usize,
}

impl Default for FixedKeySource {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_COUNT)
    }
}

impl FixedKeySource {
    pub fn new(key_count: usize) -> Self {
        Self {
            table: KeyStateTable::new(key_count),
            available: true,
            polls: 0,
        }
    }

    pub fn press(&mut self, code: u32) {
        self.table.set(code, true);
    }

    pub fn release(&mut self, code: u32) {
        self.table.set(code, false);
    }

    /// While unplugged every poll fails.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// How many times the key table has been read.
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl KeySource for FixedKeySource {
    fn key_count(&self) -> usize {
        self.table.len()
    }

    fn key_states(&mut self) -> Result<KeyStateTable, DeviceError> {
        self.polls += 1;
        if !self.available {
            return Err(DeviceError::Unavailable("keyboard unplugged".to_string()));
        }
        Ok(self.table.clone())
    }
}

/// Set of gamepads whose axes are set by hand.
#[derive(Clone, Debug, Default)]
pub struct FixedAxisSource {
    devices: Vec<[f32; GamepadAxis::ALL.len()]>,
    polls: usize,
}

impl FixedAxisSource {
    /// Creates `device_count` gamepads with every axis centered.
    pub fn new(device_count: usize) -> Self {
        Self {
            devices: vec![[0.0; GamepadAxis::ALL.len()]; device_count],
            polls: 0,
        }
    }

    /// Out-of-range devices are ignored.
    pub fn set_axis(&mut self, device: usize, axis: GamepadAxis, value: f32) {
        if let Some(axes) = self.devices.get_mut(device) {
            axes[axis as usize] = value;
        }
    }

    /// Plugs in another centered gamepad and returns its index.
    pub fn connect(&mut self) -> usize {
        self.devices.push([0.0; GamepadAxis::ALL.len()]);
        self.devices.len() - 1
    }

    pub fn disconnect_all(&mut self) {
        self.devices.clear();
    }

    /// How many times the device list has been enumerated.
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl AxisSource for FixedAxisSource {
    fn device_count(&mut self) -> usize {
        self.polls += 1;
        self.devices.len()
    }

    fn axis_value(&mut self, device: usize, axis: GamepadAxis) -> Result<f32, DeviceError> {
        self.devices
            .get(device)
            .map(|axes| axes[axis as usize])
            .ok_or(DeviceError::Disconnected(device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unplugged_keyboard_fails_poll() {
        let mut source = FixedKeySource::new(16);
        source.press(3);
        source.set_available(false);

        assert!(source.key_states().is_err());
        assert_eq!(source.polls(), 1);

        source.set_available(true);
        let table = source.key_states().unwrap();
        assert!(table.is_pressed(3));
    }

    #[test]
    fn test_disconnected_gamepad_read() {
        let mut source = FixedAxisSource::new(1);
        source.set_axis(0, GamepadAxis::LeftStickX, 0.4);
        assert_eq!(source.axis_value(0, GamepadAxis::LeftStickX), Ok(0.4));

        source.disconnect_all();
        assert_eq!(source.device_count(), 0);
        assert_eq!(
            source.axis_value(0, GamepadAxis::LeftStickX),
            Err(DeviceError::Disconnected(0))
        );
    }
}
