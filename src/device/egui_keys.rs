//! Keyboard backend fed from the egui input state of the host window.
//!
//! Raw key codes are positions in [`egui::Key::ALL`]. The host clones the source,
//! hands one copy to the keyboard controller and calls [`EguiKeySource::update`]
//! on the other once per frame, before the tick runs.

use super::{DeviceError, KeySource, KeyStateTable};
use eframe::egui::{InputState, Key};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug)]
struct SharedKeys {
    table: KeyStateTable,
    focused: bool,
}

#[derive(Clone, Debug)]
pub struct EguiKeySource {
    shared: Rc<RefCell<SharedKeys>>,
}

impl Default for EguiKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiKeySource {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(SharedKeys {
                table: KeyStateTable::new(Key::ALL.len()),
                focused: true,
            })),
        }
    }

    /// Raw code of an egui key, `None` if egui does not list it.
    pub fn key_code(key: Key) -> Option<u32> {
        Key::ALL
            .iter()
            .position(|candidate| *candidate == key)
            .map(|index| index as u32)
    }

    pub fn key_for_code(code: u32) -> Option<Key> {
        Key::ALL.get(code as usize).copied()
    }

    /// Copies the current key state of the window into the shared table.
    pub fn update(&self, input: &InputState) {
        let mut shared = self.shared.borrow_mut();
        if shared.focused != input.focused {
            info!("Keyboard focus changed: focused = {}", input.focused);
            shared.focused = input.focused;
        }
        for (code, key) in Key::ALL.iter().enumerate() {
            shared.table.set(code as u32, input.keys_down.contains(key));
        }
    }

    /// Sets the key state directly, bypassing egui.
    pub fn set_pressed(&self, key: Key, pressed: bool) {
        if let Some(code) = Self::key_code(key) {
            self.shared.borrow_mut().table.set(code, pressed);
        }
    }

    pub fn set_focused(&self, focused: bool) {
        self.shared.borrow_mut().focused = focused;
    }
}

impl KeySource for EguiKeySource {
    fn key_count(&self) -> usize {
        Key::ALL.len()
    }

    fn key_states(&mut self) -> Result<KeyStateTable, DeviceError> {
        let shared = self.shared.borrow();
        if !shared.focused {
            debug!("Window has no keyboard focus, reporting keyboard unavailable");
            return Err(DeviceError::Unavailable(
                "window lost keyboard focus".to_string(),
            ));
        }
        Ok(shared.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes_round_trip_through_egui_keys() {
        for key in [Key::ArrowUp, Key::ArrowRight, Key::ArrowDown, Key::ArrowLeft] {
            let code = EguiKeySource::key_code(key).unwrap();
            assert_eq!(EguiKeySource::key_for_code(code), Some(key));
        }
    }

    #[test]
    fn test_clones_share_key_state() {
        let feed = EguiKeySource::new();
        let mut source = feed.clone();

        feed.set_pressed(Key::ArrowLeft, true);
        let code = EguiKeySource::key_code(Key::ArrowLeft).unwrap();
        assert!(source.key_states().unwrap().is_pressed(code));

        feed.set_focused(false);
        assert!(source.key_states().is_err());
    }
}
