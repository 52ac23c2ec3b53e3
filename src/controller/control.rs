use serde::{Deserialize, Serialize};
use std::fmt;

/// A single logical input bound to one raw device input (a key code or an axis id).
///
/// Deactivated controls always carry a value of zero. Digital sources activate with
/// a magnitude of 1, analog sources with the magnitude they read.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    input_id: u32,
    activated: bool,
    value: f32,
}

impl Control {
    pub const DIGITAL_MAGNITUDE: f32 = 1.0;

    pub fn new(input_id: u32) -> Self {
        Self {
            input_id,
            activated: false,
            value: 0.0,
        }
    }

    pub fn input_id(&self) -> u32 {
        self.input_id
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn activate(&mut self, magnitude: f32) {
        self.activated = true;
        self.value = magnitude;
    }

    pub fn activate_digital(&mut self) {
        self.activate(Self::DIGITAL_MAGNITUDE);
    }

    pub fn deactivate(&mut self) {
        self.activated = false;
        self.value = 0.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
        }
    }
}

/// The four directional controls every controller owns.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalControls {
    pub up: Control,
    pub right: Control,
    pub down: Control,
    pub left: Control,
}

impl DirectionalControls {
    pub fn new(up: u32, right: u32, down: u32, left: u32) -> Self {
        Self {
            up: Control::new(up),
            right: Control::new(right),
            down: Control::new(down),
            left: Control::new(left),
        }
    }

    pub fn get(&self, direction: Direction) -> &Control {
        match direction {
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut Control {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        }
    }

    pub fn deactivate_all(&mut self) {
        self.up.deactivate();
        self.right.deactivate();
        self.down.deactivate();
        self.left.deactivate();
    }

    pub fn any_activated(&self) -> bool {
        Direction::ALL
            .iter()
            .any(|&direction| self.get(direction).is_activated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_deactivate() {
        let mut control = Control::new(79);
        assert!(!control.is_activated());
        assert_eq!(control.value(), 0.0);

        control.activate(-0.7);
        assert!(control.is_activated());
        assert_eq!(control.value(), -0.7);

        control.deactivate();
        assert!(!control.is_activated());
        assert_eq!(control.value(), 0.0);
    }

    #[test]
    fn test_digital_activation_uses_unit_magnitude() {
        let mut control = Control::new(1);
        control.activate_digital();
        assert_eq!(control.value(), 1.0);
    }

    #[test]
    fn test_deactivate_all() {
        let mut controls = DirectionalControls::new(0, 1, 2, 3);
        for direction in Direction::ALL {
            controls.get_mut(direction).activate(0.5);
        }
        assert!(controls.any_activated());

        controls.deactivate_all();
        assert!(!controls.any_activated());
        assert!(Direction::ALL
            .iter()
            .all(|&direction| controls.get(direction).value() == 0.0));
    }
}
