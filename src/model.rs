use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-dimensional location in host positional units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Movable entity. Its location is only ever replaced, never edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    location: Point,
}

impl Character {
    pub fn new(start: Point) -> Self {
        Self { location: start }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn move_to(&mut self, point: Point) {
        self.location = point;
    }
}
