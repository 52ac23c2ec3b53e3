//! Translation of directional controls into character movement.
//!
//! Each tick the mover reads the controller it is bound to and replaces the
//! character's location. On the x axis an active `right` wins over `left`, on the
//! y axis `up` wins over `down`. Up is toward smaller y.

use crate::controller::Controller;
use crate::model::{Character, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverSettings {
    /// Added to the displacement of every active direction, each tick.
    pub speed: f32,
}

pub struct Mover<'a> {
    controller: &'a dyn Controller,
    speed: f32,
}

impl<'a> Mover<'a> {
    pub fn new(controller: &'a dyn Controller) -> Self {
        Self {
            controller,
            speed: 0.0,
        }
    }

    pub fn with_settings(controller: &'a dyn Controller, settings: &MoverSettings) -> Self {
        Self::new(controller).with_speed(settings.speed)
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change in (x, y) the current control state produces.
    pub fn displacement(&self) -> (f32, f32) {
        let origin = Point::default();
        (self.new_x(origin.x), self.new_y(origin.y))
    }

    pub fn move_character(&self, character: &mut Character) {
        let start = character.location();
        let target = Point::new(self.new_x(start.x), self.new_y(start.y));
        if target != start {
            debug!("Moving character from {} to {}", start, target);
        }
        character.move_to(target);
    }

    fn new_x(&self, start_x: f32) -> f32 {
        let right = self.controller.move_right();
        let left = self.controller.move_left();
        if right.is_activated() {
            return start_x + right.value() + self.speed;
        }
        if left.is_activated() {
            return start_x - left.value().abs() - self.speed;
        }
        start_x
    }

    fn new_y(&self, start_y: f32) -> f32 {
        let up = self.controller.move_up();
        let down = self.controller.move_down();
        if up.is_activated() {
            return start_y - up.value().abs() - self.speed;
        }
        if down.is_activated() {
            return start_y + down.value() + self.speed;
        }
        start_y
    }
}
