//! Input abstraction for a 2D movement sandbox.
//!
//! Physical devices are reduced to four directional controls by a
//! [`Controller`](controller::Controller); a [`Mover`](mover::Mover) turns the
//! active controls into a new character location once per tick.

pub mod controller;
pub mod device;
pub mod model;
pub mod mover;
pub mod sandbox;
pub mod settings;
pub mod ui;

pub use controller::{Control, Controller, Direction, GamepadController, KeyboardController};
pub use model::{Character, Point};
pub use mover::Mover;
