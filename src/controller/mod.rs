//! Controller subsystem for directional input
//!
//! Every device is reduced to four directional controls:
//!
//! 1. [`control`] - single logical input with activation state and magnitude
//! 2. [`controller`] - the [`Controller`] trait: survey and reset contract
//! 3. [`keyboard`] - digital key-state sampling
//! 4. [`gamepad`] - analog axis sampling with dead-zone filtering
//!
//! # Architecture
//!
//! ```text
//! KeySource  ──► KeyboardController ─┐
//!                                    ├──► DirectionalControls ──► Mover
//! AxisSource ──► GamepadController  ─┘
//! ```
//!
//! Surveys run on the host's tick, synchronously, one controller at a time.

pub mod control;
#[allow(clippy::module_inception)]
pub mod controller;
pub mod gamepad;
pub mod keyboard;

pub use control::{Control, Direction, DirectionalControls};
pub use controller::{Controller, ControllerError};
pub use gamepad::{
    exceeds_dead_zone, DeviceSelection, GamepadController, GamepadSettings, DEFAULT_DEAD_ZONE,
};
pub use keyboard::{KeyBindings, KeyboardController};
