//! Analog gamepad controller
//!
//! Both directions of an axis share one stick axis: left/right read the horizontal
//! axis, up/down the vertical one. A reading whose magnitude does not exceed the
//! dead zone counts as centered and clears both controls on that axis. Outside the
//! dead zone exactly one control is active, carrying the raw magnitude `|v|`.
//!
//! Sign convention follows the device: positive horizontal is right, negative
//! vertical is up.

use crate::controller::control::{Control, Direction, DirectionalControls};
use crate::controller::controller::{Controller, ControllerError};
use crate::device::{AxisSource, DeviceError, GamepadAxis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_DEAD_ZONE: f32 = 0.05;

/// Which enumerated gamepad a controller reads from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceSelection {
    #[default]
    First,
    Index(usize),
}

impl DeviceSelection {
    /// Position of the selected device, `None` if fewer devices are present.
    pub fn resolve(self, device_count: usize) -> Option<usize> {
        let index = match self {
            DeviceSelection::First => 0,
            DeviceSelection::Index(index) => index,
        };
        (index < device_count).then_some(index)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadSettings {
    /// Axis id driving left/right
    pub horizontal_axis: u32,
    /// Axis id driving up/down
    pub vertical_axis: u32,
    pub dead_zone: f32,
    pub device: DeviceSelection,
}

impl Default for GamepadSettings {
    fn default() -> Self {
        Self {
            horizontal_axis: GamepadAxis::LeftStickX.id(),
            vertical_axis: GamepadAxis::LeftStickY.id(),
            dead_zone: DEFAULT_DEAD_ZONE,
            device: DeviceSelection::First,
        }
    }
}

impl GamepadSettings {
    /// Checks axis ids and dead zone, returning the resolved axes.
    pub fn validate(&self) -> Result<(GamepadAxis, GamepadAxis), ControllerError> {
        if !self.dead_zone.is_finite() || !(0.0..1.0).contains(&self.dead_zone) {
            return Err(ControllerError::InvalidDeadZone(self.dead_zone));
        }
        if self.horizontal_axis == self.vertical_axis {
            return Err(ControllerError::SharedAxis(self.horizontal_axis));
        }
        let horizontal = resolve_axis(self.horizontal_axis, Direction::Right)?;
        let vertical = resolve_axis(self.vertical_axis, Direction::Up)?;
        Ok((horizontal, vertical))
    }
}

fn resolve_axis(id: u32, direction: Direction) -> Result<GamepadAxis, ControllerError> {
    GamepadAxis::try_from(id).map_err(|id| ControllerError::InvalidBinding {
        direction,
        reason: format!("unknown gamepad axis {}", id),
    })
}

/// True when `value` is far enough from center to count as input.
pub fn exceeds_dead_zone(value: f32, dead_zone: f32) -> bool {
    value.abs() > dead_zone
}

pub struct GamepadController<A: AxisSource> {
    controls: DirectionalControls,
    source: A,
    horizontal_axis: GamepadAxis,
    vertical_axis: GamepadAxis,
    dead_zone: f32,
    selection: DeviceSelection,
    connected: bool,
}

impl<A: AxisSource> GamepadController<A> {
    pub fn new(settings: &GamepadSettings, mut source: A) -> Result<Self, ControllerError> {
        let (horizontal_axis, vertical_axis) = settings.validate()?;
        info!(
            "Creating gamepad controller: horizontal {}, vertical {}, deadzone {}, device {:?}",
            horizontal_axis, vertical_axis, settings.dead_zone, settings.device
        );
        // the backend already warns about an empty device list at startup
        let connected = settings.device.resolve(source.device_count()).is_some();

        Ok(Self {
            controls: DirectionalControls::new(
                vertical_axis.id(),
                horizontal_axis.id(),
                vertical_axis.id(),
                horizontal_axis.id(),
            ),
            source,
            horizontal_axis,
            vertical_axis,
            dead_zone: settings.dead_zone,
            selection: settings.device,
            connected,
        })
    }

    pub fn source(&self) -> &A {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut A {
        &mut self.source
    }

    fn read_axes(&mut self) -> Result<(f32, f32), DeviceError> {
        let device_count = self.source.device_count();
        let device = self
            .selection
            .resolve(device_count)
            .ok_or_else(|| {
                DeviceError::Unavailable(format!(
                    "{:?} requested but {} gamepads connected",
                    self.selection, device_count
                ))
            })?;
        let horizontal = self.source.axis_value(device, self.horizontal_axis)?;
        let vertical = self.source.axis_value(device, self.vertical_axis)?;
        Ok((horizontal, vertical))
    }
}

// `negative` is the control a negative reading selects, `positive` the other one.
fn apply_axis(value: f32, dead_zone: f32, negative: &mut Control, positive: &mut Control) {
    if !exceeds_dead_zone(value, dead_zone) {
        negative.deactivate();
        positive.deactivate();
    } else if value > 0.0 {
        positive.activate(value);
        negative.deactivate();
    } else {
        negative.activate(value.abs());
        positive.deactivate();
    }
}

impl<A: AxisSource> Controller for GamepadController<A> {
    fn name(&self) -> &str {
        "Gamepad"
    }

    fn controls(&self) -> &DirectionalControls {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut DirectionalControls {
        &mut self.controls
    }

    fn is_available(&self) -> bool {
        self.connected
    }

    fn survey_controls(&mut self) {
        let (horizontal, vertical) = match self.read_axes() {
            Ok(values) => {
                if !self.connected {
                    info!("Gamepad input available again");
                    self.connected = true;
                }
                values
            }
            Err(e) => {
                if self.connected {
                    warn!("Gamepad unavailable, treating sticks as centered: {}", e);
                    self.connected = false;
                }
                self.controls.deactivate_all();
                return;
            }
        };

        let controls = &mut self.controls;
        apply_axis(horizontal, self.dead_zone, &mut controls.left, &mut controls.right);
        apply_axis(vertical, self.dead_zone, &mut controls.up, &mut controls.down);

        debug!(
            "Gamepad survey: x {:.4}, y {:.4} -> {:?}",
            horizontal, vertical, self.controls
        );
    }
}
