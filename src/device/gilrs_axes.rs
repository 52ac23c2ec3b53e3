use super::{AxisSource, DeviceError, GamepadAxis};
use gilrs::{Axis, Event, EventType, Gamepad, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

// Gamepad backend over gilrs. gilrs reports stick Y positive when pushed up, the
// controllers expect the opposite, so vertical stick axes are negated here.
pub struct GilrsAxisSource {
    gilrs: Gilrs,
}

impl GilrsAxisSource {
    pub fn new() -> Result<Self, DeviceError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(DeviceError::InitializationError(e.to_string()));
            }
        };

        let source = Self { gilrs };
        source.log_gamepads();
        Ok(source)
    }

    fn log_gamepads(&self) {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();
        if gamepads.is_empty() {
            warn!("No gamepad connected, gamepad controls stay idle until one appears");
            return;
        }
        info!("Found {} gamepads:", gamepads.len());
        for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
            info!(
                "  [{}] ID: {}, Name: {}, UUID: {:?}",
                idx,
                id,
                gamepad.name(),
                gamepad.uuid()
            );
        }
    }

    // gilrs only refreshes cached axis state while its event queue is drained
    fn pump_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => info!("Gamepad {} connected", id),
                EventType::Disconnected => warn!("Gamepad {} disconnected", id),
                _ => {}
            }
        }
    }
}

impl AxisSource for GilrsAxisSource {
    fn device_count(&mut self) -> usize {
        self.pump_events();
        self.gilrs.gamepads().count()
    }

    fn axis_value(&mut self, device: usize, axis: GamepadAxis) -> Result<f32, DeviceError> {
        let (id, gamepad) = self
            .gilrs
            .gamepads()
            .nth(device)
            .ok_or(DeviceError::Disconnected(device))?;

        let raw = gamepad.value(to_gilrs_axis(axis));
        debug!("Gamepad {} axis {} = {:.4}", id, axis, raw);
        Ok(to_core_value(axis, raw))
    }
}

/// Converts a gilrs reading to the controllers' sign convention.
fn to_core_value(axis: GamepadAxis, raw: f32) -> f32 {
    if axis.is_vertical_stick() {
        -raw
    } else {
        raw
    }
}

fn to_gilrs_axis(axis: GamepadAxis) -> Axis {
    match axis {
        GamepadAxis::LeftStickX => Axis::LeftStickX,
        GamepadAxis::LeftStickY => Axis::LeftStickY,
        GamepadAxis::RightStickX => Axis::RightStickX,
        GamepadAxis::RightStickY => Axis::RightStickY,
        GamepadAxis::LeftTrigger => Axis::LeftZ,
        GamepadAxis::RightTrigger => Axis::RightZ,
    }
}
