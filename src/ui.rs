//! eframe host for the movement sandbox.
//!
//! The window is the keyboard device: each frame its egui input state is copied
//! into the shared [`EguiKeySource`] before the sandbox ticks. `Tab` switches
//! controller, `Escape` closes the window. The panel only reads out control state
//! and character position.

use crate::controller::Direction;
use crate::device::EguiKeySource;
use crate::sandbox::Sandbox;
use eframe::egui::{self, Key, RichText};
use std::time::{Duration, Instant};
use tracing::{error, info};

// ~30 ticks per second; input events repaint sooner but do not tick sooner
const REPAINT_INTERVAL: Duration = Duration::from_millis(33);

/// Decides which repaints advance the sandbox, so movement speed does not
/// depend on how often egui repaints.
#[derive(Debug, Clone)]
struct TickClock {
    interval: Duration,
    last: Option<Instant>,
}

impl TickClock {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True at most once per interval. The first call always ticks.
    fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

pub struct SandboxUI {
    sandbox: Sandbox,
    keys: EguiKeySource,
    clock: TickClock,
}

impl SandboxUI {
    pub fn new(cc: &eframe::CreationContext<'_>, sandbox: Sandbox, keys: EguiKeySource) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        Self {
            sandbox,
            keys,
            clock: TickClock::new(REPAINT_INTERVAL),
        }
    }

    fn handle_host_keys(&mut self, ctx: &egui::Context) {
        let (cycle, quit) = ctx.input(|input| {
            self.keys.update(input);
            (input.key_pressed(Key::Tab), input.key_pressed(Key::Escape))
        });

        if quit {
            info!("Escape pressed, closing sandbox");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if cycle {
            match self.sandbox.cycle_controller() {
                Ok(controller) => info!("Switched to {} controller", controller.name()),
                Err(e) => error!("Unable to switch controller: {}", e),
            }
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let status = match self.sandbox.status() {
            Ok(status) => status,
            Err(e) => {
                ui.label(RichText::new(e.to_string()).color(egui::Color32::RED));
                return;
            }
        };

        ui.label("Press Tab to change controller, Escape to quit");
        ui.label(format!("current controller: {}", status.controller));
        if !status.available {
            ui.label(RichText::new("device not connected").color(egui::Color32::YELLOW));
        }
        for direction in Direction::ALL {
            let control = status.controls.get(direction);
            ui.label(format!(
                "{}={} ({:.2})",
                direction,
                control.is_activated(),
                control.value()
            ));
        }
        ui.separator();
        ui.label(format!("position: {}", status.location));
        ui.label(format!(
            "speed: {}  ticks: {}",
            self.sandbox.mover_settings().speed,
            status.ticks
        ));
    }
}

impl eframe::App for SandboxUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_host_keys(ctx);
        if self.clock.due(Instant::now()) {
            self.sandbox.tick();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_status(ui);
        });
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repaints_within_interval_do_not_tick() {
        let mut clock = TickClock::new(REPAINT_INTERVAL);
        let start = Instant::now();

        assert!(clock.due(start));
        assert!(!clock.due(start));
        assert!(!clock.due(start + Duration::from_millis(5)));
        assert!(!clock.due(start + Duration::from_millis(32)));
        assert!(clock.due(start + REPAINT_INTERVAL));
    }

    #[test]
    fn test_tick_rate_independent_of_repaint_rate() {
        let mut clock = TickClock::new(REPAINT_INTERVAL);
        let start = Instant::now();

        // a mouse drag repainting every millisecond for one second
        let ticks = (0..1000)
            .filter(|ms| clock.due(start + Duration::from_millis(*ms)))
            .count();
        assert_eq!(ticks, 1000 / 33 + 1);
    }

    #[test]
    fn test_late_repaint_ticks_once() {
        let mut clock = TickClock::new(REPAINT_INTERVAL);
        let start = Instant::now();
        assert!(clock.due(start));

        let late = start + Duration::from_millis(500);
        assert!(clock.due(late));
        assert!(!clock.due(late + Duration::from_millis(1)));
    }
}
