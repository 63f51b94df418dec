//! Preview window using `minifb`.
//!
//! Shows the mirrored, annotated frame at a fraction of capture size.  In
//! simulation mode the keyboard drives the synthetic hands:
//!
//! | Key | Effect |
//! |---|---|
//! | ← ↑ → ↓ | move the left hand (attitude) |
//! | W / S | stretch / curl the right middle finger (throttle) |
//! | L / R | toggle left / right fist |
//! | 1 / 2 | left / right hand in or out of view |
//! | Esc | quit |

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::detector::{SimInput, SimKey};
use crate::error::PilotError;
use crate::frame::Frame;
use crate::overlay::{self, GREY};

pub const WINDOW_TITLE: &str = "Hand Pilot — X-Plane Controller";

/// Bounded wait per iteration.
const UPDATE_INTERVAL: Duration = Duration::from_millis(5);

const LEGEND: &str = "arrows=attitude  W/S=throttle  L/R=fist  1/2=hand  Esc=quit";

pub struct Visualizer {
    window: Window,
    factor: u32,
    sim_tx: Option<Sender<SimInput>>,
}

impl Visualizer {
    /// Open a window sized for `width × height` frames shrunk by `factor`.
    ///
    /// Simulation keys are only forwarded when `sim_tx` is given.
    pub fn new(width: u32, height: u32, factor: u32, sim_tx: Option<Sender<SimInput>>) -> Result<Self, PilotError> {
        let factor = factor.max(1);
        let mut window = Window::new(
            WINDOW_TITLE,
            (width / factor) as usize,
            (height / factor) as usize,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;
        window.limit_update_rate(Some(UPDATE_INTERVAL));
        log::info!("preview window {}x{}", width / factor, height / factor);

        Ok(Visualizer { window, factor, sim_tx })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll the keyboard.  Returns false when the user asked to quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }
        if self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            log::info!("exit requested");
            return false;
        }

        let Some(tx) = &self.sim_tx else { return true };

        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        let mut keys = Vec::new();
        for (k, sk) in [
            (Key::Up,    SimKey::Up),
            (Key::Down,  SimKey::Down),
            (Key::Left,  SimKey::Left),
            (Key::Right, SimKey::Right),
            (Key::W,     SimKey::ThrottleUp),
            (Key::S,     SimKey::ThrottleDown),
        ] {
            if held(k) { keys.push(sk); }
        }
        for (k, sk) in [
            (Key::L,    SimKey::LeftFist),
            (Key::R,    SimKey::RightFist),
            (Key::Key1, SimKey::LeftHand),
            (Key::Key2, SimKey::RightHand),
        ] {
            if one_shot(k) { keys.push(sk); }
        }

        for sk in keys {
            // receiver gone means the detector was dropped; nothing to steer
            let _ = tx.send(sk.input());
        }
        true
    }

    /// Shrink and present one annotated frame.
    pub fn show(&mut self, frame: &Frame) -> Result<(), PilotError> {
        let mut preview = frame.downscale(self.factor);
        if self.sim_tx.is_some() {
            let y = preview.height as i32 - 4;
            overlay::draw_text(&mut preview, LEGEND, 4, y, GREY, 1);
        }
        self.window.update_with_buffer(
            &preview.pixels,
            preview.width as usize,
            preview.height as usize,
        )?;
        Ok(())
    }
}
