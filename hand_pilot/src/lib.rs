//! # hand_pilot
//!
//! Webcam hand-gesture flight controller.  Each captured frame is mirrored,
//! run through a hand-landmark detector, and turned into elevator, aileron
//! and throttle commands for X-Plane, with an annotated preview window.
//!
//! ## Gesture → Control mapping
//!
//! | Hand | Gesture | Control |
//! |---|---|---|
//! | Left | Open, moved up/down from the reference point | Elevator |
//! | Left | Open, moved left/right from the reference point | Aileron |
//! | Left | Closed or out of view | Attitude held |
//! | Right | Open, middle finger extension | Throttle |
//! | Right | Closed | Throttle cut to 0 |
//! | Right | Out of view | Throttle held |
//!
//! Rudder is always 0.
//!
//! ## Modes
//!
//! * (default) **Simulation**: synthetic frames and keyboard-driven hands.
//! * `--detector mediapipe` runs a MediaPipe helper process on every frame.
//! * `--camera <device>` with the `v4l2` feature captures from a webcam.
//! * `--dry-run` computes controls without sending them.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | Arrows | Move left hand |
//! | `W` / `S` | Open / curl right middle finger |
//! | `L` / `R` | Toggle left / right fist |
//! | `1` / `2` | Toggle left / right hand in view |
//! | `Escape` | Quit |

pub mod error;
pub mod logging;
pub mod config;
pub mod frame;
pub mod detector;
pub mod link;
pub mod overlay;
pub mod visualizer;
pub mod app;

pub use error::PilotError;
